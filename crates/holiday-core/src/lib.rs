//! # holiday-core
//!
//! Fetching and aggregation of public holidays for the Holiday Hunter dashboard.
//!
//! ## Pipeline
//!
//! - [`CountrySource`] - which countries to query (static list or remote lookup)
//! - [`HolidayFetcher`] - one request per country, parallel or batched, partial failure tolerated
//! - [`Dashboard`] - leaderboard, month statistics and upcoming holidays for one generation
//!
//! ## Helpers
//!
//! - [`flag_emoji`] - regional indicator flag for a two-letter country code
//! - [`Atlas`] / [`Orthographic`] - country geometry and globe projection
//! - [`Countdown`] - time remaining until the next holiday

mod aggregate;
mod client;
mod codes;
mod countdown;
mod countries;
mod error;
mod fetcher;
mod flags;
mod geo;
mod models;

pub use aggregate::{
    country_holidays, leaderboard, month_stats, party_month, upcoming, AggregateOptions,
    Dashboard,
};
pub use client::{AvailableCountry, HolidayApi, NagerClient, DEFAULT_BASE_URL};
pub use codes::{alpha2, alpha3, geometry_name};
pub use countdown::Countdown;
pub use countries::{fallback_countries, static_countries, CountrySource};
pub use error::{HolidayError, Result};
pub use fetcher::{FetchOutcome, FetchProgress, FetchStrategy, HolidayFetcher};
pub use flags::{flag_emoji, flag_or_fallback};
pub use geo::{Atlas, CountryShape, GeoPoint, Orthographic};
pub use models::{
    Country, CountRule, CountryHolidays, MonthStats, RawHoliday, UpcomingHoliday,
    FALLBACK_EMOJI, MONTH_NAMES,
};
