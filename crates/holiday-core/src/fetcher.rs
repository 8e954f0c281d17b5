//! Fan-out of per-country holiday requests.
//!
//! Every country yields exactly one [`FetchOutcome`]. A failing country is
//! recorded as [`FetchOutcome::Missing`] and never stops the others.

use futures::future::join_all;
use std::time::Duration;
use tracing::{debug, warn};

use crate::client::HolidayApi;
use crate::error::HolidayError;
use crate::models::{Country, RawHoliday};

/// How requests are spread over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStrategy {
    /// Every request in flight at once.
    Parallel,
    /// Groups of `size` concurrent requests, one group after another,
    /// sleeping `pause` between groups.
    Batched { size: usize, pause: Duration },
}

impl Default for FetchStrategy {
    fn default() -> Self {
        Self::Batched {
            size: 5,
            pause: Duration::from_millis(50),
        }
    }
}

/// Progress report emitted as batches start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchProgress {
    pub completed: usize,
    pub total: usize,
    pub label: String,
}

impl FetchProgress {
    pub fn new(completed: usize, total: usize, label: impl Into<String>) -> Self {
        Self {
            completed,
            total,
            label: label.into(),
        }
    }

    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        let ratio = self.completed.min(self.total) as f64 / self.total as f64;
        (ratio * 100.0).round() as u8
    }

    pub fn is_done(&self) -> bool {
        self.completed >= self.total
    }
}

/// Result of one country's request.
#[derive(Debug)]
pub enum FetchOutcome {
    Fetched {
        country: Country,
        holidays: Vec<RawHoliday>,
    },
    Missing {
        country: Country,
        reason: HolidayError,
    },
}

impl FetchOutcome {
    pub fn country(&self) -> &Country {
        match self {
            FetchOutcome::Fetched { country, .. } | FetchOutcome::Missing { country, .. } => {
                country
            }
        }
    }

    pub fn is_fetched(&self) -> bool {
        matches!(self, FetchOutcome::Fetched { .. })
    }

    pub fn into_fetched(self) -> Option<(Country, Vec<RawHoliday>)> {
        match self {
            FetchOutcome::Fetched { country, holidays } => Some((country, holidays)),
            FetchOutcome::Missing { .. } => None,
        }
    }
}

pub struct HolidayFetcher<'a> {
    api: &'a dyn HolidayApi,
    year: i32,
    strategy: FetchStrategy,
}

impl<'a> HolidayFetcher<'a> {
    pub fn new(api: &'a dyn HolidayApi, year: i32, strategy: FetchStrategy) -> Self {
        Self {
            api,
            year,
            strategy,
        }
    }

    /// Fetch holidays for every country, in input order.
    ///
    /// `on_progress` is called before each batch and once more when all
    /// requests have settled.
    pub async fn fetch_all<F>(&self, countries: &[Country], mut on_progress: F) -> Vec<FetchOutcome>
    where
        F: FnMut(FetchProgress),
    {
        let total = countries.len();
        let mut outcomes = Vec::with_capacity(total);

        match self.strategy {
            FetchStrategy::Parallel => {
                if let Some(first) = countries.first() {
                    on_progress(FetchProgress::new(0, total, scanning(first)));
                }
                outcomes.extend(join_all(countries.iter().map(|c| self.fetch_one(c))).await);
            }
            FetchStrategy::Batched { size, pause } => {
                let size = size.max(1);
                let batches = total.div_ceil(size);

                for (idx, batch) in countries.chunks(size).enumerate() {
                    on_progress(FetchProgress::new(idx * size, total, scanning(&batch[0])));
                    outcomes.extend(join_all(batch.iter().map(|c| self.fetch_one(c))).await);

                    if idx + 1 < batches && !pause.is_zero() {
                        tokio::time::sleep(pause).await;
                    }
                }
            }
        }

        on_progress(FetchProgress::new(total, total, "Crunching numbers..."));
        outcomes
    }

    async fn fetch_one(&self, country: &Country) -> FetchOutcome {
        match self.api.public_holidays(self.year, &country.code).await {
            Ok(holidays) => {
                debug!(country = %country.code, count = holidays.len(), "fetched holidays");
                FetchOutcome::Fetched {
                    country: country.clone(),
                    holidays,
                }
            }
            Err(reason) => {
                warn!(country = %country.code, error = %reason, "dropping country from hunt");
                FetchOutcome::Missing {
                    country: country.clone(),
                    reason,
                }
            }
        }
    }
}

fn scanning(country: &Country) -> String {
    format!("Scanning {}...", country.name)
}
