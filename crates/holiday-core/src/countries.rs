use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::client::HolidayApi;
use crate::models::Country;

const STATIC_COUNTRIES: [(&str, &str, &str); 15] = [
    ("US", "United States", "🇺🇸"),
    ("GB", "United Kingdom", "🇬🇧"),
    ("DE", "Germany", "🇩🇪"),
    ("FR", "France", "🇫🇷"),
    ("JP", "Japan", "🇯🇵"),
    ("CA", "Canada", "🇨🇦"),
    ("AU", "Australia", "🇦🇺"),
    ("BR", "Brazil", "🇧🇷"),
    ("IN", "India", "🇮🇳"),
    ("MX", "Mexico", "🇲🇽"),
    ("IT", "Italy", "🇮🇹"),
    ("ES", "Spain", "🇪🇸"),
    ("NL", "Netherlands", "🇳🇱"),
    ("PL", "Poland", "🇵🇱"),
    ("SE", "Sweden", "🇸🇪"),
];

/// The hardcoded set of countries.
pub fn static_countries() -> Vec<Country> {
    STATIC_COUNTRIES
        .iter()
        .map(|(code, name, emoji)| Country::new(code, name, emoji))
        .collect()
}

/// Used when the remote country lookup fails.
pub fn fallback_countries() -> Vec<Country> {
    static_countries().into_iter().take(2).collect()
}

/// Where the list of countries to query comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CountrySource {
    Static,
    #[default]
    Remote,
}

impl CountrySource {
    /// Resolve the country list. Never fails: a broken or empty remote
    /// lookup degrades to [`fallback_countries`].
    pub async fn load(&self, api: &dyn HolidayApi) -> Vec<Country> {
        match self {
            CountrySource::Static => static_countries(),
            CountrySource::Remote => match api.available_countries().await {
                Ok(available) if !available.is_empty() => {
                    info!(count = available.len(), "discovered countries");
                    available
                        .into_iter()
                        .map(|c| Country::from_code(&c.country_code, &c.name))
                        .collect()
                }
                Ok(_) => {
                    warn!("country lookup returned no countries, using fallback list");
                    fallback_countries()
                }
                Err(e) => {
                    warn!(error = %e, "country lookup failed, using fallback list");
                    fallback_countries()
                }
            },
        }
    }
}
