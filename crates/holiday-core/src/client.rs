use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::error::{HolidayError, Result};
use crate::models::RawHoliday;

pub const DEFAULT_BASE_URL: &str = "https://date.nager.at/api/v3";

/// Entry of the `AvailableCountries` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableCountry {
    pub country_code: String,
    pub name: String,
}

/// Source of holiday data.
#[async_trait]
pub trait HolidayApi: Send + Sync {
    async fn available_countries(&self) -> Result<Vec<AvailableCountry>>;
    async fn public_holidays(&self, year: i32, country_code: &str) -> Result<Vec<RawHoliday>>;
}

/// Client for the Nager.Date public holiday API.
pub struct NagerClient {
    client: Client,
    base_url: String,
}

impl NagerClient {
    /// Build a client. `timeout` of `None` keeps the transport default.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(HolidayError::Status {
                status: response.status().as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        decode_body(&url, &body)
    }
}

#[async_trait]
impl HolidayApi for NagerClient {
    async fn available_countries(&self) -> Result<Vec<AvailableCountry>> {
        self.get("/AvailableCountries").await
    }

    async fn public_holidays(&self, year: i32, country_code: &str) -> Result<Vec<RawHoliday>> {
        self.get(&format!("/PublicHolidays/{}/{}", year, country_code))
            .await
    }
}

/// Decode a JSON body, treating a blank body as its own failure.
fn decode_body<T: DeserializeOwned>(url: &str, body: &str) -> Result<T> {
    if body.trim().is_empty() {
        return Err(HolidayError::EmptyBody(url.to_string()));
    }
    Ok(serde_json::from_str(body)?)
}
