use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const API_BASE: &str = "https://api.yelp.com/v3";

/// The upstream caps search pages at 50; we never need more than one page.
const DEFAULT_LIMIT: u32 = 20;

#[derive(Error, Debug)]
pub enum BizApiError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Business not found: {0}")]
    NotFound(String),

    #[error("Authentication failed - check the API key")]
    AuthFailed,

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Malformed response payload: {0}")]
    ParseError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BizApiError>;

/// Client for the business-data API.
///
/// Deliberately dumb: no retries, no backoff, no response caching. A failed
/// lookup surfaces upward unchanged and the caller decides what to render.
pub struct BizApiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl BizApiClient {
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_base_url(api_key, API_BASE.to_string())
    }

    /// For tests and API-compatible mirrors
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("BizScout/0.1.0"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(BizApiError::NetworkError)?;

        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    /// Search businesses by term and location
    pub async fn search_businesses(
        &self,
        term: &str,
        location: &str,
        limit: Option<u32>,
    ) -> Result<Vec<BizBusiness>> {
        let url = format!("{}/businesses/search", self.base_url);
        let limit = limit.unwrap_or(DEFAULT_LIMIT);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .query(&[
                ("term", term),
                ("location", location),
                ("limit", &limit.to_string()),
            ])
            .send()
            .await?;

        let body = self.check_status(response, term).await?;

        // Parse through serde_json::from_str instead of response.json() so a
        // shape mismatch is a ParseError, distinguishable from transport
        // failures.
        let parsed: SearchResponse = serde_json::from_str(&body)?;
        Ok(parsed.businesses)
    }

    /// Fetch a single business by its API identifier
    pub async fn get_business(&self, id: &str) -> Result<BizBusiness> {
        let url = format!("{}/businesses/{}", self.base_url, id);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let body = self.check_status(response, id).await?;

        let business: BizBusiness = serde_json::from_str(&body)?;
        Ok(business)
    }

    async fn check_status(&self, response: reqwest::Response, subject: &str) -> Result<String> {
        if response.status() == 404 {
            return Err(BizApiError::NotFound(subject.to_string()));
        }

        if response.status() == 401 {
            return Err(BizApiError::AuthFailed);
        }

        if response.status() == 429 {
            return Err(BizApiError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(BizApiError::RequestFailed(format!(
                "Status {}: {}",
                status, body
            )));
        }

        Ok(response.text().await?)
    }
}

/// A business record as the API returns it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BizBusiness {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub location: BizLocation,
    #[serde(default)]
    pub categories: Vec<BizCategory>,
    #[serde(default)]
    pub deals: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BizLocation {
    #[serde(default)]
    pub display_address: Vec<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BizCategory {
    pub title: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    businesses: Vec<BizBusiness>,
}
