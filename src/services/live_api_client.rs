//! # Live API Provider Client

//! Thin HTTP client for the live container-tracking API. This is purely transport: it
//! issues one GET per fetch, attaches the configured API key, and hands the raw JSON
//! payload back without interpreting it. Envelope unwrapping and field mapping belong
//! to the live API adapter.

use std::time::Duration;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;
use url::Url;
use crate::config::LiveApiSettings;
use crate::errors::{ReconEngineError, ReconResult};
use crate::models::SearchBy;
use crate::services::provider::ProviderClient;

pub struct LiveApiClient {
    client: reqwest::Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl LiveApiClient {
    /// Creates a client for the live tracking API from the configured settings.
    ///
    /// # Returns
    ///
    /// * `Ok(LiveApiClient)` if the endpoint URL parses and the HTTP client builds
    /// * `Err(ReconEngineError)` on invalid endpoint configuration
    pub fn new(settings: &LiveApiSettings) -> ReconResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()?;

        Ok(LiveApiClient {
            client,
            endpoint: settings.tracking_endpoint()?,
            api_key: settings.api_key_value(),
        })
    }
}

#[async_trait]
impl ProviderClient for LiveApiClient {
    async fn fetch(&self, key: &str, search_by: SearchBy) -> ReconResult<Option<Value>> {
        let mut request = self
            .client
            .get(self.endpoint.clone())
            .query(&[("searchBy", search_by.to_string()), ("key", key.to_string())]);
        if let Some(ref api_key) = self.api_key {
            request = request.header("X-Api-Key", api_key);
        }

        let response = request.send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!("Live API has no record for key {}", key);
            return Ok(None);
        }
        let response = response.error_for_status()?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| ReconEngineError::ProviderError(format!("live API returned non-JSON body: {}", e)))?;
        if body.is_null() {
            return Ok(None);
        }
        Ok(Some(body))
    }

    fn name(&self) -> &'static str {
        "liveApi"
    }
}
