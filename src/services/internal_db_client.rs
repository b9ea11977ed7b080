//! # Internal Database Provider Client

//! Thin HTTP client for the internal shipment-record service. Like the live API
//! client, this is transport only: one GET per fetch, bearer-token auth, raw JSON out.

use std::time::Duration;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;
use url::Url;
use crate::config::InternalDbSettings;
use crate::errors::{ReconEngineError, ReconResult};
use crate::models::SearchBy;
use crate::services::provider::ProviderClient;

pub struct InternalDbClient {
    client: reqwest::Client,
    endpoint: Url,
    service_token: Option<String>,
}

impl InternalDbClient {
    /// Creates a client for the internal record service from the configured settings.
    pub fn new(settings: &InternalDbSettings) -> ReconResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()?;

        Ok(InternalDbClient {
            client,
            endpoint: settings.shipments_endpoint()?,
            service_token: settings.service_token_value(),
        })
    }

    /// The internal service keys its lookup parameter by search mode rather than
    /// taking a mode discriminator.
    fn query_param(search_by: SearchBy) -> &'static str {
        match search_by {
            SearchBy::Container => "container_number",
            SearchBy::HouseBill => "house_bill_number",
        }
    }
}

#[async_trait]
impl ProviderClient for InternalDbClient {
    async fn fetch(&self, key: &str, search_by: SearchBy) -> ReconResult<Option<Value>> {
        let mut request = self
            .client
            .get(self.endpoint.clone())
            .query(&[(Self::query_param(search_by), key)]);
        if let Some(ref token) = self.service_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!("Internal DB has no record for key {}", key);
            return Ok(None);
        }
        let response = response.error_for_status()?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| ReconEngineError::ProviderError(format!("internal DB returned non-JSON body: {}", e)))?;

        // An empty result set means "no record", not an empty record.
        match &body {
            Value::Null => Ok(None),
            Value::Array(items) if items.is_empty() => Ok(None),
            _ => Ok(Some(body)),
        }
    }

    fn name(&self) -> &'static str {
        "internalDb"
    }
}
