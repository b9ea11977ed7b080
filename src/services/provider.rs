use async_trait::async_trait;
use serde_json::Value;
use crate::errors::ReconResult;
use crate::models::SearchBy;

/// Defines a generic asynchronous client interface for fetching a raw shipment payload
/// from one upstream provider
///
/// Implementations own all transport mechanics (HTTP, auth headers, per-request
/// timeouts). Retries and backoff, if any, also belong here — the reconciler calls
/// `fetch` at most once per provider per lookup.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Fetches the raw payload for one lookup key
    ///
    /// # Arguments
    ///
    /// * `key`: The container number or house bill number to look up
    /// * `search_by`: Which kind of key was supplied
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Value))`: The provider returned a payload (not yet validated)
    /// * `Ok(None)`: The provider answered but has no record for the key
    /// * `Err(ReconEngineError)`: The transport itself failed; the reconciler treats
    ///   this the same as `Ok(None)` and falls through to the next provider
    async fn fetch(&self, key: &str, search_by: SearchBy) -> ReconResult<Option<Value>>;

    /// A short name for lookup logging.
    fn name(&self) -> &'static str;
}
