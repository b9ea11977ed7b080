//! # Provider Reconciliation

//! This module resolves a lookup key against the two upstream providers in fixed
//! preference order and returns the first structurally valid canonical record, tagged
//! with the provider that satisfied it. "Not found" is a first-class outcome here, not
//! an error, and a provider's transport failure is treated the same as that provider
//! returning nothing.

use std::sync::Arc;
use std::time::Duration;
use serde_json::Value;
use tokio::time::{timeout, Instant};
use tracing::{debug, info, warn};
use crate::adapters::{internal_db, live_api};
use crate::models::{CanonicalContainerRecord, SearchBy};
use crate::services::ProviderClient;

/// One provider in the preference chain: its transport client paired with the adapter
/// that normalizes its payloads.
struct ProviderBinding {
    client: Arc<dyn ProviderClient>,
    normalize: fn(&Value) -> CanonicalContainerRecord,
}

/// Resolves lookup keys against the live API first, then the internal database.
///
/// Stateless across invocations: each `resolve` owns its record end to end, so
/// concurrent lookups for different containers need no coordination.
pub struct Reconciler {
    providers: Vec<ProviderBinding>,
}

impl Reconciler {
    /// Creates a reconciler over the two provider clients, in preference order:
    /// live API first, internal database as fallback.
    pub fn new(live_api: Arc<dyn ProviderClient>, internal_db: Arc<dyn ProviderClient>) -> Self {
        Reconciler {
            providers: vec![
                ProviderBinding { client: live_api, normalize: live_api::normalize },
                ProviderBinding { client: internal_db, normalize: internal_db::normalize },
            ],
        }
    }

    /// Resolves a key to a canonical record, or `None` when no provider has one.
    ///
    /// Each provider is called at most once, sequentially; the second is only attempted
    /// when the first yields nothing valid. A transport failure from a provider is
    /// logged and treated as "provider returned nothing" rather than surfaced as an
    /// engine error.
    pub async fn resolve(&self, key: &str, search_by: SearchBy) -> Option<CanonicalContainerRecord> {
        for provider in &self.providers {
            let payload = match provider.client.fetch(key, search_by).await {
                Ok(payload) => payload,
                Err(e) => {
                    warn!(
                        "Provider {} failed for key {} ({}); treating as no result",
                        provider.client.name(), key, e
                    );
                    None
                }
            };

            if let Some(record) = Self::validate(provider, payload, key) {
                return Some(record);
            }
        }

        info!("No provider resolved key {} (searched by {})", key, search_by);
        None
    }

    /// Resolves a key under a total time budget.
    ///
    /// Each provider call is capped at the remaining budget; when the budget runs out
    /// the chain short-circuits to "not found" instead of issuing further calls, so an
    /// abandoned request never hangs on the fallback provider.
    pub async fn resolve_with_deadline(
        &self,
        key: &str,
        search_by: SearchBy,
        budget: Duration,
    ) -> Option<CanonicalContainerRecord> {
        let deadline = Instant::now() + budget;

        for provider in &self.providers {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                warn!("Lookup budget exhausted before querying {} for key {}", provider.client.name(), key);
                return None;
            }

            let payload = match timeout(remaining, provider.client.fetch(key, search_by)).await {
                Ok(Ok(payload)) => payload,
                Ok(Err(e)) => {
                    warn!(
                        "Provider {} failed for key {} ({}); treating as no result",
                        provider.client.name(), key, e
                    );
                    None
                }
                Err(_) => {
                    warn!("Provider {} timed out for key {}", provider.client.name(), key);
                    None
                }
            };

            if let Some(record) = Self::validate(provider, payload, key) {
                return Some(record);
            }
        }

        info!("No provider resolved key {} (searched by {})", key, search_by);
        None
    }

    /// Runs the provider's adapter over its payload and keeps the record only when it
    /// passes the structural validity check.
    fn validate(
        provider: &ProviderBinding,
        payload: Option<Value>,
        key: &str,
    ) -> Option<CanonicalContainerRecord> {
        let payload = payload?;
        let record = (provider.normalize)(&payload);
        if record.is_structurally_valid() {
            info!(
                "Key {} resolved by provider {} as container {}",
                key, provider.client.name(), record.container_number
            );
            Some(record)
        } else {
            debug!(
                "Provider {} payload for key {} failed structural validation; falling through",
                provider.client.name(), key
            );
            None
        }
    }
}
