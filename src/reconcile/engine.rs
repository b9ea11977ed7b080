//! # Container Lifecycle Engine

//! This module assembles the full per-query pipeline: resolve the key through the
//! reconciler, then run the stage deriver, deadline risk evaluator, and timeline
//! builder independently over the same canonical record. The combined view is what the
//! UI/API layer consumes; all presentation and alert dispatch happen there.

use std::sync::Arc;
use std::time::Duration;
use crate::analysis::{risk, stage, timeline};
use crate::config::Settings;
use crate::errors::ReconResult;
use crate::models::{local_now, CanonicalContainerRecord, ContainerView, SearchBy};
use crate::reconcile::Reconciler;
use crate::services::{InternalDbClient, LiveApiClient, ProviderClient};

pub struct ContainerLifecycleEngine {
    reconciler: Reconciler,
}

impl ContainerLifecycleEngine {
    /// Creates an engine with both provider clients built from settings.
    pub fn new(settings: &Settings) -> ReconResult<Self> {
        let live_api: Arc<dyn ProviderClient> = Arc::new(LiveApiClient::new(&settings.live_api)?);
        let internal_db: Arc<dyn ProviderClient> =
            Arc::new(InternalDbClient::new(&settings.internal_db)?);
        Ok(Self::with_clients(live_api, internal_db))
    }

    /// Creates an engine over caller-supplied provider clients.
    pub fn with_clients(
        live_api: Arc<dyn ProviderClient>,
        internal_db: Arc<dyn ProviderClient>,
    ) -> Self {
        ContainerLifecycleEngine {
            reconciler: Reconciler::new(live_api, internal_db),
        }
    }

    /// Looks up one container and derives its combined view.
    ///
    /// # Returns
    ///
    /// * `Some(ContainerView)` when a provider resolved the key
    /// * `None` when neither provider has a record — a normal outcome the caller
    ///   renders as "not found", distinct from a search failure
    pub async fn lookup(&self, key: &str, search_by: SearchBy) -> Option<ContainerView> {
        let record = self.reconciler.resolve(key, search_by).await?;
        Some(Self::derive(record))
    }

    /// Like `lookup`, but the whole provider chain runs under one time budget and
    /// degrades to "not found" when the budget is exhausted.
    pub async fn lookup_with_deadline(
        &self,
        key: &str,
        search_by: SearchBy,
        budget: Duration,
    ) -> Option<ContainerView> {
        let record = self
            .reconciler
            .resolve_with_deadline(key, search_by, budget)
            .await?;
        Some(Self::derive(record))
    }

    /// Derives every view from an already-resolved record. Pure; the record is not
    /// mutated and nothing is cached between calls.
    pub fn derive(record: CanonicalContainerRecord) -> ContainerView {
        let now = local_now();
        ContainerView {
            current_stage: stage::current_stage(&record),
            deadline_risk: risk::evaluate(&record, now),
            timeline: timeline::build(&record, now),
            record,
        }
    }
}
