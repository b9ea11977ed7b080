use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{json, Value};

use lfd_recon::analysis::{risk, stage, timeline};
use lfd_recon::adapters::{internal_db, live_api};
use lfd_recon::errors::{ReconEngineError, ReconResult};
use lfd_recon::models::{
    CanonicalContainerRecord, ProviderSource, SearchBy, Severity, LIFECYCLE_STAGES,
};
use lfd_recon::reconcile::{ContainerLifecycleEngine, Reconciler};
use lfd_recon::services::ProviderClient;

/// A scripted provider: returns a canned payload, an error, or nothing, optionally
/// after a delay, and counts how often it was called.
struct MockProvider {
    provider_name: &'static str,
    payload: Option<Value>,
    fail: bool,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl MockProvider {
    fn with_payload(provider_name: &'static str, payload: Value) -> Arc<Self> {
        Arc::new(MockProvider {
            provider_name,
            payload: Some(payload),
            fail: false,
            delay: None,
            calls: AtomicUsize::new(0),
        })
    }

    fn empty(provider_name: &'static str) -> Arc<Self> {
        Arc::new(MockProvider {
            provider_name,
            payload: None,
            fail: false,
            delay: None,
            calls: AtomicUsize::new(0),
        })
    }

    fn failing(provider_name: &'static str) -> Arc<Self> {
        Arc::new(MockProvider {
            provider_name,
            payload: None,
            fail: true,
            delay: None,
            calls: AtomicUsize::new(0),
        })
    }

    fn slow(provider_name: &'static str, payload: Value, delay: Duration) -> Arc<Self> {
        Arc::new(MockProvider {
            provider_name,
            payload: Some(payload),
            fail: false,
            delay: Some(delay),
            calls: AtomicUsize::new(0),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProviderClient for MockProvider {
    async fn fetch(&self, _key: &str, _search_by: SearchBy) -> ReconResult<Option<Value>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(ReconEngineError::ProviderError("connection refused".to_string()));
        }
        Ok(self.payload.clone())
    }

    fn name(&self) -> &'static str {
        self.provider_name
    }
}

fn dt(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap()
}

fn live_api_payload() -> Value {
    json!({
        "response": {
            "status": 200,
            "result": {
                "containerNumber": "MSCU1234567",
                "masterBillNumber": "MBL-998",
                "status": "Discharged",
                "vesselName": "EVER GIVEN",
                "vesselETA": "3/5/24",
                "ata": "3/6/24",
                "pierLFD": "3/12/24"
            }
        }
    })
}

fn internal_db_payload() -> Value {
    json!({
        "container_number": "MSCU1234567",
        "job_number": 88421,
        "shipment_status": "In CFS",
        "stripped_date": "2024-03-10",
        "date_in": "2024-03-08 09:15:00",
        "whse_free_time_expiry": "3/20/24"
    })
}

// ---------------------------------------------------------------------------
// Adapters
// ---------------------------------------------------------------------------

#[test]
fn test_live_api_adapter_unwraps_envelope() {
    let record = live_api::normalize(&live_api_payload());
    assert_eq!(record.container_number, "MSCU1234567");
    assert_eq!(record.source, ProviderSource::LiveApi);
    assert_eq!(record.vessel_eta, Some(dt(2024, 3, 5)));
    assert_eq!(record.pier_last_free_day, Some(dt(2024, 3, 12)));
    assert_eq!(record.strip_date, None, "Absent fields must stay absent");
}

#[test]
fn test_live_api_adapter_handles_string_encoded_result() {
    let inner = r#"{"containerNumber": "TGHU7777777", "vesselETA": "2024-04-01"}"#;
    let payload = json!({"response": {"status": 200, "result": inner}});
    let record = live_api::normalize(&payload);
    assert_eq!(record.container_number, "TGHU7777777");
    assert_eq!(record.vessel_eta, Some(dt(2024, 4, 1)));
}

#[test]
fn test_live_api_adapter_takes_first_array_element() {
    let payload = json!({
        "response": {
            "status": 200,
            "result": [
                {"containerNumber": "FIRST11111"},
                {"containerNumber": "SECOND2222"}
            ]
        }
    });
    let record = live_api::normalize(&payload);
    assert_eq!(record.container_number, "FIRST11111");
}

#[test]
fn test_live_api_adapter_rejects_unexpected_shapes() {
    for payload in [json!(42), json!("just a string"), json!({"response": {"result": 17}})] {
        let record = live_api::normalize(&payload);
        assert!(
            !record.is_structurally_valid(),
            "Unexpected payload shape must produce an invalid record, got {:?}",
            record.container_number
        );
    }
}

#[test]
fn test_internal_db_adapter_resolves_aliases() {
    let record = internal_db::normalize(&internal_db_payload());
    assert_eq!(record.container_number, "MSCU1234567");
    assert_eq!(record.source, ProviderSource::InternalDb);
    assert_eq!(record.job_number.as_deref(), Some("88421"), "Numeric references are stringified");
    assert_eq!(record.status.as_deref(), Some("In CFS"));
    assert_eq!(record.strip_date, Some(dt(2024, 3, 10)));
    assert_eq!(record.warehouse_free_time_expiry, Some(dt(2024, 3, 20)));
    assert_eq!(
        record.date_in,
        NaiveDate::from_ymd_opt(2024, 3, 8).unwrap().and_hms_opt(9, 15, 0)
    );
}

#[test]
fn test_internal_db_adapter_tolerates_malformed_dates() {
    let payload = json!({
        "container_number": "MSCU1234567",
        "stripped_date": "pending",
        "vessel_eta": ""
    });
    let record = internal_db::normalize(&payload);
    assert!(record.is_structurally_valid());
    assert_eq!(record.strip_date, None, "Malformed date must degrade to absent");
    assert_eq!(record.vessel_eta, None, "Empty date must degrade to absent");
}

// ---------------------------------------------------------------------------
// Reconciler
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_preference_order_live_api_wins() {
    let live = MockProvider::with_payload("liveApi", live_api_payload());
    let internal = MockProvider::with_payload("internalDb", internal_db_payload());
    let reconciler = Reconciler::new(live.clone(), internal.clone());

    let record = reconciler
        .resolve("MSCU1234567", SearchBy::Container)
        .await
        .expect("Key resolvable by both providers must resolve");

    assert_eq!(record.source, ProviderSource::LiveApi);
    assert_eq!(internal.call_count(), 0, "Fallback provider must not be queried when the live API satisfies the key");
}

#[tokio::test]
async fn test_fallback_to_internal_db() {
    let live = MockProvider::empty("liveApi");
    let internal = MockProvider::with_payload("internalDb", internal_db_payload());
    let reconciler = Reconciler::new(live.clone(), internal.clone());

    let record = reconciler
        .resolve("MSCU1234567", SearchBy::Container)
        .await
        .expect("Key resolvable by the internal DB must resolve");

    assert_eq!(record.source, ProviderSource::InternalDb);
    assert_eq!(live.call_count(), 1);
    assert_eq!(internal.call_count(), 1);
}

#[tokio::test]
async fn test_not_found_when_neither_provider_resolves() {
    let reconciler = Reconciler::new(MockProvider::empty("liveApi"), MockProvider::empty("internalDb"));
    let resolved = reconciler.resolve("NOSUCH0000", SearchBy::HouseBill).await;
    assert!(resolved.is_none(), "Unknown key must yield NotFound, not an error");
}

#[tokio::test]
async fn test_transport_failure_falls_through_to_next_provider() {
    let live = MockProvider::failing("liveApi");
    let internal = MockProvider::with_payload("internalDb", internal_db_payload());
    let reconciler = Reconciler::new(live, internal);

    let record = reconciler
        .resolve("MSCU1234567", SearchBy::Container)
        .await
        .expect("A transport failure must be treated as no result, not propagated");
    assert_eq!(record.source, ProviderSource::InternalDb);
}

#[tokio::test]
async fn test_structurally_invalid_payload_falls_through() {
    // Live API answers, but with no container number after normalization.
    let live = MockProvider::with_payload(
        "liveApi",
        json!({"response": {"status": 200, "result": {"vesselName": "EVER GIVEN"}}}),
    );
    let internal = MockProvider::with_payload("internalDb", internal_db_payload());
    let reconciler = Reconciler::new(live, internal);

    let record = reconciler
        .resolve("MSCU1234567", SearchBy::Container)
        .await
        .expect("Invalid payload from the preferred provider must fall through");
    assert_eq!(record.source, ProviderSource::InternalDb);
}

#[tokio::test(start_paused = true)]
async fn test_deadline_budget_short_circuits_fallback() {
    let live = MockProvider::slow("liveApi", json!(null), Duration::from_secs(5));
    let internal = MockProvider::with_payload("internalDb", internal_db_payload());
    let reconciler = Reconciler::new(live, internal.clone());

    let resolved = reconciler
        .resolve_with_deadline("MSCU1234567", SearchBy::Container, Duration::from_secs(1))
        .await;

    assert!(resolved.is_none(), "An exhausted budget must degrade to NotFound");
    assert_eq!(internal.call_count(), 0, "The fallback provider must not be called after the budget is spent");
}

// ---------------------------------------------------------------------------
// Stage derivation
// ---------------------------------------------------------------------------

#[test]
fn test_stage_is_none_with_no_dates() {
    let record = CanonicalContainerRecord::empty(ProviderSource::LiveApi);
    assert_eq!(
        stage::current_stage(&record),
        None,
        "No stage date at all must read as no progress, never as the first stage"
    );
}

#[test]
fn test_stage_monotonic_as_dates_accrue() {
    let mut record = CanonicalContainerRecord::empty(ProviderSource::LiveApi);
    record.container_number = "MSCU1234567".to_string();

    let mut previous = -1_i64;
    let setters: [fn(&mut CanonicalContainerRecord, NaiveDateTime); 7] = [
        |r, d| r.vessel_eta = Some(d),
        |r, d| r.ata = Some(d),
        |r, d| r.date_in = Some(d),
        |r, d| r.strip_date = Some(d),
        |r, d| r.available_at_warehouse = Some(d),
        |r, d| r.dispatched_date = Some(d),
        |r, d| r.outgated_date = Some(d),
    ];
    for (day, setter) in setters.iter().enumerate() {
        setter(&mut record, dt(2024, 3, day as u32 + 1));
        let current = stage::current_stage(&record).expect("A stage date is present") as i64;
        assert!(
            current >= previous,
            "Adding a later-stage date must never decrease the stage ({} -> {})",
            previous,
            current
        );
        previous = current;
    }
    assert_eq!(previous, LIFECYCLE_STAGES.len() as i64 - 1);
}

#[test]
fn test_stage_gap_is_overridden_by_later_date() {
    let mut record = CanonicalContainerRecord::empty(ProviderSource::InternalDb);
    record.container_number = "MSCU1234567".to_string();
    record.ata = Some(dt(2024, 3, 6));
    // No strip_date recorded, but the freight is already at the warehouse.
    record.available_at_warehouse = Some(dt(2024, 3, 11));

    let index = stage::current_stage(&record).expect("Stage dates are present");
    assert_eq!(stage::stage_label(index), Some("Available"));
}

// ---------------------------------------------------------------------------
// Deadline risk
// ---------------------------------------------------------------------------

#[test]
fn test_dual_deadline_selects_more_urgent() {
    let now = dt(2024, 3, 10);
    let mut record = CanonicalContainerRecord::empty(ProviderSource::LiveApi);
    record.pier_last_free_day = Some(dt(2024, 3, 15));
    record.warehouse_free_time_expiry = Some(dt(2024, 3, 12));

    let chosen = risk::evaluate(&record, now).expect("Both candidates are present");
    assert_eq!(chosen.label, "Warehouse Free Time Expiry");
    assert_eq!(chosen.days_remaining, 2);
    assert_eq!(chosen.severity, Severity::Critical);
}

#[test]
fn test_single_deadline_used_as_is() {
    let now = dt(2024, 3, 10);
    let mut record = CanonicalContainerRecord::empty(ProviderSource::LiveApi);
    record.pier_last_free_day = Some(dt(2024, 3, 16));

    let chosen = risk::evaluate(&record, now).expect("One candidate is present");
    assert_eq!(chosen.label, "Pier Last Free Day");
    assert_eq!(chosen.days_remaining, 6);
    assert_eq!(chosen.severity, Severity::Warning);
}

#[test]
fn test_no_deadlines_yields_none() {
    let record = CanonicalContainerRecord::empty(ProviderSource::LiveApi);
    assert_eq!(risk::evaluate(&record, dt(2024, 3, 10)), None);
}

#[test]
fn test_evaluate_all_surfaces_second_breach() {
    let now = dt(2024, 3, 10);
    let mut record = CanonicalContainerRecord::empty(ProviderSource::InternalDb);
    record.pier_last_free_day = Some(dt(2024, 3, 8));
    record.warehouse_free_time_expiry = Some(dt(2024, 3, 5));

    let risks = risk::evaluate_all(&record, now);
    assert_eq!(risks.len(), 2);
    assert_eq!(risks[0].label, "Warehouse Free Time Expiry");
    assert!(
        risks.iter().all(|r| r.severity == Severity::Overdue),
        "Both breached deadlines must be visible, not just the most urgent"
    );
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

#[test]
fn test_timeline_orders_by_instant_not_declaration() {
    let now = dt(2024, 1, 8);
    let mut record = CanonicalContainerRecord::empty(ProviderSource::InternalDb);
    record.date_in = Some(dt(2024, 1, 10));
    record.strip_date = Some(dt(2024, 1, 5));

    let events = timeline::build(&record, now);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].label, "Stripped");
    assert_eq!(events[1].label, "In at CFS");
    assert!(events[0].is_past, "An event at or before now is past");
    assert!(!events[1].is_past, "An event after now is upcoming");
}

#[test]
fn test_timeline_omits_absent_fields() {
    let record = CanonicalContainerRecord::empty(ProviderSource::LiveApi);
    assert!(
        timeline::build(&record, dt(2024, 1, 1)).is_empty(),
        "Absent dates must be omitted, never emitted as placeholders"
    );
}

#[test]
fn test_timeline_same_day_keeps_enumeration_order() {
    let day = dt(2024, 3, 6);
    let mut record = CanonicalContainerRecord::empty(ProviderSource::LiveApi);
    record.ata = Some(day);
    record.discharge_date = Some(day);
    record.available_at_pier = Some(day);

    let labels: Vec<&str> = timeline::build(&record, day).iter().map(|e| e.label).collect();
    assert_eq!(labels, vec!["Actual Arrival", "Discharged", "Available at Pier"]);
}

// ---------------------------------------------------------------------------
// Engine facade
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_engine_lookup_combines_all_views() {
    let live = MockProvider::with_payload("liveApi", live_api_payload());
    let internal = MockProvider::empty("internalDb");
    let engine = ContainerLifecycleEngine::with_clients(live, internal);

    let view = engine
        .lookup("MSCU1234567", SearchBy::Container)
        .await
        .expect("Key resolvable by the live API must produce a view");

    assert_eq!(view.record.container_number, "MSCU1234567");
    assert_eq!(view.record.source, ProviderSource::LiveApi);
    let index = view.current_stage.expect("ETA and ATA are present");
    assert_eq!(stage::stage_label(index), Some("At Pier"));
    let deadline = view.deadline_risk.expect("The pier LFD is present");
    assert_eq!(deadline.label, "Pier Last Free Day");
    assert!(
        view.timeline.windows(2).all(|w| w[0].instant <= w[1].instant),
        "Timeline must be sorted ascending"
    );
}

#[tokio::test]
async fn test_engine_lookup_not_found() {
    let engine = ContainerLifecycleEngine::with_clients(
        MockProvider::empty("liveApi"),
        MockProvider::empty("internalDb"),
    );
    let view = engine.lookup("NOSUCH0000", SearchBy::Container).await;
    assert!(view.is_none());
}
