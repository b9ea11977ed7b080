//! # Live API Source Adapter

//! This module maps raw payloads from the live container-tracking API into the
//! canonical container record. The live API wraps its result in a response envelope,
//! sometimes double-encodes the result as a JSON string, and has drifted through a few
//! camelCase field spellings; all of that is absorbed here so downstream components
//! only ever see the canonical shape.

use serde_json::Value;
use crate::adapters::fields::{first_date, first_text};
use crate::models::{CanonicalContainerRecord, ProviderSource};

/// Unwraps the live API's response envelope down to the record object.
///
/// Handles, in order: a `{response: {result, ...}}` wrapper, a result delivered as a
/// JSON-encoded string requiring a second parse, a result delivered as an array (first
/// element wins), and a bare object. Anything else yields `None`.
fn unwrap_envelope(raw: &Value) -> Option<Value> {
    let result = match raw.get("response").and_then(|r| r.get("result")) {
        Some(inner) => inner.clone(),
        None => raw.clone(),
    };

    let result = match result {
        Value::String(encoded) => serde_json::from_str::<Value>(&encoded).ok()?,
        other => other,
    };

    match result {
        Value::Array(items) => items.into_iter().next().filter(Value::is_object),
        obj @ Value::Object(_) => Some(obj),
        _ => None,
    }
}

/// Normalizes a raw live API payload into a canonical container record.
///
/// Pure transform of an already-fetched payload; an unexpected shape produces a record
/// with an empty container number, which the reconciler rejects as invalid.
pub fn normalize(raw: &Value) -> CanonicalContainerRecord {
    let mut record = CanonicalContainerRecord::empty(ProviderSource::LiveApi);

    let body = match unwrap_envelope(raw) {
        Some(body) => body,
        None => return record,
    };

    record.container_number = first_text(&body, &["containerNumber", "containerNo"])
        .unwrap_or_default();
    record.master_bill_number = first_text(&body, &["masterBillNumber", "mblNumber"]);
    record.job_number = first_text(&body, &["jobNumber", "jobNo"]);
    record.stg_reference = first_text(&body, &["stgReference", "stgRef"]);
    record.customer_reference = first_text(&body, &["customerReference", "customerRef"]);

    record.status = first_text(&body, &["status", "shipmentStatus"]);
    record.location = first_text(&body, &["location", "currentLocation"]);
    record.vessel_name = first_text(&body, &["vesselName", "vessel"]);

    record.vessel_eta = first_date(&body, &["vesselETA", "eta"]);
    record.ata = first_date(&body, &["ata", "actualArrival"]);
    record.available_at_pier = first_date(&body, &["availableAtPier", "pierAvailableDate"]);
    record.date_in = first_date(&body, &["dateIn", "cfsDateIn"]);
    record.strip_date = first_date(&body, &["stripDate", "strippedDate"]);
    record.available_at_warehouse = first_date(&body, &["availableAtWarehouse", "whseAvailableDate"]);
    record.appointment_date = first_date(&body, &["appointmentDate", "apptDate"]);
    record.dispatched_date = first_date(&body, &["dispatchedDate", "dispatchDate"]);
    record.outgated_date = first_date(&body, &["outgatedDate", "outgateDate"]);
    record.return_empty_date = first_date(&body, &["returnEmptyDate", "emptyReturnDate"]);
    record.discharge_date = first_date(&body, &["dischargeDate", "dischargedDate"]);

    record.pier_last_free_day = first_date(&body, &["pierLFD", "pierLastFreeDay"]);
    record.warehouse_free_time_expiry =
        first_date(&body, &["warehouseFreeTimeExpiry", "whseFreeTimeExpiry"]);

    record
}
