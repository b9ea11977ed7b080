//! # Internal Database Source Adapter

//! This module maps raw records from the internal database service into the canonical
//! container record. The internal schema is snake_case and has accumulated historical
//! aliases for several logical fields (e.g. `stripped_date` vs `strip_date`); the first
//! non-empty alias wins.

use serde_json::Value;
use crate::adapters::fields::{first_date, first_text};
use crate::models::{CanonicalContainerRecord, ProviderSource};

/// Normalizes a raw internal database record into a canonical container record.
///
/// Pure transform of an already-fetched payload; an unexpected shape produces a record
/// with an empty container number, which the reconciler rejects as invalid.
pub fn normalize(raw: &Value) -> CanonicalContainerRecord {
    let mut record = CanonicalContainerRecord::empty(ProviderSource::InternalDb);

    let body = match raw {
        Value::Array(items) => match items.first() {
            Some(first) if first.is_object() => first,
            _ => return record,
        },
        obj @ Value::Object(_) => obj,
        _ => return record,
    };

    record.container_number = first_text(body, &["container_number", "container_no"])
        .unwrap_or_default();
    record.master_bill_number = first_text(body, &["master_bill_number", "mbl_number"]);
    record.job_number = first_text(body, &["job_number", "job_no"]);
    record.stg_reference = first_text(body, &["stg_reference", "stg_ref"]);
    record.customer_reference = first_text(body, &["customer_reference", "cust_ref"]);

    record.status = first_text(body, &["status", "shipment_status"]);
    record.location = first_text(body, &["location", "current_location"]);
    record.vessel_name = first_text(body, &["vessel_name", "vessel"]);

    record.vessel_eta = first_date(body, &["vessel_eta", "eta"]);
    record.ata = first_date(body, &["ata", "actual_arrival"]);
    record.available_at_pier = first_date(body, &["available_at_pier", "pier_available_date"]);
    record.date_in = first_date(body, &["date_in", "cfs_date_in"]);
    record.strip_date = first_date(body, &["stripped_date", "strip_date"]);
    record.available_at_warehouse =
        first_date(body, &["available_at_warehouse", "whse_available_date"]);
    record.appointment_date = first_date(body, &["appointment_date", "appt_date"]);
    record.dispatched_date = first_date(body, &["dispatched_date", "dispatch_date"]);
    record.outgated_date = first_date(body, &["outgated_date", "outgate_date"]);
    record.return_empty_date = first_date(body, &["return_empty_date", "empty_return_date"]);
    record.discharge_date = first_date(body, &["discharge_date", "discharged_date"]);

    record.pier_last_free_day =
        first_date(body, &["pier_last_free_day", "pier_lfd", "last_free_day"]);
    record.warehouse_free_time_expiry =
        first_date(body, &["warehouse_free_time_expiry", "whse_free_time_expiry"]);

    record
}
