//! # Canonical Container Record

//! This module defines the `CanonicalContainerRecord`, the single normalized shape all
//! downstream logic operates on regardless of which upstream provider supplied the data,
//! along with the `ProviderSource` provenance tag and the `SearchBy` lookup mode.

use chrono::{Local, NaiveDateTime};
use derive_more::{Display, FromStr};
use serde::{Deserialize, Serialize};

/// Identifies which upstream provider satisfied a given query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, FromStr)]
pub enum ProviderSource {
    /// The record came from the live container-tracking API.
    #[display("liveApi")]
    LiveApi,
    /// The record came from the internal database service.
    #[display("internalDb")]
    InternalDb,
}

/// The lookup mode a caller used to identify a shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, FromStr)]
pub enum SearchBy {
    /// Look up by container number.
    #[display("container")]
    Container,
    /// Look up by house bill number.
    #[display("houseBill")]
    HouseBill,
}

/// The unified view of one container/shipment, produced by either source adapter.
///
/// Every date field is `Option<NaiveDateTime>`: `None` means "not yet occurred", never
/// an error. No raw unparsed date string is allowed to reach a field of this struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalContainerRecord {
    /// The container number, the reconciliation key. Empty means the record is invalid.
    pub container_number: String,
    /// The master bill of lading number, if known.
    pub master_bill_number: Option<String>,
    /// The internal job number, if known.
    pub job_number: Option<String>,
    /// The STG reference number, if known.
    pub stg_reference: Option<String>,
    /// The customer's own reference, if known.
    pub customer_reference: Option<String>,

    /// The provider's free-text status label.
    pub status: Option<String>,
    /// The container's last known location, free text.
    pub location: Option<String>,
    /// The name of the vessel carrying the container.
    pub vessel_name: Option<String>,

    /// Estimated time of vessel arrival.
    pub vessel_eta: Option<NaiveDateTime>,
    /// Actual time of vessel arrival.
    pub ata: Option<NaiveDateTime>,
    /// When the container became available at the pier.
    pub available_at_pier: Option<NaiveDateTime>,
    /// Arrival at the CFS/warehouse.
    pub date_in: Option<NaiveDateTime>,
    /// When the container was stripped (devanned).
    pub strip_date: Option<NaiveDateTime>,
    /// When the freight became available at the warehouse.
    pub available_at_warehouse: Option<NaiveDateTime>,
    /// The scheduled delivery appointment.
    pub appointment_date: Option<NaiveDateTime>,
    /// When the freight was dispatched for delivery.
    pub dispatched_date: Option<NaiveDateTime>,
    /// When the container was out-gated from the facility.
    pub outgated_date: Option<NaiveDateTime>,
    /// When the empty container was returned.
    pub return_empty_date: Option<NaiveDateTime>,
    /// When the container was discharged from the vessel.
    pub discharge_date: Option<NaiveDateTime>,

    /// The last free day at the pier before demurrage accrues.
    pub pier_last_free_day: Option<NaiveDateTime>,
    /// When warehouse free time expires and storage charges accrue.
    pub warehouse_free_time_expiry: Option<NaiveDateTime>,

    /// Which adapter produced this record.
    pub source: ProviderSource,
}

impl CanonicalContainerRecord {
    /// Creates an empty record attributed to the given provider.
    ///
    /// Adapters start from this and fill in whatever the raw payload carries; a record
    /// left with an empty container number fails `is_structurally_valid` and is
    /// rejected by the reconciler.
    pub fn empty(source: ProviderSource) -> Self {
        CanonicalContainerRecord {
            container_number: String::new(),
            master_bill_number: None,
            job_number: None,
            stg_reference: None,
            customer_reference: None,
            status: None,
            location: None,
            vessel_name: None,
            vessel_eta: None,
            ata: None,
            available_at_pier: None,
            date_in: None,
            strip_date: None,
            available_at_warehouse: None,
            appointment_date: None,
            dispatched_date: None,
            outgated_date: None,
            return_empty_date: None,
            discharge_date: None,
            pier_last_free_day: None,
            warehouse_free_time_expiry: None,
            source,
        }
    }

    /// Whether this record passes the structural validity check: a non-empty
    /// container number after adapter normalization.
    pub fn is_structurally_valid(&self) -> bool {
        !self.container_number.trim().is_empty()
    }
}

pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}
