//! # Container Lifecycle & LFD Risk Reconciliation Engine
//!
//! This library ingests container/shipment status from two independent, asynchronous,
//! schema-divergent providers, merges each lookup into one normalized record, derives
//! the container's current lifecycle stage under a monotonicity invariant, evaluates
//! the most urgent free-time deadline, and builds an ordered event timeline.
//!
//! The engine computes derived facts only; presentation, alerting policy, and
//! persistence of operator actions belong to the consuming layer.

pub mod adapters;
pub mod analysis;
pub mod config;
pub mod errors;
pub mod models;
pub mod normalize;
pub mod reconcile;
pub mod services;
pub mod utils;
