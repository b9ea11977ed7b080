pub mod fields;
pub mod internal_db;
pub mod live_api;
