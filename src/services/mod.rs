pub mod internal_db_client;
pub mod live_api_client;
pub mod provider;

pub use internal_db_client::InternalDbClient;
pub use live_api_client::LiveApiClient;
pub use provider::ProviderClient;
