// Process configuration loaded from environment variables
// Decision: every setting has a local-development default, nothing is required

use housecup_storage::StoreConfig;
use housecup_worker::IngestionConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5001";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP listen address (`BIND_ADDR`)
    pub bind_addr: String,
    pub store: StoreConfig,
    pub ingestion: IngestionConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let bind_addr = std::env::var("BIND_ADDR")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        Self {
            bind_addr,
            store: StoreConfig::from_env(),
            ingestion: IngestionConfig::from_env(),
        }
    }
}
