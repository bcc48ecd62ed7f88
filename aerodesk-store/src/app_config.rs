use aerodesk_seating::SeatingConfig;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub checkin: CheckInConfig,
    #[serde(default)]
    pub seating: SeatingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Postgres,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub database_url: Option<String>,
    /// JSON dataset loaded by the memory backend
    pub dataset_path: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

#[derive(Debug, Deserialize, Clone)]
pub struct CheckInConfig {
    /// Write computed seats back to the store. Off means simulate only.
    #[serde(default)]
    pub persist_assignments: bool,
    /// Re-plans allowed after a seat was claimed by someone else
    #[serde(default = "default_max_claim_retries")]
    pub max_claim_retries: u32,
}

fn default_max_claim_retries() -> u32 {
    2
}

impl Default for CheckInConfig {
    fn default() -> Self {
        Self {
            persist_assignments: false,
            max_claim_retries: default_max_claim_retries(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(env_source())
            .build()?;

        s.try_deserialize()
    }
}

/// Eg. `AERODESK__CHECKIN__PERSIST_ASSIGNMENTS=true`. The prefix takes the same separator.
fn env_source() -> config::Environment {
    config::Environment::with_prefix("AERODESK").separator("__")
}
