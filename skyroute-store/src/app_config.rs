use serde::Deserialize;
use skyroute_core::{SearchOptions, SortBy, SortOrder};
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub search: SearchDefaults,
    #[serde(default)]
    pub offers: OfferSourceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

/// Operator-tunable search defaults. Requests may override each of them.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SearchDefaults {
    pub page_size: usize,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
    pub max_outbound_flights: usize,
    pub max_return_flights: usize,
    pub max_combinations: usize,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        let options = SearchOptions::default();
        Self {
            page_size: options.page_size,
            sort_by: options.sort_by,
            sort_order: options.sort_order,
            max_outbound_flights: options.max_outbound_flights,
            max_return_flights: options.max_return_flights,
            max_combinations: options.max_combinations,
        }
    }
}

impl SearchDefaults {
    pub fn to_options(&self) -> SearchOptions {
        SearchOptions {
            page: 1,
            page_size: self.page_size,
            sort_by: self.sort_by,
            sort_order: self.sort_order,
            max_outbound_flights: self.max_outbound_flights,
            max_return_flights: self.max_return_flights,
            max_combinations: self.max_combinations,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct OfferSourceConfig {
    /// JSON file of flight offers served by the in-memory source
    pub fixture_path: Option<String>,
    /// Artificial delay per lookup, in milliseconds
    pub latency_ms: u64,
    /// Retries for a failed lookup; 0 disables the retry wrapper
    pub max_retries: u32,
    pub retry_initial_delay_ms: u64,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Environment-specific overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local developer overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `SKYROUTE__SEARCH__MAX_COMBINATIONS=1000`
            .add_source(config::Environment::with_prefix("SKYROUTE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
