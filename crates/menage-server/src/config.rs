use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

/// Server configuration, merged from `menage.toml` and `MENAGE_`-prefixed
/// environment variables. Every field has a default so a bare binary runs.
#[derive(Deserialize, Debug)]
pub struct Config {
    /// Socket address to listen on.
    #[serde(default = "default_listen")]
    pub listen: String,
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
    #[serde(default)]
    pub sweep: SweepConfig,
    /// Origins allowed by CORS. Empty means no cross-origin access.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

/// Configuration for the periodic due-date sweep.
#[derive(Deserialize, Debug)]
pub struct SweepConfig {
    /// Seconds between sweep ticks.
    #[serde(default = "default_sweep_interval_secs")]
    pub interval_secs: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_sweep_interval_secs(),
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_database_path() -> String {
    "menage.db".to_string()
}

fn default_sweep_interval_secs() -> u64 {
    3600
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Toml::file("menage.toml"))
            .merge(Env::prefixed("MENAGE_"))
            .extract()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_field() {
        let config: Config = Figment::new().extract().expect("defaults should suffice");
        assert_eq!(config.listen, "0.0.0.0:8080");
        assert_eq!(config.database_path, "menage.db");
        assert_eq!(config.sweep.interval_secs, 3600);
        assert!(config.cors_origins.is_empty());
    }
}
