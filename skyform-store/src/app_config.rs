use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub source: SourceConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    pub base_url: String,
    pub tenant_identifier: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_locale() -> String { "en-us".to_string() }
fn default_timeout_seconds() -> u64 { 10 }

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,
}

fn default_ttl_seconds() -> u64 { 300 }

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_seconds: default_ttl_seconds() }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Result<chrono::Duration, config::ConfigError> {
        i64::try_from(self.ttl_seconds)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .ok_or_else(|| {
                config::ConfigError::Message(format!(
                    "cache.ttl_seconds out of range: {}",
                    self.ttl_seconds
                ))
            })
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
            // Eg.. `SKYFORM__CACHE__TTL_SECONDS=60`
            .add_source(config::Environment::with_prefix("SKYFORM").separator("__"))
            .build()?;

        let config: Self = s.try_deserialize()?;
        config.cache.ttl()?;
        Ok(config)
    }
}
