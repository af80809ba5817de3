//! Configuration loading from environment.

use std::env;

use loan_repo::CounterBackend;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_REDIS_RETRY_ATTEMPTS: u32 = 3;

/// Application configuration.
#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub counter: CounterBackend,
    /// Reported as `instance` in payment results
    pub instance_id: Option<String>,
    pub log_json: bool,
    pub otlp_endpoint: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which returns the value of a variable if set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(port) => port
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a port number, got {:?}", port))?,
            None => DEFAULT_PORT,
        };

        let redis_url = var("REDIS_URL");
        let backend = var("COUNTER_BACKEND").map(|b| b.to_lowercase());

        let counter = match (backend.as_deref(), redis_url) {
            (Some("memory"), _) | (None, None) => CounterBackend::Memory,
            (Some("redis"), Some(url)) | (None, Some(url)) => {
                let retry_attempts = match var("REDIS_RETRY_ATTEMPTS") {
                    Some(n) => n.parse().map_err(|_| {
                        anyhow::anyhow!("REDIS_RETRY_ATTEMPTS must be a positive integer, got {:?}", n)
                    })?,
                    None => DEFAULT_REDIS_RETRY_ATTEMPTS,
                };
                if retry_attempts == 0 {
                    anyhow::bail!("REDIS_RETRY_ATTEMPTS must be at least 1");
                }
                CounterBackend::Redis {
                    url,
                    retry_attempts,
                }
            }
            (Some("redis"), None) => {
                anyhow::bail!("REDIS_URL environment variable is required for COUNTER_BACKEND=redis")
            }
            (Some(other), _) => {
                anyhow::bail!("Unknown COUNTER_BACKEND: {}. Supported: memory, redis", other)
            }
        };

        let instance_id = var("INSTANCE_ID").or_else(|| var("CF_INSTANCE_INDEX"));

        let log_json = var("LOG_FORMAT").is_some_and(|f| f.eq_ignore_ascii_case("json"));
        let otlp_endpoint = var("OTEL_EXPORTER_OTLP_ENDPOINT");

        Ok(Self {
            port,
            counter,
            instance_id,
            log_json,
            otlp_endpoint,
        })
    }
}
