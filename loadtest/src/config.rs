use std::env;

use anyhow::{ensure, Context, Result};

pub const DEFAULT_URL: &str = "http://127.0.0.1:8080/";
const DEFAULT_TOTAL_REQUESTS: usize = 1000;
const DEFAULT_CONCURRENCY: usize = 50;

/// Immutable description of one load-test run, read once at startup.
#[derive(Debug, Clone)]
pub struct TargetConfig {
    pub url: String,
    /// Host-header override for name-based routing at the balancer.
    pub virtual_host: Option<String>,
    pub total_requests: usize,
    pub concurrency: usize,
}

impl TargetConfig {
    /// Reads `TARGET_URL`, `VIRTUAL_HOST`, `TOTAL_REQUESTS` and `CONCURRENCY`,
    /// falling back to defaults aimed at the local demo stack.
    pub fn from_env() -> Result<Self> {
        let url = env::var("TARGET_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
        let virtual_host = env::var("VIRTUAL_HOST").ok();
        let total_requests = parse_env("TOTAL_REQUESTS", DEFAULT_TOTAL_REQUESTS)?;
        let concurrency = parse_env("CONCURRENCY", DEFAULT_CONCURRENCY)?;
        let config = Self {
            url,
            virtual_host,
            total_requests,
            concurrency,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.total_requests >= 1, "total requests must be at least 1");
        ensure!(self.concurrency >= 1, "concurrency must be at least 1");
        Ok(())
    }
}

fn parse_env(key: &str, default: usize) -> Result<usize> {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{key} must be an integer, got {raw:?}")),
        Err(_) => Ok(default),
    }
}
