use std::env;

use tracing::info;

/// Default worker count when neither the flag nor the env var is set.
const DEFAULT_THREADS: usize = 4;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_usize(key: &str, default: usize) -> usize {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone)]
pub struct Config {
    pub threads: usize,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            threads: env_usize("GRAPHSUM_THREADS", DEFAULT_THREADS),
        }
    }

    pub fn log_summary(&self) {
        info!("Config loaded:");
        info!("  threads: {}", self.threads);
    }
}
