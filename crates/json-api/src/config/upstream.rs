//! Upstream Config

use std::time::Duration;

use clap::Args;
use zonegate_app::provider::{BunnyConfig, DEFAULT_BUNNY_API_URL};

/// bunny.net API settings.
#[derive(Args)]
pub struct UpstreamConfig {
    /// bunny.net API base URL
    #[arg(long, env = "BUNNY_API_URL", default_value = DEFAULT_BUNNY_API_URL)]
    pub bunny_api_url: String,

    /// Upstream request timeout in seconds
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECONDS", default_value_t = 30_u64)]
    pub upstream_timeout_seconds: u64,

    /// Master API key, stored encrypted at startup when given
    #[arg(long, env = "BUNNY_API_KEY", hide_env_values = true)]
    pub bunny_api_key: Option<String>,
}

impl UpstreamConfig {
    /// Client settings for the bunny.net API.
    #[must_use]
    pub fn bunny_config(&self) -> BunnyConfig {
        BunnyConfig {
            base_url: self.bunny_api_url.clone(),
            timeout: Duration::from_secs(self.upstream_timeout_seconds),
        }
    }
}

impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("bunny_api_url", &self.bunny_api_url)
            .field("upstream_timeout_seconds", &self.upstream_timeout_seconds)
            .field("bunny_api_key", &self.bunny_api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
