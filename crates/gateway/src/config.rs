use std::time::Duration;

/// Default public catalog endpoint.
pub const DEFAULT_API_URL: &str = "https://api.disneyapi.dev";

/// Catalog gateway configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Catalog base URL without trailing slash (default: [`DEFAULT_API_URL`]).
    pub api_url: String,
    /// Per-request timeout in seconds (default: `10`).
    pub request_timeout_secs: u64,
    /// Cache entry lifetime in seconds; `0` keeps entries forever
    /// (default: `900`).
    pub cache_ttl_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: 10,
            cache_ttl_secs: 900,
        }
    }
}

impl GatewayConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                     |
    /// |--------------------------|-----------------------------|
    /// | `CATALOG_API_URL`        | `https://api.disneyapi.dev` |
    /// | `CATALOG_TIMEOUT_SECS`   | `10`                        |
    /// | `CATALOG_CACHE_TTL_SECS` | `900`                       |
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_url = std::env::var("CATALOG_API_URL")
            .unwrap_or(defaults.api_url)
            .trim_end_matches('/')
            .to_string();

        let request_timeout_secs: u64 = std::env::var("CATALOG_TIMEOUT_SECS")
            .map(|v| v.parse().expect("CATALOG_TIMEOUT_SECS must be a valid u64"))
            .unwrap_or(defaults.request_timeout_secs);

        let cache_ttl_secs: u64 = std::env::var("CATALOG_CACHE_TTL_SECS")
            .map(|v| v.parse().expect("CATALOG_CACHE_TTL_SECS must be a valid u64"))
            .unwrap_or(defaults.cache_ttl_secs);

        Self {
            api_url,
            request_timeout_secs,
            cache_ttl_secs,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Cache lifetime, `None` when entries never expire.
    pub fn cache_ttl(&self) -> Option<Duration> {
        (self.cache_ttl_secs > 0).then(|| Duration::from_secs(self.cache_ttl_secs))
    }
}
