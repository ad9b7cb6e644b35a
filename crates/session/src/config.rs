use std::time::Duration;

/// Search input settles after this long without keystrokes.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 500;

/// Maximum number of suggestions returned for a search prefix.
pub const SUGGESTION_LIMIT: usize = 5;

/// Suggestions are only looked up for at least this many characters.
pub const SUGGESTION_MIN_CHARS: usize = 2;

/// Session runtime configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Quiet period before typed search text is committed (default: 500 ms).
    pub search_debounce: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
        }
    }
}

impl SessionConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var              | Default |
    /// |----------------------|---------|
    /// | `SEARCH_DEBOUNCE_MS` | `500`   |
    pub fn from_env() -> Self {
        let debounce_ms: u64 = std::env::var("SEARCH_DEBOUNCE_MS")
            .map(|v| v.parse().expect("SEARCH_DEBOUNCE_MS must be a valid u64"))
            .unwrap_or(DEFAULT_SEARCH_DEBOUNCE_MS);

        Self {
            search_debounce: Duration::from_millis(debounce_ms),
        }
    }
}
