//! Process configuration, read once at startup and injected

use std::time::Duration;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_RECOMMEND_TIMEOUT_SECS: u64 = 30;

/// Service configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    /// Endpoint of the recommendation service (`NEXT_MOVE_URL`)
    pub next_move_url: Option<String>,
    /// Origin allowed by CORS; `None` or `*` allows any origin
    pub allowed_origin: Option<String>,
    pub recommend_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            next_move_url: None,
            allowed_origin: None,
            recommend_timeout: Duration::from_secs(DEFAULT_RECOMMEND_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup so tests don't touch the process env.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = non_empty("NUDGE_PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let recommend_timeout = non_empty("NUDGE_RECOMMEND_TIMEOUT_SECS")
            .and_then(|s| s.parse().ok())
            .map_or(
                Duration::from_secs(DEFAULT_RECOMMEND_TIMEOUT_SECS),
                Duration::from_secs,
            );

        Self {
            port,
            next_move_url: non_empty("NEXT_MOVE_URL"),
            allowed_origin: non_empty("ALLOWED_ORIGIN"),
            recommend_timeout,
        }
    }

    /// Concrete origin to restrict to, if any
    pub fn restricted_origin(&self) -> Option<&str> {
        self.allowed_origin
            .as_deref()
            .map(str::trim)
            .filter(|o| *o != "*")
    }
}
