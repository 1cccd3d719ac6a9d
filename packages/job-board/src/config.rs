use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

const DEFAULT_BACKEND: &str = "localhost:8080";
const DEFAULT_DEBOUNCE_MS: u64 = 300;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base address, always with a scheme and without a trailing `/`
    pub backend_url: String,
    pub debounce: Duration,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: normalize_backend_url(DEFAULT_BACKEND),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let backend_url = lookup("BACK_END_URL").unwrap_or_else(|| DEFAULT_BACKEND.to_string());

        let debounce_ms: u64 = match lookup("JOB_BOARD_DEBOUNCE_MS") {
            Some(raw) => raw
                .parse()
                .context("JOB_BOARD_DEBOUNCE_MS must be a number of milliseconds")?,
            None => DEFAULT_DEBOUNCE_MS,
        };

        let timeout_secs: u64 = match lookup("JOB_BOARD_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse()
                .context("JOB_BOARD_REQUEST_TIMEOUT_SECS must be a number of seconds")?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Self {
            backend_url: normalize_backend_url(&backend_url),
            debounce: Duration::from_millis(debounce_ms),
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn with_backend_url(mut self, url: &str) -> Self {
        self.backend_url = normalize_backend_url(url);
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}

/// The backend address is commonly configured as a bare host; requests go
/// over plain http in that case.
fn normalize_backend_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.backend_url, "http://localhost:8080");
        assert_eq!(config.debounce, Duration::from_millis(300));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn bare_host_gets_http_scheme() {
        let config = Config::from_lookup(lookup_from(&[(
            "BACK_END_URL",
            "jobs.example.com/",
        )]))
        .unwrap();

        assert_eq!(config.backend_url, "http://jobs.example.com");
    }

    #[test]
    fn explicit_scheme_is_kept() {
        let config =
            Config::from_lookup(lookup_from(&[("BACK_END_URL", "https://jobs.example.com")]))
                .unwrap();

        assert_eq!(config.backend_url, "https://jobs.example.com");
    }

    #[test]
    fn numeric_settings_are_parsed() {
        let config = Config::from_lookup(lookup_from(&[
            ("JOB_BOARD_DEBOUNCE_MS", "50"),
            ("JOB_BOARD_REQUEST_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.debounce, Duration::from_millis(50));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn malformed_debounce_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[("JOB_BOARD_DEBOUNCE_MS", "soon")]))
            .unwrap_err();

        assert!(err.to_string().contains("JOB_BOARD_DEBOUNCE_MS"));
    }

    #[test]
    fn overrides_apply() {
        let config = Config::default()
            .with_backend_url("127.0.0.1:9000")
            .with_debounce(Duration::from_millis(10));

        assert_eq!(config.backend_url, "http://127.0.0.1:9000");
        assert_eq!(config.debounce, Duration::from_millis(10));
    }
}
