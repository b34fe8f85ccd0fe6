//! Gateway configuration from the environment (`.env` is honoured)

use crate::retry::MAX_RETRIES_CAP;
use std::env;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub api_key: Option<String>,
    pub model: String,
    /// Full URL override; derived from `model` when absent
    pub endpoint: Option<String>,
    pub timeout: Duration,
    pub max_retries: u32,
}

// keeps the key out of logs
impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: MAX_RETRIES_CAP,
        }
    }
}

impl GatewayConfig {
    /// Read `GEMINI_*` and `GATEWAY_*` variables, loading `.env` first
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary key lookup.
    /// Unparseable numbers fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let timeout = non_empty("GATEWAY_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        let max_retries = non_empty("GATEWAY_MAX_RETRIES")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(defaults.max_retries)
            .min(MAX_RETRIES_CAP);

        Self {
            api_key: non_empty("GEMINI_API_KEY"),
            model: non_empty("GEMINI_MODEL").unwrap_or(defaults.model),
            endpoint: non_empty("GEMINI_ENDPOINT"),
            timeout,
            max_retries,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint_url(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| format!("{DEFAULT_API_BASE}/{}:generateContent", self.model))
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::from_lookup(lookup(&[]));
        assert_eq!(config, GatewayConfig::default());
        assert_eq!(
            config.endpoint_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_overrides_and_clamping() {
        let config = GatewayConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "secret"),
            ("GEMINI_MODEL", "gemini-1.5-pro"),
            ("GATEWAY_TIMEOUT_SECS", "5"),
            ("GATEWAY_MAX_RETRIES", "7"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.max_retries, 1);
        assert!(config.endpoint_url().contains("gemini-1.5-pro:generateContent"));
    }

    #[test]
    fn test_garbage_values_fall_back() {
        let config = GatewayConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "   "),
            ("GATEWAY_TIMEOUT_SECS", "soon"),
            ("GATEWAY_MAX_RETRIES", "-1"),
        ]));
        assert!(config.api_key.is_none());
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.max_retries, MAX_RETRIES_CAP);
    }

    #[test]
    fn test_debug_hides_key() {
        let config = GatewayConfig::default().with_api_key("super-secret");
        assert!(!format!("{config:?}").contains("super-secret"));
    }
}
