//! Where the task store lives.

/// Environment variable naming the store's base URL.
pub const API_URL_VAR: &str = "TASKLIST_API_URL";

/// Base URL used when `TASKLIST_API_URL` is unset or blank.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup, e.g. a map in tests.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup(API_URL_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self { base_url }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        assert_eq!(Config::from_lookup(|_| None), Config::default());
    }

    #[test]
    fn blank_value_falls_back_to_default() {
        let config = Config::from_lookup(|_| Some("   ".to_string()));
        assert_eq!(config.base_url, DEFAULT_API_URL);
    }

    #[test]
    fn from_env_reads_process_environment() {
        std::env::set_var(API_URL_VAR, "http://from-env:9000");
        let config = Config::from_env();
        std::env::remove_var(API_URL_VAR);
        assert_eq!(config.base_url, "http://from-env:9000");
    }

    #[test]
    fn reads_api_url() {
        let config = Config::from_lookup(|key| {
            (key == API_URL_VAR).then(|| "http://tasks.internal:8080/".to_string())
        });
        assert_eq!(config.base_url, "http://tasks.internal:8080/");
    }
}
