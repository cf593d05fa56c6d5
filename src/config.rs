use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_WAKATIME_URL: &str =
    "https://wakatime.com/api/v1/users/current/stats/last_7_days";
/// Public contribution-calendar API; `{username}` is filled in per request.
pub const DEFAULT_CONTRIBUTIONS_URL: &str =
    "https://github-contributions-api.jogruber.de/v4/{username}?y=last";
pub const DEFAULT_REVALIDATE: Duration = Duration::from_secs(60 * 60);

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a whole number of seconds, got {value:?}")]
    InvalidSeconds { name: &'static str, value: String },
}

/// Settings for the stats proxy, read once at startup.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// `None` when unset or blank; the endpoint then answers 500.
    pub api_key: Option<String>,
    pub upstream_url: String,
    pub contributions_url: String,
    pub revalidate: Duration,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            upstream_url: DEFAULT_WAKATIME_URL.to_string(),
            contributions_url: DEFAULT_CONTRIBUTIONS_URL.to_string(),
            revalidate: DEFAULT_REVALIDATE,
        }
    }
}

impl ProxyConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("WAKATIME_API_KEY").filter(|k| !k.trim().is_empty());
        let upstream_url = lookup("WAKATIME_STATS_URL")
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_WAKATIME_URL.to_string());
        let contributions_url = lookup("CONTRIBUTIONS_URL")
            .filter(|u| u.contains("{username}"))
            .unwrap_or_else(|| DEFAULT_CONTRIBUTIONS_URL.to_string());
        let revalidate = match lookup("STATS_REVALIDATE_SECS") {
            Some(value) => value
                .trim()
                .parse()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidSeconds {
                    name: "STATS_REVALIDATE_SECS",
                    value,
                })?,
            None => DEFAULT_REVALIDATE,
        };
        Ok(Self {
            api_key,
            upstream_url,
            contributions_url,
            revalidate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<ProxyConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ProxyConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.api_key, None);
        assert_eq!(cfg.upstream_url, DEFAULT_WAKATIME_URL);
        assert_eq!(cfg.contributions_url, DEFAULT_CONTRIBUTIONS_URL);
        assert_eq!(cfg.revalidate, Duration::from_secs(3600));
    }

    #[test]
    fn test_blank_key_is_missing() {
        let cfg = config(&[("WAKATIME_API_KEY", "  ")]).unwrap();
        assert_eq!(cfg.api_key, None);
    }

    #[test]
    fn test_overrides() {
        let cfg = config(&[
            ("WAKATIME_API_KEY", "waka_123"),
            ("WAKATIME_STATS_URL", "http://localhost:9000/stats"),
            ("STATS_REVALIDATE_SECS", "60"),
            ("CONTRIBUTIONS_URL", "http://localhost:9000/{username}.json"),
        ])
        .unwrap();
        assert_eq!(cfg.contributions_url, "http://localhost:9000/{username}.json");
        assert_eq!(cfg.api_key.as_deref(), Some("waka_123"));
        assert_eq!(cfg.upstream_url, "http://localhost:9000/stats");
        assert_eq!(cfg.revalidate, Duration::from_secs(60));
    }

    #[test]
    fn test_contributions_url_needs_placeholder() {
        let cfg = config(&[("CONTRIBUTIONS_URL", "http://localhost:9000/me.json")]).unwrap();
        assert_eq!(cfg.contributions_url, DEFAULT_CONTRIBUTIONS_URL);
    }

    #[test]
    fn test_invalid_revalidate() {
        let err = config(&[("STATS_REVALIDATE_SECS", "soon")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidSeconds {
                name: "STATS_REVALIDATE_SECS",
                value: "soon".to_string(),
            }
        );
    }
}
