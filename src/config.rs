use std::sync::OnceLock;

pub const DEFAULT_API_BASE: &str = "/api";
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Backend endpoint paths, relative to `Config::api_base`.
pub mod endpoints {
    pub const LOGIN: &str = "вход";
    pub const REGISTER: &str = "регистрация";
    pub const TEMPLATES: &str = "шаблоны";
    pub const CHECK: &str = "проверить";
    pub const PROFILE: &str = "профиль";
    pub const MY_REPORTS: &str = "мои-отчеты";
}

/// Client configuration, baked in at build time.
///
/// - `DOCCHECK_API_BASE` overrides the backend prefix (default `/api`).
/// - `DOCCHECK_LOG` is an `EnvFilter` directive string (default `info`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base: String,
    pub log_filter: String,
}

static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn load() -> Self {
        Self::from_parts(option_env!("DOCCHECK_API_BASE"), option_env!("DOCCHECK_LOG"))
    }

    fn from_parts(api_base: Option<&str>, log_filter: Option<&str>) -> Self {
        let api_base = api_base
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/')
            .to_string();
        let log_filter = log_filter
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_LOG_FILTER)
            .to_string();

        Self {
            api_base,
            log_filter,
        }
    }

    /// Join the API base and an endpoint path with exactly one `/`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }
}

/// Process-wide configuration, loaded on first use.
pub fn current() -> &'static Config {
    CONFIG.get_or_init(Config::load)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_parts(None, None);
        assert_eq!(config.api_base, "/api");
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_blank_overrides_fall_back_to_defaults() {
        let config = Config::from_parts(Some("  "), Some(""));
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_trailing_slash_is_stripped() {
        let config = Config::from_parts(Some("http://localhost:8000/api/"), Some("doccheck=debug"));
        assert_eq!(config.api_base, "http://localhost:8000/api");
        assert_eq!(config.log_filter, "doccheck=debug");
    }

    #[test]
    fn test_endpoint_joins_with_single_slash() {
        let config = Config::from_parts(Some("/api/"), None);
        assert_eq!(config.endpoint(endpoints::LOGIN), "/api/вход");
        assert_eq!(config.endpoint("/мои-отчеты"), "/api/мои-отчеты");
    }
}
