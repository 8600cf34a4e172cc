//! Build-time configuration
//!
//! Values are baked in at compile time from the environment (`trunk build`
//! passes its environment through to cargo) and fall back to local defaults.

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
pub const DEFAULT_TOKEN_KEY: &str = "token";
pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid API base URL '{0}': expected http://, https:// or a path starting with /")]
    InvalidApiBase(String),

    #[error("Token storage key must not be empty")]
    EmptyTokenKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiConfig {
    /// Backend origin, no trailing slash. Empty means same origin.
    pub api_base: String,
    /// Local storage key holding the auth token
    pub token_key: String,
    pub login_path: &'static str,
}

impl UiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_values(option_env!("PARLEY_API_BASE"), option_env!("PARLEY_TOKEN_KEY"))
    }

    pub fn from_values(api_base: Option<&str>, token_key: Option<&str>) -> Result<Self, ConfigError> {
        let raw_base = api_base.unwrap_or(DEFAULT_API_BASE).trim();
        if !(raw_base.starts_with("http://")
            || raw_base.starts_with("https://")
            || raw_base.starts_with('/'))
        {
            return Err(ConfigError::InvalidApiBase(raw_base.to_string()));
        }

        let token_key = token_key.unwrap_or(DEFAULT_TOKEN_KEY).trim();
        if token_key.is_empty() {
            return Err(ConfigError::EmptyTokenKey);
        }

        Ok(Self {
            api_base: raw_base.trim_end_matches('/').to_string(),
            token_key: token_key.to_string(),
            login_path: LOGIN_PATH,
        })
    }

    /// Absolute URL for an API path such as `/api/v1/auth/me`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            login_path: LOGIN_PATH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = UiConfig::from_values(None, None).unwrap();
        assert_eq!(config, UiConfig::default());
        assert_eq!(config.url("/health"), "http://localhost:8000/health");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = UiConfig::from_values(Some("https://chat.example.com/"), None).unwrap();
        assert_eq!(config.api_base, "https://chat.example.com");
        assert_eq!(
            config.url("/api/v1/auth/me"),
            "https://chat.example.com/api/v1/auth/me"
        );
    }

    #[test]
    fn test_same_origin_base() {
        let config = UiConfig::from_values(Some("/"), None).unwrap();
        assert_eq!(config.api_base, "");
        assert_eq!(config.url("/health"), "/health");
    }

    #[test]
    fn test_invalid_base_rejected() {
        let err = UiConfig::from_values(Some("localhost:8000"), None).unwrap_err();
        assert_eq!(err, ConfigError::InvalidApiBase("localhost:8000".to_string()));
    }

    #[test]
    fn test_empty_token_key_rejected() {
        assert_eq!(
            UiConfig::from_values(None, Some("  ")).unwrap_err(),
            ConfigError::EmptyTokenKey
        );
    }
}
