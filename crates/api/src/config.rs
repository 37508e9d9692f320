//! API location.

use crate::error::ApiError;

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Environment variable overriding the base URL.
///
/// Read at runtime on native targets and at compile time for wasm builds.
pub const BASE_URL_ENV: &str = "MEDITRACK_API_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let raw = base_url.into();
        let base_url = raw.trim().trim_end_matches('/').to_string();

        if base_url.is_empty() {
            return Err(ApiError::Config("base URL is empty".to_string()));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ApiError::Config(format!(
                "base URL must start with http:// or https://, got '{raw}'"
            )));
        }

        Ok(Self { base_url })
    }

    /// Runtime environment, then build-time environment, then the default.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_sources(
            std::env::var(BASE_URL_ENV).ok(),
            option_env!("MEDITRACK_API_BASE_URL"),
        )
    }

    fn from_sources(runtime: Option<String>, build_time: Option<&str>) -> Result<Self, ApiError> {
        let chosen = runtime
            .filter(|v| !v.trim().is_empty())
            .or_else(|| build_time.filter(|v| !v.trim().is_empty()).map(str::to_string));

        match chosen {
            Some(url) => Self::new(url),
            None => Self::new(DEFAULT_BASE_URL),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed() {
        let cfg = ApiConfig::new("https://meditrack.example/api///").unwrap();
        assert_eq!(cfg.base_url(), "https://meditrack.example/api");
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(matches!(ApiConfig::new("ftp://x"), Err(ApiError::Config(_))));
        assert!(matches!(ApiConfig::new("  "), Err(ApiError::Config(_))));
    }

    #[test]
    fn runtime_value_wins() {
        let cfg = ApiConfig::from_sources(
            Some("http://runtime/api".into()),
            Some("http://build/api"),
        )
        .unwrap();
        assert_eq!(cfg.base_url(), "http://runtime/api");

        let cfg = ApiConfig::from_sources(Some(String::new()), Some("http://build/api")).unwrap();
        assert_eq!(cfg.base_url(), "http://build/api");

        let cfg = ApiConfig::from_sources(None, None).unwrap();
        assert_eq!(cfg, ApiConfig::default());
    }
}
