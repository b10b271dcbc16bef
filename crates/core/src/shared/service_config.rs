use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

use crate::shared::constants::{DEFAULT_SERVICE_URL, EXTRACT_FACE_MESH_PATH, PREDICT_PATH};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid service URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("service URL must use http or https, got '{0}'")]
    UnsupportedScheme(String),
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Where the detection service lives and how to talk to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    base_url: String,
    timeout: Option<Duration>,
}

impl ServiceConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let parsed = Url::parse(trimmed).map_err(|e| ConfigError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ConfigError::UnsupportedScheme(parsed.scheme().to_string()));
        }
        Ok(Self {
            base_url: trimmed.to_string(),
            timeout: None,
        })
    }

    /// Limit every request to `timeout`. Without one requests may take as long
    /// as the service needs.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn extract_url(&self) -> String {
        self.endpoint(EXTRACT_FACE_MESH_PATH)
    }

    pub fn predict_url(&self) -> String {
        self.endpoint(PREDICT_PATH)
    }

    /// Blocking client shared by the extraction and prediction adapters.
    pub fn build_client(&self) -> Result<reqwest::blocking::Client, ConfigError> {
        // The blocking builder defaults to 30s; `None` must clear it.
        reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ConfigError::Client)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVICE_URL.to_string(),
            timeout: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_server::serve_after;
    use std::time::Instant;

    #[test]
    fn test_default_points_at_localhost() {
        let config = ServiceConfig::default();
        assert_eq!(
            config.extract_url(),
            "http://localhost:5000/extract-face-mesh"
        );
        assert_eq!(config.predict_url(), "http://localhost:5000/predict-autism");
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_trailing_slash_is_ignored() {
        let config = ServiceConfig::new("https://screening.example.com/api/").unwrap();
        assert_eq!(
            config.predict_url(),
            "https://screening.example.com/api/predict-autism"
        );
    }

    #[test]
    fn test_invalid_url_rejected() {
        let err = ServiceConfig::new("not a url").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let err = ServiceConfig::new("ftp://example.com").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedScheme(ref s) if s == "ftp"));
    }

    #[test]
    fn test_with_timeout() {
        let config = ServiceConfig::default().with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
        assert!(config.build_client().is_ok());
    }

    #[test]
    fn test_configured_timeout_cuts_off_slow_service() {
        let (base, server) = serve_after(Duration::from_secs(2), 200, "{}");
        let config = ServiceConfig::new(&base)
            .unwrap()
            .with_timeout(Duration::from_millis(300));

        let err = config
            .build_client()
            .unwrap()
            .post(config.predict_url())
            .body("{}")
            .send()
            .unwrap_err();
        assert!(err.is_timeout());
        let _ = server.join();
    }

    #[test]
    fn test_without_timeout_waits_past_client_default() {
        let (base, server) = serve_after(Duration::from_secs(32), 200, r#"{"success":true}"#);
        let config = ServiceConfig::new(&base).unwrap();

        let start = Instant::now();
        let response = config
            .build_client()
            .unwrap()
            .post(config.predict_url())
            .body("{}")
            .send()
            .unwrap();
        assert!(start.elapsed() >= Duration::from_secs(32));
        assert_eq!(response.status().as_u16(), 200);
        server.join().unwrap();
    }
}
