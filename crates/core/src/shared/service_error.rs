use thiserror::Error;

/// Failure of a single call to the detection service.
///
/// Carries owned strings rather than the transport error so results can
/// cross worker channels and be compared in tests.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    #[error("could not reach {url}: {reason}")]
    Transport { url: String, reason: String },
    #[error("{url} responded with HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("service declined the request: {}", .message.as_deref().unwrap_or("no reason given"))]
    Rejected { message: Option<String> },
    #[error("unexpected response from {url}: {reason}")]
    Malformed { url: String, reason: String },
}

impl ServiceError {
    pub fn transport(url: &str, err: &reqwest::Error) -> Self {
        let reason = if err.is_timeout() {
            "request timed out".to_string()
        } else if err.is_connect() {
            "connection failed".to_string()
        } else {
            err.to_string()
        };
        ServiceError::Transport {
            url: url.to_string(),
            reason,
        }
    }

    pub fn malformed(url: &str, reason: impl Into<String>) -> Self {
        ServiceError::Malformed {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}
