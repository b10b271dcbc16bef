use serde::Deserialize;
use serde_json::Value;

use crate::shared::service_error::ServiceError;

/// The `{success, ...}` wrapper every detection service endpoint answers with.
///
/// Only the fields this workflow reads are modelled; each adapter validates
/// the ones it needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceEnvelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "faceMesh")]
    pub face_mesh: Option<Value>,
    #[serde(default)]
    pub prediction: Option<Value>,
    #[serde(default)]
    pub confidence: Option<Value>,
}

/// Map a completed (or failed) HTTP exchange to a successful envelope.
pub fn read_envelope(
    url: &str,
    response: reqwest::Result<reqwest::blocking::Response>,
) -> Result<ServiceEnvelope, ServiceError> {
    let response = response.map_err(|e| ServiceError::transport(url, &e))?;
    let status = response.status().as_u16();
    let body = response
        .text()
        .map_err(|e| ServiceError::transport(url, &e))?;
    parse_envelope(url, status, &body)
}

/// Decide the outcome of a response from its status code and body.
///
/// Non-2xx wins over whatever the body says; a 2xx body must be the JSON
/// envelope and must report `success: true`.
pub fn parse_envelope(url: &str, status: u16, body: &str) -> Result<ServiceEnvelope, ServiceError> {
    if !(200..300).contains(&status) {
        return Err(ServiceError::Status {
            url: url.to_string(),
            status,
        });
    }

    let envelope: ServiceEnvelope = serde_json::from_str(body)
        .map_err(|e| ServiceError::malformed(url, format!("invalid JSON envelope: {e}")))?;

    if !envelope.success {
        return Err(ServiceError::Rejected {
            message: envelope
                .message
                .filter(|m| !m.trim().is_empty()),
        });
    }
    Ok(envelope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const URL: &str = "http://svc/predict-autism";

    #[test]
    fn test_success_envelope_parsed() {
        let env = parse_envelope(URL, 200, r#"{"success": true, "prediction": 1}"#).unwrap();
        assert!(env.success);
        assert_eq!(env.prediction, Some(Value::from(1)));
        assert!(env.face_mesh.is_none());
    }

    #[rstest]
    #[case(400)]
    #[case(404)]
    #[case(500)]
    #[case(302)]
    fn test_non_2xx_is_status_error_even_with_body(#[case] status: u16) {
        let err = parse_envelope(URL, status, r#"{"success": false, "message": "x"}"#).unwrap_err();
        assert_eq!(
            err,
            ServiceError::Status {
                url: URL.to_string(),
                status
            }
        );
    }

    #[test]
    fn test_success_false_is_rejected_with_message() {
        let err = parse_envelope(URL, 200, r#"{"success": false, "message": "no face"}"#)
            .unwrap_err();
        assert_eq!(
            err,
            ServiceError::Rejected {
                message: Some("no face".to_string())
            }
        );
    }

    #[test]
    fn test_success_false_blank_message_dropped() {
        let err = parse_envelope(URL, 200, r#"{"success": false, "message": "  "}"#).unwrap_err();
        assert_eq!(err, ServiceError::Rejected { message: None });
    }

    #[rstest]
    #[case::not_json("<html>oops</html>")]
    #[case::missing_success(r#"{"prediction": 1}"#)]
    #[case::wrong_type(r#"{"success": "yes"}"#)]
    #[case::empty("")]
    fn test_malformed_bodies(#[case] body: &str) {
        let err = parse_envelope(URL, 200, body).unwrap_err();
        assert!(matches!(err, ServiceError::Malformed { .. }), "got {err:?}");
    }

    #[test]
    fn test_rejected_display_without_message() {
        let err = ServiceError::Rejected { message: None };
        assert_eq!(err.to_string(), "service declined the request: no reason given");
    }
}
