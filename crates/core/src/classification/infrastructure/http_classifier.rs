use std::time::Instant;

use reqwest::blocking::Client;
use serde::Serialize;

use crate::classification::domain::classifier::Classifier;
use crate::classification::domain::prediction::Prediction;
use crate::detection::domain::landmark_payload::LandmarkPayload;
use crate::shared::service_config::{ConfigError, ServiceConfig};
use crate::shared::service_envelope::read_envelope;
use crate::shared::service_error::ServiceError;

#[derive(Serialize)]
struct PredictRequest<'a> {
    #[serde(rename = "faceMesh")]
    face_mesh: &'a LandmarkPayload,
}

/// Posts the face mesh as JSON to `/predict-autism`.
pub struct HttpClassifier {
    client: Client,
    url: String,
}

impl HttpClassifier {
    pub fn new(config: &ServiceConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_client(config.build_client()?, config))
    }

    pub fn with_client(client: Client, config: &ServiceConfig) -> Self {
        Self {
            client,
            url: config.predict_url(),
        }
    }
}

impl Classifier for HttpClassifier {
    fn predict(&self, mesh: &LandmarkPayload) -> Result<Prediction, ServiceError> {
        log::debug!("POST {}", self.url);
        let start = Instant::now();
        let response = self
            .client
            .post(&self.url)
            .json(&PredictRequest { face_mesh: mesh })
            .send();
        let envelope = read_envelope(&self.url, response)?;

        let prediction = Prediction::from_fields(
            envelope.prediction.as_ref(),
            envelope.confidence.as_ref(),
        )
        .map_err(|r| ServiceError::malformed(&self.url, r))?;

        log::info!(
            "Prediction received: label={} confidence={:?} in {:.0}ms",
            prediction.label.code(),
            prediction.confidence,
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(prediction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::domain::prediction::Label;
    use crate::shared::test_server::{closed_port_url, serve_once};
    use approx::assert_relative_eq;
    use serde_json::json;

    fn mesh() -> LandmarkPayload {
        LandmarkPayload::from_value(json!([[100, 200, -0.03], [110, 205, 0.01]])).unwrap()
    }

    fn classifier(base: &str) -> HttpClassifier {
        HttpClassifier::new(&ServiceConfig::new(base).unwrap()).unwrap()
    }

    #[test]
    fn test_success_posts_mesh_as_json() {
        let (base, server) =
            serve_once(200, r#"{"success": true, "prediction": 1, "confidence": 0.82}"#);

        let prediction = classifier(&base).predict(&mesh()).unwrap();
        assert_eq!(prediction.label, Label::Positive);
        assert_relative_eq!(prediction.confidence.unwrap(), 0.82);

        let request = server.join().unwrap();
        assert!(request.head.starts_with("POST /predict-autism"));
        assert!(request.head.to_lowercase().contains("application/json"));
        let sent: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(sent, json!({"faceMesh": [[100, 200, -0.03], [110, 205, 0.01]]}));
    }

    #[test]
    fn test_success_false_propagates_message() {
        let (base, server) = serve_once(
            200,
            r#"{"success": false, "message": "Incorrect number of features."}"#,
        );

        let err = classifier(&base).predict(&mesh()).unwrap_err();
        assert_eq!(
            err,
            ServiceError::Rejected {
                message: Some("Incorrect number of features.".to_string())
            }
        );
        server.join().unwrap();
    }

    #[test]
    fn test_bad_request_status() {
        let (base, server) = serve_once(400, r#"{"success": false, "message": "missing"}"#);

        let err = classifier(&base).predict(&mesh()).unwrap_err();
        assert!(matches!(err, ServiceError::Status { status: 400, .. }));
        server.join().unwrap();
    }

    #[test]
    fn test_out_of_range_prediction_is_malformed() {
        let (base, server) = serve_once(200, r#"{"success": true, "prediction": 3}"#);

        let err = classifier(&base).predict(&mesh()).unwrap_err();
        assert!(matches!(err, ServiceError::Malformed { .. }));
        server.join().unwrap();
    }

    #[test]
    fn test_unreachable_service_is_transport_error() {
        let err = classifier(&closed_port_url()).predict(&mesh()).unwrap_err();
        assert!(matches!(err, ServiceError::Transport { .. }));
    }
}
