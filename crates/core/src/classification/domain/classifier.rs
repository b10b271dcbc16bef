use crate::classification::domain::prediction::Prediction;
use crate::detection::domain::landmark_payload::LandmarkPayload;
use crate::shared::service_error::ServiceError;

/// Domain interface for classifying a face mesh.
pub trait Classifier: Send {
    fn predict(&self, mesh: &LandmarkPayload) -> Result<Prediction, ServiceError>;
}
