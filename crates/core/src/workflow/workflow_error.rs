use thiserror::Error;

use crate::shared::service_error::ServiceError;

pub const INPUT_MISSING: &str = "No photo was provided. Please choose a photo and try again.";
pub const NO_FACE_DETECTED: &str =
    "We could not detect a face in the photo. Please try again with another photo.";
pub const PREDICTION_DECLINED: &str = "The service could not analyze this photo. Please try again.";
pub const COMMUNICATION_ERROR: &str =
    "A communication error occurred. Please check your connection and try again.";

/// Why a workflow run ended without a classification.
///
/// Every variant is terminal: nothing is retried automatically.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorkflowError {
    #[error("no photo or face mesh to process")]
    InputMissing,
    /// The service answered `success: false`. Holds the user-facing reason.
    #[error("service rejected the request: {0}")]
    ServiceRejected(String),
    /// Non-2xx status, unreachable service or an unreadable response.
    /// Holds diagnostic detail that is logged but never shown.
    #[error("transport failure: {0}")]
    TransportFailure(String),
}

impl WorkflowError {
    pub fn from_extraction(err: ServiceError) -> Self {
        match err {
            ServiceError::Rejected { .. } => {
                WorkflowError::ServiceRejected(NO_FACE_DETECTED.to_string())
            }
            other => WorkflowError::TransportFailure(other.to_string()),
        }
    }

    pub fn from_prediction(err: ServiceError) -> Self {
        match err {
            ServiceError::Rejected { message } => WorkflowError::ServiceRejected(
                message.unwrap_or_else(|| PREDICTION_DECLINED.to_string()),
            ),
            other => WorkflowError::TransportFailure(other.to_string()),
        }
    }

    /// Plain-language text for the user.
    pub fn user_message(&self) -> &str {
        match self {
            WorkflowError::InputMissing => INPUT_MISSING,
            WorkflowError::ServiceRejected(reason) => reason,
            WorkflowError::TransportFailure(_) => COMMUNICATION_ERROR,
        }
    }
}
