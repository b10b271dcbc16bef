use crate::detection::domain::landmark_payload::LandmarkPayload;
use crate::shared::selected_image::SelectedImage;
use crate::shared::service_error::ServiceError;

/// Domain interface for turning a photo into a face mesh.
///
/// One call is one request: implementations never retry.
pub trait FaceMeshExtractor: Send {
    fn extract(&self, image: &SelectedImage) -> Result<LandmarkPayload, ServiceError>;
}
