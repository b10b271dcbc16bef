use std::time::Instant;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;

use crate::detection::domain::face_mesh_extractor::FaceMeshExtractor;
use crate::detection::domain::landmark_payload::LandmarkPayload;
use crate::shared::constants::IMAGE_FIELD_NAME;
use crate::shared::selected_image::SelectedImage;
use crate::shared::service_config::{ConfigError, ServiceConfig};
use crate::shared::service_envelope::read_envelope;
use crate::shared::service_error::ServiceError;

/// Posts the photo as multipart form data to `/extract-face-mesh`.
pub struct HttpFaceMeshExtractor {
    client: Client,
    url: String,
}

impl HttpFaceMeshExtractor {
    pub fn new(config: &ServiceConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_client(config.build_client()?, config))
    }

    pub fn with_client(client: Client, config: &ServiceConfig) -> Self {
        Self {
            client,
            url: config.extract_url(),
        }
    }
}

impl FaceMeshExtractor for HttpFaceMeshExtractor {
    fn extract(&self, image: &SelectedImage) -> Result<LandmarkPayload, ServiceError> {
        let part = Part::bytes(image.bytes().to_vec())
            .file_name(image.file_name().to_string())
            .mime_str(image.mime_type())
            .map_err(|e| ServiceError::transport(&self.url, &e))?;
        let form = Form::new().part(IMAGE_FIELD_NAME, part);

        log::debug!("POST {} ({} bytes)", self.url, image.len());
        let start = Instant::now();
        let response = self.client.post(&self.url).multipart(form).send();
        let envelope = read_envelope(&self.url, response)?;

        let mesh = envelope
            .face_mesh
            .ok_or_else(|| ServiceError::malformed(&self.url, "missing faceMesh"))?;
        let payload =
            LandmarkPayload::from_value(mesh).map_err(|r| ServiceError::malformed(&self.url, r))?;

        match payload.point_count() {
            Some(n) => log::info!(
                "Face mesh received: {n} landmarks in {:.0}ms",
                start.elapsed().as_secs_f64() * 1000.0
            ),
            None => log::info!("Face mesh received"),
        }
        Ok(payload)
    }
}
