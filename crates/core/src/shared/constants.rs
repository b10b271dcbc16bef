use std::time::Duration;

pub const DEFAULT_SERVICE_URL: &str = "http://localhost:5000";
pub const EXTRACT_FACE_MESH_PATH: &str = "/extract-face-mesh";
pub const PREDICT_PATH: &str = "/predict-autism";

/// Multipart field the extraction endpoint reads the photo from.
pub const IMAGE_FIELD_NAME: &str = "image";

/// How long the simulated processing screen waits before reporting.
pub const SIMULATED_PROCESSING_DELAY: Duration = Duration::from_secs(3);

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif", "tiff", "tif", "webp"];

pub const INSTRUCTION_SLIDE_COUNT: usize = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_delay_is_three_seconds() {
        assert_eq!(SIMULATED_PROCESSING_DELAY, Duration::from_secs(3));
    }
}
