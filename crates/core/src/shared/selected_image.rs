use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use thiserror::Error;

use crate::shared::constants::IMAGE_EXTENSIONS;

#[derive(Error, Debug)]
pub enum SelectImageError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0} is empty")]
    Empty(PathBuf),
    #[error("{0} is not a supported image")]
    Unsupported(PathBuf),
}

/// A photo chosen by the user, held in memory until it is submitted.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedImage {
    file_name: String,
    mime_type: String,
    bytes: Vec<u8>,
}

impl SelectedImage {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Load a photo from disk.
    ///
    /// The format is sniffed from the file contents first; when that fails
    /// the extension decides, so the service gets the final say on files a
    /// decoder here doesn't recognise.
    pub fn from_path(path: &Path) -> Result<Self, SelectImageError> {
        let bytes = fs::read(path).map_err(|e| SelectImageError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        if bytes.is_empty() {
            return Err(SelectImageError::Empty(path.to_path_buf()));
        }

        let format = image::guess_format(&bytes)
            .ok()
            .or_else(|| format_from_extension(path))
            .ok_or_else(|| SelectImageError::Unsupported(path.to_path_buf()))?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "photo".to_string());

        log::debug!(
            "Selected {file_name} ({}, {} bytes)",
            format.to_mime_type(),
            bytes.len()
        );
        Ok(Self::new(file_name, format.to_mime_type(), bytes))
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Keep the raw bytes out of debug output and logs.
impl fmt::Debug for SelectedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedImage")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Whether `path` has one of the accepted photo extensions.
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn format_from_extension(path: &Path) -> Option<ImageFormat> {
    if !is_image_path(path) {
        return None;
    }
    ImageFormat::from_path(path).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0, 0, 0x0d];

    #[test]
    fn test_from_path_sniffs_png_regardless_of_extension() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("upload.bin");
        fs::write(&path, PNG_HEADER).unwrap();

        let image = SelectedImage::from_path(&path).unwrap();
        assert_eq!(image.mime_type(), "image/png");
        assert_eq!(image.file_name(), "upload.bin");
        assert_eq!(image.bytes(), PNG_HEADER);
    }

    #[test]
    fn test_from_path_falls_back_to_extension() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("photo.jpg");
        fs::write(&path, b"not really a jpeg").unwrap();

        let image = SelectedImage::from_path(&path).unwrap();
        assert_eq!(image.mime_type(), "image/jpeg");
        assert_eq!(image.file_name(), "photo.jpg");
    }

    #[test]
    fn test_from_path_rejects_unknown_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("notes.txt");
        fs::write(&path, b"hello").unwrap();

        let err = SelectedImage::from_path(&path).unwrap_err();
        assert!(matches!(err, SelectImageError::Unsupported(_)));
    }

    #[test]
    fn test_from_path_rejects_empty_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("photo.png");
        fs::write(&path, b"").unwrap();

        let err = SelectedImage::from_path(&path).unwrap_err();
        assert!(matches!(err, SelectImageError::Empty(_)));
    }

    #[test]
    fn test_from_path_missing_file_is_read_error() {
        let tmp = TempDir::new().unwrap();
        let err = SelectedImage::from_path(&tmp.path().join("gone.png")).unwrap_err();
        assert!(matches!(err, SelectImageError::Read { .. }));
    }

    #[test]
    fn test_debug_omits_bytes() {
        let image = SelectedImage::new("photo.jpg", "image/jpeg", vec![1, 2, 3]);
        let debug = format!("{image:?}");
        assert!(debug.contains("photo.jpg"));
        assert!(debug.contains("len: 3"));
        assert!(!debug.contains("[1, 2, 3]"));
    }

    #[rstest]
    #[case("photo.JPG", true)]
    #[case("photo.webp", true)]
    #[case("scan.tif", true)]
    #[case("clip.mp4", false)]
    #[case("no_extension", false)]
    fn test_is_image_path(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_image_path(Path::new(name)), expected);
    }
}
