use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use facescreen_core::shared::constants::DEFAULT_SERVICE_URL;
use facescreen_core::shared::service_config::{ConfigError, ServiceConfig};
use facescreen_core::workflow::upload_stage::SubmitMode;

/// When the face mesh is extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadBehavior {
    /// Processing extracts, then predicts.
    ExtractDuringProcessing,
    /// The upload screen extracts before moving on.
    ExtractOnUpload,
}

impl UploadBehavior {
    pub const ALL: &[UploadBehavior] = &[
        UploadBehavior::ExtractDuringProcessing,
        UploadBehavior::ExtractOnUpload,
    ];

    pub fn submit_mode(self) -> SubmitMode {
        match self {
            UploadBehavior::ExtractDuringProcessing => SubmitMode::Forward,
            UploadBehavior::ExtractOnUpload => SubmitMode::ExtractFirst,
        }
    }
}

impl std::fmt::Display for UploadBehavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadBehavior::ExtractDuringProcessing => write!(f, "During processing"),
            UploadBehavior::ExtractOnUpload => write!(f, "On upload"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    System,
    Dark,
    Light,
}

impl Appearance {
    pub const ALL: &[Appearance] = &[Appearance::System, Appearance::Dark, Appearance::Light];
}

impl std::fmt::Display for Appearance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Appearance::System => write!(f, "System"),
            Appearance::Dark => write!(f, "Dark"),
            Appearance::Light => write!(f, "Light"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub service_url: String,
    /// Per-request timeout; 0 disables it.
    pub timeout_secs: u32,
    pub upload_behavior: UploadBehavior,
    /// Skip the service and always report a positive result.
    pub simulate: bool,
    pub appearance: Appearance,
    pub high_contrast: bool,
    pub font_scale: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            timeout_secs: 30,
            upload_behavior: UploadBehavior::ExtractDuringProcessing,
            simulate: false,
            appearance: Appearance::System,
            high_contrast: false,
            font_scale: 1.0,
        }
    }
}

impl Settings {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("FaceScreen").join("settings.json"))
    }

    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Missing or unreadable files fall back to defaults.
    pub fn load_from(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default()
    }

    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            self.save_to(&path);
        }
    }

    pub fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(path, json) {
                    log::warn!("Could not save settings to {}: {e}", path.display());
                }
            }
            Err(e) => log::warn!("Could not serialize settings: {e}"),
        }
    }

    pub fn service_config(&self) -> Result<ServiceConfig, ConfigError> {
        let config = ServiceConfig::new(self.service_url.trim())?;
        Ok(if self.timeout_secs > 0 {
            config.with_timeout(Duration::from_secs(u64::from(self.timeout_secs)))
        } else {
            config
        })
    }

    pub fn submit_mode(&self) -> SubmitMode {
        if self.simulate {
            SubmitMode::Forward
        } else {
            self.upload_behavior.submit_mode()
        }
    }

    /// Put the service options back to their defaults, keeping appearance.
    pub fn restore_service_defaults(&mut self) {
        let defaults = Settings::default();
        self.service_url = defaults.service_url;
        self.timeout_secs = defaults.timeout_secs;
        self.upload_behavior = defaults.upload_behavior;
        self.simulate = defaults.simulate;
    }
}
