use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use facescan_core::detection::domain::detection_params::DetectionParams;
use facescan_core::shared::constants::DEFAULT_EXAMPLES_DIR;

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
            Appearance::System => write!(f, "Sistema"),
            Appearance::Dark => write!(f, "Escuro"),
            Appearance::Light => write!(f, "Claro"),
        }
    }
}

const FONT_SCALE_RANGE: (f32, f32) = (0.8, 1.5);

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub scale_factor: f64,
    pub min_neighbors: u32,
    pub min_size: u32,
    pub examples_dir: PathBuf,
    pub appearance: Appearance,
    pub high_contrast: bool,
    pub font_scale: f32,
}

impl Default for Settings {
    fn default() -> Self {
        let params = DetectionParams::default();
        Self {
            scale_factor: params.scale_factor,
            min_neighbors: params.min_neighbors,
            min_size: params.min_size,
            examples_dir: PathBuf::from(DEFAULT_EXAMPLES_DIR),
            appearance: Appearance::System,
            high_contrast: false,
            font_scale: 1.0,
        }
    }
}

impl Settings {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("FaceScan").join("settings.json"))
    }

    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            self.save_to(&path);
        }
    }

    fn load_from(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|json| serde_json::from_str::<Settings>(&json).ok())
            .map(Settings::sanitized)
            .unwrap_or_default()
    }

    fn save_to(&self, path: &Path) {
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

    /// Scan parameters as last set, pulled into the control panel bounds.
    pub fn params(&self) -> DetectionParams {
        DetectionParams {
            scale_factor: self.scale_factor,
            min_neighbors: self.min_neighbors,
            min_size: self.min_size,
        }
        .clamped()
    }

    pub fn set_params(&mut self, params: DetectionParams) {
        let params = params.clamped();
        self.scale_factor = params.scale_factor;
        self.min_neighbors = params.min_neighbors;
        self.min_size = params.min_size;
    }

    /// Hand-edited files may carry anything; bring every value back in range.
    fn sanitized(mut self) -> Self {
        self.set_params(self.params());
        let (lo, hi) = FONT_SCALE_RANGE;
        self.font_scale = if self.font_scale.is_finite() {
            self.font_scale.clamp(lo, hi)
        } else {
            1.0
        };
        self
    }
}
