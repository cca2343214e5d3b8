//! Viewer settings

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Which stepping guards the legs use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompatMode {
    /// All four legs step identically
    #[default]
    Normalized,
    /// Legs step as in the first release of the viewer. Front-left Y/Z steps
    /// skip the Lower segment and move the Paw twice, and the front-left
    /// Upper decrement guard is narrower on X and Z. The rear-right Paw Z
    /// guard checks its lower bound against the rear-right Upper Z angle.
    Legacy,
}

impl CompatMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            CompatMode::Normalized => "Normalized",
            CompatMode::Legacy => "Legacy",
        }
    }
}

/// Sphere resolution used when compiling cached geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tessellation {
    /// Subdivisions around the Z axis
    pub slices: u32,
    /// Subdivisions along the Z axis
    pub stacks: u32,
}

impl Default for Tessellation {
    fn default() -> Self {
        Self {
            slices: 36,
            stacks: 18,
        }
    }
}

/// All viewer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerSettings {
    #[serde(default)]
    pub compat: CompatMode,
    #[serde(default)]
    pub tessellation: Tessellation,
    /// Model colour (RGB, 0..1), set before the body is drawn
    #[serde(default = "default_body_color")]
    pub body_color: [f32; 3],
}

fn default_body_color() -> [f32; 3] {
    shared::MODEL_COLOR
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            compat: CompatMode::default(),
            tessellation: Tessellation::default(),
            body_color: default_body_color(),
        }
    }
}

impl ViewerSettings {
    /// Default settings file location
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "dog-viewer", "dog-viewer")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from the default location, or return defaults if not found
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Self::default(),
        }
    }

    /// Load settings from `path`, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        match Self::try_load_from(path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    pub fn try_load_from(path: &Path) -> Result<Self, String> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read settings {}: {e}", path.display()))?;
        serde_json::from_str(&json)
            .map_err(|e| format!("Invalid settings {}: {e}", path.display()))
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<(), String> {
        let path = Self::config_path().ok_or("No config directory available")?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        std::fs::write(path, json).map_err(|e| format!("Failed to write {}: {e}", path.display()))
    }
}
