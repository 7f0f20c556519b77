use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, WorkspaceError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub labels: LabelsConfig,
}

/// Gesture thresholds, in normalized content units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Minimum box side length; releases below this are accidental clicks.
    #[serde(default = "default_min_drag")]
    pub min_drag: f32,
    /// Distance from the first vertex at which a click closes a polygon.
    #[serde(default = "default_close_radius")]
    pub close_radius: f32,
    /// Hit radius for selecting 3D anchors.
    #[serde(default = "default_anchor_hit_radius")]
    pub anchor_hit_radius: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Visit items in random order instead of list order.
    #[serde(default = "default_false")]
    pub shuffle_items: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelsConfig {
    /// Explicit label schema file, overriding the search chain.
    pub schema_file: Option<String>,
}

fn default_min_drag() -> f32 {
    0.005
}

fn default_close_radius() -> f32 {
    0.02
}

fn default_anchor_hit_radius() -> f32 {
    0.03
}

fn default_false() -> bool {
    false
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            min_drag: default_min_drag(),
            close_radius: default_close_radius(),
            anchor_hit_radius: default_anchor_hit_radius(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            shuffle_items: false,
        }
    }
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self { schema_file: None }
    }
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            input: InputConfig::default(),
            session: SessionConfig::default(),
            labels: LabelsConfig::default(),
        }
    }
}

/// Path of the user config file.
pub fn config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "labelbench")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Load configuration from the user config dir, falling back to defaults on
/// any error. A broken config file never keeps the workspace from opening.
pub fn load_config() -> WorkspaceConfig {
    let Some(path) = config_path() else {
        return WorkspaceConfig::default();
    };
    if !path.exists() {
        return WorkspaceConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unparsable config, using defaults");
                WorkspaceConfig::default()
            }
        },
        Err(e) => {
            warn!(path = %path.display(), error = %e, "unreadable config, using defaults");
            WorkspaceConfig::default()
        }
    }
}

/// Save configuration to the user config dir.
pub fn save_config(config: &WorkspaceConfig) -> Result<()> {
    let path = config_path()
        .ok_or_else(|| WorkspaceError::Config("no config directory available".into()))?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml = toml::to_string_pretty(config)
        .map_err(|e| WorkspaceError::Config(format!("serialize: {e}")))?;
    std::fs::write(&path, toml)?;
    Ok(())
}
