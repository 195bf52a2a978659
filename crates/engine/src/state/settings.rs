//! Engine settings

use serde::{Deserialize, Serialize};

use crate::units::DEFAULT_SNAP_THRESHOLD_PX;

/// Snap settings for placement and drag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapSettings {
    /// Enable horizontal snapping (shelf snapping always applies)
    pub enabled: bool,
    /// Snap X to the grid
    pub grid: bool,
    /// Pull items flush against shelf-mates
    pub adjacent: bool,
    /// Magnetism radius in pixels
    pub threshold_px: f64,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            grid: true,
            adjacent: true,
            threshold_px: DEFAULT_SNAP_THRESHOLD_PX,
        }
    }
}

impl SnapSettings {
    pub fn grid_active(&self) -> bool {
        self.enabled && self.grid
    }

    pub fn adjacent_active(&self) -> bool {
        self.enabled && self.adjacent
    }
}

/// When a drag of an existing item writes to the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitMode {
    /// Every valid pointer-move is committed immediately
    #[default]
    Continuous,
    /// Moves update a pending position, committed on pointer-up
    OnRelease,
}

/// Drag settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DragSettings {
    #[serde(default)]
    pub commit_mode: CommitMode,
}

/// Undo history settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of undo snapshots kept
    pub max_undo: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { max_undo: 100 }
    }
}

/// All engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EngineSettings {
    #[serde(default)]
    pub snap: SnapSettings,
    #[serde(default)]
    pub drag: DragSettings,
    #[serde(default)]
    pub history: HistorySettings,
}

impl EngineSettings {
    fn config_path() -> Option<std::path::PathBuf> {
        directories::ProjectDirs::from("com", "planogram", "planogram")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from the user config dir, or return default if not found
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            if let Ok(json) = std::fs::read_to_string(&path) {
                match Self::from_json(&json) {
                    Ok(settings) => return settings,
                    Err(e) => tracing::warn!("Ignoring invalid settings at {}: {e}", path.display()),
                }
            }
        }
        Self::default()
    }

    /// Parse settings from JSON; missing sections take their defaults
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid settings JSON: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = EngineSettings::default();
        assert!(s.snap.grid_active());
        assert!(s.snap.adjacent_active());
        assert_eq!(s.snap.threshold_px, 20.0);
        assert_eq!(s.drag.commit_mode, CommitMode::Continuous);
        assert_eq!(s.history.max_undo, 100);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s = EngineSettings::from_json(r#"{"drag": {"commit_mode": "on_release"}}"#).unwrap();
        assert_eq!(s.drag.commit_mode, CommitMode::OnRelease);
        assert_eq!(s.snap, SnapSettings::default());
    }

    #[test]
    fn test_disabled_snap_turns_off_both() {
        let snap = SnapSettings {
            enabled: false,
            ..SnapSettings::default()
        };
        assert!(!snap.grid_active());
        assert!(!snap.adjacent_active());
    }

    #[test]
    fn test_partial_snap_section() {
        let s = EngineSettings::from_json(r#"{"snap": {"threshold_px": 8.0}}"#).unwrap();
        assert_eq!(s.snap.threshold_px, 8.0);
        assert!(s.snap.grid_active());
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(EngineSettings::from_json("nope").is_err());
    }
}
