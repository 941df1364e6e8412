use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_FRAME_WIDTH, EAR_CLOSED_THRESHOLD, EYE_HOLD_MS,
    GLOBAL_DEBOUNCE_MS, HAND_COOLDOWN_MS, HAND_STABILITY_MS, POINTING_COOLDOWN_MS,
    POINTING_MIN_OFFSET,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Tunable thresholds and timing windows for one engine.
///
/// Missing fields fall back to their defaults, so a config file only
/// needs to name what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub ear_closed_threshold: f64,
    pub eye_hold_ms: u64,
    pub hand_stability_ms: u64,
    pub hand_cooldown_ms: u64,
    pub pointing_min_offset: f64,
    pub pointing_cooldown_ms: u64,
    pub global_debounce_ms: u64,
    pub default_frame_width: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ear_closed_threshold: EAR_CLOSED_THRESHOLD,
            eye_hold_ms: EYE_HOLD_MS,
            hand_stability_ms: HAND_STABILITY_MS,
            hand_cooldown_ms: HAND_COOLDOWN_MS,
            pointing_min_offset: POINTING_MIN_OFFSET,
            pointing_cooldown_ms: POINTING_COOLDOWN_MS,
            global_debounce_ms: GLOBAL_DEBOUNCE_MS,
            default_frame_width: DEFAULT_FRAME_WIDTH,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Per-user config file location, if the platform has a config dir.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Loads the per-user config, falling back to defaults when it is
    /// missing or unreadable.
    pub fn load_or_default() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        match Self::load(&path) {
            Ok(config) => config,
            Err(ConfigError::Read { .. }) => Self::default(),
            Err(e) => {
                log::warn!("Ignoring {}: {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.ear_closed_threshold > 0.0 && self.ear_closed_threshold.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "ear_closed_threshold must be positive, got {}",
                self.ear_closed_threshold
            )));
        }
        if !(self.pointing_min_offset > 0.0 && self.pointing_min_offset < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "pointing_min_offset must be between 0.0 and 1.0 (exclusive), got {}",
                self.pointing_min_offset
            )));
        }
        if self.default_frame_width == 0 {
            return Err(ConfigError::Invalid(
                "default_frame_width must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
