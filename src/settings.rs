//! Engine settings
//!
//! Persisted as JSON next to the demo driver. Missing fields take their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Failure to read or write a settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Could not access settings file `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid setting `{field}`: {value}")]
    Invalid { field: &'static str, value: String },
}

fn check(field: &'static str, value: impl ToString, ok: bool) -> Result<(), SettingsError> {
    if ok {
        Ok(())
    } else {
        Err(SettingsError::Invalid {
            field,
            value: value.to_string(),
        })
    }
}

/// Engine tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Stepping ===
    /// Fixed simulation timestep (seconds)
    pub sim_dt: f64,
    /// Maximum fixed steps run per frame
    pub max_substeps: u32,

    // === Body defaults ===
    /// Rotation bound applied to bodies added through the scene
    pub default_max_rotation: f64,
    /// Per-axis velocity cap applied to bodies added through the scene
    pub default_max_velocity: f64,

    // === Forces ===
    /// Centroid distance below which Newtonian gravity is skipped
    pub gravity_min_distance: f64,

    // === Registries ===
    pub initial_body_capacity: usize,
    pub initial_creator_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sim_dt: SIM_DT,
            max_substeps: MAX_SUBSTEPS,

            default_max_rotation: DEFAULT_MAX_ROTATION,
            default_max_velocity: DEFAULT_MAX_VELOCITY,

            gravity_min_distance: GRAVITY_MIN_DISTANCE,

            initial_body_capacity: INITIAL_BODY_CAPACITY,
            initial_creator_capacity: INITIAL_CREATOR_CAPACITY,
        }
    }
}

impl Settings {
    /// Reject values the stepper and scene cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        check("sim_dt", self.sim_dt, self.sim_dt.is_finite() && self.sim_dt > 0.0)?;
        check("max_substeps", self.max_substeps, self.max_substeps > 0)?;
        check(
            "default_max_rotation",
            self.default_max_rotation,
            self.default_max_rotation >= 0.0,
        )?;
        check(
            "default_max_velocity",
            self.default_max_velocity,
            self.default_max_velocity > 0.0,
        )?;
        check(
            "gravity_min_distance",
            self.gravity_min_distance,
            self.gravity_min_distance >= 0.0,
        )?;
        Ok(())
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize settings to pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file is missing or invalid
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
