//! Arcade Physics - a small 2D rigid-body engine for arcade games
//!
//! Core modules:
//! - `sim`: Deterministic simulation (vectors, polygons, bodies, SAT, scene tick)
//! - `settings`: Engine tuning loaded from JSON
//! - `color`: Display color carried by every body

pub mod color;
pub mod settings;
pub mod sim;

pub use color::Color;
pub use settings::{Settings, SettingsError};

/// Engine configuration constants
pub mod consts {
    /// Default fixed step for `FixedStepper` (seconds)
    pub const SIM_DT: f64 = 1.0 / 120.0;
    /// Default cap on scene ticks run for a single frame
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta the stepper will accept in one call (seconds)
    pub const MAX_FRAME_DT: f64 = 0.1;

    /// Default rotation bound for new bodies (radians, cumulative)
    pub const DEFAULT_MAX_ROTATION: f64 = 360.0;
    /// Default per-axis velocity cap for new bodies
    pub const DEFAULT_MAX_VELOCITY: f64 = f64::MAX;

    /// Newtonian gravity is ignored for centroids closer than this
    pub const GRAVITY_MIN_DISTANCE: f64 = 100.0;

    /// Initial registry capacities
    pub const INITIAL_BODY_CAPACITY: usize = 100;
    pub const INITIAL_CREATOR_CAPACITY: usize = 2;
}
