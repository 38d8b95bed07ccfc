//! Dino Dash - a side-scrolling obstacle runner
//!
//! Core modules:
//! - `sim`: Deterministic run simulation (player physics, obstacles, run state machine)
//! - `level`: Level script parsing, spawn scheduling and static previews
//! - `settings`: Data-driven run configuration and level presets

pub mod level;
pub mod settings;
pub mod sim;

pub use level::{LevelPreview, LevelRecord, LevelScript, Scheduler};
pub use settings::{ExhaustedPolicy, LevelPreset, RunConfig, Theme};
pub use sim::{Run, RunPhase, Snapshot};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (one tick per 60 Hz frame)
    pub const SIM_HZ: u32 = 60;
    pub const SIM_DT: f32 = 1.0 / SIM_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 300.0;
    /// Height of the ground strip at the bottom of the screen
    pub const GROUND_MARGIN: f32 = 50.0;

    /// Player box (x never changes)
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;

    /// Scroll speed shared by the world and every scrolling obstacle (pixels/tick)
    pub const WORLD_SPEED: f32 = 10.0;

    /// Jumper locomotion (pixels/tick, pixels/tick²)
    pub const GRAVITY: f32 = 1.5;
    pub const JUMP_IMPULSE: f32 = -18.0;
    /// Floater locomotion (pixels/tick)
    pub const FLOATER_SPEED: f32 = 10.0;

    /// Solid hits ignore this much of the player's bottom edge
    pub const SOLID_BOTTOM_TOLERANCE: f32 = 10.0;

    /// Timed hazard telegraph length, and how far past zero it may linger
    pub const HAZARD_COUNTDOWN_TICKS: i32 = 150;
    pub const HAZARD_EXPIRY_TICKS: i32 = -10;

    /// Death animation (0.5s at 60 Hz)
    pub const DEATH_ANIMATION_TICKS: u32 = 30;

    /// Level preview camera step
    pub const PREVIEW_CAMERA_SPEED: f32 = 20.0;

    /// Random solid size ranges (only used by `ExhaustedPolicy::RandomSolids`)
    pub const RANDOM_MIN_WIDTH: u32 = 20;
    pub const RANDOM_MAX_WIDTH: u32 = 40;
    pub const RANDOM_MIN_HEIGHT: u32 = 30;
    pub const RANDOM_MAX_HEIGHT: u32 = 60;
}
