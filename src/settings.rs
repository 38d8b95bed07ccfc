//! Run configuration and level presets
//!
//! Every tunable the simulation reads lives in [`RunConfig`]. It is threaded
//! into the run at construction, so two runs in the same process never share
//! mutable configuration.

use std::path::Path;

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{Locomotion, ObstacleKind};

/// Art variant for a run. Presenters pick sprites from it; the core only carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    #[default]
    Classic,
    Night,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Classic => "Classic",
            Theme::Night => "Night",
        }
    }

    /// Sprite asset for an obstacle kind under this theme
    pub fn obstacle_sprite(&self, kind: ObstacleKind) -> &'static str {
        match (self, kind) {
            (Theme::Classic, ObstacleKind::Solid) => "picture/regular.jpg",
            (Theme::Night, ObstacleKind::Solid) => "picture/regular2.jpg",
            (Theme::Classic, ObstacleKind::Platform) => "picture/platform.png",
            (Theme::Night, ObstacleKind::Platform) => "picture/platform2.png",
            (_, ObstacleKind::TimedHazard) => "picture/lemon.png",
        }
    }

    /// Background image for this theme
    pub fn background(&self) -> &'static str {
        match self {
            Theme::Classic => "picture/bg.jpg",
            Theme::Night => "picture/bg2.jpg",
        }
    }
}

/// What the scheduler does once every scripted record has spawned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExhaustedPolicy {
    /// Spawn nothing more; the level completes once the field is clear
    #[default]
    Dormant,
    /// Keep spawning ground solids of random size every `min..=max` ticks.
    /// A run with this policy never completes.
    RandomSolids { min_gap_ticks: u32, max_gap_ticks: u32 },
}

/// The shipped levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LevelPreset {
    #[default]
    Level1,
    Level2,
}

impl LevelPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            LevelPreset::Level1 => "level1",
            LevelPreset::Level2 => "level2",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "level1" | "1" => Some(LevelPreset::Level1),
            "level2" | "2" => Some(LevelPreset::Level2),
            _ => None,
        }
    }

    /// Script file shipped for this level, relative to the crate root
    pub fn script_path(&self) -> &'static str {
        match self {
            LevelPreset::Level1 => "levels/level1.txt",
            LevelPreset::Level2 => "levels/level2.txt",
        }
    }

    /// Level 1 is a jumping run, level 2 a floating one at night
    pub fn config(&self) -> RunConfig {
        match self {
            LevelPreset::Level1 => RunConfig::default(),
            LevelPreset::Level2 => RunConfig {
                locomotion: Locomotion::Floater,
                theme: Theme::Night,
                ..RunConfig::default()
            },
        }
    }
}

/// Run tunables (all distances in pixels, all durations in ticks)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,
    /// Height of the ground strip below the play field
    pub ground_margin: f32,

    // === Player ===
    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub locomotion: Locomotion,
    pub gravity: f32,
    /// Upward (negative) velocity applied by a jump
    pub jump_impulse: f32,
    pub floater_speed: f32,

    // === World ===
    pub world_speed: f32,
    pub solid_bottom_tolerance: f32,
    pub hazard_countdown_ticks: i32,
    /// Countdown value below which a timed hazard is dropped unevaluated
    pub hazard_expiry_ticks: i32,
    pub death_animation_ticks: u32,

    // === Level ===
    pub theme: Theme,
    pub exhausted_policy: ExhaustedPolicy,
    /// Seed for the random spawn policy
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            ground_margin: GROUND_MARGIN,

            player_x: PLAYER_X,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            locomotion: Locomotion::Jumper,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            floater_speed: FLOATER_SPEED,

            world_speed: WORLD_SPEED,
            solid_bottom_tolerance: SOLID_BOTTOM_TOLERANCE,
            hazard_countdown_ticks: HAZARD_COUNTDOWN_TICKS,
            hazard_expiry_ticks: HAZARD_EXPIRY_TICKS,
            death_animation_ticks: DEATH_ANIMATION_TICKS,

            theme: Theme::Classic,
            exhausted_policy: ExhaustedPolicy::Dormant,
            seed: 0,
        }
    }
}

impl RunConfig {
    /// Screen y of the ground surface
    pub fn ground_y(&self) -> f32 {
        self.screen_height - self.ground_margin
    }

    /// Player's top edge when standing on the ground (the lowest legal y)
    pub fn ground_level(&self) -> f32 {
        self.ground_y() - self.player_height
    }

    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("parse run config json")
    }

    /// Apply a JSON object on top of this config. Fields present in the JSON
    /// win; every other field keeps its current value.
    pub fn overlay_json(&self, json: &str) -> anyhow::Result<Self> {
        let overlay: serde_json::Value =
            serde_json::from_str(json).context("parse run config json")?;
        let serde_json::Value::Object(fields) = overlay else {
            bail!("run config json must be an object");
        };
        let mut merged = serde_json::to_value(self).context("serialize run config")?;
        if let serde_json::Value::Object(base) = &mut merged {
            base.extend(fields);
        }
        serde_json::from_value(merged).context("parse run config json")
    }

    /// Load a JSON config file over the defaults
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        Self::default().load_over(path)
    }

    /// Load a JSON config file over this config (e.g. a level preset)
    pub fn load_over(&self, path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read run config: {}", path.display()))?;
        let config = self.overlay_json(&json)?;
        log::info!("Loaded run config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("serialize run config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ground_level() {
        let config = RunConfig::default();
        assert_eq!(config.ground_y(), 250.0);
        assert_eq!(config.ground_level(), 190.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = RunConfig::from_json(r#"{ "world_speed": 12.0, "locomotion": "Floater" }"#)
            .expect("valid config");
        assert_eq!(config.world_speed, 12.0);
        assert_eq!(config.locomotion, Locomotion::Floater);
        assert_eq!(config.jump_impulse, JUMP_IMPULSE);
        assert_eq!(config.exhausted_policy, ExhaustedPolicy::Dormant);
    }

    #[test]
    fn test_random_policy_json() {
        let config = RunConfig::from_json(
            r#"{ "exhausted_policy": { "kind": "random_solids", "min_gap_ticks": 60, "max_gap_ticks": 120 } }"#,
        )
        .expect("valid config");
        assert_eq!(
            config.exhausted_policy,
            ExhaustedPolicy::RandomSolids {
                min_gap_ticks: 60,
                max_gap_ticks: 120
            }
        );
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(RunConfig::from_json("{ world_speed: }").is_err());
        assert!(RunConfig::default().overlay_json("[1, 2]").is_err());
    }

    #[test]
    fn test_overlay_keeps_preset_fields() {
        let config = LevelPreset::Level2
            .config()
            .overlay_json(r#"{ "world_speed": 12.0, "seed": 9 }"#)
            .expect("valid overlay");
        assert_eq!(config.world_speed, 12.0);
        assert_eq!(config.seed, 9);
        assert_eq!(config.locomotion, Locomotion::Floater);
        assert_eq!(config.theme, Theme::Night);
    }

    #[test]
    fn test_load_over_file() {
        let path = std::env::temp_dir().join(format!("dino-dash-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "theme": "Classic" }"#).expect("write temp config");
        let config = LevelPreset::Level2.config().load_over(&path);
        let _ = std::fs::remove_file(&path);
        let config = config.expect("readable config");
        assert_eq!(config.theme, Theme::Classic);
        assert_eq!(config.locomotion, Locomotion::Floater);
    }

    #[test]
    fn test_presets() {
        assert_eq!(LevelPreset::from_str("LEVEL2"), Some(LevelPreset::Level2));
        assert_eq!(LevelPreset::from_str("3"), None);

        let level2 = LevelPreset::Level2.config();
        assert_eq!(level2.locomotion, Locomotion::Floater);
        assert_eq!(level2.theme, Theme::Night);
        assert_eq!(LevelPreset::Level1.config().locomotion, Locomotion::Jumper);
    }

    #[test]
    fn test_theme_sprites() {
        assert_eq!(
            Theme::Night.obstacle_sprite(ObstacleKind::Platform),
            "picture/platform2.png"
        );
        assert_eq!(
            Theme::Classic.obstacle_sprite(ObstacleKind::TimedHazard),
            Theme::Night.obstacle_sprite(ObstacleKind::TimedHazard)
        );
    }
}
