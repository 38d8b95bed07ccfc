//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed ticks only (no wall-clock time)
//! - Seeded RNG only
//! - Stable iteration order (obstacles in spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod obstacle;
pub mod player;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Rect, platform_contact, solid_hit, strike_hit};
pub use obstacle::{Behavior, Contact, Obstacle, ObstacleKind};
pub use player::{Locomotion, Player, PlayerPhysics, Pose};
pub use snapshot::{ObstacleView, PlayerView, Snapshot};
pub use state::{Run, RunEvent, RunPhase};
pub use tick::tick;
