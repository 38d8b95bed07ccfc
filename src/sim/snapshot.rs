//! Read-only view of a run for presenters
//!
//! Everything a renderer needs for one frame, detached from the live state so
//! it can be handed across a boundary or serialized as JSON.

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::obstacle::ObstacleKind;
use super::player::{Locomotion, Pose};
use super::state::{Run, RunPhase};
use crate::settings::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub rect: Rect,
    pub locomotion: Locomotion,
    pub pose: Pose,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: u32,
    pub kind: ObstacleKind,
    pub rect: Rect,
    /// Timed hazards only: false while telegraphing
    pub armed: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: RunPhase,
    pub score: u64,
    pub completion: f32,
    /// Drives background parallax
    pub world_distance: f32,
    pub all_records_spawned: bool,
    pub theme: Theme,
    pub player: PlayerView,
    pub obstacles: Vec<ObstacleView>,
}

impl Snapshot {
    pub fn capture(run: &Run) -> Self {
        Self {
            phase: run.phase,
            score: run.score,
            completion: run.completion(),
            world_distance: run.world_distance,
            all_records_spawned: run.all_records_spawned(),
            theme: run.config.theme,
            player: PlayerView {
                rect: run.player.rect(),
                locomotion: run.player.locomotion(),
                pose: run.player.pose(),
            },
            obstacles: run
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    id: o.id,
                    kind: o.kind(),
                    rect: o.rect,
                    armed: o.armed(),
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Run {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }
}
