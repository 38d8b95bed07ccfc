//! Run state and the controller-facing input surface
//!
//! A `Run` owns everything a single attempt at a level touches: the player,
//! the live obstacles, the scheduler and the score/distance counters.

use serde::{Deserialize, Serialize};

use super::obstacle::{Obstacle, ObstacleKind};
use super::player::{Locomotion, Player};
use crate::level::{LevelRecord, LevelScript, Scheduler};
use crate::settings::RunConfig;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Active gameplay
    Running,
    /// Fatal hit; the death animation plays while everything is frozen
    Dying,
    /// Death animation finished
    GameOver,
    /// Script exhausted and every obstacle has left the field
    LevelComplete,
}

impl RunPhase {
    /// GameOver or LevelComplete
    pub fn is_finished(&self) -> bool {
        matches!(self, RunPhase::GameOver | RunPhase::LevelComplete)
    }
}

/// Notable things that happened during a tick, for audio/visual cues
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RunEvent {
    Spawned { id: u32, kind: ObstacleKind },
    /// Fatal contact with the given obstacle
    Hit { id: u32, kind: ObstacleKind },
    GameOver { score: u64 },
    LevelComplete { score: u64 },
}

#[derive(Debug, Clone)]
pub struct Run {
    pub config: RunConfig,
    /// The loaded level; the scheduler is rebuilt from it on reset
    script: LevelScript,
    scheduler: Scheduler,
    pub player: Player,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    pub phase: RunPhase,
    pub score: u64,
    pub world_distance: f32,
    pub final_level_distance: f32,
    /// Simulation tick counter (all phases)
    pub time_ticks: u64,
    /// Ticks left in the death animation
    pub death_ticks_remaining: u32,
    /// Set by `stop()`; ticks are ignored until `reset()`
    stopped: bool,
    events: Vec<RunEvent>,
    next_id: u32,
}

impl Run {
    pub fn new(config: RunConfig, script: LevelScript) -> Self {
        let scheduler = Scheduler::from_config(script.records.clone(), &config);
        let final_level_distance = script.final_distance(config.screen_width);
        log::info!(
            "New run: {} records, final distance {}, {:?}",
            script.len(),
            final_level_distance,
            config.locomotion
        );

        Self {
            player: Player::new(config.locomotion, &config),
            script,
            scheduler,
            obstacles: Vec::new(),
            phase: RunPhase::Running,
            score: 0,
            world_distance: 0.0,
            final_level_distance,
            time_ticks: 0,
            death_ticks_remaining: 0,
            stopped: false,
            events: Vec::new(),
            next_id: 1,
            config,
        }
    }

    /// Start over from the beginning of the same level
    pub fn reset(&mut self) {
        let config = self.config.clone();
        let script = std::mem::take(&mut self.script);
        *self = Self::new(config, script);
        log::info!("Run reset");
    }

    /// Abort the run: clears the field and ignores ticks until `reset()`
    pub fn stop(&mut self) {
        self.stopped = true;
        self.obstacles.clear();
        self.events.clear();
        log::info!("Run stopped at distance {}", self.world_distance);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Advance one fixed tick
    pub fn tick(&mut self) {
        super::tick::tick(self);
    }

    // === Input events ===

    pub fn jump_pressed(&mut self) {
        if self.phase != RunPhase::Running || self.stopped {
            return;
        }
        match self.player.locomotion() {
            Locomotion::Jumper => {
                self.player.set_jump_held(true);
                self.player.request_jump();
            }
            Locomotion::Floater => self.player.set_rise_intent(true),
        }
    }

    pub fn jump_released(&mut self) {
        match self.player.locomotion() {
            Locomotion::Jumper => self.player.set_jump_held(false),
            Locomotion::Floater => self.player.set_rise_intent(false),
        }
    }

    /// Restart, only once the run has finished
    pub fn restart(&mut self) {
        if self.phase.is_finished() || self.stopped {
            self.reset();
        }
    }

    /// Leave for the menu; the presenter switches scenes
    pub fn return_to_menu(&mut self) {
        self.stop();
    }

    // === Queries ===

    /// Percentage of the level travelled, pinned to 100 once complete
    pub fn completion(&self) -> f32 {
        if self.phase == RunPhase::LevelComplete {
            return 100.0;
        }
        if self.final_level_distance <= 0.0 {
            return 0.0;
        }
        (self.world_distance / self.final_level_distance * 100.0).min(100.0)
    }

    pub fn all_records_spawned(&self) -> bool {
        self.scheduler.all_spawned()
    }

    pub fn script(&self) -> &LevelScript {
        &self.script
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<RunEvent> {
        std::mem::take(&mut self.events)
    }

    // === Tick internals ===

    pub(crate) fn scheduler_mut(&mut self) -> &mut Scheduler {
        &mut self.scheduler
    }

    pub(crate) fn push_event(&mut self, event: RunEvent) {
        self.events.push(event);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Instantiate a record at its spawn position
    pub fn spawn_obstacle(&mut self, record: &LevelRecord) -> u32 {
        let id = self.next_entity_id();
        let obstacle = Obstacle::spawn(id, record, &self.config);
        log::debug!(
            "Spawned {} #{} at distance {}",
            record.kind.as_str(),
            id,
            self.world_distance
        );
        self.obstacles.push(obstacle);
        self.push_event(RunEvent::Spawned {
            id,
            kind: record.kind,
        });
        id
    }
}
