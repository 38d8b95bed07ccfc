//! Distance-triggered spawn scheduling
//!
//! A single cursor walks the records in source order. Records sharing a
//! trigger are released in the same pass. Once the cursor reaches the end the
//! scheduler either goes dormant or, if configured, keeps producing random
//! ground solids from a seeded RNG.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::script::LevelRecord;
use crate::consts::*;
use crate::settings::{ExhaustedPolicy, RunConfig};
use crate::sim::ObstacleKind;

#[derive(Debug, Clone)]
pub struct Scheduler {
    records: Vec<LevelRecord>,
    cursor: usize,
    policy: ExhaustedPolicy,
    rng: Pcg32,
    /// Ground surface y, for random solids
    ground_y: f32,
    /// Passes left before the next random solid (random policy only)
    random_cooldown: Option<u32>,
}

impl Scheduler {
    pub fn new(records: Vec<LevelRecord>, policy: ExhaustedPolicy, seed: u64, ground_y: f32) -> Self {
        Self {
            records,
            cursor: 0,
            policy,
            rng: Pcg32::seed_from_u64(seed),
            ground_y,
            random_cooldown: None,
        }
    }

    pub fn from_config(records: Vec<LevelRecord>, config: &RunConfig) -> Self {
        Self::new(records, config.exhausted_policy, config.seed, config.ground_y())
    }

    /// Release every record whose trigger has been reached, in script order
    pub fn pass(&mut self, world_distance: f32) -> Vec<LevelRecord> {
        let mut due = Vec::new();

        while let Some(record) = self.records.get(self.cursor) {
            if record.trigger > world_distance {
                break;
            }
            due.push(*record);
            self.cursor += 1;

            if self.cursor == self.records.len() {
                log::info!(
                    "All {} level records spawned at distance {}",
                    self.records.len(),
                    world_distance
                );
            }
        }

        if self.all_spawned()
            && let ExhaustedPolicy::RandomSolids {
                min_gap_ticks,
                max_gap_ticks,
            } = self.policy
            && let Some(record) = self.random_pass(world_distance, min_gap_ticks, max_gap_ticks)
        {
            due.push(record);
        }

        due
    }

    fn random_pass(&mut self, world_distance: f32, min_gap: u32, max_gap: u32) -> Option<LevelRecord> {
        let remaining = match self.random_cooldown {
            Some(ticks) => ticks,
            None => self.roll_gap(min_gap, max_gap),
        };
        if remaining > 0 {
            self.random_cooldown = Some(remaining - 1);
            return None;
        }

        self.random_cooldown = Some(self.roll_gap(min_gap, max_gap));
        let width = self.rng.random_range(RANDOM_MIN_WIDTH..=RANDOM_MAX_WIDTH) as f32;
        let height = self.rng.random_range(RANDOM_MIN_HEIGHT..=RANDOM_MAX_HEIGHT) as f32;
        log::debug!("Random solid {width}x{height} at distance {world_distance}");

        Some(LevelRecord {
            trigger: world_distance,
            width,
            height,
            y: self.ground_y - height,
            kind: ObstacleKind::Solid,
        })
    }

    fn roll_gap(&mut self, min_gap: u32, max_gap: u32) -> u32 {
        self.rng.random_range(min_gap..=max_gap.max(min_gap))
    }

    /// Every scripted record has been released
    pub fn all_spawned(&self) -> bool {
        self.cursor >= self.records.len()
    }

    /// Nothing more will ever be released
    pub fn is_dormant(&self) -> bool {
        self.all_spawned() && self.policy == ExhaustedPolicy::Dormant
    }

    pub fn spawned_count(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
