//! Obstacle kinds and their per-kind collision responses

use serde::{Deserialize, Serialize};

use super::collision::{Rect, platform_contact, solid_hit, strike_hit};
use super::player::Player;
use crate::level::LevelRecord;
use crate::settings::{RunConfig, Theme};

/// Obstacle kinds, named by their script token in level files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ObstacleKind {
    /// `regular`: any contact ends the run
    #[default]
    Solid,
    /// `platform`: can be stood on, bounces the player off its underside
    Platform,
    /// `lemon`: telegraphed, then strikes once
    TimedHazard,
}

impl ObstacleKind {
    /// Script token for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::Solid => "regular",
            ObstacleKind::Platform => "platform",
            ObstacleKind::TimedHazard => "lemon",
        }
    }

    /// Parse a script token (case-insensitive, surrounding whitespace ignored)
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_lowercase().as_str() {
            "regular" => Some(ObstacleKind::Solid),
            "platform" => Some(ObstacleKind::Platform),
            "lemon" => Some(ObstacleKind::TimedHazard),
            _ => None,
        }
    }
}

/// Kind-specific state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Behavior {
    Solid {
        bottom_tolerance: f32,
    },
    Platform {
        /// Player was resting on this platform last tick (for liftoff)
        was_resting: bool,
    },
    TimedHazard {
        countdown: i32,
        /// Dropped unevaluated once the countdown falls below this
        expiry: i32,
        /// Strike has been evaluated
        struck: bool,
    },
}

/// Outcome of one collision check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Contact {
    None,
    /// The run ends
    Fatal,
    /// Player snapped onto a platform top
    Supported,
    /// Player rising into a platform's underside had its velocity reversed
    Bounced,
    /// Player left a platform it was resting on
    Liftoff,
}

impl Contact {
    pub fn is_fatal(&self) -> bool {
        matches!(self, Contact::Fatal)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub rect: Rect,
    pub theme: Theme,
    /// Scroll per tick
    speed: f32,
    behavior: Behavior,
}

impl Obstacle {
    /// Build an obstacle from a level record. Scrolling kinds enter at the
    /// right screen edge; timed hazards are pinned to x = 0.
    pub fn spawn(id: u32, record: &LevelRecord, config: &RunConfig) -> Self {
        let (x, behavior) = match record.kind {
            ObstacleKind::Solid => (
                config.screen_width,
                Behavior::Solid {
                    bottom_tolerance: config.solid_bottom_tolerance,
                },
            ),
            ObstacleKind::Platform => (config.screen_width, Behavior::Platform { was_resting: false }),
            ObstacleKind::TimedHazard => (
                0.0,
                Behavior::TimedHazard {
                    countdown: config.hazard_countdown_ticks,
                    expiry: config.hazard_expiry_ticks,
                    struck: false,
                },
            ),
        };

        Self {
            id,
            rect: Rect::new(x, record.y, record.width, record.height),
            theme: config.theme,
            speed: config.world_speed,
            behavior,
        }
    }

    pub fn kind(&self) -> ObstacleKind {
        match self.behavior {
            Behavior::Solid { .. } => ObstacleKind::Solid,
            Behavior::Platform { .. } => ObstacleKind::Platform,
            Behavior::TimedHazard { .. } => ObstacleKind::TimedHazard,
        }
    }

    pub fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    /// Scroll left one tick, or tick down a timed hazard (which never scrolls)
    pub fn advance(&mut self) {
        match &mut self.behavior {
            Behavior::TimedHazard { countdown, .. } => *countdown -= 1,
            Behavior::Solid { .. } | Behavior::Platform { .. } => {
                self.rect.pos.x -= self.speed;
            }
        }
    }

    pub fn is_off_screen(&self) -> bool {
        self.rect.right() < 0.0
    }

    pub fn is_expired(&self) -> bool {
        match self.behavior {
            Behavior::TimedHazard {
                countdown,
                expiry,
                struck,
            } => struck || countdown < expiry,
            Behavior::Solid { .. } | Behavior::Platform { .. } => false,
        }
    }

    /// Ready to be culled from the live set
    pub fn should_remove(&self) -> bool {
        self.is_off_screen() || self.is_expired()
    }

    /// Timed hazards: `Some(true)` once the telegraph has run out.
    /// `None` for other kinds.
    pub fn armed(&self) -> Option<bool> {
        match self.behavior {
            Behavior::TimedHazard { countdown, .. } => Some(countdown <= 0),
            Behavior::Solid { .. } | Behavior::Platform { .. } => None,
        }
    }

    /// Resolve contact with the player. Platforms reposition the player and are
    /// never fatal; solids are fatal on overlap; a timed hazard is only
    /// dangerous on the single tick its countdown reads zero.
    pub fn collide(&mut self, player: &mut Player) -> Contact {
        let player_rect = player.rect();
        match &mut self.behavior {
            Behavior::Solid { bottom_tolerance } => {
                if solid_hit(&player_rect, &self.rect, *bottom_tolerance) {
                    Contact::Fatal
                } else {
                    Contact::None
                }
            }

            Behavior::Platform { was_resting } => {
                let resting = platform_contact(&player_rect, &self.rect);
                let contact = if resting {
                    if player.velocity() >= 0.0 {
                        player.set_y(self.rect.top() - player.height());
                        player.set_airborne(false);
                        Contact::Supported
                    } else {
                        player.set_velocity(-player.velocity());
                        Contact::Bounced
                    }
                } else if *was_resting && player.y() < player.ground_level() {
                    // A platform flush with the ground leaves the player standing
                    player.set_airborne(true);
                    Contact::Liftoff
                } else {
                    Contact::None
                };
                *was_resting = resting;
                contact
            }

            Behavior::TimedHazard {
                countdown, struck, ..
            } => {
                if *countdown != 0 || *struck {
                    return Contact::None;
                }
                *struck = true;
                if strike_hit(&player_rect, &self.rect) {
                    Contact::Fatal
                } else {
                    Contact::None
                }
            }
        }
    }
}
