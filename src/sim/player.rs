//! The player entity and its two locomotion rules

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::settings::RunConfig;

/// How the player moves vertically. Fixed for the player's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Locomotion {
    /// Gravity and a jump impulse; lands on the ground or on platforms
    #[default]
    Jumper,
    /// Constant-speed rise while held, constant-speed fall otherwise
    Floater,
}

/// Sprite discriminator for presenters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pose {
    Standing,
    Rising,
    Falling,
}

/// Physics constants copied out of the run config
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerPhysics {
    pub gravity: f32,
    pub jump_impulse: f32,
    pub floater_speed: f32,
    /// Lowest legal y (top edge while standing on the ground)
    pub ground_level: f32,
}

impl PlayerPhysics {
    pub fn from_config(config: &RunConfig) -> Self {
        Self {
            gravity: config.gravity,
            jump_impulse: config.jump_impulse,
            floater_speed: config.floater_speed,
            ground_level: config.ground_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    locomotion: Locomotion,
    pos: Vec2,
    size: Vec2,
    velocity: f32,
    /// Always false for a Floater
    airborne: bool,
    /// Jumper: jump held (re-jump on landing). Floater: rise intent.
    held: bool,
    physics: PlayerPhysics,
}

impl Player {
    /// A player standing on the ground
    pub fn new(locomotion: Locomotion, config: &RunConfig) -> Self {
        let physics = PlayerPhysics::from_config(config);
        Self {
            locomotion,
            pos: Vec2::new(config.player_x, physics.ground_level),
            size: Vec2::new(config.player_width, config.player_height),
            velocity: 0.0,
            airborne: false,
            held: false,
            physics,
        }
    }

    /// Advance vertical state by one tick
    pub fn update(&mut self) {
        match self.locomotion {
            Locomotion::Jumper => self.update_jumper(),
            Locomotion::Floater => self.update_floater(),
        }
    }

    fn update_jumper(&mut self) {
        // Standing (on ground or a platform) holds still until a jump or liftoff
        if !self.airborne {
            self.velocity = 0.0;
            return;
        }

        self.velocity += self.physics.gravity;
        self.pos.y += self.velocity;

        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
        }

        let ground = self.physics.ground_level;
        if self.pos.y >= ground {
            self.pos.y = ground;
            if self.held {
                self.velocity = self.physics.jump_impulse;
            } else {
                self.velocity = 0.0;
                self.airborne = false;
            }
        }
    }

    fn update_floater(&mut self) {
        let speed = self.physics.floater_speed;
        self.velocity = if self.held { -speed } else { speed };
        // Clamp without touching velocity: pressing against a bound is not a bounce
        self.pos.y = (self.pos.y + self.velocity).clamp(0.0, self.physics.ground_level);
    }

    /// Jumper only: start a jump unless already airborne
    pub fn request_jump(&mut self) {
        if self.locomotion != Locomotion::Jumper || self.airborne {
            return;
        }
        self.velocity = self.physics.jump_impulse;
        self.airborne = true;
    }

    /// Jumper only: latch the jump button so landing re-jumps
    pub fn set_jump_held(&mut self, held: bool) {
        if self.locomotion == Locomotion::Jumper {
            self.held = held;
        }
    }

    /// Floater only: rise while true, fall while false (applied on next update)
    pub fn set_rise_intent(&mut self, rising: bool) {
        if self.locomotion == Locomotion::Floater {
            self.held = rising;
        }
    }

    pub fn locomotion(&self) -> Locomotion {
        self.locomotion
    }

    pub fn x(&self) -> f32 {
        self.pos.x
    }

    pub fn y(&self) -> f32 {
        self.pos.y
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn is_airborne(&self) -> bool {
        self.airborne
    }

    pub fn ground_level(&self) -> f32 {
        self.physics.ground_level
    }

    pub fn pose(&self) -> Pose {
        match self.locomotion {
            Locomotion::Jumper if !self.airborne => Pose::Standing,
            _ if self.velocity < 0.0 => Pose::Rising,
            _ => Pose::Falling,
        }
    }

    // Collision responses only

    pub fn set_y(&mut self, y: f32) {
        self.pos.y = y.clamp(0.0, self.physics.ground_level);
    }

    pub fn set_velocity(&mut self, velocity: f32) {
        self.velocity = velocity;
    }

    /// Ignored for a Floater, which has no airborne state
    pub fn set_airborne(&mut self, airborne: bool) {
        if self.locomotion == Locomotion::Jumper {
            self.airborne = airborne;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn jumper() -> Player {
        Player::new(Locomotion::Jumper, &RunConfig::default())
    }

    fn floater() -> Player {
        Player::new(Locomotion::Floater, &RunConfig::default())
    }

    #[test]
    fn test_starts_on_ground() {
        let player = jumper();
        assert_eq!(player.y(), 190.0);
        assert_eq!(player.x(), 50.0);
        assert!(!player.is_airborne());
        assert_eq!(player.pose(), Pose::Standing);
    }

    #[test]
    fn test_jump_arc_lands() {
        let mut player = jumper();
        player.request_jump();
        assert!(player.is_airborne());
        assert_eq!(player.velocity(), -18.0);

        player.update();
        assert_eq!(player.velocity(), -16.5);
        assert_eq!(player.y(), 190.0 - 16.5);
        assert_eq!(player.pose(), Pose::Rising);

        let mut ticks = 1;
        while player.is_airborne() {
            player.update();
            ticks += 1;
            assert!(ticks < 100, "jump never landed");
        }
        assert_eq!(player.y(), 190.0);
        assert_eq!(player.velocity(), 0.0);
    }

    #[test]
    fn test_no_double_jump() {
        let mut player = jumper();
        player.request_jump();
        player.update();
        player.update();
        let (y, vel) = (player.y(), player.velocity());

        player.request_jump();
        assert_eq!(player.velocity(), vel);
        assert_eq!(player.y(), y);
        assert!(player.is_airborne());
    }

    #[test]
    fn test_held_jump_rejumps_on_landing() {
        let mut player = jumper();
        player.set_jump_held(true);
        player.request_jump();
        for _ in 0..200 {
            player.update();
            if player.y() == 190.0 {
                break;
            }
        }
        assert_eq!(player.y(), 190.0);
        assert!(player.is_airborne());
        assert_eq!(player.velocity(), -18.0);
    }

    #[test]
    fn test_grounded_jumper_does_not_fall() {
        let mut player = jumper();
        player.set_y(100.0); // e.g. standing on a platform
        player.update();
        assert_eq!(player.y(), 100.0);
        assert_eq!(player.velocity(), 0.0);
    }

    #[test]
    fn test_floater_rise_and_fall() {
        let mut player = floater();
        player.set_rise_intent(true);
        // Intent has no effect until update
        assert_eq!(player.y(), 190.0);
        player.update();
        assert_eq!(player.y(), 180.0);
        assert_eq!(player.pose(), Pose::Rising);

        player.set_rise_intent(false);
        player.update();
        player.update();
        assert_eq!(player.y(), 190.0);
        assert_eq!(player.velocity(), 10.0);
        assert_eq!(player.pose(), Pose::Falling);
    }

    #[test]
    fn test_floater_clamps_without_bounce() {
        let mut player = floater();
        player.set_rise_intent(true);
        for _ in 0..30 {
            player.update();
        }
        assert_eq!(player.y(), 0.0);
        assert_eq!(player.velocity(), -10.0);
    }

    #[test]
    fn test_mode_specific_inputs_are_ignored() {
        let mut player = floater();
        player.request_jump();
        assert!(!player.is_airborne());
        assert_eq!(player.velocity(), 0.0);
        player.set_airborne(true);
        assert!(!player.is_airborne());

        let mut player = jumper();
        player.set_rise_intent(true);
        player.update();
        assert_eq!(player.y(), 190.0);
    }

    proptest! {
        #[test]
        fn prop_y_stays_in_bounds(
            floating in any::<bool>(),
            inputs in prop::collection::vec((any::<bool>(), any::<bool>()), 1..400),
        ) {
            let mut player = if floating { floater() } else { jumper() };
            for (press, hold) in inputs {
                if press {
                    player.request_jump();
                }
                player.set_jump_held(hold);
                player.set_rise_intent(hold);
                player.update();
                prop_assert!(player.y() >= 0.0);
                prop_assert!(player.y() <= player.ground_level());
                if !floating && player.y() == player.ground_level() && !hold {
                    prop_assert!(!player.is_airborne());
                }
            }
        }
    }
}
