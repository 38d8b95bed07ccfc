//! Collision geometry for axis-aligned boxes
//!
//! Screen space: x grows rightward, y grows downward. Each obstacle kind
//! tests overlap with slightly different edge rules, so each rule gets its
//! own function rather than one shared `intersects`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box: top-left corner plus size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Same box shifted horizontally
    pub fn offset_x(&self, dx: f32) -> Self {
        Self {
            pos: Vec2::new(self.pos.x + dx, self.pos.y),
            size: self.size,
        }
    }

    /// Closed-interval horizontal overlap (touching edges count)
    #[inline]
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.right() >= other.left() && self.left() <= other.right()
    }

    /// Closed-interval vertical overlap (touching edges count)
    #[inline]
    pub fn overlaps_y(&self, other: &Rect) -> bool {
        self.bottom() >= other.top() && self.top() <= other.bottom()
    }
}

/// Solid hit test: the player's bottom edge is raised by `bottom_tolerance`
/// so grazing the top corner of a solid is not fatal.
pub fn solid_hit(player: &Rect, solid: &Rect, bottom_tolerance: f32) -> bool {
    player.overlaps_x(solid)
        && player.bottom() - bottom_tolerance >= solid.top()
        && player.top() <= solid.bottom()
}

/// Platform contact test. The player's right edge must be strictly past the
/// platform's left edge, so a player merely touching the leading edge is not
/// yet standing on it.
pub fn platform_contact(player: &Rect, platform: &Rect) -> bool {
    player.right() > platform.left()
        && player.left() <= platform.right()
        && player.overlaps_y(platform)
}

/// Timed hazard strike test: plain closed-box overlap
pub fn strike_hit(player: &Rect, hazard: &Rect) -> bool {
    player.overlaps_x(hazard) && player.overlaps_y(hazard)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_at(y: f32) -> Rect {
        Rect::new(50.0, y, 40.0, 60.0)
    }

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(rect.left(), 10.0);
        assert_eq!(rect.right(), 40.0);
        assert_eq!(rect.top(), 20.0);
        assert_eq!(rect.bottom(), 60.0);
        assert_eq!(rect.offset_x(-15.0).left(), -5.0);
    }

    #[test]
    fn test_solid_hit_on_ground() {
        let solid = Rect::new(70.0, 210.0, 30.0, 40.0);
        assert!(solid_hit(&player_at(190.0), &solid, 10.0));
    }

    #[test]
    fn test_solid_graze_within_tolerance() {
        // Player bottom 5px into the solid's top: inside the tolerance band
        let solid = Rect::new(70.0, 210.0, 30.0, 40.0);
        assert!(!solid_hit(&player_at(155.0), &solid, 10.0));
        // 10px in: fatal
        assert!(solid_hit(&player_at(160.0), &solid, 10.0));
    }

    #[test]
    fn test_solid_miss_beside() {
        let solid = Rect::new(91.0, 190.0, 30.0, 60.0);
        assert!(!solid_hit(&player_at(190.0), &solid, 10.0));
        // Touching edge counts
        let solid = Rect::new(90.0, 190.0, 30.0, 60.0);
        assert!(solid_hit(&player_at(190.0), &solid, 10.0));
    }

    #[test]
    fn test_solid_hanging_above_player() {
        // A solid hanging from the ceiling only hits a player that reaches it
        let solid = Rect::new(60.0, 0.0, 30.0, 100.0);
        assert!(!solid_hit(&player_at(190.0), &solid, 10.0));
        assert!(solid_hit(&player_at(80.0), &solid, 10.0));
    }

    #[test]
    fn test_platform_contact_leading_edge() {
        let platform = Rect::new(90.0, 200.0, 100.0, 20.0);
        // Right edge exactly on platform's left edge: not yet in contact
        assert!(!platform_contact(&player_at(140.0), &platform));
        let platform = Rect::new(89.0, 200.0, 100.0, 20.0);
        assert!(platform_contact(&player_at(140.0), &platform));
    }

    #[test]
    fn test_strike_hit() {
        let hazard = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(strike_hit(&player_at(40.0), &hazard));
        assert!(strike_hit(&player_at(100.0), &hazard)); // top edge touches bottom
        assert!(!strike_hit(&player_at(101.0), &hazard));
    }
}
