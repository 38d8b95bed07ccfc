//! Static level layout for the level previewer
//!
//! Each record is placed where it would sit in world space at its spawn
//! moment: scrolling kinds enter at the right screen edge, so a record
//! triggered at distance `d` lives at world x `d + screen_width`. Timed
//! hazards appear at the left edge, so they sit at world x `d`.

use super::script::{LevelRecord, LevelScript};
use crate::consts::PREVIEW_CAMERA_SPEED;
use crate::settings::RunConfig;
use crate::sim::{ObstacleKind, Rect};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewItem {
    pub record: LevelRecord,
    pub rect: Rect,
}

#[derive(Debug, Clone)]
pub struct LevelPreview {
    items: Vec<PreviewItem>,
    player_start: Rect,
    viewport_width: f32,
    camera_x: f32,
}

impl LevelPreview {
    pub fn new(script: &LevelScript, config: &RunConfig) -> Self {
        let items = script
            .records
            .iter()
            .map(|record| {
                let x = match record.kind {
                    ObstacleKind::TimedHazard => record.trigger,
                    ObstacleKind::Solid | ObstacleKind::Platform => {
                        record.trigger + config.screen_width
                    }
                };
                PreviewItem {
                    record: *record,
                    rect: Rect::new(x, record.y, record.width, record.height),
                }
            })
            .collect();

        Self {
            items,
            player_start: Rect::new(
                config.player_x,
                config.ground_level(),
                config.player_width,
                config.player_height,
            ),
            viewport_width: config.screen_width,
            camera_x: 0.0,
        }
    }

    /// Move the camera, never left of the level start
    pub fn move_camera(&mut self, dx: f32) {
        self.camera_x = (self.camera_x + dx).max(0.0);
    }

    pub fn pan_left(&mut self) {
        self.move_camera(-PREVIEW_CAMERA_SPEED);
    }

    pub fn pan_right(&mut self) {
        self.move_camera(PREVIEW_CAMERA_SPEED);
    }

    pub fn camera_x(&self) -> f32 {
        self.camera_x
    }

    /// All items in world coordinates
    pub fn items(&self) -> &[PreviewItem] {
        &self.items
    }

    /// Items intersecting the viewport, in camera-relative coordinates
    pub fn visible(&self) -> Vec<PreviewItem> {
        let view_left = self.camera_x;
        let view_right = self.camera_x + self.viewport_width;
        self.items
            .iter()
            .filter(|item| item.rect.right() >= view_left && item.rect.left() <= view_right)
            .map(|item| PreviewItem {
                record: item.record,
                rect: item.rect.offset_x(-self.camera_x),
            })
            .collect()
    }

    /// Player start marker, camera-relative
    pub fn player_marker(&self) -> Rect {
        self.player_start.offset_x(-self.camera_x)
    }

    /// World x of the rightmost item edge
    pub fn level_length(&self) -> f32 {
        self.items
            .iter()
            .map(|item| item.rect.right())
            .fold(0.0, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preview() -> LevelPreview {
        let script = LevelScript::parse(
            "track\n\
             100,30,40,210,regular\n\
             900,120,20,150,platform\n\
             1200,200,60,0,lemon\n",
        );
        LevelPreview::new(&script, &RunConfig::default())
    }

    #[test]
    fn test_world_placement() {
        let preview = preview();
        let xs: Vec<_> = preview.items().iter().map(|i| i.rect.left()).collect();
        assert_eq!(xs, vec![900.0, 1700.0, 1200.0]);
        assert_eq!(preview.level_length(), 1820.0);
    }

    #[test]
    fn test_camera_clamps_at_start() {
        let mut preview = preview();
        preview.pan_left();
        assert_eq!(preview.camera_x(), 0.0);
        preview.pan_right();
        preview.pan_right();
        assert_eq!(preview.camera_x(), 40.0);
        assert_eq!(preview.player_marker().left(), 10.0);
    }

    #[test]
    fn test_visible_window() {
        let mut preview = preview();
        // Viewport [0, 800]: nothing has scrolled in yet
        assert!(preview.visible().is_empty());

        preview.move_camera(500.0);
        // Viewport [500, 1300]: the solid and the hazard
        let visible = preview.visible();
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].rect.left(), 400.0);
        assert_eq!(visible[0].record.kind, ObstacleKind::Solid);
        assert_eq!(visible[1].record.kind, ObstacleKind::TimedHazard);
    }
}
