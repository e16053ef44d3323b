//! Smoothed follow camera

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Hero, Viewport};
use crate::tuning::Tuning;

/// View offset (top-left of the visible area in world pixels)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Camera {
    pub offset: Vec2,
}

impl Camera {
    /// Offset that would centre the hero in the viewport
    pub fn target_for(hero: &Hero, viewport: &Viewport) -> Vec2 {
        Vec2::new(
            hero.pos.x - viewport.width / 2.0 + hero.size.x / 2.0,
            hero.pos.y - viewport.height / 2.0 + hero.size.y / 2.0,
        )
    }

    /// Ease toward the hero, then clamp
    ///
    /// The step is a fixed fraction per tick regardless of dt. X is kept
    /// within the world horizontally; Y is held to the tuned band.
    pub fn follow(&mut self, hero: &Hero, viewport: &Viewport, world_width: f32, tuning: &Tuning) {
        let target = Self::target_for(hero, viewport);

        self.offset.x += (target.x - self.offset.x) * tuning.camera_smoothing_x;
        self.offset.y += (target.y - self.offset.y) * tuning.camera_smoothing_y;

        let max_x = (world_width - viewport.width).max(0.0);
        self.offset.x = self.offset.x.clamp(0.0, max_x);
        self.offset.y = self.offset.y.clamp(tuning.camera_min_y, tuning.camera_max_y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hero_at(x: f32, y: f32) -> Hero {
        let mut hero = Hero::spawn(&Tuning::default());
        hero.pos = Vec2::new(x, y);
        hero
    }

    #[test]
    fn test_x_converges_faster_than_y() {
        let tuning = Tuning::default();
        let viewport = Viewport::default();
        let hero = hero_at(2000.0, 500.0);
        let mut camera = Camera::default();

        camera.follow(&hero, &viewport, 4800.0, &tuning);

        let target = Camera::target_for(&hero, &viewport);
        assert!((camera.offset.x - target.x * 0.1).abs() < 1e-3);
        assert!((camera.offset.y - target.y * 0.05).abs() < 1e-3);
    }

    #[test]
    fn test_never_scrolls_left_of_origin() {
        let tuning = Tuning::default();
        let viewport = Viewport::default();
        let hero = hero_at(10.0, 400.0);
        let mut camera = Camera::default();
        for _ in 0..100 {
            camera.follow(&hero, &viewport, 4800.0, &tuning);
        }
        assert_eq!(camera.offset.x, 0.0);
    }

    #[test]
    fn test_y_band() {
        let tuning = Tuning::default();
        let viewport = Viewport::default();
        let mut camera = Camera::default();

        let deep = hero_at(500.0, 5000.0);
        for _ in 0..500 {
            camera.follow(&deep, &viewport, 4800.0, &tuning);
        }
        assert_eq!(camera.offset.y, 200.0);

        let high = hero_at(500.0, -5000.0);
        for _ in 0..500 {
            camera.follow(&high, &viewport, 4800.0, &tuning);
        }
        assert_eq!(camera.offset.y, -100.0);
    }

    #[test]
    fn test_x_clamped_to_world_edge_for_viewport() {
        let tuning = Tuning::default();
        let hero = hero_at(4790.0, 400.0);
        let mut camera = Camera::default();

        let wide = Viewport {
            width: 1280.0,
            height: 720.0,
        };
        for _ in 0..500 {
            camera.follow(&hero, &wide, 4800.0, &tuning);
        }
        assert_eq!(camera.offset.x, 4800.0 - 1280.0);

        // After a resize the bound moves with the viewport
        let narrow = Viewport {
            width: 640.0,
            height: 720.0,
        };
        for _ in 0..500 {
            camera.follow(&hero, &narrow, 4800.0, &tuning);
        }
        assert_eq!(camera.offset.x, 4800.0 - 640.0);
    }
}
