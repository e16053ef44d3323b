//! Pixel Realm - A tile-based side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Simulation (physics, collisions, hostile behavior, camera, game state)
//! - `renderer`: Drawable scene description and the Canvas2D painter
//! - `driver`: Variable-timestep game cycle
//! - `tuning`: Data-driven game balance and scene presets
//! - `settings`: Host-level preferences

pub mod driver;
pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use driver::GameLoop;
pub use error::GameError;
pub use settings::{ScenePreset, Settings};
pub use tuning::{SceneConfig, Tuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default display surface size
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 1280.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 720.0;

    /// Hero resource caps
    pub const MAX_LIFE_POINTS: u32 = 100;
    pub const MAX_DASH_ENERGY: f32 = 100.0;

    /// Hostile phase accumulator step (per tick, not per second)
    pub const HOSTILE_ANIM_STEP: f32 = 0.1;
    /// Collectible sparkle step (per tick)
    pub const SPARKLE_STEP: f32 = 0.15;
    /// Walk cycle advance per unit of horizontal speed
    pub const WALK_CYCLE_SCALE: f32 = 0.01;

    /// Enemy projectile defaults
    pub const PROJECTILE_SPEED: f32 = 200.0;
    pub const PROJECTILE_RADIUS: f32 = 6.0;
    /// Margin around the camera view before a projectile is culled
    pub const CULL_MARGIN: f32 = 100.0;

    /// Attack particle defaults
    pub const PARTICLE_LIFE: f32 = 0.4;
    pub const PARTICLES_PER_HIT: usize = 6;
    pub const PARTICLE_GRAVITY: f32 = 600.0;
    pub const MAX_PARTICLES: usize = 128;

    /// Parallax factor for the background layer
    pub const PARALLAX_FACTOR: f32 = 0.3;
}

/// Centre of an axis-aligned box given its top-left corner and size
#[inline]
pub fn box_center(pos: Vec2, size: Vec2) -> Vec2 {
    pos + size * 0.5
}

/// -1.0 or 1.0 depending on facing
#[inline]
pub fn facing_sign(facing_right: bool) -> f32 {
    if facing_right { 1.0 } else { -1.0 }
}
