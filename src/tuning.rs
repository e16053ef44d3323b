//! Data-driven game balance
//!
//! Every revision of the game is the same core driven by a different
//! `SceneConfig`: tile size, world shape, enemy roster and feature toggles.

use serde::{Deserialize, Serialize};

use crate::sim::state::{HostileKind, MovementPattern};

/// Physics and combat constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Hero movement ===
    /// Horizontal acceleration while a direction is held (px/s²)
    pub move_accel: f32,
    /// Horizontal speed cap (px/s)
    pub max_speed: f32,
    /// Upward velocity applied on jump (px/s)
    pub jump_power: f32,
    /// Velocity multiplier applied every tick while grounded
    pub friction_ground: f32,
    /// Velocity multiplier applied every tick while airborne
    pub friction_air: f32,
    /// Grace period after leaving a surface during which jump still works (s)
    pub coyote_time: f32,
    pub gravity: f32,
    pub terminal_velocity: f32,
    pub hero_width: f32,
    pub hero_height: f32,
    pub spawn_x: f32,
    pub spawn_y: f32,

    // === Dash ===
    pub dash_force: f32,
    pub dash_cost: f32,
    pub dash_cooldown: f32,
    /// Energy regained per second
    pub dash_regen: f32,

    // === Melee attack ===
    pub attack_enabled: bool,
    pub attack_duration: f32,
    pub attack_cooldown: f32,
    /// Forward reach of the hit box (px)
    pub attack_range: f32,
    pub attack_damage: i32,
    /// Horizontal shove applied to a struck hostile (px)
    pub attack_knockback: f32,

    // === Contact ===
    /// Downward speed the hero must exceed to stomp (px/s)
    pub stomp_threshold: f32,
    pub stomp_damage: i32,
    /// Upward speed after a stomp (px/s)
    pub stomp_bounce: f32,
    pub invulnerability: f32,
    /// Horizontal speed applied to the hero when hurt (px/s)
    pub contact_knockback: f32,
    pub projectile_damage: u32,
    /// Radius of the hero used for circular pickup/projectile tests
    pub pickup_radius: f32,
    pub collectible_points: u64,

    // === Camera ===
    pub camera_smoothing_x: f32,
    pub camera_smoothing_y: f32,
    pub camera_min_y: f32,
    pub camera_max_y: f32,

    /// Distance below the world bottom at which the hero counts as fallen out
    pub fall_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            move_accel: 1200.0,
            max_speed: 250.0,
            jump_power: 420.0,
            friction_ground: 0.85,
            friction_air: 0.85,
            coyote_time: 0.0,
            gravity: 1200.0,
            terminal_velocity: 600.0,
            hero_width: 24.0,
            hero_height: 32.0,
            spawn_x: 100.0,
            spawn_y: 400.0,

            dash_force: 600.0,
            dash_cost: 50.0,
            dash_cooldown: 1.0,
            dash_regen: 30.0,

            attack_enabled: true,
            attack_duration: 0.3,
            attack_cooldown: 0.5,
            attack_range: 40.0,
            attack_damage: 10,
            attack_knockback: 30.0,

            stomp_threshold: 200.0,
            stomp_damage: 15,
            stomp_bounce: 300.0,
            invulnerability: 1.5,
            contact_knockback: 200.0,
            projectile_damage: 5,
            pickup_radius: 12.0,
            collectible_points: 100,

            camera_smoothing_x: 0.1,
            camera_smoothing_y: 0.05,
            camera_min_y: -100.0,
            camera_max_y: 200.0,

            fall_margin: 100.0,
        }
    }
}

/// A run of floating platform tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformSpec {
    pub start_column: i32,
    pub row: i32,
    pub length: i32,
}

impl PlatformSpec {
    pub const fn new(start_column: i32, row: i32, length: i32) -> Self {
        Self {
            start_column,
            row,
            length,
        }
    }
}

/// Placement of the collectible batch
///
/// Item `i` sits at `x = origin_x + i * spacing + jitter_x * r`,
/// `y = min_y + range_y * r` with `r` drawn from the scene's random source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollectibleLayout {
    pub count: usize,
    pub origin_x: f32,
    pub spacing: f32,
    pub jitter_x: f32,
    pub min_y: f32,
    pub range_y: f32,
    pub radius: f32,
}

/// A hostile spawn descriptor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HostileSpawn {
    pub x: f32,
    pub y: f32,
    pub pattern: MovementPattern,
    pub kind: HostileKind,
}

impl HostileSpawn {
    pub const fn new(x: f32, y: f32, pattern: MovementPattern, kind: HostileKind) -> Self {
        Self {
            x,
            y,
            pattern,
            kind,
        }
    }
}

/// Full description of one playable scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub name: String,
    /// Edge length of a tile in pixels
    pub tile_size: f32,
    pub columns: i32,
    /// Mean ground row
    pub base_height: f32,
    /// Amplitude of the `sin(c * 0.3)` ground term (rows)
    pub wave_a: f32,
    /// Amplitude of the `cos(c * 0.15)` ground term (rows)
    pub wave_b: f32,
    /// First row below the world (exclusive fill bound)
    pub bottom_row: i32,
    pub platforms: Vec<PlatformSpec>,
    pub collectibles: CollectibleLayout,
    pub hostiles: Vec<HostileSpawn>,
    /// Scene opens on a title screen and waits for the start control
    pub start_screen: bool,
    pub tuning: Tuning,
}

impl SceneConfig {
    /// Earliest revision: flat ground, patrol and hop enemies, no melee
    pub fn classic() -> Self {
        use HostileKind::*;
        use MovementPattern::*;

        Self {
            name: "classic".to_string(),
            tile_size: 32.0,
            columns: 60,
            base_height: 20.0,
            wave_a: 0.0,
            wave_b: 0.0,
            bottom_row: 23,
            platforms: vec![
                PlatformSpec::new(8, 16, 4),
                PlatformSpec::new(15, 14, 5),
                PlatformSpec::new(23, 12, 3),
                PlatformSpec::new(30, 15, 6),
                PlatformSpec::new(40, 13, 4),
                PlatformSpec::new(48, 11, 5),
            ],
            collectibles: CollectibleLayout {
                count: 12,
                origin_x: 100.0,
                spacing: 150.0,
                jitter_x: 50.0,
                min_y: 200.0,
                range_y: 300.0,
                radius: 8.0,
            },
            hostiles: vec![
                HostileSpawn::new(400.0, 500.0, Patrol, Ground),
                HostileSpawn::new(800.0, 450.0, Jump, Hopper),
                HostileSpawn::new(1200.0, 480.0, Patrol, Ground),
                HostileSpawn::new(1600.0, 420.0, Jump, Hopper),
            ],
            start_screen: false,
            tuning: Tuning {
                attack_enabled: false,
                ..Tuning::default()
            },
        }
    }

    /// Latest revision: rolling terrain, full roster, melee, coyote time
    pub fn adventure() -> Self {
        use HostileKind::*;
        use MovementPattern::*;

        Self {
            name: "adventure".to_string(),
            tile_size: 32.0,
            columns: 150,
            base_height: 20.0,
            wave_a: 2.0,
            wave_b: 1.5,
            bottom_row: 23,
            platforms: vec![
                PlatformSpec::new(8, 16, 4),
                PlatformSpec::new(15, 14, 5),
                PlatformSpec::new(23, 12, 3),
                PlatformSpec::new(30, 15, 6),
                PlatformSpec::new(40, 13, 4),
                PlatformSpec::new(48, 11, 5),
                PlatformSpec::new(58, 14, 6),
                PlatformSpec::new(70, 12, 4),
                PlatformSpec::new(80, 10, 5),
                PlatformSpec::new(92, 13, 7),
                PlatformSpec::new(105, 11, 5),
                PlatformSpec::new(118, 15, 6),
                PlatformSpec::new(130, 13, 4),
                PlatformSpec::new(140, 9, 5),
            ],
            collectibles: CollectibleLayout {
                count: 30,
                origin_x: 100.0,
                spacing: 150.0,
                jitter_x: 50.0,
                min_y: 200.0,
                range_y: 300.0,
                radius: 8.0,
            },
            hostiles: vec![
                HostileSpawn::new(400.0, 500.0, Patrol, Ground),
                HostileSpawn::new(800.0, 450.0, Jump, Hopper),
                HostileSpawn::new(1200.0, 480.0, Patrol, Ground),
                HostileSpawn::new(1600.0, 420.0, Jump, Hopper),
                HostileSpawn::new(2000.0, 500.0, Flying, Flyer),
                HostileSpawn::new(2400.0, 450.0, Patrol, HostileKind::Tank),
                HostileSpawn::new(2800.0, 480.0, Flying, Flyer),
                HostileSpawn::new(3200.0, 420.0, Shooter, Ranged),
                HostileSpawn::new(3600.0, 500.0, Patrol, Ground),
                HostileSpawn::new(4000.0, 450.0, MovementPattern::Tank, HostileKind::Tank),
            ],
            start_screen: true,
            tuning: Tuning {
                friction_air: 0.88,
                coyote_time: 0.1,
                ..Tuning::default()
            },
        }
    }

    /// World width in pixels
    pub fn world_width(&self) -> f32 {
        self.columns as f32 * self.tile_size
    }

    /// World height in pixels (bottom edge of the lowest row)
    pub fn world_height(&self) -> f32 {
        self.bottom_row as f32 * self.tile_size
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::adventure()
    }
}
