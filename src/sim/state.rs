//! Game state and core simulation types
//!
//! `WorldState` owns every entity collection. Hostiles and collectibles are
//! never removed, only flagged (`active`, `gathered`), so a reset can bring
//! back the same entities in the same slots. Projectiles and particles are
//! transient and really are deleted.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::collision::Rect;
use super::rng::RandomSource;
use super::world::WorldGrid;
use crate::consts::*;
use crate::tuning::{HostileSpawn, SceneConfig, Tuning};

/// High-level game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the start control
    Start,
    /// Active gameplay
    Playing,
    /// Hero died or fell out, waiting for the reset control
    GameOver,
}

/// The player-controlled entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    /// Top-left of the bounding box
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Resting on a surface as of the last terrain pass
    pub can_jump: bool,
    /// Seconds left in which a jump is still honoured after leaving ground
    pub coyote_timer: f32,
    pub dash_energy: f32,
    pub dash_cooldown: f32,
    pub life_points: u32,
    pub facing_right: bool,
    pub invulnerable_time: f32,
    pub attack_cooldown: f32,
    pub is_attacking: bool,
    pub attack_duration: f32,
    /// Walk cycle accumulator (visual only)
    pub animation_phase: f32,
}

impl Hero {
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.spawn_x, tuning.spawn_y),
            vel: Vec2::ZERO,
            size: Vec2::new(tuning.hero_width, tuning.hero_height),
            can_jump: false,
            coyote_timer: 0.0,
            dash_energy: MAX_DASH_ENERGY,
            dash_cooldown: 0.0,
            life_points: MAX_LIFE_POINTS,
            facing_right: true,
            invulnerable_time: 0.0,
            attack_cooldown: 0.0,
            is_attacking: false,
            attack_duration: 0.0,
            animation_phase: 0.0,
        }
    }

    /// Restore spawn values in place
    pub fn reset(&mut self, tuning: &Tuning) {
        *self = Self::spawn(tuning);
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        crate::box_center(self.pos, self.size)
    }

    pub fn is_dead(&self) -> bool {
        self.life_points == 0
    }

    /// Apply damage and start the invulnerability window
    pub fn take_hit(&mut self, damage: u32, invulnerability: f32) {
        self.life_points = self.life_points.saturating_sub(damage);
        self.invulnerable_time = invulnerability;
    }
}

/// How a hostile moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementPattern {
    /// Bounded back-and-forth walk
    Patrol,
    /// Periodic hop under gravity
    Jump,
    /// Oscillating flight, ignores terrain
    Flying,
    /// Stationary, fires at the hero
    Shooter,
    /// Slow patrol
    Tank,
}

/// Hostile archetype: size, toughness and reward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HostileKind {
    #[default]
    Ground,
    Hopper,
    Flyer,
    Tank,
    Ranged,
}

impl HostileKind {
    /// Box edge length
    pub fn size(&self) -> f32 {
        match self {
            HostileKind::Tank => 36.0,
            _ => 28.0,
        }
    }

    pub fn max_health(&self) -> i32 {
        match self {
            HostileKind::Tank => 30,
            HostileKind::Ranged => 15,
            _ => 10,
        }
    }

    pub fn patrol_range(&self) -> f32 {
        match self {
            HostileKind::Tank => 100.0,
            _ => 150.0,
        }
    }

    /// Walking speed under the `Patrol` pattern
    pub fn patrol_speed(&self) -> f32 {
        match self {
            HostileKind::Tank => 50.0,
            _ => 80.0,
        }
    }

    pub fn contact_damage(&self) -> u32 {
        match self {
            HostileKind::Tank => 15,
            _ => 10,
        }
    }

    pub fn score_value(&self) -> u64 {
        match self {
            HostileKind::Tank => 150,
            HostileKind::Ranged => 100,
            _ => 50,
        }
    }

    /// Whether a health bar is drawn over this kind
    pub fn shows_health(&self) -> bool {
        matches!(self, HostileKind::Tank | HostileKind::Ranged)
    }
}

/// An enemy entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hostile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub pattern: MovementPattern,
    pub kind: HostileKind,
    /// +1 or -1
    pub patrol_direction: f32,
    /// Anchor x for the patrol range
    pub patrol_origin: f32,
    pub patrol_range: f32,
    /// Per-tick phase accumulator (flight path, visuals)
    pub anim_cycle: f32,
    /// False once defeated; kept in storage for reset
    pub active: bool,
    pub health: i32,
    pub shoot_cooldown: f32,
    spawn: Vec2,
}

impl Hostile {
    pub fn from_spawn(spawn: &HostileSpawn) -> Self {
        let edge = spawn.kind.size();
        let pos = Vec2::new(spawn.x, spawn.y);
        Self {
            pos,
            vel: Vec2::ZERO,
            size: Vec2::splat(edge),
            pattern: spawn.pattern,
            kind: spawn.kind,
            patrol_direction: 1.0,
            patrol_origin: spawn.x,
            patrol_range: spawn.kind.patrol_range(),
            anim_cycle: 0.0,
            active: true,
            health: spawn.kind.max_health(),
            shoot_cooldown: 0.0,
            spawn: pos,
        }
    }

    /// Back to spawn position with full health
    pub fn reset(&mut self) {
        self.pos = self.spawn;
        self.vel = Vec2::ZERO;
        self.patrol_direction = 1.0;
        self.anim_cycle = 0.0;
        self.active = true;
        self.health = self.kind.max_health();
        self.shoot_cooldown = 0.0;
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        crate::box_center(self.pos, self.size)
    }

    /// Subtract health; returns true when this hit defeated the hostile
    pub fn damage(&mut self, amount: i32) -> bool {
        if !self.active {
            return false;
        }
        self.health -= amount;
        if self.health <= 0 {
            self.active = false;
            true
        } else {
            false
        }
    }
}

/// A pickup coin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    /// Centre
    pub pos: Vec2,
    pub radius: f32,
    pub gathered: bool,
    /// Pulse phase accumulator (visual only)
    pub sparkle: f32,
}

/// An enemy-fired shot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    /// Centre
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub from_enemy: bool,
    pub active: bool,
}

/// Attack spark (visual only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// Seconds remaining
    pub life: f32,
}

/// Display surface size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

/// Values exposed to the score/health display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudSnapshot {
    pub player_points: u64,
    pub life_points: u32,
}

/// Complete scene state, owned by the driver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldState {
    pub config: SceneConfig,
    pub grid: WorldGrid,
    pub hero: Hero,
    pub hostiles: Vec<Hostile>,
    pub collectibles: Vec<Collectible>,
    pub projectiles: Vec<Projectile>,
    pub particles: Vec<Particle>,
    pub camera: Camera,
    pub viewport: Viewport,
    pub player_points: u64,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub current_tick: u64,
}

impl WorldState {
    /// Build the scene: terrain, hero, collectible batch, hostile roster
    pub fn new(config: SceneConfig, viewport: Viewport, rng: &mut dyn RandomSource) -> Self {
        let grid = WorldGrid::generate(&config);
        let hero = Hero::spawn(&config.tuning);
        let collectibles = place_collectibles(&config, rng);
        let hostiles: Vec<Hostile> = config.hostiles.iter().map(Hostile::from_spawn).collect();
        let phase = if config.start_screen {
            GamePhase::Start
        } else {
            GamePhase::Playing
        };

        log::info!(
            "Scene '{}' built: {} tiles, {} hostiles, {} collectibles",
            config.name,
            grid.len(),
            hostiles.len(),
            collectibles.len()
        );

        Self {
            config,
            grid,
            hero,
            hostiles,
            collectibles,
            projectiles: Vec::new(),
            particles: Vec::new(),
            camera: Camera::default(),
            viewport,
            player_points: 0,
            phase,
            current_tick: 0,
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.config.tuning
    }

    /// Restore all mutable state; terrain and collectible positions stay
    pub fn reset(&mut self) {
        self.hero.reset(&self.config.tuning);
        for hostile in &mut self.hostiles {
            hostile.reset();
        }
        for item in &mut self.collectibles {
            item.gathered = false;
        }
        self.projectiles.clear();
        self.particles.clear();
        self.camera = Camera::default();
        self.player_points = 0;
        log::info!("Scene reset");
    }

    /// Host display size changed
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport { width, height };
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            player_points: self.player_points,
            life_points: self.hero.life_points,
        }
    }

    /// The hero dropped below the bottom of the world
    pub fn hero_fell_out(&self) -> bool {
        self.hero.pos.y > self.grid.height() + self.config.tuning.fall_margin
    }

    /// Camera view rectangle in world coordinates
    pub fn view_rect(&self) -> Rect {
        Rect::from_pos_size(
            self.camera.offset,
            Vec2::new(self.viewport.width, self.viewport.height),
        )
    }

    /// Award the fixed value of a defeated hostile
    pub(crate) fn award_defeat(&mut self, index: usize) {
        let kind = self.hostiles[index].kind;
        self.player_points += kind.score_value();
        log::debug!(
            "Hostile #{} ({:?}) defeated, +{} points",
            index,
            kind,
            kind.score_value()
        );
    }
}

fn place_collectibles(config: &SceneConfig, rng: &mut dyn RandomSource) -> Vec<Collectible> {
    let layout = &config.collectibles;
    (0..layout.count)
        .map(|i| {
            let x = layout.origin_x + i as f32 * layout.spacing + rng.next_unit() * layout.jitter_x;
            let y = layout.min_y + rng.next_unit() * layout.range_y;
            Collectible {
                pos: Vec2::new(x, y),
                radius: layout.radius,
                gathered: false,
                sparkle: 0.0,
            }
        })
        .collect()
}
