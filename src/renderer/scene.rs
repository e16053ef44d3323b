//! Drawable scene description
//!
//! A `Frame` is a snapshot of what is on screen and where. It is built from
//! the `WorldState` after each tick and handed to a `Renderer`, which owns
//! every decision about how things look.

use glam::Vec2;

use crate::consts::*;
use crate::sim::collision::Rect;
use crate::sim::state::{GamePhase, Hero, HostileKind, Viewport, WorldState};
use crate::sim::tick::attack_area;
use crate::sim::world::Tile;

/// Number of ticks in one blink cycle step
const BLINK_PERIOD: u64 = 120;

/// The hero as drawn
#[derive(Debug, Clone, PartialEq)]
pub struct HeroSprite {
    pub pos: Vec2,
    pub size: Vec2,
    pub facing_right: bool,
    /// 0.5 on the "off" beats of the invulnerability flash
    pub alpha: f32,
    pub walk_phase: f32,
    pub eyes_open: bool,
    /// Afterimages are drawn while the dash is cooling down
    pub dash_trail: bool,
    /// Swing progress in `[0, 1]` while attacking
    pub swing: Option<f32>,
    /// Hit box of the current swing
    pub swing_area: Option<Rect>,
}

impl HeroSprite {
    fn capture(hero: &Hero, attack_duration: f32, attack_range: f32, tick: u64) -> Self {
        let flashing = hero.invulnerable_time > 0.0
            && ((hero.invulnerable_time * 10.0).floor() as i64) % 2 == 0;

        let swing = hero.is_attacking.then(|| {
            if attack_duration > 0.0 {
                (1.0 - hero.attack_duration / attack_duration).clamp(0.0, 1.0)
            } else {
                1.0
            }
        });

        Self {
            pos: hero.pos,
            size: hero.size,
            facing_right: hero.facing_right,
            alpha: if flashing { 0.5 } else { 1.0 },
            walk_phase: hero.animation_phase,
            eyes_open: (tick / BLINK_PERIOD) % 20 < 18,
            dash_trail: hero.dash_cooldown > 0.0,
            swing,
            swing_area: hero
                .is_attacking
                .then(|| attack_area(hero, attack_range)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HostileSprite {
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: HostileKind,
    pub anim_cycle: f32,
    /// Remaining health in `[0, 1]` for kinds that show a bar
    pub health_fraction: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoinSprite {
    pub center: Vec2,
    pub radius: f32,
    /// Size multiplier, `1 ± 0.2`
    pub pulse: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotSprite {
    pub center: Vec2,
    pub radius: f32,
    pub from_enemy: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparkSprite {
    pub pos: Vec2,
    pub size: f32,
    pub alpha: f32,
}

/// Screen-space status display
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudLayer {
    /// Dash energy as a fraction of the maximum
    pub dash_fraction: f32,
    /// Enough energy banked for a dash
    pub dash_ready: bool,
    pub player_points: u64,
    pub life_points: u32,
}

/// Full-screen message drawn over the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Start,
    GameOver,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// World-space top-left of the view
    pub camera: Vec2,
    pub viewport: Viewport,
    /// Horizontal shift of the far background layer
    pub parallax_offset: f32,
    pub tick: u64,
    pub tiles: Vec<Tile>,
    pub collectibles: Vec<CoinSprite>,
    pub projectiles: Vec<ShotSprite>,
    pub hostiles: Vec<HostileSprite>,
    pub hero: HeroSprite,
    pub particles: Vec<SparkSprite>,
    pub hud: HudLayer,
    pub overlay: Option<Overlay>,
}

impl Frame {
    /// Snapshot the scene as seen through the camera
    pub fn capture(state: &WorldState) -> Self {
        let tuning = state.tuning();
        let camera = state.camera.offset;
        let margin = state.grid.tile_size();
        let view = state.view_rect();
        let culling = Rect::new(
            view.pos.x - margin,
            view.pos.y - margin,
            view.size.x + 2.0 * margin,
            view.size.y + 2.0 * margin,
        );

        let tiles = state.grid.visible(&culling).copied().collect();

        let collectibles = state
            .collectibles
            .iter()
            .filter(|c| !c.gathered)
            .map(|c| CoinSprite {
                center: c.pos,
                radius: c.radius,
                pulse: 1.0 + c.sparkle.sin() * 0.2,
            })
            .collect();

        let projectiles = state
            .projectiles
            .iter()
            .filter(|p| p.active)
            .map(|p| ShotSprite {
                center: p.pos,
                radius: p.radius,
                from_enemy: p.from_enemy,
            })
            .collect();

        let hostiles = state
            .hostiles
            .iter()
            .filter(|h| h.active)
            .map(|h| HostileSprite {
                pos: h.pos,
                size: h.size,
                kind: h.kind,
                anim_cycle: h.anim_cycle,
                health_fraction: h.kind.shows_health().then(|| {
                    (h.health as f32 / h.kind.max_health() as f32).clamp(0.0, 1.0)
                }),
            })
            .collect();

        let particles = state
            .particles
            .iter()
            .map(|p| SparkSprite {
                pos: p.pos,
                size: p.size,
                alpha: (p.life / PARTICLE_LIFE).clamp(0.0, 1.0),
            })
            .collect();

        let hero = &state.hero;
        let hud = HudLayer {
            dash_fraction: (hero.dash_energy / MAX_DASH_ENERGY).clamp(0.0, 1.0),
            dash_ready: hero.dash_energy >= tuning.dash_cost,
            player_points: state.player_points,
            life_points: hero.life_points,
        };

        let overlay = match state.phase {
            GamePhase::Start => Some(Overlay::Start),
            GamePhase::GameOver => Some(Overlay::GameOver),
            GamePhase::Playing => None,
        };

        Self {
            camera,
            viewport: state.viewport,
            parallax_offset: camera.x * PARALLAX_FACTOR,
            tick: state.current_tick,
            tiles,
            collectibles,
            projectiles,
            hostiles,
            hero: HeroSprite::capture(
                hero,
                tuning.attack_duration,
                tuning.attack_range,
                state.current_tick,
            ),
            particles,
            hud,
            overlay,
        }
    }

    /// World to screen coordinates
    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        world - self.camera
    }
}
