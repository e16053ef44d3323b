//! Hostile behavior, one state machine per movement pattern

use glam::Vec2;

use super::rng::RandomSource;
use super::state::{Hero, Hostile, MovementPattern, Projectile};
use super::world::WorldGrid;
use crate::consts::*;

/// Gravity applied to hopping hostiles (px/s²)
pub const HOP_GRAVITY: f32 = 800.0;
/// Base and random extra upward speed of a hop (px/s)
pub const HOP_BASE: f32 = 300.0;
pub const HOP_EXTRA: f32 = 150.0;
/// Flight oscillation speeds (px/s)
pub const FLY_SPEED_X: f32 = 100.0;
pub const FLY_SPEED_Y: f32 = 50.0;
/// Walking speed of the `Tank` pattern (px/s)
pub const TANK_PATTERN_SPEED: f32 = 40.0;
/// Horizontal distance at which shooters open fire
pub const SHOOT_RANGE: f32 = 400.0;
pub const SHOOT_INTERVAL: f32 = 2.0;

/// Advance one active hostile. Returns a projectile when a shooter fires.
pub fn update_hostile(
    hostile: &mut Hostile,
    hero: &Hero,
    grid: &WorldGrid,
    dt: f32,
    rng: &mut dyn RandomSource,
) -> Option<Projectile> {
    hostile.anim_cycle += HOSTILE_ANIM_STEP;

    match hostile.pattern {
        MovementPattern::Patrol => {
            let speed = hostile.kind.patrol_speed();
            patrol(hostile, speed, dt);
            None
        }
        MovementPattern::Tank => {
            patrol(hostile, TANK_PATTERN_SPEED, dt);
            None
        }
        MovementPattern::Jump => {
            hop(hostile, grid, dt, rng);
            None
        }
        MovementPattern::Flying => {
            hostile.pos.x += (hostile.anim_cycle * 0.5).sin() * FLY_SPEED_X * dt;
            hostile.pos.y += (hostile.anim_cycle * 0.3).cos() * FLY_SPEED_Y * dt;
            None
        }
        MovementPattern::Shooter => shoot(hostile, hero, dt),
    }
}

/// Reverse once past the range, then step
fn patrol(hostile: &mut Hostile, speed: f32, dt: f32) {
    if (hostile.pos.x - hostile.patrol_origin).abs() > hostile.patrol_range {
        hostile.patrol_direction = -hostile.patrol_direction;
    }
    hostile.pos.x += hostile.patrol_direction * speed * dt;
}

fn hop(hostile: &mut Hostile, grid: &WorldGrid, dt: f32, rng: &mut dyn RandomSource) {
    hostile.vel.y += HOP_GRAVITY * dt;
    hostile.pos.y += hostile.vel.y * dt;

    for tile in grid.tiles() {
        let tile_rect = tile.rect();
        if hostile.rect().overlaps(&tile_rect) && hostile.vel.y > 0.0 {
            hostile.pos.y = tile_rect.pos.y - hostile.size.y;
            hostile.vel.y = -(HOP_BASE + rng.next_unit() * HOP_EXTRA);
        }
    }
}

fn shoot(hostile: &mut Hostile, hero: &Hero, dt: f32) -> Option<Projectile> {
    hostile.shoot_cooldown -= dt;
    if hostile.shoot_cooldown > 0.0 {
        return None;
    }
    if (hero.pos.x - hostile.pos.x).abs() >= SHOOT_RANGE {
        return None;
    }

    hostile.shoot_cooldown = SHOOT_INTERVAL;
    let dir = if hero.pos.x > hostile.pos.x { 1.0 } else { -1.0 };
    Some(Projectile {
        pos: hostile.center(),
        vel: Vec2::new(dir * PROJECTILE_SPEED, 0.0),
        radius: PROJECTILE_RADIUS,
        from_enemy: true,
        active: true,
    })
}
