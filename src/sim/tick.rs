//! Variable timestep simulation tick
//!
//! One call advances the scene by the measured frame time. The order of the
//! passes matters and is fixed: hero control, hero physics, terrain, hostiles,
//! transients, interactions, camera, termination.

use glam::Vec2;

use super::collision::{Rect, Side, circles_touch, resolve_min_axis};
use super::hostile::update_hostile;
use super::input::{Control, InputState};
use super::rng::RandomSource;
use super::state::{GamePhase, Hero, Particle, WorldState};
use super::world::WorldGrid;
use crate::consts::*;
use crate::facing_sign;
use crate::tuning::Tuning;

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut WorldState, input: &InputState, dt: f32, rng: &mut dyn RandomSource) {
    match state.phase {
        GamePhase::Start => {
            if input.is_held(Control::Start) {
                state.phase = GamePhase::Playing;
                log::info!("Game started");
            }
            return;
        }
        GamePhase::GameOver => {
            if input.is_held(Control::Reset) {
                state.reset();
                state.phase = GamePhase::Playing;
                log::info!("Game restarted");
            }
            return;
        }
        GamePhase::Playing => {}
    }

    state.current_tick += 1;

    // 1. Hero control
    let attack_started = control_hero(&mut state.hero, input, &state.config.tuning, dt);
    if attack_started {
        melee_strike(state);
    }

    // 2-3. Physics and terrain
    integrate_hero(&mut state.hero, &state.config.tuning, dt);
    resolve_terrain(&mut state.hero, &state.grid, &state.config.tuning);

    // 4. Hostiles
    for hostile in state.hostiles.iter_mut().filter(|h| h.active) {
        if let Some(shot) = update_hostile(hostile, &state.hero, &state.grid, dt, rng) {
            state.projectiles.push(shot);
        }
    }

    // 5. Projectiles, particles, sparkles
    update_transients(state, dt);

    // 6. Pickups and contact
    detect_interactions(state);

    // 7. Camera
    let world_width = state.grid.width();
    state.camera.follow(
        &state.hero,
        &state.viewport,
        world_width,
        &state.config.tuning,
    );

    // 8. Termination
    if state.hero.is_dead() || state.hero_fell_out() {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over at tick {} with {} points",
            state.current_tick,
            state.player_points
        );
    }
}

/// Apply held controls to the hero and advance its timers
///
/// Returns true on the tick an attack begins.
pub fn control_hero(hero: &mut Hero, input: &InputState, tuning: &Tuning, dt: f32) -> bool {
    let grounded = hero.can_jump;

    // Horizontal: right is evaluated second, so it wins facing when both held
    if input.is_held(Control::MoveLeft) {
        hero.vel.x -= tuning.move_accel * dt;
        hero.facing_right = false;
    }
    if input.is_held(Control::MoveRight) {
        hero.vel.x += tuning.move_accel * dt;
        hero.facing_right = true;
    }

    let friction = if grounded {
        tuning.friction_ground
    } else {
        tuning.friction_air
    };
    hero.vel.x *= friction;
    hero.vel.x = hero.vel.x.clamp(-tuning.max_speed, tuning.max_speed);

    if input.is_held(Control::Jump) && (hero.can_jump || hero.coyote_timer > 0.0) {
        hero.vel.y = -tuning.jump_power;
        hero.can_jump = false;
        hero.coyote_timer = 0.0;
    }

    // Dash is a one-off impulse on top of the clamped speed
    if input.is_held(Control::Dash)
        && hero.dash_energy >= tuning.dash_cost
        && hero.dash_cooldown <= 0.0
    {
        hero.vel.x += tuning.dash_force * facing_sign(hero.facing_right);
        hero.dash_energy -= tuning.dash_cost;
        hero.dash_cooldown = tuning.dash_cooldown;
    }

    let attack_started = tuning.attack_enabled
        && input.is_held(Control::Attack)
        && hero.attack_cooldown <= 0.0
        && !hero.is_attacking;
    if attack_started {
        hero.is_attacking = true;
        hero.attack_duration = tuning.attack_duration;
        hero.attack_cooldown = tuning.attack_cooldown;
    }
    if hero.is_attacking {
        hero.attack_duration -= dt;
        if hero.attack_duration <= 0.0 {
            hero.is_attacking = false;
        }
    }

    hero.dash_energy = (hero.dash_energy + tuning.dash_regen * dt).clamp(0.0, MAX_DASH_ENERGY);
    hero.dash_cooldown = (hero.dash_cooldown - dt).max(0.0);
    hero.attack_cooldown = (hero.attack_cooldown - dt).max(0.0);
    hero.invulnerable_time = (hero.invulnerable_time - dt).max(0.0);
    hero.coyote_timer = (hero.coyote_timer - dt).max(0.0);

    hero.animation_phase += hero.vel.x.abs() * WALK_CYCLE_SCALE;

    attack_started
}

/// Hit box of a swing, in front of the hero
pub fn attack_area(hero: &Hero, reach: f32) -> Rect {
    let x = if hero.facing_right {
        hero.pos.x + hero.size.x
    } else {
        hero.pos.x - reach
    };
    Rect::new(x, hero.pos.y, reach, hero.size.y)
}

/// Resolve a melee swing against every active hostile in reach
fn melee_strike(state: &mut WorldState) {
    let tuning = &state.config.tuning;
    let area = attack_area(&state.hero, tuning.attack_range);
    let dir = facing_sign(state.hero.facing_right);
    let damage = tuning.attack_damage;
    let knockback = tuning.attack_knockback;

    let mut defeated = Vec::new();
    let mut impacts = Vec::new();
    for (index, hostile) in state.hostiles.iter_mut().enumerate() {
        if !hostile.active || !hostile.rect().overlaps(&area) {
            continue;
        }
        if hostile.damage(damage) {
            defeated.push(index);
        }
        hostile.pos.x += dir * knockback;
        impacts.push(hostile.center());
    }

    for index in defeated {
        state.award_defeat(index);
    }
    for point in impacts {
        spawn_sparks(&mut state.particles, point, dir);
    }
}

/// Fan of particles thrown away from the hero
fn spawn_sparks(particles: &mut Vec<Particle>, origin: Vec2, dir: f32) {
    for i in 0..PARTICLES_PER_HIT {
        if particles.len() >= MAX_PARTICLES {
            break;
        }
        let spread = i as f32 / (PARTICLES_PER_HIT - 1) as f32 - 0.5;
        particles.push(Particle {
            pos: origin,
            vel: Vec2::new(dir * (120.0 + 40.0 * i as f32), -180.0 + spread * 240.0),
            size: 3.0,
            life: PARTICLE_LIFE,
        });
    }
}

/// Gravity, terminal velocity, then position
pub fn integrate_hero(hero: &mut Hero, tuning: &Tuning, dt: f32) {
    hero.vel.y = (hero.vel.y + tuning.gravity * dt).min(tuning.terminal_velocity);
    hero.pos += hero.vel * dt;
}

/// Push the hero out of every overlapping tile, in grid order
///
/// Each tile is resolved independently along its axis of least penetration,
/// so when the hero straddles several tiles the outcome depends on the
/// row-major order the grid stores them in.
pub fn resolve_terrain(hero: &mut Hero, grid: &WorldGrid, tuning: &Tuning) {
    hero.can_jump = false;

    for tile in grid.tiles() {
        let Some(res) = resolve_min_axis(&hero.rect(), hero.vel, &tile.rect()) else {
            continue;
        };
        hero.pos = res.pos;
        match res.side {
            Side::Top => {
                hero.vel.y = 0.0;
                hero.can_jump = true;
            }
            Side::Bottom => hero.vel.y = 0.0,
            Side::Left | Side::Right => hero.vel.x = 0.0,
        }
    }

    if hero.can_jump {
        hero.coyote_timer = tuning.coyote_time;
    }
}

fn update_transients(state: &mut WorldState, dt: f32) {
    let view = state.view_rect();
    let grid = &state.grid;

    state.projectiles.retain_mut(|shot| {
        if !shot.active {
            return false;
        }
        shot.pos += shot.vel * dt;

        let off_screen = shot.pos.x < view.pos.x - CULL_MARGIN
            || shot.pos.x > view.right() + CULL_MARGIN
            || shot.pos.y > view.bottom() + CULL_MARGIN;
        !off_screen && !grid.solid_at(shot.pos)
    });

    state.particles.retain_mut(|p| {
        p.life -= dt;
        p.vel.y += PARTICLE_GRAVITY * dt;
        p.pos += p.vel * dt;
        p.life > 0.0 && p.pos.y < view.bottom() + CULL_MARGIN
    });

    for item in state.collectibles.iter_mut().filter(|c| !c.gathered) {
        item.sparkle += SPARKLE_STEP;
    }
}

fn detect_interactions(state: &mut WorldState) {
    let tuning = &state.config.tuning;
    let hero = &mut state.hero;

    // Coins
    let center = hero.center();
    for item in state.collectibles.iter_mut().filter(|c| !c.gathered) {
        if circles_touch(center, tuning.pickup_radius, item.pos, item.radius) {
            item.gathered = true;
            state.player_points += tuning.collectible_points;
        }
    }

    // Hostile contact: stomp or get hurt, never both
    let mut defeated = Vec::new();
    for (index, hostile) in state.hostiles.iter_mut().enumerate() {
        if !hostile.active || !hero.rect().overlaps(&hostile.rect()) {
            continue;
        }

        let stomping = hero.vel.y > tuning.stomp_threshold
            && hero.pos.y < hostile.pos.y
            && !hero.is_attacking;
        if stomping {
            if hostile.damage(tuning.stomp_damage) {
                defeated.push(index);
            }
            hero.vel.y = -tuning.stomp_bounce;
        } else if hero.invulnerable_time <= 0.0 {
            hero.take_hit(hostile.kind.contact_damage(), tuning.invulnerability);
            let away = if hero.pos.x < hostile.pos.x { -1.0 } else { 1.0 };
            hero.vel.x = away * tuning.contact_knockback;
        }
    }

    // Enemy shots
    let center = hero.center();
    for shot in state
        .projectiles
        .iter_mut()
        .filter(|p| p.active && p.from_enemy)
    {
        if hero.invulnerable_time <= 0.0
            && circles_touch(center, tuning.pickup_radius, shot.pos, shot.radius)
        {
            hero.take_hit(tuning.projectile_damage, tuning.invulnerability);
            shot.active = false;
        }
    }
    state.projectiles.retain(|p| p.active);

    for index in defeated {
        state.award_defeat(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::ScriptedRandom;
    use crate::sim::state::{Collectible, HostileKind, MovementPattern, Projectile, Viewport};
    use crate::sim::world::{BlockType, Tile};
    use crate::tuning::{CollectibleLayout, HostileSpawn, SceneConfig};

    const DT: f32 = 1.0 / 60.0;
    const GROUND_Y: f32 = 640.0;

    /// Flat 80-column strip with nothing on it
    fn flat_config() -> SceneConfig {
        SceneConfig {
            name: "flat".to_string(),
            columns: 80,
            platforms: Vec::new(),
            hostiles: Vec::new(),
            collectibles: CollectibleLayout {
                count: 0,
                ..SceneConfig::classic().collectibles
            },
            start_screen: false,
            tuning: Tuning::default(),
            ..SceneConfig::classic()
        }
    }

    fn flat_scene() -> WorldState {
        let mut rng = ScriptedRandom::constant(0.0);
        let mut state = WorldState::new(flat_config(), Viewport::default(), &mut rng);
        // Resting on the ground
        state.hero.pos = Vec2::new(100.0, GROUND_Y - 32.0);
        state.hero.can_jump = true;
        state
    }

    fn add_hostile(state: &mut WorldState, x: f32, y: f32, kind: HostileKind) -> usize {
        let spawn = HostileSpawn::new(x, y, MovementPattern::Patrol, kind);
        state
            .hostiles
            .push(crate::sim::state::Hostile::from_spawn(&spawn));
        state.hostiles.len() - 1
    }

    fn run(state: &mut WorldState, input: &InputState, ticks: usize) {
        let mut rng = ScriptedRandom::constant(0.5);
        for _ in 0..ticks {
            tick(state, input, DT, &mut rng);
        }
    }

    #[test]
    fn test_start_screen_waits_for_start() {
        let mut rng = ScriptedRandom::constant(0.0);
        let mut config = flat_config();
        config.start_screen = true;
        let mut state = WorldState::new(config, Viewport::default(), &mut rng);
        assert_eq!(state.phase, GamePhase::Start);

        let before = state.hero.pos;
        run(&mut state, &InputState::with_controls(&[Control::MoveRight]), 10);
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.hero.pos, before);

        run(&mut state, &InputState::with_controls(&[Control::Start]), 1);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_friction_applies_while_moving() {
        let mut hero = Hero::spawn(&Tuning::default());
        let tuning = Tuning::default();
        control_hero(
            &mut hero,
            &InputState::with_controls(&[Control::MoveRight]),
            &tuning,
            DT,
        );
        assert!((hero.vel.x - 1200.0 * DT * 0.85).abs() < 1e-4);
    }

    #[test]
    fn test_air_friction_differs_from_ground() {
        let tuning = SceneConfig::adventure().tuning;
        let mut hero = Hero::spawn(&tuning);

        hero.vel.x = 200.0;
        hero.can_jump = true;
        control_hero(&mut hero, &InputState::default(), &tuning, DT);
        assert!((hero.vel.x - 200.0 * 0.85).abs() < 1e-3);

        hero.vel.x = 200.0;
        hero.can_jump = false;
        control_hero(&mut hero, &InputState::default(), &tuning, DT);
        assert!((hero.vel.x - 200.0 * 0.88).abs() < 1e-3);
    }

    #[test]
    fn test_right_wins_when_both_held() {
        let mut hero = Hero::spawn(&Tuning::default());
        hero.facing_right = false;
        control_hero(
            &mut hero,
            &InputState::with_controls(&[Control::MoveLeft, Control::MoveRight]),
            &Tuning::default(),
            DT,
        );
        assert!(hero.facing_right);
        assert!(hero.vel.x.abs() < 1e-4);
    }

    #[test]
    fn test_speed_clamped() {
        let mut hero = Hero::spawn(&Tuning::default());
        hero.vel.x = 1000.0;
        control_hero(&mut hero, &InputState::default(), &Tuning::default(), DT);
        assert_eq!(hero.vel.x, 250.0);
    }

    #[test]
    fn test_jump_needs_ground() {
        let tuning = Tuning::default();
        let jump = InputState::with_controls(&[Control::Jump]);

        let mut hero = Hero::spawn(&tuning);
        hero.can_jump = false;
        control_hero(&mut hero, &jump, &tuning, DT);
        assert_eq!(hero.vel.y, 0.0);

        hero.can_jump = true;
        control_hero(&mut hero, &jump, &tuning, DT);
        assert_eq!(hero.vel.y, -420.0);
        assert!(!hero.can_jump);
    }

    #[test]
    fn test_coyote_time_grace() {
        let tuning = SceneConfig::adventure().tuning;
        let jump = InputState::with_controls(&[Control::Jump]);
        let mut hero = Hero::spawn(&tuning);
        hero.can_jump = false;
        hero.coyote_timer = 0.05;

        control_hero(&mut hero, &jump, &tuning, DT);
        assert_eq!(hero.vel.y, -420.0);
        assert_eq!(hero.coyote_timer, 0.0);

        // Grace used up: no second jump in the air
        hero.vel.y = 0.0;
        control_hero(&mut hero, &jump, &tuning, DT);
        assert_eq!(hero.vel.y, 0.0);
    }

    #[test]
    fn test_dash_succeeds_and_costs() {
        let tuning = Tuning::default();
        let dash = InputState::with_controls(&[Control::Dash]);
        let mut hero = Hero::spawn(&tuning);
        hero.dash_energy = 80.0;

        control_hero(&mut hero, &dash, &tuning, 0.0);
        assert_eq!(hero.dash_cooldown, 1.0);
        assert_eq!(hero.dash_energy, 30.0);
        assert_eq!(hero.vel.x, 600.0);

        // Cooldown blocks the next dash
        control_hero(&mut hero, &dash, &tuning, 0.0);
        assert_eq!(hero.dash_energy, 30.0);
    }

    #[test]
    fn test_dash_needs_energy() {
        let tuning = Tuning::default();
        let dash = InputState::with_controls(&[Control::Dash]);
        let mut hero = Hero::spawn(&tuning);
        hero.dash_energy = 49.0;
        control_hero(&mut hero, &dash, &tuning, 0.0);
        assert_eq!(hero.dash_cooldown, 0.0);
        assert_eq!(hero.vel.x, 0.0);
    }

    #[test]
    fn test_dash_direction_follows_facing() {
        let tuning = Tuning::default();
        let mut hero = Hero::spawn(&tuning);
        hero.facing_right = false;
        control_hero(
            &mut hero,
            &InputState::with_controls(&[Control::Dash]),
            &tuning,
            0.0,
        );
        assert_eq!(hero.vel.x, -600.0);
    }

    #[test]
    fn test_timers_count_down_to_zero() {
        let tuning = Tuning::default();
        let mut hero = Hero::spawn(&tuning);
        hero.dash_cooldown = 0.1;
        hero.invulnerable_time = 0.1;
        hero.attack_cooldown = 0.1;
        control_hero(&mut hero, &InputState::default(), &tuning, 0.5);
        assert_eq!(hero.dash_cooldown, 0.0);
        assert_eq!(hero.invulnerable_time, 0.0);
        assert_eq!(hero.attack_cooldown, 0.0);
    }

    #[test]
    fn test_landing_exactly_on_top() {
        let tuning = Tuning::default();
        let tile = Tile {
            column: 3,
            row: 20,
            dimensions: 32.0,
            block: BlockType::Surface,
        };
        let grid = WorldGrid::from_tiles(vec![tile], 40, 23);
        let mut hero = Hero::spawn(&tuning);
        hero.pos = Vec2::new(100.0, GROUND_Y - 32.0 - 2.0);
        hero.vel = Vec2::new(0.0, 400.0);

        integrate_hero(&mut hero, &tuning, DT);
        resolve_terrain(&mut hero, &grid, &tuning);

        assert_eq!(hero.pos.y, tile.y() - hero.size.y);
        assert_eq!(hero.vel.y, 0.0);
        assert!(hero.can_jump);
    }

    #[test]
    fn test_can_jump_cleared_in_air() {
        let tuning = Tuning::default();
        let grid = WorldGrid::from_tiles(Vec::new(), 0, 0);
        let mut hero = Hero::spawn(&tuning);
        hero.can_jump = true;
        integrate_hero(&mut hero, &tuning, DT);
        resolve_terrain(&mut hero, &grid, &tuning);
        assert!(!hero.can_jump);
    }

    #[test]
    fn test_seam_resolution_follows_row_major_order() {
        // A wall cell (row 1) above a floor cell (row 2) in column 2. Listing
        // the floor first makes no difference: the grid resolves the wall
        // first, which pushes the hero clear of the floor before it can land.
        let wall = Tile {
            column: 2,
            row: 1,
            dimensions: 32.0,
            block: BlockType::Fill,
        };
        let floor = Tile {
            column: 2,
            row: 2,
            dimensions: 32.0,
            block: BlockType::Surface,
        };
        let grid = WorldGrid::from_tiles(vec![floor, wall], 3, 3);
        assert_eq!(grid.tiles()[0], wall);

        let tuning = Tuning::default();
        let mut hero = Hero::spawn(&tuning);
        hero.pos = Vec2::new(44.0, 36.0);
        hero.vel = Vec2::new(100.0, 100.0);

        resolve_terrain(&mut hero, &grid, &tuning);

        assert_eq!(hero.pos, Vec2::new(40.0, 36.0));
        assert_eq!(hero.vel.x, 0.0);
        assert_eq!(hero.vel.y, 100.0);
        assert!(!hero.can_jump);
    }

    #[test]
    fn test_side_contact_stops_horizontal() {
        let tuning = Tuning::default();
        let wall = Tile {
            column: 5,
            row: 10,
            dimensions: 32.0,
            block: BlockType::Platform,
        };
        let grid = WorldGrid::from_tiles(vec![wall], 10, 11);
        let mut hero = Hero::spawn(&tuning);
        hero.pos = Vec2::new(160.0 - 24.0 + 3.0, 320.0);
        hero.vel = Vec2::new(200.0, 0.0);
        resolve_terrain(&mut hero, &grid, &tuning);
        assert_eq!(hero.pos.x, 160.0 - 24.0);
        assert_eq!(hero.vel.x, 0.0);
    }

    #[test]
    fn test_rest_on_ground_is_stable() {
        let mut state = flat_scene();
        run(&mut state, &InputState::default(), 30);
        assert_eq!(state.hero.pos.y, GROUND_Y - 32.0);
        assert!(state.hero.can_jump);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_contact_damage() {
        let mut state = flat_scene();
        add_hostile(&mut state, 100.0, GROUND_Y - 28.0, HostileKind::Ground);

        run(&mut state, &InputState::default(), 1);

        assert_eq!(state.hero.life_points, 90);
        assert!(state.hero.invulnerable_time > 0.0);
        // The hostile patrolled right of the hero, so the hero is shoved left
        assert_eq!(state.hero.vel.x, -200.0);
    }

    #[test]
    fn test_tank_contact_hurts_more() {
        let mut state = flat_scene();
        add_hostile(&mut state, 110.0, GROUND_Y - 36.0, HostileKind::Tank);
        run(&mut state, &InputState::default(), 1);
        assert_eq!(state.hero.life_points, 85);
        assert_eq!(state.hero.vel.x, -200.0);
    }

    #[test]
    fn test_invulnerability_blocks_damage() {
        let mut state = flat_scene();
        add_hostile(&mut state, 100.0, GROUND_Y - 28.0, HostileKind::Ground);
        state.hero.invulnerable_time = 1.0;
        run(&mut state, &InputState::default(), 1);
        assert_eq!(state.hero.life_points, 100);
    }

    #[test]
    fn test_stomp_defeats_without_damage() {
        let mut state = flat_scene();
        let index = add_hostile(&mut state, 100.0, 580.0, HostileKind::Ground);
        state.hero.pos = Vec2::new(100.0, 560.0);
        state.hero.vel = Vec2::new(0.0, 400.0);
        state.hero.can_jump = false;

        run(&mut state, &InputState::default(), 1);

        assert!(!state.hostiles[index].active);
        assert_eq!(state.hero.vel.y, -300.0);
        assert_eq!(state.hero.life_points, 100);
        assert_eq!(state.player_points, 50);
    }

    #[test]
    fn test_stomp_damages_tough_hostile() {
        let mut state = flat_scene();
        let index = add_hostile(&mut state, 100.0, 580.0, HostileKind::Tank);
        state.hero.pos = Vec2::new(100.0, 550.0);
        state.hero.vel = Vec2::new(0.0, 400.0);
        state.hero.can_jump = false;

        run(&mut state, &InputState::default(), 1);

        assert!(state.hostiles[index].active);
        assert_eq!(state.hostiles[index].health, 15);
        assert_eq!(state.hero.vel.y, -300.0);
        assert_eq!(state.hero.life_points, 100);
        assert_eq!(state.player_points, 0);
    }

    #[test]
    fn test_attack_hits_in_front() {
        let mut state = flat_scene();
        let tank = add_hostile(&mut state, 130.0, GROUND_Y - 36.0, HostileKind::Tank);
        let behind = add_hostile(&mut state, 40.0, GROUND_Y - 28.0, HostileKind::Ground);

        run(&mut state, &InputState::with_controls(&[Control::Attack]), 1);

        assert!(state.hero.is_attacking);
        assert_eq!(state.hostiles[tank].health, 20);
        assert!(state.hostiles[tank].pos.x > 155.0);
        assert_eq!(state.hostiles[behind].health, 10);
        assert!(!state.particles.is_empty());
    }

    #[test]
    fn test_attack_once_per_swing() {
        let mut state = flat_scene();
        let tank = add_hostile(&mut state, 130.0, GROUND_Y - 36.0, HostileKind::Tank);
        state.hostiles[tank].pattern = MovementPattern::Shooter;

        // Holding attack through the whole swing still hits once
        run(&mut state, &InputState::with_controls(&[Control::Attack]), 10);
        assert_eq!(state.hostiles[tank].health, 20);
    }

    #[test]
    fn test_attack_defeat_awards_score_once() {
        let mut state = flat_scene();
        let target = add_hostile(&mut state, 130.0, GROUND_Y - 28.0, HostileKind::Ground);

        run(&mut state, &InputState::with_controls(&[Control::Attack]), 1);
        assert!(!state.hostiles[target].active);
        assert_eq!(state.player_points, 50);

        // Further swings don't award again
        run(&mut state, &InputState::with_controls(&[Control::Attack]), 120);
        assert_eq!(state.player_points, 50);
        assert!(!state.hostiles[target].active);
    }

    #[test]
    fn test_attack_disabled_in_classic() {
        let mut state = flat_scene();
        state.config.tuning.attack_enabled = false;
        add_hostile(&mut state, 130.0, GROUND_Y - 36.0, HostileKind::Tank);
        run(&mut state, &InputState::with_controls(&[Control::Attack]), 1);
        assert!(!state.hero.is_attacking);
        assert_eq!(state.hostiles[0].health, 30);
    }

    #[test]
    fn test_attacking_hero_cannot_stomp() {
        let mut state = flat_scene();
        let index = add_hostile(&mut state, 100.0, 580.0, HostileKind::Ground);
        state.hero.pos = Vec2::new(100.0, 560.0);
        state.hero.vel = Vec2::new(0.0, 400.0);
        state.hero.can_jump = false;
        state.hero.is_attacking = true;
        state.hero.attack_duration = 0.2;

        run(&mut state, &InputState::default(), 1);

        assert!(state.hostiles[index].active);
        assert_eq!(state.hero.life_points, 90);
    }

    #[test]
    fn test_collectible_pickup() {
        let mut state = flat_scene();
        state.collectibles.push(Collectible {
            pos: Vec2::new(120.0, GROUND_Y - 16.0),
            radius: 8.0,
            gathered: false,
            sparkle: 0.0,
        });

        run(&mut state, &InputState::default(), 1);
        assert!(state.collectibles[0].gathered);
        assert_eq!(state.player_points, 100);

        run(&mut state, &InputState::default(), 5);
        assert_eq!(state.player_points, 100);
    }

    #[test]
    fn test_projectile_hit_removes_shot() {
        let mut state = flat_scene();
        let center = state.hero.center();
        state.projectiles.push(Projectile {
            pos: center + Vec2::new(10.0, 0.0),
            vel: Vec2::ZERO,
            radius: 6.0,
            from_enemy: true,
            active: true,
        });

        run(&mut state, &InputState::default(), 1);

        assert_eq!(state.hero.life_points, 95);
        assert!(state.hero.invulnerable_time > 0.0);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_projectile_culled_in_terrain() {
        let mut state = flat_scene();
        state.projectiles.push(Projectile {
            pos: Vec2::new(600.0, GROUND_Y + 10.0),
            vel: Vec2::new(200.0, 0.0),
            radius: 6.0,
            from_enemy: true,
            active: true,
        });
        run(&mut state, &InputState::default(), 1);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_projectile_culled_off_screen() {
        let mut state = flat_scene();
        state.projectiles.push(Projectile {
            pos: Vec2::new(1280.0 + 99.0, 300.0),
            vel: Vec2::new(200.0, 0.0),
            radius: 6.0,
            from_enemy: true,
            active: true,
        });
        run(&mut state, &InputState::default(), 1);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_particles_expire() {
        let mut state = flat_scene();
        spawn_sparks(&mut state.particles, Vec2::new(300.0, 300.0), 1.0);
        assert_eq!(state.particles.len(), PARTICLES_PER_HIT);
        run(&mut state, &InputState::default(), 30);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_death_freezes_until_reset() {
        let mut state = flat_scene();
        add_hostile(&mut state, 100.0, GROUND_Y - 28.0, HostileKind::Ground);
        state.hero.life_points = 5;

        run(&mut state, &InputState::default(), 1);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.hero.life_points, 0);

        let frozen = state.hero.pos;
        run(&mut state, &InputState::with_controls(&[Control::MoveRight]), 20);
        assert_eq!(state.hero.pos, frozen);

        run(&mut state, &InputState::with_controls(&[Control::Reset]), 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.hero.life_points, 100);
        assert_eq!(state.hero.pos, Vec2::new(100.0, 400.0));
    }

    #[test]
    fn test_falling_out_ends_game() {
        let mut state = flat_scene();
        state.hero.pos = Vec2::new(100.0, state.grid.height() + 200.0);
        run(&mut state, &InputState::default(), 1);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_camera_follows_during_play() {
        let mut state = flat_scene();
        state.hero.pos.x = 900.0;
        run(&mut state, &InputState::default(), 1);
        assert!(state.camera.offset.x > 0.0);
    }

    #[test]
    fn test_inactive_hostile_is_inert() {
        let mut state = flat_scene();
        let index = add_hostile(&mut state, 100.0, GROUND_Y - 28.0, HostileKind::Ground);
        state.hostiles[index].active = false;
        let pos = state.hostiles[index].pos;

        run(&mut state, &InputState::default(), 5);

        assert_eq!(state.hostiles[index].pos, pos);
        assert_eq!(state.hero.life_points, 100);
    }

    proptest::proptest! {
        #[test]
        fn prop_speed_and_energy_stay_bounded(
            held in proptest::collection::vec(0u8..8, 1..200),
            dt in 0.001f32..0.05,
        ) {
            let tuning = Tuning::default();
            let mut hero = Hero::spawn(&tuning);
            let controls = [Control::MoveLeft, Control::MoveRight, Control::Jump, Control::Dash];
            for mask in held {
                let active: Vec<Control> = controls
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, c)| *c)
                    .collect();
                let dashed_before = hero.dash_cooldown;
                control_hero(&mut hero, &InputState::with_controls(&active), &tuning, dt);
                proptest::prop_assert!(hero.dash_energy >= 0.0);
                proptest::prop_assert!(hero.dash_energy <= MAX_DASH_ENERGY);
                // Only the dash impulse may exceed the speed cap
                if hero.dash_cooldown <= dashed_before {
                    proptest::prop_assert!(hero.vel.x.abs() <= tuning.max_speed);
                }
            }
        }

        #[test]
        fn prop_friction_decays_idle_speed(vx in -250.0f32..250.0, grounded: bool) {
            let tuning = SceneConfig::adventure().tuning;
            let mut hero = Hero::spawn(&tuning);
            hero.vel.x = vx;
            hero.can_jump = grounded;
            control_hero(&mut hero, &InputState::default(), &tuning, 1.0 / 60.0);
            let factor = if grounded { 0.85 } else { 0.88 };
            proptest::prop_assert!((hero.vel.x - vx * factor).abs() < 1e-3);
            proptest::prop_assert!(hero.vel.x.abs() <= vx.abs());
        }
    }
}
