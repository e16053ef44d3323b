//! Simulation module
//!
//! All gameplay logic lives here. Nothing in this module touches the host:
//! - Time comes in as `dt`, input as an `InputState` snapshot
//! - Randomness comes from an injected `RandomSource`
//! - Tiles and entities are visited in stable storage order

pub mod camera;
pub mod collision;
pub mod hostile;
pub mod input;
pub mod rng;
pub mod state;
pub mod tick;
pub mod world;

pub use camera::Camera;
pub use collision::{Rect, Resolution, Side, overlaps, resolve_min_axis};
pub use hostile::update_hostile;
pub use input::{Control, InputState, KeyMap};
pub use rng::{RandomSource, ScriptedRandom};
pub use state::{
    Collectible, GamePhase, Hero, Hostile, HostileKind, HudSnapshot, MovementPattern, Particle,
    Projectile, Viewport, WorldState,
};
pub use tick::tick;
pub use world::{BlockType, Tile, WorldGrid};
