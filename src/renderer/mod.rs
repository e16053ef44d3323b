//! Rendering module
//!
//! The simulation only decides what exists and where (`Frame`); a `Renderer`
//! turns that into pixels. The browser build paints with Canvas2D.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use scene::{
    CoinSprite, Frame, HeroSprite, HostileSprite, HudLayer, Overlay, ShotSprite, SparkSprite,
};

use crate::error::GameError;

/// Pixel output for one frame
pub trait Renderer {
    fn draw(&mut self, frame: &Frame) -> Result<(), GameError>;
}
