//! Error taxonomy
//!
//! Only two outcomes exist at runtime: stop the scene, or skip and continue.
//! The latter (optional HUD elements) never surfaces as an error value.

use thiserror::Error;

/// Errors that stop the scene
#[derive(Debug, Error)]
pub enum GameError {
    /// The required drawing surface could not be obtained
    #[error("render surface unavailable: {0}")]
    SurfaceMissing(String),

    /// A renderer failed while drawing a frame
    #[error("render failed: {0}")]
    Render(String),

    /// Host-provided settings could not be parsed
    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),
}
