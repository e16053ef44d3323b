//! Game cycle driver
//!
//! Owns the world state and, once per host frame, measures elapsed time,
//! runs one simulation tick and draws the result. The host only supplies
//! timestamps, key events and a renderer.

use crate::error::GameError;
use crate::renderer::{Frame, Renderer};
use crate::settings::Settings;
use crate::sim::input::InputState;
use crate::sim::rng::RandomSource;
use crate::sim::state::{HudSnapshot, Viewport, WorldState};
use crate::sim::tick::tick;

pub struct GameLoop {
    state: WorldState,
    input: InputState,
    settings: Settings,
    rng: Box<dyn RandomSource>,
    /// Host timestamp of the previous frame (ms)
    previous_timestamp: f64,
}

impl GameLoop {
    /// Build the scene selected by `settings`. `started_at` is the host
    /// clock reading (ms) the first frame is measured against.
    pub fn new(
        settings: Settings,
        viewport: Viewport,
        mut rng: Box<dyn RandomSource>,
        started_at: f64,
    ) -> Self {
        let state = WorldState::new(settings.scene_config(), viewport, rng.as_mut());
        Self {
            state,
            input: InputState::default(),
            settings,
            rng,
            previous_timestamp: started_at,
        }
    }

    pub fn state(&self) -> &WorldState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn hud(&self) -> HudSnapshot {
        self.state.hud()
    }

    /// Host key press (a `KeyboardEvent.code`)
    pub fn key_down(&mut self, code: &str) {
        self.input.press(code);
    }

    pub fn key_up(&mut self, code: &str) {
        self.input.release(code);
    }

    /// Drop every held key (e.g. when the page loses focus)
    pub fn release_all(&mut self) {
        self.input.clear();
    }

    /// Whether the host should suppress its default action for this key
    pub fn captures_key(&self, code: &str) -> bool {
        self.input.keymap().should_prevent_default(code)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }

    /// Run one cycle: measure dt, tick, draw
    pub fn frame(&mut self, now_ms: f64, renderer: &mut dyn Renderer) -> Result<(), GameError> {
        let measured = ((now_ms - self.previous_timestamp) / 1000.0) as f32;
        self.previous_timestamp = now_ms;
        let dt = self.settings.clamp_dt(measured);

        tick(&mut self.state, &self.input, dt, self.rng.as_mut());

        renderer.draw(&Frame::capture(&self.state))
    }
}
