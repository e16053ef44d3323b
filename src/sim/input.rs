//! Held-key input state
//!
//! Host key events only ever touch this set. The simulation samples it once
//! per tick and never clears it.

use std::collections::HashSet;

/// Logical controls the simulation understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    MoveLeft,
    MoveRight,
    Jump,
    Dash,
    Attack,
    Start,
    Reset,
}

/// Host key code to control bindings (DOM `KeyboardEvent.code` names)
#[derive(Debug, Clone)]
pub struct KeyMap {
    bindings: Vec<(&'static str, Control)>,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            bindings: vec![
                ("KeyA", Control::MoveLeft),
                ("ArrowLeft", Control::MoveLeft),
                ("KeyD", Control::MoveRight),
                ("ArrowRight", Control::MoveRight),
                ("Space", Control::Jump),
                ("KeyW", Control::Jump),
                ("ArrowUp", Control::Jump),
                ("ShiftLeft", Control::Dash),
                ("ShiftRight", Control::Dash),
                ("KeyK", Control::Attack),
                ("KeyJ", Control::Attack),
                ("Enter", Control::Start),
                ("KeyR", Control::Reset),
            ],
        }
    }
}

impl KeyMap {
    pub fn control_for(&self, code: &str) -> Option<Control> {
        self.bindings
            .iter()
            .find(|(key, _)| *key == code)
            .map(|&(_, control)| control)
    }

    /// First key bound to a control
    pub fn primary_key(&self, control: Control) -> Option<&'static str> {
        self.bindings
            .iter()
            .find(|(_, c)| *c == control)
            .map(|&(key, _)| key)
    }

    /// Whether the browser's default action for this key should be suppressed
    pub fn should_prevent_default(&self, code: &str) -> bool {
        matches!(code, "Space" | "ArrowUp" | "ArrowLeft" | "ArrowRight")
    }
}

/// Set of currently held keys
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keymap: KeyMap,
    pressed: HashSet<&'static str>,
}

impl InputState {
    /// Convenience constructor with the primary key of each control held
    pub fn with_controls(controls: &[Control]) -> Self {
        let mut input = Self::default();
        for &control in controls {
            input.hold(control);
        }
        input
    }

    /// Record a key press; unmapped keys are ignored
    pub fn press(&mut self, code: &str) {
        if let Some(&(key, _)) = self.keymap.bindings.iter().find(|(key, _)| *key == code) {
            self.pressed.insert(key);
        }
    }

    pub fn release(&mut self, code: &str) {
        self.pressed.retain(|key| *key != code);
    }

    /// Hold a control through its primary key
    pub fn hold(&mut self, control: Control) {
        if let Some(key) = self.keymap.primary_key(control) {
            self.pressed.insert(key);
        }
    }

    pub fn clear(&mut self) {
        self.pressed.clear();
    }

    /// A control is held while any key bound to it is held
    pub fn is_held(&self, control: Control) -> bool {
        self.pressed
            .iter()
            .any(|key| self.keymap.control_for(key) == Some(control))
    }

    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }
}
