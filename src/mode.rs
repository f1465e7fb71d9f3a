//! Explicit input-mode stack.
//!
//! Overlays (help, confirmation, path input) are pushed on top of the base
//! navigation mode and popped when dismissed, so whichever component needs
//! the current mode reads it from this value instead of process-wide state.

use crate::ui::InputMode;

/// Stack of active input modes; the bottom entry is always [`InputMode::Normal`].
#[derive(Debug, Clone)]
pub struct ModeStack {
    stack: Vec<InputMode>,
}

impl ModeStack {
    pub fn new() -> Self {
        Self { stack: vec![InputMode::Normal] }
    }

    /// Push a mode on top of the stack.
    pub fn enter(&mut self, mode: InputMode) {
        self.stack.push(mode);
    }

    /// Pop the top mode, returning it. The base mode is never popped.
    pub fn leave(&mut self) -> Option<InputMode> {
        if self.stack.len() > 1 {
            self.stack.pop()
        } else {
            None
        }
    }

    /// The mode currently in effect.
    pub fn current(&self) -> &InputMode {
        self.stack.last().expect("mode stack holds at least the base mode")
    }
}

impl Default for ModeStack {
    fn default() -> Self {
        Self::new()
    }
}
