//! Input handling
//!
//! Turns raw key/pointer events into jump requests. The very first qualifying
//! input also starts the session; after that only the jump mapping remains.

use crate::consts::JUMP_KEY_CODE;
use crate::sim::{Session, SessionPhase};

/// Raw input delivered by the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// `keydown` with its `KeyboardEvent.code`
    Key(String),
    /// Click/tap on the game container
    PointerActivate,
}

impl InputEvent {
    pub fn key(code: impl Into<String>) -> Self {
        InputEvent::Key(code.into())
    }

    /// Space key or pointer activation
    pub fn is_jump(&self) -> bool {
        match self {
            InputEvent::Key(code) => code == JUMP_KEY_CODE,
            InputEvent::PointerActivate => true,
        }
    }
}

/// Routes input to the session
#[derive(Debug, Clone)]
pub struct InputHandler {
    /// First-interaction listener still registered
    awaiting_first_interaction: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            awaiting_first_interaction: true,
        }
    }

    pub fn awaiting_first_interaction(&self) -> bool {
        self.awaiting_first_interaction
    }

    /// Handle one event. Returns true if a jump started.
    pub fn handle(&mut self, session: &mut Session, event: &InputEvent) -> bool {
        if !event.is_jump() {
            return false;
        }

        if self.awaiting_first_interaction {
            self.awaiting_first_interaction = false;
            if session.phase() == SessionPhase::NotStarted {
                log::debug!("First interaction: {:?}", event);
                session.start();
            }
        }

        session.request_jump()
    }
}
