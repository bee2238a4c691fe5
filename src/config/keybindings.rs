//! Keyboard bindings configuration.
//!
//! Maps `crossterm` key events to selection-mode actions. No terminal is
//! driven by this crate; the host adapter translates its native key events
//! into this vocabulary before calling the controller.

use crate::model::KeyAction;
use crossterm::event::KeyEvent;
use std::collections::HashMap;

/// Maps keyboard events to selection-mode actions.
///
/// Defaults mirror the common chat-client shortcuts; hosts can rebind via
/// [`KeyBindings::insert`].
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&key).copied()
    }

    /// Bind (or rebind) a key event to an action.
    pub fn insert(&mut self, key: KeyEvent, action: KeyAction) {
        self.bindings.insert(key, action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        use crossterm::event::{KeyCode, KeyModifiers};

        let mut bindings = HashMap::new();

        bindings.insert(
            KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL),
            KeyAction::SelectAll,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL),
            KeyAction::ClearSelection,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('i'), KeyModifiers::CONTROL),
            KeyAction::InvertSelection,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Enter, KeyModifiers::CONTROL),
            KeyAction::CopySelected,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            KeyAction::ExitMode,
        );

        Self { bindings }
    }
}
