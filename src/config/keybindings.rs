//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Keys without a binding that carry a printable character are typed into the
/// input line by the caller.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Only the code and modifiers take part in the lookup, so press and
    /// repeat events resolve the same way.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings
            .get(&KeyEvent::new(key.code, key.modifiers))
            .copied()
    }

    /// Bind `key` to `action`, replacing any previous binding.
    pub fn bind(&mut self, key: KeyEvent, action: KeyAction) {
        self.bindings.insert(key, action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = HashMap::new();
        let mut bind = |code: KeyCode, modifiers: KeyModifiers, action: KeyAction| {
            bindings.insert(KeyEvent::new(code, modifiers), action);
        };

        // Input line
        bind(KeyCode::Enter, KeyModifiers::NONE, KeyAction::Confirm);
        bind(KeyCode::Up, KeyModifiers::NONE, KeyAction::MoveUp);
        bind(KeyCode::Down, KeyModifiers::NONE, KeyAction::MoveDown);
        bind(KeyCode::Left, KeyModifiers::NONE, KeyAction::CursorLeft);
        bind(KeyCode::Right, KeyModifiers::NONE, KeyAction::CursorRight);
        bind(KeyCode::Home, KeyModifiers::NONE, KeyAction::CursorHome);
        bind(KeyCode::End, KeyModifiers::NONE, KeyAction::CursorEnd);
        bind(KeyCode::Char('a'), KeyModifiers::CONTROL, KeyAction::CursorHome);
        bind(KeyCode::Char('e'), KeyModifiers::CONTROL, KeyAction::CursorEnd);
        bind(KeyCode::Backspace, KeyModifiers::NONE, KeyAction::DeleteBackward);
        bind(KeyCode::Delete, KeyModifiers::NONE, KeyAction::DeleteForward);
        bind(KeyCode::Char('u'), KeyModifiers::CONTROL, KeyAction::ClearInput);

        // Console scrolling
        bind(KeyCode::Up, KeyModifiers::SHIFT, KeyAction::ScrollUp);
        bind(KeyCode::Down, KeyModifiers::SHIFT, KeyAction::ScrollDown);
        bind(KeyCode::PageUp, KeyModifiers::NONE, KeyAction::PageUp);
        bind(KeyCode::PageDown, KeyModifiers::NONE, KeyAction::PageDown);
        bind(KeyCode::Home, KeyModifiers::CONTROL, KeyAction::ScrollToTop);
        bind(KeyCode::End, KeyModifiers::CONTROL, KeyAction::ScrollToBottom);

        // Panels
        bind(KeyCode::Tab, KeyModifiers::NONE, KeyAction::CycleFocus);
        bind(KeyCode::BackTab, KeyModifiers::SHIFT, KeyAction::CycleFocus);
        bind(KeyCode::Esc, KeyModifiers::NONE, KeyAction::CloseDetail);
        bind(KeyCode::F(2), KeyModifiers::NONE, KeyAction::ToggleMute);

        // Application controls
        bind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);
        bind(KeyCode::Char('q'), KeyModifiers::CONTROL, KeyAction::Quit);

        Self { bindings }
    }
}
