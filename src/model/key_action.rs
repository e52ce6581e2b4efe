//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to key bindings.
///
/// These represent operator intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
/// Printable characters are not actions: they are typed into the input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Input line
    /// Submit the input line, or toggle selection when the roster has focus. Default: Enter
    Confirm,
    /// Recall the previous history entry, or move the roster cursor up. Default: ↑
    MoveUp,
    /// Recall the next history entry, or move the roster cursor down. Default: ↓
    MoveDown,
    /// Move the input cursor left. Default: ←
    CursorLeft,
    /// Move the input cursor right. Default: →
    CursorRight,
    /// Move the input cursor to the start. Default: Home/Ctrl+a
    CursorHome,
    /// Move the input cursor to the end. Default: End/Ctrl+e
    CursorEnd,
    /// Delete the character before the cursor. Default: Backspace
    DeleteBackward,
    /// Delete the character under the cursor. Default: Delete
    DeleteForward,
    /// Clear the whole input line. Default: Ctrl+u
    ClearInput,

    // Console scrolling
    /// Scroll the console up one line. Default: Shift+↑
    ScrollUp,
    /// Scroll the console down one line. Default: Shift+↓
    ScrollDown,
    /// Scroll the console up one page. Default: PageUp
    PageUp,
    /// Scroll the console down one page. Default: PageDown
    PageDown,
    /// Jump to the oldest retained line. Default: Ctrl+Home
    ScrollToTop,
    /// Jump to the newest line and resume following. Default: Ctrl+End
    ScrollToBottom,

    // Panels
    /// Switch focus between the input line and the roster. Default: Tab
    CycleFocus,
    /// Close the player detail panel. Default: Esc
    CloseDetail,
    /// Toggle notification sounds. Default: F2
    ToggleMute,

    // Application
    /// Exit the application. Default: Ctrl+c/Ctrl+q
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn actions_are_hashable_and_distinct() {
        let set: HashSet<KeyAction> = [
            KeyAction::Confirm,
            KeyAction::MoveUp,
            KeyAction::MoveDown,
            KeyAction::ToggleMute,
            KeyAction::Quit,
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 5);
    }
}
