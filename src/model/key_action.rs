//! Domain-level keyboard actions independent of key bindings.

/// Actions a keyboard shortcut can trigger while selection mode is active.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by
/// [`crate::config::KeyBindings`]; every action is a direct call into the
/// selection engine via the mode controller, never a secondary state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Select every eligible visible message. Default: Ctrl+A
    SelectAll,
    /// Deselect everything. Default: Ctrl+D
    ClearSelection,
    /// Flip membership of every eligible visible message. Default: Ctrl+I
    InvertSelection,
    /// Export the current selection to the clipboard. Default: Ctrl+Enter
    CopySelected,
    /// Leave selection mode, discarding the selection. Default: Esc
    ExitMode,
}
