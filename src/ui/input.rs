//! Input handling for the notewalk TUI.
//!
//! Key events are translated into commands depending on the mode currently
//! on top of the mode stack: Normal navigation, Goto path input,
//! Confirmation dialogs, and the Help overlay.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// The current input mode of the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    /// Normal navigation mode for browsing the tree.
    Normal,
    /// Direct path entry for jumping anywhere in the store.
    Goto,
    /// Confirmation mode for destructive actions.
    Confirm(ConfirmAction),
    /// Help overlay showing all keyboard shortcuts.
    Help,
}

/// Actions that require user confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    /// Remove the selected node (and its subtree) from the view.
    DeleteNode,
}

/// Commands that can be issued by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Move selection up one row.
    MoveUp,
    /// Move selection down one row.
    MoveDown,
    /// Page up navigation.
    PageUp,
    /// Page down navigation.
    PageDown,
    /// Jump to the first row.
    GotoTop,
    /// Jump to the last row.
    GotoBottom,
    /// Jump to the previous sibling of the selected row.
    PrevSibling,
    /// Jump to the next sibling of the selected row.
    NextSibling,
    /// Jump to the parent of the selected row.
    GotoParent,
    /// Navigate to the selected row, fetching its subtree if needed.
    Enter,
    /// Drop the selected node's loaded children (back to the lazy state).
    Collapse,
    /// Ask to delete the selected node from the view.
    Delete,
    /// Re-expand the current path from the store.
    Refresh,
    /// Enter goto-path input mode.
    StartGoto,
    /// Add a character to the goto input.
    GotoInput(char),
    /// Remove the last character from the goto input.
    GotoBackspace,
    /// Confirm the goto input and navigate.
    ConfirmGoto,
    /// Cancel goto input.
    CancelGoto,
    /// Confirm the pending action (in Confirm mode).
    Confirm,
    /// Cancel the pending action (in Confirm mode).
    Cancel,
    /// Show the help overlay.
    ShowHelp,
    /// Hide the help overlay.
    HideHelp,
    /// Quit the application.
    Quit,
    /// No operation - key was not recognized in the current mode.
    Noop,
}

/// Handle a key event and return the corresponding command for the mode
/// currently in effect.
pub fn handle_key(key: KeyEvent, mode: &InputMode) -> Command {
    match mode {
        InputMode::Normal => handle_normal_mode(key),
        InputMode::Goto => handle_goto_mode(key),
        InputMode::Confirm(_) => handle_confirm_mode(key),
        InputMode::Help => handle_help_mode(key),
    }
}

/// Handle key events in Normal mode.
fn handle_normal_mode(key: KeyEvent) -> Command {
    match key.code {
        // Row navigation
        KeyCode::Char('j') | KeyCode::Down => Command::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Command::MoveUp,

        // Page navigation
        KeyCode::PageUp => Command::PageUp,
        KeyCode::PageDown => Command::PageDown,
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => Command::PageUp,
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => Command::PageDown,

        // Jump to top / bottom
        KeyCode::Char('g') => Command::GotoTop,
        KeyCode::Char('G') => Command::GotoBottom,

        // Sibling and ancestor jumps
        KeyCode::Char('K') => Command::PrevSibling,
        KeyCode::Char('J') => Command::NextSibling,
        KeyCode::Backspace => Command::GotoParent,

        // Reveal / collapse
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Enter => Command::Enter,
        KeyCode::Char('h') | KeyCode::Left => Command::Collapse,

        // Delete (with confirmation)
        KeyCode::Char('d') => Command::Delete,

        // Refresh the current path from the store
        KeyCode::Char('r') => Command::Refresh,

        // Direct path entry
        KeyCode::Char('p') | KeyCode::Char('/') => Command::StartGoto,

        // Help
        KeyCode::Char('?') => Command::ShowHelp,

        // Quit
        KeyCode::Char('q') | KeyCode::Esc => Command::Quit,

        _ => Command::Noop,
    }
}

/// Handle key events in Goto mode.
fn handle_goto_mode(key: KeyEvent) -> Command {
    match key.code {
        KeyCode::Esc => Command::CancelGoto,
        KeyCode::Enter => Command::ConfirmGoto,
        KeyCode::Backspace => Command::GotoBackspace,
        KeyCode::Char(c) if c.is_ascii_graphic() => Command::GotoInput(c),
        _ => Command::Noop,
    }
}

/// Handle key events in Confirm mode.
fn handle_confirm_mode(key: KeyEvent) -> Command {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Command::Confirm,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Command::Cancel,
        _ => Command::Noop,
    }
}

/// Handle key events in Help mode.
fn handle_help_mode(_key: KeyEvent) -> Command {
    // Any key closes help
    Command::HideHelp
}
