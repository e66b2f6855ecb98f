//! Platform-specific key bindings

use crossterm::event::KeyModifiers;

/// Modifier for wizard shortcuts, Ctrl on every platform
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Shortcut display strings for the status bar help
pub const NEXT_SHORTCUT: &str = "Ctrl+N";
pub const PREV_SHORTCUT: &str = "Ctrl+P";
pub const GENERATE_SHORTCUT: &str = "Ctrl+G";
pub const ADD_ENTRY_SHORTCUT: &str = "Ctrl+A";
pub const REMOVE_ENTRY_SHORTCUT: &str = "Ctrl+X";
pub const REVIEW_SHORTCUT: &str = "Ctrl+R";

/// Quit confirmation window for a double Ctrl+C
#[cfg(target_os = "macos")]
pub const QUIT_HINT: &str = "Press Ctrl+C again to quit (Cmd+Q closes the terminal)";

#[cfg(not(target_os = "macos"))]
pub const QUIT_HINT: &str = "Press Ctrl+C again to quit";
