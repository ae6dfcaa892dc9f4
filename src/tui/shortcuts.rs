//! Centralized keyboard shortcuts.
//!
//! | Action         | Keys                          |
//! |----------------|-------------------------------|
//! | Next mode      | Tab                           |
//! | Previous mode  | Shift+Tab                     |
//! | Jump to mode   | Alt+1 .. Alt+4                |
//! | Toggle theme   | Ctrl+T                        |
//! | Toggle sidebar | Ctrl+B                        |
//! | Speak / stop   | Ctrl+S                        |
//! | Copy solution  | Ctrl+Y                        |
//! | Cancel request | Esc                           |
//! | Quit           | Ctrl+C                        |
//!
//! Mode-local keys (Enter, arrows, typing) are handled in `handlers::input`.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::Mode;

/// Detected shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    NextMode,
    PrevMode,
    SelectMode(Mode),
    ToggleTheme,
    ToggleSidebar,
    ToggleSpeech,
    Copy,
    Cancel,
    Quit,
}

impl Shortcut {
    /// Returns the shortcut if the key matches one. Releases and repeats are ignored.
    pub fn match_key(key: &KeyEvent) -> Option<Shortcut> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        match key.code {
            KeyCode::Char('c') if ctrl => Some(Shortcut::Quit),
            KeyCode::Char('t') if ctrl => Some(Shortcut::ToggleTheme),
            KeyCode::Char('b') if ctrl => Some(Shortcut::ToggleSidebar),
            KeyCode::Char('s') if ctrl => Some(Shortcut::ToggleSpeech),
            KeyCode::Char('y') if ctrl => Some(Shortcut::Copy),
            KeyCode::Char(c @ '1'..='4') if alt => {
                let index = c as usize - '1' as usize;
                Some(Shortcut::SelectMode(Mode::ALL[index]))
            }
            KeyCode::BackTab => Some(Shortcut::PrevMode),
            KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => {
                Some(Shortcut::PrevMode)
            }
            KeyCode::Tab => Some(Shortcut::NextMode),
            KeyCode::Esc => Some(Shortcut::Cancel),
            _ => None,
        }
    }
}
