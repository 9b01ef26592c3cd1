//! Input handling: key bindings and text-field editing.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Actions available from the main pet list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseAction {
    SelectPrev,
    SelectNext,
    SelectFirst,
    SelectLast,
    AddPet,
    RemovePet,
    ShowDetails,
    MarkTaskDone,
    AddTask,
    AddHealthRecord,
    Refresh,
    ScrollCareUp,
    ScrollCareDown,
    Help,
    Quit,
}

/// One row of the help dialog: keys, then what they do.
pub const KEY_BINDINGS: &[(&str, &str)] = &[
    ("↑/↓ j/k", "select pet"),
    ("a", "add pet"),
    ("x / Del", "remove pet"),
    ("Enter / i", "pet details"),
    ("d", "mark task done"),
    ("t", "add care task"),
    ("h", "add health record"),
    ("PgUp/PgDn", "scroll care tasks"),
    ("F5 / r", "refresh all"),
    ("?", "help"),
    ("q / Esc", "quit"),
];

pub fn is_quit_chord(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

pub fn browse_action(key: &KeyEvent) -> Option<BrowseAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    let action = match key.code {
        KeyCode::Up | KeyCode::Char('k') => BrowseAction::SelectPrev,
        KeyCode::Down | KeyCode::Char('j') => BrowseAction::SelectNext,
        KeyCode::Home | KeyCode::Char('g') => BrowseAction::SelectFirst,
        KeyCode::End | KeyCode::Char('G') => BrowseAction::SelectLast,
        KeyCode::Char('a') => BrowseAction::AddPet,
        KeyCode::Char('x') | KeyCode::Delete => BrowseAction::RemovePet,
        KeyCode::Enter | KeyCode::Char('i') => BrowseAction::ShowDetails,
        KeyCode::Char('d') => BrowseAction::MarkTaskDone,
        KeyCode::Char('t') => BrowseAction::AddTask,
        KeyCode::Char('h') => BrowseAction::AddHealthRecord,
        KeyCode::F(5) | KeyCode::Char('r') => BrowseAction::Refresh,
        KeyCode::PageUp => BrowseAction::ScrollCareUp,
        KeyCode::PageDown => BrowseAction::ScrollCareDown,
        KeyCode::Char('?') => BrowseAction::Help,
        KeyCode::Char('q') | KeyCode::Esc => BrowseAction::Quit,
        _ => return None,
    };
    Some(action)
}

/// Apply an editing key to a single-line text buffer. Returns true when
/// the buffer changed.
pub fn edit_text(buffer: &mut String, key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Backspace => buffer.pop().is_some(),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let changed = !buffer.is_empty();
            buffer.clear();
            changed
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            buffer.push(ch);
            true
        }
        _ => false,
    }
}
