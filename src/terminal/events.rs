use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::terminal::state::AppState;

/// What the run loop has to do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    /// Read the headers from the source (needs a redraw while pending).
    Fetch,
    Export,
}

pub fn handle_key(key: KeyEvent, state: &mut AppState) -> Action {
    if key.kind != KeyEventKind::Press {
        return Action::None;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('h') | KeyCode::Enter => Action::Fetch,
        KeyCode::Char('c') => Action::Export,
        KeyCode::Down | KeyCode::Char('j') => {
            state.scroll_headers(1);
            Action::None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.scroll_headers(-1);
            Action::None
        }
        KeyCode::PageDown => {
            state.scroll_headers(10);
            Action::None
        }
        KeyCode::PageUp => {
            state.scroll_headers(-10);
            Action::None
        }
        KeyCode::Home => {
            state.headers_scroll = 0;
            Action::None
        }
        _ => Action::None,
    }
}
