//! Key mapping from terminal events to table commands.

use crate::types::{TableCommand, TableState};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to a table command for the current phase.
pub fn map_key(key: KeyEvent, state: Option<TableState>) -> Option<TableCommand> {
    if should_quit(key) {
        return Some(TableCommand::Quit);
    }
    if key.code == KeyCode::Char('?') {
        return Some(TableCommand::ShowHelp);
    }

    match state {
        None | Some(TableState::Starting) => match key.code {
            KeyCode::Char('n') | KeyCode::Char('N') => Some(TableCommand::AddPlayer),
            KeyCode::Char('x') | KeyCode::Char('X') => Some(TableCommand::RemovePlayer),
            KeyCode::Char('s') | KeyCode::Char('S') => Some(TableCommand::Start),
            KeyCode::Char('p') => Some(TableCommand::ShowHelp),
            _ => None,
        },

        Some(TableState::Betting) | Some(TableState::BettingError) => match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => Some(TableCommand::BetDigit(c)),
            KeyCode::Backspace => Some(TableCommand::BetBackspace),
            KeyCode::Enter => Some(TableCommand::BetSubmit),
            _ => None,
        },

        Some(TableState::Turn) => match key.code {
            KeyCode::Char(c) if c.is_ascii_alphanumeric() => {
                Some(TableCommand::Choose(c.to_ascii_lowercase()))
            }
            _ => None,
        },

        Some(TableState::End) => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(TableCommand::Continue),
            KeyCode::Char('n') | KeyCode::Char('N') => Some(TableCommand::Quit),
            KeyCode::Char('p') => Some(TableCommand::ShowHelp),
            _ => None,
        },

        // Dealing is driven by the session, not by keys.
        Some(TableState::Dealing) => None,
    }
}

/// Check if key should quit the table.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
