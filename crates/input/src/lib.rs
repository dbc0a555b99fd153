//! Terminal input module (table-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::TableCommand`]s for the current
//! table phase and provides the small line editor behind the betting prompt.

pub mod handler;
pub mod map;

pub use card_table_types as types;

pub use handler::{BetEntry, BetError};
pub use map::{map_key, should_quit};
