//! Card table (workspace facade crate).
//!
//! The layout engine, terminal surface and key mapping live in dedicated crates
//! under `crates/`; this package re-exports them as
//! `card_table::{types,layout,term,input}` and adds the pieces the binary
//! needs: environment configuration and the demo session driver.

pub mod config;
pub mod demo;

pub use card_table_input as input;
pub use card_table_layout as layout;
pub use card_table_term as term;
pub use card_table_types as types;
