//! Terminal "table renderer" module.
//!
//! This is a small, game-oriented rendering layer for a terminal card table.
//! It intentionally avoids ratatui widgets/layout and instead paints into a
//! simple framebuffer that can be flushed to a terminal backend region by
//! region.
//!
//! Goals:
//! - Keep `layout` deterministic and testable
//! - Put all clipping behind one drawing-surface contract
//! - Repaint the whole table from state on every change

pub mod fb;
pub mod renderer;
pub mod surface;
pub mod table_view;

pub use card_table_layout as layout;
pub use card_table_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_region_into, TerminalRenderer, TerminalSurface};
pub use surface::{Clip, DrawSurface};
pub use table_view::{CanvasSize, TableView};
