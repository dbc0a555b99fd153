//! Layout module - pure, deterministic table geometry
//!
//! This crate turns a rectangle and a player count into cell coordinates for
//! everything drawn at a card table. It has **zero dependencies** on terminal
//! I/O, so every formula can be unit-tested in isolation.
//!
//! # Module Structure
//!
//! - [`region`]: a rectangle plus the derived slot anchors (avatar, name,
//!   money, bet, card row)
//! - [`allocator`]: splits a horizontal band into one region per player and
//!   re-flows it on every join
//! - [`error`]: lookup failures
//!
//! # Example
//!
//! ```
//! use card_table_layout::RegionAllocator;
//! use card_table_types::PlayerId;
//!
//! let mut band = RegionAllocator::new(0, 0, 80, 20);
//! for id in 1..=3 {
//!     band.add_player(PlayerId(id)).unwrap();
//! }
//!
//! let xs: Vec<i32> = band.iter().map(|(_, r)| r.x).collect();
//! assert_eq!(xs, vec![0, 26, 52]);
//! assert!(band.iter().all(|(_, r)| r.width == 25));
//! ```
//!
//! # Rounding
//!
//! Positions use round-half-to-even on the real quotient while sizes use
//! integer division. Both are kept exactly; moving either by one cell shifts
//! whole columns of the table.

pub mod allocator;
pub mod error;
pub mod region;

pub use card_table_types as types;

pub use allocator::RegionAllocator;
pub use error::LayoutError;
pub use region::{CardSlot, Point, Region, Slot, SlotCoords};
