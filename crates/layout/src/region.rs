//! Region - a rectangle with derived slot anchors
//!
//! Every anchor is a proportional offset from the region's own origin, so a
//! seat keeps the same shape whether it is 20 or 200 columns wide. All results
//! are absolute grid coordinates.
//!
//! Degenerate sizes are accepted: a region narrower or shorter than the fixed
//! row reservations simply yields anchors outside its own bounds, and the
//! drawing surface clips them.

use crate::types::{
    Player, AVATAR_ROWS_RESERVED, BET_ROWS_RESERVED, MONEY_ROWS_RESERVED, NAME_ROWS_RESERVED,
};

/// An absolute grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A square card slot inside a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardSlot {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Named point slots of [`SlotCoords`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Player,
    Name,
    Money,
    Bet,
}

/// Every coordinate needed to paint one seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCoords {
    pub bounds: Region,
    /// Avatar anchor.
    pub player: Point,
    pub cards: Vec<CardSlot>,
    pub money: Point,
    pub bet: Point,
    pub name: Point,
}

impl SlotCoords {
    /// Look up a point slot by name.
    pub fn point(&self, slot: Slot) -> Point {
        match slot {
            Slot::Player => self.player,
            Slot::Name => self.name,
            Slot::Money => self.money,
            Slot::Bet => self.bet,
        }
    }
}

/// A rectangle in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    /// Negative sizes are clamped to zero.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width: if width < 0 { 0 } else { width },
            height: if height < 0 { 0 } else { height },
        }
    }

    /// `(x, y, width, height)`.
    pub fn bounds(&self) -> (i32, i32, i32, i32) {
        (self.x, self.y, self.width, self.height)
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Partial in-place update. `None` leaves a field unchanged.
    pub fn resize(&mut self, x: Option<i32>, width: Option<i32>) {
        if let Some(x) = x {
            self.x = x;
        }
        if let Some(width) = width {
            self.width = width.max(0);
        }
    }

    /// Avatar anchor: left-middle, lifted so the footprint never crosses the bottom edge.
    pub fn player_anchor(&self, avatar_height: i32) -> Point {
        let dx = self.left_column();
        let dy = (self.height - avatar_height - AVATAR_ROWS_RESERVED)
            .min(round_ratio(self.height, 1, 2) + 2);
        self.offset(dx, dy)
    }

    /// `count` square slots laid out left to right.
    pub fn card_slots(&self, count: usize) -> Vec<CardSlot> {
        if count == 0 {
            return Vec::new();
        }
        let n = i32::try_from(count).unwrap_or(i32::MAX);
        let edge = ((self.width - n - 2) / n - 1).min(self.height / 2);
        let y = self.y + ((f64::from(self.height) / 2.0 - f64::from(edge)) / 2.0).trunc() as i32;

        let mut slots = Vec::with_capacity(count);
        let mut x = self.x;
        for _ in 0..count {
            slots.push(CardSlot {
                x: x.saturating_add(1),
                y,
                width: edge,
                height: edge,
            });
            x = x.saturating_add(edge + 2);
        }
        slots
    }

    pub fn money_anchor(&self) -> Point {
        let dy = (self.height - MONEY_ROWS_RESERVED).min(round_ratio(self.height, 1, 2) + 2);
        self.offset(self.right_column(), dy)
    }

    pub fn bet_anchor(&self) -> Point {
        let dy = (self.height - BET_ROWS_RESERVED).min(round_ratio(self.height, 1, 2) + 5);
        self.offset(self.right_column(), dy)
    }

    pub fn name_anchor(&self) -> Point {
        let dy = (self.height - NAME_ROWS_RESERVED).min(round_ratio(self.height, 7, 8));
        self.offset(self.left_column(), dy)
    }

    /// All slot coordinates for `player` in this region.
    pub fn all_coords(&self, player: &Player) -> SlotCoords {
        SlotCoords {
            bounds: *self,
            player: self.player_anchor(player.avatar_size),
            cards: self.card_slots(player.cards.len()),
            money: self.money_anchor(),
            bet: self.bet_anchor(),
            name: self.name_anchor(),
        }
    }

    fn left_column(&self) -> i32 {
        round_ratio(self.width, 1, 8).max(1)
    }

    fn right_column(&self) -> i32 {
        round_ratio(self.width, 5, 8).max(1)
    }

    fn offset(&self, dx: i32, dy: i32) -> Point {
        Point::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

/// `round(value * num / den)` with ties going to the even neighbour.
fn round_ratio(value: i32, num: i32, den: i32) -> i32 {
    (f64::from(value) * f64::from(num) / f64::from(den)).round_ties_even() as i32
}
