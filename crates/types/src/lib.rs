//! Core types module - shared data structures and constants
//!
//! This module defines the plain data model the table renderer consumes.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (layout math, terminal rendering, game drivers).
//!
//! # Table Layout Constants
//!
//! The anchor formulas reserve a few rows at the bottom of every region:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MONEY_ROWS_RESERVED` | 6 | Rows kept below the money label |
//! | `BET_ROWS_RESERVED` | 4 | Rows kept below the bet label |
//! | `NAME_ROWS_RESERVED` | 3 | Rows kept below the name |
//! | `AVATAR_ROWS_RESERVED` | 2 | Rows kept below the avatar footprint |
//!
//! Terminals smaller than these still lay out; slots simply land outside the
//! canvas and are clipped by the drawing surface.
//!
//! # Examples
//!
//! ```
//! use card_table_types::{Card, ColorId, Player, PlayerId, Suit, TableState};
//!
//! let mut player = Player::new(PlayerId(1), "Ada", 100);
//! player.cards.push(Card::new("A", Suit::Spades));
//! assert_eq!(player.cards[0].color, ColorId::CardBlack);
//!
//! assert_eq!(TableState::BettingError.as_str(), "betting_error");
//! ```

use std::fmt;

/// Rows kept free below the avatar footprint.
pub const AVATAR_ROWS_RESERVED: i32 = 2;

/// Rows kept free below the money label.
pub const MONEY_ROWS_RESERVED: i32 = 6;

/// Rows kept free below the bet label.
pub const BET_ROWS_RESERVED: i32 = 4;

/// Rows kept free below the name.
pub const NAME_ROWS_RESERVED: i32 = 3;

/// Stable identifier for a seat at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Logical color pairs.
///
/// The rendering layer maps each id to a concrete terminal style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorId {
    #[default]
    Default,
    /// Card background.
    CardFace,
    CardBlack,
    CardRed,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
}

impl ColorId {
    /// Player colors handed out in join order.
    pub const PLAYER_PALETTE: [ColorId; 6] = [
        ColorId::Red,
        ColorId::Green,
        ColorId::Yellow,
        ColorId::Blue,
        ColorId::Magenta,
        ColorId::Cyan,
    ];
}

/// French playing-card suits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    /// Single-glyph suit symbol.
    pub fn symbol(&self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }

    /// Red for hearts and diamonds, black otherwise.
    pub fn color(&self) -> ColorId {
        match self {
            Suit::Hearts | Suit::Diamonds => ColorId::CardRed,
            Suit::Spades | Suit::Clubs => ColorId::CardBlack,
        }
    }
}

/// A card as the renderer sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Face value label ("A", "10", "K", ...).
    pub label: String,
    pub symbol: char,
    pub color: ColorId,
    pub face_down: bool,
}

impl Card {
    pub fn new(label: impl Into<String>, suit: Suit) -> Self {
        Self {
            label: label.into(),
            symbol: suit.symbol(),
            color: suit.color(),
            face_down: false,
        }
    }

    pub fn face_down(mut self) -> Self {
        self.face_down = true;
        self
    }
}

/// Built-in avatar footprints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AvatarShape {
    /// A small stick figure, 4 rows tall.
    Stick,
    /// A filled 3x3 block.
    Block,
    /// A hollow diamond, 5 rows tall.
    Diamond,
}

impl AvatarShape {
    pub const ALL: [AvatarShape; 3] = [AvatarShape::Stick, AvatarShape::Block, AvatarShape::Diamond];

    /// Cell offsets relative to the avatar anchor, as `(dx, dy)`.
    pub fn offsets(&self) -> &'static [(i32, i32)] {
        match self {
            AvatarShape::Stick => &[(1, 0), (0, 1), (1, 1), (2, 1), (1, 2), (0, 3), (2, 3)],
            AvatarShape::Block => &[
                (0, 0),
                (1, 0),
                (2, 0),
                (0, 1),
                (1, 1),
                (2, 1),
                (0, 2),
                (1, 2),
                (2, 2),
            ],
            AvatarShape::Diamond => &[(2, 0), (1, 1), (3, 1), (0, 2), (4, 2), (1, 3), (3, 3), (2, 4)],
        }
    }

    /// Footprint height in rows.
    pub fn height(&self) -> i32 {
        match self {
            AvatarShape::Stick => 4,
            AvatarShape::Block => 3,
            AvatarShape::Diamond => 5,
        }
    }
}

/// A seat at the table (players and the dealer alike).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub money: i64,
    pub bet: i64,
    pub cards: Vec<Card>,
    /// Avatar cell offsets `(dx, dy)` relative to the avatar anchor.
    pub avatar: Vec<(i32, i32)>,
    /// Avatar footprint height in rows.
    pub avatar_size: i32,
    pub symbol: char,
    pub color: ColorId,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, money: i64) -> Self {
        let shape = AvatarShape::Stick;
        Self {
            id,
            name: name.into(),
            money,
            bet: 0,
            cards: Vec::new(),
            avatar: shape.offsets().to_vec(),
            avatar_size: shape.height(),
            symbol: '#',
            color: ColorId::Default,
        }
    }

    pub fn with_avatar(mut self, shape: AvatarShape) -> Self {
        self.avatar = shape.offsets().to_vec();
        self.avatar_size = shape.height();
        self
    }

    pub fn with_style(mut self, symbol: char, color: ColorId) -> Self {
        self.symbol = symbol;
        self.color = color;
        self
    }
}

/// One selectable action in a turn prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOption {
    /// Key the player types to pick the option.
    pub value: String,
    pub name: String,
}

impl TurnOption {
    pub fn new(value: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            name: name.into(),
        }
    }
}

/// Whose turn it is, and what they may do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnState {
    pub player: PlayerId,
    pub options: Vec<TurnOption>,
}

impl TurnState {
    pub fn new(player: PlayerId, options: Vec<TurnOption>) -> Self {
        Self { player, options }
    }
}

/// Table phases driving the dealer-area prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableState {
    Starting,
    Betting,
    /// Betting prompt re-shown after a rejected bet.
    BettingError,
    Dealing,
    Turn,
    End,
}

impl TableState {
    /// Snake_case name, as used in log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            TableState::Starting => "starting",
            TableState::Betting => "betting",
            TableState::BettingError => "betting_error",
            TableState::Dealing => "dealing",
            TableState::Turn => "turn",
            TableState::End => "end",
        }
    }
}

/// Player intents decoded from the keyboard.
///
/// Keys are overloaded across phases ('n' adds a player before the round and
/// declines another round at the end), so decoding needs the current
/// [`TableState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableCommand {
    /// Seat another player (starting phase)
    AddPlayer,
    /// Unseat the most recent player (starting phase)
    RemovePlayer,
    /// Close the lobby and open betting
    Start,
    /// Append a digit to the bet being typed
    BetDigit(char),
    /// Delete the last typed digit
    BetBackspace,
    /// Submit the typed bet
    BetSubmit,
    /// Pick the turn option with this value
    Choose(char),
    /// Play another round
    Continue,
    /// Flash a one-shot status message
    ShowHelp,
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_names_are_snake_case() {
        assert_eq!(TableState::Starting.as_str(), "starting");
        assert_eq!(TableState::BettingError.as_str(), "betting_error");
        assert_eq!(TableState::End.as_str(), "end");
    }

    #[test]
    fn avatar_heights_cover_offsets() {
        for shape in AvatarShape::ALL {
            let max_dy = shape.offsets().iter().map(|&(_, dy)| dy).max().unwrap();
            assert_eq!(max_dy + 1, shape.height());
        }
    }

    #[test]
    fn red_suits_are_red() {
        assert_eq!(Card::new("Q", Suit::Hearts).color, ColorId::CardRed);
        assert_eq!(Card::new("Q", Suit::Diamonds).color, ColorId::CardRed);
        assert_eq!(Card::new("Q", Suit::Clubs).color, ColorId::CardBlack);
        assert!(Card::new("2", Suit::Clubs).face_down().face_down);
    }
}
