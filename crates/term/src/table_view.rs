//! TableView: maps table state onto a drawing surface.
//!
//! The view owns the geometry (dealer pane, player pane, dealer seat and the
//! player band) and the display state. Every mutation repaints both panes
//! from scratch; nothing is diffed at this level.
//!
//! Repaint order matters because later draws must not be wiped by earlier
//! clears:
//!
//! 1. dealer pane: clear, box, dealer seat, state prompt, one-shot message
//! 2. player pane: clear, box, turn marker, every seat in join order
//! 3. park the betting cursor, if any, since clearing a pane drops it
//! 4. flush the player pane, then the dealer pane

use tracing::{debug, warn};

use crate::layout::{CardSlot, LayoutError, Region, RegionAllocator, SlotCoords};
use crate::surface::{Clip, DrawSurface};
use crate::types::{Card, ColorId, Player, PlayerId, TableState, TurnState};

const TURN_MARKER: &str = "[Your Turn]";
const BET_ERROR: &str = "Error: Bet too large or not an integer";

/// Canvas dimensions, fixed for the whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: i32,
    pub height: i32,
}

impl CanvasSize {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Usable canvas of a `cols` x `rows` terminal. The last row and column
    /// stay free so writing the bottom-right cell never scrolls.
    pub fn from_terminal(cols: u16, rows: u16) -> Self {
        Self::new(i32::from(cols) - 1, i32::from(rows) - 1)
    }

    /// Upper pane: full width, just under half the height.
    pub fn dealer_pane(&self) -> Region {
        Region::new(0, 0, self.width, (self.height / 2 - 1).max(1))
    }

    /// Lower pane, starting one row below the middle.
    pub fn player_pane(&self) -> Region {
        Region::new(
            0,
            (self.height / 2 + 1).max(1),
            self.width,
            (self.height / 2).max(1),
        )
    }

    /// The dealer's seat: top-left quarter of the canvas.
    pub fn dealer_seat(&self) -> Region {
        Region::new(
            0,
            0,
            (self.width / 2 - 1).max(1),
            (self.height / 2 - 1).max(1),
        )
    }
}

/// A card table painted on a [`DrawSurface`].
pub struct TableView<S: DrawSurface> {
    surface: S,
    canvas: CanvasSize,
    dealer_pane: Region,
    player_pane: Region,
    /// Player seats, in player-pane coordinates.
    allocator: RegionAllocator,
    players: Vec<Player>,
    dealer: Option<(Player, Region)>,
    state: Option<TableState>,
    turn: Option<TurnState>,
    printed_message: Option<String>,
    max_players: Option<usize>,
    bet_min: i64,
    bet_max: i64,
}

impl<S: DrawSurface> TableView<S> {
    pub fn new(surface: S, canvas: CanvasSize) -> Self {
        let dealer_pane = canvas.dealer_pane();
        let player_pane = canvas.player_pane();
        let allocator = RegionAllocator::new(0, 0, canvas.width - 1, player_pane.height);
        Self {
            surface,
            canvas,
            dealer_pane,
            player_pane,
            allocator,
            players: Vec::new(),
            dealer: None,
            state: None,
            turn: None,
            printed_message: None,
            max_players: None,
            bet_min: 1,
            bet_max: 500,
        }
    }

    /// Bounds shown in the betting prompt.
    pub fn with_bet_limits(mut self, min: i64, max: i64) -> Self {
        self.bet_min = min;
        self.bet_max = max;
        self
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn dealer_pane(&self) -> Region {
        self.dealer_pane
    }

    pub fn player_pane(&self) -> Region {
        self.player_pane
    }

    pub fn allocator(&self) -> &RegionAllocator {
        &self.allocator
    }

    pub fn state(&self) -> Option<TableState> {
        self.state
    }

    pub fn turn(&self) -> Option<&TurnState> {
        self.turn.as_ref()
    }

    pub fn dealer(&self) -> Option<&Player> {
        self.dealer.as_ref().map(|(dealer, _)| dealer)
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Seated players in join order.
    pub fn players(&self) -> impl Iterator<Item = &Player> + '_ {
        self.allocator.iter().filter_map(|(id, _)| self.player(id))
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn set_state(&mut self, state: TableState) {
        debug!(state = state.as_str(), "table state changed");
        self.state = Some(state);
        self.refresh();
    }

    pub fn set_turn(&mut self, turn: TurnState) {
        debug!(player = %turn.player, options = turn.options.len(), "turn changed");
        self.turn = Some(turn);
        self.refresh();
    }

    pub fn clear_turn(&mut self) {
        self.turn = None;
        self.refresh();
    }

    /// Show `msg` over the dealer pane for exactly one repaint.
    pub fn print(&mut self, msg: impl Into<String>) {
        self.printed_message = Some(msg.into());
        self.refresh();
    }

    pub fn set_max_players(&mut self, max_players: usize) {
        self.max_players = Some(max_players);
    }

    pub fn add_player(&mut self, player: Player) -> Result<(), LayoutError> {
        self.allocator.add_player(player.id)?;
        debug!(player = %player.id, name = %player.name, "player joined");
        self.players.push(player);
        self.refresh();
        Ok(())
    }

    pub fn remove_player(&mut self, id: PlayerId) -> Result<Player, LayoutError> {
        let idx = self
            .players
            .iter()
            .position(|p| p.id == id)
            .ok_or(LayoutError::PlayerNotFound(id))?;
        self.allocator.remove_player(id)?;
        let player = self.players.remove(idx);
        debug!(player = %id, "player left");
        self.refresh();
        Ok(player)
    }

    /// Replace the stored copy of a seated player and repaint.
    pub fn update_player(&mut self, player: Player) -> Result<(), LayoutError> {
        let slot = self
            .players
            .iter_mut()
            .find(|p| p.id == player.id)
            .ok_or(LayoutError::PlayerNotFound(player.id))?;
        *slot = player;
        self.refresh();
        Ok(())
    }

    /// Seat the dealer in the top-left quarter. Does not repaint.
    pub fn set_dealer(&mut self, dealer: Player) {
        self.dealer = Some((dealer, self.canvas.dealer_seat()));
    }

    pub fn update_dealer(&mut self, dealer: Player) {
        self.set_dealer(dealer);
        self.refresh();
    }

    /// Back to an empty table in the starting state. Does not repaint.
    pub fn restart(&mut self) {
        self.players.clear();
        self.state = Some(TableState::Starting);
        self.turn = None;
        self.printed_message = None;
        self.allocator.restart();
    }

    /// Repaint everything from current state.
    pub fn refresh(&mut self) {
        let canvas = self.canvas;
        let prompt = Prompt {
            canvas,
            max_players: self.max_players,
            bet_min: self.bet_min,
            bet_max: self.bet_max,
        };

        let cursor = {
            let mut pane = Clip::new(&mut self.surface, self.dealer_pane);
            let area = pane.local_area();
            pane.clear_region(area);
            pane.draw_box(area);

            if let Some((dealer, seat)) = &self.dealer {
                paint_seat(&mut pane, dealer, &seat.all_coords(dealer));
            }
            let cursor = match self.state {
                Some(state) => prompt.paint(&mut pane, state, self.turn.as_ref()),
                None => None,
            };
            if let Some(msg) = self.printed_message.take() {
                prompt.paint_message(&mut pane, &msg);
            }
            cursor
        };

        {
            let mut pane = Clip::new(&mut self.surface, self.player_pane);
            let area = pane.local_area();
            pane.clear_region(area);
            pane.draw_box(area);

            if let Some(turn) = &self.turn {
                match self.allocator.region(turn.player) {
                    Ok(seat) => paint_turn_marker(&mut pane, seat),
                    Err(err) => warn!(%err, "turn marker skipped"),
                }
            }
            for (id, _) in self.allocator.iter() {
                let Some(player) = self.players.iter().find(|p| p.id == id) else {
                    warn!(player = %id, "seat without player data skipped");
                    continue;
                };
                match self.allocator.coords(player) {
                    Ok(coords) => paint_seat(&mut pane, player, &coords),
                    Err(err) => warn!(%err, "seat skipped"),
                }
            }
        }

        // Clearing a pane may drop a pending cursor, so park it after both.
        if let Some((y, x)) = cursor {
            self.surface.move_cursor(y, x);
        }
        self.surface.flush(self.player_pane);
        self.surface.flush(self.dealer_pane);
    }
}

/// State-specific text blocks for the dealer pane.
struct Prompt {
    canvas: CanvasSize,
    max_players: Option<usize>,
    bet_min: i64,
    bet_max: i64,
}

impl Prompt {
    /// Paint the block for `state`; returns where the input cursor should go.
    fn paint<D: DrawSurface + ?Sized>(
        &self,
        out: &mut D,
        state: TableState,
        turn: Option<&TurnState>,
    ) -> Option<(i32, i32)> {
        let (w, h) = (self.canvas.width, self.canvas.height);
        match state {
            TableState::Starting => {
                let msg1 = "Press 'n' to add more players";
                let msg2 = "Press 's' to start";
                let msg3 = match self.max_players {
                    Some(max) => format!("(MAX PLAYERS: {max})"),
                    None => "(MAX PLAYERS: -)".to_string(),
                };
                let y = scaled(h, 1.0 / 4.0).round_ties_even() as i32;
                out.put_str(y, self.centered_col(msg1), msg1, ColorId::Default);
                out.put_str(y + 1, self.centered_col(msg2), msg2, ColorId::Default);
                // Aligned with the line above it, not centred on its own length.
                out.put_str(y + 3, self.centered_col(msg2), &msg3, ColorId::Default);
                None
            }
            TableState::Betting | TableState::BettingError => {
                let msg1 = format!(
                    "Type your bet ({} - {}) and hit [Enter]",
                    self.bet_min, self.bet_max
                );
                let y = h / 4;
                out.put_str(y, self.prompt_col(&msg1), &msg1, ColorId::Default);
                if state == TableState::BettingError {
                    out.put_str(y + 1, self.prompt_col(BET_ERROR), BET_ERROR, ColorId::Default);
                }
                Some((h / 4 + 2, w * 3 / 4))
            }
            TableState::Dealing => {
                self.paint_line(out, "Dealing ...");
                None
            }
            TableState::Turn => {
                if let Some(turn) = turn {
                    let x = (w / 2).max(scaled(w, 5.0 / 8.0).trunc() as i32);
                    for (i, option) in turn.options.iter().enumerate() {
                        let y = 2 * i as i32 + h / 8;
                        let msg = format!("[{}] - {} ", option.value, option.name);
                        out.put_str(y, x, &msg, ColorId::Default);
                    }
                }
                None
            }
            TableState::End => {
                self.paint_line(out, "Round over! Would you like to keep playing? (y/n)");
                None
            }
        }
    }

    fn paint_message<D: DrawSurface + ?Sized>(&self, out: &mut D, msg: &str) {
        let (w, h) = (self.canvas.width, self.canvas.height);
        let y = scaled(h, 3.0 / 8.0).trunc() as i32;
        let x = self.prompt_col(msg);
        if (0..h).contains(&y) && (0..w).contains(&x) {
            out.put_str(y, x, msg, ColorId::Default);
        }
    }

    fn paint_line<D: DrawSurface + ?Sized>(&self, out: &mut D, msg: &str) {
        out.put_str(self.canvas.height / 4, self.prompt_col(msg), msg, ColorId::Default);
    }

    /// Column that centres `text` on the right half of the canvas.
    fn centered_col(&self, text: &str) -> i32 {
        let half_len = text.chars().count() as f64 / 2.0;
        (scaled(self.canvas.width, 3.0 / 4.0) - half_len).trunc() as i32
    }

    /// Like [`Prompt::centered_col`] but never left of the canvas middle.
    fn prompt_col(&self, text: &str) -> i32 {
        (self.canvas.width / 2).max(self.centered_col(text))
    }
}

fn scaled(value: i32, factor: f64) -> f64 {
    f64::from(value) * factor
}

fn paint_turn_marker<D: DrawSurface + ?Sized>(out: &mut D, seat: &Region) {
    let len = TURN_MARKER.chars().count() as f64;
    let dx = ((f64::from(seat.width) / 2.0 - len / 2.0).trunc() as i32).max(0);
    out.put_str(
        seat.y + seat.height - 2,
        seat.x + dx,
        TURN_MARKER,
        ColorId::Default,
    );
}

fn paint_seat<D: DrawSurface + ?Sized>(out: &mut D, player: &Player, coords: &SlotCoords) {
    let anchor = coords.player;
    for &(dx, dy) in &player.avatar {
        out.put_char(anchor.y + dy, anchor.x + dx, player.symbol, player.color);
    }

    let name = coords.name;
    out.put_str(name.y, name.x, &player.name, ColorId::Default);

    let money = coords.money;
    out.put_str(money.y, money.x, "Money", ColorId::Default);
    out.put_str(money.y + 1, money.x, &player.money.to_string(), ColorId::Default);

    let bet = coords.bet;
    out.put_str(bet.y, bet.x, "Bet", ColorId::Default);
    out.put_str(bet.y + 1, bet.x, &player.bet.to_string(), ColorId::Default);

    for (card, slot) in player.cards.iter().zip(&coords.cards) {
        paint_card(out, card, slot);
    }

    let seat = coords.bounds;
    for y in seat.y..seat.y + seat.height - 2 {
        out.put_char(y, seat.x, '|', ColorId::Default);
        out.put_char(y, seat.x + seat.width - 1, '|', ColorId::Default);
    }
}

fn paint_card<D: DrawSurface + ?Sized>(out: &mut D, card: &Card, slot: &CardSlot) {
    let CardSlot {
        x,
        y,
        width: w,
        height: h,
    } = *slot;

    // The face is one column wider than tall to look square in a terminal.
    let fill = |out: &mut D, ch: char, color: ColorId| {
        for row in y..y + h {
            for col in x..=x + w {
                out.put_char(row, col, ch, color);
            }
        }
    };

    fill(out, ' ', ColorId::CardFace);
    if card.face_down {
        fill(out, '@', ColorId::CardBlack);
        return;
    }

    out.put_char(y, x, card.symbol, card.color);
    out.put_char(y + h - 1, x + w - 1, card.symbol, card.color);
    out.put_str(y + h / 2, x + w / 2, &card.label, card.color);
}
