//! Demo session - a toy betting round driven through the table view.
//!
//! There are no game rules here beyond dealing and taking turns; the session
//! exists to walk the view through every table state:
//!
//! Starting -> Betting (-> BettingError) -> Dealing -> Turn -> End -> Starting
//!
//! Each seated player bets in join order, gets two cards, then hits or stands.
//! The dealer's second card stays face down until the round ends.

use tracing::{debug, info};

use crate::config::TableConfig;
use crate::input::BetEntry;
use crate::term::{CanvasSize, DrawSurface, TableView};
use crate::types::{
    AvatarShape, Card, ColorId, Player, PlayerId, Suit, TableCommand, TableState, TurnOption,
    TurnState,
};

/// Money every new player sits down with.
pub const STARTING_MONEY: i64 = 1000;

/// Hands stop taking cards at this size.
pub const MAX_HAND: usize = 5;

const DEALER_ID: PlayerId = PlayerId(0);

const LABELS: [&str; 13] = [
    "A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K",
];

const HELP: &str = "n: join  x: leave  s: start  q: quit";

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // Seed 0 is remapped so it matches seed 1.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Random value in `[0, max)`.
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Fisher-Yates shuffle.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// A 52-card deck that reshuffles itself when it runs out.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    rng: SimpleRng,
}

impl Deck {
    pub fn new(seed: u32) -> Self {
        let mut deck = Self {
            cards: Vec::with_capacity(52),
            rng: SimpleRng::new(seed),
        };
        deck.reshuffle();
        deck
    }

    /// Put all 52 cards back and shuffle.
    pub fn reshuffle(&mut self) {
        self.cards.clear();
        for suit in Suit::ALL {
            for label in LABELS {
                self.cards.push(Card::new(label, suit));
            }
        }
        self.rng.shuffle(&mut self.cards);
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn draw(&mut self) -> Card {
        if self.cards.is_empty() {
            debug!("deck exhausted, reshuffling");
            self.reshuffle();
        }
        match self.cards.pop() {
            Some(card) => card,
            // A fresh deck is never empty.
            None => Card::new("A", Suit::Spades),
        }
    }
}

/// One table session, from the lobby to quitting.
pub struct DemoSession<S: DrawSurface> {
    view: TableView<S>,
    deck: Deck,
    bet: BetEntry,
    max_players: usize,
    bet_min: i64,
    bet_max: i64,
    next_id: u32,
    /// Seat index of the player betting or acting.
    current: usize,
    finished: bool,
}

impl<S: DrawSurface> DemoSession<S> {
    /// Open the table in the starting state and paint it.
    pub fn new(surface: S, canvas: CanvasSize, config: &TableConfig) -> Self {
        let mut view =
            TableView::new(surface, canvas).with_bet_limits(config.bet_min, config.bet_max);
        view.set_max_players(config.max_players);
        view.set_dealer(Self::dealer());

        let mut session = Self {
            view,
            deck: Deck::new(config.seed),
            bet: BetEntry::new(),
            max_players: config.max_players,
            bet_min: config.bet_min,
            bet_max: config.bet_max,
            next_id: 1,
            current: 0,
            finished: false,
        };
        session.view.set_state(TableState::Starting);
        session
    }

    pub fn view(&self) -> &TableView<S> {
        &self.view
    }

    pub fn state(&self) -> Option<TableState> {
        self.view.state()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Apply one decoded command. Commands that make no sense in the current
    /// state are ignored.
    pub fn handle(&mut self, cmd: TableCommand) {
        if self.finished {
            return;
        }
        let state = self.view.state().unwrap_or(TableState::Starting);
        match (state, cmd) {
            (_, TableCommand::Quit) => {
                info!("session closed");
                self.finished = true;
            }
            (_, TableCommand::ShowHelp) => self.view.print(HELP),

            (TableState::Starting, TableCommand::AddPlayer) => self.add_player(),
            (TableState::Starting, TableCommand::RemovePlayer) => self.remove_last_player(),
            (TableState::Starting, TableCommand::Start) => self.start_betting(),

            (TableState::Betting | TableState::BettingError, TableCommand::BetDigit(c)) => {
                self.bet.push(c);
                self.show_bet_entry();
            }
            (TableState::Betting | TableState::BettingError, TableCommand::BetBackspace) => {
                self.bet.backspace();
                self.view.refresh();
                self.show_bet_entry();
            }
            (TableState::Betting | TableState::BettingError, TableCommand::BetSubmit) => {
                self.submit_bet()
            }

            (TableState::Turn, TableCommand::Choose('h')) => self.hit(),
            (TableState::Turn, TableCommand::Choose('s')) => self.next_turn(),

            (TableState::End, TableCommand::Continue) => self.new_round(),

            _ => {}
        }
    }

    fn dealer() -> Player {
        Player::new(DEALER_ID, "Dealer", 0)
            .with_avatar(AvatarShape::Diamond)
            .with_style('*', ColorId::Default)
    }

    fn seated(&self) -> Vec<PlayerId> {
        self.view.players().map(|p| p.id).collect()
    }

    fn add_player(&mut self) {
        if self.view.allocator().len() >= self.max_players {
            self.view.print("The table is full");
            return;
        }
        let id = PlayerId(self.next_id);
        let n = self.next_id as usize - 1;
        let color = ColorId::PLAYER_PALETTE[n % ColorId::PLAYER_PALETTE.len()];
        let shape = AvatarShape::ALL[n % AvatarShape::ALL.len()];
        let player = Player::new(id, format!("Player {}", self.next_id), STARTING_MONEY)
            .with_avatar(shape)
            .with_style('#', color);

        match self.view.add_player(player) {
            Ok(()) => self.next_id += 1,
            Err(err) => self.view.print(err.to_string()),
        }
    }

    fn remove_last_player(&mut self) {
        let Some(&id) = self.seated().last() else {
            self.view.print("Nobody is seated");
            return;
        };
        if let Err(err) = self.view.remove_player(id) {
            self.view.print(err.to_string());
        }
    }

    fn start_betting(&mut self) {
        if self.view.allocator().is_empty() {
            self.view.print("Add a player first");
            return;
        }
        self.current = 0;
        self.bet.clear();
        self.prompt_bet(TableState::Betting);
    }

    /// Mark the current bettor and show the betting prompt.
    fn prompt_bet(&mut self, state: TableState) {
        if let Some(&id) = self.seated().get(self.current) {
            self.view.set_turn(TurnState::new(id, Vec::new()));
        }
        self.view.set_state(state);
        self.show_bet_entry();
    }

    /// Echo the typed digits at the prompt's input position.
    fn show_bet_entry(&mut self) {
        let canvas = self.view.canvas();
        let (y, x) = (canvas.height / 4 + 2, canvas.width * 3 / 4);
        let typed = self.bet.as_str().to_string();
        let pane = self.view.dealer_pane();

        let surface = self.view.surface_mut();
        surface.put_str(y, x, &typed, ColorId::Default);
        surface.move_cursor(y, x + typed.chars().count() as i32);
        surface.flush(pane);
    }

    fn submit_bet(&mut self) {
        let seated = self.seated();
        let Some(&id) = seated.get(self.current) else {
            self.deal();
            return;
        };
        let Some(mut player) = self.view.player(id).cloned() else {
            return;
        };

        let max = self.bet_max.min(player.money);
        match self.bet.submit(self.bet_min, max) {
            Ok(amount) => {
                debug!(player = %id, amount, "bet placed");
                player.bet = amount;
                player.money -= amount;
                if let Err(err) = self.view.update_player(player) {
                    self.view.print(err.to_string());
                }
                self.current += 1;
                if self.current < seated.len() {
                    self.prompt_bet(TableState::Betting);
                } else {
                    self.deal();
                }
            }
            Err(err) => {
                debug!(player = %id, %err, "bet rejected");
                self.prompt_bet(TableState::BettingError);
            }
        }
    }

    fn deal(&mut self) {
        self.view.clear_turn();
        self.view.set_state(TableState::Dealing);

        for id in self.seated() {
            if let Some(mut player) = self.view.player(id).cloned() {
                player.cards = vec![self.deck.draw(), self.deck.draw()];
                if let Err(err) = self.view.update_player(player) {
                    self.view.print(err.to_string());
                }
            }
        }
        let mut dealer = Self::dealer();
        dealer.cards = vec![self.deck.draw(), self.deck.draw().face_down()];
        self.view.update_dealer(dealer);

        self.current = 0;
        self.show_turn();
    }

    fn show_turn(&mut self) {
        let Some(&id) = self.seated().get(self.current) else {
            self.end_round();
            return;
        };
        let options = vec![TurnOption::new("h", "Hit"), TurnOption::new("s", "Stand")];
        self.view.set_turn(TurnState::new(id, options));
        self.view.set_state(TableState::Turn);
    }

    fn hit(&mut self) {
        let Some(&id) = self.seated().get(self.current) else {
            return;
        };
        let Some(mut player) = self.view.player(id).cloned() else {
            return;
        };
        player.cards.push(self.deck.draw());
        let full = player.cards.len() >= MAX_HAND;
        if let Err(err) = self.view.update_player(player) {
            self.view.print(err.to_string());
        }
        if full {
            self.next_turn();
        }
    }

    fn next_turn(&mut self) {
        self.current += 1;
        self.show_turn();
    }

    fn end_round(&mut self) {
        if let Some(mut dealer) = self.view.dealer().cloned() {
            for card in &mut dealer.cards {
                card.face_down = false;
            }
            self.view.set_dealer(dealer);
        }
        self.view.clear_turn();
        self.view.set_state(TableState::End);
    }

    /// Clear the table and reseat everyone with empty hands.
    fn new_round(&mut self) {
        let players: Vec<Player> = self.view.players().cloned().collect();
        self.view.restart();
        self.view.set_dealer(Self::dealer());
        for mut player in players {
            player.cards.clear();
            player.bet = 0;
            if let Err(err) = self.view.add_player(player) {
                self.view.print(err.to_string());
            }
        }
        self.deck.reshuffle();
        self.view.set_state(TableState::Starting);
    }
}
