use card_table::layout::{LayoutError, Region};
use card_table::term::{
    CanvasSize, CellStyle, DrawSurface, FrameBuffer, TableView, TerminalSurface,
};
use card_table::types::{
    AvatarShape, Card, ColorId, Player, PlayerId, Suit, TableState, TurnOption, TurnState,
};

fn table() -> TableView<FrameBuffer> {
    // An 81x25 terminal.
    TableView::new(FrameBuffer::new(81, 25), CanvasSize::new(80, 24))
}

fn ch(view: &TableView<FrameBuffer>, x: u16, y: u16) -> char {
    view.surface().get(x, y).unwrap().ch
}

fn row(view: &TableView<FrameBuffer>, y: u16, x: usize, len: usize) -> String {
    view.surface().row_string(y).chars().skip(x).take(len).collect()
}

/// Records flushes; drops everything else.
#[derive(Default)]
struct FlushLog {
    flushed: Vec<Region>,
}

impl DrawSurface for FlushLog {
    fn clear_region(&mut self, _region: Region) {}
    fn draw_box(&mut self, _region: Region) {}
    fn put_char(&mut self, _y: i32, _x: i32, _ch: char, _color: ColorId) {}
    fn flush(&mut self, region: Region) {
        self.flushed.push(region);
    }
    fn move_cursor(&mut self, _y: i32, _x: i32) {}
}

#[test]
fn panes_are_boxed() {
    let mut view = table();
    view.refresh();

    assert_eq!(ch(&view, 0, 0), '┌');
    assert_eq!(ch(&view, 79, 0), '┐');
    assert_eq!(ch(&view, 0, 10), '└');
    assert_eq!(ch(&view, 0, 13), '┌');
    assert_eq!(ch(&view, 79, 24), '┘');
    // The rows between the panes stay blank.
    assert_eq!(view.surface().row_string(11).trim(), "");
    assert_eq!(view.surface().row_string(12).trim(), "");
}

#[test]
fn starting_prompt_is_placed_on_the_right() {
    let mut view = table();
    view.set_max_players(4);
    view.set_state(TableState::Starting);

    // round(24 / 4) = 6; columns are trunc(60 - len / 2).
    assert_eq!(row(&view, 6, 45, 29), "Press 'n' to add more players");
    assert_eq!(row(&view, 7, 51, 18), "Press 's' to start");
    assert_eq!(row(&view, 9, 51, 16), "(MAX PLAYERS: 4)");
}

#[test]
fn betting_prompt_parks_the_cursor() {
    let mut view = table().with_bet_limits(5, 50);
    view.set_state(TableState::Betting);
    assert!(view.surface().to_text().contains("Type your bet (5 - 50) and hit [Enter]"));
    assert_eq!(view.surface().cursor(), Some((60, 8)));

    view.set_state(TableState::BettingError);
    assert!(view
        .surface()
        .to_text()
        .contains("Error: Bet too large or not an integer"));
}

#[test]
fn terminal_surface_keeps_the_betting_cursor() {
    let canvas = CanvasSize::new(80, 24);
    let mut view = TableView::new(TerminalSurface::new(canvas), canvas);
    view.set_state(TableState::Betting);
    assert_eq!(view.surface().framebuffer().cursor(), Some((60, 8)));

    view.set_state(TableState::Dealing);
    assert_eq!(view.surface().framebuffer().cursor(), None);
}

#[test]
fn dealing_and_end_prompts_use_the_prompt_column() {
    let mut view = table();
    view.set_state(TableState::Dealing);
    // trunc(60 - 11 / 2) = 54 on row 24 / 4 = 6.
    assert_eq!(row(&view, 6, 54, 11), "Dealing ...");

    view.set_state(TableState::End);
    // trunc(60 - 49 / 2) = 35, pushed right to the middle column 40; the
    // tail past the pane's last column is dropped.
    assert_eq!(
        row(&view, 6, 40, 40),
        "Round over! Would you like to keep playi"
    );
    assert_eq!(ch(&view, 80, 6), ' ');
    assert!(!view.surface().to_text().contains("Dealing"));
}

#[test]
fn turn_options_are_listed_two_rows_apart() {
    let mut view = table();
    view.add_player(Player::new(PlayerId(1), "Ada", 100)).unwrap();
    let options = vec![TurnOption::new("h", "Hit"), TurnOption::new("s", "Stand")];
    view.set_turn(TurnState::new(PlayerId(1), options));
    view.set_state(TableState::Turn);

    // Column max(40, trunc(80 * 5 / 8)) = 50; rows 2i + 24 / 8.
    assert_eq!(row(&view, 3, 50, 10), "[h] - Hit ");
    assert_eq!(row(&view, 5, 50, 12), "[s] - Stand ");
    assert_eq!(row(&view, 4, 50, 12).trim(), "");
}

#[test]
fn printed_message_lasts_one_repaint() {
    let mut view = table();
    view.print("Dealer shuffles");
    // trunc(24 * 3 / 8) = 9
    assert!(view.surface().row_string(9).contains("Dealer shuffles"));

    view.refresh();
    assert!(!view.surface().to_text().contains("Dealer shuffles"));
}

#[test]
fn seats_show_name_money_and_bet() {
    let mut view = table();
    let mut ada = Player::new(PlayerId(1), "Ada", 750);
    ada.bet = 25;
    view.add_player(ada).unwrap();

    let text = view.surface().to_text();
    for expected in ["Ada", "Money", "750", "Bet", "25"] {
        assert!(text.contains(expected), "missing {expected}");
    }
}

#[test]
fn seat_sides_are_marked_above_the_marker_row() {
    let mut view = table();
    view.add_player(Player::new(PlayerId(1), "Ada", 100)).unwrap();

    // Seat (0, 0, 39, 12) in the player pane at row 13: sides on rows
    // 13..23 at columns 0 and 38.
    for y in 13..23 {
        assert_eq!(ch(&view, 0, y), '|', "left side, row {y}");
        assert_eq!(ch(&view, 38, y), '|', "right side, row {y}");
    }
    // The last two seat rows keep the pane border and stay open.
    assert_eq!(ch(&view, 0, 23), '│');
    assert_eq!(ch(&view, 38, 23), ' ');
}

#[test]
fn avatar_is_drawn_in_player_color() {
    let mut view = table();
    let ada = Player::new(PlayerId(1), "Ada", 100)
        .with_avatar(AvatarShape::Block)
        .with_style('%', ColorId::Green);
    view.add_player(ada).unwrap();

    // Anchor dx = round(39 / 8) = 5, dy = min(12 - 3 - 2, 6 + 2) = 7,
    // so the 3x3 block starts at (5, 13 + 7).
    for (x, y) in [(5, 20), (6, 20), (7, 20), (5, 21), (7, 21)] {
        let cell = view.surface().get(x, y).unwrap();
        assert_eq!(cell.ch, '%');
        assert_eq!(cell.style, CellStyle::from(ColorId::Green));
    }
    assert_eq!(ch(&view, 4, 20), ' ');
    assert_eq!(ch(&view, 8, 20), ' ');
    // The name row (dy = min(9, round(10.5))) overlaps the block's last row.
    assert_eq!(row(&view, 22, 5, 3), "Ada");
}

#[test]
fn turn_marker_sits_under_the_seat() {
    let mut view = table();
    view.add_player(Player::new(PlayerId(1), "Ada", 100)).unwrap();
    view.set_turn(TurnState::new(PlayerId(1), Vec::new()));

    // Seat width min(79 - 1, 39) = 39; marker at trunc(19.5 - 5.5) = 14,
    // two rows above the seat bottom: 13 + 12 - 2 = 23.
    assert_eq!(row(&view, 23, 14, 11), "[Your Turn]");

    view.clear_turn();
    assert!(!view.surface().to_text().contains("[Your Turn]"));
}

#[test]
fn stale_turn_marker_is_skipped() {
    let mut view = table();
    view.set_turn(TurnState::new(PlayerId(9), Vec::new()));
    assert!(!view.surface().to_text().contains("[Your Turn]"));
}

#[test]
fn dealer_cards_paint_face_up_and_face_down() {
    let mut view = table();
    let mut dealer = Player::new(PlayerId(0), "Dealer", 0);
    dealer.cards = vec![
        Card::new("A", Suit::Spades),
        Card::new("K", Suit::Hearts).face_down(),
    ];
    view.update_dealer(dealer);

    // Seat (0, 0, 39, 11): edge min((39 - 4) / 2 - 1, 5) = 5, slots at x = 1 and 8.
    assert_eq!(ch(&view, 1, 0), '♠');
    assert_eq!(ch(&view, 3, 2), 'A');
    assert_eq!(ch(&view, 5, 4), '♠');
    let back = view.surface().get(8, 2).unwrap();
    assert_eq!(back.ch, '@');
    assert_eq!(back.style, CellStyle::from(ColorId::CardBlack));
    assert!(!view.surface().to_text().contains('♥'));
}

#[test]
fn small_canvas_paints_only_inside_panes() {
    let mut view = TableView::new(FrameBuffer::new(11, 7), CanvasSize::new(10, 6));
    for id in 1..=3 {
        let mut player = Player::new(PlayerId(id), "Somebody", 1000);
        player.cards = vec![Card::new("10", Suit::Diamonds); 4];
        view.add_player(player).unwrap();
    }
    view.set_turn(TurnState::new(PlayerId(2), Vec::new()));
    view.set_state(TableState::End);

    // Dealer pane rows 0..2, player pane rows 4..7.
    assert_eq!(view.surface().row_string(2).trim(), "");
    assert_eq!(view.surface().row_string(3).trim(), "");
}

#[test]
fn unknown_players_are_reported() {
    let mut view = table();
    view.add_player(Player::new(PlayerId(1), "Ada", 100)).unwrap();

    assert_eq!(
        view.add_player(Player::new(PlayerId(1), "Ada again", 100)),
        Err(LayoutError::DuplicatePlayer(PlayerId(1)))
    );
    assert_eq!(
        view.remove_player(PlayerId(7)).map(|p| p.id),
        Err(LayoutError::PlayerNotFound(PlayerId(7)))
    );
    assert_eq!(
        view.update_player(Player::new(PlayerId(8), "Ghost", 0)),
        Err(LayoutError::PlayerNotFound(PlayerId(8)))
    );
}

#[test]
fn leaving_keeps_other_seats_in_place() {
    let mut view = table();
    for (id, name) in [(1, "Ada"), (2, "Bob"), (3, "Cy")] {
        view.add_player(Player::new(PlayerId(id), name, 100)).unwrap();
    }
    let before: Vec<Region> = view.allocator().iter().map(|(_, r)| *r).collect();

    let bob = view.remove_player(PlayerId(2)).unwrap();
    assert_eq!(bob.name, "Bob");
    let after: Vec<Region> = view.allocator().iter().map(|(_, r)| *r).collect();
    assert_eq!(after, vec![before[0], before[2]]);
    assert!(!view.surface().to_text().contains("Bob"));
    assert!(view.surface().to_text().contains("Cy"));
}

#[test]
fn restart_empties_the_table() {
    let mut view = table();
    view.add_player(Player::new(PlayerId(1), "Ada", 100)).unwrap();
    view.set_state(TableState::Turn);
    view.restart();

    assert_eq!(view.state(), Some(TableState::Starting));
    assert!(view.allocator().is_empty());
    assert_eq!(view.players().count(), 0);
}

#[test]
fn player_pane_is_flushed_before_dealer_pane() {
    let canvas = CanvasSize::new(80, 24);
    let mut view = TableView::new(FlushLog::default(), canvas);
    view.refresh();

    assert_eq!(
        view.surface().flushed,
        vec![canvas.player_pane(), canvas.dealer_pane()]
    );
}
