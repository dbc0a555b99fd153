use criterion::{black_box, criterion_group, criterion_main, Criterion};
use card_table::layout::{Region, RegionAllocator};
use card_table::term::{CanvasSize, FrameBuffer, TableView};
use card_table::types::{Card, Player, PlayerId, Suit, TableState, TurnState};

fn seated_player(id: u32) -> Player {
    let mut player = Player::new(PlayerId(id), format!("Player {id}"), 1000);
    player.bet = 50;
    player.cards = vec![Card::new("Q", Suit::Hearts), Card::new("9", Suit::Clubs)];
    player
}

fn bench_card_slots(c: &mut Criterion) {
    let region = Region::new(0, 0, 40, 12);

    c.bench_function("card_slots_5", |b| {
        b.iter(|| region.card_slots(black_box(5)))
    });
}

fn bench_reflow(c: &mut Criterion) {
    c.bench_function("allocator_join_6", |b| {
        b.iter(|| {
            let mut allocator = RegionAllocator::new(0, 0, black_box(199), 30);
            for id in 1..=6 {
                let _ = allocator.add_player(PlayerId(id));
            }
            allocator
        })
    });
}

fn bench_all_coords(c: &mut Criterion) {
    let mut allocator = RegionAllocator::new(0, 0, 159, 30);
    for id in 1..=4 {
        let _ = allocator.add_player(PlayerId(id));
    }
    let player = seated_player(3);

    c.bench_function("coords_lookup", |b| {
        b.iter(|| allocator.coords(black_box(&player)))
    });
}

fn bench_refresh(c: &mut Criterion) {
    let mut view = TableView::new(FrameBuffer::new(161, 49), CanvasSize::new(160, 48));
    for id in 1..=4 {
        let _ = view.add_player(seated_player(id));
    }
    view.set_turn(TurnState::new(PlayerId(2), Vec::new()));
    view.set_state(TableState::Turn);

    c.bench_function("table_refresh_4_players", |b| {
        b.iter(|| view.refresh())
    });
}

criterion_group!(
    benches,
    bench_card_slots,
    bench_reflow,
    bench_all_coords,
    bench_refresh
);
criterion_main!(benches);
