//! Roulette integration tests.

use tablekit::roulette::layout::{self, Color, MAX_NUMBER};
use tablekit::{
    BetKind, Pocket, Roulette, RouletteError, RouletteOptions, RoulettePhase, RoundOutcome, Wheel,
};

fn n(number: u8) -> Pocket {
    Pocket::number(number).unwrap()
}

fn spin(table: &Roulette, winning: Pocket) -> tablekit::roulette::RouletteResult {
    table.spin_wheel().unwrap();
    table.resolve_round_at(winning, 1_700_000_000_000).unwrap()
}

#[test]
fn straight_bet_pays_thirty_five_to_one() {
    let table = Roulette::new(RouletteOptions::default());
    let player = table.join("alice", 100);
    table
        .place_bet(BetKind::Straight, 10, layout::straight(n(17)), player)
        .unwrap();
    assert_eq!(table.chips(player), Some(90));
    assert_eq!(table.phase(), RoulettePhase::Betting);

    let result = spin(&table, n(17));
    assert_eq!(result.total_win, 360);
    assert!(result.bets[0].won);
    assert_eq!(table.chips(player), Some(450));
    assert_eq!(result.updates[0].result, Some(RoundOutcome::Win));
    assert_eq!(table.phase(), RoulettePhase::Result);
}

#[test]
fn losing_bet_keeps_nothing() {
    let table = Roulette::new(RouletteOptions::default());
    let player = table.join("alice", 100);
    table
        .place_bet(BetKind::Straight, 10, layout::straight(n(17)), player)
        .unwrap();

    let result = spin(&table, Pocket::DoubleZero);
    assert_eq!(result.total_win, 0);
    assert!(!result.bets[0].won);
    assert_eq!(result.bets[0].payout, 0);
    assert_eq!(table.chips(player), Some(90));
    assert_eq!(result.updates[0].result, Some(RoundOutcome::Lose));
}

#[test]
fn every_matching_bet_is_paid() {
    let table = Roulette::new(RouletteOptions::default());
    let alice = table.join("alice", 1_000);
    let bob = table.join("bob", 1_000);
    let carol = table.join("carol", 1_000);

    table
        .place_bet(BetKind::Red, 100, layout::color(Color::Red), alice)
        .unwrap();
    table
        .place_bet(BetKind::Dozen, 50, layout::dozen(1).unwrap(), alice)
        .unwrap();
    table
        .place_bet(BetKind::Corner, 20, layout::corner(2).unwrap(), bob)
        .unwrap();
    table
        .place_bet(BetKind::Black, 100, layout::color(Color::Black), bob)
        .unwrap();

    // 5 is red, in the first dozen and in the 2-3-5-6 corner.
    let result = spin(&table, n(5));
    assert_eq!(result.bets.len(), 4);
    assert_eq!(result.bets[0].payout, 200);
    assert_eq!(result.bets[1].payout, 150);
    assert_eq!(result.bets[2].payout, 180);
    assert_eq!(result.bets[3].payout, 0);
    assert_eq!(result.total_win, 530);

    assert_eq!(table.chips(alice), Some(1_200));
    assert_eq!(table.chips(bob), Some(1_060));
    assert_eq!(result.updates.len(), 3);
    assert_eq!(result.updates[1].result, Some(RoundOutcome::Win));
    assert_eq!(result.updates[2].result, None);
    assert_eq!(table.chips(carol), Some(1_000));
}

#[test]
fn multiples_follow_the_layout() {
    assert_eq!(BetKind::Straight.payout_multiple(), 35);
    assert_eq!(BetKind::Split.payout_multiple(), 17);
    assert_eq!(BetKind::Street.payout_multiple(), 11);
    assert_eq!(BetKind::Corner.payout_multiple(), 8);
    assert_eq!(BetKind::Line.payout_multiple(), 5);
    assert_eq!(BetKind::Column.payout_multiple(), 2);
    assert_eq!(BetKind::Dozen.payout_multiple(), 2);
    assert_eq!(BetKind::Odd.payout_multiple(), 1);
    assert_eq!(BetKind::High.payout_multiple(), 1);
    assert_eq!(BetKind::Basket.payout_multiple(), 11);
    assert_eq!(BetKind::FirstFive.payout_multiple(), 6);
}

#[test]
fn coverage_helpers() {
    assert_eq!(layout::split(n(1), n(2)).unwrap(), vec![n(1), n(2)]);
    assert_eq!(layout::split(n(4), n(1)).unwrap(), vec![n(1), n(4)]);
    assert_eq!(
        layout::split(n(3), n(4)),
        Err(RouletteError::InvalidPocket)
    );
    assert_eq!(layout::street(12).unwrap(), vec![n(34), n(35), n(36)]);
    assert!(layout::street(13).is_err());
    assert_eq!(layout::corner(32).unwrap(), vec![n(32), n(33), n(35), n(36)]);
    assert!(layout::corner(3).is_err());
    assert_eq!(layout::line(1).unwrap().len(), 6);
    assert!(layout::line(12).is_err());

    let column = layout::column(2).unwrap();
    assert_eq!(column.len(), 12);
    assert_eq!(column.first(), Some(&n(2)));
    assert_eq!(column.last(), Some(&n(35)));
    assert_eq!(layout::dozen(3).unwrap().first(), Some(&n(25)));

    assert_eq!(layout::color(Color::Red).len(), 18);
    assert_eq!(layout::color(Color::Black).len(), 18);
    assert!(layout::parity(true).iter().all(|p| *p != n(2)));
    assert_eq!(layout::half(false).first(), Some(&n(19)));
    assert_eq!(layout::first_five().len(), 5);
    assert_eq!(
        layout::outside(BetKind::Basket, Wheel::European),
        Some(vec![Pocket::Zero, n(1), n(2)])
    );
    assert_eq!(layout::outside(BetKind::Straight, Wheel::American), None);
}

#[test]
fn pockets_parse_and_display() {
    assert_eq!("00".parse::<Pocket>(), Ok(Pocket::DoubleZero));
    assert_eq!("0".parse::<Pocket>(), Ok(Pocket::Zero));
    assert_eq!("17".parse::<Pocket>(), Ok(n(17)));
    assert_eq!("37".parse::<Pocket>(), Err(RouletteError::InvalidPocket));
    assert_eq!(Pocket::DoubleZero.to_string(), "00");
    assert_eq!(n(36).to_string(), "36");
    assert_eq!(Pocket::Zero.color(), Color::Green);
    assert_eq!(n(1).color(), Color::Red);
    assert_eq!(n(2).color(), Color::Black);
    assert_eq!(Wheel::American.pockets().len(), 38);
    assert_eq!(Wheel::European.pockets().len(), 37);
    assert_eq!(Pocket::number(MAX_NUMBER + 1), None);
}

#[test]
fn double_zero_needs_an_american_wheel() {
    let table = Roulette::new(RouletteOptions::default().with_wheel(Wheel::European));
    let player = table.join("alice", 100);
    assert_eq!(
        table.place_bet(BetKind::FirstFive, 10, layout::first_five(), player),
        Err(RouletteError::InvalidPocket)
    );
    table
        .place_bet(BetKind::Straight, 10, layout::straight(Pocket::Zero), player)
        .unwrap();
    table.spin_wheel().unwrap();
    assert_eq!(
        table.resolve_round_at(Pocket::DoubleZero, 0),
        Err(RouletteError::InvalidPocket)
    );
    assert_eq!(table.phase(), RoulettePhase::Spinning);
}

#[test]
fn bet_rejections() {
    let table = Roulette::new(RouletteOptions::default().with_min_bet(5));
    let player = table.join("alice", 20);

    assert_eq!(
        table.place_bet(BetKind::Straight, 0, layout::straight(n(1)), player),
        Err(RouletteError::ZeroBet)
    );
    assert_eq!(
        table.place_bet(BetKind::Straight, 4, layout::straight(n(1)), player),
        Err(RouletteError::BelowMinimum)
    );
    assert_eq!(
        table.place_bet(BetKind::Straight, 30, layout::straight(n(1)), player),
        Err(RouletteError::InsufficientFunds)
    );
    assert_eq!(table.message().as_deref(), Some("insufficient balance"));
    assert_eq!(
        table.place_bet(BetKind::Straight, 10, Vec::new(), player),
        Err(RouletteError::EmptyCoverage)
    );
    assert_eq!(
        table.place_bet(
            BetKind::Straight,
            10,
            layout::straight(n(1)),
            tablekit::SeatId(7)
        ),
        Err(RouletteError::PlayerNotFound)
    );
    assert_eq!(table.phase(), RoulettePhase::Idle);
    assert_eq!(table.chips(player), Some(20));
    assert!(table.bets().is_empty());
}

#[test]
fn spin_needs_bets_and_an_open_table() {
    let table = Roulette::new(RouletteOptions::default());
    let player = table.join("alice", 100);

    assert_eq!(table.spin_wheel(), Err(RouletteError::InvalidState));
    assert_eq!(
        table.resolve_round_at(n(1), 0),
        Err(RouletteError::InvalidState)
    );

    table
        .place_bet(BetKind::Odd, 10, layout::parity(true), player)
        .unwrap();
    table.spin_wheel().unwrap();
    assert_eq!(
        table.place_bet(BetKind::Odd, 10, layout::parity(true), player),
        Err(RouletteError::InvalidState)
    );
    assert_eq!(table.clear_bets(), Err(RouletteError::InvalidState));
    assert_eq!(table.spin_wheel(), Err(RouletteError::InvalidState));
}

#[test]
fn clear_bets_refunds_and_is_idempotent() {
    let table = Roulette::new(RouletteOptions::default());
    let player = table.join("alice", 100);
    table
        .place_bet(BetKind::Low, 30, layout::half(true), player)
        .unwrap();
    table
        .place_bet(BetKind::Column, 20, layout::column(1).unwrap(), player)
        .unwrap();
    assert_eq!(table.total_bet(), 50);

    assert_eq!(table.clear_bets(), Ok(50));
    assert_eq!(table.phase(), RoulettePhase::Idle);
    assert_eq!(table.chips(player), Some(100));

    assert_eq!(table.clear_bets(), Ok(0));
    assert_eq!(table.phase(), RoulettePhase::Idle);
    assert_eq!(table.chips(player), Some(100));
}

#[test]
fn reset_game_is_idempotent() {
    let table = Roulette::new(RouletteOptions::default());
    let player = table.join("alice", 100);
    table
        .place_bet(BetKind::Even, 10, layout::parity(false), player)
        .unwrap();
    spin(&table, n(8));
    assert_eq!(table.chips(player), Some(110));
    assert!(table.last_result().is_some());

    table.reset_game();
    assert_eq!(table.phase(), RoulettePhase::Idle);
    assert!(table.bets().is_empty());
    assert!(table.last_result().is_none());
    assert_eq!(table.chips(player), Some(110));

    table.reset_game();
    assert_eq!(table.phase(), RoulettePhase::Idle);
    assert_eq!(table.chips(player), Some(110));
    assert_eq!(table.history().len(), 1);
}

#[test]
fn reset_before_the_spin_returns_stakes() {
    let table = Roulette::new(RouletteOptions::default());
    let player = table.join("alice", 100);
    table
        .place_bet(BetKind::High, 40, layout::half(false), player)
        .unwrap();
    assert_eq!(table.chips(player), Some(60));

    table.reset_game();
    assert_eq!(table.chips(player), Some(100));
    assert_eq!(table.phase(), RoulettePhase::Idle);
    assert!(table.bets().is_empty());
    assert!(table.history().is_empty());
}

#[test]
fn spinning_round_cannot_be_reset() {
    let table = Roulette::new(RouletteOptions::default());
    let player = table.join("alice", 100);
    table
        .place_bet(BetKind::Straight, 10, layout::straight(n(17)), player)
        .unwrap();
    table.spin_wheel().unwrap();

    table.reset_game();
    assert_eq!(table.phase(), RoulettePhase::Spinning);
    assert_eq!(table.chips(player), Some(90));
    assert_eq!(table.bets().len(), 1);

    table.resolve_round_at(n(17), 1).unwrap();
    assert_eq!(table.chips(player), Some(450));
}

#[test]
fn seat_handles_stay_unique_after_many_joins() {
    let table = Roulette::new(RouletteOptions::default());
    let alice = table.join("alice", 1_000);
    for i in 0..300 {
        table.join(format!("guest{i}"), 1);
    }
    let bob = table.join("bob", 5_000);
    assert_ne!(alice, bob);
    assert_eq!(table.chips(alice), Some(1_000));
    assert_eq!(table.chips(bob), Some(5_000));
}

#[test]
fn history_is_bounded() {
    let table = Roulette::new(RouletteOptions::default().with_history_limit(3));
    let player = table.join("alice", 1_000);

    for number in 1..=5 {
        table
            .place_bet(BetKind::Straight, 1, layout::straight(n(number)), player)
            .unwrap();
        table.spin_wheel().unwrap();
        table.resolve_round_at(n(number), u64::from(number)).unwrap();
        table.reset_game();
    }

    let history = table.history();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].pocket, n(3));
    assert_eq!(history[2].pocket, n(5));
    assert_eq!(history[2].timestamp_ms, 5);
}

#[test]
fn resolve_round_stamps_wall_clock_time() {
    let table = Roulette::new(RouletteOptions::default());
    let player = table.join("alice", 10);
    table
        .place_bet(BetKind::Straight, 1, layout::straight(Pocket::Zero), player)
        .unwrap();
    table.spin_wheel().unwrap();
    table.resolve_round(Pocket::Zero).unwrap();
    assert!(table.history()[0].timestamp_ms > 0);
    assert_eq!(table.chips(player), Some(45));
}
