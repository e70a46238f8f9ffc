//! Blackjack integration tests.

use tablekit::blackjack::hand::{DealerHand, Hand, evaluate};
use tablekit::blackjack::strategy::{npc_bet, should_hit, should_split};
use tablekit::blackjack::{DealTarget, NpcMove, SplitSide, TurnPosition};
use tablekit::{
    ActionError, BetError, Blackjack, BlackjackOptions, BlackjackPhase, Card, DealError,
    HandOutcome, HandStatus, Rank, ReshuffleError, RoundOutcome, Shoe, ShowdownError, Suit,
};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const fn card(rank: Rank) -> Card {
    Card::new(Suit::Spades, rank)
}

fn cards(ranks: &[Rank]) -> Vec<Card> {
    ranks.iter().map(|&rank| card(rank)).collect()
}

/// Loads a shoe that yields `draws` first, followed by low filler cards.
fn stack_shoe(table: &Blackjack, draws: &[Rank]) {
    let mut shoe = cards(draws);
    shoe.extend([card(Rank::Two); 20]);
    assert!(table.replace_shoe(Shoe::from_draws(&shoe)));
}

fn table() -> Blackjack {
    Blackjack::new(BlackjackOptions::default(), 42)
}

#[test]
fn hand_valuation_reduces_aces() {
    let pair_of_aces = evaluate(&cards(&[Rank::Ace, Rank::Ace]));
    assert_eq!(pair_of_aces.total, 12);
    assert!(pair_of_aces.soft);

    let twenty_one = evaluate(&cards(&[Rank::King, Rank::Queen, Rank::Ace]));
    assert_eq!(twenty_one.total, 21);
    assert!(!twenty_one.soft);

    let mut bust = Hand::new(100);
    for rank in [Rank::Seven, Rank::Seven, Rank::Eight] {
        bust.add_card(card(rank));
    }
    assert_eq!(bust.value(), 22);
    assert!(!bust.is_soft());
    assert_eq!(bust.status(), HandStatus::Bust);
    assert_eq!(bust.result(), Some(HandOutcome::Lose));
}

#[test]
fn split_hands_are_never_naturals_or_pairs() {
    let split = Hand::from_split(card(Rank::Ace), card(Rank::King), 100, SplitSide::A);
    assert_eq!(split.value(), 21);
    assert!(!split.is_blackjack());
    assert!(split.is_split_hand());
    assert_eq!(split.split_side().map(SplitSide::suffix), Some("-a"));

    let again = Hand::from_split(card(Rank::Eight), card(Rank::Eight), 100, SplitSide::B);
    assert!(!again.is_splittable_pair());

    let mut faces = Hand::new(100);
    faces.add_card(card(Rank::King));
    faces.add_card(card(Rank::Queen));
    assert!(!faces.is_splittable_pair());
}

#[test]
fn dealer_hand_hides_the_hole_card() {
    let mut dealer = DealerHand::new();
    dealer.add_card(card(Rank::Ten).face_down());
    dealer.add_card(card(Rank::Six));

    assert!(!dealer.is_hole_revealed());
    assert_eq!(dealer.up_card().map(|c| c.rank), Some(Rank::Six));
    assert_eq!(dealer.visible_value(), 6);
    assert_eq!(dealer.value(), 16);

    dealer.reveal_hole();
    assert!(dealer.is_hole_revealed());
    assert_eq!(dealer.visible_value(), 16);
}

#[test]
fn strategy_tables() {
    assert!(should_split(Rank::Eight, Rank::Ten));
    assert!(should_split(Rank::Ace, Rank::Ace));
    assert!(!should_split(Rank::Five, Rank::Six));
    assert!(!should_split(Rank::King, Rank::Six));
    assert!(should_split(Rank::Nine, Rank::Nine));
    assert!(!should_split(Rank::Nine, Rank::Seven));

    assert!(!should_hit(12, false, Rank::Four));
    assert!(should_hit(12, false, Rank::Three));
    assert!(should_hit(16, false, Rank::Ten));
    assert!(!should_hit(17, false, Rank::Ace));
    assert!(should_hit(18, true, Rank::Nine));
    assert!(!should_hit(18, true, Rank::Eight));
}

#[test]
fn npc_bets_are_steps_of_the_minimum() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    for _ in 0..200 {
        let bet = npc_bet(&mut rng, 10_000, 100, 6);
        assert_eq!(bet % 100, 0);
        assert!((100..=600).contains(&bet));
    }
    assert_eq!(npc_bet(&mut rng, 150, 100, 6), 100);
}

#[test]
fn natural_pays_three_to_two() {
    let table = table();
    let seat = table.join("alice", 1_000, false);
    table.place_bet(seat, 100).unwrap();
    stack_shoe(
        &table,
        &[
            Rank::Ace,  // seat
            Rank::King, // seat
            Rank::Ten,  // dealer hole
            Rank::Six,  // dealer up
            Rank::Four, // dealer draw
        ],
    );

    let events = table.deal().unwrap();
    assert_eq!(events.len(), 4);
    assert_eq!(events[2].target, DealTarget::Dealer);
    assert!(!events[2].card.face_up);
    assert_eq!(table.phase(), BlackjackPhase::Dealer);
    assert_eq!(table.chips(seat), Some(900));

    let (drawn, result) = table.dealer_play().unwrap();
    assert_eq!(drawn.len(), 1);
    assert_eq!(result.dealer_value, 20);

    let player = &result.players[0];
    assert_eq!(player.hands[0].outcome, HandOutcome::Blackjack);
    assert_eq!(player.hands[0].payout, 250);
    assert_eq!(player.outcome, RoundOutcome::Blackjack);
    assert_eq!(table.chips(seat), Some(1_150));
    assert_eq!(table.phase(), BlackjackPhase::Result);

    assert_eq!(result.updates.len(), 1);
    assert_eq!(result.updates[0].name, "alice");
    assert_eq!(result.updates[0].chips, 1_150);
    assert_eq!(result.updates[0].result, Some(RoundOutcome::Blackjack));
}

#[test]
fn dealer_blackjack_settles_at_once() {
    let table = table();
    let natural = table.join("natural", 1_000, false);
    let plain = table.join("plain", 1_000, false);
    table.place_bet(natural, 100).unwrap();
    table.place_bet(plain, 200).unwrap();
    stack_shoe(
        &table,
        &[
            Rank::Ace,
            Rank::Queen,
            Rank::Ten,
            Rank::Nine,
            Rank::Ace,  // dealer hole
            Rank::King, // dealer up
        ],
    );

    table.deal().unwrap();
    assert_eq!(table.phase(), BlackjackPhase::Result);
    assert!(table.dealer_hand().is_hole_revealed());
    assert_eq!(table.current_turn(), None);

    let result = table.last_result().unwrap();
    assert!(result.dealer_blackjack);
    assert_eq!(result.players[0].hands[0].outcome, HandOutcome::Push);
    assert_eq!(result.players[0].outcome, RoundOutcome::Push);
    assert_eq!(result.players[1].hands[0].outcome, HandOutcome::Lose);
    assert_eq!(table.chips(natural), Some(1_000));
    assert_eq!(table.chips(plain), Some(800));

    assert_eq!(
        table.dealer_play().unwrap_err(),
        ShowdownError::InvalidState
    );
}

#[test]
fn turns_follow_deal_order_through_a_split() {
    let table = table();
    let first = table.join("first", 1_000, false);
    let second = table.join("second", 1_000, false);
    table.place_bet(first, 100).unwrap();
    table.place_bet(second, 100).unwrap();
    stack_shoe(
        &table,
        &[
            Rank::Ten,   // first
            Rank::Six,   // first
            Rank::Nine,  // second
            Rank::Nine,  // second
            Rank::Ten,   // dealer hole
            Rank::Seven, // dealer up
            Rank::Ten,   // first hits and busts
            Rank::King,  // split hand -a
            Rank::Ace,   // split hand -b
        ],
    );

    table.deal().unwrap();
    assert_eq!(table.phase(), BlackjackPhase::Playing);
    assert_eq!(
        table.current_turn(),
        Some(TurnPosition {
            player_index: 0,
            hand_index: 0
        })
    );
    assert!(table.is_player_turn(first));
    assert!(!table.is_player_turn(second));
    assert!(!table.can_split_hand(second, 0));

    assert_eq!(table.hit(second, 0).unwrap_err(), ActionError::NotYourTurn);
    assert_eq!(table.message().as_deref(), Some("not this seat's turn"));
    assert_eq!(table.split(first, 0).unwrap_err(), ActionError::CannotSplit);

    let drawn = table.hit(first, 0).unwrap();
    assert_eq!(drawn.rank, Rank::Ten);
    assert_eq!(table.message(), None);
    assert_eq!(table.hands(first).unwrap()[0].status(), HandStatus::Bust);
    assert_eq!(table.current_seat(), Some(second));
    assert!(table.can_split_hand(second, 0));

    table.split(second, 0).unwrap();
    assert_eq!(table.chips(second), Some(800));
    let hands = table.hands(second).unwrap();
    assert_eq!(hands.len(), 2);
    assert_eq!(hands[0].value(), 19);
    assert_eq!(hands[1].value(), 20);
    assert!(hands.iter().all(Hand::is_split_hand));
    assert_eq!(
        table.current_turn(),
        Some(TurnPosition {
            player_index: 1,
            hand_index: 0
        })
    );
    assert!(!table.can_split_hand(second, 0));

    table.stand(second, 0).unwrap();
    assert_eq!(
        table.current_turn(),
        Some(TurnPosition {
            player_index: 1,
            hand_index: 1
        })
    );
    table.stand(second, 1).unwrap();
    assert_eq!(table.phase(), BlackjackPhase::Dealer);
    assert_eq!(table.current_turn(), None);

    let (drawn, result) = table.dealer_play().unwrap();
    assert!(drawn.is_empty());
    assert_eq!(result.dealer_value, 17);
    assert_eq!(result.players[0].outcome, RoundOutcome::Lose);
    assert_eq!(result.players[1].total_payout, 400);
    assert_eq!(result.players[1].net, 200);
    assert_eq!(result.players[1].outcome, RoundOutcome::Win);
    assert_eq!(table.chips(first), Some(900));
    assert_eq!(table.chips(second), Some(1_200));
}

#[test]
fn split_aces_get_one_card_each() {
    let table = table();
    let seat = table.join("alice", 1_000, false);
    table.place_bet(seat, 100).unwrap();
    stack_shoe(
        &table,
        &[
            Rank::Ace,
            Rank::Ace,
            Rank::Ten,   // dealer hole
            Rank::Eight, // dealer up
            Rank::King,  // -a
            Rank::Five,  // -b
        ],
    );

    table.deal().unwrap();
    table.split(seat, 0).unwrap();
    assert_eq!(table.phase(), BlackjackPhase::Dealer);

    let hands = table.hands(seat).unwrap();
    assert_eq!(hands[0].status(), HandStatus::Stand);
    assert_eq!(hands[1].status(), HandStatus::Stand);

    let (_, result) = table.dealer_play().unwrap();
    let player = &result.players[0];
    assert_eq!(player.hands[0].outcome, HandOutcome::Win);
    assert_eq!(player.hands[0].payout, 200);
    assert_eq!(player.hands[1].outcome, HandOutcome::Lose);
    assert_eq!(player.outcome, RoundOutcome::Push);
    assert_eq!(table.chips(seat), Some(1_000));
}

#[test]
fn split_needs_chips_for_a_second_bet() {
    let table = table();
    let seat = table.join("short", 150, false);
    table.place_bet(seat, 100).unwrap();
    stack_shoe(&table, &[Rank::Eight, Rank::Eight, Rank::Ten, Rank::Nine]);

    table.deal().unwrap();
    assert!(!table.can_split_hand(seat, 0));
    assert_eq!(
        table.split(seat, 0).unwrap_err(),
        ActionError::InsufficientFunds
    );
    assert_eq!(table.hands(seat).unwrap().len(), 1);
    assert_eq!(table.chips(seat), Some(50));
}

#[test]
fn hitting_to_twenty_one_stands() {
    let table = table();
    let seat = table.join("alice", 1_000, false);
    table.place_bet(seat, 100).unwrap();
    stack_shoe(
        &table,
        &[Rank::Five, Rank::Six, Rank::Ten, Rank::Nine, Rank::Ten],
    );

    table.deal().unwrap();
    table.hit(seat, 0).unwrap();
    assert_eq!(table.hands(seat).unwrap()[0].status(), HandStatus::Stand);
    assert_eq!(table.phase(), BlackjackPhase::Dealer);
}

#[test]
fn bet_rejections_leave_the_table_alone() {
    let table = table();
    let human = table.join("alice", 250, false);
    let npc = table.join("npc", 1_000, true);

    assert_eq!(table.place_bet(human, 0).unwrap_err(), BetError::ZeroBet);
    assert_eq!(
        table.place_bet(human, 50).unwrap_err(),
        BetError::BelowMinimum
    );
    assert_eq!(
        table.place_bet(human, 300).unwrap_err(),
        BetError::InsufficientFunds
    );
    assert_eq!(table.message().as_deref(), Some("insufficient balance"));
    assert_eq!(table.place_bet(npc, 100).unwrap_err(), BetError::AiSeat);
    assert_eq!(
        table.place_bet(tablekit::SeatId(9), 100).unwrap_err(),
        BetError::SeatNotFound
    );
    assert_eq!(table.pending_bet(human), None);
    assert_eq!(table.chips(human), Some(250));

    assert!(table.can_bet(human));
    assert!(!table.can_bet(npc));
    table.place_bet(human, 200).unwrap();
    assert_eq!(table.pending_bet(human), Some(200));
    assert!(table.clear_bet(human));
    assert!(!table.clear_bet(human));
}

#[test]
fn deal_rejections() {
    let table = table();
    assert_eq!(table.deal().unwrap_err(), DealError::NoBets);

    let seat = table.join("alice", 1_000, false);
    table.place_bet(seat, 100).unwrap();
    let short: Vec<Card> = cards(&[Rank::Two; 9]);
    assert!(table.replace_shoe(Shoe::from_draws(&short)));
    assert_eq!(table.deal().unwrap_err(), DealError::NotEnoughCards);
    assert_eq!(table.phase(), BlackjackPhase::Betting);
    assert_eq!(table.chips(seat), Some(1_000));
}

#[test]
fn actions_outside_play_are_rejected() {
    let table = table();
    let seat = table.join("alice", 1_000, false);
    assert_eq!(table.hit(seat, 0).unwrap_err(), ActionError::InvalidState);
    assert_eq!(table.stand(seat, 0).unwrap_err(), ActionError::InvalidState);
    assert_eq!(table.play_npc_turn().unwrap_err(), ActionError::InvalidState);
    assert_eq!(table.dealer_play().unwrap_err(), ShowdownError::InvalidState);
}

#[test]
fn npc_seat_bets_and_plays_by_the_chart() {
    let table = table();
    let npc = table.join("npc", 1_000, true);
    stack_shoe(
        &table,
        &[
            Rank::Ten,  // npc
            Rank::Six,  // npc
            Rank::Ten,  // dealer hole
            Rank::Ten,  // dealer up
            Rank::Five, // npc hit
        ],
    );

    table.deal().unwrap();
    let bet = table.hands(npc).unwrap()[0].bet();
    assert_eq!(bet % 100, 0);
    assert!((100..=600).contains(&bet));
    assert_eq!(table.chips(npc), Some(1_000 - bet));

    assert_eq!(table.npc_decision(), Some(NpcMove::Hit));
    assert_eq!(table.play_npc_turn().unwrap(), NpcMove::Hit);
    assert_eq!(table.phase(), BlackjackPhase::Dealer);

    let (_, result) = table.dealer_play().unwrap();
    assert_eq!(result.players[0].outcome, RoundOutcome::Win);
    assert!(table.npc_remark(npc).is_some());
}

#[test]
fn human_turn_is_not_played_by_the_table() {
    let table = table();
    let seat = table.join("alice", 1_000, false);
    table.place_bet(seat, 100).unwrap();
    stack_shoe(&table, &[Rank::Ten, Rank::Six, Rank::Ten, Rank::Nine]);

    table.deal().unwrap();
    assert_eq!(table.npc_decision(), None);
    assert_eq!(table.play_npc_turn().unwrap_err(), ActionError::NotAiSeat);
    assert_eq!(table.npc_remark(seat), None);
}

#[test]
fn cut_card_forces_a_ceremony_before_the_next_deal() {
    let table = table();
    let alice = table.join("alice", 1_000, false);
    let bob = table.join("bob", 1_000, false);
    table.place_bet(alice, 100).unwrap();

    let mut draws = cards(&[Rank::Ten, Rank::Eight, Rank::Ten, Rank::Nine]);
    draws.extend([card(Rank::Two); 20]);
    assert!(table.replace_shoe(Shoe::from_draws(&draws).with_cut_card_position(2)));

    table.deal().unwrap();
    assert!(table.is_shuffle_pending());
    table.stand(alice, 0).unwrap();
    table.dealer_play().unwrap();
    assert_eq!(table.chips(alice), Some(900));

    assert_eq!(
        table.cut_ceremony().unwrap_err(),
        ReshuffleError::InvalidState
    );
    table.reset_round();
    table.place_bet(alice, 100).unwrap();
    assert_eq!(table.deal().unwrap_err(), DealError::ShufflePending);
    assert_eq!(
        table.message().as_deref(),
        Some("roll for the cut card before dealing")
    );

    let ceremony = table.cut_ceremony().unwrap();
    assert!(ceremony.cutter == alice || ceremony.cutter == bob);
    let last_round = ceremony.rounds.last().unwrap();
    let top = last_round.iter().map(|r| r.roll).max().unwrap();
    assert_eq!(last_round.iter().filter(|r| r.roll == top).count(), 1);
    assert!(ceremony.rounds.iter().flatten().all(|r| (1..=6).contains(&r.roll)));
    assert!(!table.is_shuffle_pending());
    assert_eq!(table.shoe().shoe_size(), 312);
    assert_eq!(table.shoe().cut_card_position(), ceremony.cut_card_position);
    assert_eq!(table.last_cut(), Some(ceremony));

    table.deal().unwrap();
    assert_ne!(table.phase(), BlackjackPhase::Betting);
}

#[test]
fn cut_ceremony_needs_seats() {
    let table = table();
    assert_eq!(table.cut_ceremony().unwrap_err(), ReshuffleError::NoSeats);
}

#[test]
fn reset_round_is_idempotent() {
    let table = table();
    let seat = table.join("alice", 1_000, false);
    table.place_bet(seat, 100).unwrap();
    stack_shoe(&table, &[Rank::Ten, Rank::Nine, Rank::Ten, Rank::Seven]);

    table.deal().unwrap();
    table.stand(seat, 0).unwrap();
    table.dealer_play().unwrap();
    assert_eq!(table.chips(seat), Some(1_100));

    table.reset_round();
    assert_eq!(table.phase(), BlackjackPhase::Betting);
    assert!(table.round_hands().is_empty());
    assert!(table.dealer_hand().is_empty());
    let remaining = table.cards_remaining();

    table.reset_round();
    assert_eq!(table.phase(), BlackjackPhase::Betting);
    assert_eq!(table.cards_remaining(), remaining);
    assert_eq!(table.chips(seat), Some(1_100));
    assert!(table.last_result().is_some());
}

#[test]
fn seats_leave_only_between_rounds() {
    let table = table();
    let alice = table.join("alice", 1_000, false);
    let bob = table.join("bob", 1_000, false);
    table.place_bet(alice, 100).unwrap();
    stack_shoe(&table, &[Rank::Ten, Rank::Six, Rank::Ten, Rank::Nine]);

    table.deal().unwrap();
    assert!(!table.leave(bob));
    assert_eq!(table.round_hands().len(), 1);
    assert_eq!(table.hands(bob), None);

    table.stand(alice, 0).unwrap();
    table.dealer_play().unwrap();
    table.reset_round();
    assert!(table.leave(bob));
    assert!(!table.leave(bob));
    assert_eq!(table.seats().len(), 1);
}

#[test]
fn seat_handles_are_not_reused_while_seated() {
    let table = table();
    let alice = table.join("alice", 1_000, false);
    for i in 0..300 {
        let guest = table.join(format!("guest{i}"), 10, false);
        assert_ne!(guest, alice);
        assert!(table.leave(guest));
    }
    let bob = table.join("bob", 5_000, false);
    assert_ne!(bob, alice);
    assert_eq!(table.chips(alice), Some(1_000));
    assert_eq!(table.chips(bob), Some(5_000));
    assert_eq!(table.seats().len(), 2);
}

#[test]
fn short_shoe_leaves_the_dealer_hand_untouched() {
    let table = table();
    let seat = table.join("alice", 1_000, false);
    table.place_bet(seat, 100).unwrap();
    let mut draws = cards(&[Rank::Ten, Rank::Seven, Rank::Two, Rank::Two]);
    draws.extend([card(Rank::Two); 6]);
    assert!(table.replace_shoe(Shoe::from_draws(&draws)));

    table.deal().unwrap();
    table.stand(seat, 0).unwrap();
    assert_eq!(table.phase(), BlackjackPhase::Dealer);

    // Dealer sits on 4 and needs seven more Twos; the shoe holds six.
    assert_eq!(table.dealer_play().unwrap_err(), ShowdownError::NoCards);
    assert_eq!(table.phase(), BlackjackPhase::Dealer);
    assert_eq!(table.cards_remaining(), 6);
    let dealer = table.dealer_hand();
    assert_eq!(dealer.len(), 2);
    assert!(!dealer.is_hole_revealed());
    assert_eq!(table.chips(seat), Some(900));
}

#[test]
fn odd_natural_payout_rounds_down() {
    let table = table();
    let seat = table.join("alice", 1_000, false);
    table.place_bet(seat, 101).unwrap();
    stack_shoe(&table, &[Rank::Ace, Rank::Queen, Rank::Ten, Rank::Seven]);

    table.deal().unwrap();
    let (_, result) = table.dealer_play().unwrap();
    assert_eq!(result.players[0].hands[0].outcome, HandOutcome::Blackjack);
    assert_eq!(result.players[0].hands[0].payout, 252);
    assert_eq!(table.chips(seat), Some(1_151));
}
