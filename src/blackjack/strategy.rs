//! NPC betting and playing policy.
//!
//! Table-played seats follow a fixed basic-strategy chart for a dealer who
//! stands on all 17s, without doubling or surrender.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::card::Rank;
use crate::seat::{RoundOutcome, SeatId};

use super::Blackjack;
use super::hand::{Hand, card_value};

/// A decision for the hand whose turn it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NpcMove {
    /// Draw a card.
    Hit,
    /// Keep the hand.
    Stand,
    /// Split the pair.
    Split,
}

/// Picks an NPC bet: a random multiple of `min_bet` between `min_bet` and
/// `min(chips, max_multiple * min_bet)`.
///
/// Returns `min_bet` when the seat can only cover one step.
pub fn npc_bet<R: Rng + ?Sized>(
    rng: &mut R,
    chips: usize,
    min_bet: usize,
    max_multiple: usize,
) -> usize {
    if min_bet == 0 {
        return 0;
    }
    let cap = chips.min(max_multiple.max(1).saturating_mul(min_bet));
    let steps = (cap / min_bet).max(1);
    rng.random_range(1..=steps) * min_bet
}

/// Returns whether basic strategy splits this pair against the upcard.
#[must_use]
pub const fn should_split(pair: Rank, dealer_up: Rank) -> bool {
    let up = card_value(dealer_up);
    match pair {
        Rank::Ace | Rank::Eight => true,
        Rank::Two | Rank::Three | Rank::Seven => up >= 2 && up <= 7,
        Rank::Four => up == 5 || up == 6,
        Rank::Six => up >= 2 && up <= 6,
        Rank::Nine => (up >= 2 && up <= 6) || up == 8 || up == 9,
        Rank::Five | Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => false,
    }
}

/// Returns whether basic strategy hits this total against the upcard.
#[must_use]
pub const fn should_hit(total: u8, soft: bool, dealer_up: Rank) -> bool {
    let up = card_value(dealer_up);
    if soft {
        match total {
            19..=u8::MAX => false,
            18 => up >= 9,
            _ => true,
        }
    } else {
        match total {
            17..=u8::MAX => false,
            13..=16 => up >= 7,
            12 => !(up >= 4 && up <= 6),
            _ => true,
        }
    }
}

/// Decides the next move for `hand` against the dealer's upcard.
///
/// `split_allowed` is whether the table would accept a split right now.
#[must_use]
pub fn decide(hand: &Hand, dealer_up: Rank, split_allowed: bool) -> NpcMove {
    if split_allowed
        && hand.is_splittable_pair()
        && hand
            .cards()
            .first()
            .is_some_and(|card| should_split(card.rank, dealer_up))
    {
        return NpcMove::Split;
    }

    let value = hand.evaluate();
    if should_hit(value.total, value.soft, dealer_up) {
        NpcMove::Hit
    } else {
        NpcMove::Stand
    }
}

const WIN_REMARKS: [&str; 4] = [
    "Read that one from a mile away.",
    "The shoe likes me tonight.",
    "Another stack for the pile.",
    "Keep them coming, dealer.",
];

const BLACKJACK_REMARKS: [&str; 3] = [
    "Blackjack! Pay up.",
    "Ace and paint, my favourite pair.",
    "Natural. Three to two, please.",
];

const LOSE_REMARKS: [&str; 4] = [
    "The dealer was due, I suppose.",
    "That hole card had it in for me.",
    "Chips come and go.",
    "Next shoe is mine.",
];

const PUSH_REMARKS: [&str; 3] = [
    "A draw. I'll take it.",
    "Nobody wins, nobody cries.",
    "Same again, then.",
];

/// Picks a table remark for a round outcome.
pub fn remark<R: Rng + ?Sized>(outcome: RoundOutcome, rng: &mut R) -> &'static str {
    let lines: &[&'static str] = match outcome {
        RoundOutcome::Win => &WIN_REMARKS,
        RoundOutcome::Blackjack => &BLACKJACK_REMARKS,
        RoundOutcome::Lose => &LOSE_REMARKS,
        RoundOutcome::Push => &PUSH_REMARKS,
    };
    lines.choose(rng).copied().unwrap_or("")
}

impl Blackjack {
    /// Picks a remark for a table-played seat about the last settled round.
    ///
    /// Returns `None` for human seats and for seats that sat the round out.
    pub fn npc_remark(&self, seat: SeatId) -> Option<&'static str> {
        let mut table = self.table.lock();
        if !table.seat(seat).is_some_and(|s| s.is_ai) {
            return None;
        }
        let outcome = table
            .last_result
            .as_ref()?
            .players
            .iter()
            .find(|player| player.seat == seat)?
            .outcome;
        Some(remark(outcome, &mut table.rng))
    }
}
