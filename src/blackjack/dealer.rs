use alloc::vec::Vec;

use crate::card::Card;
use crate::error::ShowdownError;
use crate::seat::{RoundOutcome, SettlementUpdate, chip_delta};

use super::hand::{HandOutcome, HandStatus};
use super::result::{HandResult, PlayerResult, RoundResult};
use super::{Blackjack, BlackjackPhase, Table};

/// Dealer draws while under this total, soft or hard.
const DEALER_STANDS_ON: u8 = 17;

impl Table {
    /// Pays every hand against the dealer's final hand and moves to
    /// `Result`.
    pub(super) fn settle(&mut self) -> RoundResult {
        let dealer_value = self.dealer.value();
        let dealer_bust = self.dealer.is_bust();
        let dealer_blackjack = self.dealer.is_blackjack();

        let mut players = Vec::with_capacity(self.round.len());

        for entry in &mut self.round {
            let mut hands = Vec::with_capacity(entry.hands.len());
            let mut total_payout = 0;

            for (hand_index, hand) in entry.hands.iter_mut().enumerate() {
                let bet = hand.bet();
                let natural = hand.status() == HandStatus::Blackjack;
                let player_value = hand.value();

                let (outcome, payout) = if hand.status() == HandStatus::Bust {
                    (HandOutcome::Lose, 0)
                } else if dealer_blackjack {
                    if natural {
                        (HandOutcome::Push, bet)
                    } else {
                        (HandOutcome::Lose, 0)
                    }
                } else if dealer_bust || player_value > dealer_value {
                    if natural {
                        (HandOutcome::Blackjack, bet * 5 / 2)
                    } else {
                        (HandOutcome::Win, bet * 2)
                    }
                } else if player_value < dealer_value {
                    (HandOutcome::Lose, 0)
                } else {
                    (HandOutcome::Push, bet)
                };

                hand.set_result(outcome);
                total_payout += payout;
                hands.push(HandResult {
                    hand_index,
                    outcome,
                    bet,
                    payout,
                    player_value,
                });
            }

            if let Some(seat) = self.seats.iter_mut().find(|s| s.id == entry.seat) {
                seat.chips += total_payout;
            }

            let after = self
                .seats
                .iter()
                .find(|s| s.id == entry.seat)
                .map_or(0, |s| s.chips);
            let before = self.starting_chips.get(&entry.seat).copied().unwrap_or(after);
            let net = chip_delta(before, after);
            let outcome = match RoundOutcome::from_delta(net) {
                RoundOutcome::Win
                    if hands.iter().any(|h| h.outcome == HandOutcome::Blackjack) =>
                {
                    RoundOutcome::Blackjack
                }
                other => other,
            };

            players.push(PlayerResult {
                seat: entry.seat,
                hands,
                total_payout,
                net,
                outcome,
            });
        }

        let updates = self
            .seats
            .iter()
            .map(|seat| SettlementUpdate {
                name: seat.name.clone(),
                chips: seat.chips,
                result: players
                    .iter()
                    .find(|p| p.seat == seat.id)
                    .map(|p| p.outcome),
            })
            .collect();

        let result = RoundResult {
            players,
            dealer_value,
            dealer_bust,
            dealer_blackjack,
            updates,
        };

        tracing::info!(
            dealer_value,
            dealer_bust,
            dealer_blackjack,
            seats = result.players.len(),
            "blackjack round settled"
        );

        self.phase = BlackjackPhase::Result;
        self.last_result = Some(result.clone());
        result
    }
}

impl Blackjack {
    /// Reveals the hole card, draws to 17, and settles the round.
    ///
    /// The dealer hits every total under 17 and stands on every 17, soft
    /// ones included. Returns the cards drawn together with the
    /// settlement.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is not in the dealer phase or the shoe
    /// cannot finish the dealer's hand; in that case the hole card stays
    /// down and no card is drawn.
    pub fn dealer_play(&self) -> Result<(Vec<Card>, RoundResult), ShowdownError> {
        let mut table = self.table.lock();
        if table.phase != BlackjackPhase::Dealer {
            return Err(table.reject(ShowdownError::InvalidState));
        }

        // Dry run against the undrawn cards; a short shoe changes nothing.
        let mut preview = table.dealer.clone();
        preview.reveal_hole();
        let mut needed = 0;
        let mut upcoming = table.shoe.cards().iter().rev();
        while preview.value() < DEALER_STANDS_ON {
            let Some(&card) = upcoming.next() else {
                return Err(table.reject(ShowdownError::NoCards));
            };
            preview.add_card(card);
            needed += 1;
        }

        table.dealer.reveal_hole();
        let mut drawn = Vec::with_capacity(needed);
        for _ in 0..needed {
            let Some(card) = table.shoe.draw() else {
                return Err(table.reject(ShowdownError::NoCards));
            };
            table.dealer.add_card(card);
            drawn.push(card);
        }
        tracing::debug!(
            value = table.dealer.value(),
            soft = table.dealer.is_soft(),
            drawn = drawn.len(),
            "dealer stands"
        );

        table.accept();
        let result = table.settle();
        Ok((drawn, result))
    }
}
