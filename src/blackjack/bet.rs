use alloc::vec::Vec;

use crate::error::{BetError, DealError};
use crate::seat::SeatId;

use super::hand::Hand;
use super::state::{DealEvent, DealTarget};
use super::strategy::npc_bet;
use super::{Blackjack, BlackjackPhase, SeatHands, Table, TurnPosition};

impl Table {
    /// Finds the first hand still in play at or after `from`.
    pub(super) fn first_playing_from(&self, from: TurnPosition) -> Option<TurnPosition> {
        for (player_index, entry) in self.round.iter().enumerate().skip(from.player_index) {
            let start = if player_index == from.player_index {
                from.hand_index
            } else {
                0
            };
            for (hand_index, hand) in entry.hands.iter().enumerate().skip(start) {
                if hand.status() == super::HandStatus::Playing {
                    return Some(TurnPosition {
                        player_index,
                        hand_index,
                    });
                }
            }
        }
        None
    }
}

impl Blackjack {
    /// Chooses the bet of a human seat for the next deal.
    ///
    /// Chips are committed when the cards are dealt. Placing a second bet
    /// replaces the first.
    ///
    /// # Errors
    ///
    /// Returns an error if betting is closed, the seat does not exist or is
    /// played by the table, or the amount is zero, under the table minimum,
    /// or more than the seat holds.
    pub fn place_bet(&self, seat: SeatId, amount: usize) -> Result<(), BetError> {
        let mut table = self.table.lock();
        if amount == 0 {
            return Err(table.reject(BetError::ZeroBet));
        }
        if table.phase != BlackjackPhase::Betting {
            return Err(table.reject(BetError::InvalidState));
        }

        let (is_ai, chips) = match table.seat(seat) {
            Some(player) => (player.is_ai, player.chips),
            None => return Err(table.reject(BetError::SeatNotFound)),
        };
        if is_ai {
            return Err(table.reject(BetError::AiSeat));
        }
        if amount < self.options.min_bet {
            return Err(table.reject(BetError::BelowMinimum));
        }
        if amount > chips {
            return Err(table.reject(BetError::InsufficientFunds));
        }

        table.bets.insert(seat, amount);
        table.accept();
        tracing::debug!(seat = seat.0, amount, "blackjack bet placed");
        Ok(())
    }

    /// Withdraws a human seat's bet before the deal.
    ///
    /// Returns `false` if there was nothing to withdraw.
    pub fn clear_bet(&self, seat: SeatId) -> bool {
        let mut table = self.table.lock();
        table.phase == BlackjackPhase::Betting && table.bets.remove(&seat).is_some()
    }

    /// Commits bets and deals two cards to every participating seat, then
    /// two to the dealer with the first face down.
    ///
    /// Table-played seats bet by the NPC policy; human seats play only if
    /// they placed a bet. A dealer blackjack settles the round at once.
    /// Otherwise play starts at the first hand still in play, or moves
    /// straight to the dealer when there is none.
    ///
    /// Returns every card dealt, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if a round is already running, the cut card has
    /// been reached, nobody is betting, or the shoe is too short for
    /// `seats * 4 + 6` cards.
    pub fn deal(&self) -> Result<Vec<DealEvent>, DealError> {
        let mut guard = self.table.lock();
        let table = &mut *guard;

        if table.phase != BlackjackPhase::Betting {
            return Err(table.reject(DealError::InvalidState));
        }
        if table.shoe.is_shuffle_pending() {
            return Err(table.reject(DealError::ShufflePending));
        }

        let min_bet = self.options.min_bet;
        let participants: Vec<(SeatId, Option<usize>)> = table
            .seats
            .iter()
            .filter(|seat| seat.chips >= min_bet)
            .filter_map(|seat| {
                if seat.is_ai {
                    Some((seat.id, None))
                } else {
                    table
                        .bets
                        .get(&seat.id)
                        .filter(|&&bet| bet <= seat.chips)
                        .map(|&bet| (seat.id, Some(bet)))
                }
            })
            .collect();

        if participants.is_empty() {
            return Err(table.reject(DealError::NoBets));
        }
        if table.shoe.remaining() < participants.len() * 4 + 6 {
            return Err(table.reject(DealError::NotEnoughCards));
        }

        table.round.clear();
        table.starting_chips.clear();
        table.dealer.clear();
        table.last_result = None;

        let mut events = Vec::with_capacity(participants.len() * 2 + 2);

        for (seat_id, chosen) in participants {
            let Some(seat) = table.seats.iter_mut().find(|s| s.id == seat_id) else {
                continue;
            };
            let bet = match chosen {
                Some(bet) => bet,
                None => npc_bet(
                    &mut table.rng,
                    seat.chips,
                    min_bet,
                    self.options.npc_max_bet_multiple,
                ),
            };
            table.starting_chips.insert(seat_id, seat.chips);
            seat.chips -= bet;

            let mut hand = Hand::new(bet);
            for _ in 0..2 {
                if let Some(card) = table.shoe.draw() {
                    hand.add_card(card);
                    events.push(DealEvent {
                        target: DealTarget::Seat(seat_id),
                        card,
                    });
                }
            }
            hand.open();
            table.round.push(SeatHands {
                seat: seat_id,
                hands: alloc::vec![hand],
            });
        }
        table.bets.clear();

        for index in 0..2 {
            if let Some(card) = table.shoe.draw() {
                let card = if index == 0 { card.face_down() } else { card };
                table.dealer.add_card(card);
                events.push(DealEvent {
                    target: DealTarget::Dealer,
                    card,
                });
            }
        }

        tracing::debug!(
            seats = table.round.len(),
            remaining = table.shoe.remaining(),
            "blackjack hands dealt"
        );

        table.accept();

        if table.dealer.is_blackjack() {
            table.dealer.reveal_hole();
            table.current_turn = None;
            table.settle();
            return Ok(events);
        }

        table.current_turn = table.first_playing_from(TurnPosition {
            player_index: 0,
            hand_index: 0,
        });
        table.phase = if table.current_turn.is_some() {
            BlackjackPhase::Playing
        } else {
            BlackjackPhase::Dealer
        };

        Ok(events)
    }
}
