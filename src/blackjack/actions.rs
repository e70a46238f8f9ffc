use core::fmt::Display;

use crate::card::{Card, Rank};
use crate::error::ActionError;
use crate::seat::SeatId;

use super::hand::{Hand, HandStatus, SplitSide};
use super::strategy::{self, NpcMove};
use super::{Blackjack, BlackjackPhase, Table, TurnPosition};

impl Table {
    pub(super) fn finish<T, E: Display + Copy>(&mut self, result: Result<T, E>) -> Result<T, E> {
        match result {
            Ok(value) => {
                self.accept();
                Ok(value)
            }
            Err(err) => Err(self.reject(err)),
        }
    }

    fn ensure_turn(&self, seat: SeatId, hand_index: usize) -> Result<TurnPosition, ActionError> {
        if self.phase != BlackjackPhase::Playing {
            return Err(ActionError::InvalidState);
        }
        if self.seat(seat).is_none() {
            return Err(ActionError::SeatNotFound);
        }
        let turn = self.current_turn.ok_or(ActionError::InvalidState)?;
        if self.current_seat() != Some(seat) || turn.hand_index != hand_index {
            return Err(ActionError::NotYourTurn);
        }

        let hand = self.hand(turn).ok_or(ActionError::HandNotFound)?;
        if hand.status() != HandStatus::Playing {
            return Err(ActionError::HandNotActive);
        }
        Ok(turn)
    }

    /// Moves the turn to the next hand in play after `from`, or hands over
    /// to the dealer when none is left.
    pub(super) fn advance_from(&mut self, from: TurnPosition) {
        self.current_turn = self.first_playing_from(TurnPosition {
            player_index: from.player_index,
            hand_index: from.hand_index + 1,
        });
        if self.current_turn.is_none() {
            self.phase = BlackjackPhase::Dealer;
            tracing::debug!("all hands played, dealer to act");
        }
    }

    pub(super) fn can_split_current(&self) -> bool {
        let Some(turn) = self.current_turn else {
            return false;
        };
        let Some(hand) = self.hand(turn) else {
            return false;
        };
        hand.status() == HandStatus::Playing
            && hand.is_splittable_pair()
            && self
                .current_seat()
                .and_then(|seat| self.seat(seat))
                .is_some_and(|seat| seat.chips >= hand.bet())
    }

    fn hit_at(&mut self, seat: SeatId, hand_index: usize) -> Result<Card, ActionError> {
        let turn = self.ensure_turn(seat, hand_index)?;
        let card = self.shoe.draw().ok_or(ActionError::NoCards)?;
        let hand = self.hand_mut(turn).ok_or(ActionError::HandNotFound)?;

        hand.add_card(card);
        if hand.status() == HandStatus::Playing && hand.value() == 21 {
            hand.set_status(HandStatus::Stand);
        }
        let status = hand.status();
        tracing::debug!(seat = seat.0, hand_index, ?status, "hit");

        if status != HandStatus::Playing {
            self.advance_from(turn);
        }
        Ok(card)
    }

    fn stand_at(&mut self, seat: SeatId, hand_index: usize) -> Result<(), ActionError> {
        let turn = self.ensure_turn(seat, hand_index)?;
        let hand = self.hand_mut(turn).ok_or(ActionError::HandNotFound)?;
        hand.set_status(HandStatus::Stand);
        tracing::debug!(seat = seat.0, hand_index, "stand");

        self.advance_from(turn);
        Ok(())
    }

    fn split_at(&mut self, seat: SeatId, hand_index: usize) -> Result<(), ActionError> {
        let turn = self.ensure_turn(seat, hand_index)?;
        let hand = self.hand(turn).ok_or(ActionError::HandNotFound)?;
        if !hand.is_splittable_pair() {
            return Err(ActionError::CannotSplit);
        }
        let bet = hand.bet();

        let chips = self.seat(seat).map_or(0, |s| s.chips);
        if chips < bet {
            return Err(ActionError::InsufficientFunds);
        }
        if self.shoe.remaining() < 2 {
            return Err(ActionError::NoCards);
        }

        let Some((first, second)) = self.hand_mut(turn).and_then(Hand::take_pair) else {
            return Err(ActionError::CannotSplit);
        };
        let (Some(draw_a), Some(draw_b)) = (self.shoe.draw(), self.shoe.draw()) else {
            return Err(ActionError::NoCards);
        };

        if let Some(owner) = self.seat_mut(seat) {
            owner.chips -= bet;
        }

        let aces = first.rank == Rank::Ace;
        let mut hand_a = Hand::from_split(first, draw_a, bet, SplitSide::A);
        let mut hand_b = Hand::from_split(second, draw_b, bet, SplitSide::B);
        if aces {
            // One card per split ace.
            for split_hand in [&mut hand_a, &mut hand_b] {
                if split_hand.status() == HandStatus::Playing {
                    split_hand.set_status(HandStatus::Stand);
                }
            }
        }
        let first_playing = hand_a.status() == HandStatus::Playing;

        if let Some(entry) = self.round.get_mut(turn.player_index) {
            entry.hands[turn.hand_index] = hand_a;
            entry.hands.insert(turn.hand_index + 1, hand_b);
        }
        tracing::debug!(seat = seat.0, hand_index, aces, bet, "split");

        if !first_playing {
            self.advance_from(turn);
        }
        Ok(())
    }
}

impl Blackjack {
    /// Draws one card into the hand whose turn it is.
    ///
    /// Busting loses the hand and reaching 21 stands it; either moves the
    /// turn on. Otherwise the same hand keeps the turn.
    ///
    /// # Errors
    ///
    /// Returns an error if no hand is being played, it is not this hand's
    /// turn, or the shoe is empty.
    pub fn hit(&self, seat: SeatId, hand_index: usize) -> Result<Card, ActionError> {
        let mut table = self.table.lock();
        let result = table.hit_at(seat, hand_index);
        table.finish(result)
    }

    /// Stands the hand whose turn it is and moves the turn on.
    ///
    /// # Errors
    ///
    /// Returns an error if no hand is being played or it is not this hand's
    /// turn.
    pub fn stand(&self, seat: SeatId, hand_index: usize) -> Result<(), ActionError> {
        let mut table = self.table.lock();
        let result = table.stand_at(seat, hand_index);
        table.finish(result)
    }

    /// Splits a pair into two hands, `-a` and `-b`, each carrying the
    /// original bet and one fresh card.
    ///
    /// The extra bet is taken from the seat's chips. Split aces get one card
    /// each and stand. A split hand cannot be split again.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not this hand's turn, the hand is not a
    /// pair of equal ranks or is already split, the seat cannot cover a
    /// second bet, or the shoe is short.
    pub fn split(&self, seat: SeatId, hand_index: usize) -> Result<(), ActionError> {
        let mut table = self.table.lock();
        let result = table.split_at(seat, hand_index);
        table.finish(result)
    }

    /// Plays one decision for the table-played seat whose turn it is.
    ///
    /// Returns the move made.
    ///
    /// # Errors
    ///
    /// Returns an error if no hand is being played, the current seat is a
    /// human seat, or the move itself is rejected.
    pub fn play_npc_turn(&self) -> Result<NpcMove, ActionError> {
        let mut table = self.table.lock();
        let decision = table.npc_move();
        let result = decision.and_then(|(seat, hand_index, decision)| {
            let applied = match decision {
                NpcMove::Hit => table.hit_at(seat, hand_index).map(|_| ()),
                NpcMove::Stand => table.stand_at(seat, hand_index),
                NpcMove::Split => table.split_at(seat, hand_index),
            };
            applied.map(|()| decision)
        });
        table.finish(result)
    }

    /// Returns the move the NPC policy would make for the current hand.
    pub fn npc_decision(&self) -> Option<NpcMove> {
        self.table.lock().npc_move().ok().map(|(_, _, decision)| decision)
    }
}

impl Table {
    fn npc_move(&self) -> Result<(SeatId, usize, NpcMove), ActionError> {
        if self.phase != BlackjackPhase::Playing {
            return Err(ActionError::InvalidState);
        }
        let turn = self.current_turn.ok_or(ActionError::InvalidState)?;
        let seat = self.current_seat().ok_or(ActionError::SeatNotFound)?;
        if !self.seat(seat).is_some_and(|s| s.is_ai) {
            return Err(ActionError::NotAiSeat);
        }
        let hand = self.hand(turn).ok_or(ActionError::HandNotFound)?;
        let up_card = self
            .dealer
            .up_card()
            .map_or(Rank::Ten, |card| card.rank);

        let decision = strategy::decide(hand, up_card, self.can_split_current());
        Ok((seat, turn.hand_index, decision))
    }
}
