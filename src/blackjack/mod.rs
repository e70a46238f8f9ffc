//! Blackjack table engine.
//!
//! A round walks `Betting -> Playing -> Dealer -> Result`, then
//! [`Blackjack::reset_round`] returns the table to `Betting`. Rejected
//! actions leave the table unchanged and set [`Blackjack::message`].

use core::fmt::Display;

use alloc::string::{String, ToString};
use alloc::vec::Vec;
#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::options::BlackjackOptions;
use crate::seat::{Seat, SeatId, allocate_seat_id};
use crate::shoe::Shoe;
use crate::sync::Mutex;

mod actions;
mod bet;
mod cut;
mod dealer;
pub mod hand;
pub mod result;
pub mod state;
pub mod strategy;

pub use cut::{CutCeremony, CutRoll};
pub use hand::{DealerHand, Hand, HandOutcome, HandStatus, HandValue, SplitSide};
pub use result::{HandResult, PlayerResult, RoundResult};
pub use state::{BlackjackPhase, DealEvent, DealTarget, TurnPosition};
pub use strategy::NpcMove;

/// Hands held by one seat for the current round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatHands {
    /// Owning seat.
    pub seat: SeatId,
    /// One hand, or two after a split.
    pub hands: Vec<Hand>,
}

#[derive(Debug)]
struct Table {
    shoe: Shoe,
    rng: ChaCha8Rng,
    phase: BlackjackPhase,
    seats: Vec<Seat>,
    next_id: u32,
    /// Bets chosen by human seats for the next deal.
    bets: HashMap<SeatId, usize>,
    /// Seats dealt into this round, in deal order.
    round: Vec<SeatHands>,
    /// Chip balances before this round's bets.
    starting_chips: HashMap<SeatId, usize>,
    dealer: DealerHand,
    current_turn: Option<TurnPosition>,
    last_result: Option<RoundResult>,
    last_cut: Option<CutCeremony>,
    message: Option<String>,
}

impl Table {
    fn seat(&self, id: SeatId) -> Option<&Seat> {
        self.seats.iter().find(|seat| seat.id == id)
    }

    fn seat_mut(&mut self, id: SeatId) -> Option<&mut Seat> {
        self.seats.iter_mut().find(|seat| seat.id == id)
    }

    fn reject<E: Display + Copy>(&mut self, err: E) -> E {
        tracing::debug!(%err, phase = ?self.phase, "blackjack action rejected");
        self.message = Some(err.to_string());
        err
    }

    fn accept(&mut self) {
        self.message = None;
    }

    fn hand(&self, position: TurnPosition) -> Option<&Hand> {
        self.round
            .get(position.player_index)
            .and_then(|entry| entry.hands.get(position.hand_index))
    }

    fn hand_mut(&mut self, position: TurnPosition) -> Option<&mut Hand> {
        self.round
            .get_mut(position.player_index)
            .and_then(|entry| entry.hands.get_mut(position.hand_index))
    }

    fn position_of(&self, seat: SeatId, hand_index: usize) -> Option<TurnPosition> {
        let player_index = self.round.iter().position(|entry| entry.seat == seat)?;
        Some(TurnPosition {
            player_index,
            hand_index,
        })
    }

    fn current_seat(&self) -> Option<SeatId> {
        self.current_turn
            .and_then(|turn| self.round.get(turn.player_index))
            .map(|entry| entry.seat)
    }
}

/// A blackjack table that manages seats, the shoe, and round flow.
///
/// The table owns its shoe and its random source. Use
/// [`BlackjackOptions`] to configure decks, the table minimum and cut-card
/// placement.
pub struct Blackjack {
    /// Table options.
    pub options: BlackjackOptions,
    table: Mutex<Table>,
}

impl Blackjack {
    /// Creates a new table with the given seed.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use tablekit::{Blackjack, BlackjackOptions};
    ///
    /// let table = Blackjack::new(BlackjackOptions::default(), 42);
    /// let _ = table;
    /// ```
    #[must_use]
    pub fn new(options: BlackjackOptions, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let shoe = Shoe::build(options.decks, Some(options.cut_ratio), &mut rng);

        Self {
            options,
            table: Mutex::new(Table {
                shoe,
                rng,
                phase: BlackjackPhase::Betting,
                seats: Vec::new(),
                next_id: 0,
                bets: HashMap::new(),
                round: Vec::new(),
                starting_chips: HashMap::new(),
                dealer: DealerHand::new(),
                current_turn: None,
                last_result: None,
                last_cut: None,
                message: None,
            }),
        }
    }

    /// Seats a player and returns the seat handle.
    ///
    /// Seats joining mid-round are dealt in from the next round.
    pub fn join(&self, name: impl Into<String>, chips: usize, is_ai: bool) -> SeatId {
        let mut table = self.table.lock();
        let table = &mut *table;
        let id = allocate_seat_id(&table.seats, &mut table.next_id);
        table.seats.push(Seat::new(id, name, chips, is_ai));
        id
    }

    /// Removes a seat. Only allowed between rounds.
    ///
    /// Returns `false` if the seat does not exist or a round is running.
    pub fn leave(&self, seat: SeatId) -> bool {
        let mut table = self.table.lock();
        if table.phase != BlackjackPhase::Betting {
            return false;
        }
        let before = table.seats.len();
        table.seats.retain(|s| s.id != seat);
        table.bets.remove(&seat);
        table.seats.len() != before
    }

    /// Returns a snapshot of every seat.
    pub fn seats(&self) -> Vec<Seat> {
        self.table.lock().seats.clone()
    }

    /// Returns the chip balance of a seat.
    pub fn chips(&self, seat: SeatId) -> Option<usize> {
        self.table.lock().seat(seat).map(|s| s.chips)
    }

    /// Returns the current phase.
    pub fn phase(&self) -> BlackjackPhase {
        self.table.lock().phase
    }

    /// Returns the current turn, if a hand is being played.
    pub fn current_turn(&self) -> Option<TurnPosition> {
        self.table.lock().current_turn
    }

    /// Returns the seat whose turn it is.
    pub fn current_seat(&self) -> Option<SeatId> {
        self.table.lock().current_seat()
    }

    /// Returns the hands of every seat dealt into this round, in deal order.
    pub fn round_hands(&self) -> Vec<SeatHands> {
        self.table.lock().round.clone()
    }

    /// Returns the hands of one seat for this round.
    pub fn hands(&self, seat: SeatId) -> Option<Vec<Hand>> {
        let table = self.table.lock();
        table
            .round
            .iter()
            .find(|entry| entry.seat == seat)
            .map(|entry| entry.hands.clone())
    }

    /// Returns a clone of the dealer's hand.
    pub fn dealer_hand(&self) -> DealerHand {
        self.table.lock().dealer.clone()
    }

    /// Returns the bet a human seat has chosen for the next deal.
    pub fn pending_bet(&self, seat: SeatId) -> Option<usize> {
        self.table.lock().bets.get(&seat).copied()
    }

    /// Returns the settlement of the last finished round.
    pub fn last_result(&self) -> Option<RoundResult> {
        self.table.lock().last_result.clone()
    }

    /// Returns the text of the last rejected action.
    pub fn message(&self) -> Option<String> {
        self.table.lock().message.clone()
    }

    /// Returns the number of cards remaining in the shoe.
    pub fn cards_remaining(&self) -> usize {
        self.table.lock().shoe.remaining()
    }

    /// Returns whether the cut card has been reached.
    pub fn is_shuffle_pending(&self) -> bool {
        self.table.lock().shoe.is_shuffle_pending()
    }

    /// Returns a snapshot of the shoe.
    pub fn shoe(&self) -> Shoe {
        self.table.lock().shoe.clone()
    }

    /// Replaces the shoe, e.g. with a prepared one. Only allowed between
    /// rounds.
    ///
    /// Returns `false` if a round is running.
    pub fn replace_shoe(&self, shoe: Shoe) -> bool {
        let mut table = self.table.lock();
        if table.phase != BlackjackPhase::Betting {
            return false;
        }
        table.shoe = shoe;
        true
    }

    /// Returns whether the seat may place a bet now.
    pub fn can_bet(&self, seat: SeatId) -> bool {
        let table = self.table.lock();
        table.phase == BlackjackPhase::Betting
            && table
                .seat(seat)
                .is_some_and(|s| !s.is_ai && s.chips >= self.options.min_bet)
    }

    /// Returns whether it is this seat's turn.
    pub fn is_player_turn(&self, seat: SeatId) -> bool {
        let table = self.table.lock();
        table.phase == BlackjackPhase::Playing && table.current_seat() == Some(seat)
    }

    /// Returns whether the seat may split the given hand right now.
    pub fn can_split_hand(&self, seat: SeatId, hand_index: usize) -> bool {
        let table = self.table.lock();
        table.phase == BlackjackPhase::Playing
            && table.current_seat() == Some(seat)
            && table.current_turn.map(|t| t.hand_index) == Some(hand_index)
            && table.can_split_current()
    }

    /// Clears the finished round and reopens betting.
    ///
    /// Does nothing unless the round has been settled, so calling it twice
    /// is harmless.
    pub fn reset_round(&self) {
        let mut table = self.table.lock();
        if table.phase != BlackjackPhase::Result {
            return;
        }
        table.round.clear();
        table.starting_chips.clear();
        table.dealer.clear();
        table.current_turn = None;
        table.message = None;
        table.phase = BlackjackPhase::Betting;
        tracing::debug!("blackjack round reset");
    }
}
