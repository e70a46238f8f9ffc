//! Baccarat table engine.
//!
//! A round walks `Betting -> Dealing -> Result`; [`Baccarat::reset_round`]
//! reopens betting. Stakes leave a seat's chips when placed and come back,
//! with winnings, at settlement.

use core::fmt::Display;

use alloc::string::{String, ToString};
use alloc::vec::Vec;
#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::card::Card;
use crate::error::{BetError, DealError};
use crate::options::BaccaratOptions;
use crate::seat::{RoundOutcome, Seat, SeatId, SettlementUpdate, allocate_seat_id, chip_delta};
use crate::shoe::Shoe;
use crate::sync::Mutex;

pub mod ai;
pub mod roadmap;
pub mod rules;

pub use roadmap::{BeadCell, BigRoadNode, RoundRecord, bead_plate, big_road};
pub use rules::{BaccaratBet, BetType, CoupOutcome, Winner};

use rules::{banker_draws, bet_payout, card_point, hand_point, is_natural, is_pair, player_draws};

/// Cards a coup can use.
const MAX_COUP_CARDS: usize = 6;

/// Baccarat table phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaccaratPhase {
    /// Accepting bets.
    Betting,
    /// Cards are being drawn.
    Dealing,
    /// Coup settled, waiting for reset.
    Result,
}

/// Which hand a card was dealt to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The player hand.
    Player,
    /// The banker hand.
    Banker,
}

/// One card leaving the shoe during a coup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoupDraw {
    /// Receiving hand.
    pub side: Side,
    /// The card.
    pub card: Card,
}

/// Settlement of one seat's bets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatSettlement {
    /// Seat.
    pub seat: SeatId,
    /// Every bet with its signed net result.
    pub bets: Vec<(BaccaratBet, isize)>,
    /// Sum of stakes.
    pub total_bet: usize,
    /// Chip change from the coup, stakes included.
    pub net: isize,
    /// Balance after settlement.
    pub chips: usize,
}

/// A dealt and settled coup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoupResult {
    /// Every card in draw order.
    pub draws: Vec<CoupDraw>,
    /// Player hand.
    pub player_cards: Vec<Card>,
    /// Banker hand.
    pub banker_cards: Vec<Card>,
    /// Final player point.
    pub player_point: u8,
    /// Final banker point.
    pub banker_point: u8,
    /// Whether either side had a natural.
    pub natural: bool,
    /// What the coup means for bets.
    pub outcome: CoupOutcome,
    /// One entry per seat that had bets.
    pub settlements: Vec<SeatSettlement>,
    /// Balance updates for every seat at the table.
    pub updates: Vec<SettlementUpdate>,
}

#[derive(Debug)]
struct Table {
    shoe: Shoe,
    rng: ChaCha8Rng,
    phase: BaccaratPhase,
    seats: Vec<Seat>,
    next_id: u32,
    bets: HashMap<SeatId, HashMap<BetType, usize>>,
    coup: Option<CoupResult>,
    history: Vec<RoundRecord>,
    message: Option<String>,
}

impl Table {
    fn seat_mut(&mut self, id: SeatId) -> Option<&mut Seat> {
        self.seats.iter_mut().find(|seat| seat.id == id)
    }

    fn reject<E: Display + Copy>(&mut self, err: E) -> E {
        tracing::debug!(%err, phase = ?self.phase, "baccarat action rejected");
        self.message = Some(err.to_string());
        err
    }

    fn has_bets(&self) -> bool {
        self.bets
            .values()
            .any(|spots| spots.values().any(|&amount| amount > 0))
    }

    fn stake(&mut self, seat: SeatId, bet: BaccaratBet, min_bet: usize) -> Result<(), BetError> {
        if bet.amount == 0 {
            return Err(BetError::ZeroBet);
        }
        if self.phase != BaccaratPhase::Betting {
            return Err(BetError::InvalidState);
        }
        if bet.amount < min_bet {
            return Err(BetError::BelowMinimum);
        }
        let player = self.seat_mut(seat).ok_or(BetError::SeatNotFound)?;
        if player.chips < bet.amount {
            return Err(BetError::InsufficientFunds);
        }

        player.chips -= bet.amount;
        *self
            .bets
            .entry(seat)
            .or_default()
            .entry(bet.bet_type)
            .or_insert(0) += bet.amount;
        tracing::debug!(seat = seat.0, bet_type = ?bet.bet_type, amount = bet.amount, "baccarat bet placed");
        Ok(())
    }

    fn draw(&mut self, side: Side, hand: &mut Vec<Card>, draws: &mut Vec<CoupDraw>) -> Option<Card> {
        let card = self.shoe.draw()?;
        hand.push(card);
        draws.push(CoupDraw { side, card });
        Some(card)
    }

    fn play_coup(&mut self) -> Option<(Vec<CoupDraw>, Vec<Card>, Vec<Card>)> {
        let mut draws = Vec::with_capacity(MAX_COUP_CARDS);
        let mut player = Vec::with_capacity(3);
        let mut banker = Vec::with_capacity(3);

        self.draw(Side::Player, &mut player, &mut draws)?;
        self.draw(Side::Banker, &mut banker, &mut draws)?;
        self.draw(Side::Player, &mut player, &mut draws)?;
        self.draw(Side::Banker, &mut banker, &mut draws)?;

        if is_natural(&player) || is_natural(&banker) {
            return Some((draws, player, banker));
        }

        let player_third = if player_draws(hand_point(&player)) {
            let card = self.draw(Side::Player, &mut player, &mut draws)?;
            Some(card_point(card.rank))
        } else {
            None
        };

        if banker_draws(hand_point(&banker), player_third) {
            self.draw(Side::Banker, &mut banker, &mut draws)?;
        }

        Some((draws, player, banker))
    }

    fn settle(&mut self, outcome: CoupOutcome) -> Vec<SeatSettlement> {
        let mut settlements = Vec::new();
        let bets = core::mem::take(&mut self.bets);

        for seat in &mut self.seats {
            let Some(spots) = bets.get(&seat.id) else {
                continue;
            };
            let before = seat.chips;
            let mut placed = Vec::new();
            let mut total_bet = 0;

            for bet_type in BetType::ALL {
                let Some(&amount) = spots.get(&bet_type).filter(|&&amount| amount > 0) else {
                    continue;
                };
                let bet = BaccaratBet { bet_type, amount };
                let payout = bet_payout(bet, outcome);
                // A loss returns nothing; anything else returns the stake.
                let returned = amount.saturating_add_signed(payout);
                seat.chips = seat.chips.saturating_add(returned);
                total_bet += amount;
                placed.push((bet, payout));
            }

            if placed.is_empty() {
                continue;
            }
            let net = chip_delta(before + total_bet, seat.chips);
            settlements.push(SeatSettlement {
                seat: seat.id,
                bets: placed,
                total_bet,
                net,
                chips: seat.chips,
            });
        }

        settlements
    }
}

/// A baccarat table that manages seats, bets, the shoe and the scoreboard.
pub struct Baccarat {
    /// Table options.
    pub options: BaccaratOptions,
    table: Mutex<Table>,
}

impl Baccarat {
    /// Creates a new table with the given seed.
    ///
    /// The shoe's cut card sits 14 cards from the end.
    #[must_use]
    pub fn new(options: BaccaratOptions, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let shoe = Shoe::build(options.decks, None, &mut rng);

        Self {
            options,
            table: Mutex::new(Table {
                shoe,
                rng,
                phase: BaccaratPhase::Betting,
                seats: Vec::new(),
                next_id: 0,
                bets: HashMap::new(),
                coup: None,
                history: Vec::new(),
                message: None,
            }),
        }
    }

    /// Seats a player and returns the seat handle.
    pub fn join(&self, name: impl Into<String>, chips: usize, is_ai: bool) -> SeatId {
        let mut table = self.table.lock();
        let table = &mut *table;
        let id = allocate_seat_id(&table.seats, &mut table.next_id);
        table.seats.push(Seat::new(id, name, chips, is_ai));
        id
    }

    /// Returns a snapshot of every seat.
    pub fn seats(&self) -> Vec<Seat> {
        self.table.lock().seats.clone()
    }

    /// Returns the chip balance of a seat.
    pub fn chips(&self, seat: SeatId) -> Option<usize> {
        let table = self.table.lock();
        table.seats.iter().find(|s| s.id == seat).map(|s| s.chips)
    }

    /// Returns the current phase.
    pub fn phase(&self) -> BaccaratPhase {
        self.table.lock().phase
    }

    /// Returns the stakes a seat has on the layout, in settlement order.
    pub fn bets(&self, seat: SeatId) -> Vec<BaccaratBet> {
        let table = self.table.lock();
        let Some(spots) = table.bets.get(&seat) else {
            return Vec::new();
        };
        BetType::ALL
            .into_iter()
            .filter_map(|bet_type| {
                spots
                    .get(&bet_type)
                    .filter(|&&amount| amount > 0)
                    .map(|&amount| BaccaratBet { bet_type, amount })
            })
            .collect()
    }

    /// Returns whether the seat may place a bet now.
    pub fn can_bet(&self, seat: SeatId) -> bool {
        let table = self.table.lock();
        table.phase == BaccaratPhase::Betting
            && table
                .seats
                .iter()
                .any(|s| s.id == seat && s.chips >= self.options.min_bet)
    }

    /// Returns the last dealt coup until the round is reset.
    pub fn coup(&self) -> Option<CoupResult> {
        self.table.lock().coup.clone()
    }

    /// Returns the settled-round history of the current shoe.
    pub fn history(&self) -> Vec<RoundRecord> {
        self.table.lock().history.clone()
    }

    /// Bead plate of the current shoe.
    pub fn bead_plate(&self) -> Vec<BeadCell> {
        bead_plate(&self.table.lock().history, self.options.roadmap_rows)
    }

    /// Big road of the current shoe.
    pub fn big_road(&self) -> Vec<BigRoadNode> {
        big_road(&self.table.lock().history, self.options.roadmap_rows)
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

    /// Replaces the shoe, e.g. with a prepared one. Only allowed while
    /// betting.
    ///
    /// Returns `false` otherwise.
    pub fn replace_shoe(&self, shoe: Shoe) -> bool {
        let mut table = self.table.lock();
        if table.phase != BaccaratPhase::Betting {
            return false;
        }
        table.shoe = shoe;
        true
    }

    /// Stakes `amount` on a spot. Repeated bets on one spot add up.
    ///
    /// # Errors
    ///
    /// Returns an error if betting is closed, the seat does not exist, or
    /// the amount is zero, under the table minimum, or more than the seat
    /// holds.
    pub fn place_bet(&self, seat: SeatId, bet_type: BetType, amount: usize) -> Result<(), BetError> {
        let mut table = self.table.lock();
        match table.stake(seat, BaccaratBet { bet_type, amount }, self.options.min_bet) {
            Ok(()) => {
                table.message = None;
                Ok(())
            }
            Err(err) => Err(table.reject(err)),
        }
    }

    /// Takes back every stake of a seat and returns the refunded amount.
    ///
    /// # Errors
    ///
    /// Returns an error if betting is closed or the seat does not exist.
    pub fn clear_bets(&self, seat: SeatId) -> Result<usize, BetError> {
        let mut table = self.table.lock();
        if table.phase != BaccaratPhase::Betting {
            return Err(table.reject(BetError::InvalidState));
        }
        if !table.seats.iter().any(|s| s.id == seat) {
            return Err(table.reject(BetError::SeatNotFound));
        }

        let refund: usize = table
            .bets
            .remove(&seat)
            .map(|spots| spots.values().sum())
            .unwrap_or(0);
        if let Some(player) = table.seat_mut(seat) {
            player.chips += refund;
        }
        table.message = None;
        Ok(refund)
    }

    /// Places bets for every table-played seat that has none yet.
    ///
    /// Returns the bets placed.
    pub fn place_ai_bets(&self) -> Vec<(SeatId, BaccaratBet)> {
        let mut guard = self.table.lock();
        let table = &mut *guard;
        let mut placed = Vec::new();
        if table.phase != BaccaratPhase::Betting {
            return placed;
        }

        let bettors: Vec<(SeatId, usize)> = table
            .seats
            .iter()
            .filter(|s| s.is_ai && !table.bets.contains_key(&s.id))
            .map(|s| (s.id, s.chips))
            .collect();

        for (seat, chips) in bettors {
            for bet in ai::plan_bets(&mut table.rng, chips, self.options.min_bet) {
                if table.stake(seat, bet, self.options.min_bet).is_ok() {
                    placed.push((seat, bet));
                }
            }
        }
        placed
    }

    /// Deals a coup, applies the third-card rule and settles every bet.
    ///
    /// Cards go Player, Banker, Player, Banker. A natural on either side
    /// ends the draw; otherwise the player draws on 0-5 and the banker
    /// follows the tableau.
    ///
    /// # Errors
    ///
    /// Returns an error if a coup is already on the table, nobody has bet,
    /// or the shoe cannot cover a full coup.
    pub fn deal(&self) -> Result<CoupResult, DealError> {
        let mut table = self.table.lock();
        if table.phase != BaccaratPhase::Betting {
            return Err(table.reject(DealError::InvalidState));
        }
        if !table.has_bets() {
            return Err(table.reject(DealError::NoBets));
        }
        if table.shoe.remaining() < MAX_COUP_CARDS {
            return Err(table.reject(DealError::NotEnoughCards));
        }

        table.phase = BaccaratPhase::Dealing;
        let Some((draws, player_cards, banker_cards)) = table.play_coup() else {
            // Unreachable with six cards in the shoe.
            table.phase = BaccaratPhase::Betting;
            return Err(table.reject(DealError::NotEnoughCards));
        };

        let player_point = hand_point(&player_cards);
        let banker_point = hand_point(&banker_cards);
        let outcome = CoupOutcome {
            winner: Winner::from_points(player_point, banker_point),
            player_pair: is_pair(&player_cards),
            banker_pair: is_pair(&banker_cards),
        };
        let natural = is_natural(&player_cards) || is_natural(&banker_cards);

        let settlements = table.settle(outcome);
        let updates = table
            .seats
            .iter()
            .map(|seat| SettlementUpdate {
                name: seat.name.clone(),
                chips: seat.chips,
                result: settlements
                    .iter()
                    .find(|s| s.seat == seat.id)
                    .map(|s| RoundOutcome::from_delta(s.net)),
            })
            .collect();

        table.history.push(RoundRecord {
            winner: outcome.winner,
            player_point,
            banker_point,
            player_pair: outcome.player_pair,
            banker_pair: outcome.banker_pair,
        });

        let coup = CoupResult {
            draws,
            player_cards,
            banker_cards,
            player_point,
            banker_point,
            natural,
            outcome,
            settlements,
            updates,
        };

        tracing::info!(
            player_point,
            banker_point,
            winner = ?outcome.winner,
            natural,
            remaining = table.shoe.remaining(),
            "baccarat coup settled"
        );

        table.coup = Some(coup.clone());
        table.message = None;
        table.phase = BaccaratPhase::Result;
        Ok(coup)
    }

    /// Clears the settled coup and reopens betting.
    ///
    /// If the cut card came out, the shoe is rebuilt here and the
    /// scoreboard history starts over. Does nothing unless a coup has been
    /// settled, so calling it twice is harmless.
    pub fn reset_round(&self) {
        let mut guard = self.table.lock();
        let table = &mut *guard;
        if table.phase != BaccaratPhase::Result {
            return;
        }

        table.coup = None;
        table.bets.clear();
        table.message = None;

        if table.shoe.is_shuffle_pending() {
            table.shoe = Shoe::build(self.options.decks, None, &mut table.rng);
            table.history.clear();
            tracing::info!(
                cards = table.shoe.shoe_size(),
                "baccarat shoe rebuilt, scoreboard cleared"
            );
        }

        table.phase = BaccaratPhase::Betting;
    }
}
