//! Roulette bet ledger and resolver.
//!
//! The table never spins anything itself: the winning pocket comes from
//! the caller, and the engine only turns it into payouts. A round walks
//! `Idle -> Betting -> Spinning -> Result`, and [`Roulette::reset_game`]
//! returns to `Idle` from any phase but `Spinning`.

use alloc::collections::VecDeque;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::error::RouletteError;
use crate::options::RouletteOptions;
use crate::seat::{RoundOutcome, Seat, SeatId, SettlementUpdate, allocate_seat_id, chip_delta};
use crate::sync::Mutex;

pub mod layout;

pub use layout::{BetKind, Color, Pocket, Wheel};

/// Roulette table phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoulettePhase {
    /// No bets on the layout.
    Idle,
    /// At least one bet is down.
    Betting,
    /// Bets are closed, waiting for the winning pocket.
    Spinning,
    /// The round is resolved.
    Result,
}

/// A bet on the layout. The covered pockets are fixed at placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouletteBet {
    /// Bet kind, which fixes the payout.
    pub kind: BetKind,
    /// Stake.
    pub amount: usize,
    /// Covered pockets, sorted and without duplicates.
    pub numbers: Vec<Pocket>,
    /// Owner of the bet.
    pub player: SeatId,
}

impl RouletteBet {
    /// Whether the bet covers `pocket`.
    #[must_use]
    pub fn covers(&self, pocket: Pocket) -> bool {
        self.numbers.binary_search(&pocket).is_ok()
    }

    /// Total return for `winning`: stake plus winnings, or zero.
    #[must_use]
    pub fn payout(&self, winning: Pocket) -> usize {
        if self.covers(winning) {
            self.amount
                .saturating_mul(self.kind.payout_multiple())
                .saturating_add(self.amount)
        } else {
            0
        }
    }
}

/// One resolved bet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBet {
    /// The bet.
    pub bet: RouletteBet,
    /// Whether it covered the winning pocket.
    pub won: bool,
    /// Total return, stake included.
    pub payout: usize,
}

/// Outcome of a spin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouletteResult {
    /// Winning pocket.
    pub winning: Pocket,
    /// Every bet with its return.
    pub bets: Vec<ResolvedBet>,
    /// Sum of all returns.
    pub total_win: usize,
    /// Balance updates for every player at the table.
    pub updates: Vec<SettlementUpdate>,
}

/// A history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinRecord {
    /// Winning pocket.
    pub pocket: Pocket,
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: u64,
}

#[derive(Debug)]
struct Table {
    phase: RoulettePhase,
    seats: Vec<Seat>,
    next_id: u32,
    bets: Vec<RouletteBet>,
    last_result: Option<RouletteResult>,
    history: VecDeque<SpinRecord>,
    message: Option<String>,
}

impl Table {
    fn reject(&mut self, err: RouletteError) -> RouletteError {
        tracing::debug!(%err, phase = ?self.phase, "roulette action rejected");
        self.message = Some(err.to_string());
        err
    }

    fn refund_bets(&mut self) -> usize {
        let mut refunded = 0;
        for bet in self.bets.drain(..) {
            if let Some(seat) = self.seats.iter_mut().find(|s| s.id == bet.player) {
                seat.chips += bet.amount;
                refunded += bet.amount;
            }
        }
        refunded
    }
}

/// A roulette table: players, their chips and the bet ledger.
pub struct Roulette {
    /// Table options.
    pub options: RouletteOptions,
    table: Mutex<Table>,
}

impl Roulette {
    /// Creates an empty table.
    #[must_use]
    pub fn new(options: RouletteOptions) -> Self {
        Self {
            options,
            table: Mutex::new(Table {
                phase: RoulettePhase::Idle,
                seats: Vec::new(),
                next_id: 0,
                bets: Vec::new(),
                last_result: None,
                history: VecDeque::new(),
                message: None,
            }),
        }
    }

    /// Seats a player and returns the seat handle.
    pub fn join(&self, name: impl Into<String>, chips: usize) -> SeatId {
        let mut table = self.table.lock();
        let table = &mut *table;
        let id = allocate_seat_id(&table.seats, &mut table.next_id);
        table.seats.push(Seat::new(id, name, chips, false));
        id
    }

    /// Returns a snapshot of every player.
    pub fn seats(&self) -> Vec<Seat> {
        self.table.lock().seats.clone()
    }

    /// Returns the chip balance of a player.
    pub fn chips(&self, player: SeatId) -> Option<usize> {
        let table = self.table.lock();
        table.seats.iter().find(|s| s.id == player).map(|s| s.chips)
    }

    /// Returns the current phase.
    pub fn phase(&self) -> RoulettePhase {
        self.table.lock().phase
    }

    /// Returns the bets on the layout, in placement order.
    pub fn bets(&self) -> Vec<RouletteBet> {
        self.table.lock().bets.clone()
    }

    /// Sum of stakes on the layout.
    pub fn total_bet(&self) -> usize {
        self.table.lock().bets.iter().map(|b| b.amount).sum()
    }

    /// Returns whether the player may place a minimum bet now.
    pub fn can_bet(&self, player: SeatId) -> bool {
        let table = self.table.lock();
        matches!(table.phase, RoulettePhase::Idle | RoulettePhase::Betting)
            && table
                .seats
                .iter()
                .any(|s| s.id == player && s.chips >= self.options.min_bet.max(1))
    }

    /// Returns the last resolved spin until the game is reset.
    pub fn last_result(&self) -> Option<RouletteResult> {
        self.table.lock().last_result.clone()
    }

    /// Returns recent winning pockets, oldest first.
    pub fn history(&self) -> Vec<SpinRecord> {
        self.table.lock().history.iter().copied().collect()
    }

    /// Returns the text of the last rejected action.
    pub fn message(&self) -> Option<String> {
        self.table.lock().message.clone()
    }

    /// Puts a bet on the layout and takes the stake from the player.
    ///
    /// `numbers` is the coverage, usually built with the helpers in
    /// [`layout`]. The first bet moves the table from `Idle` to `Betting`.
    ///
    /// # Errors
    ///
    /// Returns an error if bets are closed, the player does not exist, the
    /// amount is zero, under the minimum or more than the player holds, or
    /// the coverage is empty or names a pocket the wheel lacks.
    pub fn place_bet(
        &self,
        kind: BetKind,
        amount: usize,
        numbers: Vec<Pocket>,
        player: SeatId,
    ) -> Result<(), RouletteError> {
        let mut guard = self.table.lock();
        let table = &mut *guard;

        if !matches!(table.phase, RoulettePhase::Idle | RoulettePhase::Betting) {
            return Err(table.reject(RouletteError::InvalidState));
        }
        if amount == 0 {
            return Err(table.reject(RouletteError::ZeroBet));
        }
        if amount < self.options.min_bet {
            return Err(table.reject(RouletteError::BelowMinimum));
        }
        if numbers.is_empty() {
            return Err(table.reject(RouletteError::EmptyCoverage));
        }
        let wheel = self.options.wheel;
        if numbers.iter().any(|&pocket| !wheel.has(pocket)) {
            return Err(table.reject(RouletteError::InvalidPocket));
        }
        let Some(seat) = table.seats.iter_mut().find(|s| s.id == player) else {
            return Err(table.reject(RouletteError::PlayerNotFound));
        };
        if seat.chips < amount {
            return Err(table.reject(RouletteError::InsufficientFunds));
        }
        seat.chips -= amount;

        let mut numbers = numbers;
        numbers.sort_unstable();
        numbers.dedup();

        tracing::debug!(player = player.0, ?kind, amount, covered = numbers.len(), "roulette bet placed");
        table.bets.push(RouletteBet {
            kind,
            amount,
            numbers,
            player,
        });
        table.phase = RoulettePhase::Betting;
        table.message = None;
        Ok(())
    }

    /// Takes every bet off the layout, refunds the stakes and returns to
    /// `Idle`. Returns the refunded total.
    ///
    /// # Errors
    ///
    /// Returns an error once the wheel is spinning or a result is showing.
    pub fn clear_bets(&self) -> Result<usize, RouletteError> {
        let mut table = self.table.lock();
        if !matches!(table.phase, RoulettePhase::Idle | RoulettePhase::Betting) {
            return Err(table.reject(RouletteError::InvalidState));
        }
        let refunded = table.refund_bets();
        table.phase = RoulettePhase::Idle;
        table.message = None;
        Ok(refunded)
    }

    /// Closes betting.
    ///
    /// # Errors
    ///
    /// Returns an error unless the table is in `Betting` with a bet down.
    pub fn spin_wheel(&self) -> Result<(), RouletteError> {
        let mut table = self.table.lock();
        if table.phase != RoulettePhase::Betting {
            return Err(table.reject(RouletteError::InvalidState));
        }
        if table.bets.is_empty() {
            return Err(table.reject(RouletteError::NoBets));
        }
        table.phase = RoulettePhase::Spinning;
        table.message = None;
        tracing::debug!(bets = table.bets.len(), "roulette betting closed");
        Ok(())
    }

    /// Resolves the spin with the current wall-clock time.
    ///
    /// # Errors
    ///
    /// See [`Roulette::resolve_round_at`].
    #[cfg(feature = "std")]
    pub fn resolve_round(&self, winning: Pocket) -> Result<RouletteResult, RouletteError> {
        let timestamp_ms = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX));
        self.resolve_round_at(winning, timestamp_ms)
    }

    /// Pays every bet covering `winning` its multiple plus the stake and
    /// records the spin in the history.
    ///
    /// Losing stakes were taken at placement and are not returned.
    ///
    /// # Errors
    ///
    /// Returns an error unless the wheel is spinning, or if `winning` is
    /// not on this wheel.
    pub fn resolve_round_at(
        &self,
        winning: Pocket,
        timestamp_ms: u64,
    ) -> Result<RouletteResult, RouletteError> {
        let mut guard = self.table.lock();
        let table = &mut *guard;
        if table.phase != RoulettePhase::Spinning {
            return Err(table.reject(RouletteError::InvalidState));
        }
        if !self.options.wheel.has(winning) {
            return Err(table.reject(RouletteError::InvalidPocket));
        }

        let mut staked: Vec<(SeatId, usize)> = Vec::new();
        let mut resolved = Vec::with_capacity(table.bets.len());
        let mut total_win = 0usize;

        for bet in &table.bets {
            let payout = bet.payout(winning);
            if let Some(seat) = table.seats.iter_mut().find(|s| s.id == bet.player) {
                seat.chips = seat.chips.saturating_add(payout);
            }
            match staked.iter_mut().find(|(id, _)| *id == bet.player) {
                Some((_, total)) => *total += bet.amount,
                None => staked.push((bet.player, bet.amount)),
            }
            total_win = total_win.saturating_add(payout);
            resolved.push(ResolvedBet {
                bet: bet.clone(),
                won: payout > 0,
                payout,
            });
        }

        let updates = table
            .seats
            .iter()
            .map(|seat| {
                let result = staked.iter().find(|(id, _)| *id == seat.id).map(|&(id, stake)| {
                    let returned: usize = resolved
                        .iter()
                        .filter(|r| r.bet.player == id)
                        .map(|r| r.payout)
                        .sum();
                    RoundOutcome::from_delta(chip_delta(stake, returned))
                });
                SettlementUpdate {
                    name: seat.name.clone(),
                    chips: seat.chips,
                    result,
                }
            })
            .collect();

        table.history.push_back(SpinRecord {
            pocket: winning,
            timestamp_ms,
        });
        while table.history.len() > self.options.history_limit {
            table.history.pop_front();
        }

        let result = RouletteResult {
            winning,
            bets: resolved,
            total_win,
            updates,
        };

        tracing::info!(
            winning = %winning,
            bets = result.bets.len(),
            total_win,
            "roulette round resolved"
        );

        table.phase = RoulettePhase::Result;
        table.last_result = Some(result.clone());
        table.message = None;
        Ok(result)
    }

    /// Clears the layout and the last result and returns to `Idle`.
    ///
    /// Stakes still on the layout before the spin are refunded. Calling
    /// it on an idle, empty table does nothing, and a spinning wheel only
    /// leaves through [`Roulette::resolve_round`].
    pub fn reset_game(&self) {
        let mut table = self.table.lock();
        if table.phase == RoulettePhase::Spinning {
            tracing::debug!("reset ignored while the wheel is spinning");
            return;
        }
        if table.phase == RoulettePhase::Result {
            table.bets.clear();
        } else {
            table.refund_bets();
        }
        table.last_result = None;
        table.message = None;
        table.phase = RoulettePhase::Idle;
    }
}
