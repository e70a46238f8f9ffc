//! Cut-card ceremony: every seat rolls a die, the highest unique roll cuts
//! the rebuilt shoe.

use alloc::vec::Vec;

use rand::Rng;

use crate::error::ReshuffleError;
use crate::seat::SeatId;
use crate::shoe::Shoe;

use super::{Blackjack, BlackjackPhase};

/// One seat's die roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CutRoll {
    /// Seat that rolled.
    pub seat: SeatId,
    /// Face shown, `1..=6`.
    pub roll: u8,
}

/// Outcome of a cut-card ceremony.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CutCeremony {
    /// Every round of rolls; all but the last ended in a tie at the top.
    pub rounds: Vec<Vec<CutRoll>>,
    /// Seat that owns the cut.
    pub cutter: SeatId,
    /// Draws until the new shoe's cut card.
    pub cut_card_position: usize,
}

fn roll_for_cut<R: Rng + ?Sized>(seats: &[SeatId], rng: &mut R) -> (Vec<Vec<CutRoll>>, SeatId) {
    let mut rounds = Vec::new();
    loop {
        let rolls: Vec<CutRoll> = seats
            .iter()
            .map(|&seat| CutRoll {
                seat,
                roll: rng.random_range(1..=6),
            })
            .collect();
        let top = rolls.iter().map(|r| r.roll).max().unwrap_or(0);
        let mut leaders = rolls.iter().filter(|r| r.roll == top);
        let first = leaders.next().map(|r| r.seat);
        let tied = leaders.next().is_some();
        rounds.push(rolls);

        if let (Some(cutter), false) = (first, tied) {
            return (rounds, cutter);
        }
    }
}

impl Blackjack {
    /// Runs the cut-card ceremony and rebuilds the shoe.
    ///
    /// Every seat rolls one die; ties at the top reroll everyone. The new
    /// shoe gets a freshly placed cut card and the shuffle-pending flag is
    /// cleared.
    ///
    /// # Errors
    ///
    /// Returns an error if a round is running or nobody is seated.
    pub fn cut_ceremony(&self) -> Result<CutCeremony, ReshuffleError> {
        let mut guard = self.table.lock();
        let table = &mut *guard;
        if table.phase != BlackjackPhase::Betting {
            return Err(table.reject(ReshuffleError::InvalidState));
        }
        if table.seats.is_empty() {
            return Err(table.reject(ReshuffleError::NoSeats));
        }

        let seats: Vec<SeatId> = table.seats.iter().map(|s| s.id).collect();
        let (rounds, cutter) = roll_for_cut(&seats, &mut table.rng);

        table.shoe = Shoe::build(self.options.decks, Some(self.options.cut_ratio), &mut table.rng);
        let ceremony = CutCeremony {
            rounds,
            cutter,
            cut_card_position: table.shoe.cut_card_position(),
        };

        tracing::info!(
            cutter = cutter.0,
            rerolls = ceremony.rounds.len() - 1,
            cut_card_position = ceremony.cut_card_position,
            "shoe rebuilt after cut ceremony"
        );

        table.accept();
        table.last_cut = Some(ceremony.clone());
        Ok(ceremony)
    }

    /// Returns the most recent cut-card ceremony.
    pub fn last_cut(&self) -> Option<CutCeremony> {
        self.table.lock().last_cut.clone()
    }
}
