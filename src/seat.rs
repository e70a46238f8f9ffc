//! Seats and the settlement records handed to the profile store.

use alloc::string::String;

/// Stable handle for a seat at a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeatId(pub u32);

/// A player sitting at a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    /// Seat handle.
    pub id: SeatId,
    /// Display name, also the key the profile store uses.
    pub name: String,
    /// Chip balance.
    pub chips: usize,
    /// Whether the table plays this seat.
    pub is_ai: bool,
}

/// Hands out the next seat handle, skipping any still in use.
pub(crate) fn allocate_seat_id(seats: &[Seat], next: &mut u32) -> SeatId {
    loop {
        let id = SeatId(*next);
        *next = next.wrapping_add(1);
        if seats.iter().all(|s| s.id != id) {
            return id;
        }
    }
}

impl Seat {
    /// Creates a new seat.
    #[must_use]
    pub fn new(id: SeatId, name: impl Into<String>, chips: usize, is_ai: bool) -> Self {
        Self {
            id,
            name: name.into(),
            chips,
            is_ai,
        }
    }
}

/// Overall result of a round for one seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundOutcome {
    /// Chips went up.
    Win,
    /// Chips went down.
    Lose,
    /// Chips unchanged.
    Push,
    /// Chips went up and at least one hand was a natural blackjack.
    Blackjack,
}

impl RoundOutcome {
    /// Classifies a chip delta.
    #[must_use]
    pub const fn from_delta(delta: isize) -> Self {
        if delta > 0 {
            Self::Win
        } else if delta < 0 {
            Self::Lose
        } else {
            Self::Push
        }
    }
}

/// Balance change emitted after settlement.
///
/// The engine never persists anything; the profile store consumes these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementUpdate {
    /// Seat name.
    pub name: String,
    /// Chip balance after settlement.
    pub chips: usize,
    /// Round result, `None` when the seat did not bet.
    pub result: Option<RoundOutcome>,
}

/// Signed difference `after - before`, saturating at the `isize` bounds.
#[must_use]
pub(crate) fn chip_delta(before: usize, after: usize) -> isize {
    if after >= before {
        isize::try_from(after - before).unwrap_or(isize::MAX)
    } else {
        isize::try_from(before - after).map_or(isize::MIN, |diff| -diff)
    }
}
