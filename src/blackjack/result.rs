//! Round result types for settlement.

use alloc::vec::Vec;

use crate::seat::{RoundOutcome, SeatId, SettlementUpdate};

use super::hand::HandOutcome;

/// Result for a single hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandResult {
    /// The hand index (for split hands).
    pub hand_index: usize,
    /// The outcome of the hand.
    pub outcome: HandOutcome,
    /// The bet amount for this hand.
    pub bet: usize,
    /// Chips returned to the seat, stake included.
    pub payout: usize,
    /// The player's hand value.
    pub player_value: u8,
}

/// Result for a single seat that played the round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerResult {
    /// The seat.
    pub seat: SeatId,
    /// Results for each hand (two if split).
    pub hands: Vec<HandResult>,
    /// Total returned across all hands.
    pub total_payout: usize,
    /// Chip change since the round started.
    pub net: isize,
    /// Overall result from the chip change.
    pub outcome: RoundOutcome,
}

/// Result of the entire round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundResult {
    /// Results for each seat that played.
    pub players: Vec<PlayerResult>,
    /// The dealer's final hand value.
    pub dealer_value: u8,
    /// Whether the dealer busted.
    pub dealer_bust: bool,
    /// Whether the dealer had blackjack.
    pub dealer_blackjack: bool,
    /// Balance updates for every seat at the table.
    pub updates: Vec<SettlementUpdate>,
}
