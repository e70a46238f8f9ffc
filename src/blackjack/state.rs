//! Blackjack phase and turn types.

/// Blackjack table phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlackjackPhase {
    /// Accepting bets for the next round.
    Betting,
    /// Waiting for player actions.
    Playing,
    /// Dealer plays out their hand.
    Dealer,
    /// Round settled, waiting for reset.
    Result,
}

/// Identifies one playable hand in deal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TurnPosition {
    /// Index into the seats dealt in this round.
    pub player_index: usize,
    /// Index into that seat's hands.
    pub hand_index: usize,
}

/// Who received a card during the deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealTarget {
    /// A seat's first hand.
    Seat(crate::seat::SeatId),
    /// The dealer.
    Dealer,
}

/// One card leaving the shoe during the opening deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealEvent {
    /// Recipient.
    pub target: DealTarget,
    /// The card as placed on the table.
    pub card: crate::card::Card,
}
