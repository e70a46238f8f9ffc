//! Error types for table actions.
//!
//! A rejected action leaves the table untouched. Engines also keep the
//! error's text as the table message for display.

use thiserror::Error;

/// Errors that can occur while placing or clearing bets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BetError {
    /// Seat not found.
    #[error("seat not found")]
    SeatNotFound,
    /// Insufficient balance.
    #[error("insufficient balance")]
    InsufficientFunds,
    /// Invalid phase for betting.
    #[error("bets are closed")]
    InvalidState,
    /// Bet amount is zero.
    #[error("bet amount is zero")]
    ZeroBet,
    /// Bet amount is under the table minimum.
    #[error("bet is below the table minimum")]
    BelowMinimum,
    /// The table plays this seat itself.
    #[error("seat is played by the table")]
    AiSeat,
}

/// Errors that can occur when starting a deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DealError {
    /// Invalid phase for dealing.
    #[error("a round is already in progress")]
    InvalidState,
    /// No seat has a bet.
    #[error("no bets have been placed")]
    NoBets,
    /// Not enough cards in the shoe for every seat.
    #[error("not enough cards in the shoe")]
    NotEnoughCards,
    /// The cut card was reached and the shoe must be rebuilt first.
    #[error("roll for the cut card before dealing")]
    ShufflePending,
}

/// Errors that can occur during player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Invalid phase for this action.
    #[error("invalid phase for this action")]
    InvalidState,
    /// Not this seat's turn.
    #[error("not this seat's turn")]
    NotYourTurn,
    /// Seat not found.
    #[error("seat not found")]
    SeatNotFound,
    /// Hand not found.
    #[error("hand not found")]
    HandNotFound,
    /// Hand is not being played.
    #[error("hand is not active")]
    HandNotActive,
    /// Hand is not a splittable pair.
    #[error("cannot split this hand")]
    CannotSplit,
    /// Insufficient balance for this action.
    #[error("insufficient balance")]
    InsufficientFunds,
    /// No cards left in the shoe.
    #[error("no cards left in the shoe")]
    NoCards,
    /// The seat is not played by the table.
    #[error("seat is not played by the table")]
    NotAiSeat,
}

/// Errors that can occur during dealer play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShowdownError {
    /// Invalid phase for dealer play.
    #[error("invalid phase for dealer play")]
    InvalidState,
    /// No cards left in the shoe.
    #[error("no cards left in the shoe")]
    NoCards,
}

/// Errors that can occur during the cut-card ceremony.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReshuffleError {
    /// A round is in progress.
    #[error("cannot reshuffle during a round")]
    InvalidState,
    /// Nobody is seated to roll for the cut.
    #[error("no seats to roll for the cut card")]
    NoSeats,
}

/// Errors that can occur at the roulette table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RouletteError {
    /// Invalid phase for this action.
    #[error("invalid phase for this action")]
    InvalidState,
    /// Spin requested without bets.
    #[error("no bets have been placed")]
    NoBets,
    /// Player not found.
    #[error("player not found")]
    PlayerNotFound,
    /// Insufficient balance.
    #[error("insufficient balance")]
    InsufficientFunds,
    /// Bet amount is zero.
    #[error("bet amount is zero")]
    ZeroBet,
    /// Bet amount is under the table minimum.
    #[error("bet is below the table minimum")]
    BelowMinimum,
    /// Bet covers no pockets.
    #[error("bet covers no numbers")]
    EmptyCoverage,
    /// Pocket does not exist on this wheel.
    #[error("number is not on this wheel")]
    InvalidPocket,
}
