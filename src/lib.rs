//! Table-game rules engines for blackjack, baccarat and roulette, with
//! optional `no_std` support.
//!
//! Each engine owns its seats and, for the card games, its [`Shoe`]. All
//! randomness flows from a seeded `ChaCha8Rng`, so a seed replays a whole
//! session. Rejected actions return an error, leave the table unchanged and
//! set the table message.
//!
//! # Example
//!
//! ```
//! use tablekit::{Blackjack, BlackjackOptions};
//!
//! let table = Blackjack::new(BlackjackOptions::default(), 42);
//! let seat = table.join("alice", 1_000, false);
//! table.place_bet(seat, 100).unwrap();
//! table.deal().unwrap();
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod baccarat;
pub mod blackjack;
pub mod card;
pub mod error;
mod math;
pub mod options;
pub mod roulette;
pub mod seat;
pub mod shoe;
mod sync;

pub use baccarat::{Baccarat, BaccaratPhase, BetType, CoupResult, Winner};
pub use blackjack::{Blackjack, BlackjackPhase, HandOutcome, HandStatus, RoundResult};
pub use card::{Card, DECK_SIZE, Rank, Suit};
pub use error::{
    ActionError, BetError, DealError, ReshuffleError, RouletteError, ShowdownError,
};
pub use options::{BaccaratOptions, BlackjackOptions, RouletteOptions};
pub use roulette::{BetKind, Pocket, Roulette, RoulettePhase, Wheel};
pub use seat::{RoundOutcome, Seat, SeatId, SettlementUpdate};
pub use shoe::{BuiltShoe, CutRatio, Shoe, build_shoe, shuffle};
