//! Shoe construction, shuffling and cut-card tracking.
//!
//! A shoe is a stack: the last card of the sequence is drawn first. The cut
//! card sits `shoe_size - cut_card_position` cards from the bottom; once a
//! draw leaves that many cards or fewer, the shoe flags that a reshuffle is
//! due before the next round.

use alloc::vec::Vec;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::card::{Card, DECK_SIZE, standard_deck};
use crate::math::floor_to_usize;

/// Cards left behind the cut card when no ratio range is given.
pub const FIXED_CUT_DISTANCE: usize = 14;

/// Minimum number of cards left behind a ratio-placed cut card.
pub const MIN_CUT_RESERVE: usize = 15;

/// Range for the share of the shoe placed behind the cut card.
///
/// The actual share is drawn uniformly from `min..max` every time a shoe is
/// built, so the cut lands somewhere different each shoe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutRatio {
    /// Lower bound of the share, in `0.0..=1.0`.
    pub min: f64,
    /// Upper bound of the share, in `0.0..=1.0`.
    pub max: f64,
}

impl CutRatio {
    /// Creates a new ratio range. The bounds are swapped if given backwards.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.min < self.max {
            rng.random_range(self.min..self.max)
        } else {
            self.min
        }
    }
}

/// A freshly built, shuffled shoe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltShoe {
    /// Shuffled cards, drawn from the end.
    pub deck: Vec<Card>,
    /// Number of cards at construction.
    pub shoe_size: usize,
    /// Number of draws after which the cut card is reached.
    pub cut_card_position: usize,
}

/// Returns a uniformly shuffled copy of `seq` (Fisher-Yates).
pub fn shuffle<T: Clone, R: Rng + ?Sized>(seq: &[T], rng: &mut R) -> Vec<T> {
    let mut out = seq.to_vec();
    out.shuffle(rng);
    out
}

/// Builds a shoe from `deck_count` standard decks and places the cut card.
///
/// With a `cut_ratio`, the cut card leaves `max(15, floor(size * share))`
/// cards behind it. Without one it leaves [`FIXED_CUT_DISTANCE`] cards.
/// A `deck_count` of zero yields an empty shoe.
pub fn build_shoe<R: Rng + ?Sized>(
    deck_count: u8,
    cut_ratio: Option<CutRatio>,
    rng: &mut R,
) -> BuiltShoe {
    let mut ordered = Vec::with_capacity(deck_count as usize * DECK_SIZE);
    for _ in 0..deck_count {
        ordered.extend(standard_deck());
    }

    let deck = shuffle(&ordered, rng);
    let shoe_size = deck.len();

    let reserve = cut_ratio.map_or(FIXED_CUT_DISTANCE, |ratio| {
        #[expect(
            clippy::cast_precision_loss,
            reason = "f64 has sufficient precision for card counts"
        )]
        let behind = floor_to_usize(shoe_size as f64 * ratio.sample(rng));
        behind.max(MIN_CUT_RESERVE)
    });

    BuiltShoe {
        deck,
        shoe_size,
        cut_card_position: clamp_cut(shoe_size, shoe_size.saturating_sub(reserve)),
    }
}

// Keeps 0 < cut < size whenever the shoe has room for it.
const fn clamp_cut(shoe_size: usize, cut: usize) -> usize {
    if shoe_size < 2 {
        cut
    } else if cut == 0 {
        1
    } else if cut >= shoe_size {
        shoe_size - 1
    } else {
        cut
    }
}

/// A shoe being dealt from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shoe {
    cards: Vec<Card>,
    shoe_size: usize,
    cut_card_position: usize,
    shuffle_pending: bool,
}

impl Shoe {
    /// Wraps a built shoe for dealing.
    #[must_use]
    pub fn new(built: BuiltShoe) -> Self {
        Self {
            cards: built.deck,
            shoe_size: built.shoe_size,
            cut_card_position: built.cut_card_position,
            shuffle_pending: false,
        }
    }

    /// Builds and shuffles a new shoe.
    pub fn build<R: Rng + ?Sized>(deck_count: u8, cut_ratio: Option<CutRatio>, rng: &mut R) -> Self {
        Self::new(build_shoe(deck_count, cut_ratio, rng))
    }

    /// Creates a prepared shoe that yields `draws` in the given order.
    ///
    /// The cut card sits at the very end, so the reshuffle flag is only
    /// raised once every card is gone. Use [`Shoe::with_cut_card_position`]
    /// to move it.
    #[must_use]
    pub fn from_draws(draws: &[Card]) -> Self {
        let mut cards: Vec<Card> = draws.to_vec();
        cards.reverse();
        let shoe_size = cards.len();
        Self {
            cards,
            shoe_size,
            cut_card_position: shoe_size,
            shuffle_pending: false,
        }
    }

    /// Moves the cut card to `position` draws into the shoe.
    #[must_use]
    pub const fn with_cut_card_position(mut self, position: usize) -> Self {
        self.cut_card_position = position;
        self
    }

    /// Draws the top card, face up.
    ///
    /// Raises the shuffle-pending flag when the draw reaches the cut card.
    pub fn draw(&mut self) -> Option<Card> {
        let card = self.cards.pop()?;
        if self.drawn() >= self.cut_card_position && !self.shuffle_pending {
            self.shuffle_pending = true;
            tracing::debug!(
                remaining = self.cards.len(),
                cut_card_position = self.cut_card_position,
                "cut card reached"
            );
        }
        Some(card.revealed())
    }

    /// Returns the number of cards left.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Returns the number of cards drawn since construction.
    #[must_use]
    pub fn drawn(&self) -> usize {
        self.shoe_size.saturating_sub(self.cards.len())
    }

    /// Returns the number of cards at construction.
    #[must_use]
    pub const fn shoe_size(&self) -> usize {
        self.shoe_size
    }

    /// Returns the draw count at which the cut card is reached.
    #[must_use]
    pub const fn cut_card_position(&self) -> usize {
        self.cut_card_position
    }

    /// Returns whether the cut card has been reached.
    #[must_use]
    pub const fn is_shuffle_pending(&self) -> bool {
        self.shuffle_pending
    }

    /// Returns the undrawn cards; the last element is drawn next.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
