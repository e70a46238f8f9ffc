//! Table configuration options.

use crate::roulette::Wheel;
use crate::shoe::CutRatio;

/// Configuration options for a blackjack table.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use tablekit::BlackjackOptions;
///
/// let options = BlackjackOptions::default()
///     .with_decks(8)
///     .with_min_bet(50);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BlackjackOptions {
    /// Number of decks in the shoe.
    pub decks: u8,
    /// Table minimum. Seats below it sit out.
    pub min_bet: usize,
    /// Share of the shoe left behind the cut card.
    pub cut_ratio: CutRatio,
    /// Largest NPC bet, in multiples of the minimum.
    pub npc_max_bet_multiple: usize,
}

impl Default for BlackjackOptions {
    fn default() -> Self {
        Self {
            decks: 6,
            min_bet: 100,
            cut_ratio: CutRatio::new(0.15, 0.25),
            npc_max_bet_multiple: 6,
        }
    }
}

impl BlackjackOptions {
    /// Sets the number of decks.
    ///
    /// # Example
    ///
    /// ```
    /// use tablekit::BlackjackOptions;
    ///
    /// let options = BlackjackOptions::default().with_decks(2);
    /// assert_eq!(options.decks, 2);
    /// ```
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets the table minimum.
    ///
    /// # Example
    ///
    /// ```
    /// use tablekit::BlackjackOptions;
    ///
    /// let options = BlackjackOptions::default().with_min_bet(25);
    /// assert_eq!(options.min_bet, 25);
    /// ```
    #[must_use]
    pub const fn with_min_bet(mut self, min_bet: usize) -> Self {
        self.min_bet = min_bet;
        self
    }

    /// Sets the range for the share of the shoe behind the cut card.
    #[must_use]
    pub const fn with_cut_ratio(mut self, min: f64, max: f64) -> Self {
        self.cut_ratio = CutRatio::new(min, max);
        self
    }

    /// Sets the largest NPC bet in multiples of the minimum.
    #[must_use]
    pub const fn with_npc_max_bet_multiple(mut self, multiple: usize) -> Self {
        self.npc_max_bet_multiple = multiple;
        self
    }
}

/// Configuration options for a baccarat table.
///
/// ```
/// use tablekit::BaccaratOptions;
///
/// let options = BaccaratOptions::default().with_decks(6);
/// assert_eq!(options.decks, 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaccaratOptions {
    /// Number of decks in the shoe.
    pub decks: u8,
    /// Table minimum, also the AI stake granularity.
    pub min_bet: usize,
    /// Rows in the bead plate and big road grids.
    pub roadmap_rows: usize,
}

impl Default for BaccaratOptions {
    fn default() -> Self {
        Self {
            decks: 8,
            min_bet: 100,
            roadmap_rows: 6,
        }
    }
}

impl BaccaratOptions {
    /// Sets the number of decks.
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets the table minimum.
    #[must_use]
    pub const fn with_min_bet(mut self, min_bet: usize) -> Self {
        self.min_bet = min_bet;
        self
    }

    /// Sets the roadmap row count.
    #[must_use]
    pub const fn with_roadmap_rows(mut self, rows: usize) -> Self {
        self.roadmap_rows = rows;
        self
    }
}

/// Configuration options for a roulette table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouletteOptions {
    /// Wheel layout.
    pub wheel: Wheel,
    /// Table minimum per bet.
    pub min_bet: usize,
    /// Number of spins kept in the history.
    pub history_limit: usize,
}

impl Default for RouletteOptions {
    fn default() -> Self {
        Self {
            wheel: Wheel::American,
            min_bet: 1,
            history_limit: 100,
        }
    }
}

impl RouletteOptions {
    /// Sets the wheel layout.
    ///
    /// # Example
    ///
    /// ```
    /// use tablekit::{RouletteOptions, Wheel};
    ///
    /// let options = RouletteOptions::default().with_wheel(Wheel::European);
    /// assert_eq!(options.wheel, Wheel::European);
    /// ```
    #[must_use]
    pub const fn with_wheel(mut self, wheel: Wheel) -> Self {
        self.wheel = wheel;
        self
    }

    /// Sets the table minimum.
    #[must_use]
    pub const fn with_min_bet(mut self, min_bet: usize) -> Self {
        self.min_bet = min_bet;
        self
    }

    /// Sets the history length.
    #[must_use]
    pub const fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }
}
