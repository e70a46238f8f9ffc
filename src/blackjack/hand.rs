//! Player and dealer hand representations.

use alloc::vec::Vec;

use crate::card::{Card, Rank};

/// Blackjack value of a single rank, aces high.
#[must_use]
pub const fn card_value(rank: Rank) -> u8 {
    match rank {
        Rank::Ace => 11,
        Rank::Jack | Rank::Queen | Rank::King => 10,
        other => other.ordinal(),
    }
}

/// Total of a set of cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandValue {
    /// Best total not exceeding 21 where possible.
    pub total: u8,
    /// Whether an ace is still counted as 11.
    pub soft: bool,
}

/// Sums the cards, counting aces as 11 and dropping them to 1 one at a
/// time while the total is over 21.
#[must_use]
pub fn evaluate(cards: &[Card]) -> HandValue {
    let mut total: u8 = 0;
    let mut high_aces: u8 = 0;

    for card in cards {
        if card.rank == Rank::Ace {
            high_aces += 1;
        }
        total = total.saturating_add(card_value(card.rank));
    }

    while total > 21 && high_aces > 0 {
        total -= 10;
        high_aces -= 1;
    }

    HandValue {
        total,
        soft: high_aces > 0,
    }
}

/// Hand status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandStatus {
    /// Created, cards not dealt yet.
    Waiting,
    /// Hand is in play and can take actions.
    Playing,
    /// Player has stood, or reached 21.
    Stand,
    /// Hand has busted (over 21).
    Bust,
    /// Natural 21 on the first two cards.
    Blackjack,
}

/// Result of a single hand after settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandOutcome {
    /// Hand beat the dealer.
    Win,
    /// Hand lost its bet.
    Lose,
    /// Bet returned.
    Push,
    /// Natural blackjack paid 3:2. The total returned is `bet * 5 / 2`
    /// rounded down, so an odd bet of 101 gets back 252.
    Blackjack,
}

/// Which half of a split pair a hand is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitSide {
    /// Hand holding the first card of the pair (`-a`).
    A,
    /// Hand holding the second card of the pair (`-b`).
    B,
}

impl SplitSide {
    /// Label suffix used for display.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::A => "-a",
            Self::B => "-b",
        }
    }
}

/// A player's hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
    status: HandStatus,
    result: Option<HandOutcome>,
    bet: usize,
    split: Option<SplitSide>,
}

impl Hand {
    /// Creates a new empty hand with the given bet.
    #[must_use]
    pub const fn new(bet: usize) -> Self {
        Self {
            cards: Vec::new(),
            status: HandStatus::Waiting,
            result: None,
            bet,
            split: None,
        }
    }

    /// Creates one half of a split pair.
    #[must_use]
    pub fn from_split(first: Card, second: Card, bet: usize, side: SplitSide) -> Self {
        let mut hand = Self {
            cards: alloc::vec![first],
            status: HandStatus::Playing,
            result: None,
            bet,
            split: Some(side),
        };
        hand.add_card(second);
        hand
    }

    /// Adds a card to the hand. Going over 21 busts and loses the hand.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
        if self.value() > 21 {
            self.status = HandStatus::Bust;
            self.result = Some(HandOutcome::Lose);
        }
    }

    /// Moves a freshly dealt two-card hand into play.
    pub(crate) fn open(&mut self) {
        self.status = if self.is_blackjack() {
            HandStatus::Blackjack
        } else {
            HandStatus::Playing
        };
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the current status of the hand.
    #[must_use]
    pub const fn status(&self) -> HandStatus {
        self.status
    }

    /// Sets the hand status.
    pub const fn set_status(&mut self, status: HandStatus) {
        self.status = status;
    }

    /// Returns the settled result, if any.
    #[must_use]
    pub const fn result(&self) -> Option<HandOutcome> {
        self.result
    }

    pub(crate) const fn set_result(&mut self, result: HandOutcome) {
        self.result = Some(result);
    }

    /// Returns the bet amount for this hand.
    #[must_use]
    pub const fn bet(&self) -> usize {
        self.bet
    }

    /// Returns whether this hand came from a split.
    #[must_use]
    pub const fn is_split_hand(&self) -> bool {
        self.split.is_some()
    }

    /// Returns which half of a split this hand is.
    #[must_use]
    pub const fn split_side(&self) -> Option<SplitSide> {
        self.split
    }

    /// Evaluates the hand.
    #[must_use]
    pub fn evaluate(&self) -> HandValue {
        evaluate(&self.cards)
    }

    /// Calculates the value of the hand.
    #[must_use]
    pub fn value(&self) -> u8 {
        self.evaluate().total
    }

    /// Returns whether the hand is soft (contains an ace counted as 11).
    #[must_use]
    pub fn is_soft(&self) -> bool {
        self.evaluate().soft
    }

    /// Returns whether the hand is a natural: two cards totalling 21, not
    /// from a split.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        !self.is_split_hand() && self.cards.len() == 2 && self.value() == 21
    }

    /// Returns whether the cards form a pair that may be split.
    ///
    /// Ranks must match exactly; a king and a queen are not a pair. Funds
    /// are checked by the table.
    #[must_use]
    pub fn is_splittable_pair(&self) -> bool {
        !self.is_split_hand() && self.cards.len() == 2 && self.cards[0].rank == self.cards[1].rank
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Breaks a pair into its two cards.
    pub(crate) fn take_pair(&mut self) -> Option<(Card, Card)> {
        if self.cards.len() == 2 {
            let second = self.cards.pop()?;
            let first = self.cards.pop()?;
            Some((first, second))
        } else {
            None
        }
    }
}

/// The dealer's hand. The first card is dealt face down.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DealerHand {
    cards: Vec<Card>,
}

impl DealerHand {
    /// Creates a new empty dealer hand.
    #[must_use]
    pub const fn new() -> Self {
        Self { cards: Vec::new() }
    }

    /// Adds a card to the hand as dealt.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Returns all cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the first face-up card.
    #[must_use]
    pub fn up_card(&self) -> Option<&Card> {
        self.cards.iter().find(|card| card.face_up)
    }

    /// Returns whether every card is showing.
    #[must_use]
    pub fn is_hole_revealed(&self) -> bool {
        self.cards.iter().all(|card| card.face_up)
    }

    /// Turns the hole card over.
    pub fn reveal_hole(&mut self) {
        for card in &mut self.cards {
            card.face_up = true;
        }
    }

    /// Value of the face-up cards only.
    #[must_use]
    pub fn visible_value(&self) -> u8 {
        let showing: Vec<Card> = self.cards.iter().filter(|c| c.face_up).copied().collect();
        evaluate(&showing).total
    }

    /// Evaluates the full hand, hole card included.
    #[must_use]
    pub fn evaluate(&self) -> HandValue {
        evaluate(&self.cards)
    }

    /// Calculates the full value of the hand.
    #[must_use]
    pub fn value(&self) -> u8 {
        self.evaluate().total
    }

    /// Returns whether the hand is a blackjack.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.value() == 21
    }

    /// Returns whether the hand is bust.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.value() > 21
    }

    /// Returns whether the hand is soft.
    #[must_use]
    pub fn is_soft(&self) -> bool {
        self.evaluate().soft
    }

    /// Returns the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Clears the hand for a new round.
    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

