//! Baccarat point values, tableau and payouts.

use crate::card::{Card, Rank};

/// Baccarat value of a rank: ace 1, tens and court cards 0.
#[must_use]
pub const fn card_point(rank: Rank) -> u8 {
    if rank.is_ten_valued() {
        0
    } else {
        rank.ordinal()
    }
}

/// Hand point: sum of card values mod 10.
#[must_use]
pub fn hand_point(cards: &[Card]) -> u8 {
    cards.iter().map(|c| card_point(c.rank)).sum::<u8>() % 10
}

/// Whether the first two cards make 8 or 9.
#[must_use]
pub fn is_natural(cards: &[Card]) -> bool {
    cards.len() >= 2 && hand_point(&cards[..2]) >= 8
}

/// Whether the first two cards share a rank.
#[must_use]
pub fn is_pair(cards: &[Card]) -> bool {
    cards.len() >= 2 && cards[0].rank == cards[1].rank
}

/// Player draws a third card on 0-5.
#[must_use]
pub const fn player_draws(player_point: u8) -> bool {
    player_point <= 5
}

/// Whether the banker draws, given the banker's two-card point and the
/// value of the player's third card (`None` if the player stood).
#[must_use]
pub const fn banker_draws(banker_point: u8, player_third: Option<u8>) -> bool {
    let Some(third) = player_third else {
        return banker_point <= 5;
    };
    match banker_point {
        0..=2 => true,
        3 => third != 8,
        4 => !matches!(third, 0 | 1 | 8 | 9),
        5 => !matches!(third, 0..=3 | 8 | 9),
        6 => matches!(third, 6 | 7),
        _ => false,
    }
}

/// Which side won the coup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Winner {
    /// Banker's point was higher.
    Banker,
    /// Player's point was higher.
    Player,
    /// Equal points.
    Tie,
}

impl Winner {
    /// Compares final points.
    #[must_use]
    pub const fn from_points(player_point: u8, banker_point: u8) -> Self {
        if banker_point > player_point {
            Self::Banker
        } else if player_point > banker_point {
            Self::Player
        } else {
            Self::Tie
        }
    }
}

/// Bet spots on a baccarat layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BetType {
    /// Banker wins, pays 0.95 to 1.
    Banker,
    /// Player wins, pays 1 to 1.
    Player,
    /// Tie, pays 8 to 1.
    Tie,
    /// Banker's first two cards pair, pays 11 to 1.
    BankerPair,
    /// Player's first two cards pair, pays 11 to 1.
    PlayerPair,
}

impl BetType {
    /// Every bet type, in settlement order.
    pub const ALL: [Self; 5] = [
        Self::Banker,
        Self::Player,
        Self::Tie,
        Self::BankerPair,
        Self::PlayerPair,
    ];
}

/// A stake on one bet spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BaccaratBet {
    /// Spot.
    pub bet_type: BetType,
    /// Stake.
    pub amount: usize,
}

/// What a coup produced, as far as bets are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoupOutcome {
    /// Winning side.
    pub winner: Winner,
    /// Player's first two cards paired.
    pub player_pair: bool,
    /// Banker's first two cards paired.
    pub banker_pair: bool,
}

fn signed(amount: usize) -> isize {
    isize::try_from(amount).unwrap_or(isize::MAX)
}

/// Net result of a bet: positive winnings, zero for a push, or minus the
/// stake for a loss. The stake itself is returned separately.
#[must_use]
pub fn bet_payout(bet: BaccaratBet, outcome: CoupOutcome) -> isize {
    let stake = signed(bet.amount);
    match bet.bet_type {
        BetType::Banker => match outcome.winner {
            Winner::Banker => signed(bet.amount.saturating_mul(95) / 100),
            Winner::Tie => 0,
            Winner::Player => -stake,
        },
        BetType::Player => match outcome.winner {
            Winner::Player => stake,
            Winner::Tie => 0,
            Winner::Banker => -stake,
        },
        BetType::Tie => {
            if outcome.winner == Winner::Tie {
                stake.saturating_mul(8)
            } else {
                -stake
            }
        }
        BetType::BankerPair => pair_payout(stake, outcome.banker_pair),
        BetType::PlayerPair => pair_payout(stake, outcome.player_pair),
    }
}

const fn pair_payout(stake: isize, paired: bool) -> isize {
    if paired { stake.saturating_mul(11) } else { -stake }
}
