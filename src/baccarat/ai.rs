//! Betting policy for table-played baccarat seats.

use alloc::vec::Vec;

use rand::Rng;

use crate::math::floor_to_usize;

use super::rules::{BaccaratBet, BetType};

const STAKE_SHARE_MIN: f64 = 0.05;
const STAKE_SHARE_MAX: f64 = 0.15;
/// Out of 100: banker below 55, player below 95, tie otherwise.
const BANKER_WEIGHT: u8 = 55;
const PLAYER_WEIGHT: u8 = 40;
const SIDE_BET_CHANCE: f64 = 0.10;

/// Plans the bets of a table-played seat holding `chips`.
///
/// The main stake is 5-15% of the chips, rounded down to a multiple of
/// `min_bet` and never under it. One time in ten a pair side bet of
/// exactly `min_bet` is added when the seat can cover it. A seat that
/// cannot cover `min_bet` bets nothing.
pub fn plan_bets<R: Rng + ?Sized>(rng: &mut R, chips: usize, min_bet: usize) -> Vec<BaccaratBet> {
    let mut bets = Vec::new();
    if min_bet == 0 || chips < min_bet {
        return bets;
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "f64 has sufficient precision for chip counts"
    )]
    let raw = floor_to_usize(chips as f64 * rng.random_range(STAKE_SHARE_MIN..=STAKE_SHARE_MAX));
    let stake = ((raw / min_bet) * min_bet).max(min_bet);

    let roll: u8 = rng.random_range(0..100);
    let bet_type = if roll < BANKER_WEIGHT {
        BetType::Banker
    } else if roll < BANKER_WEIGHT + PLAYER_WEIGHT {
        BetType::Player
    } else {
        BetType::Tie
    };
    bets.push(BaccaratBet {
        bet_type,
        amount: stake,
    });

    if rng.random_bool(SIDE_BET_CHANCE) && chips - stake >= min_bet {
        let side = if rng.random_bool(0.5) {
            BetType::PlayerPair
        } else {
            BetType::BankerPair
        };
        bets.push(BaccaratBet {
            bet_type: side,
            amount: min_bet,
        });
    }

    bets
}
