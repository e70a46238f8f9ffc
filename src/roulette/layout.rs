//! Wheel pockets, bet kinds and the numbers each bet covers.

use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::error::RouletteError;

/// Red numbers on the layout.
const RED_NUMBERS: [u8; 18] = [1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36];

/// Highest numbered pocket.
pub const MAX_NUMBER: u8 = 36;

/// Wheel layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wheel {
    /// 38 pockets: 0, 00 and 1-36.
    American,
    /// 37 pockets: 0 and 1-36.
    European,
}

impl Wheel {
    /// Whether the pocket exists on this wheel.
    #[must_use]
    pub const fn has(self, pocket: Pocket) -> bool {
        match pocket {
            Pocket::Zero => true,
            Pocket::DoubleZero => matches!(self, Self::American),
            Pocket::Number(n) => n >= 1 && n <= MAX_NUMBER,
        }
    }

    /// Every pocket on the wheel, zeros first.
    #[must_use]
    pub fn pockets(self) -> Vec<Pocket> {
        let mut pockets = Vec::with_capacity(38);
        pockets.push(Pocket::Zero);
        if self == Self::American {
            pockets.push(Pocket::DoubleZero);
        }
        pockets.extend((1..=MAX_NUMBER).map(Pocket::Number));
        pockets
    }
}

/// Pocket colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// 0 and 00.
    Green,
    /// Red numbers.
    Red,
    /// Black numbers.
    Black,
}

/// A pocket on the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Pocket {
    /// Single zero.
    Zero,
    /// Double zero, American wheel only.
    DoubleZero,
    /// Numbers 1-36.
    Number(u8),
}

impl Pocket {
    /// Numbered pocket, if `n` is on the layout.
    #[must_use]
    pub const fn number(n: u8) -> Option<Self> {
        if n >= 1 && n <= MAX_NUMBER {
            Some(Self::Number(n))
        } else {
            None
        }
    }

    /// Colour of the pocket.
    #[must_use]
    pub fn color(self) -> Color {
        match self {
            Self::Zero | Self::DoubleZero => Color::Green,
            Self::Number(n) if RED_NUMBERS.contains(&n) => Color::Red,
            Self::Number(_) => Color::Black,
        }
    }

    const fn value(self) -> Option<u8> {
        match self {
            Self::Number(n) => Some(n),
            Self::Zero | Self::DoubleZero => None,
        }
    }
}

impl fmt::Display for Pocket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zero => f.write_str("0"),
            Self::DoubleZero => f.write_str("00"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl FromStr for Pocket {
    type Err = RouletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" => Ok(Self::Zero),
            "00" => Ok(Self::DoubleZero),
            _ => s
                .parse::<u8>()
                .ok()
                .and_then(Self::number)
                .ok_or(RouletteError::InvalidPocket),
        }
    }
}

/// Bet kinds on the roulette layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BetKind {
    /// One number, 35 to 1.
    Straight,
    /// Two adjacent numbers, 17 to 1.
    Split,
    /// Three numbers in a row, 11 to 1.
    Street,
    /// Four numbers in a square, 8 to 1.
    Corner,
    /// Two adjacent rows, 5 to 1.
    Line,
    /// Twelve numbers in a column, 2 to 1.
    Column,
    /// 1-12, 13-24 or 25-36, 2 to 1.
    Dozen,
    /// Red numbers, 1 to 1.
    Red,
    /// Black numbers, 1 to 1.
    Black,
    /// Odd numbers, 1 to 1.
    Odd,
    /// Even numbers, 1 to 1.
    Even,
    /// 1-18, 1 to 1.
    Low,
    /// 19-36, 1 to 1.
    High,
    /// Three numbers touching zero, 11 to 1.
    Basket,
    /// 0, 00, 1, 2 and 3, 6 to 1.
    FirstFive,
}

impl BetKind {
    /// Winnings per unit staked, stake excluded.
    #[must_use]
    pub const fn payout_multiple(self) -> usize {
        match self {
            Self::Straight => 35,
            Self::Split => 17,
            Self::Street | Self::Basket => 11,
            Self::Corner => 8,
            Self::FirstFive => 6,
            Self::Line => 5,
            Self::Column | Self::Dozen => 2,
            Self::Red | Self::Black | Self::Odd | Self::Even | Self::Low | Self::High => 1,
        }
    }
}

fn numbers(range: impl IntoIterator<Item = u8>) -> Vec<Pocket> {
    range.into_iter().map(Pocket::Number).collect()
}

fn in_range(n: u8, max: u8) -> Result<u8, RouletteError> {
    if (1..=max).contains(&n) {
        Ok(n)
    } else {
        Err(RouletteError::InvalidPocket)
    }
}

/// Covers a single pocket.
#[must_use]
pub fn straight(pocket: Pocket) -> Vec<Pocket> {
    alloc::vec![pocket]
}

/// Covers two numbers side by side or one above the other.
///
/// # Errors
///
/// Returns [`RouletteError::InvalidPocket`] if the numbers are not adjacent
/// on the layout.
pub fn split(a: Pocket, b: Pocket) -> Result<Vec<Pocket>, RouletteError> {
    let (Some(x), Some(y)) = (a.value(), b.value()) else {
        return Err(RouletteError::InvalidPocket);
    };
    let (low, high) = if x < y { (x, y) } else { (y, x) };
    let beside = high == low + 1 && low % 3 != 0;
    let above = high == low + 3;
    if high <= MAX_NUMBER && (beside || above) {
        Ok(alloc::vec![Pocket::Number(low), Pocket::Number(high)])
    } else {
        Err(RouletteError::InvalidPocket)
    }
}

/// Covers row `row` (1-12) of three numbers.
///
/// # Errors
///
/// Returns [`RouletteError::InvalidPocket`] for a row outside 1-12.
pub fn street(row: u8) -> Result<Vec<Pocket>, RouletteError> {
    let row = in_range(row, 12)?;
    let first = row * 3 - 2;
    Ok(numbers(first..=first + 2))
}

/// Covers the square whose top-left number is `top_left`.
///
/// # Errors
///
/// Returns [`RouletteError::InvalidPocket`] if no square starts there.
pub fn corner(top_left: u8) -> Result<Vec<Pocket>, RouletteError> {
    let n = in_range(top_left, 32)?;
    if n % 3 == 0 {
        return Err(RouletteError::InvalidPocket);
    }
    Ok(numbers([n, n + 1, n + 3, n + 4]))
}

/// Covers rows `row` and `row + 1` (row 1-11).
///
/// # Errors
///
/// Returns [`RouletteError::InvalidPocket`] for a row outside 1-11.
pub fn line(row: u8) -> Result<Vec<Pocket>, RouletteError> {
    let row = in_range(row, 11)?;
    let first = row * 3 - 2;
    Ok(numbers(first..=first + 5))
}

/// Covers column `column` (1-3); column 1 starts at 1.
///
/// # Errors
///
/// Returns [`RouletteError::InvalidPocket`] for a column outside 1-3.
pub fn column(column: u8) -> Result<Vec<Pocket>, RouletteError> {
    let column = in_range(column, 3)?;
    Ok(numbers((column..=MAX_NUMBER).step_by(3)))
}

/// Covers dozen `dozen` (1-3).
///
/// # Errors
///
/// Returns [`RouletteError::InvalidPocket`] for a dozen outside 1-3.
pub fn dozen(dozen: u8) -> Result<Vec<Pocket>, RouletteError> {
    let dozen = in_range(dozen, 3)?;
    let first = dozen * 12 - 11;
    Ok(numbers(first..=first + 11))
}

/// Covers every number of one colour.
#[must_use]
pub fn color(color: Color) -> Vec<Pocket> {
    (1..=MAX_NUMBER)
        .map(Pocket::Number)
        .filter(|p| p.color() == color)
        .collect()
}

/// Covers odd (`true`) or even numbers.
#[must_use]
pub fn parity(odd: bool) -> Vec<Pocket> {
    numbers((1..=MAX_NUMBER).filter(|n| (n % 2 == 1) == odd))
}

/// Covers 1-18 (`true`) or 19-36.
#[must_use]
pub fn half(low: bool) -> Vec<Pocket> {
    if low { numbers(1..=18) } else { numbers(19..=MAX_NUMBER) }
}

/// Covers the three numbers around zero: 0-00-2 on an American wheel,
/// 0-1-2 on a European one.
#[must_use]
pub fn basket(wheel: Wheel) -> Vec<Pocket> {
    match wheel {
        Wheel::American => alloc::vec![Pocket::Zero, Pocket::DoubleZero, Pocket::Number(2)],
        Wheel::European => alloc::vec![Pocket::Zero, Pocket::Number(1), Pocket::Number(2)],
    }
}

/// Covers 0, 00, 1, 2 and 3.
#[must_use]
pub fn first_five() -> Vec<Pocket> {
    let mut pockets = alloc::vec![Pocket::Zero, Pocket::DoubleZero];
    pockets.extend(numbers(1..=3));
    pockets
}

/// Coverage of a bet kind that needs no selection on the layout.
///
/// Returns `None` for kinds that take a number, row, column or dozen.
#[must_use]
pub fn outside(kind: BetKind, wheel: Wheel) -> Option<Vec<Pocket>> {
    match kind {
        BetKind::Red => Some(color(Color::Red)),
        BetKind::Black => Some(color(Color::Black)),
        BetKind::Odd => Some(parity(true)),
        BetKind::Even => Some(parity(false)),
        BetKind::Low => Some(half(true)),
        BetKind::High => Some(half(false)),
        BetKind::Basket => Some(basket(wheel)),
        BetKind::FirstFive => Some(first_five()),
        _ => None,
    }
}
