//! Scoreboard views derived from the settled-round history.
//!
//! Both views are pure functions of the history; the table only keeps the
//! history itself.

use alloc::vec::Vec;

use super::rules::Winner;

/// One settled coup as remembered by the scoreboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundRecord {
    /// Winning side.
    pub winner: Winner,
    /// Final player point.
    pub player_point: u8,
    /// Final banker point.
    pub banker_point: u8,
    /// Player's first two cards paired.
    pub player_pair: bool,
    /// Banker's first two cards paired.
    pub banker_pair: bool,
}

/// A bead plate cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeadCell {
    /// Column, left to right.
    pub column: usize,
    /// Row, top to bottom.
    pub row: usize,
    /// The coup in this cell.
    pub record: RoundRecord,
}

/// Lays every coup, ties included, into a column-major grid of `rows`
/// rows.
#[must_use]
pub fn bead_plate(history: &[RoundRecord], rows: usize) -> Vec<BeadCell> {
    let rows = rows.max(1);
    history
        .iter()
        .enumerate()
        .map(|(index, &record)| BeadCell {
            column: index / rows,
            row: index % rows,
            record,
        })
        .collect()
}

/// A big road node: one banker or player win.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BigRoadNode {
    /// Column, left to right.
    pub column: usize,
    /// Row, top to bottom.
    pub row: usize,
    /// `Winner::Banker` or `Winner::Player`.
    pub winner: Winner,
    /// Ties dealt while this node was current.
    pub tie_count: usize,
    /// A player pair appeared while this node was current.
    pub player_pair: bool,
    /// A banker pair appeared while this node was current.
    pub banker_pair: bool,
}

/// Builds the big road.
///
/// Consecutive wins by the same side run down a column; a streak that
/// reaches the bottom row continues at the top of the next column, and a
/// change of side starts a new column. Ties do not take a cell: they bump
/// the tie count of the current node and add their pair flags to it. Ties
/// dealt before the first banker or player win are held and attached to
/// the first node.
#[must_use]
pub fn big_road(history: &[RoundRecord], rows: usize) -> Vec<BigRoadNode> {
    let rows = rows.max(1);
    let mut nodes: Vec<BigRoadNode> = Vec::new();

    let mut held_ties = 0;
    let mut held_player_pair = false;
    let mut held_banker_pair = false;

    for record in history {
        if record.winner == Winner::Tie {
            if let Some(current) = nodes.last_mut() {
                current.tie_count += 1;
                current.player_pair |= record.player_pair;
                current.banker_pair |= record.banker_pair;
            } else {
                held_ties += 1;
                held_player_pair |= record.player_pair;
                held_banker_pair |= record.banker_pair;
            }
            continue;
        }

        let (column, row) = match nodes.last() {
            None => (0, 0),
            Some(last) if last.winner == record.winner => {
                if last.row + 1 < rows {
                    (last.column, last.row + 1)
                } else {
                    (last.column + 1, 0)
                }
            }
            Some(last) => (last.column + 1, 0),
        };

        nodes.push(BigRoadNode {
            column,
            row,
            winner: record.winner,
            tie_count: held_ties,
            player_pair: record.player_pair || held_player_pair,
            banker_pair: record.banker_pair || held_banker_pair,
        });
        held_ties = 0;
        held_player_pair = false;
        held_banker_pair = false;
    }

    nodes
}
