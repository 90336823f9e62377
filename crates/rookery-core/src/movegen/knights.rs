//! Fixed-offset targets for knights and kings.

use crate::board::Grid;
use crate::color::Color;
use crate::square::Square;

/// Squares reachable by one of `offsets` from `from` that do not hold a piece of `us`.
pub(super) fn step_targets(grid: &Grid, from: Square, us: Color, offsets: &[(i8, i8)]) -> Vec<Square> {
    offsets
        .iter()
        .filter_map(|&(dr, dc)| from.offset(dr, dc))
        .filter(|&to| grid.get(to).is_none_or(|piece| piece.color() != us))
        .collect()
}
