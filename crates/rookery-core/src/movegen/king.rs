//! Castling destinations.

use crate::attacks::{is_in_check_on, is_square_attacked};
use crate::board::BoardState;
use crate::castle_rights::CastleSide;
use crate::chess_move::{Destination, SideEffect};
use crate::color::Color;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Castling destinations for the king of `us` on `from`.
///
/// The landing square is checked by the caller's king-safety filter; this
/// function checks the right, the empty gap, the current check, and the
/// transit square.
pub(super) fn castle_destinations(state: &BoardState, from: Square, us: Color) -> Vec<Destination> {
    let grid = state.grid();
    let home = us.home_row();
    if from != Square::new_unchecked(home, 4) || is_square_attacked(grid, from, us.flip()) {
        return Vec::new();
    }

    let mut dests = Vec::new();
    for side in CastleSide::ALL {
        if !state.castling().has(us, side) {
            continue;
        }
        let rook_sq = Square::new_unchecked(home, side.rook_col());
        if !grid.get(rook_sq).is_some_and(|piece| piece.is(PieceKind::Rook, us)) {
            continue;
        }
        if side.gap_cols().any(|col| grid.get(Square::new_unchecked(home, col)).is_some()) {
            continue;
        }
        let transit = Square::new_unchecked(home, side.transit_col());
        if is_in_check_on(&grid.with_move(from, transit, None), us) {
            continue;
        }
        dests.push(Destination::with_effect(
            Square::new_unchecked(home, side.king_dest_col()),
            SideEffect::Relocate {
                from: rook_sq,
                to: transit,
            },
        ));
    }
    dests
}
