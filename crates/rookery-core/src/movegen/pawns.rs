//! Pawn pushes, captures, and en passant.

use crate::board::BoardState;
use crate::chess_move::{Destination, SideEffect};
use crate::color::Color;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// The two diagonal-forward squares a pawn of `us` on `from` attacks.
pub(super) fn attack_squares(from: Square, us: Color) -> Vec<Square> {
    let forward = us.pawn_direction();
    [-1, 1]
        .into_iter()
        .filter_map(|dc| from.offset(forward, dc))
        .collect()
}

/// Pseudo-legal pawn destinations; the caller filters for king safety.
pub(super) fn pawn_destinations(state: &BoardState, from: Square, us: Color) -> Vec<Destination> {
    let grid = state.grid();
    let forward = us.pawn_direction();
    let mut dests = Vec::new();

    if let Some(one) = from.offset(forward, 0)
        && grid.get(one).is_none()
    {
        dests.push(Destination::plain(one));
        if from.row() == us.pawn_start_row()
            && let Some(two) = one.offset(forward, 0)
            && grid.get(two).is_none()
        {
            dests.push(Destination::plain(two));
        }
    }

    for to in attack_squares(from, us) {
        match grid.get(to) {
            Some(piece) if piece.color() != us => dests.push(Destination::plain(to)),
            Some(_) => {}
            None if state.en_passant() == Some(to) => {
                // The captured pawn stands beside the mover, on the target's file.
                let victim = Square::new_unchecked(from.row(), to.col());
                if grid.get(victim).is_some_and(|piece| piece.is(PieceKind::Pawn, us.flip())) {
                    dests.push(Destination::with_effect(to, SideEffect::Clear(victim)));
                }
            }
            None => {}
        }
    }

    dests
}
