//! Game-termination checks for the side to move.

use crate::attacks::is_in_check;
use crate::board::{BoardState, Terminal, TerminalReason};
use crate::movegen::has_any_legal_move;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Return checkmate or stalemate if the side to move has no legal move.
///
/// Checkmate names the opponent as winner; stalemate has no winner. A position
/// with a pending promotion is never evaluated and yields `None`.
pub fn evaluate(state: &BoardState) -> Option<Terminal> {
    if state.pending_promotion().is_some() || has_any_legal_move(state) {
        return None;
    }
    let us = state.side_to_move();
    if is_in_check(state, us) {
        Some(Terminal::new(TerminalReason::Checkmate, Some(us.flip())))
    } else {
        Some(Terminal::new(TerminalReason::Stalemate, None))
    }
}

/// Return `true` if neither side can possibly deliver mate.
///
/// Covers bare kings, a single minor piece, and any number of bishops that all
/// stand on the same square color.
pub fn is_insufficient_material(state: &BoardState) -> bool {
    let mut minors = Vec::new();
    for (sq, piece) in state.grid().occupied() {
        match piece.kind() {
            PieceKind::King => {}
            PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
            PieceKind::Knight | PieceKind::Bishop => minors.push((sq, piece.kind())),
        }
    }
    if minors.len() <= 1 {
        return true;
    }
    let shade = |sq: Square| (sq.row() + sq.col()) % 2;
    minors.iter().all(|&(_, kind)| kind == PieceKind::Bishop)
        && minors.iter().all(|&(sq, _)| shade(sq) == shade(minors[0].0))
}
