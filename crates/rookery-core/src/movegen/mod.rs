//! Legal move generation.
//!
//! Destinations are produced per piece, then filtered by simulating the move on
//! a copied grid and asking [`crate::attacks`] whether the mover's king is left
//! in check.

mod king;
mod knights;
mod pawns;
mod sliders;

use crate::attacks::{KING_OFFSETS, KNIGHT_OFFSETS, is_in_check_on};
use crate::board::BoardState;
use crate::chess_move::Destination;
use crate::piece_kind::PieceKind;
use crate::square::Square;

use self::king::castle_destinations;
use self::knights::step_targets;
use self::pawns::{attack_squares, pawn_destinations};
use self::sliders::{directions, ray_targets};

/// Squares the piece on `sq` attacks, ignoring whether its own king would be exposed.
///
/// Empty when `sq` is empty. Pawns report their two diagonals regardless of
/// what stands there; other pieces never include squares held by their own side.
pub fn capture_view(state: &BoardState, sq: Square) -> Vec<Square> {
    let Some(piece) = state.piece_at(sq) else {
        return Vec::new();
    };
    let grid = state.grid();
    let us = piece.color();
    match piece.kind() {
        PieceKind::Pawn => attack_squares(sq, us),
        PieceKind::Knight => step_targets(grid, sq, us, &KNIGHT_OFFSETS),
        PieceKind::King => step_targets(grid, sq, us, &KING_OFFSETS),
        kind @ (PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen) => {
            ray_targets(grid, sq, us, directions(kind))
        }
    }
}

/// Legal destinations of the piece on `from`, with the side effect each entails.
///
/// Only the side to move has legal destinations; any other square yields an
/// empty list.
pub fn legal_destinations(state: &BoardState, from: Square) -> Vec<Destination> {
    let Some(piece) = state.piece_at(from) else {
        return Vec::new();
    };
    let us = piece.color();
    if us != state.side_to_move() {
        return Vec::new();
    }

    let mut candidates: Vec<Destination> = match piece.kind() {
        PieceKind::Pawn => pawn_destinations(state, from, us),
        _ => capture_view(state, from).into_iter().map(Destination::plain).collect(),
    };
    if piece.kind() == PieceKind::King {
        candidates.extend(castle_destinations(state, from, us));
    }

    let grid = state.grid();
    candidates.retain(|dest| !is_in_check_on(&grid.with_move(from, dest.to, dest.effect), us));
    candidates
}

/// Legal destination squares of the piece on `from`.
pub fn legal_moves(state: &BoardState, from: Square) -> Vec<Square> {
    legal_destinations(state, from).into_iter().map(|dest| dest.to).collect()
}

/// Return the legal destination `from -> to`, if there is one.
pub fn find_destination(state: &BoardState, from: Square, to: Square) -> Option<Destination> {
    legal_destinations(state, from).into_iter().find(|dest| dest.to == to)
}

/// Return `true` if moving the piece on `from` to `to` is legal.
pub fn is_legal(state: &BoardState, from: Square, to: Square) -> bool {
    find_destination(state, from, to).is_some()
}

/// Every legal move of the side to move, as `(from, destination)` pairs.
pub fn all_legal_moves(state: &BoardState) -> Vec<(Square, Destination)> {
    state
        .grid()
        .pieces_of(state.side_to_move())
        .flat_map(|(from, _)| legal_destinations(state, from).into_iter().map(move |dest| (from, dest)))
        .collect()
}

/// Return `true` if the side to move has at least one legal move.
pub fn has_any_legal_move(state: &BoardState) -> bool {
    state
        .grid()
        .pieces_of(state.side_to_move())
        .any(|(from, _)| !legal_destinations(state, from).is_empty())
}
