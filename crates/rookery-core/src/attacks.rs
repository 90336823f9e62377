//! Board geometry and check detection.
//!
//! Attack lookups walk outward from the target square, so nothing here depends on
//! move generation.

use crate::board::{BoardState, Grid};
use crate::color::Color;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Rook directions as (row, col) deltas.
pub(crate) const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Bishop directions as (row, col) deltas.
pub(crate) const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

#[rustfmt::skip]
pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1), (-2, 1), (-1, -2), (-1, 2),
    (1, -2), (1, 2), (2, -1), (2, 1),
];

#[rustfmt::skip]
pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// Squares from `from` (exclusive) to the board edge along `dir`.
pub(crate) fn ray(from: Square, (dr, dc): (i8, i8)) -> impl Iterator<Item = Square> {
    std::iter::successors(from.offset(dr, dc), move |sq| sq.offset(dr, dc))
}

/// Nearest occupied square along `dir`, with its distance in steps.
fn first_blocker(grid: &Grid, from: Square, dir: (i8, i8)) -> Option<(usize, Piece)> {
    ray(from, dir)
        .enumerate()
        .find_map(|(i, sq)| grid.get(sq).map(|piece| (i + 1, piece)))
}

/// Return `true` if any piece of `by` attacks `sq` on `grid`.
pub fn is_square_attacked(grid: &Grid, sq: Square, by: Color) -> bool {
    for dir in ORTHOGONAL {
        if let Some((dist, piece)) = first_blocker(grid, sq, dir)
            && piece.color() == by
        {
            match piece.kind() {
                PieceKind::Rook | PieceKind::Queen => return true,
                PieceKind::King if dist == 1 => return true,
                _ => {}
            }
        }
    }

    // A pawn of `by` attacks diagonally forward, so it sits one row behind `sq`
    // from its own point of view.
    let pawn_row = -by.pawn_direction();
    for dir in DIAGONAL {
        if let Some((dist, piece)) = first_blocker(grid, sq, dir)
            && piece.color() == by
        {
            match piece.kind() {
                PieceKind::Bishop | PieceKind::Queen => return true,
                PieceKind::King if dist == 1 => return true,
                PieceKind::Pawn if dist == 1 && dir.0 == pawn_row => return true,
                _ => {}
            }
        }
    }

    KNIGHT_OFFSETS.iter().any(|&(dr, dc)| {
        sq.offset(dr, dc)
            .and_then(|target| grid.get(target))
            .is_some_and(|piece| piece.is(PieceKind::Knight, by))
    })
}

/// Return `true` if `color`'s king is attacked on `grid`. A grid without that king is never in check.
pub fn is_in_check_on(grid: &Grid, color: Color) -> bool {
    grid.king_square(color)
        .is_some_and(|king| is_square_attacked(grid, king, color.flip()))
}

/// Return `true` if `color`'s king is currently attacked.
pub fn is_in_check(state: &BoardState, color: Color) -> bool {
    is_in_check_on(state.grid(), color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::castle_rights::CastleRights;
    use crate::testing::position;

    #[test]
    fn starting_position_no_check() {
        let board = BoardState::starting_position();
        assert!(!is_in_check(&board, Color::White));
        assert!(!is_in_check(&board, Color::Black));
    }

    #[test]
    fn rook_check_along_file_and_blocked() {
        let board = position("4r2k/8/8/8/8/8/8/4K3", Color::White, CastleRights::NONE, None);
        assert!(is_in_check(&board, Color::White));

        let blocked = position("4r2k/8/8/8/8/8/4N3/4K3", Color::White, CastleRights::NONE, None);
        assert!(!is_in_check(&blocked, Color::White));
    }

    #[test]
    fn bishop_and_queen_diagonals() {
        let bishop = position("7k/8/8/b7/8/8/8/4K3", Color::White, CastleRights::NONE, None);
        assert!(is_in_check(&bishop, Color::White));

        let queen = position("7k/8/8/8/8/8/3q4/4K3", Color::White, CastleRights::NONE, None);
        assert!(is_in_check(&queen, Color::White));

        // A rook on a diagonal does not give check.
        let rook = position("7k/8/8/r7/8/8/8/4K3", Color::White, CastleRights::NONE, None);
        assert!(!is_in_check(&rook, Color::White));
    }

    #[test]
    fn knight_check() {
        let board = position("7k/8/8/8/8/5n2/8/4K3", Color::White, CastleRights::NONE, None);
        assert!(is_in_check(&board, Color::White));
    }

    #[test]
    fn pawn_checks_only_forward() {
        // Black pawn on d2 attacks e1.
        let board = position("7k/8/8/8/8/8/3p4/4K3", Color::White, CastleRights::NONE, None);
        assert!(is_in_check(&board, Color::White));

        // White pawn on d2 does not attack its own king's rank backwards.
        let own = position("7k/8/8/8/8/8/3P4/4K3", Color::White, CastleRights::NONE, None);
        assert!(!is_in_check(&own, Color::White));

        // Black pawn behind the white king attacks away from it.
        let behind = position("7k/8/8/8/8/4K3/3p4/8", Color::White, CastleRights::NONE, None);
        assert!(!is_in_check(&behind, Color::White));

        // White pawn on f7 attacks the black king on e8.
        let white_pawn = position("4k3/5P2/8/8/8/8/8/4K3", Color::Black, CastleRights::NONE, None);
        assert!(is_in_check(&white_pawn, Color::Black));
    }

    #[test]
    fn adjacent_king_attacks() {
        let board = BoardState::starting_position();
        assert!(is_square_attacked(board.grid(), Square::F3, Color::White));
        assert!(is_square_attacked(board.grid(), Square::E3, Color::White));
        assert!(!is_square_attacked(board.grid(), Square::E4, Color::White));
        assert!(is_square_attacked(board.grid(), Square::D7, Color::Black));
    }

    #[test]
    fn ray_stops_at_edge() {
        assert_eq!(ray(Square::E4, (-1, 0)).count(), 4);
        assert_eq!(ray(Square::A1, (0, -1)).count(), 0);
        assert_eq!(ray(Square::A1, (-1, 1)).last(), Some(Square::H8));
    }
}
