//! Ray targets for bishops, rooks, and queens.

use crate::attacks::{DIAGONAL, ORTHOGONAL, ray};
use crate::board::Grid;
use crate::color::Color;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Directions a slider of `kind` moves along. Non-sliders have none.
pub(super) fn directions(kind: PieceKind) -> &'static [(i8, i8)] {
    #[rustfmt::skip]
    const QUEEN: [(i8, i8); 8] = [
        ORTHOGONAL[0], ORTHOGONAL[1], ORTHOGONAL[2], ORTHOGONAL[3],
        DIAGONAL[0], DIAGONAL[1], DIAGONAL[2], DIAGONAL[3],
    ];
    match kind {
        PieceKind::Rook => &ORTHOGONAL,
        PieceKind::Bishop => &DIAGONAL,
        PieceKind::Queen => &QUEEN,
        PieceKind::Pawn | PieceKind::Knight | PieceKind::King => &[],
    }
}

/// Every square along `dirs` up to the first blocker, including it when it belongs to the opponent.
pub(super) fn ray_targets(grid: &Grid, from: Square, us: Color, dirs: &[(i8, i8)]) -> Vec<Square> {
    let mut targets = Vec::new();
    for &dir in dirs {
        for sq in ray(from, dir) {
            match grid.get(sq) {
                None => targets.push(sq),
                Some(piece) => {
                    if piece.color() != us {
                        targets.push(sq);
                    }
                    break;
                }
            }
        }
    }
    targets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardState;
    use crate::castle_rights::CastleRights;
    use crate::testing::position;

    #[test]
    fn rook_on_empty_board_sees_fourteen() {
        let board = position("4k3/8/8/8/3R4/8/8/4K3", Color::White, CastleRights::NONE, None);
        let targets = ray_targets(board.grid(), Square::D4, Color::White, directions(PieceKind::Rook));
        assert_eq!(targets.len(), 14);
    }

    #[test]
    fn blockers_include_enemies_only() {
        let board = position("4k3/8/3p4/8/3R1P2/8/8/4K3", Color::White, CastleRights::NONE, None);
        let targets = ray_targets(board.grid(), Square::D4, Color::White, directions(PieceKind::Rook));
        assert!(targets.contains(&Square::D5));
        assert!(targets.contains(&Square::D6));
        assert!(!targets.contains(&Square::D7));
        assert!(targets.contains(&Square::E4));
        assert!(!targets.contains(&Square::F4));
    }

    #[test]
    fn boxed_in_bishop_has_nothing() {
        let board = BoardState::starting_position();
        let targets = ray_targets(board.grid(), Square::C1, Color::White, directions(PieceKind::Bishop));
        assert!(targets.is_empty());
    }

    #[test]
    fn queen_combines_both() {
        assert_eq!(directions(PieceKind::Queen).len(), 8);
        assert!(directions(PieceKind::Knight).is_empty());
    }
}
