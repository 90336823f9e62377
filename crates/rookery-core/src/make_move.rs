//! Move execution via copy-make.

use crate::board::{BoardState, PendingPromotion};
use crate::castle_rights::CastleRights;
use crate::chess_move::{Destination, MoveRecord, PromotionPiece};
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Maps each square index to the castling rights that must be removed when
/// that square is the source or destination of any move.
const CASTLE_RIGHTS_REVOKE: [CastleRights; Square::COUNT] = {
    let mut table = [CastleRights::NONE; Square::COUNT];
    table[Square::E1.index()] = CastleRights::WHITE_BOTH;
    table[Square::A1.index()] = CastleRights::WHITE_QUEEN;
    table[Square::H1.index()] = CastleRights::WHITE_KING;
    table[Square::E8.index()] = CastleRights::BLACK_BOTH;
    table[Square::A8.index()] = CastleRights::BLACK_QUEEN;
    table[Square::H8.index()] = CastleRights::BLACK_KING;
    table
};

impl BoardState {
    /// Apply a move and return the resulting position.
    ///
    /// Copy-make: `self` is not modified. `dest` must come from
    /// [`crate::legal_destinations`] for `from`; no legality check is done here.
    ///
    /// The side to move flips even when the pawn lands on its last rank; the
    /// returned position then carries a pending promotion.
    pub fn make_move(&self, from: Square, dest: Destination) -> BoardState {
        let mut next = self.clone();
        let to = dest.to;
        let mover = self.piece_at(from);

        next.set_grid(self.grid().with_move(from, to, dest.effect));

        // Also covers a rook captured on its home corner.
        let mut castling = self
            .castling()
            .remove(CASTLE_RIGHTS_REVOKE[from.index()] | CASTLE_RIGHTS_REVOKE[to.index()]);

        next.set_en_passant(None);
        next.set_pending_promotion(None);

        if let Some(piece) = mover {
            let color = piece.color();
            match piece.kind() {
                PieceKind::King => castling = castling.remove_color(color),
                PieceKind::Pawn => {
                    if from.row().abs_diff(to.row()) == 2 {
                        let passed = Square::new_unchecked((from.row() + to.row()) / 2, from.col());
                        next.set_en_passant(Some(passed));
                    }
                    if to.row() == color.promotion_row() {
                        next.set_pending_promotion(Some(PendingPromotion { from, to }));
                    }
                }
                PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {}
            }
        }

        next.set_castling(castling);
        next.set_side_to_move(self.side_to_move().flip());
        next.set_terminal(None);
        next.set_last_notation(None);
        next.set_last_move(Some(MoveRecord {
            from,
            to,
            promotion: None,
            timestamp_ms: None,
        }));
        next
    }

    /// Replace the pawn awaiting promotion with `choice`.
    ///
    /// Returns `None` when no promotion is pending.
    pub fn promote(&self, choice: PromotionPiece) -> Option<BoardState> {
        let pending = self.pending_promotion()?;
        let pawn = self.piece_at(pending.to)?;

        let mut grid = *self.grid();
        grid.set(pending.to, Some(Piece::new(choice.to_piece_kind(), pawn.color())));

        let mut next = self.clone();
        next.set_grid(grid);
        next.set_pending_promotion(None);
        next.set_last_move(self.last_move().map(|record| MoveRecord {
            promotion: Some(choice.to_piece_kind()),
            ..record
        }));
        Some(next)
    }
}
