//! Algebraic notation for applied moves.

use crate::board::BoardState;
use crate::movegen::is_legal;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Write the algebraic notation of the move `from -> to`.
///
/// `before` is the position the move was played from and `after` the position
/// it produced. For a promotion, `before` is the snapshot holding the unpromoted
/// pawn on `to` and `after` holds the chosen piece there.
///
/// # Panics
///
/// Panics if the moving piece is missing from `before` (on `from`, or on `to`
/// for a promotion) or the promoted piece is missing from `after`.
pub fn encode(
    before: &BoardState,
    after: &BoardState,
    from: Square,
    to: Square,
    is_check: bool,
    is_mate: bool,
    is_promotion: bool,
) -> String {
    let mover_sq = if is_promotion { to } else { from };
    let mover = before
        .piece_at(mover_sq)
        .expect("notation needs the moving piece on the prior snapshot");

    let mut san = String::new();
    if mover.kind() == PieceKind::King && from.col().abs_diff(to.col()) == 2 {
        san.push_str(if to.col() > from.col() { "O-O" } else { "O-O-O" });
    } else {
        // Pawns change file exactly when they capture, en passant included.
        let capture = match mover.kind() {
            PieceKind::Pawn => from.col() != to.col(),
            _ => !is_promotion && before.piece_at(to).is_some(),
        };

        if let Some(letter) = mover.kind().notation_letter() {
            san.push(letter);
        }
        let disambiguate = match mover.kind() {
            PieceKind::Pawn => capture,
            PieceKind::Knight => before
                .grid()
                .pieces_of(mover.color())
                .any(|(sq, piece)| sq != from && piece.kind() == PieceKind::Knight && is_legal(before, sq, to)),
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen | PieceKind::King => false,
        };
        if disambiguate {
            san.push(from.file_char());
        }
        if capture {
            san.push('x');
        }
        san.push_str(&to.to_string());

        if is_promotion {
            let promoted = after
                .piece_at(to)
                .expect("notation needs the promoted piece on the resulting snapshot");
            if let Some(letter) = promoted.kind().notation_letter() {
                san.push('=');
                san.push(letter);
            }
        }
    }

    if is_mate {
        san.push('#');
    } else if is_check {
        san.push('+');
    }
    san
}
