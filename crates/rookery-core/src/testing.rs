//! Position fixtures for unit tests.

use crate::board::BoardState;
use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::piece::Piece;
use crate::square::Square;

/// Build a position from a diagram such as `"4k3/8/8/8/8/8/8/4K3"`.
///
/// Ranks run 8 to 1 separated by `/`; digits skip empty squares; letters are
/// pieces, uppercase for White.
pub(crate) fn position(
    diagram: &str,
    side_to_move: Color,
    castling: CastleRights,
    en_passant: Option<Square>,
) -> BoardState {
    let mut pieces = Vec::new();
    for (row, rank) in diagram.split('/').enumerate() {
        let mut col = 0u8;
        for c in rank.chars() {
            if let Some(skip) = c.to_digit(10) {
                col += skip as u8;
                continue;
            }
            let piece = Piece::from_diagram_char(c).unwrap_or_else(|| panic!("bad diagram char '{c}'"));
            let sq = Square::new(row as u8, col).unwrap_or_else(|| panic!("diagram overflows at rank {}", 8 - row));
            pieces.push((sq, piece));
            col += 1;
        }
    }
    BoardState::from_pieces(pieces, side_to_move, castling, en_passant).unwrap()
}
