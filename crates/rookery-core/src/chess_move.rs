//! Move-level values: legal destinations, their side effects, and played-move records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BoardError;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// An extra board change that accompanies a special move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SideEffect {
    /// Remove whatever stands on the square (the pawn taken en passant).
    Clear(Square),
    /// Move the piece on `from` to `to` (the rook in castling).
    Relocate { from: Square, to: Square },
}

/// A legal destination for a piece, with the side effect playing it entails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Destination {
    /// Square the moving piece lands on.
    pub to: Square,
    /// Additional change applied atomically with the move.
    pub effect: Option<SideEffect>,
}

impl Destination {
    /// A destination with no side effect.
    #[inline]
    pub const fn plain(to: Square) -> Destination {
        Destination { to, effect: None }
    }

    /// A destination carrying a side effect.
    #[inline]
    pub const fn with_effect(to: Square, effect: SideEffect) -> Destination {
        Destination {
            to,
            effect: Some(effect),
        }
    }

    /// Return `true` for castling moves.
    #[inline]
    pub const fn is_castle(&self) -> bool {
        matches!(self.effect, Some(SideEffect::Relocate { .. }))
    }

    /// Return `true` for en passant captures.
    #[inline]
    pub const fn is_en_passant(&self) -> bool {
        matches!(self.effect, Some(SideEffect::Clear(_)))
    }
}

/// The piece a pawn promotes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromotionPiece {
    Knight,
    Bishop,
    Rook,
    Queen,
}

impl PromotionPiece {
    /// All promotion pieces.
    pub const ALL: [PromotionPiece; 4] = [
        PromotionPiece::Knight,
        PromotionPiece::Bishop,
        PromotionPiece::Rook,
        PromotionPiece::Queen,
    ];

    /// Convert to the corresponding [`PieceKind`].
    pub const fn to_piece_kind(self) -> PieceKind {
        match self {
            PromotionPiece::Knight => PieceKind::Knight,
            PromotionPiece::Bishop => PieceKind::Bishop,
            PromotionPiece::Rook => PieceKind::Rook,
            PromotionPiece::Queen => PieceKind::Queen,
        }
    }

    /// Convert from a piece kind; pawns and kings are not promotion targets.
    pub const fn from_piece_kind(kind: PieceKind) -> Option<PromotionPiece> {
        match kind {
            PieceKind::Knight => Some(PromotionPiece::Knight),
            PieceKind::Bishop => Some(PromotionPiece::Bishop),
            PieceKind::Rook => Some(PromotionPiece::Rook),
            PieceKind::Queen => Some(PromotionPiece::Queen),
            PieceKind::Pawn | PieceKind::King => None,
        }
    }
}

impl FromStr for PromotionPiece {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<PromotionPiece, BoardError> {
        PieceKind::from_name(s)
            .and_then(PromotionPiece::from_piece_kind)
            .ok_or_else(|| BoardError::InvalidPromotionPiece { token: s.to_string() })
    }
}

impl fmt::Display for PromotionPiece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_piece_kind())
    }
}

/// The move that produced a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    /// Kind chosen for a promotion, once resolved.
    pub promotion: Option<PieceKind>,
    /// Caller-supplied wall-clock time of the move, in milliseconds.
    pub timestamp_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_flags() {
        let plain = Destination::plain(Square::E4);
        assert!(!plain.is_castle() && !plain.is_en_passant());

        let castle = Destination::with_effect(
            Square::G1,
            SideEffect::Relocate {
                from: Square::H1,
                to: Square::F1,
            },
        );
        assert!(castle.is_castle());

        let ep = Destination::with_effect(Square::D6, SideEffect::Clear(Square::D5));
        assert!(ep.is_en_passant());
    }

    #[test]
    fn promotion_piece_parse() {
        assert_eq!("queen".parse::<PromotionPiece>(), Ok(PromotionPiece::Queen));
        assert_eq!("knight".parse::<PromotionPiece>(), Ok(PromotionPiece::Knight));
        assert_eq!(
            "king".parse::<PromotionPiece>(),
            Err(BoardError::InvalidPromotionPiece {
                token: "king".to_string()
            })
        );
        assert!("pawn".parse::<PromotionPiece>().is_err());
    }

    #[test]
    fn promotion_piece_kind_roundtrip() {
        for promo in PromotionPiece::ALL {
            assert_eq!(PromotionPiece::from_piece_kind(promo.to_piece_kind()), Some(promo));
        }
    }

    #[test]
    fn move_record_camel_case() {
        let record = MoveRecord {
            from: Square::E7,
            to: Square::E8,
            promotion: Some(PieceKind::Queen),
            timestamp_ms: Some(1_700_000_000_000),
        };
        let json = serde_json::to_value(record).unwrap();
        assert_eq!(json["from"], "e7");
        assert_eq!(json["promotion"], "queen");
        assert_eq!(json["timestampMs"], 1_700_000_000_000u64);
    }
}
