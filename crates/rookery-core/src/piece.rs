//! Colored chess piece and its `{color}-{kind}` token form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::color::Color;
use crate::error::BoardError;
use crate::piece_kind::PieceKind;

/// A colored chess piece.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    color: Color,
}

impl Piece {
    /// White pawn.
    pub const WHITE_PAWN: Piece = Piece::new(PieceKind::Pawn, Color::White);
    /// White knight.
    pub const WHITE_KNIGHT: Piece = Piece::new(PieceKind::Knight, Color::White);
    /// White bishop.
    pub const WHITE_BISHOP: Piece = Piece::new(PieceKind::Bishop, Color::White);
    /// White rook.
    pub const WHITE_ROOK: Piece = Piece::new(PieceKind::Rook, Color::White);
    /// White queen.
    pub const WHITE_QUEEN: Piece = Piece::new(PieceKind::Queen, Color::White);
    /// White king.
    pub const WHITE_KING: Piece = Piece::new(PieceKind::King, Color::White);

    /// Black pawn.
    pub const BLACK_PAWN: Piece = Piece::new(PieceKind::Pawn, Color::Black);
    /// Black knight.
    pub const BLACK_KNIGHT: Piece = Piece::new(PieceKind::Knight, Color::Black);
    /// Black bishop.
    pub const BLACK_BISHOP: Piece = Piece::new(PieceKind::Bishop, Color::Black);
    /// Black rook.
    pub const BLACK_ROOK: Piece = Piece::new(PieceKind::Rook, Color::Black);
    /// Black queen.
    pub const BLACK_QUEEN: Piece = Piece::new(PieceKind::Queen, Color::Black);
    /// Black king.
    pub const BLACK_KING: Piece = Piece::new(PieceKind::King, Color::Black);

    /// Create a piece from a kind and a color.
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Piece {
        Piece { kind, color }
    }

    /// Return the piece kind.
    #[inline]
    pub const fn kind(self) -> PieceKind {
        self.kind
    }

    /// Return the color.
    #[inline]
    pub const fn color(self) -> Color {
        self.color
    }

    /// Return `true` if this piece is `kind` and belongs to `color`.
    #[inline]
    pub fn is(self, kind: PieceKind, color: Color) -> bool {
        self.kind == kind && self.color == color
    }

    /// Serialization token, e.g. `"white-knight"`.
    pub fn token(self) -> String {
        format!("{}-{}", self.color.name(), self.kind.name())
    }

    /// Parse a diagram character: uppercase is White, lowercase is Black.
    pub fn from_diagram_char(c: char) -> Option<Piece> {
        let kind = PieceKind::from_diagram_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(kind, color))
    }

    /// Diagram character, uppercase for White.
    pub fn diagram_char(self) -> char {
        let base = self.kind.diagram_char();
        match self.color {
            Color::White => base.to_ascii_uppercase(),
            Color::Black => base,
        }
    }
}

impl FromStr for Piece {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Piece, BoardError> {
        let invalid = || BoardError::InvalidPieceToken {
            token: s.to_string(),
        };
        let (color, kind) = s.split_once('-').ok_or_else(invalid)?;
        let color = Color::from_name(color).ok_or_else(invalid)?;
        let kind = PieceKind::from_name(kind).ok_or_else(invalid)?;
        Ok(Piece::new(kind, color))
    }
}

impl Serialize for Piece {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.token())
    }
}

impl<'de> Deserialize<'de> for Piece {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Piece, D::Error> {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.color, self.kind)
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let color_prefix = match self.color {
            Color::White => 'W',
            Color::Black => 'B',
        };
        let kind_char = self.kind.diagram_char().to_ascii_uppercase();
        write!(f, "{}{}", color_prefix, kind_char)
    }
}
