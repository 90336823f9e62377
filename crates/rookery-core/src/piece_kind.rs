//! Chess piece kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of a chess piece, without color information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// All piece kinds, pawn first.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Lowercase name used in piece tokens.
    pub const fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        }
    }

    /// Parse a lowercase piece name.
    pub fn from_name(s: &str) -> Option<PieceKind> {
        PieceKind::ALL.into_iter().find(|kind| kind.name() == s)
    }

    /// Letter used in algebraic notation. Pawns have none.
    pub const fn notation_letter(self) -> Option<char> {
        match self {
            PieceKind::Pawn => None,
            PieceKind::Knight => Some('N'),
            PieceKind::Bishop => Some('B'),
            PieceKind::Rook => Some('R'),
            PieceKind::Queen => Some('Q'),
            PieceKind::King => Some('K'),
        }
    }

    /// Return the diagram character for this piece kind (lowercase).
    #[inline]
    pub const fn diagram_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Parse a diagram character (case-insensitive) into a piece kind.
    #[inline]
    pub fn from_diagram_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::PieceKind;

    #[test]
    fn name_roundtrip() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(PieceKind::from_name("archbishop"), None);
    }

    #[test]
    fn notation_letters() {
        assert_eq!(PieceKind::Pawn.notation_letter(), None);
        assert_eq!(PieceKind::Knight.notation_letter(), Some('N'));
        assert_eq!(PieceKind::King.notation_letter(), Some('K'));
    }

    #[test]
    fn diagram_char_roundtrip() {
        for kind in PieceKind::ALL {
            let c = kind.diagram_char();
            assert_eq!(PieceKind::from_diagram_char(c), Some(kind));
            assert_eq!(PieceKind::from_diagram_char(c.to_ascii_uppercase()), Some(kind));
        }
        assert_eq!(PieceKind::from_diagram_char('x'), None);
    }

    #[test]
    fn all_kinds_distinct() {
        for (i, a) in PieceKind::ALL.iter().enumerate() {
            assert!(PieceKind::ALL[i + 1..].iter().all(|b| b != a));
        }
    }
}
