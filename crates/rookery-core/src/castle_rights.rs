//! Castling rights stored as a 4-bit field within a `u8`.

use std::fmt;
use std::ops::BitOr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::color::Color;

/// Which side of the board to castle toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    /// Both sides, king side first.
    pub const ALL: [CastleSide; 2] = [CastleSide::KingSide, CastleSide::QueenSide];

    /// Column of the rook that castles on this side.
    #[inline]
    pub const fn rook_col(self) -> u8 {
        match self {
            CastleSide::KingSide => 7,
            CastleSide::QueenSide => 0,
        }
    }

    /// Column the king passes over; the rook lands here.
    #[inline]
    pub const fn transit_col(self) -> u8 {
        match self {
            CastleSide::KingSide => 5,
            CastleSide::QueenSide => 3,
        }
    }

    /// Column the king lands on.
    #[inline]
    pub const fn king_dest_col(self) -> u8 {
        match self {
            CastleSide::KingSide => 6,
            CastleSide::QueenSide => 2,
        }
    }

    /// Columns strictly between the king and the rook, which must be empty.
    #[inline]
    pub fn gap_cols(self) -> std::ops::RangeInclusive<u8> {
        match self {
            CastleSide::KingSide => 5..=6,
            CastleSide::QueenSide => 1..=3,
        }
    }
}

/// Castling rights encoded as a 4-bit field: bit 0 = WK, 1 = WQ, 2 = BK, 3 = BQ.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastleRights(u8);

impl CastleRights {
    /// No castling rights.
    pub const NONE: CastleRights = CastleRights(0);
    /// All castling rights.
    pub const ALL: CastleRights = CastleRights(0b1111);

    /// White king-side castling.
    pub const WHITE_KING: CastleRights = CastleRights(0b0001);
    /// White queen-side castling.
    pub const WHITE_QUEEN: CastleRights = CastleRights(0b0010);
    /// Black king-side castling.
    pub const BLACK_KING: CastleRights = CastleRights(0b0100);
    /// Black queen-side castling.
    pub const BLACK_QUEEN: CastleRights = CastleRights(0b1000);

    /// Both white castling rights.
    pub const WHITE_BOTH: CastleRights = CastleRights(0b0011);
    /// Both black castling rights.
    pub const BLACK_BOTH: CastleRights = CastleRights(0b1100);

    /// Return `true` if no castling rights remain.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Return new rights with all bits from `other` added.
    #[inline]
    pub const fn insert(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 | other.0)
    }

    /// Return new rights with all bits from `other` removed.
    #[inline]
    pub const fn remove(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 & !other.0)
    }

    /// Check whether a specific color and side can castle.
    #[inline]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        let bit = Self::flag(color, side).0;
        (self.0 & bit) != 0
    }

    /// Remove all castling rights for the given color.
    #[inline]
    pub const fn remove_color(self, color: Color) -> CastleRights {
        match color {
            Color::White => self.remove(Self::WHITE_BOTH),
            Color::Black => self.remove(Self::BLACK_BOTH),
        }
    }

    /// Return the single-bit flag for a color and side.
    #[inline]
    pub const fn flag(color: Color, side: CastleSide) -> CastleRights {
        match (color, side) {
            (Color::White, CastleSide::KingSide) => Self::WHITE_KING,
            (Color::White, CastleSide::QueenSide) => Self::WHITE_QUEEN,
            (Color::Black, CastleSide::KingSide) => Self::BLACK_KING,
            (Color::Black, CastleSide::QueenSide) => Self::BLACK_QUEEN,
        }
    }

    /// Short letter form ("KQkq", "Kq", "-"), used for debugging output.
    pub fn letters(self) -> String {
        if self.is_empty() {
            return "-".to_string();
        }

        let mut s = String::with_capacity(4);
        for (color, side, letter) in [
            (Color::White, CastleSide::KingSide, 'K'),
            (Color::White, CastleSide::QueenSide, 'Q'),
            (Color::Black, CastleSide::KingSide, 'k'),
            (Color::Black, CastleSide::QueenSide, 'q'),
        ] {
            if self.has(color, side) {
                s.push(letter);
            }
        }
        s
    }
}

impl BitOr for CastleRights {
    type Output = CastleRights;
    #[inline]
    fn bitor(self, rhs: CastleRights) -> CastleRights {
        CastleRights(self.0 | rhs.0)
    }
}

impl fmt::Display for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letters())
    }
}

impl fmt::Debug for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CastleRights({})", self.letters())
    }
}

/// Wire shape of one color's rights.
#[derive(Serialize, Deserialize)]
struct SideRights {
    kingside: bool,
    queenside: bool,
}

/// Wire shape: `{"white": {"kingside": .., "queenside": ..}, "black": {..}}`.
#[derive(Serialize, Deserialize)]
struct WireRights {
    white: SideRights,
    black: SideRights,
}

impl Serialize for CastleRights {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let side = |color| SideRights {
            kingside: self.has(color, CastleSide::KingSide),
            queenside: self.has(color, CastleSide::QueenSide),
        };
        WireRights {
            white: side(Color::White),
            black: side(Color::Black),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CastleRights {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<CastleRights, D::Error> {
        let wire = WireRights::deserialize(deserializer)?;
        let mut rights = CastleRights::NONE;
        for (color, side) in [(Color::White, &wire.white), (Color::Black, &wire.black)] {
            if side.kingside {
                rights = rights.insert(CastleRights::flag(color, CastleSide::KingSide));
            }
            if side.queenside {
                rights = rights.insert(CastleRights::flag(color, CastleSide::QueenSide));
            }
        }
        Ok(rights)
    }
}
