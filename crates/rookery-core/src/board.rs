//! Position snapshots: the piece grid plus side to move, castling, en passant,
//! pending promotion, and the terminal result.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::castle_rights::{CastleRights, CastleSide};
use crate::chess_move::{MoveRecord, SideEffect};
use crate::color::Color;
use crate::error::BoardError;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// 8x8 grid of optional pieces, indexed by [`Square::index()`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid([Option<Piece>; Square::COUNT]);

impl Grid {
    /// A grid with no pieces.
    pub const EMPTY: Grid = Grid([None; Square::COUNT]);

    /// The standard starting arrangement.
    pub fn starting() -> Grid {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut grid = Grid::EMPTY;
        for color in Color::ALL {
            let home = color.home_row();
            let pawns = color.pawn_start_row();
            for (col, kind) in (0u8..).zip(BACK_RANK) {
                grid.set(Square::new_unchecked(home, col), Some(Piece::new(kind, color)));
                grid.set(
                    Square::new_unchecked(pawns, col),
                    Some(Piece::new(PieceKind::Pawn, color)),
                );
            }
        }
        grid
    }

    /// Return the piece on `sq`, if any.
    #[inline]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.0[sq.index()]
    }

    /// Put `piece` on `sq`, replacing whatever was there.
    #[inline]
    pub(crate) fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.0[sq.index()] = piece;
    }

    /// Iterate over occupied squares in index order.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.get(sq).map(|piece| (sq, piece)))
    }

    /// Iterate over the pieces of one color.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied().filter(move |(_, piece)| piece.color() == color)
    }

    /// Return the square of `color`'s king, or `None` if it has none.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind() == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Return the grid after moving the piece on `from` to `to` and applying `effect`.
    ///
    /// Copy-make: `self` is not modified. Whatever stood on `to` is captured.
    pub fn with_move(&self, from: Square, to: Square, effect: Option<SideEffect>) -> Grid {
        let mut next = *self;
        let piece = next.get(from);
        next.set(from, None);
        next.set(to, piece);
        match effect {
            Some(SideEffect::Clear(sq)) => next.set(sq, None),
            Some(SideEffect::Relocate { from, to }) => {
                let moved = next.get(from);
                next.set(from, None);
                next.set(to, moved);
            }
            None => {}
        }
        next
    }

    /// Rows 0 (rank 8) through 7 (rank 1), the wire layout.
    pub fn rows(&self) -> [[Option<Piece>; 8]; 8] {
        let mut rows = [[None; 8]; 8];
        for sq in Square::all() {
            rows[sq.row() as usize][sq.col() as usize] = self.get(sq);
        }
        rows
    }

    /// Build a grid from the wire layout.
    pub fn from_rows(rows: &[[Option<Piece>; 8]; 8]) -> Grid {
        let mut grid = Grid::EMPTY;
        for sq in Square::all() {
            grid.set(sq, rows[sq.row() as usize][sq.col() as usize]);
        }
        grid
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<String> = self
            .rows()
            .iter()
            .map(|row| row.iter().map(|p| p.map_or('.', Piece::diagram_char)).collect())
            .collect();
        write!(f, "Grid({})", rows.join("/"))
    }
}

/// A pawn that reached the last rank and is waiting for its replacement piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PendingPromotion {
    pub from: Square,
    pub to: Square,
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TerminalReason {
    Checkmate,
    Stalemate,
    Resignation,
    Abandonment,
    Timeout,
    Agreement,
    InsufficientMaterial,
}

impl TerminalReason {
    /// Kebab-case name, as serialized.
    pub const fn name(self) -> &'static str {
        match self {
            TerminalReason::Checkmate => "checkmate",
            TerminalReason::Stalemate => "stalemate",
            TerminalReason::Resignation => "resignation",
            TerminalReason::Abandonment => "abandonment",
            TerminalReason::Timeout => "timeout",
            TerminalReason::Agreement => "agreement",
            TerminalReason::InsufficientMaterial => "insufficient-material",
        }
    }
}

impl fmt::Display for TerminalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The result recorded on a finished game. `winner` is `None` for draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Terminal {
    pub reason: TerminalReason,
    pub winner: Option<Color>,
}

impl Terminal {
    /// Create a terminal result.
    pub const fn new(reason: TerminalReason, winner: Option<Color>) -> Terminal {
        Terminal { reason, winner }
    }
}

/// One immutable position in a game.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "WireSnapshot", try_from = "WireSnapshot")]
pub struct BoardState {
    grid: Grid,
    side_to_move: Color,
    castling: CastleRights,
    /// Square a pawn may capture onto en passant; valid for one ply.
    en_passant: Option<Square>,
    pending_promotion: Option<PendingPromotion>,
    terminal: Option<Terminal>,
    last_notation: Option<String>,
    last_move: Option<MoveRecord>,
}

impl BoardState {
    /// Return the standard starting position.
    pub fn starting_position() -> BoardState {
        BoardState {
            grid: Grid::starting(),
            side_to_move: Color::White,
            castling: CastleRights::ALL,
            en_passant: None,
            pending_promotion: None,
            terminal: None,
            last_notation: None,
            last_move: None,
        }
    }

    /// Build a position from piece placements.
    ///
    /// Castling rights whose king or rook is not on its home square are dropped.
    ///
    /// # Errors
    ///
    /// Fails if a square is given twice, a side does not have exactly one king,
    /// a pawn stands on a back rank, or the en passant target is not behind a
    /// pawn that could have just advanced two squares.
    pub fn from_pieces<I>(
        pieces: I,
        side_to_move: Color,
        castling: CastleRights,
        en_passant: Option<Square>,
    ) -> Result<BoardState, BoardError>
    where
        I: IntoIterator<Item = (Square, Piece)>,
    {
        let mut grid = Grid::EMPTY;
        for (sq, piece) in pieces {
            if grid.get(sq).is_some() {
                return Err(BoardError::OverlappingPieces { square: sq });
            }
            grid.set(sq, Some(piece));
        }

        let state = BoardState {
            grid,
            side_to_move,
            castling: reachable_castling(&grid, castling),
            en_passant,
            pending_promotion: None,
            terminal: None,
            last_notation: None,
            last_move: None,
        };
        state.validate()?;
        Ok(state)
    }

    /// Return the piece grid.
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Return the piece on `sq`, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.grid.get(sq)
    }

    /// Return the square of `color`'s king.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.grid.king_square(color)
    }

    /// Return the side to move.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Return the current castling rights.
    #[inline]
    pub fn castling(&self) -> CastleRights {
        self.castling
    }

    /// Return the en passant target square, if any.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Return the promotion awaiting a piece choice, if any.
    #[inline]
    pub fn pending_promotion(&self) -> Option<PendingPromotion> {
        self.pending_promotion
    }

    /// Return the game result, if the game has ended.
    #[inline]
    pub fn terminal(&self) -> Option<Terminal> {
        self.terminal
    }

    /// Return the notation of the move that produced this snapshot.
    pub fn last_notation(&self) -> Option<&str> {
        self.last_notation.as_deref()
    }

    /// Return the move that produced this snapshot.
    #[inline]
    pub fn last_move(&self) -> Option<MoveRecord> {
        self.last_move
    }

    pub(crate) fn set_grid(&mut self, grid: Grid) {
        self.grid = grid;
    }

    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    pub(crate) fn set_castling(&mut self, rights: CastleRights) {
        self.castling = rights;
    }

    pub(crate) fn set_en_passant(&mut self, sq: Option<Square>) {
        self.en_passant = sq;
    }

    pub(crate) fn set_pending_promotion(&mut self, pending: Option<PendingPromotion>) {
        self.pending_promotion = pending;
    }

    pub(crate) fn set_terminal(&mut self, terminal: Option<Terminal>) {
        self.terminal = terminal;
    }

    pub(crate) fn set_last_notation(&mut self, notation: Option<String>) {
        self.last_notation = notation;
    }

    pub(crate) fn set_last_move(&mut self, record: Option<MoveRecord>) {
        self.last_move = record;
    }

    /// Validate the structural integrity of the position.
    pub fn validate(&self) -> Result<(), BoardError> {
        for color in Color::ALL {
            let count = self
                .grid
                .pieces_of(color)
                .filter(|(_, piece)| piece.kind() == PieceKind::King)
                .count();
            if count != 1 {
                return Err(BoardError::InvalidKingCount { color, count });
            }
        }

        if let Some(pending) = self.pending_promotion {
            // The pawn has already landed and the turn has passed.
            let mover = self.side_to_move.flip();
            let pawn_landed = self
                .grid
                .get(pending.to)
                .is_some_and(|piece| piece.is(PieceKind::Pawn, mover));
            let one_step = pending.from.row() as i8 + mover.pawn_direction() == pending.to.row() as i8
                && pending.from.col().abs_diff(pending.to.col()) <= 1;
            if !pawn_landed
                || pending.to.row() != mover.promotion_row()
                || !one_step
                || self.grid.get(pending.from).is_some()
            {
                return Err(BoardError::InvalidPendingPromotion { square: pending.to });
            }
        }

        // The only pawn allowed on a back rank is one waiting to be promoted.
        let promoting = self.pending_promotion.map(|p| p.to);
        let stray_pawn = self.grid.occupied().any(|(sq, piece)| {
            piece.kind() == PieceKind::Pawn
                && (sq.row() == 0 || sq.row() == 7)
                && Some(sq) != promoting
        });
        if stray_pawn {
            return Err(BoardError::PawnsOnBackRank);
        }

        if let Some(target) = self.en_passant {
            // The pawn that advanced belongs to the side that just moved.
            let mover = self.side_to_move.flip();
            let expected_row = (mover.pawn_start_row() as i8 + mover.pawn_direction()) as u8;
            let pawn_sq = target.offset(mover.pawn_direction(), 0);
            let pawn_present = pawn_sq
                .and_then(|sq| self.grid.get(sq))
                .is_some_and(|piece| piece.is(PieceKind::Pawn, mover));
            if target.row() != expected_row || !pawn_present || self.grid.get(target).is_some() {
                return Err(BoardError::InvalidEnPassant { square: target });
            }
        }

        Ok(())
    }

    /// Return a pretty-printable wrapper for this position.
    pub fn pretty(&self) -> PrettyBoard<'_> {
        PrettyBoard(self)
    }
}

/// Keep only the castling rights whose king and rook still stand on their home squares.
fn reachable_castling(grid: &Grid, rights: CastleRights) -> CastleRights {
    let mut kept = CastleRights::NONE;
    for color in Color::ALL {
        let home = color.home_row();
        let king_home = grid.get(Square::new_unchecked(home, 4)) == Some(Piece::new(PieceKind::King, color));
        for side in CastleSide::ALL {
            let rook_home = grid.get(Square::new_unchecked(home, side.rook_col()))
                == Some(Piece::new(PieceKind::Rook, color));
            if rights.has(color, side) && king_home && rook_home {
                kept = kept.insert(CastleRights::flag(color, side));
            }
        }
    }
    kept
}

impl fmt::Debug for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoardState")
            .field("grid", &self.grid)
            .field("side_to_move", &self.side_to_move)
            .field("castling", &self.castling)
            .field("en_passant", &self.en_passant)
            .field("pending_promotion", &self.pending_promotion)
            .field("terminal", &self.terminal)
            .field("last_notation", &self.last_notation)
            .finish()
    }
}

/// Wrapper for pretty-printing a position as an 8x8 grid.
pub struct PrettyBoard<'a>(&'a BoardState);

impl fmt::Display for PrettyBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, pieces) in self.0.grid.rows().iter().enumerate() {
            write!(f, "{}  ", 8 - row)?;
            for (col, piece) in pieces.iter().enumerate() {
                let c = piece.map_or('.', Piece::diagram_char);
                if col < 7 {
                    write!(f, "{c} ")?;
                } else {
                    write!(f, "{c}")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

/// Wire form: `{grid, state: {...}}`.
#[derive(Serialize, Deserialize)]
struct WireSnapshot {
    grid: [[Option<Piece>; 8]; 8],
    state: WireState,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireState {
    side_to_move: Color,
    castling_rights: CastleRights,
    en_passant: Option<Square>,
    pending_promotion: Option<PendingPromotion>,
    terminal: Option<Terminal>,
    last_notation: Option<String>,
    #[serde(default)]
    last_move: Option<MoveRecord>,
}

impl From<BoardState> for WireSnapshot {
    fn from(state: BoardState) -> WireSnapshot {
        WireSnapshot {
            grid: state.grid.rows(),
            state: WireState {
                side_to_move: state.side_to_move,
                castling_rights: state.castling,
                en_passant: state.en_passant,
                pending_promotion: state.pending_promotion,
                terminal: state.terminal,
                last_notation: state.last_notation,
                last_move: state.last_move,
            },
        }
    }
}

impl TryFrom<WireSnapshot> for BoardState {
    type Error = BoardError;

    fn try_from(wire: WireSnapshot) -> Result<BoardState, BoardError> {
        let state = BoardState {
            grid: Grid::from_rows(&wire.grid),
            side_to_move: wire.state.side_to_move,
            castling: wire.state.castling_rights,
            en_passant: wire.state.en_passant,
            pending_promotion: wire.state.pending_promotion,
            terminal: wire.state.terminal,
            last_notation: wire.state.last_notation,
            last_move: wire.state.last_move,
        };
        state.validate()?;
        Ok(state)
    }
}
