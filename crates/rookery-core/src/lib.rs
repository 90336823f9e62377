//! Chess rules engine and immutable game history.
//!
//! [`GameHistory`] is the entry point for playing a game; the free functions
//! re-exported here answer rules questions about a single [`BoardState`].

mod attacks;
mod board;
mod castle_rights;
mod chess_move;
mod color;
mod error;
mod history;
mod make_move;
mod movegen;
mod notation;
mod outcome;
mod perft;
mod piece;
mod piece_kind;
mod square;

#[cfg(test)]
mod testing;

pub use attacks::{is_in_check, is_in_check_on, is_square_attacked};
pub use board::{BoardState, Grid, PendingPromotion, PrettyBoard, Terminal, TerminalReason};
pub use castle_rights::{CastleRights, CastleSide};
pub use chess_move::{Destination, MoveRecord, PromotionPiece, SideEffect};
pub use color::Color;
pub use error::{BoardError, GameError, SnapshotError};
pub use history::{GameHistory, MoveClass, MoveListEntry, MoveOutcome, Phase, PlayedMove};
pub use movegen::{
    all_legal_moves, capture_view, find_destination, has_any_legal_move, is_legal, legal_destinations,
    legal_moves,
};
pub use notation::encode;
pub use outcome::{evaluate, is_insufficient_material};
pub use perft::{divide, perft};
pub use piece::Piece;
pub use piece_kind::PieceKind;
pub use square::Square;
