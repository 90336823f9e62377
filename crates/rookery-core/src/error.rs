//! Error types for position validation, game commands, and history restore.

use crate::color::Color;
use crate::square::Square;

/// Errors from structural validation of a [`BoardState`](crate::board::BoardState).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// A side does not have exactly one king.
    #[error("expected 1 king for {color}, found {count}")]
    InvalidKingCount {
        /// Which side has the wrong king count.
        color: Color,
        /// Number of kings found.
        count: usize,
    },
    /// Pawns occupy the first or eighth rank with no promotion pending.
    #[error("pawns found on back rank")]
    PawnsOnBackRank,
    /// Two pieces were placed on the same square.
    #[error("more than one piece placed on {square}")]
    OverlappingPieces {
        /// The contested square.
        square: Square,
    },
    /// A piece token is not of the form `{color}-{kind}`.
    #[error("invalid piece token: \"{token}\"")]
    InvalidPieceToken {
        /// The token that failed to parse.
        token: String,
    },
    /// A promotion choice names a piece a pawn cannot become.
    #[error("cannot promote to \"{token}\"")]
    InvalidPromotionPiece {
        /// The rejected piece name.
        token: String,
    },
    /// The pending promotion does not name a pawn of the side that just moved
    /// standing on its last rank.
    #[error("invalid pending promotion to {square}")]
    InvalidPendingPromotion {
        /// The promotion square recorded in the snapshot.
        square: Square,
    },
    /// The en passant target is not behind a pawn that just advanced two squares.
    #[error("invalid en passant target: {square}")]
    InvalidEnPassant {
        /// The offending target square.
        square: Square,
    },
}

/// Rejections of a [`GameHistory`](crate::history::GameHistory) command.
///
/// Both variants leave the history untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// The move is not legal in the latest position.
    #[error("illegal move: {from}{to}")]
    InvalidMove {
        /// Source square of the attempted move.
        from: Square,
        /// Destination square of the attempted move.
        to: Square,
    },
    /// The command is not accepted in the current phase of the game.
    #[error("cannot {command}: {reason}")]
    IllegalStateTransition {
        /// The rejected command.
        command: &'static str,
        /// Why the history refused it.
        reason: &'static str,
    },
}

/// Errors from rebuilding a history out of stored snapshots.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    /// A history must contain at least the initial snapshot.
    #[error("history has no snapshots")]
    EmptyHistory,
    /// A promotion is pending on a snapshot that is not the latest.
    #[error("snapshot {index} has a pending promotion but is not the latest")]
    StalePendingPromotion {
        /// Position of the offending snapshot.
        index: usize,
    },
    /// One of the snapshots fails validation.
    #[error("snapshot {index} is invalid: {source}")]
    InvalidSnapshot {
        /// Position of the snapshot in the history.
        index: usize,
        /// The underlying validation error.
        source: BoardError,
    },
}
