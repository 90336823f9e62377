//! Game history: an append-only sequence of position snapshots.
//!
//! [`GameHistory`] owns every command that changes a game. Snapshots already in
//! the history are never mutated, with two exceptions that replace the latest
//! one: resolving a pending promotion and forcing the game to complete.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use tracing::{debug, trace};

use crate::attacks::is_in_check;
use crate::board::{BoardState, PendingPromotion, Terminal, TerminalReason};
use crate::chess_move::{MoveRecord, PromotionPiece};
use crate::color::Color;
use crate::error::{GameError, SnapshotError};
use crate::movegen;
use crate::notation::encode;
use crate::outcome::evaluate;
use crate::square::Square;

/// Where a game stands, derived from its latest snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Moves are accepted.
    Active,
    /// A pawn reached its last rank and needs a replacement piece.
    AwaitingPromotionChoice,
    /// The latest snapshot carries a terminal result.
    Completed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Active => "active",
            Phase::AwaitingPromotionChoice => "awaiting-promotion",
            Phase::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// How a played move should be presented (sound, highlight, animation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveClass {
    Move,
    Capture,
    Check,
    Castle,
    Promote,
}

impl fmt::Display for MoveClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MoveClass::Move => "move",
            MoveClass::Capture => "capture",
            MoveClass::Check => "check",
            MoveClass::Castle => "castle",
            MoveClass::Promote => "promote",
        };
        f.write_str(name)
    }
}

/// A move committed to the history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayedMove {
    pub notation: String,
    /// Presentation classes, most significant first.
    pub classes: Vec<MoveClass>,
    /// Set when the move ended the game.
    pub terminal: Option<Terminal>,
}

/// Result of [`GameHistory::apply_move`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move is complete.
    Played(PlayedMove),
    /// The pawn is on its last rank; call [`GameHistory::resolve_promotion`].
    AwaitingPromotion(PendingPromotion),
}

/// One numbered line of the move list, e.g. `1. e4 e5`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveListEntry {
    pub number: usize,
    pub white: Option<String>,
    pub black: Option<String>,
}

impl fmt::Display for MoveListEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.white, &self.black) {
            (Some(white), Some(black)) => write!(f, "{}. {white} {black}", self.number),
            (Some(white), None) => write!(f, "{}. {white}", self.number),
            (None, Some(black)) => write!(f, "{}... {black}", self.number),
            (None, None) => write!(f, "{}.", self.number),
        }
    }
}

/// Ordered snapshots of one game. Index 0 is the initial position; there is
/// always at least one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<BoardState>")]
pub struct GameHistory {
    snapshots: Vec<BoardState>,
}

impl GameHistory {
    /// Start a game from the standard starting position.
    pub fn new() -> GameHistory {
        GameHistory::from_position(BoardState::starting_position())
    }

    /// Start a game from an arbitrary validated position.
    pub fn from_position(initial: BoardState) -> GameHistory {
        GameHistory {
            snapshots: vec![initial],
        }
    }

    /// Rebuild a history from stored snapshots.
    ///
    /// # Errors
    ///
    /// Fails if `snapshots` is empty, any snapshot does not validate, or a
    /// snapshot other than the latest is waiting on a promotion choice.
    pub fn from_snapshots(snapshots: Vec<BoardState>) -> Result<GameHistory, SnapshotError> {
        let Some(last) = snapshots.len().checked_sub(1) else {
            return Err(SnapshotError::EmptyHistory);
        };
        for (index, snapshot) in snapshots.iter().enumerate() {
            snapshot
                .validate()
                .map_err(|source| SnapshotError::InvalidSnapshot { index, source })?;
            if index != last && snapshot.pending_promotion().is_some() {
                return Err(SnapshotError::StalePendingPromotion { index });
            }
        }
        Ok(GameHistory { snapshots })
    }

    /// Return the current position.
    pub fn latest(&self) -> &BoardState {
        // Never empty: every constructor installs an initial snapshot and
        // takeback refuses to remove it.
        &self.snapshots[self.snapshots.len() - 1]
    }

    /// Return the snapshot at `index`, 0 being the initial position.
    pub fn get(&self, index: usize) -> Option<&BoardState> {
        self.snapshots.get(index)
    }

    /// Number of snapshots, including the initial one.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Return `true` if there are no snapshots, which a constructed history never has.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// All snapshots in order.
    pub fn snapshots(&self) -> &[BoardState] {
        &self.snapshots
    }

    /// Return the phase the game is in.
    pub fn phase(&self) -> Phase {
        let latest = self.latest();
        if latest.terminal().is_some() {
            Phase::Completed
        } else if latest.pending_promotion().is_some() {
            Phase::AwaitingPromotionChoice
        } else {
            Phase::Active
        }
    }

    /// Legal destinations of the piece on `from` in the current position.
    ///
    /// Empty unless the game is active.
    pub fn legal_moves(&self, from: Square) -> Vec<Square> {
        if self.phase() != Phase::Active {
            return Vec::new();
        }
        movegen::legal_moves(self.latest(), from)
    }

    /// Return `true` if `from -> to` would be accepted by [`apply_move`](Self::apply_move).
    pub fn is_legal(&self, from: Square, to: Square) -> bool {
        self.phase() == Phase::Active && movegen::is_legal(self.latest(), from, to)
    }

    /// Play `from -> to`.
    ///
    /// # Errors
    ///
    /// [`GameError::IllegalStateTransition`] while a promotion is pending or the
    /// game is over; [`GameError::InvalidMove`] when the piece on `from` does not
    /// belong to the side to move or `to` is not one of its legal destinations.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Result<MoveOutcome, GameError> {
        self.apply_move_at(from, to, None)
    }

    /// Play `from -> to`, stamping the move with a caller-supplied time.
    ///
    /// # Errors
    ///
    /// Same as [`apply_move`](Self::apply_move).
    pub fn apply_move_at(
        &mut self,
        from: Square,
        to: Square,
        timestamp_ms: Option<u64>,
    ) -> Result<MoveOutcome, GameError> {
        self.require_active("move")?;

        let before = self.latest();
        let owned = before
            .piece_at(from)
            .is_some_and(|piece| piece.color() == before.side_to_move());
        let Some(dest) = movegen::find_destination(before, from, to).filter(|_| owned) else {
            trace!(%from, %to, "move rejected");
            return Err(GameError::InvalidMove { from, to });
        };

        let mut next = before.make_move(from, dest);
        next.set_last_move(Some(MoveRecord {
            from,
            to,
            promotion: None,
            timestamp_ms,
        }));

        if let Some(pending) = next.pending_promotion() {
            debug!(%from, %to, "awaiting promotion choice");
            self.snapshots.push(next);
            return Ok(MoveOutcome::AwaitingPromotion(pending));
        }

        let terminal = evaluate(&next);
        let is_check = is_in_check(&next, next.side_to_move());
        let is_mate = terminal.is_some_and(|t| t.reason == TerminalReason::Checkmate);
        let notation = encode(before, &next, from, to, is_check, is_mate, false);

        let class = if is_check {
            MoveClass::Check
        } else if dest.is_castle() {
            MoveClass::Castle
        } else if before.piece_at(to).is_some() || dest.is_en_passant() {
            MoveClass::Capture
        } else {
            MoveClass::Move
        };

        next.set_last_notation(Some(notation.clone()));
        next.set_terminal(terminal);
        debug!(%from, %to, %notation, "move applied");
        self.snapshots.push(next);

        Ok(MoveOutcome::Played(PlayedMove {
            notation,
            classes: vec![class],
            terminal,
        }))
    }

    /// Replace the pawn awaiting promotion with `choice`.
    ///
    /// The latest snapshot is replaced rather than a new one appended, so the
    /// promotion and the pawn move it completes occupy a single ply.
    ///
    /// # Errors
    ///
    /// [`GameError::IllegalStateTransition`] unless a promotion is pending.
    pub fn resolve_promotion(&mut self, choice: PromotionPiece) -> Result<PlayedMove, GameError> {
        const REJECTED: GameError = GameError::IllegalStateTransition {
            command: "promote",
            reason: "no promotion is pending",
        };
        if self.phase() != Phase::AwaitingPromotionChoice {
            trace!(%choice, "promotion rejected");
            return Err(REJECTED);
        }

        let pending_snapshot = self.latest();
        let (Some(pending), Some(mut promoted)) = (
            pending_snapshot.pending_promotion(),
            pending_snapshot.promote(choice),
        ) else {
            return Err(REJECTED);
        };

        let terminal = evaluate(&promoted);
        let is_check = is_in_check(&promoted, promoted.side_to_move());
        let is_mate = terminal.is_some_and(|t| t.reason == TerminalReason::Checkmate);
        let notation = encode(
            pending_snapshot,
            &promoted,
            pending.from,
            pending.to,
            is_check,
            is_mate,
            true,
        );

        let mut classes = vec![MoveClass::Promote];
        if is_check {
            classes.push(MoveClass::Check);
        } else if pending.from.col() != pending.to.col() {
            classes.push(MoveClass::Capture);
        }

        promoted.set_last_notation(Some(notation.clone()));
        promoted.set_terminal(terminal);
        debug!(%choice, %notation, "promotion resolved");
        self.replace_latest(promoted);

        Ok(PlayedMove {
            notation,
            classes,
            terminal,
        })
    }

    /// Remove the latest snapshot.
    ///
    /// Also used to abandon a pending promotion.
    ///
    /// # Errors
    ///
    /// [`GameError::IllegalStateTransition`] when only the initial snapshot is left.
    pub fn takeback(&mut self) -> Result<(), GameError> {
        if self.snapshots.len() == 1 {
            trace!("takeback rejected");
            return Err(GameError::IllegalStateTransition {
                command: "take back",
                reason: "no moves have been played",
            });
        }
        self.snapshots.pop();
        debug!(len = self.snapshots.len(), "move taken back");
        Ok(())
    }

    /// End the game for a reason outside the rules of movement (resignation,
    /// timeout, agreement, and so on). The grid is left unchanged.
    ///
    /// # Errors
    ///
    /// [`GameError::IllegalStateTransition`] if the game has already ended.
    pub fn force_complete(&mut self, reason: TerminalReason, winner: Option<Color>) -> Result<Terminal, GameError> {
        if self.phase() == Phase::Completed {
            trace!(%reason, "completion rejected");
            return Err(GameError::IllegalStateTransition {
                command: "complete",
                reason: "the game is already over",
            });
        }
        let terminal = Terminal::new(reason, winner);
        let mut finished = self.latest().clone();
        finished.set_terminal(Some(terminal));
        debug!(%reason, ?winner, "game completed");
        self.replace_latest(finished);
        Ok(terminal)
    }

    /// Drop every snapshot but the initial one.
    pub fn reset(&mut self) {
        self.snapshots.truncate(1);
        debug!("history reset");
    }

    /// Notation of every completed move, grouped by move number.
    pub fn move_list(&self) -> Vec<MoveListEntry> {
        let mut entries: Vec<MoveListEntry> = Vec::new();
        for pair in self.snapshots.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            let Some(san) = next.last_notation() else {
                continue;
            };
            let san = san.to_owned();
            match prev.side_to_move() {
                Color::White => entries.push(MoveListEntry {
                    number: entries.len() + 1,
                    white: Some(san),
                    black: None,
                }),
                Color::Black => match entries.last_mut() {
                    Some(entry) if entry.black.is_none() => entry.black = Some(san),
                    _ => entries.push(MoveListEntry {
                        number: entries.len() + 1,
                        white: None,
                        black: Some(san),
                    }),
                },
            }
        }
        entries
    }

    fn require_active(&self, command: &'static str) -> Result<(), GameError> {
        let reason = match self.phase() {
            Phase::Active => return Ok(()),
            Phase::AwaitingPromotionChoice => "a promotion choice is pending",
            Phase::Completed => "the game is over",
        };
        trace!(command, reason, "command rejected");
        Err(GameError::IllegalStateTransition { command, reason })
    }

    fn replace_latest(&mut self, snapshot: BoardState) {
        if let Some(last) = self.snapshots.last_mut() {
            *last = snapshot;
        }
    }
}

impl Default for GameHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Vec<BoardState>> for GameHistory {
    type Error = SnapshotError;

    fn try_from(snapshots: Vec<BoardState>) -> Result<GameHistory, SnapshotError> {
        GameHistory::from_snapshots(snapshots)
    }
}

impl Serialize for GameHistory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.snapshots.serialize(serializer)
    }
}
