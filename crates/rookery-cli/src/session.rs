//! Line-oriented game session over stdin/stdout.

use std::io::{self, BufRead, Write};

use tracing::{debug, info, warn};

use rookery_core::{GameHistory, MoveOutcome, PlayedMove, Square, Terminal};

use crate::command::{Command, SessionOption, parse_command};
use crate::error::CliError;

/// Configuration knobs adjustable via `set`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionConfig {
    /// Pretty-print JSON from `show` and `save`.
    pub pretty: bool,
    /// Print the board after each committed move.
    pub board: bool,
}

/// A single game driven by text commands.
///
/// Every command runs to completion before the next line is read.
#[derive(Debug, Default)]
pub struct Session {
    history: GameHistory,
    config: SessionConfig,
}

impl Session {
    /// Create a session with a fresh game and default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the game history.
    pub fn history(&self) -> &GameHistory {
        &self.history
    }

    /// Return the current configuration.
    pub fn config(&self) -> SessionConfig {
        self.config
    }

    /// Run the session on stdin/stdout until `quit` or input closes.
    pub fn run(self) -> Result<(), CliError> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(stdin.lock(), stdout.lock())
    }

    /// Run the session over arbitrary line input and output.
    pub fn run_with<R: BufRead, W: Write>(mut self, input: R, mut output: W) -> Result<(), CliError> {
        info!("rookery session started");
        for line in input.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            debug!(cmd = %trimmed, "received command");

            let response = match parse_command(trimmed) {
                Ok(Command::Quit) => break,
                Ok(cmd) => self.handle(cmd),
                Err(e) => Err(e),
            };
            match response {
                Ok(lines) => {
                    for line in lines {
                        writeln!(output, "{line}")?;
                    }
                }
                Err(e) => {
                    warn!(error = %e, "command rejected");
                    writeln!(output, "error {e}")?;
                }
            }
            output.flush()?;
        }
        info!("rookery shutting down");
        Ok(())
    }

    /// Execute one command and return the lines to print.
    ///
    /// A rejected command leaves the history untouched.
    pub fn handle(&mut self, cmd: Command) -> Result<Vec<String>, CliError> {
        match cmd {
            Command::New => {
                self.history.reset();
                Ok(vec!["ok".to_string()])
            }
            Command::Moves(sq) => Ok(vec![self.handle_moves(sq)]),
            Command::Move { from, to } => {
                let outcome = self.history.apply_move(from, to)?;
                Ok(match outcome {
                    MoveOutcome::Played(played) => self.played_lines(&played),
                    MoveOutcome::AwaitingPromotion(pending) => {
                        vec![format!("promote? {}{}", pending.from, pending.to)]
                    }
                })
            }
            Command::Promote(choice) => {
                let played = self.history.resolve_promotion(choice)?;
                Ok(self.played_lines(&played))
            }
            Command::Takeback => {
                self.history.takeback()?;
                Ok(vec!["ok".to_string()])
            }
            Command::Complete { reason, winner } => {
                let terminal = self.history.force_complete(reason, winner)?;
                Ok(vec![result_line(terminal)])
            }
            Command::Show(index) => {
                let index = index.unwrap_or(self.history.len() - 1);
                let snapshot = self.history.get(index).ok_or(CliError::NoSuchSnapshot {
                    index,
                    len: self.history.len(),
                })?;
                Ok(vec![self.to_json(snapshot)?])
            }
            Command::History => Ok(self.history.move_list().iter().map(ToString::to_string).collect()),
            Command::Save => Ok(vec![self.to_json(&self.history)?]),
            Command::Load(history) => {
                self.history = *history;
                info!(len = self.history.len(), "history loaded");
                Ok(vec!["ok".to_string()])
            }
            Command::Set(option) => {
                match option {
                    SessionOption::Pretty(on) => self.config.pretty = on,
                    SessionOption::Board(on) => self.config.board = on,
                }
                debug!(?option, "option set");
                Ok(vec!["ok".to_string()])
            }
            Command::Quit => Ok(Vec::new()),
        }
    }

    fn handle_moves(&self, sq: Square) -> String {
        let targets: Vec<String> = self.history.legal_moves(sq).iter().map(ToString::to_string).collect();
        if targets.is_empty() {
            format!("moves {sq}:")
        } else {
            format!("moves {sq}: {}", targets.join(" "))
        }
    }

    fn played_lines(&self, played: &PlayedMove) -> Vec<String> {
        let classes: Vec<String> = played.classes.iter().map(ToString::to_string).collect();
        let mut lines = vec![format!("played {} {}", played.notation, classes.join(" "))];
        if self.config.board {
            lines.extend(self.history.latest().pretty().to_string().lines().map(str::to_owned));
        }
        if let Some(terminal) = played.terminal {
            lines.push(result_line(terminal));
        }
        lines
    }

    fn to_json<T: serde::Serialize + ?Sized>(&self, value: &T) -> Result<String, CliError> {
        let json = if self.config.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }
}

fn result_line(terminal: Terminal) -> String {
    match terminal.winner {
        Some(winner) => format!("result {} {winner}", terminal.reason),
        None => format!("result {} none", terminal.reason),
    }
}
