//! Session command parsing.

use rookery_core::{Color, GameHistory, PromotionPiece, Square, TerminalReason};

use crate::error::CliError;

/// A runtime option adjustable with `set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOption {
    /// `set pretty on|off` -- pretty-print JSON output.
    Pretty(bool),
    /// `set board on|off` -- print the board after each committed move.
    Board(bool),
}

/// A parsed session command.
#[derive(Debug)]
pub enum Command {
    /// `new` / `reset` -- back to the initial position.
    New,
    /// `moves <sq>` -- list legal destinations.
    Moves(Square),
    /// `move e2e4` or `move e2 e4` -- play a move.
    Move { from: Square, to: Square },
    /// `promote <piece>` -- resolve a pending promotion.
    Promote(PromotionPiece),
    /// `takeback` -- undo the latest snapshot.
    Takeback,
    /// `resign|timeout|abandon <color>` or `draw [reason]` -- end the game.
    Complete {
        reason: TerminalReason,
        winner: Option<Color>,
    },
    /// `show [index]` -- print a snapshot as JSON.
    Show(Option<usize>),
    /// `history` -- print the numbered move list.
    History,
    /// `save` -- print the whole history as JSON.
    Save,
    /// `load <json>` -- replace the history.
    Load(Box<GameHistory>),
    /// `set <name> <value>` -- adjust a session option.
    Set(SessionOption),
    /// `quit` -- end the session.
    Quit,
}

/// Parse a single line of input into a [`Command`].
pub fn parse_command(line: &str) -> Result<Command, CliError> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let tokens: Vec<&str> = rest.split_whitespace().collect();

    match word {
        "new" | "reset" => Ok(Command::New),
        "moves" => {
            let sq = tokens.first().ok_or(CliError::MissingArgument {
                command: "moves",
                what: "a square",
            })?;
            Ok(Command::Moves(parse_square(sq)?))
        }
        "move" => parse_move(&tokens),
        "promote" => {
            let value = tokens.first().ok_or(CliError::MissingArgument {
                command: "promote",
                what: "a piece",
            })?;
            let piece = value.parse().map_err(|_| CliError::InvalidPromotion {
                value: value.to_string(),
            })?;
            Ok(Command::Promote(piece))
        }
        "takeback" => Ok(Command::Takeback),
        "resign" => parse_loss(&tokens, "resign", TerminalReason::Resignation),
        "timeout" => parse_loss(&tokens, "timeout", TerminalReason::Timeout),
        "abandon" => parse_loss(&tokens, "abandon", TerminalReason::Abandonment),
        "draw" => {
            let reason = match tokens.first() {
                None | Some(&"agreement") => TerminalReason::Agreement,
                Some(&"insufficient-material") => TerminalReason::InsufficientMaterial,
                Some(other) => {
                    return Err(CliError::InvalidDrawReason {
                        value: other.to_string(),
                    });
                }
            };
            Ok(Command::Complete {
                reason,
                winner: None,
            })
        }
        "show" => match tokens.first() {
            None => Ok(Command::Show(None)),
            Some(value) => {
                let index = value.parse().map_err(|_| CliError::InvalidIndex {
                    value: value.to_string(),
                })?;
                Ok(Command::Show(Some(index)))
            }
        },
        "history" => Ok(Command::History),
        "save" => Ok(Command::Save),
        "load" => {
            if rest.is_empty() {
                return Err(CliError::MissingArgument {
                    command: "load",
                    what: "history JSON",
                });
            }
            let history: GameHistory = serde_json::from_str(rest)?;
            Ok(Command::Load(Box::new(history)))
        }
        "set" => parse_set(&tokens),
        "quit" => Ok(Command::Quit),
        _ => Err(CliError::UnknownCommand {
            name: word.to_string(),
        }),
    }
}

fn parse_square(value: &str) -> Result<Square, CliError> {
    Square::from_algebraic(value).ok_or_else(|| CliError::InvalidSquare {
        value: value.to_string(),
    })
}

/// Parse `e2e4` or `e2 e4`.
fn parse_move(tokens: &[&str]) -> Result<Command, CliError> {
    let missing = CliError::MissingArgument {
        command: "move",
        what: "a source and destination square",
    };
    let (from, to) = match tokens {
        [joined] if joined.len() == 4 && joined.is_char_boundary(2) => joined.split_at(2),
        [from, to, ..] => (*from, *to),
        [] => return Err(missing),
        [single] => {
            return Err(CliError::InvalidSquare {
                value: single.to_string(),
            });
        }
    };
    Ok(Command::Move {
        from: parse_square(from)?,
        to: parse_square(to)?,
    })
}

/// Parse `<reason> <color>`, where the named color loses.
fn parse_loss(tokens: &[&str], command: &'static str, reason: TerminalReason) -> Result<Command, CliError> {
    let value = tokens.first().ok_or(CliError::MissingArgument {
        command,
        what: "a color",
    })?;
    let loser = Color::from_name(value).ok_or_else(|| CliError::InvalidColor {
        value: value.to_string(),
    })?;
    Ok(Command::Complete {
        reason,
        winner: Some(loser.flip()),
    })
}

fn parse_set(tokens: &[&str]) -> Result<Command, CliError> {
    let [name, value, ..] = tokens else {
        return Err(CliError::MissingArgument {
            command: "set",
            what: "an option name and value",
        });
    };
    let enabled = match *value {
        "on" | "true" => true,
        "off" | "false" => false,
        _ => {
            return Err(CliError::InvalidOptionValue {
                name: name.to_string(),
                value: value.to_string(),
            });
        }
    };
    match *name {
        "pretty" => Ok(Command::Set(SessionOption::Pretty(enabled))),
        "board" => Ok(Command::Set(SessionOption::Board(enabled))),
        _ => Err(CliError::UnknownOption {
            name: name.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_new_and_reset() {
        assert!(matches!(parse_command("new").unwrap(), Command::New));
        assert!(matches!(parse_command("reset").unwrap(), Command::New));
    }

    #[test]
    fn parse_quit() {
        assert!(matches!(parse_command("quit").unwrap(), Command::Quit));
    }

    #[test]
    fn parse_moves_query() {
        assert!(matches!(parse_command("moves e2").unwrap(), Command::Moves(Square::E2)));
        assert!(matches!(
            parse_command("moves"),
            Err(CliError::MissingArgument { command: "moves", .. })
        ));
        assert!(matches!(parse_command("moves z9"), Err(CliError::InvalidSquare { .. })));
    }

    #[test]
    fn parse_move_joined_and_split() {
        assert!(matches!(
            parse_command("move e2e4").unwrap(),
            Command::Move {
                from: Square::E2,
                to: Square::E4
            }
        ));
        assert!(matches!(
            parse_command("move  g1   f3").unwrap(),
            Command::Move {
                from: Square::G1,
                to: Square::F3
            }
        ));
    }

    #[test]
    fn parse_move_errors() {
        assert!(matches!(parse_command("move"), Err(CliError::MissingArgument { .. })));
        assert!(matches!(parse_command("move e2"), Err(CliError::InvalidSquare { .. })));
        assert!(matches!(parse_command("move e2e9"), Err(CliError::InvalidSquare { .. })));
    }

    #[test]
    fn parse_promote() {
        assert!(matches!(
            parse_command("promote queen").unwrap(),
            Command::Promote(PromotionPiece::Queen)
        ));
        assert!(matches!(
            parse_command("promote knight").unwrap(),
            Command::Promote(PromotionPiece::Knight)
        ));
        assert!(matches!(parse_command("promote king"), Err(CliError::InvalidPromotion { .. })));
    }

    #[test]
    fn parse_losses_name_the_loser() {
        assert!(matches!(
            parse_command("resign white").unwrap(),
            Command::Complete {
                reason: TerminalReason::Resignation,
                winner: Some(Color::Black)
            }
        ));
        assert!(matches!(
            parse_command("timeout black").unwrap(),
            Command::Complete {
                reason: TerminalReason::Timeout,
                winner: Some(Color::White)
            }
        ));
        assert!(matches!(
            parse_command("abandon black").unwrap(),
            Command::Complete {
                reason: TerminalReason::Abandonment,
                winner: Some(Color::White)
            }
        ));
        assert!(matches!(parse_command("resign purple"), Err(CliError::InvalidColor { .. })));
    }

    #[test]
    fn parse_draws() {
        assert!(matches!(
            parse_command("draw").unwrap(),
            Command::Complete {
                reason: TerminalReason::Agreement,
                winner: None
            }
        ));
        assert!(matches!(
            parse_command("draw insufficient-material").unwrap(),
            Command::Complete {
                reason: TerminalReason::InsufficientMaterial,
                winner: None
            }
        ));
        assert!(matches!(parse_command("draw stalemate"), Err(CliError::InvalidDrawReason { .. })));
    }

    #[test]
    fn parse_show() {
        assert!(matches!(parse_command("show").unwrap(), Command::Show(None)));
        assert!(matches!(parse_command("show 3").unwrap(), Command::Show(Some(3))));
        assert!(matches!(parse_command("show -1"), Err(CliError::InvalidIndex { .. })));
    }

    #[test]
    fn parse_load_roundtrips_history() {
        let mut history = GameHistory::new();
        history.apply_move(Square::E2, Square::E4).unwrap();
        let json = serde_json::to_string(&history).unwrap();

        match parse_command(&format!("load {json}")).unwrap() {
            Command::Load(loaded) => assert_eq!(*loaded, history),
            other => panic!("expected Load, got {other:?}"),
        }
        assert!(matches!(parse_command("load"), Err(CliError::MissingArgument { .. })));
        assert!(matches!(parse_command("load []"), Err(CliError::Json { .. })));
        assert!(matches!(parse_command("load {"), Err(CliError::Json { .. })));
    }

    #[test]
    fn parse_set_options() {
        assert!(matches!(
            parse_command("set pretty on").unwrap(),
            Command::Set(SessionOption::Pretty(true))
        ));
        assert!(matches!(
            parse_command("set board off").unwrap(),
            Command::Set(SessionOption::Board(false))
        ));
        assert!(matches!(parse_command("set colour on"), Err(CliError::UnknownOption { .. })));
        assert!(matches!(parse_command("set pretty maybe"), Err(CliError::InvalidOptionValue { .. })));
        assert!(matches!(parse_command("set pretty"), Err(CliError::MissingArgument { .. })));
    }

    #[test]
    fn parse_unknown_command() {
        assert!(matches!(
            parse_command("foobar"),
            Err(CliError::UnknownCommand { name }) if name == "foobar"
        ));
    }
}
