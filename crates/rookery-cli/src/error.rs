//! Session protocol errors.

use rookery_core::GameError;

/// Errors that can occur while parsing or executing a session command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The first word of the line is not a known command.
    #[error("unknown command: {name}")]
    UnknownCommand {
        /// The unrecognized command word.
        name: String,
    },

    /// A required argument was not supplied.
    #[error("{command} requires {what}")]
    MissingArgument {
        /// The command missing an argument.
        command: &'static str,
        /// Description of the missing argument.
        what: &'static str,
    },

    /// A square name is not in `a1`..`h8`.
    #[error("invalid square: {value}")]
    InvalidSquare {
        /// The token that failed to parse.
        value: String,
    },

    /// A promotion choice is not one of queen, rook, bishop, knight.
    #[error("invalid promotion piece: {value}")]
    InvalidPromotion {
        /// The token that failed to parse.
        value: String,
    },

    /// A color is not `white` or `black`.
    #[error("invalid color: {value}")]
    InvalidColor {
        /// The token that failed to parse.
        value: String,
    },

    /// A draw reason is not `agreement` or `insufficient-material`.
    #[error("invalid draw reason: {value}")]
    InvalidDrawReason {
        /// The token that failed to parse.
        value: String,
    },

    /// A snapshot index is not a number.
    #[error("invalid index: {value}")]
    InvalidIndex {
        /// The token that failed to parse.
        value: String,
    },

    /// The requested snapshot does not exist.
    #[error("no snapshot {index}: history has {len}")]
    NoSuchSnapshot {
        /// The requested index.
        index: usize,
        /// Number of snapshots in the history.
        len: usize,
    },

    /// The `set` command names an unknown option.
    #[error("unknown option: {name}")]
    UnknownOption {
        /// The option name.
        name: String,
    },

    /// An option value is not `on` or `off`.
    #[error("invalid value for {name}: {value}")]
    InvalidOptionValue {
        /// The option name.
        name: String,
        /// The rejected value.
        value: String,
    },

    /// The game history refused the command.
    #[error(transparent)]
    Game(#[from] GameError),

    /// History JSON could not be read or written.
    #[error("JSON error: {source}")]
    Json {
        /// The underlying serde error.
        #[from]
        source: serde_json::Error,
    },

    /// An I/O error occurred while reading input or writing output.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
