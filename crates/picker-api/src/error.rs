use std::io;

use thiserror::Error;

/// Failures reported by a [`PickerHost`](crate::PickerHost).
#[derive(Debug, Error)]
pub enum HostError {
    #[error("cannot spawn an empty command")]
    EmptyCommand,

    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] io::Error),

    /// A bound action (and therefore a directory handler) returned an error.
    #[error("picker action failed: {0:#}")]
    Action(anyhow::Error),

    #[error("input event channel disconnected")]
    Disconnected,
}

/// Errors produced while parsing key notation such as `<C-t>`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyParseError {
    #[error("key sequence is empty")]
    Empty,

    #[error("unterminated key notation starting at byte {position}")]
    Unterminated { position: usize },

    #[error("unknown key name `{name}`")]
    UnknownKey { name: String },

    #[error("unknown modifier `{modifier}` in `{notation}`")]
    UnknownModifier { modifier: char, notation: String },
}
