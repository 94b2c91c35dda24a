//! Crate-level error types.

use std::fmt;

/// Errors produced by the vantage crate.
#[derive(Debug)]
pub enum AnchorError {
    /// Unknown anchor, body or parent name.
    Lookup(String),
    /// Missing or malformed required field, or an out-of-range argument.
    Validation(String),
    /// Operation not allowed in the current state (moving, on a body, active
    /// anchor).
    StateConflict(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Malformed anchor or camera position file.
    Parse(String),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for AnchorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lookup(msg) => write!(f, "lookup failure: {msg}"),
            Self::Validation(msg) => write!(f, "invalid parameters: {msg}"),
            Self::StateConflict(msg) => {
                write!(f, "operation not allowed now: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for AnchorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AnchorError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl AnchorError {
    /// Build a [`Lookup`](Self::Lookup) error and log it as a warning.
    pub(crate) fn lookup(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        log::warn!("{msg}");
        Self::Lookup(msg)
    }

    /// Build a [`Validation`](Self::Validation) error and log it as a
    /// warning.
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        log::warn!("{msg}");
        Self::Validation(msg)
    }

    /// Build a [`StateConflict`](Self::StateConflict) error and log it as a
    /// warning.
    pub(crate) fn conflict(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        log::warn!("{msg}");
        Self::StateConflict(msg)
    }
}
