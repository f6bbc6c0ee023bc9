//! The control channel error type.

use super::line_parser::{ParseError, ParseErrorKind};

use derive_more::Display;
use thiserror::Error;

/// The error type produced by the control channel machinery.
#[derive(Debug, Error)]
#[error("control channel error: {kind}")]
pub struct ControlChanError {
    kind: ControlChanErrorKind,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

/// Categories of control channel errors.
#[derive(Eq, PartialEq, Debug, Display)]
pub enum ControlChanErrorKind {
    /// We encountered a system IO error.
    #[display("failed to perform IO")]
    IoError,
    /// The peer went away: a read or write hit a broken pipe or a
    /// connection reset. Ends the session cleanly, never the process.
    #[display("peer closed the connection")]
    PeerGone,
    /// We encountered a non-UTF8 character in a command.
    #[display("non-UTF8 character in command")]
    Utf8Error,
    /// The client issued a command we don't know about.
    #[display("unknown command: {}", command)]
    UnknownCommand {
        /// The verb that we don't know about.
        command: String,
    },
    /// The client issued a command that we know about, but in an invalid
    /// way (e.g. `RETR` without a path).
    #[display("invalid command (invalid parameter)")]
    InvalidCommand,
}

impl ControlChanError {
    pub fn new(kind: ControlChanErrorKind) -> Self {
        ControlChanError { kind, source: None }
    }

    /// Return the inner error kind of this error.
    pub fn kind(&self) -> &ControlChanErrorKind {
        &self.kind
    }
}

impl From<ControlChanErrorKind> for ControlChanError {
    fn from(kind: ControlChanErrorKind) -> ControlChanError {
        ControlChanError { kind, source: None }
    }
}

impl From<std::io::Error> for ControlChanError {
    fn from(err: std::io::Error) -> ControlChanError {
        use std::io::ErrorKind;
        let kind = match err.kind() {
            ErrorKind::BrokenPipe | ErrorKind::ConnectionReset | ErrorKind::ConnectionAborted => {
                ControlChanErrorKind::PeerGone
            }
            _ => ControlChanErrorKind::IoError,
        };
        ControlChanError {
            kind,
            source: Some(Box::new(err)),
        }
    }
}

impl From<std::str::Utf8Error> for ControlChanError {
    fn from(err: std::str::Utf8Error) -> ControlChanError {
        ControlChanError {
            kind: ControlChanErrorKind::Utf8Error,
            source: Some(Box::new(err)),
        }
    }
}

impl From<ParseError> for ControlChanError {
    fn from(err: ParseError) -> ControlChanError {
        let kind = match err.kind() {
            ParseErrorKind::InvalidUtf8 => ControlChanErrorKind::Utf8Error,
            ParseErrorKind::UnknownCommand { command } => ControlChanErrorKind::UnknownCommand {
                command: command.clone(),
            },
            ParseErrorKind::InvalidCommand => ControlChanErrorKind::InvalidCommand,
        };
        ControlChanError {
            kind,
            source: Some(Box::new(err)),
        }
    }
}
