use derive_more::Display;
use thiserror::Error;

/// The error returned when a command line cannot be parsed.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("parse error: {kind}")]
pub struct ParseError {
    kind: ParseErrorKind,
}

/// Categories of command line parse errors.
#[derive(Debug, Display, PartialEq, Eq, Clone)]
pub enum ParseErrorKind {
    /// The client sent a verb we do not recognise.
    #[display("unknown command `{}`", command)]
    UnknownCommand {
        /// The verb as the client sent it.
        command: String,
    },
    /// A recognised verb with parameters that make no sense for it.
    #[display("invalid parameters")]
    InvalidCommand,
    /// The line contains bytes that are not valid UTF-8.
    #[display("invalid UTF-8")]
    InvalidUtf8,
}

impl ParseError {
    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }
}

impl From<ParseErrorKind> for ParseError {
    fn from(kind: ParseErrorKind) -> Self {
        ParseError { kind }
    }
}
