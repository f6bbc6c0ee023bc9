use super::error::{ParseError, ParseErrorKind};
use crate::server::controlchan::command::Command;

/// Parse a single command line, already stripped of its terminator, into a
/// [`Command`].
///
/// Verbs are matched case-insensitively (RFC 959 leaves the case open and
/// clients disagree). The argument is everything after the first run of
/// whitespace, with leading whitespace removed.
pub fn parse(line: &str) -> Result<Command, ParseError> {
    let (verb, params) = split_verb(line);
    let verb = verb.to_ascii_uppercase();

    let cmd = match verb.as_str() {
        "USER" => Command::User {
            username: params.to_string(),
        },
        "PASS" => Command::Pass {
            password: params.to_string(),
        },
        "QUIT" => no_params(Command::Quit, params)?,
        "FEAT" => no_params(Command::Feat, params)?,
        "SYST" => no_params(Command::Syst, params)?,
        "PWD" => no_params(Command::Pwd, params)?,
        "CDUP" => no_params(Command::Cdup, params)?,
        "PASV" => no_params(Command::Pasv, params)?,
        "CWD" => Command::Cwd {
            path: params.to_string(),
        },
        "MKD" => Command::Mkd {
            path: params.to_string(),
        },
        "RMD" => Command::Rmd {
            path: params.to_string(),
        },
        "DELE" => Command::Dele {
            path: params.to_string(),
        },
        "RNFR" => Command::Rnfr {
            path: params.to_string(),
        },
        "RNTO" => Command::Rnto {
            path: params.to_string(),
        },
        "TYPE" => Command::Type {
            param: params.to_string(),
        },
        "LIST" => Command::List {
            path: if params.is_empty() {
                None
            } else {
                Some(params.to_string())
            },
        },
        "RETR" => Command::Retr {
            path: params.to_string(),
        },
        "STOR" => Command::Stor {
            path: params.to_string(),
        },
        other => {
            return Err(ParseErrorKind::UnknownCommand {
                command: other.to_string(),
            }
            .into())
        }
    };

    Ok(cmd)
}

/// Splits a line into its verb and its parameter text.
fn split_verb(line: &str) -> (&str, &str) {
    match line.find(|c: char| c.is_ascii_whitespace()) {
        Some(at) => (&line[..at], line[at + 1..].trim_start_matches(|c: char| c.is_ascii_whitespace())),
        None => (line, ""),
    }
}

/// Verbs that take no parameters reject any that are given.
fn no_params(cmd: Command, params: &str) -> Result<Command, ParseError> {
    if params.is_empty() {
        Ok(cmd)
    } else {
        Err(ParseErrorKind::InvalidCommand.into())
    }
}
