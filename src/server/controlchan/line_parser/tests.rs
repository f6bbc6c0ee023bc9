use super::error::{ParseError, ParseErrorKind};
use super::parser::parse;
use crate::server::controlchan::command::Command;

use pretty_assertions::assert_eq;

#[test]
fn parse_user_cmd() {
    assert_eq!(
        parse("USER Dolores").unwrap(),
        Command::User {
            username: "Dolores".into()
        }
    );
}

#[test]
fn parse_user_cmd_mixed_case() {
    assert_eq!(
        parse("uSeR Dolores").unwrap(),
        Command::User {
            username: "Dolores".into()
        }
    );
}

#[test]
fn parse_user_cmd_double_space() {
    // Leading whitespace before the argument is not significant.
    assert_eq!(
        parse("USER  Dolores").unwrap(),
        Command::User {
            username: "Dolores".into()
        }
    );
}

#[test]
fn parse_user_cmd_internal_whitespace() {
    assert_eq!(
        parse("USER Dolores Abernathy").unwrap(),
        Command::User {
            username: "Dolores Abernathy".into()
        }
    );
}

#[test]
fn parse_pass_cmd() {
    assert_eq!(
        parse("PASS s3cr#t p@S$w0rd").unwrap(),
        Command::Pass {
            password: "s3cr#t p@S$w0rd".into()
        }
    );
}

#[test]
fn parse_quit_with_params_is_invalid() {
    assert_eq!(
        parse("QUIT now"),
        Err(ParseError::from(ParseErrorKind::InvalidCommand))
    );
}

#[test]
fn parse_pasv() {
    assert_eq!(parse("PASV").unwrap(), Command::Pasv);
}

#[test]
fn parse_type_keeps_raw_param() {
    assert_eq!(parse("TYPE I").unwrap(), Command::Type { param: "I".into() });
    assert_eq!(parse("type a").unwrap(), Command::Type { param: "a".into() });
    assert_eq!(parse("TYPE X Y").unwrap(), Command::Type { param: "X Y".into() });
}

#[test]
fn parse_list_with_and_without_path() {
    assert_eq!(parse("LIST").unwrap(), Command::List { path: None });
    assert_eq!(
        parse("LIST pub").unwrap(),
        Command::List {
            path: Some("pub".into())
        }
    );
}

#[test]
fn parse_retr_empty_path_is_accepted() {
    // Empty paths are the handler's business; it answers with the
    // command-specific failure reply rather than a syntax error.
    assert_eq!(parse("RETR").unwrap(), Command::Retr { path: "".into() });
}

#[test]
fn parse_unknown_command() {
    assert_eq!(
        parse("NOOP"),
        Err(ParseError::from(ParseErrorKind::UnknownCommand {
            command: "NOOP".into()
        }))
    );
}

#[test]
fn parse_empty_line() {
    assert_eq!(
        parse(""),
        Err(ParseError::from(ParseErrorKind::UnknownCommand { command: "".into() }))
    );
}

#[test]
fn parse_cwd_dotdot() {
    assert_eq!(parse("CWD ..").unwrap(), Command::Cwd { path: "..".into() });
}
