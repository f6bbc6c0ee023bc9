//! The commands the server recognises, as a typed variant per verb.

use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Command {
    User {
        /// The username the client wants to log in as.
        username: String,
    },
    Pass {
        /// The password belonging to the previously given username.
        password: String,
    },
    Quit,
    Feat,
    Syst,
    Pwd,
    Cdup,
    Cwd {
        /// The path the client would like to change directory to.
        path: String,
    },
    Mkd {
        /// The path of the directory the client wants to create.
        path: String,
    },
    Rmd {
        /// The path of the directory to remove.
        path: String,
    },
    Dele {
        /// The (regular) file to delete.
        path: String,
    },
    Rnfr {
        /// The file to be renamed.
        path: String,
    },
    Rnto {
        /// The name to rename to.
        path: String,
    },
    Type {
        /// The raw representation-type parameter; only `I` and `A` are
        /// accepted, the handler rejects anything else.
        param: String,
    },
    Pasv,
    List {
        /// The path the client wants listed; the session's current
        /// directory when absent.
        path: Option<String>,
    },
    Retr {
        /// The path of the file the client would like to retrieve.
        path: String,
    },
    Stor {
        /// The path of the file the client would like to store.
        path: String,
    },
}

impl Command {
    /// The canonical four-letter-or-shorter verb for this command.
    pub fn verb(&self) -> &'static str {
        match self {
            Command::User { .. } => "USER",
            Command::Pass { .. } => "PASS",
            Command::Quit => "QUIT",
            Command::Feat => "FEAT",
            Command::Syst => "SYST",
            Command::Pwd => "PWD",
            Command::Cdup => "CDUP",
            Command::Cwd { .. } => "CWD",
            Command::Mkd { .. } => "MKD",
            Command::Rmd { .. } => "RMD",
            Command::Dele { .. } => "DELE",
            Command::Rnfr { .. } => "RNFR",
            Command::Rnto { .. } => "RNTO",
            Command::Type { .. } => "TYPE",
            Command::Pasv => "PASV",
            Command::List { .. } => "LIST",
            Command::Retr { .. } => "RETR",
            Command::Stor { .. } => "STOR",
        }
    }

    /// The argument as given by the client, or `""` for argument-less
    /// verbs. Recorded per command so `RNTO` can find the path named by an
    /// immediately preceding `RNFR`.
    pub fn argument(&self) -> &str {
        match self {
            Command::User { username } => username,
            Command::Pass { password } => password,
            Command::Cwd { path }
            | Command::Mkd { path }
            | Command::Rmd { path }
            | Command::Dele { path }
            | Command::Rnfr { path }
            | Command::Rnto { path }
            | Command::Retr { path }
            | Command::Stor { path } => path,
            Command::Type { param } => param,
            Command::List { path } => path.as_deref().unwrap_or(""),
            _ => "",
        }
    }

    /// Whether this command may only run after a successful `PASS`.
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            Command::Cwd { .. }
                | Command::Mkd { .. }
                | Command::Rmd { .. }
                | Command::Dele { .. }
                | Command::Rnfr { .. }
                | Command::Rnto { .. }
                | Command::Pasv
                | Command::List { .. }
                | Command::Retr { .. }
                | Command::Stor { .. }
        )
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
