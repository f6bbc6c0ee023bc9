//! The RFC 959 Password (`PASS`) command.

use crate::server::controlchan::error::ControlChanError;
use crate::server::controlchan::handler::{CommandContext, CommandHandler};
use crate::server::controlchan::{Reply, ReplyCode};

use async_trait::async_trait;
use slog::info;

#[derive(Debug)]
pub struct Pass {
    password: String,
}

impl Pass {
    pub fn new(password: String) -> Self {
        Pass { password }
    }
}

#[async_trait]
impl CommandHandler for Pass {
    async fn handle(&self, args: CommandContext<'_>) -> Result<Reply, ControlChanError> {
        if args.session.login.is_empty() {
            return Ok(Reply::new(ReplyCode::BadCommandSequence, "Login with USER first."));
        }
        match args.authenticator.authenticate(&args.session.login, &self.password).await {
            Ok(()) => {
                args.session.logged_in = true;
                Ok(Reply::new(ReplyCode::UserLoggedIn, "Login successful."))
            }
            Err(err) => {
                info!(args.logger, "login failed for `{}`: {}", args.session.login, err);
                args.session.logged_in = false;
                Ok(Reply::new(ReplyCode::NotLoggedIn, "Login incorrect."))
            }
        }
    }
}
