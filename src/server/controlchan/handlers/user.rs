//! The RFC 959 User Name (`USER`) command.
//
// Names the user. Authentication only completes once the matching
// password arrives with `PASS`; until then the session is logged out,
// even if it was logged in before.

use crate::server::controlchan::error::ControlChanError;
use crate::server::controlchan::handler::{CommandContext, CommandHandler};
use crate::server::controlchan::{Reply, ReplyCode};

use async_trait::async_trait;

#[derive(Debug)]
pub struct User {
    username: String,
}

impl User {
    pub fn new(username: String) -> Self {
        User { username }
    }
}

#[async_trait]
impl CommandHandler for User {
    async fn handle(&self, args: CommandContext<'_>) -> Result<Reply, ControlChanError> {
        args.session.login = self.username.clone();
        args.session.logged_in = false;
        Ok(Reply::new(ReplyCode::NeedPassword, "Please specify the password."))
    }
}
