//! The RFC 959 Logout (`QUIT`) command.
//
// Ends the session; the control loop closes the connection after the
// goodbye reply has been written.

use crate::server::controlchan::error::ControlChanError;
use crate::server::controlchan::handler::{CommandContext, CommandHandler};
use crate::server::controlchan::{Reply, ReplyCode};

use async_trait::async_trait;

#[derive(Debug)]
pub struct Quit;

#[async_trait]
impl CommandHandler for Quit {
    async fn handle(&self, args: CommandContext<'_>) -> Result<Reply, ControlChanError> {
        args.session.terminated = true;
        Ok(Reply::new(ReplyCode::ClosingControlConnection, "Goodbye."))
    }
}
