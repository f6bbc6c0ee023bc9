//! The RFC 2389 Feature (`FEAT`) command.

use crate::server::controlchan::error::ControlChanError;
use crate::server::controlchan::handler::{CommandContext, CommandHandler};
use crate::server::controlchan::{Reply, ReplyCode};

use async_trait::async_trait;

#[derive(Debug)]
pub struct Feat;

#[async_trait]
impl CommandHandler for Feat {
    async fn handle(&self, _args: CommandContext<'_>) -> Result<Reply, ControlChanError> {
        Ok(Reply::new_multiline(
            ReplyCode::SystemStatus,
            vec!["Features:", "PASV", "End"],
        ))
    }
}
