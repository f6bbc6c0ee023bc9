//! The RFC 959 Change To Parent Directory (`CDUP`) command.
//
// Not supported: the tree is descend-only. `CWD ..` lands here as well.

use crate::server::controlchan::error::ControlChanError;
use crate::server::controlchan::handler::{CommandContext, CommandHandler};
use crate::server::controlchan::{Reply, ReplyCode};

use async_trait::async_trait;

#[derive(Debug)]
pub struct Cdup;

#[async_trait]
impl CommandHandler for Cdup {
    async fn handle(&self, _args: CommandContext<'_>) -> Result<Reply, ControlChanError> {
        Ok(Reply::new(ReplyCode::FileError, "Operation not supported."))
    }
}
