//! The RFC 959 Print Working Directory (`PWD`) command.

use crate::server::controlchan::error::ControlChanError;
use crate::server::controlchan::handler::{CommandContext, CommandHandler};
use crate::server::controlchan::{Reply, ReplyCode};

use async_trait::async_trait;

#[derive(Debug)]
pub struct Pwd;

#[async_trait]
impl CommandHandler for Pwd {
    async fn handle(&self, args: CommandContext<'_>) -> Result<Reply, ControlChanError> {
        let dir = args.storage.display(&args.session.current_dir);
        Ok(Reply::new_with_string(ReplyCode::DirCreated, format!("\"{}\"", dir)))
    }
}
