//! The RFC 959 Rename From (`RNFR`) command.
//
// Only checks that the source exists; the actual rename happens in the
// immediately following `RNTO`, which finds the source in the session's
// last-command record.

use crate::server::controlchan::error::ControlChanError;
use crate::server::controlchan::handler::{CommandContext, CommandHandler};
use crate::server::controlchan::{Reply, ReplyCode};

use async_trait::async_trait;

#[derive(Debug)]
pub struct Rnfr {
    path: String,
}

impl Rnfr {
    pub fn new(path: String) -> Self {
        Rnfr { path }
    }
}

#[async_trait]
impl CommandHandler for Rnfr {
    async fn handle(&self, args: CommandContext<'_>) -> Result<Reply, ControlChanError> {
        let failed = Reply::new(ReplyCode::FileError, "RNFR command failed.");
        let file = match args.storage.resolve(&args.session.current_dir, &self.path) {
            Ok(file) => file,
            Err(_) => return Ok(failed),
        };
        match args.storage.metadata(&file).await {
            Ok(_) => Ok(Reply::new(ReplyCode::FileActionPending, "Ready for RNTO.")),
            Err(_) => Ok(failed),
        }
    }
}
