//! The RFC 959 Delete (`DELE`) command.
//
// Only unlinks regular files; directories must go through `RMD`.

use crate::server::controlchan::error::ControlChanError;
use crate::server::controlchan::handler::{CommandContext, CommandHandler};
use crate::server::controlchan::{Reply, ReplyCode};

use async_trait::async_trait;
use slog::warn;

#[derive(Debug)]
pub struct Dele {
    path: String,
}

impl Dele {
    pub fn new(path: String) -> Self {
        Dele { path }
    }
}

#[async_trait]
impl CommandHandler for Dele {
    async fn handle(&self, args: CommandContext<'_>) -> Result<Reply, ControlChanError> {
        let failed = Reply::new(ReplyCode::FileError, "Delete operation failed.");
        let file = match args.storage.resolve(&args.session.current_dir, &self.path) {
            Ok(file) => file,
            Err(_) => return Ok(failed),
        };
        match args.storage.dele(&file).await {
            Ok(()) => Ok(Reply::new(ReplyCode::FileActionOkay, "Delete operation successful.")),
            Err(err) => {
                warn!(args.logger, "DELE {} failed: {}", file.display(), err);
                Ok(failed)
            }
        }
    }
}
