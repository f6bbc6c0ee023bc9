//! The RFC 959 Remove Directory (`RMD`) command.

use crate::server::controlchan::error::ControlChanError;
use crate::server::controlchan::handler::{CommandContext, CommandHandler};
use crate::server::controlchan::{Reply, ReplyCode};

use async_trait::async_trait;
use slog::warn;

#[derive(Debug)]
pub struct Rmd {
    path: String,
}

impl Rmd {
    pub fn new(path: String) -> Self {
        Rmd { path }
    }
}

#[async_trait]
impl CommandHandler for Rmd {
    async fn handle(&self, args: CommandContext<'_>) -> Result<Reply, ControlChanError> {
        let failed = Reply::new(ReplyCode::FileError, "Remove directory operation failed.");
        if self.path.is_empty() {
            return Ok(failed);
        }
        let dir = match args.storage.resolve(&args.session.current_dir, &self.path) {
            Ok(dir) => dir,
            Err(_) => return Ok(failed),
        };
        match args.storage.rmd(&dir).await {
            Ok(()) => Ok(Reply::new(
                ReplyCode::FileActionOkay,
                "Remove directory operation successful.",
            )),
            Err(err) => {
                warn!(args.logger, "RMD {} failed: {}", dir.display(), err);
                Ok(failed)
            }
        }
    }
}
