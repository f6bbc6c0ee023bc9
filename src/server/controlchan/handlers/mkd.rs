//! The RFC 959 Make Directory (`MKD`) command.

use crate::server::controlchan::error::ControlChanError;
use crate::server::controlchan::handler::{CommandContext, CommandHandler};
use crate::server::controlchan::{Reply, ReplyCode};

use async_trait::async_trait;
use slog::warn;

#[derive(Debug)]
pub struct Mkd {
    path: String,
}

impl Mkd {
    pub fn new(path: String) -> Self {
        Mkd { path }
    }
}

#[async_trait]
impl CommandHandler for Mkd {
    async fn handle(&self, args: CommandContext<'_>) -> Result<Reply, ControlChanError> {
        let failed = Reply::new(ReplyCode::FileError, "Create directory operation failed.");
        if self.path.is_empty() {
            return Ok(failed);
        }
        let dir = match args.storage.resolve(&args.session.current_dir, &self.path) {
            Ok(dir) => dir,
            Err(_) => return Ok(failed),
        };
        match args.storage.mkd(&dir).await {
            Ok(()) => Ok(Reply::new(ReplyCode::DirCreated, "Directory created.")),
            Err(err) => {
                warn!(args.logger, "MKD {} failed: {}", dir.display(), err);
                Ok(failed)
            }
        }
    }
}
