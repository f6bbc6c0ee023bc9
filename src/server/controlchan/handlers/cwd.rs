//! The RFC 959 Change Working Directory (`CWD`) command.

use crate::server::controlchan::error::ControlChanError;
use crate::server::controlchan::handler::{CommandContext, CommandHandler};
use crate::server::controlchan::{Reply, ReplyCode};

use async_trait::async_trait;

#[derive(Debug)]
pub struct Cwd {
    path: String,
}

impl Cwd {
    pub fn new(path: String) -> Self {
        Cwd { path }
    }
}

#[async_trait]
impl CommandHandler for Cwd {
    async fn handle(&self, args: CommandContext<'_>) -> Result<Reply, ControlChanError> {
        let failed = Reply::new(ReplyCode::FileError, "Failed to change directory.");
        match self.path.as_str() {
            "" => return Ok(failed),
            "." => return Ok(Reply::new(ReplyCode::FileActionOkay, "Directory successfully changed.")),
            // `..` would be CDUP, which is not supported.
            ".." => return Ok(Reply::new(ReplyCode::FileError, "Operation not supported.")),
            _ => {}
        }

        let dir = match args.storage.resolve(&args.session.current_dir, &self.path) {
            Ok(dir) => dir,
            Err(_) => return Ok(failed),
        };
        match args.storage.metadata(&dir).await {
            Ok(meta) if meta.is_dir() => {
                args.session.current_dir = dir;
                Ok(Reply::new(ReplyCode::FileActionOkay, "Directory successfully changed."))
            }
            _ => Ok(failed),
        }
    }
}
