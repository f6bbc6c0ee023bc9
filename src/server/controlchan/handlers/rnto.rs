//! The RFC 959 Rename To (`RNTO`) command.
//
// Valid only when the directly preceding command was `RNFR`; any other
// command in between, successful or not, breaks the pairing.

use crate::server::controlchan::error::ControlChanError;
use crate::server::controlchan::handler::{CommandContext, CommandHandler};
use crate::server::controlchan::{Reply, ReplyCode};

use async_trait::async_trait;
use slog::warn;

#[derive(Debug)]
pub struct Rnto {
    path: String,
}

impl Rnto {
    pub fn new(path: String) -> Self {
        Rnto { path }
    }
}

#[async_trait]
impl CommandHandler for Rnto {
    async fn handle(&self, args: CommandContext<'_>) -> Result<Reply, ControlChanError> {
        if args.session.last_cmd != "RNFR" {
            return Ok(Reply::new(ReplyCode::BadCommandSequence, "RNFR required first."));
        }
        let failed = Reply::new(ReplyCode::FileError, "Rename failed.");
        let current_dir = args.session.current_dir.clone();
        let from = args.storage.resolve(&current_dir, &args.session.last_cmd_data);
        let to = args.storage.resolve(&current_dir, &self.path);
        match (from, to) {
            (Ok(from), Ok(to)) => match args.storage.rename(&from, &to).await {
                Ok(()) => Ok(Reply::new(ReplyCode::FileActionOkay, "Rename successful.")),
                Err(err) => {
                    warn!(args.logger, "RNTO {} -> {} failed: {}", from.display(), to.display(), err);
                    Ok(failed)
                }
            },
            _ => Ok(failed),
        }
    }
}
