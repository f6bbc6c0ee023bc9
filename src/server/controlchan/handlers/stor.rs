//! The RFC 959 Store (`STOR`) command.
//
// Receives a file from the client. A transfer that fails midway leaves
// the partial file on disk.

use crate::server::controlchan::error::ControlChanError;
use crate::server::controlchan::handler::{CommandContext, CommandHandler};
use crate::server::controlchan::{Reply, ReplyCode};
use crate::server::datachan::{self, OpenError};

use async_trait::async_trait;
use slog::warn;

#[derive(Debug)]
pub struct Stor {
    path: String,
}

impl Stor {
    pub fn new(path: String) -> Self {
        Stor { path }
    }
}

#[async_trait]
impl CommandHandler for Stor {
    async fn handle(&self, args: CommandContext<'_>) -> Result<Reply, ControlChanError> {
        let failed = Reply::new(ReplyCode::BadFileName, "Could not create file.");
        if self.path.is_empty() {
            return Ok(failed);
        }
        let file = match args.storage.resolve(&args.session.current_dir, &self.path) {
            Ok(file) => file,
            Err(_) => return Ok(failed),
        };

        match datachan::open(args.session).await {
            Ok(()) => {}
            Err(OpenError::NotArmed) => {
                return Ok(Reply::new(ReplyCode::CantOpenDataConnection, "Use PORT or PASV first."));
            }
            Err(OpenError::Io(err)) => {
                warn!(args.logger, "accepting data connection failed: {}", err);
                datachan::close(args.session).await;
                return Ok(failed);
            }
        }

        args.sink
            .send(Reply::new_with_string(
                ReplyCode::FileStatusOkay,
                format!(
                    "Opening {} mode data connection for {}.",
                    args.session.transfer_type, self.path
                ),
            ))
            .await?;
        let result = datachan::receive_file(args.session, &file).await;
        datachan::close(args.session).await;
        match result {
            Ok(_bytes) => Ok(Reply::new(ReplyCode::ClosingDataConnection, "Transfer complete.")),
            Err(err) => {
                if datachan::is_peer_gone(&err) {
                    args.session.terminated = true;
                }
                warn!(args.logger, "STOR {} failed: {}", file.display(), err);
                Ok(Reply::new(ReplyCode::FileError, "Transfer failed."))
            }
        }
    }
}
