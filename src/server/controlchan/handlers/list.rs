//! The RFC 959 `LIST` command.
//
// Streams a long-format listing of a directory over the data connection.
// The listing is produced in process from the directory entries; no
// subprocess is involved.

use crate::server::controlchan::error::ControlChanError;
use crate::server::controlchan::handler::{CommandContext, CommandHandler};
use crate::server::controlchan::{Reply, ReplyCode};
use crate::server::datachan::{self, OpenError};

use async_trait::async_trait;
use slog::warn;

#[derive(Debug)]
pub struct List {
    path: Option<String>,
}

impl List {
    pub fn new(path: Option<String>) -> Self {
        List { path }
    }
}

#[async_trait]
impl CommandHandler for List {
    async fn handle(&self, args: CommandContext<'_>) -> Result<Reply, ControlChanError> {
        let failed = Reply::new(ReplyCode::FileError, "Directory listing failed.");
        let dir = match &self.path {
            None => args.session.current_dir.clone(),
            Some(path) => match args.storage.resolve(&args.session.current_dir, path) {
                Ok(dir) => dir,
                Err(_) => return Ok(failed),
            },
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

        let listing = match args.storage.list_fmt(&dir).await {
            Ok(listing) => listing,
            Err(err) => {
                warn!(args.logger, "LIST {} failed: {}", dir.display(), err);
                datachan::close(args.session).await;
                return Ok(failed);
            }
        };

        args.sink
            .send(Reply::new(ReplyCode::FileStatusOkay, "Here comes the directory listing."))
            .await?;
        let result = datachan::send_listing(args.session, &listing).await;
        datachan::close(args.session).await;
        match result {
            Ok(()) => Ok(Reply::new(ReplyCode::ClosingDataConnection, "Directory send OK.")),
            Err(err) => {
                if datachan::is_peer_gone(&err) {
                    args.session.terminated = true;
                }
                warn!(args.logger, "sending listing failed: {}", err);
                Ok(failed)
            }
        }
    }
}
