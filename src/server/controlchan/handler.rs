//! The common interface all command handlers implement.

use crate::auth::Authenticator;
use crate::server::controlchan::control_loop::ReplySink;
use crate::server::controlchan::error::ControlChanError;
use crate::server::controlchan::reply::Reply;
use crate::server::session::Session;
use crate::storage::Filesystem;

use async_trait::async_trait;
use std::sync::Arc;

// Common interface for all handlers of `Command`s. The returned reply is
// the terminal one; transfer commands send their preliminary `150`
// themselves through the context's sink.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, args: CommandContext<'_>) -> Result<Reply, ControlChanError>;
}

/// Everything a handler gets to work with. The session is borrowed
/// mutably: a session is only ever touched by its own task.
pub struct CommandContext<'a> {
    pub session: &'a mut Session,
    pub storage: &'a Filesystem,
    pub authenticator: &'a Arc<dyn Authenticator>,
    pub sink: &'a mut ReplySink,
    pub logger: &'a slog::Logger,
}
