//! The RFC 959 Passive (`PASV`) command.
//
// Binds a listener on a high port and tells the client where to dial in.
// The advertised IP is the local address of the control connection: the
// address the client reached us on is the one it can reach us on again.

use crate::server::controlchan::error::ControlChanError;
use crate::server::controlchan::handler::{CommandContext, CommandHandler};
use crate::server::controlchan::{Reply, ReplyCode};
use crate::server::datachan;
use crate::server::session::DataConn;

use async_trait::async_trait;
use slog::warn;
use std::net::SocketAddr;

#[derive(Debug)]
pub struct Pasv;

#[async_trait]
impl CommandHandler for Pasv {
    async fn handle(&self, args: CommandContext<'_>) -> Result<Reply, ControlChanError> {
        let failed = Reply::new(ReplyCode::CommandSyntaxError, "Switching to Passive Mode failed.");
        let ip = match args.session.local_addr {
            SocketAddr::V4(addr) => *addr.ip(),
            // The control listener is IPv4-only, so this does not happen.
            SocketAddr::V6(_) => return Ok(failed),
        };

        let listener = match datachan::bind_passive().await {
            Ok(listener) => listener,
            Err(err) => {
                warn!(args.logger, "no passive port available: {}", err);
                return Ok(failed);
            }
        };
        let port = match listener.local_addr() {
            Ok(addr) => addr.port(),
            Err(err) => {
                warn!(args.logger, "cannot read passive listener address: {}", err);
                return Ok(failed);
            }
        };

        args.session.data_conn = DataConn::Pending(listener);

        let octets = ip.octets();
        Ok(Reply::new_with_string(
            ReplyCode::EnteringPassiveMode,
            format!(
                "Entering Passive Mode ({},{},{},{},{},{})",
                octets[0],
                octets[1],
                octets[2],
                octets[3],
                port / 256,
                port % 256
            ),
        ))
    }
}
