//! The acceptor: listens for control connections and spawns one session
//! task per client.

use crate::auth::{Authenticator, UsersAuthenticator};
use crate::config::Config;
use crate::server::controlchan::control_loop::{self, SessionParams};
use crate::storage::Filesystem;

use slog::{info, warn};
use std::io;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

/// Errors that take the whole server down.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("could not bind to port {port}")]
    Bind {
        port: u16,
        #[source]
        source: io::Error,
    },
    #[error("could not accept an incoming connection")]
    Accept(#[source] io::Error),
}

/// Listens for control channel connections on a TCP port and runs a
/// control channel loop in a new task for each incoming connection.
pub struct Listener {
    config: Arc<Config>,
    logger: slog::Logger,
    shutdown: CancellationToken,
    tracker: TaskTracker,
    listener: TcpListener,
    active: Arc<AtomicUsize>,
}

// Holds one slot against the session ceiling; gives it back on drop, on
// every exit path of the session task.
struct Slot(Arc<AtomicUsize>);

impl Drop for Slot {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

impl Listener {
    /// Binds the control listener (IPv4 only). Port 0 asks the OS for an
    /// ephemeral port, which [`local_addr`](Listener::local_addr) reveals.
    pub async fn bind(config: Config, logger: slog::Logger, shutdown: CancellationToken) -> Result<Self, ServerError> {
        let listener = TcpListener::bind((Ipv4Addr::UNSPECIFIED, config.port))
            .await
            .map_err(|source| ServerError::Bind {
                port: config.port,
                source,
            })?;
        Ok(Listener {
            config: Arc::new(config),
            logger,
            shutdown,
            tracker: TaskTracker::new(),
            listener,
            active: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections until shutdown is requested, then waits for the
    /// running sessions to finish on their own. Sessions are never joined
    /// individually; the acceptor only keeps a head count for the
    /// `max-clients` ceiling.
    pub async fn serve(self) -> Result<(), ServerError> {
        let storage = Arc::new(Filesystem::new(self.config.root_dir.clone()));
        let authenticator: Arc<dyn Authenticator> = Arc::new(UsersAuthenticator::new(self.config.users.clone()));

        info!(self.logger, "Server started.");
        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => break,
                accepted = self.listener.accept() => {
                    let (stream, peer) = accepted.map_err(ServerError::Accept)?;
                    if self.config.max_clients > 0 && self.active.load(Ordering::Acquire) >= self.config.max_clients {
                        warn!(self.logger, "Client {} refused: too many clients.", peer.ip());
                        refuse(stream).await;
                        continue;
                    }
                    info!(self.logger, "Client {} connected.", peer.ip());
                    self.active.fetch_add(1, Ordering::AcqRel);
                    let slot = Slot(self.active.clone());
                    let params = SessionParams {
                        storage: storage.clone(),
                        authenticator: authenticator.clone(),
                        logger: self.logger.clone(),
                        shutdown: self.shutdown.clone(),
                    };
                    self.tracker.spawn(async move {
                        let _slot = slot;
                        control_loop::run(params, stream).await;
                    });
                }
            }
        }

        self.tracker.close();
        self.tracker.wait().await;
        info!(self.logger, "Server terminated.");
        Ok(())
    }
}

async fn refuse(mut stream: TcpStream) {
    let _ = stream.write_all(b"421 Too many clients.\r\n").await;
    let _ = stream.shutdown().await;
}
