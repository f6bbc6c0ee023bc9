//! The per-session control channel loop: greet, then read one command
//! line at a time, dispatch it, and write the reply, until the peer
//! disconnects, quits, or the server shuts down.

use crate::auth::Authenticator;
use crate::server::controlchan::codecs::FtpCodec;
use crate::server::controlchan::command::Command;
use crate::server::controlchan::error::{ControlChanError, ControlChanErrorKind};
use crate::server::controlchan::handler::{CommandContext, CommandHandler};
use crate::server::controlchan::handlers;
use crate::server::controlchan::line_parser;
use crate::server::controlchan::{Reply, ReplyCode};
use crate::server::datachan;
use crate::server::session::Session;
use crate::storage::Filesystem;

use futures_util::{SinkExt, StreamExt};
use slog::{info, o, warn};
use std::sync::Arc;
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::TcpStream;
use tokio_util::codec::{FramedRead, FramedWrite};
use tokio_util::sync::CancellationToken;

/// Everything a session task needs besides its socket.
pub struct SessionParams {
    pub storage: Arc<Filesystem>,
    pub authenticator: Arc<dyn Authenticator>,
    pub logger: slog::Logger,
    pub shutdown: CancellationToken,
}

/// The write half of the control connection. Every reply that goes
/// through here is also mirrored into the log, one record per line.
pub struct ReplySink {
    frames: FramedWrite<OwnedWriteHalf, FtpCodec>,
    logger: slog::Logger,
}

impl ReplySink {
    pub async fn send(&mut self, reply: Reply) -> Result<(), ControlChanError> {
        for line in reply.to_lines() {
            info!(self.logger, "{}", line);
        }
        self.frames.send(reply).await
    }

    async fn close(&mut self) {
        let _ = self.frames.close().await;
    }
}

/// Services one accepted control connection to completion. All errors end
/// here: a dead peer or a failed write only ever takes down this session.
pub async fn run(params: SessionParams, stream: TcpStream) {
    let SessionParams {
        storage,
        authenticator,
        logger,
        shutdown,
    } = params;
    let (peer_addr, local_addr) = match (stream.peer_addr(), stream.local_addr()) {
        (Ok(peer), Ok(local)) => (peer, local),
        // The socket died between accept and here; nothing to service.
        _ => return,
    };
    let logger = logger.new(o!("peer" => peer_addr.ip().to_string()));
    let mut session = Session::new(peer_addr, local_addr, storage.root().to_path_buf());

    let (read_half, write_half) = stream.into_split();
    let mut commands = FramedRead::new(read_half, FtpCodec::new());
    let mut sink = ReplySink {
        frames: FramedWrite::new(write_half, FtpCodec::new()),
        logger: logger.clone(),
    };

    let motd = Reply::new_multiline(
        ReplyCode::SystemStatus,
        vec![
            "REEFS".to_string(),
            "(Rather Eerie Example of FTP Server)".to_string(),
            format!("v{}", env!("CARGO_PKG_VERSION")),
            "End of MOTD".to_string(),
        ],
    );
    if let Err(err) = sink.send(motd).await {
        warn!(logger, "could not send greeting: {}", err);
        session.terminated = true;
    }

    while !session.terminated {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            next = commands.next() => match next {
                None => break,
                Some(Ok(line)) => {
                    info!(logger, "{}", line);
                    let result = handle_line(&line, &mut session, &storage, &authenticator, &mut sink, &logger).await;
                    if let Err(err) = result {
                        if *err.kind() != ControlChanErrorKind::PeerGone {
                            warn!(logger, "session error: {}", err);
                        }
                        session.terminated = true;
                    }
                }
                Some(Err(err)) => match err.kind() {
                    ControlChanErrorKind::Utf8Error => {
                        session.last_cmd.clear();
                        session.last_cmd_data.clear();
                        if sink
                            .send(Reply::new(ReplyCode::CommandSyntaxError, "Unknown or invalid command."))
                            .await
                            .is_err()
                        {
                            break;
                        }
                    }
                    ControlChanErrorKind::PeerGone => break,
                    _ => {
                        warn!(logger, "control channel error: {}", err);
                        break;
                    }
                },
            }
        }
    }

    datachan::close(&mut session).await;
    sink.close().await;
    info!(logger, "Client {} disconnected.", session.peer_addr.ip());
}

async fn handle_line(
    line: &str,
    session: &mut Session,
    storage: &Filesystem,
    authenticator: &Arc<dyn Authenticator>,
    sink: &mut ReplySink,
    logger: &slog::Logger,
) -> Result<(), ControlChanError> {
    let cmd = match line_parser::parse(line) {
        Ok(cmd) => cmd,
        Err(err) => {
            warn!(logger, "{}", ControlChanError::from(err));
            // Unparseable input still counts as an intervening command: a
            // pending RNFR is forgotten.
            session.last_cmd.clear();
            session.last_cmd_data.clear();
            sink.send(Reply::new(ReplyCode::CommandSyntaxError, "Unknown or invalid command."))
                .await?;
            return Ok(());
        }
    };

    let reply = if cmd.requires_login() && !session.logged_in {
        Reply::new(ReplyCode::NotLoggedIn, "Please login with USER and PASS.")
    } else {
        let context = CommandContext {
            session: &mut *session,
            storage,
            authenticator,
            sink: &mut *sink,
            logger,
        };
        handler_for(&cmd).handle(context).await?
    };

    session.last_cmd = cmd.verb().to_string();
    session.last_cmd_data = cmd.argument().to_string();
    sink.send(reply).await
}

fn handler_for(cmd: &Command) -> Box<dyn CommandHandler> {
    match cmd {
        Command::User { username } => Box::new(handlers::User::new(username.clone())),
        Command::Pass { password } => Box::new(handlers::Pass::new(password.clone())),
        Command::Quit => Box::new(handlers::Quit),
        Command::Feat => Box::new(handlers::Feat),
        Command::Syst => Box::new(handlers::Syst),
        Command::Pwd => Box::new(handlers::Pwd),
        Command::Cdup => Box::new(handlers::Cdup),
        Command::Cwd { path } => Box::new(handlers::Cwd::new(path.clone())),
        Command::Mkd { path } => Box::new(handlers::Mkd::new(path.clone())),
        Command::Rmd { path } => Box::new(handlers::Rmd::new(path.clone())),
        Command::Dele { path } => Box::new(handlers::Dele::new(path.clone())),
        Command::Rnfr { path } => Box::new(handlers::Rnfr::new(path.clone())),
        Command::Rnto { path } => Box::new(handlers::Rnto::new(path.clone())),
        Command::Type { param } => Box::new(handlers::Type::new(param.clone())),
        Command::Pasv => Box::new(handlers::Pasv),
        Command::List { path } => Box::new(handlers::List::new(path.clone())),
        Command::Retr { path } => Box::new(handlers::Retr::new(path.clone())),
        Command::Stor { path } => Box::new(handlers::Stor::new(path.clone())),
    }
}
