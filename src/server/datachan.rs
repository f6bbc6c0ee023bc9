//! The FTP *data* channel: passive-mode listener setup, the single accept,
//! and the streaming transfer loops.

use crate::server::session::{DataConn, Session};

use rand::Rng;
use std::io;
use std::net::Ipv4Addr;
use std::path::Path;
use tokio::io::{AsyncWriteExt, BufReader, BufWriter};
use tokio::net::{TcpListener, TcpStream};

/// Lower bound of the passive port search. Ports below this are left to
/// services with well-known assignments.
pub const MIN_PASV_PORT: u16 = 10384;

const TRANSFER_BUF_LEN: usize = 8 * 1024;

/// The ways opening the data connection for a transfer can fail.
#[derive(Debug)]
pub enum OpenError {
    /// No `PASV` was issued first; the client gets a `425`.
    NotArmed,
    /// The accept itself failed.
    Io(io::Error),
}

/// Binds a listener for passive mode on `INADDR_ANY`, walking port by port
/// upward from a random starting point in `[MIN_PASV_PORT, 65535]`. Any
/// bind failure moves on to the next port; running off the end of the
/// range fails the whole operation.
pub async fn bind_passive() -> io::Result<TcpListener> {
    let start = rand::thread_rng().gen_range(MIN_PASV_PORT..=u16::MAX);
    for port in start..=u16::MAX {
        if let Ok(listener) = TcpListener::bind((Ipv4Addr::UNSPECIFIED, port)).await {
            return Ok(listener);
        }
    }
    Err(io::Error::new(io::ErrorKind::AddrInUse, "no bindable passive port"))
}

/// Accepts the one expected inbound connection on the armed listener and
/// makes it the session's established data connection. The listener is
/// released as soon as the accept returns.
pub async fn open(session: &mut Session) -> Result<(), OpenError> {
    match session.data_conn.take() {
        DataConn::None => Err(OpenError::NotArmed),
        DataConn::Established(stream) => {
            session.data_conn = DataConn::Established(stream);
            Ok(())
        }
        DataConn::Pending(listener) => match listener.accept().await {
            Ok((stream, _remote)) => {
                session.data_conn = DataConn::Established(stream);
                Ok(())
            }
            Err(err) => Err(OpenError::Io(err)),
        },
    }
}

/// Shuts down and drops whatever data connection state the session holds.
/// Idempotent; also disarms a listener that never got its connection.
pub async fn close(session: &mut Session) {
    if let DataConn::Established(mut stream) = session.data_conn.take() {
        let _ = stream.shutdown().await;
    }
}

/// True when an IO error means the peer hung up on us. Such errors end
/// the session cleanly instead of counting as server-side failures.
pub fn is_peer_gone(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::BrokenPipe | io::ErrorKind::ConnectionReset | io::ErrorKind::ConnectionAborted
    )
}

fn established(session: &mut Session) -> io::Result<&mut TcpStream> {
    match &mut session.data_conn {
        DataConn::Established(stream) => Ok(stream),
        _ => Err(io::Error::new(io::ErrorKind::NotConnected, "no data connection")),
    }
}

/// Streams the file at `path` to the established data connection.
pub async fn send_file(session: &mut Session, path: &Path) -> io::Result<u64> {
    let file = tokio::fs::File::open(path).await?;
    let stream = established(session)?;
    let mut reader = BufReader::with_capacity(TRANSFER_BUF_LEN, file);
    let bytes = tokio::io::copy(&mut reader, stream).await?;
    stream.flush().await?;
    Ok(bytes)
}

/// Receives bytes from the established data connection into the file at
/// `path`, created or truncated with mode `0644`, until the peer closes
/// its end. On error the partial file is left in place.
pub async fn receive_file(session: &mut Session, path: &Path) -> io::Result<u64> {
    let file = tokio::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o644)
        .open(path)
        .await?;
    let stream = established(session)?;
    let mut writer = BufWriter::with_capacity(TRANSFER_BUF_LEN, file);
    let bytes = tokio::io::copy(stream, &mut writer).await?;
    writer.flush().await?;
    Ok(bytes)
}

/// Writes an already formatted directory listing to the established data
/// connection.
pub async fn send_listing(session: &mut Session, listing: &[u8]) -> io::Result<()> {
    let stream = established(session)?;
    stream.write_all(listing).await?;
    stream.flush().await
}
