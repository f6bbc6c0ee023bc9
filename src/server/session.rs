//! Per-connection session state.
//!
//! A session is created by the acceptor and from then on owned and mutated
//! exclusively by its own control channel task; nothing is shared between
//! sessions.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::{TcpListener, TcpStream};

/// The representation type set with `TYPE`. The server is transparent in
/// both: transfers are byte-exact either way, only the reply texts differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferType {
    Binary,
    Ascii,
}

impl fmt::Display for TransferType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            TransferType::Binary => "BINARY",
            TransferType::Ascii => "ASCII",
        })
    }
}

/// The state of the session's data connection.
///
/// `PASV` moves it from `None` to `Pending`; a transfer command accepts the
/// one expected inbound connection, releasing the listener and moving to
/// `Established`; closing the connection returns it to `None`.
pub enum DataConn {
    None,
    Pending(TcpListener),
    Established(TcpStream),
}

impl DataConn {
    /// Takes the current state, leaving `None` behind.
    pub fn take(&mut self) -> DataConn {
        std::mem::replace(self, DataConn::None)
    }
}

// This is where we keep the state of one FTP session.
pub struct Session {
    /// The remote address, captured at accept time.
    pub peer_addr: SocketAddr,
    /// The local address of the control connection; its IP is what the
    /// `227` reply advertises for passive mode.
    pub local_addr: SocketAddr,
    /// The last value supplied by `USER`; empty means none yet.
    pub login: String,
    /// Set only by a successful `PASS`.
    pub logged_in: bool,
    /// Absolute path under the server root.
    pub current_dir: PathBuf,
    pub transfer_type: TransferType,
    pub data_conn: DataConn,
    /// Verb and argument of the most recently completed command; consulted
    /// by `RNTO`, which is only valid directly after `RNFR`.
    pub last_cmd: String,
    pub last_cmd_data: String,
    /// Ends the control loop: set by `QUIT`, by a broken control
    /// connection, or by shutdown.
    pub terminated: bool,
}

impl Session {
    pub fn new(peer_addr: SocketAddr, local_addr: SocketAddr, root_dir: PathBuf) -> Self {
        Session {
            peer_addr,
            local_addr,
            login: String::new(),
            logged_in: false,
            current_dir: root_dir,
            transfer_type: TransferType::Binary,
            data_conn: DataConn::None,
            last_cmd: String::new(),
            last_cmd_data: String::new(),
            terminated: false,
        }
    }
}
