#![allow(dead_code)]

use reefs::{Config, Listener};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use tempfile::TempDir;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio_util::sync::CancellationToken;

pub struct Harness {
    pub addr: SocketAddr,
    pub root: PathBuf,
    _tempdir: TempDir,
}

/// Starts a server on an ephemeral port, rooted in a fresh temp
/// directory, with one configured user (`alice` / `wonderland`).
pub async fn spawn_server() -> Harness {
    spawn_server_with(0).await
}

pub async fn spawn_server_with(max_clients: usize) -> Harness {
    let tempdir = tempfile::tempdir().unwrap();
    let root = tempdir.path().canonicalize().unwrap();
    let mut users = HashMap::new();
    users.insert("alice".to_string(), "wonderland".to_string());
    let config = Config {
        root_dir: root.clone(),
        port: 0,
        max_clients,
        users_file: PathBuf::from("./users"),
        log_file: PathBuf::from("./log"),
        users,
    };
    let logger = slog::Logger::root(slog::Discard, slog::o!());
    let listener = Listener::bind(config, logger, CancellationToken::new())
        .await
        .unwrap();
    // The listener binds INADDR_ANY; talk to it over loopback.
    let addr = SocketAddr::from(([127, 0, 0, 1], listener.local_addr().unwrap().port()));
    tokio::spawn(listener.serve());
    Harness {
        addr,
        root,
        _tempdir: tempdir,
    }
}

/// A bare-bones FTP control connection speaking raw lines, so the tests
/// assert exact wire transcripts.
pub struct FtpClient {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl FtpClient {
    /// Connects and consumes the multi-line greeting.
    pub async fn connect(addr: SocketAddr) -> Self {
        let mut client = Self::connect_raw(addr).await;
        client.read_reply().await;
        client
    }

    /// Connects without reading anything.
    pub async fn connect_raw(addr: SocketAddr) -> Self {
        let stream = TcpStream::connect(addr).await.unwrap();
        let (read_half, write_half) = stream.into_split();
        FtpClient {
            reader: BufReader::new(read_half),
            writer: write_half,
        }
    }

    pub async fn send(&mut self, line: &str) {
        // A send can race a server-side close; the following read is what
        // the tests assert on.
        let _ = self
            .writer
            .write_all(format!("{}\r\n", line).as_bytes())
            .await;
    }

    /// Reads one line, without its terminator; `None` once the server has
    /// closed the connection (cleanly or with a reset).
    pub async fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        let n = match self.reader.read_line(&mut line).await {
            Ok(n) => n,
            Err(err)
                if matches!(
                    err.kind(),
                    std::io::ErrorKind::ConnectionReset | std::io::ErrorKind::BrokenPipe
                ) =>
            {
                0
            }
            Err(err) => panic!("read failed: {}", err),
        };
        if n == 0 {
            None
        } else {
            Some(line.trim_end_matches(['\r', '\n']).to_string())
        }
    }

    /// Reads a complete reply; multi-line replies are read through their
    /// closing `CCC ` line. Returns all lines.
    pub async fn read_reply(&mut self) -> Vec<String> {
        let first = self.read_line().await.expect("server closed the connection");
        let mut lines = vec![first];
        if lines[0].len() >= 4 && lines[0].as_bytes()[3] == b'-' {
            let terminator = format!("{} ", &lines[0][..3]);
            loop {
                let line = self.read_line().await.expect("server closed the connection");
                let done = line.starts_with(&terminator);
                lines.push(line);
                if done {
                    break;
                }
            }
        }
        lines
    }

    /// Sends a command and returns the (single-line) reply.
    pub async fn cmd(&mut self, line: &str) -> String {
        self.send(line).await;
        let mut reply = self.read_reply().await;
        reply.pop().unwrap()
    }

    /// Logs in as the configured test user.
    pub async fn login(&mut self) {
        assert_eq!(self.cmd("USER alice").await, "331 Please specify the password.");
        assert_eq!(self.cmd("PASS wonderland").await, "230 Login successful.");
    }

    /// Issues `PASV` and dials the advertised address, returning the data
    /// connection.
    pub async fn pasv(&mut self) -> TcpStream {
        let reply = self.cmd("PASV").await;
        let addr = parse_pasv_reply(&reply);
        TcpStream::connect(addr).await.unwrap()
    }
}

/// Extracts the data connection address out of a
/// `227 Entering Passive Mode (h1,h2,h3,h4,p1,p2)` reply.
pub fn parse_pasv_reply(line: &str) -> SocketAddr {
    assert!(line.starts_with("227 "), "not a PASV reply: {}", line);
    let start = line.find('(').unwrap() + 1;
    let end = line.rfind(')').unwrap();
    let fields: Vec<u16> = line[start..end].split(',').map(|f| f.parse().unwrap()).collect();
    assert_eq!(fields.len(), 6);
    SocketAddr::from((
        [fields[0] as u8, fields[1] as u8, fields[2] as u8, fields[3] as u8],
        fields[4] * 256 + fields[5],
    ))
}
