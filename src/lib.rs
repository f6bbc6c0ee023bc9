//! REEFS, a passive-mode FTP server.
//!
//! Serves the files under a configured root directory to multiple
//! concurrent clients over TCP, speaking an RFC 959 subset:
//! `USER`/`PASS` authentication, `PASV` plus `LIST`/`RETR`/`STOR`
//! transfers, and the usual directory bookkeeping commands. Active mode,
//! TLS and transfer resumption are deliberately not implemented.
//!
//! The [`server::Listener`] accepts control connections and runs one
//! asynchronous task per session; a session owns all of its state and
//! sockets, so there is no locking anywhere on the command path.

pub mod auth;
pub mod config;
pub mod logging;
pub mod server;
pub mod storage;

pub use config::Config;
pub use server::Listener;
