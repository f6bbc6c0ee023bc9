//! The log pipeline: every record goes to the append-only log file and is
//! mirrored to stdout. Both drains are synchronous and internally locked,
//! so records from concurrent sessions never interleave within a line.

use slog::{o, Drain, Logger};
use slog_term::{FullFormat, PlainSyncDecorator};
use std::fs::OpenOptions;
use std::io;
use std::path::Path;

/// Opens (or creates) the log file in append mode and builds the root
/// logger for the whole server.
pub fn init(log_file: &Path) -> io::Result<Logger> {
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;
    let file_drain = FullFormat::new(PlainSyncDecorator::new(file)).build().fuse();
    let stdout_drain = FullFormat::new(PlainSyncDecorator::new(io::stdout())).build().fuse();
    let drain = slog::Duplicate::new(file_drain, stdout_drain).fuse();
    Ok(Logger::root(drain, o!()))
}
