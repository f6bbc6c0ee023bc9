use reefs::config::{Config, DEFAULT_CONFIG_FILE};
use reefs::{logging, Listener};

use slog::crit;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;

fn usage() {
    println!("usage: reefs [config-file]");
}

#[tokio::main]
async fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let config_file = match (args.next(), args.next()) {
        (None, _) => PathBuf::from(DEFAULT_CONFIG_FILE),
        (Some(path), None) => PathBuf::from(path),
        (Some(_), Some(_)) => {
            usage();
            return ExitCode::FAILURE;
        }
    };

    let config = match Config::load(&config_file) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("reefs: {}", err);
            return ExitCode::FAILURE;
        }
    };
    let logger = match logging::init(&config.log_file) {
        Ok(logger) => logger,
        Err(err) => {
            eprintln!("reefs: cannot open log file: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let shutdown = CancellationToken::new();
    let listener = match Listener::bind(config, logger.clone(), shutdown.clone()).await {
        Ok(listener) => listener,
        Err(err) => {
            crit!(logger, "{}", err);
            return ExitCode::FAILURE;
        }
    };

    // SIGINT requests a graceful stop: the acceptor exits its loop and the
    // running sessions wind down at their next command boundary. (SIGPIPE
    // is already ignored: broken sockets surface as write errors.)
    let interrupt = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupt.cancel();
        }
    });

    match listener.serve().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            crit!(logger, "{}", err);
            ExitCode::FAILURE
        }
    }
}
