//! tinykv - A Small In-Memory Key-Value Server
//!
//! This is the main entry point. It reads the configuration, sets up
//! logging, then either runs the interactive console or serves TCP clients
//! until Ctrl+C.

use anyhow::Context;
use clap::Parser;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tinykv::commands::CommandHandler;
use tinykv::config::Config;
use tinykv::connection::{handle_connection, ConnectionStats};
use tinykv::console;
use tinykv::storage::StorageEngine;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // RUST_LOG wins over --log-level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("invalid log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();

    // Create the storage engine (shared across all connections)
    let storage = Arc::new(StorageEngine::new());
    info!(version = tinykv::VERSION, "Storage engine initialized with 64 shards");

    if config.console {
        run_console(Arc::clone(&storage)).await?;
    } else {
        run_server(&config, Arc::clone(&storage)).await?;
    }

    let stats = storage.stats();
    info!(
        keys = stats.keys,
        gets = stats.get_ops,
        sets = stats.set_ops,
        deletes = stats.del_ops,
        expired = stats.expired,
        "Shutdown complete"
    );
    Ok(())
}

/// Runs the console on a blocking thread so stdin reads stay off the runtime.
async fn run_console(storage: Arc<StorageEngine>) -> anyhow::Result<()> {
    let handler = CommandHandler::new(storage);

    tokio::task::spawn_blocking(move || {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        console::run(&handler, stdin.lock(), stdout.lock())
    })
    .await
    .context("console task failed")?
    .context("console I/O error")?;

    Ok(())
}

async fn run_server(config: &Config, storage: Arc<StorageEngine>) -> anyhow::Result<()> {
    let stats = Arc::new(ConnectionStats::new());

    // Bind the TCP listener
    let listener = TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address()))?;
    info!(addr = %config.bind_address(), "Listening");

    // Main accept loop
    tokio::select! {
        _ = accept_loop(listener, storage, Arc::clone(&stats)) => {}
        result = signal::ctrl_c() => {
            result.context("failed to listen for Ctrl+C")?;
            info!("Shutdown signal received, stopping server...");
        }
    }

    info!(
        accepted = stats.connections_accepted.load(Ordering::Relaxed),
        commands = stats.commands_processed.load(Ordering::Relaxed),
        bytes_read = stats.bytes_read.load(Ordering::Relaxed),
        bytes_written = stats.bytes_written.load(Ordering::Relaxed),
        "Server stopped"
    );
    Ok(())
}

/// Main loop that accepts incoming connections
async fn accept_loop(
    listener: TcpListener,
    storage: Arc<StorageEngine>,
    stats: Arc<ConnectionStats>,
) {
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                // Create a command handler for this connection
                let handler = CommandHandler::new(Arc::clone(&storage));
                let stats = Arc::clone(&stats);

                // Spawn a task to handle this connection
                tokio::spawn(async move {
                    handle_connection(stream, addr, handler, stats).await;
                });
            }
            Err(e) => {
                error!(error = %e, "Failed to accept connection");
            }
        }
    }
}
