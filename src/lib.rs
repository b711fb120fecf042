//! # tinykv - A Small In-Memory Key-Value Server
//!
//! tinykv keeps string keys and values in memory, supports per-key expiry
//! and atomic integer counters, and serves clients over TCP in two wire
//! formats: binary-safe structured frames and plain text lines.
//!
//! ## Features
//!
//! - **Two Protocols, One Port**: chosen per message by its first byte
//! - **Sharded Storage**: 64 RwLock shards for concurrent access
//! - **TTL Support**: expired keys vanish on their next access
//! - **Async I/O**: built on Tokio, one task per client
//! - **Console**: the same commands on stdin/stdout
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                              tinykv                                     │
//! │                                                                         │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐                  │
//! │  │ TCP Server  │───>│ Connection  │───>│  Command    │<───┐             │
//! │  │ (Listener)  │    │  Handler    │    │  Handler    │    │             │
//! │  └─────────────┘    └──────┬──────┘    └──────┬──────┘    │             │
//! │                            │                  │      ┌────┴──────┐      │
//! │                            ▼                  ▼      │  Console  │      │
//! │  ┌──────────────────────────────┐  ┌───────────────┐ └───────────┘      │
//! │  │  Frame parser / line split   │  │ StorageEngine │                    │
//! │  │  Reply encoder (both wires)  │  │  64 shards    │                    │
//! │  └──────────────────────────────┘  └───────────────┘                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use tinykv::commands::CommandHandler;
//! use tinykv::connection::{handle_connection, ConnectionStats};
//! use tinykv::storage::StorageEngine;
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() {
//!     let storage = Arc::new(StorageEngine::new());
//!     let stats = Arc::new(ConnectionStats::new());
//!
//!     let listener = TcpListener::bind("127.0.0.1:6379").await.unwrap();
//!
//!     loop {
//!         let (stream, addr) = listener.accept().await.unwrap();
//!         let handler = CommandHandler::new(Arc::clone(&storage));
//!         let stats = Arc::clone(&stats);
//!
//!         tokio::spawn(handle_connection(stream, addr, handler, stats));
//!     }
//! }
//! ```
//!
//! ## Supported Commands
//!
//! - `PING`
//! - `SET key value` / `GET key`
//! - `DEL key` / `EXISTS key [key ...]`
//! - `EXPIRE key seconds` / `TTL key`
//! - `INCRBY key delta` / `DECRBY key delta`
//!
//! On the line protocol, a line of exactly `EXIT` or `exit` closes the
//! session.
//!
//! ## Module Overview
//!
//! - [`protocol`]: frame parser, line tokenizer and reply encoders
//! - [`storage`]: thread-safe storage engine with lazy TTL
//! - [`commands`]: the command interpreter
//! - [`connection`]: client session loop
//! - [`console`]: interactive stdin/stdout front end
//! - [`config`]: command-line and environment settings
//!
//! ## Lazy Expiry
//!
//! There is no background sweeper. An expired key is removed the next time
//! any command touches it; until then it only occupies memory.

pub mod commands;
pub mod config;
pub mod connection;
pub mod console;
pub mod protocol;
pub mod storage;

// Re-export commonly used types for convenience
pub use commands::CommandHandler;
pub use config::Config;
pub use connection::{handle_connection, ConnectionStats};
pub use protocol::{parse_frame, ParseError, Protocol, Reply};
pub use storage::StorageEngine;

/// The default port tinykv listens on
pub const DEFAULT_PORT: u16 = 6379;

/// The default host tinykv binds to
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Version of tinykv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
