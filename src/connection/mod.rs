//! Connection Handler Module
//!
//! This module manages individual client sessions. Each accepted connection
//! is handled by its own async task; all tasks share one `StorageEngine`
//! through their `CommandHandler`.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     TCP Listener                            │
//! │                    (main.rs)                                │
//! └──────────────────────┬──────────────────────────────────────┘
//!                        │
//!                        │ accept()
//!                        ▼
//!           ┌────────────────────────┐
//!           │   For each client...   │
//!           └────────────┬───────────┘
//!                        │
//!                        │ spawn task
//!                        ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 ConnectionHandler                           │
//! │                                                             │
//! │  ┌─────────────┐    ┌──────────────┐    ┌─────────────┐     │
//! │  │ Read bytes  │───>│ Frame / line │───>│ Execute cmd │     │
//! │  └─────────────┘    └──────────────┘    └─────────────┘     │
//! │                                                │            │
//! │                                                ▼            │
//! │                                       ┌──────────────┐      │
//! │                                       │ Send replies │      │
//! │                                       └──────────────┘      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Features
//!
//! - **Dual Protocol**: structured frames and text lines on the same socket
//! - **Pipelining**: every complete command in a read is answered in one write
//! - **EXIT**: a line of exactly `EXIT` or `exit` ends the session
//! - **Statistics**: tracks connection and command counters
//!
//! ## Example
//!
//! ```ignore
//! use tinykv::connection::{handle_connection, ConnectionStats};
//! use tinykv::commands::CommandHandler;
//! use tinykv::storage::StorageEngine;
//! use std::sync::Arc;
//!
//! let storage = Arc::new(StorageEngine::new());
//! let stats = Arc::new(ConnectionStats::new());
//! let handler = CommandHandler::new(storage);
//!
//! // For each accepted connection...
//! let (stream, addr) = listener.accept().await?;
//! tokio::spawn(handle_connection(stream, addr, handler, stats));
//! ```

pub mod handler;

// Re-export commonly used types
pub use handler::{
    handle_connection, next_incoming, ConnectionError, ConnectionHandler, ConnectionStats,
    Incoming,
};
