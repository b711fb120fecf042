//! Connection Handler Module
//!
//! This module runs one client session. Each client gets its own task that
//! loops: read bytes, split them into commands, execute, write replies.
//!
//! ## Connection Lifecycle
//!
//! ```text
//! 1. Client connects (TCP handshake)
//!        │
//!        ▼
//! 2. ConnectionHandler spawned
//!        │
//!        ▼
//! 3. ┌──────────────────────────────┐
//!    │      Main Loop               │
//!    │                              │
//!    │  ┌─────────────────────────┐ │
//!    │  │ Drain buffered commands │ │
//!    │  └───────────┬─────────────┘ │
//!    │              ▼               │
//!    │  ┌─────────────────────────┐ │
//!    │  │ Send batched replies    │ │
//!    │  └───────────┬─────────────┘ │
//!    │              ▼               │
//!    │  ┌─────────────────────────┐ │
//!    │  │ Read bytes from socket  │ │
//!    │  └───────────┬─────────────┘ │
//!    │              ▼               │
//!    │         [Loop back]          │
//!    └──────────────────────────────┘
//!        │
//!        ▼
//! 4. EXIT line, client disconnect, framing error
//!        │
//!        ▼
//! 5. Handler task ends, socket closed
//! ```
//!
//! ## Protocol Selection
//!
//! Chosen per message: if the next pending byte is `*` the buffer is parsed
//! as a structured frame, otherwise everything up to the next `\n` is one
//! line-protocol command. Replies go back in the protocol the command
//! arrived on, strictly in arrival order.

use crate::commands::CommandHandler;
use crate::protocol::types::prefix;
use crate::protocol::parser::MAX_BULK_SIZE;
use crate::protocol::{is_exit, parse_line, scan_frame, ParseError, Protocol};
use bytes::{Bytes, BytesMut};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufWriter};
use tracing::{debug, error, info, trace, warn};

/// Maximum size of a pending text line (64 KB)
const MAX_LINE_SIZE: usize = 64 * 1024;

/// Maximum size of a pending structured frame: one maximal bulk string plus
/// room for the command name, key and headers
const MAX_FRAME_SIZE: usize = MAX_BULK_SIZE + MAX_LINE_SIZE;

/// Initial buffer capacity
const INITIAL_BUFFER_SIZE: usize = 4096;

/// Statistics for connection handling
#[derive(Debug, Default)]
pub struct ConnectionStats {
    /// Total number of connections accepted
    pub connections_accepted: AtomicU64,
    /// Currently active connections
    pub active_connections: AtomicU64,
    /// Total commands processed
    pub commands_processed: AtomicU64,
    /// Total bytes read
    pub bytes_read: AtomicU64,
    /// Total bytes written
    pub bytes_written: AtomicU64,
}

impl ConnectionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connection_opened(&self) {
        self.connections_accepted.fetch_add(1, Ordering::Relaxed);
        self.active_connections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn connection_closed(&self) {
        self.active_connections.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn command_processed(&self) {
        self.commands_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn bytes_read(&self, count: usize) {
        self.bytes_read.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn bytes_written(&self, count: usize) {
        self.bytes_written
            .fetch_add(count as u64, Ordering::Relaxed);
    }
}

/// One unit of work extracted from the session buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Incoming {
    /// A non-empty command and the protocol it arrived on
    Command { args: Vec<Bytes>, protocol: Protocol },
    /// The client sent a line that is exactly `EXIT` or `exit`
    Exit,
}

/// Extracts the next command from the front of `buffer`.
///
/// Consumed bytes are removed from the buffer. Returns `Ok(None)` when the
/// buffer holds no complete message. Empty frames and blank lines are
/// consumed and skipped.
pub fn next_incoming(buffer: &mut BytesMut) -> Result<Option<Incoming>, ConnectionError> {
    loop {
        let Some(&first) = buffer.first() else {
            return Ok(None);
        };

        if first == prefix::ARRAY {
            let Some(layout) = scan_frame(buffer)? else {
                return Ok(None);
            };
            let args = layout.split_from(buffer);
            if args.is_empty() {
                continue;
            }
            return Ok(Some(Incoming::Command {
                args,
                protocol: Protocol::Resp,
            }));
        }

        let Some(newline) = buffer.iter().position(|&b| b == b'\n') else {
            return Ok(None);
        };
        let line = buffer.split_to(newline + 1);
        let args = parse_line(&line);

        if args.is_empty() {
            continue;
        }
        if is_exit(&args) {
            return Ok(Some(Incoming::Exit));
        }
        return Ok(Some(Incoming::Command {
            args,
            protocol: Protocol::Line,
        }));
    }
}

/// Largest number of bytes the buffer may hold while its first message is
/// still incomplete.
fn pending_limit(buffer: &[u8]) -> usize {
    if buffer.first() == Some(&prefix::ARRAY) {
        MAX_FRAME_SIZE
    } else {
        MAX_LINE_SIZE
    }
}

/// Why a drain of the buffer stopped.
enum Drained {
    NeedMore,
    Exit,
}

/// Handles a single client connection.
///
/// This struct manages the read buffer, parsing, and reply sending
/// for one connected client.
pub struct ConnectionHandler<S> {
    /// The client stream, buffered for writes
    stream: BufWriter<S>,

    /// Client's address (for logging)
    addr: SocketAddr,

    /// Bytes received but not yet consumed as commands
    buffer: BytesMut,

    /// The command handler (shares the engine with every other session)
    command_handler: CommandHandler,

    /// Connection statistics (shared)
    stats: Arc<ConnectionStats>,
}

impl<S> ConnectionHandler<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Creates a new connection handler.
    ///
    /// # Arguments
    ///
    /// * `stream` - The client stream for this connection
    /// * `addr` - The client's socket address
    /// * `command_handler` - The command handler for executing commands
    /// * `stats` - Shared connection statistics
    pub fn new(
        stream: S,
        addr: SocketAddr,
        command_handler: CommandHandler,
        stats: Arc<ConnectionStats>,
    ) -> Self {
        Self {
            stream: BufWriter::new(stream),
            addr,
            buffer: BytesMut::with_capacity(INITIAL_BUFFER_SIZE),
            command_handler,
            stats,
        }
    }

    /// Runs the session until the client exits, disconnects, or breaks the
    /// framing.
    pub async fn run(mut self) -> Result<(), ConnectionError> {
        self.stats.connection_opened();
        info!(client = %self.addr, "Client connected");

        let result = self.main_loop().await;

        match &result {
            Ok(()) => info!(client = %self.addr, "Client disconnected gracefully"),
            Err(e) => match e {
                ConnectionError::ClientDisconnected => {
                    debug!(client = %self.addr, "Client disconnected")
                }
                ConnectionError::IoError(io_err)
                    if io_err.kind() == std::io::ErrorKind::ConnectionReset =>
                {
                    debug!(client = %self.addr, "Connection reset by client")
                }
                _ => warn!(client = %self.addr, error = %e, "Connection error"),
            },
        }

        self.stats.connection_closed();
        result
    }

    /// The main drain-respond-read loop.
    async fn main_loop(&mut self) -> Result<(), ConnectionError> {
        let mut out = Vec::new();

        loop {
            out.clear();
            let drained = self.drain_commands(&mut out);

            // Replies to commands that preceded a bad frame still go out.
            if !out.is_empty() {
                self.send_replies(&out).await?;
            }

            match drained? {
                Drained::Exit => return Ok(()),
                Drained::NeedMore => self.read_more_data().await?,
            }
        }
    }

    /// Executes every complete command in the buffer, appending encoded
    /// replies to `out`.
    fn drain_commands(&mut self, out: &mut Vec<u8>) -> Result<Drained, ConnectionError> {
        loop {
            let incoming = match next_incoming(&mut self.buffer) {
                Ok(Some(incoming)) => incoming,
                Ok(None) => {
                    trace!(
                        client = %self.addr,
                        buffered = self.buffer.len(),
                        "Incomplete command, need more data"
                    );
                    return Ok(Drained::NeedMore);
                }
                Err(e) => {
                    warn!(client = %self.addr, error = %e, "Framing error, closing connection");
                    return Err(e);
                }
            };

            match incoming {
                Incoming::Exit => {
                    debug!(client = %self.addr, "Client sent EXIT");
                    return Ok(Drained::Exit);
                }
                Incoming::Command { args, protocol } => {
                    let reply = self.command_handler.dispatch(&args);
                    self.stats.command_processed();
                    trace!(
                        client = %self.addr,
                        ?protocol,
                        error = reply.is_error(),
                        remaining = self.buffer.len(),
                        "Executed command"
                    );
                    reply.encode_into(protocol, out);
                }
            }
        }
    }

    /// Reads more data from the socket into the buffer.
    async fn read_more_data(&mut self) -> Result<(), ConnectionError> {
        let limit = pending_limit(&self.buffer);
        if self.buffer.len() >= limit {
            error!(
                client = %self.addr,
                size = self.buffer.len(),
                limit,
                "Pending message size limit exceeded"
            );
            return Err(ConnectionError::BufferFull);
        }

        // Ensure we have some capacity
        if self.buffer.capacity() - self.buffer.len() < 1024 {
            self.buffer.reserve(4096);
        }

        let n = self.stream.get_mut().read_buf(&mut self.buffer).await?;

        if n == 0 {
            // Connection closed by client
            if self.buffer.is_empty() {
                return Err(ConnectionError::ClientDisconnected);
            } else {
                // Partial command in buffer
                return Err(ConnectionError::UnexpectedEof);
            }
        }

        self.stats.bytes_read(n);
        trace!(client = %self.addr, bytes = n, "Read data");

        Ok(())
    }

    /// Writes a batch of encoded replies and flushes.
    async fn send_replies(&mut self, bytes: &[u8]) -> Result<(), ConnectionError> {
        self.stream.write_all(bytes).await?;
        self.stream.flush().await?;
        self.stats.bytes_written(bytes.len());
        trace!(
            client = %self.addr,
            bytes = bytes.len(),
            "Sent replies"
        );
        Ok(())
    }
}

/// Errors that can occur while handling a connection.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    /// I/O error (network issue)
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Malformed structured frame; the stream cannot be resynchronized
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),

    /// Client disconnected normally
    #[error("Client disconnected")]
    ClientDisconnected,

    /// Unexpected end of stream (partial command)
    #[error("Unexpected end of stream")]
    UnexpectedEof,

    /// Buffer size limit exceeded
    #[error("Buffer size limit exceeded")]
    BufferFull,
}

/// Handles a client connection.
///
/// This is a convenience function that creates a ConnectionHandler
/// and runs it to completion.
pub async fn handle_connection<S>(
    stream: S,
    addr: SocketAddr,
    command_handler: CommandHandler,
    stats: Arc<ConnectionStats>,
) where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let handler = ConnectionHandler::new(stream, addr, command_handler, stats);
    if let Err(e) = handler.run().await {
        match e {
            ConnectionError::ClientDisconnected => {}
            ConnectionError::IoError(ref io_err)
                if io_err.kind() == std::io::ErrorKind::ConnectionReset => {}
            _ => {
                debug!(client = %addr, error = %e, "Connection ended with error");
            }
        }
    }
}
