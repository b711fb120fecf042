//! Reply Types and Wire Encoders
//!
//! A [`Reply`] is what the dispatcher produces. It knows nothing about the
//! wire; [`Reply::encode`] renders it for one of the two surface protocols.
//!
//! ## Structured (RESP) encoding
//!
//! - Status: `+OK\r\n`
//! - Error: `-ERR unknown command 'FOO'\r\n`
//! - Integer: `:1000\r\n`
//! - Bulk: `$5\r\nhello\r\n`
//! - Nil: `$-1\r\n`
//!
//! ## Line encoding
//!
//! One plain-text line per reply, terminated by `\n`:
//! `OK`, `PONG`, the raw value, `(nil)`, `(error) ERR <message>`, or a
//! decimal integer.

use bytes::Bytes;
use thiserror::Error;

/// The CRLF terminator used by the structured protocol
pub const CRLF: &[u8] = b"\r\n";

/// Structured protocol type prefixes
pub mod prefix {
    pub const STATUS: u8 = b'+';
    pub const ERROR: u8 = b'-';
    pub const INTEGER: u8 = b':';
    pub const BULK_STRING: u8 = b'$';
    pub const ARRAY: u8 = b'*';
}

/// The wire protocol a message arrived on, and therefore the one its reply
/// must be encoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    /// Binary-safe array-of-bulk-strings framing.
    Resp,
    /// Legacy whitespace-tokenized text lines.
    Line,
}

/// Command-level failures. These are reported to the client and never close
/// the connection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorReply {
    /// The command exists but was called with the wrong number of arguments.
    /// Holds the lowercased command name.
    #[error("wrong number of arguments for '{0}'")]
    WrongArity(String),

    /// The command name is not in the table. Holds the name as supplied.
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    /// An argument or stored value is not a base-10 i64, or the result
    /// overflowed.
    #[error("value is not an integer or out of range")]
    NotInteger,

    #[error("empty command")]
    EmptyCommand,
}

impl ErrorReply {
    /// Returns the message text as it appears after `ERR ` for `protocol`.
    ///
    /// The line protocol reports unknown command names lowercased; the
    /// structured protocol echoes the name exactly as the client sent it.
    pub fn message(&self, protocol: Protocol) -> String {
        match (self, protocol) {
            (ErrorReply::UnknownCommand(name), Protocol::Line) => {
                format!("unknown command '{}'", name.to_ascii_lowercase())
            }
            _ => self.to_string(),
        }
    }
}

/// A structured reply, independent of wire encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Status(String),
    Integer(i64),
    Bulk(Bytes),
    Nil,
    Error(ErrorReply),
}

impl Reply {
    pub fn status(s: impl Into<String>) -> Self {
        Reply::Status(s.into())
    }

    pub fn integer(n: i64) -> Self {
        Reply::Integer(n)
    }

    pub fn bulk(data: impl Into<Bytes>) -> Self {
        Reply::Bulk(data.into())
    }

    pub fn error(e: ErrorReply) -> Self {
        Reply::Error(e)
    }

    /// Common reply for successful writes
    pub fn ok() -> Self {
        Reply::status("OK")
    }

    pub fn pong() -> Self {
        Reply::status("PONG")
    }

    /// Returns true if this reply is an error.
    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error(_))
    }

    /// Encodes the reply for the given protocol.
    pub fn encode(&self, protocol: Protocol) -> Vec<u8> {
        let mut buf = Vec::new();
        self.encode_into(protocol, &mut buf);
        buf
    }

    /// Encodes the reply into an existing buffer.
    ///
    /// Sessions use this to batch the replies of a pipelined read into a
    /// single write.
    pub fn encode_into(&self, protocol: Protocol, buf: &mut Vec<u8>) {
        match protocol {
            Protocol::Resp => self.encode_resp(buf),
            Protocol::Line => self.encode_line(buf),
        }
    }

    fn encode_resp(&self, buf: &mut Vec<u8>) {
        match self {
            Reply::Status(s) => {
                buf.push(prefix::STATUS);
                buf.extend_from_slice(s.as_bytes());
                buf.extend_from_slice(CRLF);
            }
            Reply::Error(e) => {
                buf.push(prefix::ERROR);
                buf.extend_from_slice(b"ERR ");
                buf.extend_from_slice(e.message(Protocol::Resp).as_bytes());
                buf.extend_from_slice(CRLF);
            }
            Reply::Integer(n) => {
                buf.push(prefix::INTEGER);
                buf.extend_from_slice(n.to_string().as_bytes());
                buf.extend_from_slice(CRLF);
            }
            Reply::Bulk(data) => {
                buf.push(prefix::BULK_STRING);
                buf.extend_from_slice(data.len().to_string().as_bytes());
                buf.extend_from_slice(CRLF);
                buf.extend_from_slice(data);
                buf.extend_from_slice(CRLF);
            }
            Reply::Nil => {
                buf.push(prefix::BULK_STRING);
                buf.extend_from_slice(b"-1");
                buf.extend_from_slice(CRLF);
            }
        }
    }

    fn encode_line(&self, buf: &mut Vec<u8>) {
        match self {
            Reply::Status(s) => buf.extend_from_slice(s.as_bytes()),
            Reply::Error(e) => {
                buf.extend_from_slice(b"(error) ERR ");
                buf.extend_from_slice(e.message(Protocol::Line).as_bytes());
            }
            Reply::Integer(n) => buf.extend_from_slice(n.to_string().as_bytes()),
            Reply::Bulk(data) => buf.extend_from_slice(data),
            Reply::Nil => buf.extend_from_slice(b"(nil)"),
        }
        buf.push(b'\n');
    }
}

/// Encodes a request as a structured frame: `*<n>\r\n` followed by one bulk
/// string per argument.
pub fn encode_command<A: AsRef<[u8]>>(args: &[A]) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.push(prefix::ARRAY);
    buf.extend_from_slice(args.len().to_string().as_bytes());
    buf.extend_from_slice(CRLF);
    for arg in args {
        let arg = arg.as_ref();
        buf.push(prefix::BULK_STRING);
        buf.extend_from_slice(arg.len().to_string().as_bytes());
        buf.extend_from_slice(CRLF);
        buf.extend_from_slice(arg);
        buf.extend_from_slice(CRLF);
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_encode() {
        assert_eq!(Reply::ok().encode(Protocol::Resp), b"+OK\r\n");
        assert_eq!(Reply::pong().encode(Protocol::Resp), b"+PONG\r\n");
        assert_eq!(Reply::ok().encode(Protocol::Line), b"OK\n");
        assert_eq!(Reply::pong().encode(Protocol::Line), b"PONG\n");
        assert_eq!(Reply::ok(), Reply::status("OK"));
        assert_eq!(Reply::status("QUEUED").encode(Protocol::Line), b"QUEUED\n");
    }

    #[test]
    fn test_integer_encode() {
        assert_eq!(Reply::integer(1000).encode(Protocol::Resp), b":1000\r\n");
        assert_eq!(Reply::integer(-2).encode(Protocol::Resp), b":-2\r\n");
        assert_eq!(Reply::integer(-2).encode(Protocol::Line), b"-2\n");
    }

    #[test]
    fn test_bulk_encode() {
        let reply = Reply::bulk(Bytes::from("hello"));
        assert_eq!(reply.encode(Protocol::Resp), b"$5\r\nhello\r\n");
        assert_eq!(reply.encode(Protocol::Line), b"hello\n");

        let empty = Reply::bulk(Bytes::new());
        assert_eq!(empty.encode(Protocol::Resp), b"$0\r\n\r\n");
    }

    #[test]
    fn test_nil_encode() {
        assert_eq!(Reply::Nil.encode(Protocol::Resp), b"$-1\r\n");
        assert_eq!(Reply::Nil.encode(Protocol::Line), b"(nil)\n");
    }

    #[test]
    fn test_error_encode() {
        let reply = Reply::error(ErrorReply::WrongArity("del".to_string()));
        assert_eq!(
            reply.encode(Protocol::Resp),
            b"-ERR wrong number of arguments for 'del'\r\n"
        );
        assert_eq!(
            reply.encode(Protocol::Line),
            b"(error) ERR wrong number of arguments for 'del'\n"
        );

        let reply = Reply::error(ErrorReply::NotInteger);
        assert_eq!(
            reply.encode(Protocol::Resp),
            b"-ERR value is not an integer or out of range\r\n"
        );
    }

    #[test]
    fn test_unknown_command_case_per_protocol() {
        let reply = Reply::error(ErrorReply::UnknownCommand("FooBar".to_string()));
        assert_eq!(
            reply.encode(Protocol::Resp),
            b"-ERR unknown command 'FooBar'\r\n"
        );
        assert_eq!(
            reply.encode(Protocol::Line),
            b"(error) ERR unknown command 'foobar'\n"
        );
    }

    #[test]
    fn test_encode_into_appends() {
        let mut buf = Vec::new();
        Reply::ok().encode_into(Protocol::Resp, &mut buf);
        Reply::integer(1).encode_into(Protocol::Resp, &mut buf);
        assert_eq!(buf, b"+OK\r\n:1\r\n");
    }

    #[test]
    fn test_encode_command() {
        assert_eq!(
            encode_command(&["GET", "name"]),
            b"*2\r\n$3\r\nGET\r\n$4\r\nname\r\n"
        );
        assert_eq!(encode_command::<&str>(&[]), b"*0\r\n");
    }
}
