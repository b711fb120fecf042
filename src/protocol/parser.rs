//! Incremental Frame Parser
//!
//! Decodes one request frame from the start of a byte buffer:
//!
//! ```text
//! *<n>\r\n  then n times  $<len>\r\n<len bytes>\r\n
//! ```
//!
//! The parser is stateless. Each call returns one of:
//! - `Ok(Some(frame))` - a complete frame; `frame.consumed` bytes were used
//! - `Ok(None)` - the buffer is a valid but incomplete prefix, need more data
//! - `Err(ParseError)` - the prefix can never become a valid frame
//!
//! This lets the caller:
//! 1. Append incoming network data to a buffer
//! 2. Call [`scan_frame`] (or [`parse_frame`] for owned copies)
//! 3. On success, split `consumed` bytes off the buffer and call again (pipelining)
//! 4. If incomplete, wait for more data and retry with the same prefix
//! 5. On error, drop the connection; there is no resynchronization
//!
//! [`scan_frame`] only records where each argument lives, so retrying an
//! incomplete frame never copies payload bytes.

use crate::protocol::types::{prefix, CRLF};
use bytes::{Bytes, BytesMut};
use std::ops::Range;
use thiserror::Error;

/// Errors that can occur while decoding a request frame.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A frame or bulk string did not start with its type prefix
    #[error("expected '{expected}', found {found:#04x}")]
    UnexpectedPrefix { expected: char, found: u8 },

    /// A length field held something other than ASCII digits
    #[error("invalid byte {0:#04x} in length field")]
    InvalidLengthByte(u8),

    #[error("empty length field")]
    EmptyLength,

    #[error("length field overflows")]
    LengthOverflow,

    /// Protocol violation (missing CRLF, etc.)
    #[error("protocol error: {0}")]
    ProtocolError(&'static str),

    /// A bulk string exceeds the maximum allowed size
    #[error("bulk string too large: {size} bytes (max: {max})")]
    MessageTooLarge { size: usize, max: usize },

    /// A frame declares more arguments than allowed
    #[error("too many arguments: {count} (max: {max})")]
    TooManyArguments { count: usize, max: usize },
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Maximum size for a single bulk string (512 MB, same as Redis)
pub const MAX_BULK_SIZE: usize = 512 * 1024 * 1024;

/// Maximum number of arguments in one frame (same as Redis)
pub const MAX_FRAME_ARGS: usize = 1024 * 1024;

/// Upper bound on the argument vector preallocated from an untrusted count
const MAX_PREALLOC_ARGS: usize = 64;

/// One decoded request frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// The bulk strings in order; the first is the command name
    pub args: Vec<Bytes>,
    /// Exact byte length of the frame, `*` through the final `\r\n`
    pub consumed: usize,
}

/// Where the arguments of one complete frame sit in the scanned buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameLayout {
    /// Byte range of each argument's payload, relative to the frame start
    pub args: Vec<Range<usize>>,
    /// Exact byte length of the frame
    pub consumed: usize,
}

impl FrameLayout {
    /// Splits the frame off the front of `buffer` and returns its arguments
    /// as views into the frame's memory.
    ///
    /// `buffer` must be the buffer this layout was scanned from.
    pub fn split_from(self, buffer: &mut BytesMut) -> Vec<Bytes> {
        let frame = buffer.split_to(self.consumed).freeze();
        self.args.into_iter().map(|range| frame.slice(range)).collect()
    }
}

/// Scans exactly one frame at the start of `buf` without copying payloads.
///
/// Never reads past `buf.len()`. A length field that points beyond the
/// available data yields `Ok(None)` as long as the numeral was well-formed.
pub fn scan_frame(buf: &[u8]) -> ParseResult<Option<FrameLayout>> {
    let Some(&first) = buf.first() else {
        return Ok(None);
    };
    if first != prefix::ARRAY {
        return Err(ParseError::UnexpectedPrefix {
            expected: char::from(prefix::ARRAY),
            found: first,
        });
    }

    let (count, mut cursor) = match parse_length(buf, 1)? {
        Some(parsed) => parsed,
        None => return Ok(None),
    };

    if count > MAX_FRAME_ARGS {
        return Err(ParseError::TooManyArguments {
            count,
            max: MAX_FRAME_ARGS,
        });
    }

    let mut args = Vec::with_capacity(count.min(MAX_PREALLOC_ARGS));

    for _ in 0..count {
        match parse_bulk(buf, cursor)? {
            Some((range, next)) => {
                args.push(range);
                cursor = next;
            }
            None => return Ok(None),
        }
    }

    Ok(Some(FrameLayout {
        args,
        consumed: cursor,
    }))
}

/// Decodes exactly one frame from the start of `buf` into owned arguments.
///
/// Same contract as [`scan_frame`]; payloads are copied only once the whole
/// frame is present.
pub fn parse_frame(buf: &[u8]) -> ParseResult<Option<Frame>> {
    let Some(layout) = scan_frame(buf)? else {
        return Ok(None);
    };

    Ok(Some(Frame {
        args: layout
            .args
            .into_iter()
            .map(|range| Bytes::copy_from_slice(&buf[range]))
            .collect(),
        consumed: layout.consumed,
    }))
}

/// Parses `$<len>\r\n<data>\r\n` starting at `start`.
///
/// Returns the payload range and the index just past its trailing CRLF.
fn parse_bulk(buf: &[u8], start: usize) -> ParseResult<Option<(Range<usize>, usize)>> {
    let Some(&first) = buf.get(start) else {
        return Ok(None);
    };
    if first != prefix::BULK_STRING {
        return Err(ParseError::UnexpectedPrefix {
            expected: char::from(prefix::BULK_STRING),
            found: first,
        });
    }

    let (length, data_start) = match parse_length(buf, start + 1)? {
        Some(parsed) => parsed,
        None => return Ok(None),
    };

    if length > MAX_BULK_SIZE {
        return Err(ParseError::MessageTooLarge {
            size: length,
            max: MAX_BULK_SIZE,
        });
    }

    let data_end = data_start + length;

    // Check whatever part of the trailer has arrived so a bad terminator is
    // reported as soon as it is visible.
    let available = buf.len().saturating_sub(data_end).min(CRLF.len());
    if buf[data_end.min(buf.len())..][..available] != CRLF[..available] {
        return Err(ParseError::ProtocolError(
            "bulk string missing trailing CRLF",
        ));
    }
    if available < CRLF.len() {
        return Ok(None);
    }

    Ok(Some((data_start..data_end, data_end + CRLF.len())))
}

/// Parses a non-negative decimal length terminated by CRLF, starting at
/// `start`.
///
/// Returns the value and the index just past the CRLF. Any byte other than a
/// digit before the terminator is an error, so `-1`, `+3` and ` 3` are all
/// rejected.
fn parse_length(buf: &[u8], start: usize) -> ParseResult<Option<(usize, usize)>> {
    let mut value: usize = 0;
    let mut pos = start;

    loop {
        let Some(&byte) = buf.get(pos) else {
            return Ok(None);
        };

        match byte {
            b'0'..=b'9' => {
                value = value
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(usize::from(byte - b'0')))
                    .ok_or(ParseError::LengthOverflow)?;
                pos += 1;
            }
            b'\r' => {
                if pos == start {
                    return Err(ParseError::EmptyLength);
                }
                return match buf.get(pos + 1) {
                    None => Ok(None),
                    Some(b'\n') => Ok(Some((value, pos + 2))),
                    Some(_) => Err(ParseError::ProtocolError("length not terminated by CRLF")),
                };
            }
            other => return Err(ParseError::InvalidLengthByte(other)),
        }
    }
}

/// Splits one line of the plain-text protocol into arguments.
///
/// Tokens are separated by runs of ASCII whitespace. There is no quoting, so
/// a value cannot contain spaces on this protocol.
pub fn parse_line(line: &[u8]) -> Vec<Bytes> {
    line.split(|b| b.is_ascii_whitespace())
        .filter(|token| !token.is_empty())
        .map(Bytes::copy_from_slice)
        .collect()
}

/// True when a tokenized line is exactly `EXIT` or `exit`.
///
/// That line ends a line-protocol session and is never dispatched.
pub fn is_exit(args: &[Bytes]) -> bool {
    matches!(args, [word] if word.as_ref() == b"EXIT" || word.as_ref() == b"exit")
}
