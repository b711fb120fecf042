//! Wire Protocol Implementation
//!
//! tinykv speaks two protocols on the same port:
//!
//! - **Structured**: binary-safe arrays of bulk strings (`*<n>\r\n$<len>\r\n...`)
//! - **Line**: whitespace-separated words, one command per line
//!
//! ## Modules
//!
//! - `parser`: stateless frame parser and line tokenizer for incoming data
//! - `types`: the `Reply` enum and its encoders for both protocols
//!
//! ## Example
//!
//! ```
//! use tinykv::protocol::{parse_frame, Protocol, Reply};
//!
//! // Parsing incoming data
//! let data = b"*2\r\n$3\r\nGET\r\n$4\r\nname\r\n";
//! let frame = parse_frame(data).unwrap().unwrap();
//! assert_eq!(frame.consumed, data.len());
//!
//! // Encoding replies
//! assert_eq!(Reply::ok().encode(Protocol::Resp), b"+OK\r\n");
//! assert_eq!(Reply::Nil.encode(Protocol::Line), b"(nil)\n");
//! ```

pub mod parser;
pub mod types;

pub use parser::{
    is_exit, parse_frame, parse_line, scan_frame, Frame, FrameLayout, ParseError, ParseResult,
};
pub use types::{encode_command, ErrorReply, Protocol, Reply};
