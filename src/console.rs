//! Interactive console.
//!
//! Reads one command per line, executes it against the shared engine and
//! prints the reply in the line format. Ends on `EXIT`, `exit` or end of
//! input.

use crate::commands::CommandHandler;
use crate::protocol::{is_exit, parse_line, Protocol};
use std::io::{self, BufRead, Write};
use tracing::debug;

const BANNER: &str = "tinykv - type EXIT to quit";
const PROMPT: &str = "> ";
const FAREWELL: &str = "Goodbye!";

/// Runs the console over any line reader and writer.
pub fn run<R, W>(handler: &CommandHandler, mut input: R, mut output: W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "{BANNER}")?;

    let mut line = Vec::new();
    let mut reply = Vec::new();

    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            break;
        }

        let args = parse_line(&line);
        if args.is_empty() {
            continue;
        }
        if is_exit(&args) {
            break;
        }

        reply.clear();
        handler.dispatch(&args).encode_into(Protocol::Line, &mut reply);
        output.write_all(&reply)?;
    }

    writeln!(output, "{FAREWELL}")?;
    output.flush()?;

    debug!(keys = handler.storage().len(), "Console session ended");
    Ok(())
}
