//! Server configuration.
//!
//! Every setting can come from a command-line flag or an environment
//! variable; flags win.

use crate::{DEFAULT_HOST, DEFAULT_PORT};
use clap::Parser;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "tinykv", version, about = "In-memory key-value server", long_about = None)]
pub struct Config {
    /// Host to bind to
    #[arg(long, env = "TINYKV_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "TINYKV_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Log filter used when RUST_LOG is unset (e.g. "debug", "tinykv=trace")
    #[arg(long, env = "TINYKV_LOG", default_value = "info")]
    pub log_level: String,

    /// Run the interactive console on stdin/stdout instead of the server
    #[arg(long)]
    pub console: bool,
}

impl Config {
    /// Returns the bind address as a string
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_level: "info".to_string(),
            console: false,
        }
    }
}
