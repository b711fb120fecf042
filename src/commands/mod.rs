//! Command Handler Module
//!
//! This module is the single command interpreter for tinykv. It receives
//! parsed argument lists, executes them against the storage engine, and
//! returns structured replies.
//!
//! ## Architecture
//!
//! ```text
//!   structured frame          text line
//!         │                       │
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  parse_frame  │       │  parse_line   │   (protocol module)
//! └───────┬───────┘       └───────┬───────┘
//!         └───────────┬───────────┘
//!                     ▼
//!            ┌─────────────────┐
//!            │ CommandHandler  │  (this module)
//!            └────────┬────────┘
//!                     ▼
//!            ┌─────────────────┐
//!            │ StorageEngine   │  (storage module)
//!            └─────────────────┘
//! ```
//!
//! ## Supported Commands
//!
//! - `PING`
//! - `GET`, `SET`, `DEL`, `EXISTS`
//! - `EXPIRE`, `TTL`
//! - `INCRBY`, `DECRBY`

pub mod handler;

pub use handler::CommandHandler;
