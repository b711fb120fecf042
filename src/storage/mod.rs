//! Storage Engine Module
//!
//! This module provides the key-value table for tinykv: a thread-safe,
//! sharded map from key to value with optional per-key deadlines.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     StorageEngine                           │
//! │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐           │
//! │  │ Shard 0 │ │ Shard 1 │ │ Shard 2 │ │...64    │           │
//! │  │ RwLock  │ │ RwLock  │ │ RwLock  │ │ shards  │           │
//! │  └─────────┘ └─────────┘ └─────────┘ └─────────┘           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Features
//!
//! - **Sharded Storage**: 64 independent shards reduce lock contention
//! - **TTL Support**: Keys can carry a deadline set by `expire`
//! - **Lazy Expiry**: Expired keys are removed when next touched, never in the background
//!
//! ## Example
//!
//! ```
//! use tinykv::storage::StorageEngine;
//! use bytes::Bytes;
//!
//! let engine = StorageEngine::new();
//!
//! engine.set(Bytes::from("visits"), Bytes::from("41"));
//! assert_eq!(engine.incr_by(b"visits", 1), Ok(42));
//! assert_eq!(engine.ttl(b"visits"), -1);
//! assert_eq!(engine.ttl(b"missing"), -2);
//! ```

pub mod engine;

pub use engine::{parse_integer, Entry, StorageEngine, StorageStats, StoreError};
