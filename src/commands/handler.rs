//! Command Handler Module
//!
//! Interprets a parsed argument list against the storage engine and returns a
//! [`Reply`]. The handler never sees the wire: both the structured and the
//! line protocol feed it the same `&[Bytes]`, and only the encoding of the
//! reply differs.
//!
//! ## Command Table
//!
//! | Command | Arity (incl. name) | Reply |
//! |---|---|---|
//! | `PING` | 1 | `PONG` |
//! | `GET key` | 2 | bulk value or nil |
//! | `SET key value` | 3 | `OK` |
//! | `DEL key` | 2 | 1 or 0 |
//! | `EXPIRE key seconds` | 3 | 1 or 0 |
//! | `TTL key` | 2 | seconds, -1 or -2 |
//! | `INCRBY key delta` | 3 | new value |
//! | `DECRBY key delta` | 3 | new value |
//! | `EXISTS key [key ...]` | 2+ | number of keys present |
//!
//! Command names are case-insensitive.

use crate::protocol::{ErrorReply, Reply};
use crate::storage::{parse_integer, StorageEngine, StoreError};
use bytes::Bytes;
use std::sync::Arc;

impl From<StoreError> for ErrorReply {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotInteger => ErrorReply::NotInteger,
        }
    }
}

/// Dispatches commands to the storage engine.
///
/// Cloning is cheap; every clone shares the same engine.
#[derive(Debug, Clone)]
pub struct CommandHandler {
    storage: Arc<StorageEngine>,
}

impl CommandHandler {
    /// Creates a new command handler with the given storage engine.
    pub fn new(storage: Arc<StorageEngine>) -> Self {
        Self { storage }
    }

    /// Returns the storage engine this handler executes against.
    pub fn storage(&self) -> &Arc<StorageEngine> {
        &self.storage
    }

    /// Executes one command and returns its reply.
    ///
    /// `args[0]` is the command name. Apart from the store mutation the
    /// command itself implies, this has no side effects.
    pub fn dispatch(&self, args: &[Bytes]) -> Reply {
        let Some(name) = args.first() else {
            return Reply::error(ErrorReply::EmptyCommand);
        };

        let cmd = String::from_utf8_lossy(name).to_ascii_lowercase();
        let args = &args[1..];

        match cmd.as_str() {
            "ping" => self.cmd_ping(args),
            "get" => self.cmd_get(args),
            "set" => self.cmd_set(args),
            "del" => self.cmd_del(args),
            "expire" => self.cmd_expire(args),
            "ttl" => self.cmd_ttl(args),
            "incrby" => self.cmd_incrby(args),
            "decrby" => self.cmd_decrby(args),
            "exists" => self.cmd_exists(args),

            _ => Reply::error(ErrorReply::UnknownCommand(
                String::from_utf8_lossy(name).into_owned(),
            )),
        }
    }

    /// PING
    fn cmd_ping(&self, args: &[Bytes]) -> Reply {
        if !args.is_empty() {
            return wrong_arity("ping");
        }
        Reply::pong()
    }

    /// GET key
    fn cmd_get(&self, args: &[Bytes]) -> Reply {
        let [key] = args else {
            return wrong_arity("get");
        };

        match self.storage.get(key) {
            Some(value) => Reply::bulk(value),
            None => Reply::Nil,
        }
    }

    /// SET key value
    fn cmd_set(&self, args: &[Bytes]) -> Reply {
        let [key, value] = args else {
            return wrong_arity("set");
        };

        self.storage.set(key.clone(), value.clone());
        Reply::ok()
    }

    /// DEL key
    fn cmd_del(&self, args: &[Bytes]) -> Reply {
        let [key] = args else {
            return wrong_arity("del");
        };

        Reply::integer(i64::from(self.storage.delete(key)))
    }

    /// EXPIRE key seconds
    fn cmd_expire(&self, args: &[Bytes]) -> Reply {
        let [key, seconds] = args else {
            return wrong_arity("expire");
        };

        let Some(seconds) = parse_integer(seconds) else {
            return Reply::error(ErrorReply::NotInteger);
        };

        Reply::integer(i64::from(self.storage.expire(key, seconds)))
    }

    /// TTL key
    fn cmd_ttl(&self, args: &[Bytes]) -> Reply {
        let [key] = args else {
            return wrong_arity("ttl");
        };

        Reply::integer(self.storage.ttl(key))
    }

    /// INCRBY key increment
    fn cmd_incrby(&self, args: &[Bytes]) -> Reply {
        let [key, delta] = args else {
            return wrong_arity("incrby");
        };

        let Some(delta) = parse_integer(delta) else {
            return Reply::error(ErrorReply::NotInteger);
        };

        match self.storage.incr_by(key, delta) {
            Ok(n) => Reply::integer(n),
            Err(e) => Reply::error(e.into()),
        }
    }

    /// DECRBY key decrement
    fn cmd_decrby(&self, args: &[Bytes]) -> Reply {
        let [key, delta] = args else {
            return wrong_arity("decrby");
        };

        let Some(delta) = parse_integer(delta) else {
            return Reply::error(ErrorReply::NotInteger);
        };

        match self.storage.decr_by(key, delta) {
            Ok(n) => Reply::integer(n),
            Err(e) => Reply::error(e.into()),
        }
    }

    /// EXISTS key [key ...]
    fn cmd_exists(&self, args: &[Bytes]) -> Reply {
        if args.is_empty() {
            return wrong_arity("exists");
        }

        Reply::integer(self.storage.exists(args))
    }
}

fn wrong_arity(name: &str) -> Reply {
    Reply::error(ErrorReply::WrongArity(name.to_string()))
}
