//! Thread-Safe Storage Engine with Lazy Expiry
//!
//! This module implements the key-value table behind every command.
//!
//! ## Design Decisions
//!
//! 1. **Sharded Locks**: Keys hash into one of 64 shards, each behind its own `RwLock`.
//! 2. **Lazy Expiry Only**: An entry whose deadline has passed is removed by the next
//!    operation that touches that key. Nothing sweeps in the background, so expired
//!    keys that are never touched again keep their memory until then.
//! 3. **Atomic Check-Then-Act**: Every purge-then-act sequence runs under the
//!    shard's write lock, so no other operation on the same key can interleave.
//!
//! ## Concurrency Model
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     StorageEngine                           │
//! │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐           │
//! │  │ Shard 0 │ │ Shard 1 │ │ Shard 2 │ │ Shard N │           │
//! │  │ RwLock  │ │ RwLock  │ │ RwLock  │ │ RwLock  │           │
//! │  │ HashMap │ │ HashMap │ │ HashMap │ │ HashMap │           │
//! │  └─────────┘ └─────────┘ └─────────┘ └─────────┘           │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use bytes::Bytes;
use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Number of shards for the storage engine.
const NUM_SHARDS: usize = 64;

/// Errors returned by storage operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The stored value or the arithmetic result is not a valid i64.
    #[error("value is not an integer or out of range")]
    NotInteger,
}

/// Represents a stored value with optional expiry time.
#[derive(Debug, Clone)]
pub struct Entry {
    /// The actual value stored
    pub value: Bytes,
    /// When this entry expires (None = never expires)
    pub expires_at: Option<Instant>,
}

impl Entry {
    /// Creates a new entry without expiry.
    pub fn new(value: Bytes) -> Self {
        Self {
            value,
            expires_at: None,
        }
    }

    /// Checks if this entry's deadline has passed at `now`.
    #[inline]
    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|exp| now >= exp)
    }
}

type Table = HashMap<Bytes, Entry>;

/// A single shard containing a portion of the key-value pairs.
#[derive(Debug, Default)]
struct Shard {
    data: RwLock<Table>,
}

impl Shard {
    // Every critical section leaves the map consistent, so a panic in another
    // holder does not invalidate the data.
    fn read(&self) -> RwLockReadGuard<'_, Table> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Table> {
        self.data.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Snapshot of storage counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageStats {
    /// Physically stored entries, including expired ones not yet purged
    pub keys: usize,
    pub get_ops: u64,
    pub set_ops: u64,
    pub del_ops: u64,
    /// Entries removed by lazy purge
    pub expired: u64,
}

/// The key-value table shared by every session.
///
/// # Thread Safety
///
/// Wrap it in an `Arc` and hand a clone to each
/// [`CommandHandler`](crate::commands::CommandHandler). All operations take
/// `&self`.
///
/// # Example
///
/// ```
/// use tinykv::storage::StorageEngine;
/// use bytes::Bytes;
///
/// let engine = StorageEngine::new();
///
/// engine.set(Bytes::from("name"), Bytes::from("Ariz"));
/// assert_eq!(engine.get(b"name"), Some(Bytes::from("Ariz")));
///
/// assert!(engine.expire(b"name", 60));
/// assert!(engine.ttl(b"name") <= 60);
/// ```
pub struct StorageEngine {
    shards: Vec<Shard>,

    get_count: AtomicU64,
    set_count: AtomicU64,
    del_count: AtomicU64,
    expired_count: AtomicU64,
}

impl std::fmt::Debug for StorageEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageEngine")
            .field("shards", &self.shards.len())
            .field("get_count", &self.get_count.load(Ordering::Relaxed))
            .field("set_count", &self.set_count.load(Ordering::Relaxed))
            .field("expired_count", &self.expired_count.load(Ordering::Relaxed))
            .finish()
    }
}

impl Default for StorageEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageEngine {
    /// Creates an empty storage engine.
    pub fn new() -> Self {
        let shards = (0..NUM_SHARDS).map(|_| Shard::default()).collect();

        Self {
            shards,
            get_count: AtomicU64::new(0),
            set_count: AtomicU64::new(0),
            del_count: AtomicU64::new(0),
            expired_count: AtomicU64::new(0),
        }
    }

    /// Determines which shard a key belongs to.
    #[inline]
    fn shard_index(&self, key: &[u8]) -> usize {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        (hasher.finish() as usize) % NUM_SHARDS
    }

    #[inline]
    fn get_shard(&self, key: &[u8]) -> &Shard {
        &self.shards[self.shard_index(key)]
    }

    /// Removes `key` if its deadline has passed at `now`.
    ///
    /// Callers hold the shard's write lock for the whole operation.
    fn purge_if_expired(&self, data: &mut Table, key: &[u8], now: Instant) -> bool {
        let expired = data.get(key).is_some_and(|e| e.is_expired_at(now));
        if expired {
            data.remove(key);
            self.expired_count.fetch_add(1, Ordering::Relaxed);
        }
        expired
    }

    /// Sets a key-value pair, clearing any previous expiry.
    pub fn set(&self, key: Bytes, value: Bytes) {
        self.set_count.fetch_add(1, Ordering::Relaxed);

        let shard = self.get_shard(&key);
        shard.write().insert(key, Entry::new(value));
    }

    /// Gets the value for a key.
    ///
    /// Returns `None` if the key doesn't exist or has expired; an expired
    /// entry is removed on the way.
    pub fn get(&self, key: &[u8]) -> Option<Bytes> {
        self.get_count.fetch_add(1, Ordering::Relaxed);

        let shard = self.get_shard(key);

        // Fast path for live keys and misses
        {
            let data = shard.read();
            match data.get(key) {
                Some(entry) if !entry.is_expired_at(Instant::now()) => {
                    return Some(entry.value.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }

        // Expired under the read lock: take the write lock and re-check,
        // another session may have rewritten the key in between.
        let mut data = shard.write();
        self.purge_if_expired(&mut data, key, Instant::now());
        data.get(key).map(|entry| entry.value.clone())
    }

    /// Deletes a key.
    ///
    /// Returns `true` only if a live entry was removed.
    pub fn delete(&self, key: &[u8]) -> bool {
        self.del_count.fetch_add(1, Ordering::Relaxed);

        let shard = self.get_shard(key);
        let mut data = shard.write();

        self.purge_if_expired(&mut data, key, Instant::now());
        data.remove(key).is_some()
    }

    /// Sets a key's expiry to `seconds` from now.
    ///
    /// Returns `false` if the key doesn't exist. A non-positive `seconds`
    /// deletes the key and returns `true`.
    pub fn expire(&self, key: &[u8], seconds: i64) -> bool {
        if seconds <= 0 {
            let shard = self.get_shard(key);
            let mut data = shard.write();

            self.purge_if_expired(&mut data, key, Instant::now());
            return data.remove(key).is_some();
        }

        self.expire_in(key, Duration::from_secs(seconds.unsigned_abs()))
    }

    /// Sets a key's expiry to `ttl` from now, replacing any previous deadline.
    ///
    /// Returns `false` if the key doesn't exist. A deadline too far in the
    /// future to represent leaves the key without expiry.
    pub fn expire_in(&self, key: &[u8], ttl: Duration) -> bool {
        let shard = self.get_shard(key);
        let mut data = shard.write();

        let now = Instant::now();
        self.purge_if_expired(&mut data, key, now);

        match data.get_mut(key) {
            Some(entry) => {
                entry.expires_at = now.checked_add(ttl);
                true
            }
            None => false,
        }
    }

    /// Gets the remaining TTL for a key in whole seconds, rounded down.
    ///
    /// # Returns
    ///
    /// - `-2` if the key doesn't exist, or its deadline has been reached
    /// - `-1` if the key exists but has no expiry
    /// - the remaining seconds otherwise
    pub fn ttl(&self, key: &[u8]) -> i64 {
        let shard = self.get_shard(key);
        let mut data = shard.write();

        let now = Instant::now();
        let Some(entry) = data.get(key) else {
            return -2;
        };

        match entry.expires_at {
            None => -1,
            Some(exp) => {
                let remaining = exp.saturating_duration_since(now);
                if remaining.is_zero() {
                    data.remove(key);
                    self.expired_count.fetch_add(1, Ordering::Relaxed);
                    return -2;
                }
                i64::try_from(remaining.as_secs()).unwrap_or(i64::MAX)
            }
        }
    }

    /// Adds `delta` to the integer stored at `key`.
    ///
    /// A missing key counts as `0`. The stored value must be a base-10 i64
    /// (see [`parse_integer`]) and the sum must not overflow; otherwise the
    /// key is left untouched and [`StoreError::NotInteger`] is returned. The
    /// key's existing deadline, if any, is kept.
    ///
    /// These rules are a reconstruction of the intended INCRBY behavior
    /// rather than behavior observed from an earlier deployment.
    pub fn incr_by(&self, key: &[u8], delta: i64) -> Result<i64, StoreError> {
        let shard = self.get_shard(key);
        let mut data = shard.write();

        self.purge_if_expired(&mut data, key, Instant::now());

        let current = match data.get(key) {
            Some(entry) => parse_integer(&entry.value).ok_or(StoreError::NotInteger)?,
            None => 0,
        };

        let new_value = current.checked_add(delta).ok_or(StoreError::NotInteger)?;
        let value_bytes = Bytes::from(new_value.to_string());

        match data.get_mut(key) {
            Some(entry) => entry.value = value_bytes,
            None => {
                data.insert(Bytes::copy_from_slice(key), Entry::new(value_bytes));
            }
        }

        Ok(new_value)
    }

    /// Subtracts `delta` from the integer stored at `key`.
    ///
    /// `i64::MIN` cannot be negated and is rejected with
    /// [`StoreError::NotInteger`].
    pub fn decr_by(&self, key: &[u8], delta: i64) -> Result<i64, StoreError> {
        let delta = delta.checked_neg().ok_or(StoreError::NotInteger)?;
        self.incr_by(key, delta)
    }

    /// Counts how many of the given keys exist.
    ///
    /// Each key is purged if expired before it is counted. Duplicates are
    /// counted once per occurrence.
    pub fn exists<K: AsRef<[u8]>>(&self, keys: &[K]) -> i64 {
        let mut count = 0;
        for key in keys {
            let key = key.as_ref();
            let shard = self.get_shard(key);
            let mut data = shard.write();

            self.purge_if_expired(&mut data, key, Instant::now());
            if data.contains_key(key) {
                count += 1;
            }
        }
        count
    }

    /// Returns the number of physically stored entries.
    ///
    /// Expired entries that no operation has touched yet are included.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.read().len()).sum()
    }

    /// Returns true if nothing is stored, expired or not.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns storage statistics.
    pub fn stats(&self) -> StorageStats {
        StorageStats {
            keys: self.len(),
            get_ops: self.get_count.load(Ordering::Relaxed),
            set_ops: self.set_count.load(Ordering::Relaxed),
            del_ops: self.del_count.load(Ordering::Relaxed),
            expired: self.expired_count.load(Ordering::Relaxed),
        }
    }
}

/// Parses a strict base-10 signed 64-bit integer.
///
/// Accepts an optional leading `-` followed by one or more ASCII digits and
/// nothing else: no `+`, no whitespace, no trailing bytes.
pub fn parse_integer(bytes: &[u8]) -> Option<i64> {
    let digits = bytes.strip_prefix(b"-").unwrap_or(bytes);
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    std::str::from_utf8(bytes).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_set_and_get() {
        let engine = StorageEngine::new();

        engine.set(Bytes::from("key"), Bytes::from("value"));
        assert_eq!(engine.get(b"key"), Some(Bytes::from("value")));
    }

    #[test]
    fn test_get_nonexistent() {
        let engine = StorageEngine::new();
        assert_eq!(engine.get(b"nonexistent"), None);
    }

    #[test]
    fn test_delete() {
        let engine = StorageEngine::new();

        engine.set(Bytes::from("key"), Bytes::from("value"));
        assert!(engine.delete(b"key"));
        assert_eq!(engine.get(b"key"), None);
        assert!(!engine.delete(b"key")); // Already deleted
    }

    #[test]
    fn test_delete_expired_reports_false() {
        let engine = StorageEngine::new();

        engine.set(Bytes::from("key"), Bytes::from("value"));
        engine.expire_in(b"key", Duration::from_millis(20));
        std::thread::sleep(Duration::from_millis(50));

        assert!(!engine.delete(b"key"));
        assert!(engine.is_empty());
    }

    #[test]
    fn test_ttl_lifecycle_without_expire() {
        let engine = StorageEngine::new();

        assert_eq!(engine.ttl(b"key"), -2);
        engine.set(Bytes::from("key"), Bytes::from("value"));
        assert_eq!(engine.ttl(b"key"), -1);
        engine.delete(b"key");
        assert_eq!(engine.ttl(b"key"), -2);
    }

    #[test]
    fn test_set_clears_ttl() {
        let engine = StorageEngine::new();

        engine.set(Bytes::from("key"), Bytes::from("v1"));
        assert!(engine.expire(b"key", 100));
        assert!(engine.ttl(b"key") > 0);

        engine.set(Bytes::from("key"), Bytes::from("v2"));
        assert_eq!(engine.ttl(b"key"), -1);
    }

    #[test]
    fn test_expire() {
        let engine = StorageEngine::new();

        engine.set(Bytes::from("key"), Bytes::from("value"));
        assert!(engine.expire(b"key", 60));

        let ttl = engine.ttl(b"key");
        assert!((59..=60).contains(&ttl), "ttl was {}", ttl);

        // Overwrites the previous deadline
        assert!(engine.expire(b"key", 10));
        assert!(engine.ttl(b"key") <= 10);
    }

    #[test]
    fn test_expire_missing_key() {
        let engine = StorageEngine::new();
        assert!(!engine.expire(b"missing", 5));
        assert!(!engine.expire(b"missing", 0));
        assert!(engine.is_empty());
    }

    #[test]
    fn test_expire_non_positive_deletes() {
        let engine = StorageEngine::new();

        engine.set(Bytes::from("a"), Bytes::from("1"));
        engine.set(Bytes::from("b"), Bytes::from("2"));

        assert!(engine.expire(b"a", 0));
        assert!(engine.expire(b"b", -5));
        assert_eq!(engine.get(b"a"), None);
        assert_eq!(engine.get(b"b"), None);
        assert_eq!(engine.ttl(b"a"), -2);
    }

    #[test]
    fn test_expiry() {
        let engine = StorageEngine::new();

        engine.set(Bytes::from("key"), Bytes::from("value"));
        assert!(engine.expire_in(b"key", Duration::from_millis(50)));

        // Key should exist immediately
        assert_eq!(engine.exists(&[b"key"]), 1);

        // Wait for expiry
        std::thread::sleep(Duration::from_millis(100));

        // Key should be gone
        assert_eq!(engine.get(b"key"), None);
        assert_eq!(engine.stats().expired, 1);
    }

    #[test]
    fn test_expire_one_second() {
        let engine = StorageEngine::new();

        engine.set(Bytes::from("k"), Bytes::from("v"));
        assert!(engine.expire(b"k", 1));

        std::thread::sleep(Duration::from_millis(1100));

        assert_eq!(engine.ttl(b"k"), -2);
        assert_eq!(engine.get(b"k"), None);
    }

    #[test]
    fn test_ttl_purges_elapsed_entry() {
        let engine = StorageEngine::new();

        engine.set(Bytes::from("k"), Bytes::from("v"));
        engine.expire_in(b"k", Duration::from_millis(10));
        std::thread::sleep(Duration::from_millis(30));

        assert_eq!(engine.len(), 1);
        assert_eq!(engine.ttl(b"k"), -2);
        assert_eq!(engine.len(), 0);
    }

    #[test]
    fn test_ttl_rounds_down() {
        let engine = StorageEngine::new();

        engine.set(Bytes::from("k"), Bytes::from("v"));
        engine.expire_in(b"k", Duration::from_millis(1500));
        assert_eq!(engine.ttl(b"k"), 1);

        engine.expire_in(b"k", Duration::from_millis(500));
        assert_eq!(engine.ttl(b"k"), 0);
    }

    #[test]
    fn test_huge_expire_never_expires() {
        let engine = StorageEngine::new();

        engine.set(Bytes::from("k"), Bytes::from("v"));
        assert!(engine.expire(b"k", i64::MAX));
        assert_eq!(engine.get(b"k"), Some(Bytes::from("v")));
    }

    #[test]
    fn test_incr() {
        let engine = StorageEngine::new();

        // Missing key counts as zero
        assert_eq!(engine.incr_by(b"counter", 1), Ok(1));
        assert_eq!(engine.incr_by(b"counter", 1), Ok(2));
        assert_eq!(engine.get(b"counter"), Some(Bytes::from("2")));

        engine.set(Bytes::from("num"), Bytes::from("10"));
        assert_eq!(engine.incr_by(b"num", -15), Ok(-5));
        assert_eq!(engine.get(b"num"), Some(Bytes::from("-5")));
    }

    #[test]
    fn test_incr_non_integer_leaves_value() {
        let engine = StorageEngine::new();

        engine.set(Bytes::from("text"), Bytes::from("abc"));
        assert_eq!(engine.incr_by(b"text", 1), Err(StoreError::NotInteger));
        assert_eq!(engine.get(b"text"), Some(Bytes::from("abc")));

        for bad in ["", "-", "+1", " 1", "1 ", "1.5", "0x10"] {
            engine.set(Bytes::from("bad"), Bytes::from(bad));
            assert_eq!(
                engine.incr_by(b"bad", 1),
                Err(StoreError::NotInteger),
                "{:?} should not parse",
                bad
            );
            assert_eq!(engine.get(b"bad"), Some(Bytes::from(bad)));
        }
    }

    #[test]
    fn test_incr_overflow() {
        let engine = StorageEngine::new();

        engine.set(Bytes::from("max"), Bytes::from(i64::MAX.to_string()));
        assert_eq!(engine.incr_by(b"max", 1), Err(StoreError::NotInteger));
        assert_eq!(engine.get(b"max"), Some(Bytes::from(i64::MAX.to_string())));

        engine.set(Bytes::from("min"), Bytes::from(i64::MIN.to_string()));
        assert_eq!(engine.decr_by(b"min", 1), Err(StoreError::NotInteger));
        assert_eq!(engine.incr_by(b"min", 0), Ok(i64::MIN));
    }

    #[test]
    fn test_decr_by_min_fails() {
        let engine = StorageEngine::new();

        assert_eq!(engine.decr_by(b"k", i64::MIN), Err(StoreError::NotInteger));
        assert!(engine.is_empty());
        assert_eq!(engine.decr_by(b"k", 3), Ok(-3));
    }

    #[test]
    fn test_incr_is_associative() {
        let engine = StorageEngine::new();

        engine.set(Bytes::from("a"), Bytes::from("7"));
        engine.set(Bytes::from("b"), Bytes::from("7"));

        engine.incr_by(b"a", 12).unwrap();
        engine.incr_by(b"a", -30).unwrap();
        engine.incr_by(b"b", 12 - 30).unwrap();

        assert_eq!(engine.get(b"a"), engine.get(b"b"));
    }

    #[test]
    fn test_incr_preserves_ttl() {
        let engine = StorageEngine::new();

        engine.set(Bytes::from("n"), Bytes::from("1"));
        engine.expire(b"n", 100);
        engine.incr_by(b"n", 5).unwrap();

        let ttl = engine.ttl(b"n");
        assert!(ttl > 0 && ttl <= 100);
    }

    #[test]
    fn test_incr_on_expired_key_starts_from_zero() {
        let engine = StorageEngine::new();

        engine.set(Bytes::from("n"), Bytes::from("41"));
        engine.expire_in(b"n", Duration::from_millis(10));
        std::thread::sleep(Duration::from_millis(30));

        assert_eq!(engine.incr_by(b"n", 1), Ok(1));
        assert_eq!(engine.ttl(b"n"), -1);
    }

    #[test]
    fn test_exists() {
        let engine = StorageEngine::new();

        assert_eq!(engine.exists(&[b"key"]), 0);
        engine.set(Bytes::from("key"), Bytes::from("value"));
        engine.set(Bytes::from("other"), Bytes::from("value"));

        assert_eq!(engine.exists(&["key", "other", "missing"]), 2);
        // Duplicates counted independently
        assert_eq!(engine.exists(&["key", "key", "key"]), 3);
        assert_eq!(engine.exists::<&str>(&[]), 0);
    }

    #[test]
    fn test_lazy_expiry_keeps_untouched_keys() {
        let engine = StorageEngine::new();
        let total = 1_000;

        for i in 0..total {
            let key = format!("session:{}", i);
            engine.set(Bytes::from(key.clone()), Bytes::from("x"));
            engine.expire_in(key.as_bytes(), Duration::from_millis(1));
        }

        std::thread::sleep(Duration::from_millis(20));

        // Nothing sweeps in the background: every entry still occupies memory
        assert_eq!(engine.len(), total);
        assert_eq!(engine.stats().expired, 0);

        let keys: Vec<String> = (0..total).map(|i| format!("session:{}", i)).collect();
        assert_eq!(engine.exists(keys.as_slice()), 0);

        assert!(engine.is_empty());
        assert_eq!(engine.stats().expired, total as u64);
    }

    #[test]
    fn test_concurrent_access() {
        let engine = Arc::new(StorageEngine::new());
        let mut handles = vec![];

        for t in 0..8 {
            let engine = Arc::clone(&engine);
            handles.push(std::thread::spawn(move || {
                for i in 0..500 {
                    let key = format!("t{}:k{}", t, i);
                    engine.set(Bytes::from(key.clone()), Bytes::from(i.to_string()));
                    assert_eq!(engine.get(key.as_bytes()), Some(Bytes::from(i.to_string())));
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(engine.len(), 8 * 500);
    }

    #[test]
    fn test_concurrent_incr_is_atomic() {
        let engine = Arc::new(StorageEngine::new());
        let mut handles = vec![];

        for _ in 0..8 {
            let engine = Arc::clone(&engine);
            handles.push(std::thread::spawn(move || {
                for _ in 0..1_000 {
                    engine.incr_by(b"hits", 1).unwrap();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(engine.get(b"hits"), Some(Bytes::from("8000")));
    }

    #[test]
    fn test_stats() {
        let engine = StorageEngine::new();

        engine.set(Bytes::from("a"), Bytes::from("1"));
        engine.get(b"a");
        engine.get(b"b");
        engine.delete(b"a");

        let stats = engine.stats();
        assert_eq!(stats.keys, 0);
        assert_eq!(stats.set_ops, 1);
        assert_eq!(stats.get_ops, 2);
        assert_eq!(stats.del_ops, 1);
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer(b"0"), Some(0));
        assert_eq!(parse_integer(b"-0"), Some(0));
        assert_eq!(parse_integer(b"42"), Some(42));
        assert_eq!(parse_integer(b"-42"), Some(-42));
        assert_eq!(parse_integer(b"007"), Some(7));
        assert_eq!(parse_integer(b"9223372036854775807"), Some(i64::MAX));
        assert_eq!(parse_integer(b"-9223372036854775808"), Some(i64::MIN));

        assert_eq!(parse_integer(b"9223372036854775808"), None);
        assert_eq!(parse_integer(b""), None);
        assert_eq!(parse_integer(b"-"), None);
        assert_eq!(parse_integer(b"+5"), None);
        assert_eq!(parse_integer(b"--5"), None);
        assert_eq!(parse_integer(b"5 "), None);
        assert_eq!(parse_integer(b"abc"), None);
    }
}
