// Cache module for short-lived repo record caching.
// Stores one JSON entry per repo in a key/value store, in memory or on disk.

#![allow(dead_code)]

pub mod entry;
pub mod paths;
pub mod repo_cache;
pub mod store;

pub use entry::{CacheEntry, Clock, SystemClock};
pub use repo_cache::{CACHE_TTL, RepoCache};
pub use store::{FileStore, KeyValueStore, MemoryStore};
