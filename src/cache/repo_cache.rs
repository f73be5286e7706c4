// Time-boxed cache of repo records over a key/value store.
// Entries expire an hour after being written and are evicted lazily on read.

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{CardsError, Result};
use crate::record::RepoRecord;

use super::entry::{CacheEntry, Clock, Decoded, SystemClock, decode};
use super::store::KeyValueStore;

/// Lifetime of a cached record.
pub const CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// Repo record cache. When disabled, reads are empty and writes are dropped.
pub struct RepoCache<S, C = SystemClock> {
    store: S,
    clock: C,
    enabled: bool,
}

impl<S: KeyValueStore> RepoCache<S, SystemClock> {
    pub fn new(store: S, enabled: bool) -> Self {
        Self::with_clock(store, SystemClock, enabled)
    }
}

impl<S: KeyValueStore, C: Clock> RepoCache<S, C> {
    pub fn with_clock(store: S, clock: C, enabled: bool) -> Self {
        Self {
            store,
            clock,
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read every unexpired entry, keyed by lowercase repo name.
    ///
    /// Expired entries are removed silently. The first corrupt entry is removed
    /// and then fails the whole read.
    pub fn read(&mut self) -> Result<BTreeMap<String, CacheEntry>> {
        let mut items = BTreeMap::new();
        if !self.enabled {
            return Ok(items);
        }

        let now = self.clock.now_millis();
        for key in self.store.keys()? {
            let Some(raw) = self.store.get(&key)? else {
                continue;
            };

            match decode(&raw) {
                Decoded::Entry(entry) if entry.is_expired(now) => {
                    debug!(%key, "evicting expired cache entry");
                    self.store.remove(&key)?;
                }
                Decoded::Entry(entry) => {
                    items.insert(key, entry);
                }
                Decoded::Foreign => {}
                Decoded::Malformed(reason) => return Err(self.discard(key, reason)?),
            }
        }

        Ok(items)
    }

    /// Store `record` under its lowercase name, expiring one hour from now.
    pub fn write(&mut self, record: &RepoRecord) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let entry = CacheEntry {
            record: record.clone(),
            expires_at: self.clock.now_millis() + CACHE_TTL.as_millis() as i64,
        };
        let json = serde_json::to_string(&entry)?;
        self.store.set(&record.key(), &json)
    }

    /// Remove cached entries regardless of expiry: all of them when `name` is
    /// `None`, otherwise those whose stored record name equals `name` exactly.
    ///
    /// Returns the number of entries removed.
    pub fn clear(&mut self, name: Option<&str>) -> Result<usize> {
        let mut removed = 0;
        for key in self.store.keys()? {
            let Some(raw) = self.store.get(&key)? else {
                continue;
            };

            match decode(&raw) {
                Decoded::Entry(entry) => {
                    if name.is_none_or(|name| name == entry.record.name) {
                        self.store.remove(&key)?;
                        removed += 1;
                    }
                }
                Decoded::Foreign => {}
                Decoded::Malformed(reason) => return Err(self.discard(key, reason)?),
            }
        }

        debug!(removed, ?name, "cleared cache entries");
        Ok(removed)
    }

    /// Remove a corrupt entry and build the error reporting it.
    fn discard(&mut self, key: String, reason: String) -> Result<CardsError> {
        warn!(%key, %reason, "removing corrupt cache entry");
        self.store.remove(&key)?;
        Ok(CardsError::CorruptCacheEntry { key, reason })
    }
}
