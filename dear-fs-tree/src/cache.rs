use std::collections::HashMap;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::core::LookupError;
use crate::fs::{EntryInfo, MetadataSource, StdMetadataSource};
use crate::path_key::PathKey;

#[cfg(feature = "tracing")]
use tracing::trace;

/// Children of one directory, keyed by name, in the order the OS returned them.
pub type DirectoryListing = IndexMap<String, EntryInfo>;

/// Hit/miss counters of a [`MetadataCache`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheCounters {
    /// Stat lookups answered from the cache.
    pub stat_hits: u64,
    /// Stat lookups forwarded to the source.
    pub stat_misses: u64,
    /// Listing lookups answered from the cache.
    pub listing_hits: u64,
    /// Listing lookups forwarded to the source.
    pub listing_misses: u64,
}

/// Session-scoped memo of stats and directory listings.
///
/// Entries are populated on first demand and never evicted or replaced; the
/// cache is valid as long as nothing mutates the observed subtree externally.
/// Failed lookups are not stored, so the next call retries.
///
/// Listings are shared as `Rc` and the cache needs `&mut self` for every
/// lookup: one owner, one thread. Construct one per session (or per test) and
/// pass it into [`directory_tree`](crate::directory_tree) and
/// [`directory_contents`](crate::directory_contents).
#[derive(Debug)]
pub struct MetadataCache<S = StdMetadataSource> {
    source: S,
    stats: HashMap<PathKey, EntryInfo>,
    listings: HashMap<PathKey, Rc<DirectoryListing>>,
    counters: CacheCounters,
}

impl MetadataCache<StdMetadataSource> {
    /// Create an empty cache over the real filesystem.
    pub fn new() -> Self {
        Self::with_source(StdMetadataSource)
    }
}

impl Default for MetadataCache<StdMetadataSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: MetadataSource> MetadataCache<S> {
    /// Create an empty cache over a custom metadata source.
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            stats: HashMap::new(),
            listings: HashMap::new(),
            counters: CacheCounters::default(),
        }
    }

    /// The underlying metadata source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Stat `path` (symlinks resolved), consulting the cache first.
    pub fn get_stat(&mut self, path: &PathKey) -> Result<EntryInfo, LookupError> {
        if let Some(info) = self.stats.get(path) {
            self.counters.stat_hits += 1;
            return Ok(info.clone());
        }
        self.counters.stat_misses += 1;
        match self.source.stat(path.as_path()) {
            Ok(info) => {
                self.stats.insert(path.clone(), info.clone());
                trace_stat_cached(path);
                Ok(info)
            }
            Err(err) => {
                trace_lookup_failed("stat", path, &err);
                Err(err)
            }
        }
    }

    /// List `path`, consulting the cache first.
    ///
    /// A fresh listing also seeds the stat cache with every child, so stats of
    /// listed children never reach the source afterwards.
    pub fn get_listing(&mut self, path: &PathKey) -> Result<Rc<DirectoryListing>, LookupError> {
        if let Some(listing) = self.listings.get(path) {
            self.counters.listing_hits += 1;
            return Ok(Rc::clone(listing));
        }
        self.counters.listing_misses += 1;
        let children = match self.source.list_children(path.as_path()) {
            Ok(v) => v,
            Err(err) => {
                trace_lookup_failed("listing", path, &err);
                return Err(err);
            }
        };

        let mut listing = DirectoryListing::with_capacity(children.len());
        for child in children {
            self.stats
                .entry(path.join(&child.name))
                .or_insert_with(|| child.clone());
            listing.insert(child.name.clone(), child);
        }
        let listing = Rc::new(listing);
        self.listings.insert(path.clone(), Rc::clone(&listing));
        trace_listing_cached(path, listing.len());
        Ok(listing)
    }

    /// Whether a stat for `path` is cached.
    pub fn contains_stat(&self, path: &PathKey) -> bool {
        self.stats.contains_key(path)
    }

    /// Whether a listing for `path` is cached.
    pub fn contains_listing(&self, path: &PathKey) -> bool {
        self.listings.contains_key(path)
    }

    /// Number of cached stats.
    pub fn cached_stats(&self) -> usize {
        self.stats.len()
    }

    /// Number of cached listings.
    pub fn cached_listings(&self) -> usize {
        self.listings.len()
    }

    /// Hit/miss counters since construction.
    pub fn counters(&self) -> CacheCounters {
        self.counters
    }
}

#[cfg(feature = "tracing")]
fn trace_stat_cached(path: &PathKey) {
    trace!(event = "cache.stat_cached", path = %path, "stat cached");
}

#[cfg(not(feature = "tracing"))]
fn trace_stat_cached(_path: &PathKey) {}

#[cfg(feature = "tracing")]
fn trace_listing_cached(path: &PathKey, entries: usize) {
    trace!(
        event = "cache.listing_cached",
        path = %path,
        entries,
        "listing cached"
    );
}

#[cfg(not(feature = "tracing"))]
fn trace_listing_cached(_path: &PathKey, _entries: usize) {}

#[cfg(feature = "tracing")]
fn trace_lookup_failed(op: &'static str, path: &PathKey, err: &LookupError) {
    trace!(
        event = "cache.lookup_failed",
        op,
        path = %path,
        kind = err.kind_str(),
        "lookup failed"
    );
}

#[cfg(not(feature = "tracing"))]
fn trace_lookup_failed(_op: &'static str, _path: &PathKey, _err: &LookupError) {}
