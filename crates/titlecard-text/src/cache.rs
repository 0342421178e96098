//! Measurement cache.
//!
//! The line packer measures every growing prefix of a line, and box text and
//! right alignment measure the same tokens more than once. Shaping is the
//! expensive part of a draw call, so each face memoizes its widths here.

use titlecard_core::Fixed;
use titlecard_core::alloc::HashMap;

/// Default upper bound on cached entries before the cache is flushed.
pub const DEFAULT_MAX_ENTRIES: usize = 4096;

/// Cache of measured advance widths keyed by text.
#[derive(Debug)]
pub struct MeasureCache {
    widths: HashMap<String, Fixed>,
    max_entries: usize,
    /// Statistics for monitoring cache performance
    pub hits: u64,
    pub misses: u64,
}

impl MeasureCache {
    /// Create a new empty cache with [`DEFAULT_MAX_ENTRIES`].
    pub fn new() -> Self {
        Self::with_max_entries(DEFAULT_MAX_ENTRIES)
    }

    /// Create a cache that flushes itself once it holds `max_entries` widths.
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            widths: HashMap::with_capacity(max_entries.min(256)),
            max_entries: max_entries.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// Get a cached width, recording a hit or a miss.
    pub fn get(&mut self, text: &str) -> Option<Fixed> {
        let result = self.widths.get(text).copied();
        if result.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        result
    }

    /// Insert a width, flushing the cache first if it is full.
    pub fn insert(&mut self, text: &str, width: Fixed) {
        if self.widths.len() >= self.max_entries {
            tracing::trace!("{}; flushing", self.stats_string());
            self.widths.clear();
        }
        self.widths.insert(text.to_string(), width);
    }

    /// Get a cached width or compute and store it.
    pub fn get_or_measure<F>(&mut self, text: &str, measure: F) -> Fixed
    where
        F: FnOnce() -> Fixed,
    {
        if let Some(width) = self.get(text) {
            return width;
        }
        let width = measure();
        self.insert(text, width);
        width
    }

    /// Clear the cache and its statistics.
    pub fn clear(&mut self) {
        self.widths.clear();
        self.hits = 0;
        self.misses = 0;
    }

    pub fn hit_rate(&self) -> f32 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f32 / total as f32
        }
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    /// Get cache statistics as a formatted string.
    pub fn stats_string(&self) -> String {
        format!(
            "MeasureCache: {} entries, {:.1}% hit rate ({} hits, {} misses)",
            self.len(),
            self.hit_rate() * 100.0,
            self.hits,
            self.misses
        )
    }
}

impl Default for MeasureCache {
    fn default() -> Self {
        Self::new()
    }
}
