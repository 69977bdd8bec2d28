#![forbid(unsafe_code)]

//! LRU cache of measured text widths.
//!
//! A lane is remeasured every time it wraps, and a ticker usually cycles
//! through a handful of headlines, so the same strings are measured over and
//! over. The cache keys on the text hash together with the font size, since
//! the same string is a different width at a different size.
//!
//! # Example
//! ```
//! use ticker_core::WidthCache;
//!
//! let mut cache = WidthCache::new(64);
//! let width = cache.get_or_compute("headline", 14, |text| text.len() as i32 * 7);
//! assert_eq!(width, 56);
//!
//! let again = cache.get_or_compute("headline", 14, |_| unreachable!());
//! assert_eq!(again, 56);
//! assert_eq!(cache.stats().hits, 1);
//! ```

use lru::LruCache;
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;

/// Default cache capacity.
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Statistics about cache performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Current number of entries.
    pub size: usize,
    /// Maximum capacity.
    pub capacity: usize,
}

impl CacheStats {
    /// Hit rate in `[0.0, 1.0]`.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// LRU cache for text width measurements.
///
/// Keys are 64-bit FxHash values of `(text, font_size)` rather than the
/// strings themselves. Not thread-safe; the coordinator owning it is already
/// behind the host's lock.
#[derive(Debug)]
pub struct WidthCache {
    cache: LruCache<u64, i32>,
    hits: u64,
    misses: u64,
}

impl WidthCache {
    /// Create a cache holding up to `capacity` entries (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: LruCache::new(non_zero(capacity)),
            hits: 0,
            misses: 0,
        }
    }

    /// Create a cache with [`DEFAULT_CACHE_CAPACITY`] entries.
    #[must_use]
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }

    /// Return the cached width or compute and store it.
    pub fn get_or_compute<F>(&mut self, text: &str, font_size: u16, compute: F) -> i32
    where
        F: FnOnce(&str) -> i32,
    {
        let key = cache_key(text, font_size);

        if let Some(&width) = self.cache.get(&key) {
            self.hits += 1;
            return width;
        }

        self.misses += 1;
        let width = compute(text);
        self.cache.put(key, width);
        width
    }

    /// Peek at a cached width without touching LRU order.
    #[must_use]
    pub fn peek(&self, text: &str, font_size: u16) -> Option<i32> {
        self.cache.peek(&cache_key(text, font_size)).copied()
    }

    /// Drop every entry. Statistics are kept.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Current statistics.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.cache.len(),
            capacity: self.cache.cap().get(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl Default for WidthCache {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

fn non_zero(capacity: usize) -> NonZeroUsize {
    NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)
}

#[inline]
fn cache_key(text: &str, font_size: u16) -> u64 {
    let mut hasher = FxHasher::default();
    text.hash(&mut hasher);
    font_size.hash(&mut hasher);
    hasher.finish()
}
