//! Expression cache.
//!
//! Maps expression text, as the caller wrote it, to its trimmed buffer.
//! Repeated evaluation of the same text reuses the buffer, and compiling
//! through an engine reuses it as the compiled map's source.
//!
//! Entries are bounded by an LRU policy: the least recently used buffer is
//! dropped when the cache is full, and a miss simply trims the text again.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use lru::LruCache;
use parking_lot::Mutex;

/// Capacity of the process-wide cache.
pub const SHARED_CACHE_CAPACITY: usize = 1024;

/// Hit/miss counters and current size of a cache.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub len: usize,
}

pub struct ExpressionCache {
    entries: Mutex<LruCache<String, Arc<str>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ExpressionCache {
    /// Create a cache holding at most `capacity` expressions (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        ExpressionCache {
            entries: Mutex::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Trimmed buffer for `expr`, trimming and storing it on first sight.
    pub fn buffer(&self, expr: &str) -> Arc<str> {
        let mut entries = self.entries.lock();
        if let Some(buffer) = entries.get(expr) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(len = buffer.len(), "expression cache hit");
            return Arc::clone(buffer);
        }

        let buffer: Arc<str> = Arc::from(expr.trim_end());
        if let Some((evicted, _)) = entries.push(expr.to_owned(), Arc::clone(&buffer)) {
            tracing::debug!(evicted_len = evicted.len(), "expression cache eviction");
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(len = buffer.len(), "expression cache miss");
        buffer
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            len: self.entries.lock().len(),
        }
    }

    /// Drop every entry. Counters are kept.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Default for ExpressionCache {
    fn default() -> Self {
        ExpressionCache::new(crate::config::DEFAULT_CACHE_CAPACITY)
    }
}

/// The process-wide cache used by engines in `CacheMode::Shared`.
pub fn shared() -> &'static ExpressionCache {
    static SHARED: OnceLock<ExpressionCache> = OnceLock::new();
    SHARED.get_or_init(|| ExpressionCache::new(SHARED_CACHE_CAPACITY))
}

#[cfg(test)]
mod tests;
