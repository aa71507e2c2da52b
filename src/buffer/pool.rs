//! Shared, lock-free pool of reusable buffers.

use std::fmt;
use std::mem;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_queue::ArrayQueue;
use log::{debug, trace};

use super::Buffer;
use crate::config::PoolConfig;
use crate::error::BufferError;

/// A thread-safe pool of [`Buffer`]s.
///
/// Cloning a `Pool` is cheap; all clones share one free list. Any number of
/// buffers may be outstanding at once, while at most
/// [`max_idle`](PoolConfig::max_idle) are cached for reuse.
///
/// # Example
///
/// ```
/// use bytepool::Pool;
///
/// let pool = Pool::new(64);
///
/// let mut buf = pool.get();
/// buf.append_str("level=");
/// buf.append_str("info");
/// assert_eq!(buf.to_string(), "level=info");
/// pool.put(buf);
///
/// // The next buffer is empty, whatever the last owner left in it.
/// assert!(pool.get().is_empty());
/// ```
#[derive(Clone)]
pub struct Pool {
    inner: Arc<Inner>,
}

struct Inner {
    idle: ArrayQueue<Buffer>,
    config: PoolConfig,
    hits: AtomicUsize,
    misses: AtomicUsize,
    returns: AtomicUsize,
    drops: AtomicUsize,
}

impl Pool {
    /// Creates a pool whose fresh buffers start with `initial_capacity` bytes.
    ///
    /// Zero is legal. Retention limits use the defaults of [`PoolConfig::new`].
    pub fn new(initial_capacity: usize) -> Self {
        Self::from_valid_config(PoolConfig::new(initial_capacity))
    }

    /// Creates a pool from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidConfig`] if the configuration does not
    /// pass [`PoolConfig::validate`].
    pub fn with_config(config: PoolConfig) -> Result<Self, BufferError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: PoolConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                idle: ArrayQueue::new(config.max_idle()),
                config,
                hits: AtomicUsize::new(0),
                misses: AtomicUsize::new(0),
                returns: AtomicUsize::new(0),
                drops: AtomicUsize::new(0),
            }),
        }
    }

    /// Takes an empty buffer from the pool, allocating one if none is idle.
    #[inline]
    pub fn get(&self) -> Buffer {
        let inner = &*self.inner;
        match inner.idle.pop() {
            Some(mut buf) => {
                inner.hits.fetch_add(1, Ordering::Relaxed);
                buf.reset();
                buf
            }
            None => {
                inner.misses.fetch_add(1, Ordering::Relaxed);
                Buffer::with_capacity(inner.config.initial_capacity())
            }
        }
    }

    /// Returns a buffer to the pool.
    ///
    /// The buffer is cleared before it is cached. Buffers that grew past
    /// [`max_retained_capacity`](PoolConfig::max_retained_capacity), or that
    /// arrive while the idle list is full, are dropped.
    #[inline]
    pub fn put(&self, mut buf: Buffer) {
        let inner = &*self.inner;

        let capacity = buf.capacity();
        if capacity > inner.config.max_retained_capacity() {
            inner.drops.fetch_add(1, Ordering::Relaxed);
            debug!(
                "discarding returned buffer: capacity {} exceeds {}",
                capacity,
                inner.config.max_retained_capacity()
            );
            return;
        }

        buf.reset();
        if inner.idle.push(buf).is_ok() {
            inner.returns.fetch_add(1, Ordering::Relaxed);
        } else {
            inner.drops.fetch_add(1, Ordering::Relaxed);
            trace!("idle list full ({}), dropping buffer", inner.idle.capacity());
        }
    }

    /// Takes a buffer that goes back to this pool when the guard drops.
    ///
    /// ```
    /// use bytepool::Pool;
    ///
    /// let pool = Pool::new(32);
    /// {
    ///     let mut buf = pool.lease();
    ///     buf.append_uint(7);
    ///     assert_eq!(buf.as_bytes(), b"7");
    /// }
    /// assert_eq!(pool.idle(), 1);
    /// ```
    pub fn lease(&self) -> Pooled<'_> {
        Pooled {
            buf: self.get(),
            pool: self,
        }
    }

    /// Drops every idle buffer, releasing its memory.
    pub fn clear(&self) {
        let mut released = 0usize;
        while self.inner.idle.pop().is_some() {
            released += 1;
        }
        trace!("released {} idle buffers", released);
    }

    /// Returns the number of idle buffers.
    #[inline]
    pub fn idle(&self) -> usize {
        self.inner.idle.len()
    }

    /// Returns the pool configuration.
    pub fn config(&self) -> &PoolConfig {
        &self.inner.config
    }

    /// Returns a snapshot of the pool counters.
    pub fn stats(&self) -> PoolStats {
        let inner = &*self.inner;
        PoolStats {
            idle: inner.idle.len(),
            hits: inner.hits.load(Ordering::Relaxed),
            misses: inner.misses.load(Ordering::Relaxed),
            returns: inner.returns.load(Ordering::Relaxed),
            drops: inner.drops.load(Ordering::Relaxed),
        }
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::from_valid_config(PoolConfig::default())
    }
}

impl fmt::Debug for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("config", &self.inner.config)
            .field("idle", &self.inner.idle.len())
            .finish()
    }
}

/// Pool counters, taken with relaxed loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    /// Buffers currently cached.
    pub idle: usize,
    /// `get` calls served from the idle list.
    pub hits: usize,
    /// `get` calls that allocated.
    pub misses: usize,
    /// `put` calls that cached the buffer.
    pub returns: usize,
    /// `put` calls that dropped the buffer (too large or idle list full).
    pub drops: usize,
}

impl PoolStats {
    /// Fraction of `get` calls served without allocating (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// A [`Buffer`] on loan from a [`Pool`], returned when dropped.
pub struct Pooled<'a> {
    buf: Buffer,
    pool: &'a Pool,
}

impl Pooled<'_> {
    /// Detaches the buffer; it will not go back to the pool.
    pub fn into_inner(mut self) -> Buffer {
        mem::take(&mut self.buf)
    }
}

impl Deref for Pooled<'_> {
    type Target = Buffer;

    #[inline]
    fn deref(&self) -> &Buffer {
        &self.buf
    }
}

impl DerefMut for Pooled<'_> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Buffer {
        &mut self.buf
    }
}

impl fmt::Debug for Pooled<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pooled").field(&self.buf).finish()
    }
}

impl Drop for Pooled<'_> {
    fn drop(&mut self) {
        // Nothing to reuse: detached by `into_inner`, or never allocated.
        if self.buf.capacity() == 0 {
            return;
        }
        self.pool.put(mem::take(&mut self.buf));
    }
}
