//! Configuration for buffer pools.
//!
//! [`PoolConfig`] controls how large fresh buffers start out and how much idle
//! memory a [`Pool`](crate::Pool) is allowed to keep around.
//!
//! # Example
//!
//! ```
//! use bytepool::{Pool, PoolConfig};
//!
//! let config = PoolConfig::new(512)
//!     .with_max_idle(64)
//!     .with_max_retained_capacity(16 * 1024);
//!
//! let pool = Pool::with_config(config)?;
//! assert_eq!(pool.config().initial_capacity(), 512);
//! # Ok::<(), bytepool::BufferError>(())
//! ```

use crate::error::BufferError;

/// Default capacity of freshly allocated buffers (256 bytes).
pub const DEFAULT_INITIAL_CAPACITY: usize = 256;

/// Default maximum number of idle buffers kept by a pool.
pub const DEFAULT_MAX_IDLE: usize = 1024;

/// Default capacity above which returned buffers are discarded (64 KiB).
pub const DEFAULT_MAX_RETAINED_CAPACITY: usize = 64 * 1024;

/// Configuration for a buffer pool.
///
/// - `initial_capacity` - Capacity of buffers the pool allocates itself.
///   Zero is legal; the first write then triggers growth.
/// - `max_idle` - Upper bound on buffers cached for reuse. Buffers handed
///   out are not counted; there is no limit on outstanding buffers.
/// - `max_retained_capacity` - Buffers that grew past this are dropped on
///   return instead of being cached, so one huge payload does not pin its
///   allocation forever.
///
/// # Size Constraints
///
/// - `max_idle` must be non-zero
/// - `initial_capacity <= max_retained_capacity`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolConfig {
    initial_capacity: usize,
    max_idle: usize,
    max_retained_capacity: usize,
}

impl PoolConfig {
    /// Creates a configuration with the given initial buffer capacity.
    ///
    /// The retained-capacity limit is raised to `initial_capacity` when the
    /// default would be smaller, so the result is always valid.
    ///
    /// # Example
    ///
    /// ```
    /// use bytepool::PoolConfig;
    ///
    /// let config = PoolConfig::new(1 << 20);
    /// assert_eq!(config.max_retained_capacity(), 1 << 20);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            max_idle: DEFAULT_MAX_IDLE,
            max_retained_capacity: DEFAULT_MAX_RETAINED_CAPACITY.max(initial_capacity),
        }
    }

    /// Sets the initial capacity of new buffers.
    ///
    /// Note: This does not validate the configuration. Use [`PoolConfig::validate`]
    /// to check if the configuration is valid.
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Sets the maximum number of idle buffers.
    ///
    /// Note: This does not validate the configuration.
    pub fn with_max_idle(mut self, max_idle: usize) -> Self {
        self.max_idle = max_idle;
        self
    }

    /// Sets the capacity above which returned buffers are discarded.
    ///
    /// Note: This does not validate the configuration.
    pub fn with_max_retained_capacity(mut self, capacity: usize) -> Self {
        self.max_retained_capacity = capacity;
        self
    }

    /// Returns the initial capacity of new buffers.
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// Returns the maximum number of idle buffers.
    pub fn max_idle(&self) -> usize {
        self.max_idle
    }

    /// Returns the capacity above which returned buffers are discarded.
    pub fn max_retained_capacity(&self) -> usize {
        self.max_retained_capacity
    }

    /// Validates the current configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use bytepool::PoolConfig;
    ///
    /// let config = PoolConfig::default().with_max_idle(0);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), BufferError> {
        if self.max_idle == 0 {
            return Err(BufferError::InvalidConfig {
                message: "max_idle must be non-zero",
            });
        }

        if self.initial_capacity > self.max_retained_capacity {
            return Err(BufferError::InvalidConfig {
                message: "initial_capacity cannot be greater than max_retained_capacity",
            });
        }

        Ok(())
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_CAPACITY)
    }
}
