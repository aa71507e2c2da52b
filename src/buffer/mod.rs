//! Buffers and the pool that lends them.
//!
//! - [`Buffer`] - Owned growable bytes with typed append helpers
//! - [`Pool`] - Lock-free cache of idle buffers
//! - [`Pooled`] - Guard that gives its buffer back on drop

mod data;
mod pool;

pub use data::Buffer;
pub use pool::{Pool, PoolStats, Pooled};
