//! bytepool
//!
//! Reusable byte buffers for Rust.
//!
//! `bytepool` lends growable byte buffers to code that builds short-lived byte
//! sequences over and over and then throws them away:
//!
//! - log line formatting
//! - tagged metric payloads
//! - protocol frames assembled piece by piece
//!
//! The crate intentionally:
//! - does NOT do I/O
//! - does NOT bound the number of outstanding buffers
//! - does NOT hand out shared or reference-counted storage
//!
//! It only does one thing: **Get a buffer → append → put it back**
//!
//! # Pool
//!
//! ```
//! use bytepool::{FloatFormat, FloatWidth, Pool};
//!
//! let pool = Pool::new(128);
//!
//! let mut buf = pool.get();
//! buf.append_str("request.time:");
//! buf.append_float(12.5, FloatFormat::Decimal, Some(1), FloatWidth::F64);
//! buf.append_str("|ms|#method:");
//! buf.append_str("GET");
//!
//! assert_eq!(buf.to_string(), "request.time:12.5|ms|#method:GET");
//! pool.put(buf);
//! ```
//!
//! # Lease (returned on drop)
//!
//! ```
//! use std::io::Write;
//! use bytepool::Pool;
//!
//! let pool = Pool::new(64);
//! {
//!     let mut buf = pool.lease();
//!     write!(buf, "{}:{}", "hits", 3)?;
//!     assert_eq!(buf.as_bytes(), b"hits:3");
//! }
//! assert_eq!(pool.idle(), 1);
//! # Ok::<(), std::io::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod buffer;
mod config;
mod error;
mod format;

#[cfg(feature = "async-io")]
mod async_write;

//
// Public surface
//

pub use buffer::{Buffer, Pool, PoolStats, Pooled};
pub use config::{
    DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_IDLE, DEFAULT_MAX_RETAINED_CAPACITY, PoolConfig,
};
pub use error::BufferError;
pub use format::{FloatFormat, FloatWidth, TimeLayout};
