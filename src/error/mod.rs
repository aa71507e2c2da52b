//! Error types for bytepool.

use std::fmt;

/// Errors raised while configuring a pool or preparing a time layout.
///
/// Appending to a [`Buffer`](crate::Buffer) and lending buffers from a
/// [`Pool`](crate::Pool) never fail; errors only surface at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// Invalid pool configuration parameter.
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// A time layout contained an unknown or malformed specifier.
    InvalidTimeLayout {
        /// The rejected layout.
        layout: String,
    },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::InvalidConfig { message } => {
                write!(f, "invalid config: {}", message)
            }
            BufferError::InvalidTimeLayout { layout } => {
                write!(f, "invalid time layout: {:?}", layout)
            }
        }
    }
}

impl std::error::Error for BufferError {}
