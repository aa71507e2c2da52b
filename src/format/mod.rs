//! Value formatting used by the buffer's append helpers.
//!
//! - [`FloatFormat`] / [`FloatWidth`] - Float notation and rounding width
//! - [`TimeLayout`] - Validated timestamp layout

mod float;
mod time;

pub(crate) use float::append_float;
pub use float::{FloatFormat, FloatWidth};
pub use time::TimeLayout;
