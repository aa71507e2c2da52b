//! Timestamp layouts.

use std::borrow::Cow;
use std::fmt::{self, Write as _};
use std::str::FromStr;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};

use crate::error::BufferError;

/// A validated `strftime`-style layout for
/// [`Buffer::append_time`](crate::Buffer::append_time).
///
/// Validation happens once, here, so appending a timestamp cannot fail.
///
/// # Example
///
/// ```
/// use bytepool::TimeLayout;
///
/// let layout = TimeLayout::new("%Y-%m-%d %H:%M:%S")?;
/// assert_eq!(layout.as_str(), "%Y-%m-%d %H:%M:%S");
///
/// assert!(TimeLayout::new("%Y-%!").is_err());
/// # Ok::<(), bytepool::BufferError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimeLayout(Cow<'static, str>);

impl TimeLayout {
    /// `2006-01-02T15:04:05+07:00`
    pub const RFC3339: TimeLayout = TimeLayout(Cow::Borrowed("%Y-%m-%dT%H:%M:%S%:z"));

    /// `2006-01-02T15:04:05.999999999+07:00`, always nine fractional digits.
    pub const RFC3339_NANO: TimeLayout = TimeLayout(Cow::Borrowed("%Y-%m-%dT%H:%M:%S%.9f%:z"));

    /// `Mon Jan  2 15:04:05 2006`
    pub const ANSIC: TimeLayout = TimeLayout(Cow::Borrowed("%a %b %e %H:%M:%S %Y"));

    /// Parses and validates a layout.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidTimeLayout`] if the layout contains an
    /// unknown or incomplete specifier, or one that chrono only accepts when
    /// parsing (such as `%#z`).
    pub fn new(layout: impl Into<Cow<'static, str>>) -> Result<Self, BufferError> {
        let layout = layout.into();
        if !Self::formats(&layout) {
            return Err(BufferError::InvalidTimeLayout {
                layout: layout.into_owned(),
            });
        }
        Ok(Self(layout))
    }

    /// Renders the layout once against a fixed instant.
    ///
    /// Formatting depends on the specifiers, not the instant, so a layout
    /// that renders here renders for every `DateTime`.
    fn formats(layout: &str) -> bool {
        if StrftimeItems::new(layout).any(|item| matches!(item, Item::Error)) {
            return false;
        }
        let mut sink = String::new();
        write!(sink, "{}", DateTime::<Utc>::default().format(layout)).is_ok()
    }

    /// Returns the layout pattern.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TimeLayout {
    type Err = BufferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_owned())
    }
}

impl fmt::Display for TimeLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
