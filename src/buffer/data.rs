//! The Buffer type - an owned, growable byte sequence with append helpers.

use std::fmt;
use std::io;
use std::str::Utf8Error;

use bytes::Bytes;
use chrono::{DateTime, TimeZone};

use crate::format::{FloatFormat, FloatWidth, TimeLayout};

/// A growable byte buffer with typed append helpers.
///
/// Buffers are usually borrowed from a [`Pool`](crate::Pool) and handed back
/// once their contents have been consumed, but they work standalone too.
/// Every append is infallible; growth follows `Vec<u8>`.
///
/// # Example
///
/// ```
/// use bytepool::Buffer;
///
/// let mut buf = Buffer::with_capacity(16);
/// buf.append_int(-42);
/// buf.write_byte(b'_');
/// buf.append_bool(true);
///
/// assert_eq!(buf.to_string(), "-42_true");
/// assert_eq!(buf.len(), 8);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Buffer {
    data: Vec<u8>,
}

impl Buffer {
    /// Creates an empty buffer without allocating.
    pub const fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Creates an empty buffer with at least `capacity` bytes of storage.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Appends a signed integer in base 10.
    #[inline]
    pub fn append_int(&mut self, v: i64) {
        self.append_display(v);
    }

    /// Appends an unsigned integer in base 10.
    #[inline]
    pub fn append_uint(&mut self, v: u64) {
        self.append_display(v);
    }

    /// Appends a float.
    ///
    /// `precision` is the number of digits after the point for
    /// [`FloatFormat::Decimal`] and [`FloatFormat::Exponent`], and the number
    /// of significant digits for [`FloatFormat::General`]. `None` selects the
    /// fewest digits that read back to the same value at `width`.
    ///
    /// # Example
    ///
    /// ```
    /// use bytepool::{Buffer, FloatFormat, FloatWidth};
    ///
    /// let mut buf = Buffer::new();
    /// buf.append_float(1234.5678, FloatFormat::Exponent, Some(3), FloatWidth::F64);
    /// buf.write_byte(b' ');
    /// buf.append_float(0.25, FloatFormat::General, None, FloatWidth::F32);
    ///
    /// assert_eq!(buf.to_string(), "1.235e+03 0.25");
    /// ```
    pub fn append_float(
        &mut self,
        v: f64,
        format: FloatFormat,
        precision: Option<usize>,
        width: FloatWidth,
    ) {
        crate::format::append_float(&mut self.data, v, format, precision, width);
    }

    /// Appends `true` or `false`.
    #[inline]
    pub fn append_bool(&mut self, v: bool) {
        self.data
            .extend_from_slice(if v { b"true".as_slice() } else { b"false".as_slice() });
    }

    /// Appends a timestamp rendered with `layout`.
    ///
    /// # Example
    ///
    /// ```
    /// use bytepool::{Buffer, TimeLayout};
    /// use chrono::{TimeZone, Utc};
    ///
    /// let t = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
    /// let mut buf = Buffer::new();
    /// buf.append_time(&t, &TimeLayout::RFC3339);
    ///
    /// assert_eq!(buf.to_string(), "2024-03-09T07:05:01+00:00");
    /// ```
    pub fn append_time<Tz>(&mut self, t: &DateTime<Tz>, layout: &TimeLayout)
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        self.append_display(t.format(layout.as_str()));
    }

    /// Appends a single raw byte.
    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        self.data.push(b);
    }

    /// Appends raw bytes.
    #[inline]
    pub fn append_bytes(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Appends a string.
    #[inline]
    pub fn append_str(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
    }

    /// Returns the number of bytes written.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if nothing has been written since the last reset.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the capacity of the backing storage.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Returns the written bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Returns a mutable view of the written bytes.
    ///
    /// The view aliases the buffer's storage: writes through it change the
    /// buffer. It borrows the buffer mutably, so no append can happen while
    /// it is alive.
    ///
    /// ```
    /// use bytepool::Buffer;
    ///
    /// let mut buf = Buffer::new();
    /// buf.append_str("abc");
    /// buf.as_mut_bytes()[0] = b'x';
    /// assert_eq!(buf.as_bytes(), b"xbc");
    /// ```
    #[inline]
    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Returns the contents as `&str` if they are valid UTF-8.
    pub fn as_str(&self) -> Result<&str, Utf8Error> {
        std::str::from_utf8(&self.data)
    }

    /// Copies the contents into a [`Bytes`].
    ///
    /// The buffer keeps its storage and can go back to the pool.
    pub fn to_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(&self.data)
    }

    /// Consumes the buffer and returns its storage.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Truncates to zero length, keeping the allocated storage.
    #[inline]
    pub fn reset(&mut self) {
        self.data.clear();
    }

    fn append_display(&mut self, v: impl fmt::Display) {
        // The buffer never reports an error; `TimeLayout` rejects layouts
        // whose rendering would.
        let res = fmt::Write::write_fmt(self, format_args!("{}", v));
        debug_assert!(res.is_ok(), "formatting into a buffer failed");
    }
}

impl fmt::Display for Buffer {
    /// Writes the contents as text, replacing invalid UTF-8 sequences.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Ok(s) => f.write_str(s),
            Err(_) => f.write_str(&String::from_utf8_lossy(&self.data)),
        }
    }
}

impl fmt::Write for Buffer {
    #[inline]
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append_str(s);
        Ok(())
    }

    #[inline]
    fn write_char(&mut self, c: char) -> fmt::Result {
        let mut utf8 = [0u8; 4];
        self.append_str(c.encode_utf8(&mut utf8));
        Ok(())
    }
}

impl io::Write for Buffer {
    /// Appends all of `buf`; never short, never fails.
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append_bytes(buf);
        Ok(buf.len())
    }

    #[inline]
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.append_bytes(buf);
        Ok(())
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl AsRef<[u8]> for Buffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl AsMut<[u8]> for Buffer {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl Extend<u8> for Buffer {
    fn extend<I: IntoIterator<Item = u8>>(&mut self, iter: I) {
        self.data.extend(iter);
    }
}

impl<'a> Extend<&'a u8> for Buffer {
    fn extend<I: IntoIterator<Item = &'a u8>>(&mut self, iter: I) {
        self.data.extend(iter);
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl From<Buffer> for Vec<u8> {
    fn from(buf: Buffer) -> Self {
        buf.data
    }
}

impl From<Buffer> for Bytes {
    /// Hands the storage over without copying.
    fn from(buf: Buffer) -> Self {
        Bytes::from(buf.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone, Utc};

    #[test]
    fn test_mixed_appends() {
        let mut buf = Buffer::with_capacity(16);
        buf.append_int(-42);
        buf.write_byte(b'_');
        buf.append_bool(true);

        assert_eq!(buf.to_string(), "-42_true");
        assert_eq!(buf.len(), 8);
    }

    #[test]
    fn test_integers() {
        let mut buf = Buffer::new();
        for v in [0i64, -1, 7, i64::MIN, i64::MAX] {
            buf.reset();
            buf.append_int(v);
            assert_eq!(buf.to_string(), v.to_string());
        }

        buf.reset();
        buf.append_uint(u64::MAX);
        assert_eq!(buf.as_bytes(), b"18446744073709551615");
    }

    #[test]
    fn test_bools() {
        let mut buf = Buffer::new();
        buf.append_bool(false);
        buf.append_bool(true);
        assert_eq!(buf.as_str().unwrap(), "falsetrue");
    }

    #[test]
    fn test_time_with_offset() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let t = offset.with_ymd_and_hms(2021, 12, 31, 23, 59, 58).unwrap();

        let mut buf = Buffer::new();
        buf.append_time(&t, &TimeLayout::RFC3339);
        assert_eq!(buf.to_string(), "2021-12-31T23:59:58+02:00");
    }

    #[test]
    fn test_time_custom_layout() {
        let t = Utc.with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap();
        let layout = TimeLayout::new("[%d/%b/%Y:%H:%M:%S]").unwrap();

        let mut buf = Buffer::new();
        buf.append_str("ts=");
        buf.append_time(&t, &layout);
        assert_eq!(buf.to_string(), "ts=[02/Jan/2006:15:04:05]");

        buf.reset();
        buf.append_time(&t, &TimeLayout::ANSIC);
        assert_eq!(buf.to_string(), "Mon Jan  2 15:04:05 2006");
    }

    #[test]
    fn test_time_zone_and_timestamp_layouts() {
        let t = Utc.with_ymd_and_hms(2023, 7, 4, 9, 30, 0).unwrap();
        let mut buf = Buffer::new();

        buf.append_time(&t, &TimeLayout::new("%H:%M %Z").unwrap());
        assert_eq!(buf.to_string(), "09:30 UTC");

        buf.reset();
        buf.append_time(&t, &TimeLayout::new("%s").unwrap());
        assert_eq!(buf.to_string(), "1688463000");
    }

    #[test]
    fn test_io_write_reports_full_length() {
        use std::io::Write as _;

        let mut buf = Buffer::new();
        let n = buf.write(b"hello").unwrap();
        assert_eq!(n, 5);
        write!(buf, " {}", 42).unwrap();
        buf.flush().unwrap();
        assert_eq!(buf.as_bytes(), b"hello 42");
    }

    #[test]
    fn test_fmt_write() {
        use std::fmt::Write as _;

        let mut buf = Buffer::new();
        write!(buf, "{}={:.1}", "load", 0.75).unwrap();
        buf.write_char('é').unwrap();
        assert_eq!(buf.to_string(), "load=0.8é");
    }

    #[test]
    fn test_reset_keeps_capacity() {
        let mut buf = Buffer::new();
        buf.append_str("abc");
        let cap = buf.capacity();

        buf.reset();
        buf.append_str("xy");

        assert_eq!(buf.to_string(), "xy");
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.capacity(), cap);
    }

    #[test]
    fn test_mut_view_aliases_storage() {
        let mut buf = Buffer::new();
        buf.append_str("metric");
        buf.as_mut_bytes().make_ascii_uppercase();
        assert_eq!(buf.as_bytes(), b"METRIC");
    }

    #[test]
    fn test_invalid_utf8_display() {
        let mut buf = Buffer::new();
        buf.append_bytes(&[b'a', 0xff, b'b']);
        assert!(buf.as_str().is_err());
        assert_eq!(buf.to_string(), "a\u{fffd}b");
        assert_eq!(buf.len(), 3);
    }

    #[test]
    fn test_into_bytes() {
        let mut buf = Buffer::with_capacity(8);
        buf.append_str("payload");

        assert_eq!(buf.to_bytes(), Bytes::from_static(b"payload"));
        let bytes: Bytes = buf.into();
        assert_eq!(&bytes[..], b"payload");
    }
}
