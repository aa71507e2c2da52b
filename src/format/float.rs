//! Floating-point rendering.
//!
//! Digits come from the standard library's correctly rounded formatter
//! (shortest round-trip or fixed significant digits); this module only lays
//! them out in the requested notation.

/// Notation used by [`Buffer::append_float`](crate::Buffer::append_float).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatFormat {
    /// Plain decimal, `-ddd.dddd`. Precision counts digits after the point.
    Decimal,

    /// Scientific notation, `-d.dddde±dd`. Precision counts digits after the
    /// point; the exponent always has a sign and at least two digits.
    Exponent,

    /// Exponent notation when the exponent is below -4 or at least the
    /// precision (6 for shortest output), decimal otherwise. Precision counts
    /// significant digits and trailing zeros are dropped.
    General,
}

/// Bit width the value is rounded to before formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FloatWidth {
    /// Round to single precision; shortest output is the shortest that
    /// round-trips through `f32`.
    F32,

    /// Full double precision.
    #[default]
    F64,
}

/// Every finite `f64` has an exact decimal expansion of at most 767
/// significant digits; asking for more only adds trailing zeros.
const MAX_EXACT_DIGITS: usize = 768;

/// Decimal digits of a finite value: `0.d1d2...dn * 10^dp`.
///
/// `digits` never has trailing zeros; zero is represented by no digits.
struct Digits {
    neg: bool,
    digits: Vec<u8>,
    dp: i32,
}

impl Digits {
    fn shortest(v: f64, width: FloatWidth) -> Self {
        let s = match width {
            FloatWidth::F32 => format!("{:e}", v as f32),
            FloatWidth::F64 => format!("{:e}", v),
        };
        Self::parse(&s)
    }

    /// `significant` must be at least 1.
    fn fixed(v: f64, width: FloatWidth, significant: usize) -> Self {
        let frac = significant.saturating_sub(1).min(MAX_EXACT_DIGITS);
        let s = match width {
            FloatWidth::F32 => format!("{:.*e}", frac, v as f32),
            FloatWidth::F64 => format!("{:.*e}", frac, v),
        };
        Self::parse(&s)
    }

    /// Parses the `LowerExp` output of a finite float, e.g. `-1.25e-3`.
    fn parse(s: &str) -> Self {
        let (neg, s) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (mantissa, exp) = s.split_once('e').unwrap_or((s, "0"));
        let exp: i32 = exp.parse().unwrap_or(0);

        let mut digits: Vec<u8> = mantissa.bytes().filter(|b| *b != b'.').collect();
        while digits.last() == Some(&b'0') {
            digits.pop();
        }
        let dp = if digits.is_empty() { 0 } else { exp + 1 };

        Self { neg, digits, dp }
    }

    fn len(&self) -> i32 {
        self.digits.len() as i32
    }
}

pub(crate) fn append_float(
    dst: &mut Vec<u8>,
    v: f64,
    format: FloatFormat,
    precision: Option<usize>,
    width: FloatWidth,
) {
    let v = match width {
        FloatWidth::F32 => f64::from(v as f32),
        FloatWidth::F64 => v,
    };

    if v.is_nan() {
        dst.extend_from_slice(b"NaN");
        return;
    }
    if v.is_infinite() {
        dst.extend_from_slice(if v > 0.0 { b"+Inf" } else { b"-Inf" });
        return;
    }

    match (format, precision) {
        (FloatFormat::Decimal, Some(prec)) => {
            let s = match width {
                FloatWidth::F32 => format!("{:.*}", prec, v as f32),
                FloatWidth::F64 => format!("{:.*}", prec, v),
            };
            dst.extend_from_slice(s.as_bytes());
        }
        (FloatFormat::Decimal, None) => {
            let d = Digits::shortest(v, width);
            let prec = (d.len() - d.dp).max(0) as usize;
            fmt_decimal(dst, &d, prec);
        }
        (FloatFormat::Exponent, Some(prec)) => {
            let d = Digits::fixed(v, width, prec.saturating_add(1));
            fmt_exponent(dst, &d, prec);
        }
        (FloatFormat::Exponent, None) => {
            let d = Digits::shortest(v, width);
            let prec = (d.len() - 1).max(0) as usize;
            fmt_exponent(dst, &d, prec);
        }
        (FloatFormat::General, Some(prec)) => {
            let prec = prec.max(1);
            let d = Digits::fixed(v, width, prec);
            fmt_general(dst, &d, i32::try_from(prec).unwrap_or(i32::MAX), false);
        }
        (FloatFormat::General, None) => {
            let d = Digits::shortest(v, width);
            fmt_general(dst, &d, d.len(), true);
        }
    }
}

fn fmt_general(dst: &mut Vec<u8>, d: &Digits, prec: i32, shortest: bool) {
    let nd = d.len();
    let mut eprec = prec;
    if eprec > nd && nd >= d.dp {
        eprec = nd;
    }
    if shortest {
        eprec = 6;
    }

    let exp = d.dp - 1;
    if exp < -4 || exp >= eprec {
        let prec = prec.min(nd);
        fmt_exponent(dst, d, (prec - 1).max(0) as usize);
        return;
    }

    let prec = if prec > d.dp { nd } else { prec };
    fmt_decimal(dst, d, (prec - d.dp).max(0) as usize);
}

fn fmt_exponent(dst: &mut Vec<u8>, d: &Digits, prec: usize) {
    if d.neg {
        dst.push(b'-');
    }

    let nd = d.digits.len();
    dst.push(if nd == 0 { b'0' } else { d.digits[0] });

    if prec > 0 {
        dst.push(b'.');
        let end = nd.min(prec + 1);
        if end > 1 {
            dst.extend_from_slice(&d.digits[1..end]);
        }
        for _ in end.max(1)..=prec {
            dst.push(b'0');
        }
    }

    dst.push(b'e');
    let exp = if nd == 0 { 0 } else { d.dp - 1 };
    dst.push(if exp < 0 { b'-' } else { b'+' });
    let exp = exp.unsigned_abs();
    if exp >= 100 {
        dst.push(b'0' + (exp / 100) as u8);
    }
    dst.push(b'0' + (exp / 10 % 10) as u8);
    dst.push(b'0' + (exp % 10) as u8);
}

fn fmt_decimal(dst: &mut Vec<u8>, d: &Digits, prec: usize) {
    if d.neg {
        dst.push(b'-');
    }

    let nd = d.len();
    if d.dp > 0 {
        let end = nd.min(d.dp);
        dst.extend_from_slice(&d.digits[..end as usize]);
        for _ in end..d.dp {
            dst.push(b'0');
        }
    } else {
        dst.push(b'0');
    }

    if prec > 0 {
        dst.push(b'.');
        for i in 0..prec as i32 {
            let j = d.dp + i;
            dst.push(if (0..nd).contains(&j) {
                d.digits[j as usize]
            } else {
                b'0'
            });
        }
    }
}
