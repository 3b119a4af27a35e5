//! Binary-to-decimal floating point conversion.
//!
//! Given a finite IEEE binary32/binary64 value, this crate produces the
//! decimal digits and decimal exponent needed to print it either as the
//! shortest string that round-trips to exactly the same bits, or as exactly
//! *N* significant/fractional digits, correctly rounded.
//!
//! The conversion runs in two tiers. [`strategy::grisu`] works on a 64-bit
//! approximation of the value with an explicitly tracked error bound; it is
//! fast but occasionally unable to certify its own output, in which case it
//! reports failure. [`strategy::dragon`] repeats the computation with exact
//! fixed-capacity big-integer arithmetic and always succeeds. The dispatcher
//! here tries the former and falls back to the latter, so callers always get
//! a correct digit sequence.
//!
//! Everything is allocation-free: digits land in a caller-owned
//! [`NumberBuffer`], and the exact path does its arithmetic in fixed-size
//! stack buffers. The only shared state is a set of immutable constant
//! tables, so conversions may run concurrently without synchronization.

#![cfg_attr(not(test), no_std)]

use core::fmt;

pub mod bignum;
pub mod decoder;
pub mod diy_float;
pub mod estimator;
pub mod fixed;
pub mod strategy {
    pub mod dragon;
    pub mod grisu;
}

use decoder::{DecodableFloat, Decoded, FullDecoded};

/// The minimum size of the buffer necessary for the shortest mode.
///
/// The maximum number of significant digits necessary to uniquely identify a
/// binary64 value is 17, and binary32 needs no more than 9.
pub const MAX_SIG_DIGITS: usize = 17;

/// Digit capacity needed for binary64: the longest exact decimal expansion
/// (which occurs down in the subnormal range) has 767 significant digits,
/// plus one slot for a rounding carry.
pub const BUF_LEN_F64: usize = 767 + 1;

/// Digit capacity needed for binary32: 112 significant digits at most, plus
/// one slot for a rounding carry.
pub const BUF_LEN_F32: usize = 112 + 1;

/// What sort of number a [`NumberBuffer`] holds.
///
/// The tag only affects sign handling at the edges: integers and exact
/// fixed-point decimals never carry a negative zero, while a binary floating
/// point value can (suppressing it, where desired, is the renderer's job).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NumberKind {
    Integer,
    Decimal,
    Float,
}

/// How many digits to generate.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Precision {
    /// The shortest digit sequence that round-trips to the same value.
    Shortest,
    /// Exactly this many significant digits, correctly rounded.
    Significant(usize),
    /// Exactly this many digits after the decimal point, correctly rounded.
    Fractional(usize),
}

/// The digit sequence and decimal scale produced by a conversion.
///
/// `digits[..count]` holds ASCII digits with no leading zero; the
/// represented magnitude is `0.d1 d2 .. dcount * 10^scale`, i.e. `scale`
/// positions the decimal point relative to the first digit. `count == 0`
/// means the value is exactly zero.
///
/// A buffer is meant to live on the caller's stack for the duration of one
/// formatting operation; nothing here is shared or retained.
#[derive(Clone)]
pub struct NumberBuffer<const CAP: usize> {
    pub digits: [u8; CAP],
    pub count: usize,
    pub scale: i32,
    pub negative: bool,
    pub kind: NumberKind,
}

/// A buffer sized for any binary64 request.
pub type Buffer64 = NumberBuffer<BUF_LEN_F64>;

/// A buffer sized for any binary32 request.
pub type Buffer32 = NumberBuffer<BUF_LEN_F32>;

impl<const CAP: usize> NumberBuffer<CAP> {
    pub fn new(kind: NumberKind) -> Self {
        NumberBuffer { digits: [0; CAP], count: 0, scale: 0, negative: false, kind }
    }

    /// The significant digits generated so far, as ASCII.
    pub fn digits(&self) -> &[u8] {
        &self.digits[..self.count]
    }

    /// True when the stored value is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.count == 0
    }

    // Integers and fixed-point decimals have no negative zero.
    fn set_sign(&mut self, negative: bool) {
        self.negative = negative && !(self.count == 0 && self.kind != NumberKind::Float);
    }
}

impl<const CAP: usize> fmt::Debug for NumberBuffer<CAP> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NumberBuffer")
            .field("digits", &core::str::from_utf8(self.digits()).unwrap_or("<non-ascii>"))
            .field("scale", &self.scale)
            .field("negative", &self.negative)
            .field("kind", &self.kind)
            .finish()
    }
}

/// Rounds the digit sequence up in place.
///
/// Returns `Some(c)` when all digits were nines: the buffer is rewritten to
/// `100..0`, the caller has to increment the decimal exponent, and `c` is an
/// extra digit to append if the request leaves room for it. (An empty buffer
/// rounds up to a lone `1`.)
pub fn round_up(d: &mut [u8]) -> Option<u8> {
    match d.iter().rposition(|&c| c != b'9') {
        Some(i) => {
            // d[i+1..] is all nines
            d[i] += 1;
            for c in &mut d[i + 1..] {
                *c = b'0';
            }
            None
        }
        None if d.is_empty() => Some(b'1'),
        None => {
            // 999..999 rounds to 1000..000 with an increased exponent
            d[0] = b'1';
            for c in &mut d[1..] {
                *c = b'0';
            }
            Some(b'0')
        }
    }
}

/// Converts `v` into decimal digits.
///
/// Returns `false` without touching digit state when `v` is NaN or
/// infinite; those are for the caller to deal with. Zero is handled here
/// (`count == 0`) and never reaches the generators. The sign is stripped
/// before generation and reattached afterwards.
pub fn convert<T: DecodableFloat, const CAP: usize>(
    v: T,
    precision: Precision,
    buf: &mut NumberBuffer<CAP>,
) -> bool {
    let (negative, decoded) = decoder::decode(v);
    match decoded {
        FullDecoded::Nan | FullDecoded::Infinite => false,
        FullDecoded::Zero => {
            buf.kind = NumberKind::Float;
            buf.count = 0;
            buf.scale = 0;
            buf.set_sign(negative);
            true
        }
        FullDecoded::Finite(d) => {
            buf.kind = NumberKind::Float;
            convert_finite(&d, precision, buf);
            buf.set_sign(negative);
            true
        }
    }
}

/// Converts a pre-decoded positive finite magnitude into decimal digits.
///
/// This is the core entry point: the fast generator runs first, and its
/// failure (an expected signal, not an error) routes to the exact generator
/// with no partial output retained. Sign and special values never appear at
/// this level.
pub fn convert_finite<const CAP: usize>(
    d: &Decoded,
    precision: Precision,
    buf: &mut NumberBuffer<CAP>,
) {
    assert!(CAP > MAX_SIG_DIGITS);
    let (len, exp) = match precision {
        Precision::Shortest => {
            let digits = &mut buf.digits[..];
            match strategy::grisu::format_shortest_opt(d, digits) {
                Some(r) => r,
                None => strategy::dragon::format_shortest(d, digits),
            }
        }
        Precision::Significant(n) => {
            // a request for zero significant digits gets the minimum of one
            let n = n.clamp(1, CAP - 1);
            let digits = &mut buf.digits[..n];
            match strategy::grisu::format_exact_opt(d, digits, i16::MIN) {
                Some(r) => r,
                None => strategy::dragon::format_exact(d, digits, i16::MIN),
            }
        }
        Precision::Fractional(n) => {
            let limit = -((n as i64).min(i16::MAX as i64)) as i16;
            // leave the last slot for a rounding carry
            let digits = &mut buf.digits[..CAP - 1];
            match strategy::grisu::format_exact_opt(d, digits, limit) {
                Some(r) => r,
                None => strategy::dragon::format_exact(d, digits, limit),
            }
        }
    };
    debug_assert!(len <= CAP);
    debug_assert!(len == 0 || buf.digits[0] != b'0');
    buf.count = len;
    buf.scale = if len == 0 { 0 } else { exp as i32 };
}
