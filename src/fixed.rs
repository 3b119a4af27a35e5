//! Digit extraction for fixed-point decimal magnitudes.
//!
//! A fixed-point value is already decimal, so none of the floating point
//! machinery applies: the digits fall out of repeated division by `10^9`,
//! one nine-digit block per step.

use crate::{NumberBuffer, NumberKind};

const CHUNK: u128 = 1_000_000_000;

// decimal digits of one chunk, right-aligned into `tmp`
fn chunk_digits(mut c: u32, tmp: &mut [u8; 9]) -> usize {
    let mut t = 9;
    while c > 0 {
        t -= 1;
        tmp[t] = b'0' + (c % 10) as u8;
        c /= 10;
    }
    t
}

/// Converts the fixed-point magnitude `value / 10^frac_digits` into digits.
///
/// The buffer comes out with `kind` set to [`NumberKind::Decimal`], trailing
/// zero digits trimmed, and no negative zero.
pub fn fixed_to_digits<const CAP: usize>(
    value: u128,
    frac_digits: u32,
    negative: bool,
    buf: &mut NumberBuffer<CAP>,
) {
    buf.kind = NumberKind::Decimal;
    if value == 0 {
        buf.count = 0;
        buf.scale = 0;
        buf.set_sign(negative);
        return;
    }

    // u128 has at most 39 digits, so at most five chunks
    let mut chunks = [0u32; 5];
    let mut n = 0;
    let mut v = value;
    while v > 0 {
        chunks[n] = (v % CHUNK) as u32;
        v /= CHUNK;
        n += 1;
    }

    // the leading chunk is written without padding, the rest padded to nine
    let mut tmp = [b'0'; 9];
    let t = chunk_digits(chunks[n - 1], &mut tmp);
    let top_len = 9 - t;
    assert!(top_len + (n - 1) * 9 <= CAP, "buffer too small for fixed-point digits");
    buf.digits[..top_len].copy_from_slice(&tmp[t..]);
    let mut pos = top_len;
    for i in (0..n - 1).rev() {
        let mut tmp = [b'0'; 9];
        chunk_digits(chunks[i], &mut tmp);
        buf.digits[pos..pos + 9].copy_from_slice(&tmp);
        pos += 9;
    }

    let total = pos;
    while pos > 0 && buf.digits[pos - 1] == b'0' {
        pos -= 1;
    }
    buf.count = pos;
    buf.scale = total as i32 - frac_digits as i32;
    buf.set_sign(negative);
}
