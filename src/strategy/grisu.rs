//! The fast digit generator: Grisu as described in "Printing Floating-Point
//! Numbers Quickly and Accurately with Integers"[^1], working on a 64-bit
//! approximation of the value with an explicitly tracked error bound.
//!
//! Both entry points return `None` whenever the approximation is not precise
//! enough to certify the digits; the caller is expected to rerun the request
//! through the exact generator. Failure is a routine signal here, not an
//! error.
//!
//! [^1]: Florian Loitsch. 2010. Printing floating-point numbers quickly and
//!   accurately with integers. SIGPLAN Not. 45, 6 (June 2010), 233-243.

use crate::decoder::Decoded;
use crate::diy_float::Fp;
use crate::{MAX_SIG_DIGITS, round_up};

// The scaled value has to end up with its binary point inside the word:
// `GAMMA = -32` keeps the integral part within u32 (digit extraction needs a
// division, and the remainder is needed for the error bookkeeping), and
// `ALPHA = -60` keeps the repeatedly-by-10-multiplied fraction from
// overflowing. This is the widest window with both properties.
#[doc(hidden)]
pub const ALPHA: i16 = -60;
#[doc(hidden)]
pub const GAMMA: i16 = -32;

/*
# the following Python code generates this table:
for i in range(-308, 333, 8):
    if i >= 0: f = 10**i; e = 0
    else: f = 2**(80-4*i) // 10**-i; e = 4 * i - 80
    l = f.bit_length()
    f = ((f << 64 >> (l-1)) + 1) >> 1; e += l - 64
    print('    (%#018x, %5d, %4d),' % (f, e, i))
*/

#[doc(hidden)]
pub static CACHED_POW10: [(u64, i16, i16); 81] = [
    // (f, e, k)
    (0xe61acf033d1a45df, -1087, -308),
    (0xab70fe17c79ac6ca, -1060, -300),
    (0xff77b1fcbebcdc4f, -1034, -292),
    (0xbe5691ef416bd60c, -1007, -284),
    (0x8dd01fad907ffc3c, -980, -276),
    (0xd3515c2831559a83, -954, -268),
    (0x9d71ac8fada6c9b5, -927, -260),
    (0xea9c227723ee8bcb, -901, -252),
    (0xaecc49914078536d, -874, -244),
    (0x823c12795db6ce57, -847, -236),
    (0xc21094364dfb5637, -821, -228),
    (0x9096ea6f3848984f, -794, -220),
    (0xd77485cb25823ac7, -768, -212),
    (0xa086cfcd97bf97f4, -741, -204),
    (0xef340a98172aace5, -715, -196),
    (0xb23867fb2a35b28e, -688, -188),
    (0x84c8d4dfd2c63f3b, -661, -180),
    (0xc5dd44271ad3cdba, -635, -172),
    (0x936b9fcebb25c996, -608, -164),
    (0xdbac6c247d62a584, -582, -156),
    (0xa3ab66580d5fdaf6, -555, -148),
    (0xf3e2f893dec3f126, -529, -140),
    (0xb5b5ada8aaff80b8, -502, -132),
    (0x87625f056c7c4a8b, -475, -124),
    (0xc9bcff6034c13053, -449, -116),
    (0x964e858c91ba2655, -422, -108),
    (0xdff9772470297ebd, -396, -100),
    (0xa6dfbd9fb8e5b88f, -369, -92),
    (0xf8a95fcf88747d94, -343, -84),
    (0xb94470938fa89bcf, -316, -76),
    (0x8a08f0f8bf0f156b, -289, -68),
    (0xcdb02555653131b6, -263, -60),
    (0x993fe2c6d07b7fac, -236, -52),
    (0xe45c10c42a2b3b06, -210, -44),
    (0xaa242499697392d3, -183, -36),
    (0xfd87b5f28300ca0e, -157, -28),
    (0xbce5086492111aeb, -130, -20),
    (0x8cbccc096f5088cc, -103, -12),
    (0xd1b71758e219652c, -77, -4),
    (0x9c40000000000000, -50, 4),
    (0xe8d4a51000000000, -24, 12),
    (0xad78ebc5ac620000, 3, 20),
    (0x813f3978f8940984, 30, 28),
    (0xc097ce7bc90715b3, 56, 36),
    (0x8f7e32ce7bea5c70, 83, 44),
    (0xd5d238a4abe98068, 109, 52),
    (0x9f4f2726179a2245, 136, 60),
    (0xed63a231d4c4fb27, 162, 68),
    (0xb0de65388cc8ada8, 189, 76),
    (0x83c7088e1aab65db, 216, 84),
    (0xc45d1df942711d9a, 242, 92),
    (0x924d692ca61be758, 269, 100),
    (0xda01ee641a708dea, 295, 108),
    (0xa26da3999aef774a, 322, 116),
    (0xf209787bb47d6b85, 348, 124),
    (0xb454e4a179dd1877, 375, 132),
    (0x865b86925b9bc5c2, 402, 140),
    (0xc83553c5c8965d3d, 428, 148),
    (0x952ab45cfa97a0b3, 455, 156),
    (0xde469fbd99a05fe3, 481, 164),
    (0xa59bc234db398c25, 508, 172),
    (0xf6c69a72a3989f5c, 534, 180),
    (0xb7dcbf5354e9bece, 561, 188),
    (0x88fcf317f22241e2, 588, 196),
    (0xcc20ce9bd35c78a5, 614, 204),
    (0x98165af37b2153df, 641, 212),
    (0xe2a0b5dc971f303a, 667, 220),
    (0xa8d9d1535ce3b396, 694, 228),
    (0xfb9b7cd9a4a7443c, 720, 236),
    (0xbb764c4ca7a44410, 747, 244),
    (0x8bab8eefb6409c1a, 774, 252),
    (0xd01fef10a657842c, 800, 260),
    (0x9b10a4e5e9913129, 827, 268),
    (0xe7109bfba19c0c9d, 853, 276),
    (0xac2820d9623bf429, 880, 284),
    (0x80444b5e7aa7cf85, 907, 292),
    (0xbf21e44003acdd2d, 933, 300),
    (0x8e679c2f5e44ff8f, 960, 308),
    (0xd433179d9c8cb841, 986, 316),
    (0x9e19db92b4e31ba9, 1013, 324),
    (0xeb96bf6ebadf77d9, 1039, 332),
];

#[doc(hidden)]
pub const CACHED_POW10_FIRST_E: i16 = -1087;
#[doc(hidden)]
pub const CACHED_POW10_LAST_E: i16 = 1039;

/// Returns `(k, 10^-k)` for some `k` such that the binary exponent of
/// `10^-k` lies in `[alpha, gamma]`. The table steps by 8 in the decimal
/// exponent, which is fine because `gamma - alpha >= 27` here.
#[doc(hidden)]
pub fn cached_power(alpha: i16, gamma: i16) -> (i16, Fp) {
    let offset = CACHED_POW10_FIRST_E as i32;
    let range = (CACHED_POW10.len() as i32) - 1;
    let domain = (CACHED_POW10_LAST_E - CACHED_POW10_FIRST_E) as i32;
    let idx = ((gamma as i32) - offset) * range / domain;
    let (f, e, k) = CACHED_POW10[idx as usize];
    debug_assert!(alpha <= e && e <= gamma);
    (k, Fp { f, e })
}

/// Given `x > 0`, returns `(k, 10^k)` such that `10^k <= x < 10^(k+1)`.
#[doc(hidden)]
pub fn max_pow10_no_more_than(x: u32) -> (u8, u32) {
    debug_assert!(x > 0);

    const X9: u32 = 10_0000_0000;
    const X8: u32 = 1_0000_0000;
    const X7: u32 = 1000_0000;
    const X6: u32 = 100_0000;
    const X5: u32 = 10_0000;
    const X4: u32 = 1_0000;
    const X3: u32 = 1000;
    const X2: u32 = 100;
    const X1: u32 = 10;

    if x < X4 {
        if x < X2 {
            if x < X1 { (0, 1) } else { (1, X1) }
        } else {
            if x < X3 { (2, X2) } else { (3, X3) }
        }
    } else {
        if x < X6 {
            if x < X5 { (4, X4) } else { (5, X5) }
        } else if x < X8 {
            if x < X7 { (6, X6) } else { (7, X7) }
        } else {
            if x < X9 { (8, X8) } else { (9, X9) }
        }
    }
}

/// The shortest mode. On success the first returned value is the digit
/// count written into `buf` and the second is the decimal exponent.
///
/// Returns `None` when the approximation cannot prove that the digits
/// round-trip; the exact generator then takes over.
pub fn format_shortest_opt(d: &Decoded, buf: &mut [u8]) -> Option<(usize, i16)> {
    assert!(d.mant > 0);
    assert!(d.minus > 0);
    assert!(d.plus > 0);
    assert!(d.mant.checked_add(d.plus).is_some());
    assert!(d.mant.checked_sub(d.minus).is_some());
    assert!(buf.len() >= MAX_SIG_DIGITS);
    // at least three bits of headroom for the upcoming normalization
    assert!(d.mant + d.plus < (1 << 61));

    // boundaries and value, brought to a shared exponent
    let plus = Fp { f: d.mant + d.plus, e: d.exp }.normalize();
    let minus = Fp { f: d.mant - d.minus, e: d.exp }.normalize_to(plus.e);
    let v = Fp { f: d.mant, e: d.exp }.normalize_to(plus.e);

    // pick `cached = 10^-k` so that the scaled exponent lands in
    // `[ALPHA, GAMMA]`, i.e. the scaled `plus` lands in `[4, 2^32)` integral
    // digits. each scaled quantity carries an error of less than 1 ulp.
    let (minusk, cached) = cached_power(ALPHA - plus.e - 64, GAMMA - plus.e - 64);
    let plus = plus.mul(cached);
    let minus = minus.mul(cached);
    let v = v.mul(cached);
    debug_assert_eq!(plus.e, minus.e);
    debug_assert_eq!(plus.e, v.e);

    // `plus` and `minus` are approximations with an unknown error sign, so
    // widen by 1 ulp on each side: digits are generated over the liberal
    // interval `(minus1, plus1)` and only accepted if they also fit the
    // conservative interval `[minus0, plus0]` two ulps inside it.
    let plus1 = plus.f + 1;
    //  let plus0 = plus.f - 1; // only used in the final `round_and_weed` check
    //  let minus0 = minus.f + 1;
    let minus1 = minus.f - 1;
    let e = -plus.e as usize; // shared binary point position

    // the cached power guarantees the integral part of `plus1` fits in u32
    let plus1int = (plus1 >> e) as u32;
    let plus1frac = plus1 & ((1 << e) - 1);

    // upper bound for the digit place `kappa` below
    let (max_kappa, max_ten_kappa) = max_pow10_no_more_than(plus1int);

    let mut i = 0;
    let exp = max_kappa as i16 - minusk + 1;

    // digits of `plus1` are generated most significant first, and generation
    // stops at the first place where `plus1 % 10^kappa` drops below
    // `plus1 - minus1`: truncating there yields a value inside the interval
    // with the minimal number of digits (Loitsch, Theorem 6.2).
    let delta1 = plus1 - minus1;
    let delta1frac = delta1 & ((1 << e) - 1);

    // integral digits; quotient and remainder are both scaled by `2^-e`
    let mut ten_kappa = max_ten_kappa;
    let mut remainder = plus1int;
    loop {
        // `plus1 >= 10^kappa` still, so at least one digit remains
        let q = remainder / ten_kappa;
        let r = remainder % ten_kappa;
        debug_assert!(q < 10);
        buf[i] = b'0' + q as u8;
        i += 1;

        let plus1rem = ((r as u64) << e) + plus1frac; // == (plus1 % 10^kappa) * 2^e
        if plus1rem < delta1 {
            // found the right `kappa`; scale `10^kappa` to the shared exponent
            let ten_kappa = (ten_kappa as u64) << e;
            return round_and_weed(&mut buf[..i], exp, plus1rem, delta1, plus1 - v.f, ten_kappa, 1);
        }

        // there are exactly `max_kappa + 1` integral digits
        if i > max_kappa as usize {
            debug_assert_eq!(ten_kappa, 1);
            break;
        }
        ten_kappa /= 10;
        remainder = r;
    }

    // fractional digits by repeated multiplication (division would lose
    // precision); the threshold and the ulp scale along with the remainder
    let mut remainder = plus1frac;
    let mut threshold = delta1frac;
    let mut ulp = 1;
    loop {
        remainder *= 10; // cannot overflow, `2^e * 10 < 2^64`
        threshold *= 10;
        ulp *= 10;

        // `10^kappa` is now implicitly `2^e`
        let q = remainder >> e;
        let r = remainder & ((1 << e) - 1);
        debug_assert!(q < 10);
        buf[i] = b'0' + q as u8;
        i += 1;

        if r < threshold {
            return round_and_weed(&mut buf[..i], exp, r, threshold, (plus1 - v.f) * ulp, 1 << e, ulp);
        }
        remainder = r;
    }

    // The generated digits are those of `plus1`, which is merely the largest
    // candidate in the interval; walk the last digit down toward the
    // candidate closest to `v`, then verify that the choice is unambiguous
    // under the 1 ulp uncertainty of `v` itself and lies within the
    // conservative interval. `None` on any doubt.
    //
    // everything is scaled by a common implicit factor `k`:
    // - `remainder = (plus1 % 10^kappa) * k`
    // - `threshold = (plus1 - minus1) * k`, with `remainder < threshold`
    // - `plus1v = (plus1 - v) * k`, with `plus1v < threshold`
    // - `ten_kappa = 10^kappa * k` and `ulp = 2^-e * k`
    fn round_and_weed(
        buf: &mut [u8],
        exp: i16,
        remainder: u64,
        threshold: u64,
        plus1v: u64,
        ten_kappa: u64,
        ulp: u64,
    ) -> Option<(usize, i16)> {
        assert!(!buf.is_empty());

        // two stand-ins for the uncertain `v`, kept as distances from
        // `plus1` so the arithmetic below stays unsigned
        let plus1v_down = plus1v + ulp; // plus1 - (v - 1 ulp)
        let plus1v_up = plus1v - ulp; // plus1 - (v + 1 ulp)

        // Decrement the last digit while doing so still yields a candidate
        // (a) no bigger than `v + 1 ulp`, (b) no smaller than `minus1`, and
        // (c) closer to `v + 1 ulp` than the current one. `plus1w` tracks
        // `plus1 - w` for the current candidate `w`, so it grows by
        // `ten_kappa` per step. The comparisons are arranged so that, given
        // the earlier invariants, none of them can wrap.
        let mut plus1w = remainder;
        {
            let last = buf.last_mut().unwrap();
            while plus1w < plus1v_up
                && threshold - plus1w >= ten_kappa
                && (plus1w + ten_kappa < plus1v_up
                    || plus1v_up - plus1w >= plus1w + ten_kappa - plus1v_up)
            {
                *last -= 1;
                debug_assert!(*last > b'0'); // the shortest repr cannot end with `0`
                plus1w += ten_kappa;
            }
        }

        // the same candidate must also be the closest one to `v - 1 ulp`;
        // if stepping once more would get closer to it, the true `v` could
        // round either way and the result cannot be certified
        if plus1w < plus1v_down
            && threshold - plus1w >= ten_kappa
            && (plus1w + ten_kappa < plus1v_down
                || plus1v_down - plus1w >= plus1w + ten_kappa - plus1v_down)
        {
            return None;
        }

        // finally reject anything outside the conservative interval
        // `[minus0, plus0]`, which sits 2 ulps inside `(minus1, plus1)`
        if 2 * ulp <= plus1w && plus1w <= threshold - 4 * ulp {
            Some((buf.len(), exp))
        } else {
            None
        }
    }
}

/// The counted modes. Generates digits for `buf.len()` significant digits
/// or down to the decimal place `limit`, whichever is hit first, rounding
/// the last digit. On success returns the digit count and the decimal
/// exponent (the count can be less than requested when trailing places
/// round away, and zero when everything does).
///
/// Returns `None` when the requested digits run past what the 64-bit
/// approximation can determine.
pub fn format_exact_opt(d: &Decoded, buf: &mut [u8], limit: i16) -> Option<(usize, i16)> {
    assert!(d.mant > 0);
    assert!(d.mant < (1 << 61)); // headroom for normalization
    assert!(!buf.is_empty());

    let v = Fp { f: d.mant, e: d.exp }.normalize();
    let (minusk, cached) = cached_power(ALPHA - v.e - 64, GAMMA - v.e - 64);
    let v = v.mul(cached);

    // integral and fractional parts at the shared binary point
    let e = -v.e as usize;
    let vint = (v.f >> e) as u32;
    let vfrac = v.f & ((1 << e) - 1);

    let requested_digits = buf.len();

    const POW10_UP_TO_9: [u32; 10] =
        [1, 10, 100, 1000, 10_000, 100_000, 1_000_000, 10_000_000, 100_000_000, 1_000_000_000];

    // an exactly representable integer cannot fill a digit request longer
    // than itself with certified digits, so skip the whole generation
    if vfrac == 0 && (requested_digits >= 11 || vint < POW10_UP_TO_9[requested_digits - 1]) {
        return None;
    }

    // the scaled `v` has an error below 1 ulp with an unknown sign; `err`
    // tracks that ulp through later rescalings, and the goal is a digit
    // sequence that `v - err` and `v + err` agree on once rounded
    let mut err = 1;

    let (max_kappa, max_ten_kappa) = max_pow10_no_more_than(vint);

    let mut i = 0;
    let exp = max_kappa as i16 - minusk + 1;

    // apply the place-value limit up front so the rounding below happens at
    // the right digit (rounding first and truncating later would round
    // twice); rounding up can still lengthen the output afterwards
    let len = if exp <= limit {
        // Not even one digit fits above the limit, e.g. 0.06 at one
        // fractional digit becoming 0.1. The empty-buffer rounding pass
        // decides between nothing and a carried `1`. `v` is pre-divided by
        // 10 since `max_ten_kappa << e` times 10 could overflow; the error
        // range widens by the same factor, costing a few extra fallbacks.
        return possibly_round(buf, 0, exp, limit, v.f / 10, (max_ten_kappa as u64) << e, err << e);
    } else if ((exp as i32 - limit as i32) as usize) < requested_digits {
        (exp - limit) as usize
    } else {
        requested_digits
    };
    debug_assert!(len > 0);

    // integral digits; the error is entirely fractional so far, so no
    // accuracy check is needed in this loop
    let mut ten_kappa = max_ten_kappa;
    let mut remainder = vint;
    loop {
        let q = remainder / ten_kappa;
        let r = remainder % ten_kappa;
        debug_assert!(q < 10);
        buf[i] = b'0' + q as u8;
        i += 1;

        if i == len {
            let vrem = ((r as u64) << e) + vfrac; // == (v % 10^kappa) * 2^e
            return possibly_round(buf, len, exp, limit, vrem, (ten_kappa as u64) << e, err << e);
        }
        if i > max_kappa as usize {
            debug_assert_eq!(ten_kappa, 1);
            break;
        }
        ten_kappa /= 10;
        remainder = r;
    }

    // fractional digits. once the accumulated error reaches half of the
    // digit place there cannot be a certified answer (the rounding pass
    // would reject it anyway), so generation stops early.
    let mut remainder = vfrac;
    let maxerr = 1 << (e - 1);
    while err < maxerr {
        remainder *= 10; // cannot overflow, `2^e * 10 < 2^64`
        err *= 10; // cannot overflow, `err * 10 < 2^e * 5 < 2^64`

        let q = remainder >> e;
        let r = remainder & ((1 << e) - 1);
        debug_assert!(q < 10);
        buf[i] = b'0' + q as u8;
        i += 1;

        if i == len {
            return possibly_round(buf, len, exp, limit, r, 1 << e, err);
        }
        remainder = r;
    }
    return None;

    // `buf[..len]` now holds the truncated digits of `v`. the result is
    // certified only when `v - ulp` and `v + ulp` round to the same digit
    // sequence: either the digits as they stand, or their rounded-up form.
    //
    // arguments share an implicit scale factor `k`:
    // - `remainder = (v % 10^kappa) * k`, `ten_kappa = 10^kappa * k`,
    //   `ulp = 2^-e * k`
    fn possibly_round(
        buf: &mut [u8],
        mut len: usize,
        mut exp: i16,
        limit: i16,
        remainder: u64,
        ten_kappa: u64,
        ulp: u64,
    ) -> Option<(usize, i16)> {
        debug_assert!(remainder < ten_kappa);

        // a full ulp of error per side spans at least two digit steps, so
        // three or more candidate sequences exist
        if ulp >= ten_kappa {
            return None;
        }
        // half an ulp per side already allows two candidates
        if ten_kappa - ulp <= ulp {
            return None;
        }

        // both `v - ulp` and `v + ulp` round down: keep the digits.
        // the condition is `remainder + ulp < 10^kappa / 2`, rearranged to
        // avoid overflow (`v - ulp` needs no check, the distance to the
        // truncation cannot exceed `10^kappa / 2` here)
        if ten_kappa - remainder > remainder && ten_kappa - 2 * remainder >= 2 * ulp {
            return Some((len, exp));
        }

        // both round up: `remainder - ulp >= 10^kappa / 2`, same treatment
        if remainder > ulp && ten_kappa - (remainder - ulp) <= remainder - ulp {
            if let Some(c) = round_up(&mut buf[..len]) {
                // an all-nines carry moves the decimal point; the extra
                // digit is kept only while the place limit allows it
                exp += 1;
                if exp > limit && len < buf.len() {
                    buf[len] = c;
                    len += 1;
                }
            }
            return Some((len, exp));
        }

        // the interval straddles the rounding boundary
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::{FullDecoded, decode};

    #[test]
    fn test_cached_power() {
        assert_eq!(CACHED_POW10.first().unwrap().1, CACHED_POW10_FIRST_E);
        assert_eq!(CACHED_POW10.last().unwrap().1, CACHED_POW10_LAST_E);

        for e in -1137..961 {
            // full range of the scaled exponents used by `f32` and `f64`
            let low = ALPHA - e - 64;
            let high = GAMMA - e - 64;
            let (_k, cached) = cached_power(low, high);
            assert!(low <= cached.e && cached.e <= high, "cached_power({low}, {high}) = {cached:?}");
        }
    }

    #[test]
    fn test_max_pow10_no_more_than() {
        let mut prevtenk = 1;
        loop {
            let tenk = prevtenk * 10;
            assert_eq!(max_pow10_no_more_than(tenk - 1), (tenk.ilog10() as u8 - 1, prevtenk));
            assert_eq!(max_pow10_no_more_than(tenk), (tenk.ilog10() as u8, tenk));
            if tenk >= 10_0000_0000 {
                break;
            }
            prevtenk = tenk;
        }
    }

    fn decoded(v: f64) -> crate::decoder::Decoded {
        match decode(v) {
            (false, FullDecoded::Finite(d)) => d,
            other => panic!("unexpected decode result {other:?}"),
        }
    }

    #[test]
    fn shortest_agrees_on_easy_values() {
        let mut buf = [0u8; MAX_SIG_DIGITS];
        let (len, exp) = format_shortest_opt(&decoded(0.1), &mut buf).unwrap();
        assert_eq!((&buf[..len], exp), (&b"1"[..], 0));

        let (len, exp) = format_shortest_opt(&decoded(3.141592653589793), &mut buf).unwrap();
        assert_eq!((&buf[..len], exp), (&b"3141592653589793"[..], 1));

        let (len, exp) = format_shortest_opt(&decoded(100.0), &mut buf).unwrap();
        assert_eq!((&buf[..len], exp), (&b"1"[..], 3));
    }

    #[test]
    fn shortest_respects_asymmetric_boundaries() {
        // the margin below a power of two is a quarter ulp, which is what
        // lets 2^0 print as a single digit
        let mut buf = [0u8; MAX_SIG_DIGITS];
        let (len, exp) = format_shortest_opt(&decoded(1.0), &mut buf).unwrap();
        assert_eq!((&buf[..len], exp), (&b"1"[..], 1));
        let (len, exp) = format_shortest_opt(&decoded(0.5), &mut buf).unwrap();
        assert_eq!((&buf[..len], exp), (&b"5"[..], 0));
    }

    #[test]
    fn exact_rounds_at_the_cut() {
        let mut buf = [0u8; 3];
        let (len, exp) = format_exact_opt(&decoded(3.141592653589793), &mut buf, i16::MIN).unwrap();
        assert_eq!((&buf[..len], exp), (&b"314"[..], 1));

        // the eleventh digit of pi rounds the tenth up
        let mut buf = [0u8; 10];
        let (len, exp) = format_exact_opt(&decoded(3.141592653589793), &mut buf, i16::MIN).unwrap();
        assert_eq!((&buf[..len], exp), (&b"3141592654"[..], 1));

        // trailing zeros are real digits in counted mode
        let mut buf = [0u8; 2];
        let (len, exp) = format_exact_opt(&decoded(0.1), &mut buf, i16::MIN).unwrap();
        assert_eq!((&buf[..len], exp), (&b"10"[..], 0));
    }

    #[test]
    fn exact_carry_can_move_the_point() {
        // 9.7 at zero fractional digits becomes 10
        let mut buf = [0u8; 8];
        let (len, exp) = format_exact_opt(&decoded(9.7), &mut buf, 0).unwrap();
        assert_eq!((&buf[..len], exp), (&b"10"[..], 2));
    }

    #[test]
    fn exact_can_round_to_nothing() {
        // 0.04 at one fractional digit: all digits round away
        let mut buf = [0u8; 8];
        let (len, _) = format_exact_opt(&decoded(0.04), &mut buf, -1).unwrap();
        assert_eq!(len, 0);
    }

    #[test]
    fn exact_integers_defer_long_requests() {
        // 42 cannot certify 20 digits from a 64-bit approximation
        let mut buf = [0u8; 20];
        assert_eq!(format_exact_opt(&decoded(42.0), &mut buf, i16::MIN), None);

        // 0.125 scales to the exact integer 1250; its expansion ends right
        // at the requested cut and the place after it cannot be certified
        let mut buf = [0u8; 4];
        assert_eq!(format_exact_opt(&decoded(0.125), &mut buf, i16::MIN), None);
    }
}
