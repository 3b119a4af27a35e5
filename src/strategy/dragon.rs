//! The exact digit generator: the algorithm of Burger and Dybvig, "Printing
//! Floating-Point Numbers Quickly and Accurately"[^1], over exact big-integer
//! arithmetic. Slower than the fast path but never wrong and never stuck,
//! so everything the fast path cannot certify lands here.
//!
//! The value is kept as an exact rational `mant / scale`; digits come out of
//! a single-digit division whose estimate is made reliable by pre-shifting
//! `scale` so its top block falls in a known range.
//!
//! [^1]: Burger, R. G. and Dybvig, R. K. 1996. Printing floating-point
//!   numbers quickly and accurately. SIGPLAN Not. 31, 5 (May. 1996), 108-116.

use core::cmp::Ordering;

use crate::bignum::Big32x115 as Big;
use crate::decoder::Decoded;
use crate::estimator::estimate_scaling_factor;
use crate::{MAX_SIG_DIGITS, round_up};

// in-place multiplication by 10^n
fn mul_pow10(x: &mut Big, n: usize) {
    let mut pow = Big::ZERO;
    Big::pow10(n, &mut pow);
    let mut product = Big::ZERO;
    Big::mul(x, &pow, &mut product);
    *x = product;
}

/// Shifts `scale` (and everything scaled along with it) so that the top
/// block of `scale` lands in `[8, u32::MAX / 10]`. That range makes the
/// leading-block quotient estimate in `Big::heuristic_divide` off by at most
/// one, and keeps `10 * scale` within the same block count.
fn prepare_scale(scale: &mut Big, others: &mut [&mut Big]) {
    let top = *scale.digits().last().unwrap();
    if top < 8 || top > u32::MAX / 10 {
        let log2 = 31 - top.leading_zeros();
        let shift = ((32 + 27 - log2) % 32) as usize;
        scale.shl(shift);
        for x in others {
            x.shl(shift);
        }
    }
}

/// The shortest mode. Always succeeds; the first returned value is the
/// digit count written into `buf` and the second the decimal exponent.
pub fn format_shortest(d: &Decoded, buf: &mut [u8]) -> (usize, i16) {
    // the number `v` to format is `mant * 2^exp`, and every number between
    // `(mant - minus) * 2^exp` and `(mant + plus) * 2^exp` rounds back to
    // it, with the bounds included iff `d.inclusive`
    assert!(d.mant > 0);
    assert!(d.minus > 0);
    assert!(d.plus > 0);
    assert!(d.mant.checked_add(d.plus).is_some());
    assert!(d.mant.checked_sub(d.minus).is_some());
    assert!(buf.len() >= MAX_SIG_DIGITS);

    // `a.cmp(&b) < rounding` is `if d.inclusive { a <= b } else { a < b }`
    let rounding = if d.inclusive { Ordering::Greater } else { Ordering::Equal };

    // estimate `k_0` satisfying `10^(k_0-1) < high <= 10^(k_0+1)`; the tight
    // `k` with `10^(k-1) < high <= 10^k` emerges from the fixup below
    let mut k = estimate_scaling_factor(d.mant + d.plus, d.exp);

    // express `v = mant / scale` with the boundary gaps on the same scale
    let mut mant = Big::from_u64(d.mant);
    let mut minus = Big::from_u64(d.minus);
    let mut plus = Big::from_u64(d.plus);
    let mut scale = Big::ZERO;
    if d.exp < 0 {
        Big::pow2(-d.exp as usize, &mut scale);
    } else {
        scale.set_u32(1);
        mant.shl(d.exp as usize);
        minus.shl(d.exp as usize);
        plus.shl(d.exp as usize);
    }

    // divide by `10^k`; now `scale / 10 < mant + plus <= scale * 10`
    if k >= 0 {
        mul_pow10(&mut scale, k as usize);
    } else {
        mul_pow10(&mut mant, -k as usize);
        mul_pow10(&mut minus, -k as usize);
        mul_pow10(&mut plus, -k as usize);
    }

    prepare_scale(&mut scale, &mut [&mut mant, &mut minus, &mut plus]);

    // fixup when `mant + plus > scale` (or `>=`). `scale` itself stays
    // untouched, bumping `k` skips the initial multiplication instead.
    // afterwards `scale < mant + plus <= scale * 10`, so digit generation
    // can start. note that the first digit *can* be zero, when
    // `scale - plus < mant < scale`; the round-up below then fires at once.
    let mut sum = mant;
    sum.add(&plus);
    if scale.cmp(&sum) < rounding {
        k += 1;
    } else {
        mant.mul10();
        minus.mul10();
        plus.mul10();
    }

    let mut down;
    let mut up;
    let mut i = 0;
    loop {
        // invariant: `(mant + plus) / scale <= 10`, hence `mant < 10 * scale`
        let digit = Big::heuristic_divide(&mut mant, &scale);
        debug_assert!(digit < 10);
        buf[i] = b'0' + digit as u8;
        i += 1;

        // with `mant` now the remainder, the digits so far are the shortest
        // sequence inside `(low, high)` exactly when one of these holds:
        // - `mant < minus` (or `<=`): dropping everything after the current
        //   digit still rounds back to `v` from below
        // - `mant + plus > scale` (or `>=`): bumping the current digit
        //   rounds back to `v` from above
        down = mant.cmp(&minus) < rounding;
        let mut sum = mant;
        sum.add(&plus);
        up = scale.cmp(&sum) < rounding;
        if down || up {
            break;
        }

        // `minus` and `plus` keep growing while `mant` stays clipped below
        // `scale`, so this loop terminates
        mant.mul10();
        minus.mul10();
        plus.mul10();
    }

    // when both directions work, pick the nearer one; break exact ties to
    // the even last digit
    let round = up
        && (!down || {
            let mut double = mant;
            double.shl(1);
            match double.cmp(&scale) {
                Ordering::Greater => true,
                Ordering::Less => false,
                Ordering::Equal => buf[i - 1] & 1 == 1,
            }
        });
    if round {
        if round_up(&mut buf[..i]).is_some() {
            // an all-nines carry: the value is exactly `10^k`, whose
            // shortest form is the single digit `1` one place up
            k += 1;
            i = 1;
        }
    }

    debug_assert!(buf[i - 1] != b'0');
    (i, k)
}

/// The counted modes: exactly `buf.len()` significant digits, or digits
/// down to the decimal place `limit`, whichever is shorter. Always
/// succeeds. The returned count can fall short of the request when the
/// trailing places round away, and can be zero.
pub fn format_exact(d: &Decoded, buf: &mut [u8], limit: i16) -> (usize, i16) {
    assert!(d.mant > 0);
    assert!(!buf.is_empty());

    let mut k = estimate_scaling_factor(d.mant, d.exp);

    // `v = mant / scale`
    let mut mant = Big::from_u64(d.mant);
    let mut scale = Big::ZERO;
    if d.exp < 0 {
        Big::pow2(-d.exp as usize, &mut scale);
    } else {
        scale.set_u32(1);
        mant.shl(d.exp as usize);
    }

    // divide by `10^k`; now `scale / 10 < mant <= scale * 10`
    if k >= 0 {
        mul_pow10(&mut scale, k as usize);
    } else {
        mul_pow10(&mut mant, -k as usize);
    }

    prepare_scale(&mut scale, &mut [&mut mant]);

    // fixup as in the shortest mode, with the value alone
    if mant.cmp(&scale) != Ordering::Less {
        k += 1;
    } else {
        mant.mul10();
    }

    // apply the place limit before generating so the rounding below happens
    // at the correct digit; rounding up may lengthen the output again
    let mut len = if k < limit {
        // no digit above the limit at all. the rounding pass below still
        // decides between nothing and a carried `1` when `k == limit`.
        0
    } else if ((k as i32 - limit as i32) as usize) < buf.len() {
        (k - limit) as usize
    } else {
        buf.len()
    };

    let mut i = 0;
    while i < len {
        if mant.is_zero() {
            // the expansion ended early: the rest are true zero digits,
            // not something to round
            for c in &mut buf[i..len] {
                *c = b'0';
            }
            return (len, k);
        }
        let digit = Big::heuristic_divide(&mut mant, &scale);
        debug_assert!(digit < 10);
        buf[i] = b'0' + digit as u8;
        mant.mul10();
        i += 1;
    }

    // half-to-even on the cut: `mant` holds ten times the remainder, so
    // compare against `5 * scale`
    let mut half = scale;
    half.mul_small(5);
    let order = mant.cmp(&half);
    if order == Ordering::Greater
        || (order == Ordering::Equal && len > 0 && buf[len - 1] & 1 == 1)
    {
        if let Some(c) = round_up(&mut buf[..len]) {
            // carry past the first digit moves the decimal point; the freed
            // digit is kept only while the place limit allows it
            k += 1;
            if k > limit && len < buf.len() {
                buf[len] = c;
                len += 1;
            }
        }
    }
    (len, k)
}
