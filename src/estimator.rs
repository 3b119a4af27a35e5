//! Decimal exponent estimation.

/// Finds `k_0` such that `10^(k_0-1) < mant * 2^exp <= 10^(k_0+1)`.
///
/// This is used to approximate `k = ceil(log_10 (mant * 2^exp))`; the true
/// `k` is either `k_0` or `k_0+1`, and the exact generator fixes the
/// off-by-one case with a single comparison. The estimate never overshoots,
/// which is the direction that fixup can handle.
pub fn estimate_scaling_factor(mant: u64, exp: i16) -> i16 {
    /// Equal to `floor(log_10 2 * 2^32)`.
    const LOG10_2: i64 = 1292913986;
    // 2^(nbits-1) < mant <= 2^nbits if mant > 0
    let nbits = 64 - (mant - 1).leading_zeros() as i64;
    // multiply by log_10 2 in fixed point, rounding toward minus infinity
    (((nbits + exp as i64) * LOG10_2) >> 32) as i16
}
