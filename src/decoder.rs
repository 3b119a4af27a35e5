//! Bit-level decomposition of IEEE 754 floating point numbers.

/// A helper trait to avoid duplicating the decomposition code for `f32` and
/// `f64`. The layout constants fully determine the decoding.
pub trait DecodableFloat: Copy {
    /// The number of bits in the significand, *excluding* the hidden bit.
    const MANTISSA_BITS: u32;
    /// The number of bits in the exponent.
    const EXPONENT_BITS: u32;

    /// Raw transmutation, widened to 64 bits.
    fn to_bits64(self) -> u64;
}

impl DecodableFloat for f32 {
    const MANTISSA_BITS: u32 = 23;
    const EXPONENT_BITS: u32 = 8;

    fn to_bits64(self) -> u64 {
        self.to_bits() as u64
    }
}

impl DecodableFloat for f64 {
    const MANTISSA_BITS: u32 = 52;
    const EXPONENT_BITS: u32 = 11;

    fn to_bits64(self) -> u64 {
        self.to_bits()
    }
}

/// Decoded unsigned finite value, such that:
///
/// - The original value equals to `mant * 2^exp`.
///
/// - Any number from `(mant - minus) * 2^exp` to `(mant + plus) * 2^exp` will
///   round to the original value. The range is inclusive only when
///   `inclusive` is true.
///
/// `mant` is pre-scaled so that both margins are integers: by 4 when the
/// value sits on a power of two above the smallest normal exponent (the gap
/// below is then a quarter ulp while the gap above stays a half ulp), and by
/// 2 everywhere else.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Decoded {
    /// The scaled mantissa.
    pub mant: u64,
    /// The lower error range.
    pub minus: u64,
    /// The upper error range.
    pub plus: u64,
    /// The shared exponent in base 2.
    pub exp: i16,
    /// True when the original mantissa was even, so a decimal exactly on a
    /// boundary still rounds back to this value.
    pub inclusive: bool,
}

/// Decoded unsigned value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FullDecoded {
    /// Not a number.
    Nan,
    /// Infinities.
    Infinite,
    /// Zero.
    Zero,
    /// Finite non-zero value with further breakdown.
    Finite(Decoded),
}

/// Returns a sign (true when negative) and a decoded number
/// representing the magnitude of `v`.
pub fn decode<T: DecodableFloat>(v: T) -> (bool, FullDecoded) {
    let bits = v.to_bits64();
    let negative = (bits >> (T::MANTISSA_BITS + T::EXPONENT_BITS)) & 1 == 1;
    let biased = ((bits >> T::MANTISSA_BITS) & ((1 << T::EXPONENT_BITS) - 1)) as i32;
    let frac = bits & ((1 << T::MANTISSA_BITS) - 1);
    let bias = (1 << (T::EXPONENT_BITS - 1)) - 1;

    let decoded = if biased == (1 << T::EXPONENT_BITS) - 1 {
        if frac == 0 { FullDecoded::Infinite } else { FullDecoded::Nan }
    } else if biased == 0 && frac == 0 {
        FullDecoded::Zero
    } else {
        let (mant, exp) = if biased == 0 {
            // subnormal, no hidden bit
            (frac, 1 - bias - T::MANTISSA_BITS as i32)
        } else {
            (frac | (1 << T::MANTISSA_BITS), biased - bias - T::MANTISSA_BITS as i32)
        };
        let inclusive = mant & 1 == 0;
        let decoded = if frac == 0 && biased > 1 {
            // the lower neighbor has a smaller exponent, so the gap below
            // is a quarter ulp while the gap above is a half ulp
            Decoded { mant: mant << 2, minus: 1, plus: 2, exp: (exp - 2) as i16, inclusive }
        } else {
            Decoded { mant: mant << 1, minus: 1, plus: 1, exp: (exp - 1) as i16, inclusive }
        };
        FullDecoded::Finite(decoded)
    };
    (negative, decoded)
}
