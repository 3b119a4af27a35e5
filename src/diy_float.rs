//! Extended precision "soft float", with the exact semantics the fast digit
//! generator needs: no rounding modes, no infinities or NaNs, and a
//! multiplication that keeps only the upper half of the product.

/// A custom 64-bit floating point value, representing `f * 2^e`.
#[derive(Copy, Clone, Debug)]
pub struct Fp {
    /// The integer mantissa.
    pub f: u64,
    /// The exponent in base 2.
    pub e: i16,
}

impl Fp {
    /// Returns a correctly rounded product of itself and `other`.
    pub fn mul(self, other: Fp) -> Fp {
        const MASK: u64 = 0xffff_ffff;
        let a = self.f >> 32;
        let b = self.f & MASK;
        let c = other.f >> 32;
        let d = other.f & MASK;
        let ac = a * c;
        let bc = b * c;
        let ad = a * d;
        let bd = b * d;
        // the 2^31 term rounds the discarded lower half to nearest
        let tmp = (bd >> 32) + (ad & MASK) + (bc & MASK) + (1 << 31);
        let f = ac + (ad >> 32) + (bc >> 32) + (tmp >> 32);
        let e = self.e + other.e + 64;
        Fp { f, e }
    }

    /// Normalizes itself so that the resulting mantissa is at least `2^63`.
    pub fn normalize(self) -> Fp {
        debug_assert!(self.f != 0);
        let lz = self.f.leading_zeros();
        let f = self.f << lz;
        let e = self.e - lz as i16;
        Fp { f, e }
    }

    /// Normalizes itself to have the shared exponent. It can only decrease
    /// the exponent (and thus increase the mantissa).
    pub fn normalize_to(self, e: i16) -> Fp {
        let edelta = self.e - e;
        debug_assert!(edelta >= 0);
        let edelta = edelta as usize;
        debug_assert!(self.f << edelta >> edelta == self.f);
        Fp { f: self.f << edelta, e }
    }

    /// Subtracts `other` with the same exponent, which may not exceed itself.
    pub fn sub(self, other: Fp) -> Fp {
        debug_assert!(self.e == other.e);
        debug_assert!(self.f >= other.f);
        Fp { f: self.f - other.f, e: self.e }
    }
}
