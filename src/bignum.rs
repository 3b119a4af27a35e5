//! Fixed-capacity big unsigned integers.
//!
//! The exact digit generator needs integers a few thousand bits wide, but the
//! widths are bounded by the binary64 format itself, so everything lives in a
//! fixed stack array and nothing here allocates. Exceeding the capacity is a
//! programming defect and panics rather than truncating.

use core::cmp::Ordering;
use core::mem;

/// Number of 32-bit blocks: the longest subnormal scale (1074 bits), the
/// widest digit span this crate generates (768 digits need at most 2552
/// bits), and one block of slack for divisor normalization.
const BLOCKS: usize = (1074 + 2552 + 32 + 31) / 32;

const _: () = assert!(BLOCKS == 115);

/// 10^0 through 10^7; `pow10` composes everything else out of these.
const SMALL_POW10: [u32; 8] =
    [1, 10, 100, 1000, 10_000, 100_000, 1_000_000, 10_000_000];

/// A big unsigned integer of up to 32 x 115 = 3,680 bits.
///
/// Stored as little-endian base-2^32 blocks. Only `base[..size]` is
/// significant, the top significant block is nonzero, and blocks at `size`
/// and beyond are kept zeroed so arithmetic can read past the end freely.
/// Zero has `size == 0`.
#[derive(Clone, Copy)]
pub struct Big32x115 {
    /// Number of significant blocks.
    size: usize,
    base: [u32; BLOCKS],
}

impl Big32x115 {
    pub const ZERO: Big32x115 = Big32x115 { size: 0, base: [0; BLOCKS] };

    pub fn from_small(v: u32) -> Big32x115 {
        let mut big = Big32x115::ZERO;
        big.set_u32(v);
        big
    }

    pub fn from_u64(v: u64) -> Big32x115 {
        let mut big = Big32x115::ZERO;
        big.set_u64(v);
        big
    }

    pub fn is_zero(&self) -> bool {
        self.size == 0
    }

    /// The significant blocks, least significant first.
    pub fn digits(&self) -> &[u32] {
        &self.base[..self.size]
    }

    pub fn set_zero(&mut self) -> &mut Big32x115 {
        for b in &mut self.base[..self.size] {
            *b = 0;
        }
        self.size = 0;
        self
    }

    pub fn set_u32(&mut self, v: u32) -> &mut Big32x115 {
        self.set_zero();
        if v != 0 {
            self.base[0] = v;
            self.size = 1;
        }
        self
    }

    pub fn set_u64(&mut self, v: u64) -> &mut Big32x115 {
        self.set_zero();
        self.base[0] = v as u32;
        self.base[1] = (v >> 32) as u32;
        self.size = if self.base[1] != 0 {
            2
        } else if self.base[0] != 0 {
            1
        } else {
            0
        };
        self
    }

    pub fn set(&mut self, other: &Big32x115) -> &mut Big32x115 {
        *self = *other;
        self
    }

    fn trim(&mut self) {
        while self.size > 0 && self.base[self.size - 1] == 0 {
            self.size -= 1;
        }
    }

    /// Adds a small value, rippling the carry as far as it goes.
    pub fn add_small(&mut self, other: u32) -> &mut Big32x115 {
        let mut carry = other as u64;
        let mut i = 0;
        while carry != 0 {
            assert!(i < BLOCKS, "capacity exceeded");
            let sum = self.base[i] as u64 + carry;
            self.base[i] = sum as u32;
            carry = sum >> 32;
            i += 1;
        }
        if i > self.size {
            self.size = i;
        }
        self
    }

    pub fn add(&mut self, other: &Big32x115) -> &mut Big32x115 {
        let n = self.size.max(other.size);
        let mut carry = 0u64;
        for i in 0..n {
            let sum = self.base[i] as u64 + other.base[i] as u64 + carry;
            self.base[i] = sum as u32;
            carry = sum >> 32;
        }
        self.size = n;
        if carry != 0 {
            assert!(n < BLOCKS, "capacity exceeded");
            self.base[n] = carry as u32;
            self.size = n + 1;
        }
        self
    }

    /// Shifts left by an arbitrary number of bits.
    pub fn shl(&mut self, bits: usize) -> &mut Big32x115 {
        if self.size == 0 || bits == 0 {
            return self;
        }
        let blocks = bits / 32;
        let sh = (bits % 32) as u32;
        let sz = self.size;
        if sh == 0 {
            assert!(sz + blocks <= BLOCKS, "capacity exceeded");
            for i in (0..sz).rev() {
                self.base[i + blocks] = self.base[i];
            }
            self.size = sz + blocks;
        } else {
            let spill = self.base[sz - 1] >> (32 - sh);
            let mut size = sz + blocks;
            if spill != 0 {
                assert!(size < BLOCKS, "capacity exceeded");
                self.base[size] = spill;
                size += 1;
            } else {
                assert!(size <= BLOCKS, "capacity exceeded");
            }
            for i in (1..sz).rev() {
                self.base[i + blocks] = (self.base[i] << sh) | (self.base[i - 1] >> (32 - sh));
            }
            self.base[blocks] = self.base[0] << sh;
            self.size = size;
        }
        for b in &mut self.base[..blocks] {
            *b = 0;
        }
        self
    }

    // Only ever needed sub-block, to undo divisor normalization.
    fn shr(&mut self, bits: usize) {
        debug_assert!(bits < 32);
        if bits == 0 || self.size == 0 {
            return;
        }
        let sh = bits as u32;
        for i in 0..self.size {
            let hi = if i + 1 < self.size { self.base[i + 1] << (32 - sh) } else { 0 };
            self.base[i] = (self.base[i] >> sh) | hi;
        }
        self.trim();
    }

    pub fn mul_small(&mut self, other: u32) -> &mut Big32x115 {
        if other == 0 {
            return self.set_zero();
        }
        let mut carry = 0u64;
        for i in 0..self.size {
            let v = self.base[i] as u64 * other as u64 + carry;
            self.base[i] = v as u32;
            carry = v >> 32;
        }
        if carry != 0 {
            assert!(self.size < BLOCKS, "capacity exceeded");
            self.base[self.size] = carry as u32;
            self.size += 1;
        }
        self
    }

    /// The digit-loop hot path.
    pub fn mul10(&mut self) -> &mut Big32x115 {
        self.mul_small(10)
    }

    /// Schoolbook multiplication into `out`, which must not alias either
    /// operand (the borrows enforce that).
    pub fn mul(lhs: &Big32x115, rhs: &Big32x115, out: &mut Big32x115) {
        out.set_zero();
        if lhs.size == 0 || rhs.size == 0 {
            return;
        }
        if lhs.size == 1 {
            out.set(rhs).mul_small(lhs.base[0]);
            return;
        }
        if rhs.size == 1 {
            out.set(lhs).mul_small(rhs.base[0]);
            return;
        }
        let n = lhs.size + rhs.size;
        assert!(n <= BLOCKS, "capacity exceeded");
        for i in 0..lhs.size {
            let x = lhs.base[i] as u64;
            let mut carry = 0u64;
            for j in 0..rhs.size {
                let v = x * rhs.base[j] as u64 + out.base[i + j] as u64 + carry;
                out.base[i + j] = v as u32;
                carry = v >> 32;
            }
            out.base[i + rhs.size] = carry as u32;
        }
        out.size = n;
        out.trim();
    }

    pub fn pow2(exp: usize, out: &mut Big32x115) {
        out.set_u32(1);
        out.shl(exp);
    }

    /// Computes 10^exp by repeated squaring from 10^8, after peeling the low
    /// three bits off with a scalar table. O(log exp) multiplications, no
    /// precomputed multi-block constants.
    pub fn pow10(exp: usize, out: &mut Big32x115) {
        out.set_u32(SMALL_POW10[exp & 7]);
        let mut exp = exp >> 3;
        if exp == 0 {
            return;
        }
        let mut sq = Big32x115::from_small(100_000_000);
        let mut scratch = Big32x115::ZERO;
        loop {
            if exp & 1 != 0 {
                Big32x115::mul(out, &sq, &mut scratch);
                mem::swap(out, &mut scratch);
            }
            exp >>= 1;
            if exp == 0 {
                break;
            }
            let mut next = Big32x115::ZERO;
            Big32x115::mul(&sq, &sq, &mut next);
            mem::swap(&mut sq, &mut next);
        }
    }

    /// Exact long division: `num = quo * den + rem` with `rem < den`.
    pub fn div_rem(num: &Big32x115, den: &Big32x115, quo: &mut Big32x115, rem: &mut Big32x115) {
        assert!(!den.is_zero(), "division by zero");
        if num.cmp(den) == Ordering::Less {
            rem.set(num);
            quo.set_zero();
            return;
        }
        if den.size == 1 {
            let d = den.base[0] as u64;
            quo.set(num);
            let mut r = 0u64;
            for i in (0..quo.size).rev() {
                let cur = (r << 32) | quo.base[i] as u64;
                quo.base[i] = (cur / d) as u32;
                r = cur % d;
            }
            quo.trim();
            rem.set_u32(r as u32);
            return;
        }

        // Knuth's Algorithm D. Normalize so the divisor's top bit is set,
        // which bounds the per-block quotient estimate error by two.
        let n = den.size;
        let m = num.size - n;
        let shift = den.base[n - 1].leading_zeros() as usize;
        let mut v = *den;
        v.shl(shift);
        let mut u = *num;
        u.shl(shift);

        quo.set_zero();
        let vtop = v.base[n - 1] as u64;
        let vnext = v.base[n - 2] as u64;
        for j in (0..=m).rev() {
            // reading past u.size is fine, those blocks are zero
            let uu = ((u.base[j + n] as u64) << 32) | u.base[j + n - 1] as u64;
            let mut qhat = if (uu >> 32) as u64 == vtop { u32::MAX as u64 } else { uu / vtop };
            loop {
                let r = uu - qhat * vtop;
                if (r >> 32) == 0 && qhat * vnext > ((r << 32) | u.base[j + n - 2] as u64) {
                    qhat -= 1;
                } else {
                    break;
                }
            }

            // u[j..j+n+1] -= qhat * v; the sign of the final borrow says
            // whether qhat was still one too large
            let mut carry = 0u64;
            let mut borrow = 0u64;
            for i in 0..n {
                let p = qhat * v.base[i] as u64 + carry;
                carry = p >> 32;
                let t = (u.base[j + i] as u64)
                    .wrapping_sub(p & 0xFFFF_FFFF)
                    .wrapping_sub(borrow);
                u.base[j + i] = t as u32;
                borrow = (t >> 32) & 1;
            }
            let t = (u.base[j + n] as u64).wrapping_sub(carry).wrapping_sub(borrow);
            u.base[j + n] = t as u32;
            borrow = (t >> 32) & 1;

            if borrow != 0 {
                qhat -= 1;
                let mut c = 0u64;
                for i in 0..n {
                    let t = u.base[j + i] as u64 + v.base[i] as u64 + c;
                    u.base[j + i] = t as u32;
                    c = t >> 32;
                }
                // the wrap here cancels the borrow above
                u.base[j + n] = (u.base[j + n] as u64 + c) as u32;
            }
            quo.base[j] = qhat as u32;
        }
        quo.size = m + 1;
        quo.trim();

        rem.set_zero();
        rem.base[..n].copy_from_slice(&u.base[..n]);
        rem.size = n;
        rem.trim();
        rem.shr(shift);
    }

    /// Divides `dividend` by `divisor` in place and returns the quotient,
    /// which must be a single decimal digit.
    ///
    /// The caller guarantees `dividend < 10 * divisor` and a divisor top
    /// block in `[8, u32::MAX / 10]`; under those bounds the leading-block
    /// estimate `top(dividend) / (top(divisor) + 1)` is at most one below
    /// the true digit, so one corrective subtraction suffices.
    pub fn heuristic_divide(dividend: &mut Big32x115, divisor: &Big32x115) -> u32 {
        let n = divisor.size;
        debug_assert!(n > 0);
        debug_assert!(divisor.base[n - 1] >= 8 && divisor.base[n - 1] <= u32::MAX / 10);
        if dividend.size < n {
            return 0;
        }
        debug_assert!(dividend.size == n);

        let mut quotient = dividend.base[n - 1] / (divisor.base[n - 1] + 1);
        if quotient > 0 {
            let mut carry = 0u64;
            let mut borrow = 0u64;
            for i in 0..n {
                let p = quotient as u64 * divisor.base[i] as u64 + carry;
                carry = p >> 32;
                let t = (dividend.base[i] as u64)
                    .wrapping_sub(p & 0xFFFF_FFFF)
                    .wrapping_sub(borrow);
                dividend.base[i] = t as u32;
                borrow = (t >> 32) & 1;
            }
            debug_assert!(carry == 0 && borrow == 0);
            dividend.trim();
        }
        if (*dividend).cmp(divisor) != Ordering::Less {
            quotient += 1;
            let mut borrow = 0u64;
            for i in 0..n {
                let t = (dividend.base[i] as u64)
                    .wrapping_sub(divisor.base[i] as u64)
                    .wrapping_sub(borrow);
                dividend.base[i] = t as u32;
                borrow = (t >> 32) & 1;
            }
            debug_assert!(borrow == 0);
            dividend.size = n;
            dividend.trim();
        }
        debug_assert!(quotient < 10);
        quotient
    }
}

impl PartialEq for Big32x115 {
    fn eq(&self, other: &Big32x115) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Big32x115 {}

impl PartialOrd for Big32x115 {
    fn partial_cmp(&self, other: &Big32x115) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Big32x115 {
    fn cmp(&self, other: &Big32x115) -> Ordering {
        // sizes are canonical, so more blocks means strictly larger
        self.size.cmp(&other.size).then_with(|| {
            for i in (0..self.size).rev() {
                match self.base[i].cmp(&other.base[i]) {
                    Ordering::Equal => {}
                    ord => return ord,
                }
            }
            Ordering::Equal
        })
    }
}

impl core::fmt::Debug for Big32x115 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Big32x115(0x")?;
        if self.size == 0 {
            write!(f, "0")?;
        } else {
            write!(f, "{:x}", self.base[self.size - 1])?;
            for i in (0..self.size - 1).rev() {
                write!(f, "_{:08x}", self.base[i])?;
            }
        }
        write!(f, ")")
    }
}
