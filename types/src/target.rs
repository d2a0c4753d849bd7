//! 256-bit unsigned work target.
//!
//! A [`Target`] is the threshold a block hash must not exceed — smaller
//! values are harder to satisfy. Arithmetic mirrors the consensus rules:
//! plain operators wrap silently like the fixed-width 256-bit arithmetic
//! the interval retargets run on, while [`Target::mul_div`] widens through
//! 512 bits for the strategies that retarget in arbitrary precision.

use primitive_types::{U256, U512};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Shl, Shr, Sub};

/// A 256-bit work threshold.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Target(U256);

impl Target {
    pub fn zero() -> Self {
        Self(U256::zero())
    }

    /// The largest representable target, 2^256 - 1.
    pub fn max_value() -> Self {
        Self(U256::MAX)
    }

    pub fn from_u64(value: u64) -> Self {
        Self(U256::from(value))
    }

    /// Interpret 32 bytes as a big-endian 256-bit integer.
    pub fn from_be_bytes(bytes: [u8; 32]) -> Self {
        Self(U256::from_big_endian(&bytes))
    }

    /// The value as 32 big-endian bytes.
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        self.0.to_big_endian(&mut bytes);
        bytes
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Position of the highest set bit plus one; zero for a zero target.
    pub fn bits(&self) -> u32 {
        self.0.bits() as u32
    }

    /// The low 64 bits of the value.
    pub fn low_u64(&self) -> u64 {
        self.0.low_u64()
    }

    pub fn saturating_add(self, rhs: Self) -> Self {
        let (sum, overflow) = self.0.overflowing_add(rhs.0);
        if overflow {
            Self(U256::MAX)
        } else {
            Self(sum)
        }
    }

    pub fn saturating_sub(self, rhs: Self) -> Self {
        if rhs.0 > self.0 {
            Self::zero()
        } else {
            Self(self.0 - rhs.0)
        }
    }

    /// `self * num / den` at full precision through a 512-bit intermediate.
    ///
    /// Quotients above 2^256 - 1 saturate; every caller clamps to a network
    /// ceiling far below the saturation point, so the clamp absorbs it.
    /// `den` must be nonzero.
    pub fn mul_div(self, num: u64, den: u64) -> Self {
        let wide = self.0.full_mul(U256::from(num)) / U512::from(den);
        if wide > U512::from(U256::MAX) {
            return Self(U256::MAX);
        }
        let mut bytes = [0u8; 64];
        wide.to_big_endian(&mut bytes);
        let mut low = [0u8; 32];
        low.copy_from_slice(&bytes[32..]);
        Self(U256::from_big_endian(&low))
    }
}

impl Add for Target {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0.overflowing_add(rhs.0).0)
    }
}

impl Sub for Target {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0.overflowing_sub(rhs.0).0)
    }
}

impl Mul<u64> for Target {
    type Output = Self;
    fn mul(self, rhs: u64) -> Self {
        Self(self.0.overflowing_mul(U256::from(rhs)).0)
    }
}

impl Div<u64> for Target {
    type Output = Self;
    fn div(self, rhs: u64) -> Self {
        Self(self.0 / U256::from(rhs))
    }
}

impl Shl<u32> for Target {
    type Output = Self;
    fn shl(self, shift: u32) -> Self {
        if shift >= 256 {
            Self::zero()
        } else {
            Self(self.0 << shift)
        }
    }
}

impl Shr<u32> for Target {
    type Output = Self;
    fn shr(self, shift: u32) -> Self {
        if shift >= 256 {
            Self::zero()
        } else {
            Self(self.0 >> shift)
        }
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Target(0x{:x})", self.0)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_length() {
        assert_eq!(Target::zero().bits(), 0);
        assert_eq!(Target::from_u64(1).bits(), 1);
        assert_eq!(Target::from_u64(0xff).bits(), 8);
        assert_eq!(Target::max_value().bits(), 256);
        assert_eq!((Target::max_value() >> 20).bits(), 236);
    }

    #[test]
    fn scalar_mul_div_round_trips_when_exact() {
        let t = Target::from_u64(600_000);
        assert_eq!(t * 4 / 4, t);
    }

    #[test]
    fn mul_div_matches_scalar_ops_in_range() {
        let t = Target::from_u64(1_000_000);
        assert_eq!(t.mul_div(36, 24), t * 36 / 24);
    }

    #[test]
    fn mul_div_survives_256_bit_overflow() {
        // max * 3 / 2 exceeds 256 bits in the intermediate and the result.
        assert_eq!(Target::max_value().mul_div(3, 2), Target::max_value());
        // The same product divided back down is exact.
        assert_eq!(Target::max_value().mul_div(3, 3), Target::max_value());
    }

    #[test]
    fn shifts_beyond_width_produce_zero() {
        let t = Target::from_u64(0x1234);
        assert_eq!(t << 300, Target::zero());
        assert_eq!(t >> 300, Target::zero());
    }

    #[test]
    fn saturating_edges() {
        assert_eq!(
            Target::max_value().saturating_add(Target::from_u64(1)),
            Target::max_value()
        );
        assert_eq!(
            Target::zero().saturating_sub(Target::from_u64(1)),
            Target::zero()
        );
    }

    #[test]
    fn be_bytes_round_trip() {
        let t = Target::from_u64(0xdead_beef) << 100;
        assert_eq!(Target::from_be_bytes(t.to_be_bytes()), t);
    }

    #[test]
    fn ordering_is_numeric() {
        let small = Target::from_u64(10);
        let big = Target::from_u64(20);
        assert!(small < big);
        assert!(big <= Target::max_value());
    }
}
