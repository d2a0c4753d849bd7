//! Packed 32-bit "compact" encoding of a 256-bit target.
//!
//! A compact word carries a base-256 exponent in its top byte and a 3-byte
//! mantissa below it; bit 23 doubles as a sign bit. The encoding is lossy:
//! anything beyond the top 24 significant bits of the target is dropped.
//! Re-encoding a decoded, normalized compact reproduces the same 32 bits.

use crate::error::MalformedCompact;
use crate::target::Target;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-bit packed work threshold, as carried in a block header.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CompactTarget(u32);

/// Result of unpacking a compact word, flags included.
///
/// The flags are reported rather than raised: the retargeting strategies
/// unpack historical header bits that are valid by construction, while the
/// proof-of-work validator must reject a malformed claim explicitly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedTarget {
    pub target: Target,
    /// Sign bit set on a nonzero mantissa.
    pub negative: bool,
    /// Exponent would shift the mantissa past 256 bits.
    pub overflow: bool,
}

impl CompactTarget {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Unpack into a target plus the negative/overflow flags.
    pub fn decode(self) -> DecodedTarget {
        let size = self.0 >> 24;
        let mut word = self.0 & 0x007f_ffff;
        let target = if size <= 3 {
            word >>= 8 * (3 - size);
            Target::from_u64(word as u64)
        } else {
            Target::from_u64(word as u64) << (8 * (size - 3))
        };
        DecodedTarget {
            target,
            negative: word != 0 && self.0 & 0x0080_0000 != 0,
            overflow: word != 0
                && (size > 34 || (word > 0xff && size > 33) || (word > 0xffff && size > 32)),
        }
    }

    /// Unpack ignoring the flags, as the retargeting arithmetic does with
    /// the bits of blocks already on the chain.
    pub fn decode_lossy(self) -> Target {
        self.decode().target
    }

    /// Unpack, rejecting anything that cannot name a valid work threshold.
    pub fn to_target(self) -> Result<Target, MalformedCompact> {
        let decoded = self.decode();
        if decoded.negative {
            return Err(MalformedCompact::Negative);
        }
        if decoded.overflow {
            return Err(MalformedCompact::Overflow);
        }
        if decoded.target.is_zero() {
            return Err(MalformedCompact::ZeroMantissa);
        }
        Ok(decoded.target)
    }
}

impl Target {
    /// Pack into the compact encoding, dropping low-order bits beyond the
    /// 3-byte mantissa.
    pub fn to_compact(self) -> CompactTarget {
        let mut size = (self.bits() + 7) / 8;
        let mut compact = if size <= 3 {
            self.low_u64() << (8 * (3 - size))
        } else {
            (self >> (8 * (size - 3))).low_u64()
        };
        // The mantissa's high bit is reserved for sign: borrow a byte from
        // the exponent instead of colliding with it.
        if compact & 0x0080_0000 != 0 {
            compact >>= 8;
            size += 1;
        }
        CompactTarget::new(compact as u32 | size << 24)
    }
}

impl fmt::Debug for CompactTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompactTarget({:#010x})", self.0)
    }
}

impl fmt::Display for CompactTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}
