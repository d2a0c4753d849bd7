//! Block hash and the read-only block view consumed by the engine.

use crate::compact::CompactTarget;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-byte block hash.
///
/// Compared against a work target as a big-endian 256-bit integer.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockHash([u8; 32]);

impl Default for BlockHash {
    fn default() -> Self {
        Self::ZERO
    }
}

impl BlockHash {
    pub const ZERO: Self = Self([0u8; 32]);

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Debug for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockHash(")?;
        for b in &self.0[..4] {
            write!(f, "{:02x}", b)?;
        }
        write!(f, "\u{2026})")
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

/// Read-only view of one stored block, as the chain storage layer answers
/// ancestor queries.
///
/// `time` is Unix seconds and is NOT monotonic with height — miners set it,
/// and several retargeting strategies exist precisely to survive that.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSample {
    /// Height on the active chain; 0 is genesis.
    pub height: i64,
    /// Block timestamp, Unix seconds.
    pub time: i64,
    /// The compact target this block was actually mined at.
    pub bits: CompactTarget,
}
