//! Read-only chain history access.
//!
//! The engine never owns blocks; it consumes a snapshot view answered by
//! the chain storage layer. Implementations must stay stable for the
//! duration of one engine call.

use catamount_types::{BlockSample, CompactTarget};

/// Read-only view of the active chain up to some tip.
pub trait ChainView {
    /// The block sample at `height`, or `None` outside the stored range.
    fn sample(&self, height: i64) -> Option<BlockSample>;

    /// The parent of `block`; `None` at genesis.
    fn previous(&self, block: &BlockSample) -> Option<BlockSample> {
        if block.height <= 0 {
            None
        } else {
            self.sample(block.height - 1)
        }
    }

    /// The ancestor of `tip` at `height`; `None` when `height` is negative
    /// or above the tip.
    fn ancestor(&self, tip: &BlockSample, height: i64) -> Option<BlockSample> {
        if height < 0 || height > tip.height {
            None
        } else {
            self.sample(height)
        }
    }
}

/// Walk backwards from `from`, yielding at most `max` samples.
///
/// Running out of parents before `max` folds the insufficient-history case
/// into iterator length: a walk shorter than the window a strategy wanted
/// IS the signal.
pub fn walk_back<C: ChainView + ?Sized>(chain: &C, from: BlockSample, max: u64) -> WalkBack<'_, C> {
    WalkBack {
        chain,
        cursor: Some(from),
        remaining: max,
    }
}

pub struct WalkBack<'a, C: ?Sized> {
    chain: &'a C,
    cursor: Option<BlockSample>,
    remaining: u64,
}

impl<C: ChainView + ?Sized> Iterator for WalkBack<'_, C> {
    type Item = BlockSample;

    fn next(&mut self) -> Option<BlockSample> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.cursor.take()?;
        self.remaining -= 1;
        self.cursor = self.chain.previous(&current);
        Some(current)
    }
}

/// In-memory chain view, for tests, benchmarks, and fuzzing.
#[derive(Clone, Debug, Default)]
pub struct MemoryChain {
    samples: Vec<BlockSample>,
}

impl MemoryChain {
    pub fn new() -> Self {
        Self {
            samples: Vec::new(),
        }
    }

    /// A chain of `len` blocks at fixed spacing and constant bits, with
    /// genesis at `genesis_time`.
    pub fn with_constant_spacing(
        len: usize,
        genesis_time: i64,
        spacing: i64,
        bits: CompactTarget,
    ) -> Self {
        let mut chain = Self::new();
        for i in 0..len {
            chain.push_block(genesis_time + i as i64 * spacing, bits);
        }
        chain
    }

    /// Append a block at the next height.
    pub fn push_block(&mut self, time: i64, bits: CompactTarget) {
        let height = self.samples.len() as i64;
        self.samples.push(BlockSample { height, time, bits });
    }

    /// The highest block, if any.
    pub fn tip(&self) -> Option<BlockSample> {
        self.samples.last().copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl ChainView for MemoryChain {
    fn sample(&self, height: i64) -> Option<BlockSample> {
        usize::try_from(height)
            .ok()
            .and_then(|h| self.samples.get(h).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits() -> CompactTarget {
        CompactTarget::new(0x1d00_ffff)
    }

    #[test]
    fn sample_bounds() {
        let chain = MemoryChain::with_constant_spacing(10, 1000, 600, bits());
        assert!(chain.sample(-1).is_none());
        assert!(chain.sample(10).is_none());
        assert_eq!(chain.sample(9), chain.tip());
    }

    #[test]
    fn previous_stops_at_genesis() {
        let chain = MemoryChain::with_constant_spacing(3, 1000, 600, bits());
        let genesis = chain.sample(0).unwrap();
        assert!(chain.previous(&genesis).is_none());
        let one = chain.sample(1).unwrap();
        assert_eq!(chain.previous(&one), Some(genesis));
    }

    #[test]
    fn ancestor_rejects_heights_above_tip() {
        let chain = MemoryChain::with_constant_spacing(5, 1000, 600, bits());
        let tip = chain.tip().unwrap();
        assert!(chain.ancestor(&tip, 5).is_none());
        assert!(chain.ancestor(&tip, -1).is_none());
        assert_eq!(chain.ancestor(&tip, 0), chain.sample(0));
    }

    #[test]
    fn walk_back_is_bounded() {
        let chain = MemoryChain::with_constant_spacing(10, 1000, 600, bits());
        let tip = chain.tip().unwrap();
        let heights: Vec<i64> = walk_back(&chain, tip, 4).map(|b| b.height).collect();
        assert_eq!(heights, vec![9, 8, 7, 6]);
    }

    #[test]
    fn walk_back_exhausts_at_genesis() {
        let chain = MemoryChain::with_constant_spacing(3, 1000, 600, bits());
        let tip = chain.tip().unwrap();
        let heights: Vec<i64> = walk_back(&chain, tip, 100).map(|b| b.height).collect();
        assert_eq!(heights, vec![2, 1, 0]);
    }
}
