//! Linearly-weighted moving average retargeting.
//!
//! Averages the targets of the last N blocks and scales by a solvetime sum
//! in which recent blocks weigh linearly more than old ones. Timestamps
//! are forced forward so a sequence of lying timestamps can never produce
//! a negative solvetime, and a single long stall is capped at six spacings
//! so it cannot crater the difficulty.

use crate::chain::ChainView;
use catamount_types::{BlockSample, CompactTarget, ConsensusParams, Target};

pub fn next_work_lwma<C: ChainView + ?Sized>(
    chain: &C,
    tip: &BlockSample,
    _candidate_time: i64,
    params: &ConsensusParams,
) -> CompactTarget {
    let spacing = params.pow_target_spacing;
    let n = params.lwma_averaging_window;
    // With ideal solvetimes the weighted sum equals k, making the result
    // exactly the average target.
    let k = n * (n + 1) * spacing / 2;
    let height = tip.height;
    let limit_compact = params.pow_limit_compact();

    // Young chains give away the first N blocks at the easiest target;
    // guessing low here risks stalling a new chain outright.
    if height < n {
        return limit_compact;
    }

    let first = match chain.ancestor(tip, height - n) {
        Some(first) => first,
        None => return limit_compact,
    };
    let mut previous_timestamp = first.time;
    let mut avg_target = Target::zero();
    let mut sum_weighted_solvetimes: i64 = 0;
    let mut j: i64 = 0;

    for i in (height - n + 1)..=height {
        let block = match chain.ancestor(tip, i) {
            Some(block) => block,
            None => return limit_compact,
        };

        // Force timestamps forward; the +1 keeps a brand-new chain's
        // all-equal timestamps from producing a zero target.
        let this_timestamp = if block.time > previous_timestamp {
            block.time
        } else {
            previous_timestamp + 1
        };
        let solvetime = (this_timestamp - previous_timestamp).min(6 * spacing);
        previous_timestamp = this_timestamp;

        j += 1;
        sum_weighted_solvetimes += solvetime * j;

        // Dividing by k inside the loop keeps the final multiply within
        // 256 bits.
        avg_target = avg_target + block.bits.decode_lossy() / n as u64 / k as u64;
    }

    let mut next = avg_target * sum_weighted_solvetimes as u64;
    if next > params.pow_limit {
        next = params.pow_limit;
    }
    next.to_compact()
}
