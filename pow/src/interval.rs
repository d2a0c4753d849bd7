//! Windowed interval-average retargeting — the chain's first three eras.
//!
//! Difficulty only moves at window boundaries; between them every block
//! inherits the tip's bits (or, on test networks, the min-difficulty
//! escape applies). At a boundary the observed window timespan is clamped
//! and the target scaled proportionally.

use crate::chain::ChainView;
use crate::selector::last_non_min_difficulty_bits;
use catamount_types::{BlockSample, CompactTarget, ConsensusParams, Target};

/// Launch rules: 14-day window, 4x clamp.
pub fn next_work_interval_v1<C: ChainView + ?Sized>(
    chain: &C,
    tip: &BlockSample,
    candidate_time: i64,
    params: &ConsensusParams,
) -> CompactTarget {
    let timespan = params.pow_target_timespan_v1;
    interval_average(
        chain,
        tip,
        candidate_time,
        params,
        timespan,
        timespan / 4,
        timespan * 4,
        true,
    )
}

/// 6-hour window, 4x clamp.
pub fn next_work_interval_v2<C: ChainView + ?Sized>(
    chain: &C,
    tip: &BlockSample,
    candidate_time: i64,
    params: &ConsensusParams,
) -> CompactTarget {
    let timespan = params.pow_target_timespan_v2;
    interval_average(
        chain,
        tip,
        candidate_time,
        params,
        timespan,
        timespan / 4,
        timespan * 4,
        true,
    )
}

/// 6-hour window with the adjustment bounded to ±12% per retarget.
pub fn next_work_tight_clamp<C: ChainView + ?Sized>(
    chain: &C,
    tip: &BlockSample,
    candidate_time: i64,
    params: &ConsensusParams,
) -> CompactTarget {
    let timespan = params.pow_target_timespan_v2;
    interval_average(
        chain,
        tip,
        candidate_time,
        params,
        timespan,
        timespan * 100 / 112,
        timespan * 112 / 100,
        false,
    )
}

#[allow(clippy::too_many_arguments)]
fn interval_average<C: ChainView + ?Sized>(
    chain: &C,
    tip: &BlockSample,
    candidate_time: i64,
    params: &ConsensusParams,
    timespan: i64,
    low_bound: i64,
    high_bound: i64,
    min_difficulty_rule: bool,
) -> CompactTarget {
    let interval = timespan / params.pow_target_spacing;
    let limit_compact = params.pow_limit_compact();

    // Only change once per adjustment interval.
    if (tip.height + 1) % interval != 0 {
        if min_difficulty_rule && params.pow_allow_min_difficulty_blocks {
            // Stalled test network: allow an easiest-difficulty block once
            // the candidate is more than twice the spacing late.
            if candidate_time > tip.time + params.pow_target_spacing * 2 {
                return limit_compact;
            }
            return last_non_min_difficulty_bits(chain, tip, interval, limit_compact);
        }
        return tip.bits;
    }

    // Walk the full window rather than interval-1 blocks, except for the
    // first retarget after genesis; a shortened walk lets a majority
    // hashrate shift difficulty at will.
    let blocks_to_go_back = if tip.height + 1 == interval {
        interval - 1
    } else {
        interval
    };
    let first = match chain.ancestor(tip, tip.height - blocks_to_go_back) {
        Some(first) => first,
        None => return limit_compact,
    };

    if params.pow_no_retargeting {
        return tip.bits;
    }

    let actual = (tip.time - first.time).clamp(low_bound, high_bound);
    retarget(tip.bits, actual, timespan, &params.pow_limit)
}

/// `last_bits * actual / timespan`, clamped to the network ceiling.
fn retarget(
    last_bits: CompactTarget,
    actual: i64,
    timespan: i64,
    pow_limit: &Target,
) -> CompactTarget {
    let mut new = last_bits.decode_lossy();
    // The intermediate product can overflow 256 bits by one bit near the
    // ceiling: drop a bit on both sides of the multiply, restore it after.
    let shift = new.bits() > pow_limit.bits() - 1;
    if shift {
        new = new >> 1;
    }
    new = new * actual as u64;
    new = new / timespan as u64;
    if shift {
        new = new << 1;
    }
    if new > *pow_limit {
        new = *pow_limit;
    }
    new.to_compact()
}
