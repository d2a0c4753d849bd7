//! Per-block exponential retarget moving toward the target spacing.
//!
//! Peercoin-style continuous adjustment: every block nudges the target by
//! a fraction of the deviation between the last solve time and the ideal
//! spacing, so difficulty decays exponentially toward equilibrium instead
//! of stepping at window boundaries.

use crate::chain::ChainView;
use catamount_types::{BlockSample, CompactTarget, ConsensusParams};

pub fn next_work_peercoin<C: ChainView + ?Sized>(
    chain: &C,
    tip: &BlockSample,
    _candidate_time: i64,
    params: &ConsensusParams,
) -> CompactTarget {
    let limit_compact = params.pow_limit_compact();

    // Every block on this chain carries proof of work, so the last work
    // block is the tip itself; two ancestors are still required for a
    // solve-time observation.
    let prev = *tip;
    let prev_prev = match chain.previous(&prev) {
        Some(block) => block,
        None => return limit_compact,
    };
    if chain.previous(&prev_prev).is_none() {
        return limit_compact;
    }

    let mut actual_spacing = prev.time - prev_prev.time;
    // A candidate arriving later than the last observed solve time drags
    // the observation out with it.
    let hypothetical_spacing = tip.time - prev.time;
    if hypothetical_spacing > actual_spacing {
        actual_spacing = hypothetical_spacing;
    }

    let spacing = params.pow_target_spacing;
    let target_spacing = params
        .pow_target_spacing_max
        .min(spacing * (1 + tip.height - prev.height));
    let interval = params.pow_target_timespan_v2 / target_spacing;

    let mut new = prev.bits.decode_lossy().mul_div(
        ((interval - 1) * target_spacing + actual_spacing + actual_spacing) as u64,
        ((interval + 1) * target_spacing) as u64,
    );
    if new > params.pow_limit {
        new = params.pow_limit;
    }
    new.to_compact()
}
