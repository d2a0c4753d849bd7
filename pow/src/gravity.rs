//! Gravity-well retargeting family.
//!
//! All three members walk backwards from the tip accumulating a running
//! average of past targets and the elapsed time, then rescale the average
//! by observed-over-expected. They differ in window and damping: KGW's
//! window is adaptive (it stops as soon as the observed rate leaves an
//! "event horizon" band that tightens with depth), DGW and AGW use fixed
//! windows with a hard ratio clamp.

use crate::chain::{walk_back, ChainView};
use catamount_types::{BlockSample, CompactTarget, ConsensusParams, Target};

/// Kimoto gravity well: adaptive window between 6 hours and 7 days of
/// blocks.
pub fn next_work_kgw<C: ChainView + ?Sized>(
    chain: &C,
    tip: &BlockSample,
    _candidate_time: i64,
    params: &ConsensusParams,
) -> CompactTarget {
    const DAY_SECONDS: i64 = 24 * 60 * 60;
    let past_blocks_min = (DAY_SECONDS / 4 / params.pow_target_spacing) as u64;
    let past_blocks_max = (DAY_SECONDS * 7 / params.pow_target_spacing) as u64;
    gravity_well(
        chain,
        tip,
        params.pow_target_spacing,
        past_blocks_min,
        past_blocks_max,
        &params.pow_limit,
    )
}

fn gravity_well<C: ChainView + ?Sized>(
    chain: &C,
    tip: &BlockSample,
    spacing: i64,
    past_blocks_min: u64,
    past_blocks_max: u64,
    pow_limit: &Target,
) -> CompactTarget {
    if tip.height == 0 || (tip.height as u64) < past_blocks_min {
        return pow_limit.to_compact();
    }

    let mut mass = 0u64;
    let mut actual_seconds = 0i64;
    let mut expected_seconds = 0i64;
    let mut average = Target::zero();
    let mut average_prev = Target::zero();

    let mut reading = Some(*tip);
    let mut i = 1u64;
    while let Some(block) = reading {
        if block.height <= 0 {
            break;
        }
        if past_blocks_max > 0 && i > past_blocks_max {
            break;
        }
        mass += 1;

        let target = block.bits.decode_lossy();
        if i == 1 {
            average = target;
        } else {
            // Incremental mean; the sign-magnitude division truncates
            // toward zero on both sides of the running average.
            average = if target >= average_prev {
                average_prev + (target - average_prev) / i
            } else {
                average_prev - (average_prev - target) / i
            };
        }
        average_prev = average;

        actual_seconds = (tip.time - block.time).max(0);
        expected_seconds = spacing * mass as i64;
        let mut ratio = 1.0f64;
        if actual_seconds != 0 && expected_seconds != 0 {
            ratio = expected_seconds as f64 / actual_seconds as f64;
        }
        // Allowed deviation narrows the deeper the walk goes.
        let deviation = 1.0 + 0.7084 * (mass as f64 / 144.0).powf(-1.228);
        if mass >= past_blocks_min && (ratio <= 1.0 / deviation || ratio >= deviation) {
            break;
        }

        reading = chain.previous(&block);
        i += 1;
    }

    let mut new = average;
    if actual_seconds != 0 && expected_seconds != 0 {
        new = new.mul_div(actual_seconds as u64, expected_seconds as u64);
    }
    if new > *pow_limit {
        return pow_limit.to_compact();
    }
    new.to_compact()
}

/// Dark gravity wave: 24-block window, 3x clamp.
pub fn next_work_dgw<C: ChainView + ?Sized>(
    chain: &C,
    tip: &BlockSample,
    _candidate_time: i64,
    params: &ConsensusParams,
) -> CompactTarget {
    dark_gravity(chain, tip, params, 24, 3, false)
}

/// Averaging gravity well: 36-block window, 2x clamp, and the first block
/// of the window contributes no interval to the expected timespan.
pub fn next_work_agw<C: ChainView + ?Sized>(
    chain: &C,
    tip: &BlockSample,
    _candidate_time: i64,
    params: &ConsensusParams,
) -> CompactTarget {
    dark_gravity(chain, tip, params, 36, 2, true)
}

fn dark_gravity<C: ChainView + ?Sized>(
    chain: &C,
    tip: &BlockSample,
    params: &ConsensusParams,
    window: i64,
    clamp_ratio: i64,
    discount_first_block: bool,
) -> CompactTarget {
    if tip.height == 0 || tip.height < window {
        return params.pow_limit_compact();
    }

    let mut count: i64 = 0;
    let mut actual_timespan: i64 = 0;
    let mut last_block_time: i64 = 0;
    let mut average = Target::zero();
    let mut average_prev = Target::zero();

    for block in walk_back(chain, *tip, window as u64).take_while(|b| b.height > 0) {
        count += 1;

        if count <= window {
            average = if count == 1 {
                block.bits.decode_lossy()
            } else {
                (average_prev * count as u64 + block.bits.decode_lossy()) / (count as u64 + 1)
            };
            average_prev = average;
        }

        if last_block_time > 0 {
            actual_timespan += last_block_time - block.time;
        }
        last_block_time = block.time;
    }

    if discount_first_block {
        count -= 1;
    }
    let expected_timespan = count * params.pow_target_spacing;

    let mut actual = actual_timespan;
    if actual < expected_timespan / clamp_ratio {
        actual = expected_timespan / clamp_ratio;
    }
    if actual > expected_timespan * clamp_ratio {
        actual = expected_timespan * clamp_ratio;
    }

    let mut new = average.mul_div(actual as u64, expected_timespan as u64);
    if new > params.pow_limit {
        new = params.pow_limit;
    }
    new.to_compact()
}
