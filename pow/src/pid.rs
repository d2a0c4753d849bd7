//! PID-controller retargeting.
//!
//! Treats block spacing as a process variable: the error between observed
//! and ideal spacing feeds a proportional/integral/derivative correction
//! that is subtracted from the current target at mantissa scale. Two
//! variants: the fixed 8-block controller and the multi-window controller
//! that follows whichever lookback currently has the smallest error.

use crate::chain::ChainView;
use catamount_types::{BlockSample, CompactTarget, ConsensusParams, Target};

// Negative gains: a positive error (blocks too slow) must grow the target.
const P_GAIN_SLOW: f64 = -0.005125;
const I_GAIN_SLOW: f64 = -0.0225;
const D_GAIN_SLOW: f64 = -0.0075;
const P_GAIN_FAST: f64 = -0.005125;
const I_GAIN_FAST: f64 = -0.0525;
const D_GAIN_FAST: f64 = -0.0075;

/// Easiest compact value any controller result may take; keeps difficulty
/// from collapsing below ~16 however far the error runs.
pub(crate) const COMPACT_FLOOR: CompactTarget = CompactTarget::new(0x1e0f_ffff);

/// Fixed 8-block controller: error is the averaged spacing over the last
/// eight blocks, slow/fast gain switch at ±450 seconds.
pub fn next_work_pid<C: ChainView + ?Sized>(
    chain: &C,
    tip: &BlockSample,
    _candidate_time: i64,
    params: &ConsensusParams,
) -> CompactTarget {
    let first = match chain.ancestor(tip, tip.height - 8) {
        Some(first) => first,
        None => return params.pow_limit_compact(),
    };
    let actual = (tip.time - first.time) / 8;
    let error = actual - params.pow_target_spacing;
    pid_step(tip.bits, error, actual, params.pow_target_spacing, 450)
}

/// Multi-window controller: measures the raw timespan 8, 4, 3, and 2
/// blocks back, controls on whichever error is smallest in magnitude,
/// slow/fast gain switch at ±250 seconds.
pub fn next_work_pid_multiwindow<C: ChainView + ?Sized>(
    chain: &C,
    tip: &BlockSample,
    _candidate_time: i64,
    params: &ConsensusParams,
) -> CompactTarget {
    let limit_compact = params.pow_limit_compact();
    let mut timespans = [0i64; 4];
    for (span, back) in timespans.iter_mut().zip([8i64, 4, 3, 2]) {
        let first = match chain.ancestor(tip, tip.height - back) {
            Some(first) => first,
            None => return limit_compact,
        };
        *span = tip.time - first.time;
    }

    let spacing = params.pow_target_spacing;
    let mut error = timespans[0] - spacing;
    for span in &timespans[1..] {
        let candidate = span - spacing;
        if candidate.abs() < error.abs() {
            error = candidate;
        }
    }

    // The gain formulas always run off the 8-block timespan, whichever
    // window won the error vote.
    pid_step(tip.bits, error, timespans[0], spacing, 250)
}

fn pid_step(
    current_bits: CompactTarget,
    error: i64,
    actual: i64,
    spacing: i64,
    slow_band: i64,
) -> CompactTarget {
    let current = current_bits.decode_lossy();
    let bit_length = current.bits() as i64;

    let (p_gain, i_gain, d_gain) = if (-slow_band..=slow_band).contains(&error) {
        (P_GAIN_SLOW, I_GAIN_SLOW, D_GAIN_SLOW)
    } else {
        (P_GAIN_FAST, I_GAIN_FAST, D_GAIN_FAST)
    };

    let p = p_gain * error as f64;
    let i = i_gain * error as f64 * (spacing as f64 / actual as f64);
    let d = d_gain * (error as f64 / actual as f64) * i;

    // Deadband: within ten seconds of ideal, leave the target alone.
    if error > -10 && error < 10 {
        return current.to_compact();
    }

    // Scale the correction to mantissa precision, halving until it fits
    // the 23 usable mantissa bits, then shift it up to the magnitude of
    // the current target.
    let mut delta = ((p + i + d) * 65536.0) as i64;
    while delta > 8_388_607 {
        delta /= 2;
    }
    let mut magnitude = Target::from_u64(delta.unsigned_abs());
    if bit_length > 24 {
        magnitude = magnitude << (bit_length - 24) as u32;
    }
    let new = if delta >= 0 {
        current.saturating_sub(magnitude)
    } else {
        current.saturating_add(magnitude)
    };

    let compact = new.to_compact();
    if compact.raw() > COMPACT_FLOOR.raw() {
        COMPACT_FLOOR
    } else {
        compact
    }
}
