//! Single-block exponential retarget and the day/night hybrid.
//!
//! The single-block retarget (digishield-style) rescales the target every
//! block from the last solve time alone, with tight bounds so one outlier
//! block cannot move difficulty far. The hybrid alternates between it and
//! the PID controller on a schedule keyed to the second-of-minute of the
//! tip's timestamp, which makes the active algorithm unpredictable to a
//! miner choosing timestamps.

use crate::chain::ChainView;
use crate::pid::{self, COMPACT_FLOOR};
use catamount_types::{BlockSample, CompactTarget, ConsensusParams, NetworkId};

/// Single-block exponential retarget, bounded to [75%, 150%] of ideal
/// spacing per step.
pub fn next_work_digishield<C: ChainView + ?Sized>(
    chain: &C,
    tip: &BlockSample,
    _candidate_time: i64,
    params: &ConsensusParams,
) -> CompactTarget {
    let prev = match chain.previous(tip) {
        Some(prev) => prev,
        None => return params.pow_limit_compact(),
    };

    let spacing = params.pow_target_spacing;
    let mut actual = tip.time - prev.time;
    if actual < spacing - spacing / 4 {
        actual = spacing - spacing / 4;
    }
    if actual > spacing + spacing / 2 {
        actual = spacing + spacing / 2;
    }

    let mut new = tip.bits.decode_lossy().mul_div(actual as u64, spacing as u64);
    if new > params.pow_limit {
        new = params.pow_limit;
    }

    let compact = new.to_compact();
    if compact.raw() > COMPACT_FLOOR.raw() {
        COMPACT_FLOOR
    } else {
        compact
    }
}

/// Whether the tip's timestamp lands in a "day" window of its minute.
///
/// Seconds 0-14 and 30-44 run the single-block retarget; the rest of the
/// minute belongs to the PID controller.
pub fn is_day_window(time: i64) -> bool {
    let second = time % 60;
    (0..=14).contains(&second) || (30..=44).contains(&second)
}

/// The day/night hybrid: single-block exponential retarget by day, PID
/// controller by night. The public test network runs the multi-window
/// controller at night; every other network the 8-block one.
pub fn next_work_day_night<C: ChainView + ?Sized>(
    chain: &C,
    tip: &BlockSample,
    candidate_time: i64,
    params: &ConsensusParams,
) -> CompactTarget {
    if is_day_window(tip.time) {
        next_work_digishield(chain, tip, candidate_time, params)
    } else if params.network == NetworkId::Testnet1 {
        pid::next_work_pid_multiwindow(chain, tip, candidate_time, params)
    } else {
        pid::next_work_pid(chain, tip, candidate_time, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::MemoryChain;

    const BITS: CompactTarget = CompactTarget::new(0x1d00_ffff);

    fn params() -> ConsensusParams {
        ConsensusParams::main()
    }

    #[test]
    fn ideal_spacing_leaves_bits_unchanged() {
        let chain = MemoryChain::with_constant_spacing(10, 1_000_000, 600, BITS);
        let tip = chain.tip().unwrap();
        let next = next_work_digishield(&chain, &tip, tip.time + 600, &params());
        assert_eq!(next, BITS);
    }

    #[test]
    fn fast_block_hardens_within_the_bound() {
        // 300s solve clamps to 450: target scales by 450/600.
        let chain = MemoryChain::with_constant_spacing(10, 1_000_000, 300, BITS);
        let tip = chain.tip().unwrap();
        let next = next_work_digishield(&chain, &tip, tip.time + 300, &params());
        let expected = BITS.decode_lossy().mul_div(450, 600).to_compact();
        assert_eq!(next, expected);
    }

    #[test]
    fn slow_block_eases_within_the_bound() {
        // 2000s solve clamps to 900: target scales by 900/600.
        let chain = MemoryChain::with_constant_spacing(10, 1_000_000, 2_000, BITS);
        let tip = chain.tip().unwrap();
        let next = next_work_digishield(&chain, &tip, tip.time + 2_000, &params());
        let expected = BITS.decode_lossy().mul_div(900, 600).to_compact();
        assert_eq!(next, expected);
    }

    #[test]
    fn easing_at_the_ceiling_is_floored() {
        let chain = MemoryChain::with_constant_spacing(10, 1_000_000, 2_000, COMPACT_FLOOR);
        let tip = chain.tip().unwrap();
        let next = next_work_digishield(&chain, &tip, tip.time + 2_000, &params());
        assert_eq!(next, COMPACT_FLOOR);
    }

    #[test]
    fn day_window_schedule() {
        assert!(is_day_window(0));
        assert!(is_day_window(14));
        assert!(!is_day_window(15));
        assert!(!is_day_window(29));
        assert!(is_day_window(30));
        assert!(is_day_window(44));
        assert!(!is_day_window(45));
        assert!(!is_day_window(59));
    }

    #[test]
    fn hybrid_dispatches_on_the_tip_second() {
        let params = params();
        // Tip timestamps engineered to land on second 5 (day) and 20 (night).
        let mut day_chain = MemoryChain::with_constant_spacing(20, 1_000_000, 700, BITS);
        day_chain.push_block(1_000_000 + 20 * 700 + 5 - (1_000_000 + 20 * 700) % 60, BITS);
        let day_tip = day_chain.tip().unwrap();
        assert!(is_day_window(day_tip.time));
        assert_eq!(
            next_work_day_night(&day_chain, &day_tip, day_tip.time + 700, &params),
            next_work_digishield(&day_chain, &day_tip, day_tip.time + 700, &params)
        );

        let mut night_chain = MemoryChain::with_constant_spacing(20, 1_000_000, 700, BITS);
        night_chain.push_block(1_000_000 + 20 * 700 + 20 - (1_000_000 + 20 * 700) % 60, BITS);
        let night_tip = night_chain.tip().unwrap();
        assert!(!is_day_window(night_tip.time));
        assert_eq!(
            next_work_day_night(&night_chain, &night_tip, night_tip.time + 700, &params),
            pid::next_work_pid(&night_chain, &night_tip, night_tip.time + 700, &params)
        );
    }

    #[test]
    fn testnet1_runs_the_multiwindow_controller_at_night() {
        let params = ConsensusParams::testnet1();
        let mut chain = MemoryChain::with_constant_spacing(20, 1_000_000, 700, BITS);
        chain.push_block(1_000_000 + 20 * 700 + 20 - (1_000_000 + 20 * 700) % 60, BITS);
        let tip = chain.tip().unwrap();
        assert!(!is_day_window(tip.time));
        assert_eq!(
            next_work_day_night(&chain, &tip, tip.time + 700, &params),
            pid::next_work_pid_multiwindow(&chain, &tip, tip.time + 700, &params)
        );
    }
}
