//! Trimmed-mean ensemble retargeting.
//!
//! Runs five member algorithms against the same history, throws away the
//! most extreme result on each side, and averages the middle three. No
//! single member — however far it runs away on a pathological chain — can
//! move the outcome on its own.

use crate::chain::ChainView;
use crate::{digishield, gravity, lwma, peercoin, pid};
use catamount_types::{BlockSample, CompactTarget, ConsensusParams};

/// Ensemble A: multi-window PID, single-block exponential, LWMA, DGW, and
/// the per-block exponential retarget.
pub fn next_work_ensemble_a<C: ChainView + ?Sized>(
    chain: &C,
    tip: &BlockSample,
    candidate_time: i64,
    params: &ConsensusParams,
) -> CompactTarget {
    trimmed_mean([
        pid::next_work_pid_multiwindow(chain, tip, candidate_time, params),
        digishield::next_work_digishield(chain, tip, candidate_time, params),
        lwma::next_work_lwma(chain, tip, candidate_time, params),
        gravity::next_work_dgw(chain, tip, candidate_time, params),
        peercoin::next_work_peercoin(chain, tip, candidate_time, params),
    ])
}

/// Ensemble B: as A, with KGW in place of the single-block exponential.
pub fn next_work_ensemble_b<C: ChainView + ?Sized>(
    chain: &C,
    tip: &BlockSample,
    candidate_time: i64,
    params: &ConsensusParams,
) -> CompactTarget {
    trimmed_mean([
        pid::next_work_pid_multiwindow(chain, tip, candidate_time, params),
        gravity::next_work_kgw(chain, tip, candidate_time, params),
        lwma::next_work_lwma(chain, tip, candidate_time, params),
        gravity::next_work_dgw(chain, tip, candidate_time, params),
        peercoin::next_work_peercoin(chain, tip, candidate_time, params),
    ])
}

/// Sort five compact words, drop the extremes, return the integer mean of
/// the middle three.
pub fn trimmed_mean(results: [CompactTarget; 5]) -> CompactTarget {
    let mut raw = results.map(|c| c.raw() as u64);
    raw.sort_unstable();
    let total: u64 = raw[1..4].iter().sum();
    CompactTarget::new((total / 3) as u32)
}
