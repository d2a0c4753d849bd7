//! Era- and network-keyed algorithm selection.
//!
//! The chain's retargeting history is a sequence of eras gated by the CIP
//! activation heights, with the final era pinned per network. Dispatch is
//! a closed enum matched exhaustively — every strategy shares one pure
//! signature, so there is nothing for dynamic dispatch to buy.

use crate::chain::ChainView;
use crate::{digishield, ensemble, gravity, interval, lwma, peercoin, pid};
use catamount_types::{BlockSample, CompactTarget, ConsensusParams, NetworkId};

/// The difficulty every chain snaps to at the first era transition.
const SNAP_BITS: CompactTarget = CompactTarget::new(0x1c0f_fff0);

/// Tags for every retargeting algorithm the chain has run or staged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AlgorithmId {
    /// 14-day windowed interval average (launch rules).
    IntervalV1,
    /// Transition block: difficulty snaps to a fixed value.
    Snap,
    /// 6-hour windowed interval average.
    IntervalV2,
    /// Interval average bounded to ±12% per retarget.
    TightClamp,
    /// 8-block PID controller.
    Pid,
    /// PID controller following the smallest error among four lookbacks.
    PidMultiWindow,
    /// Single-block exponential retarget by day, PID controller by night.
    DayNight,
    /// Kimoto gravity well, adaptive window.
    Kgw,
    /// Dark gravity wave, 24-block window.
    Dgw,
    /// Averaging gravity well, 36-block window.
    Agw,
    /// Single-block exponential retarget, unhybridized.
    Digishield,
    /// Linearly-weighted moving average.
    Lwma,
    /// Per-block exponential drift toward target spacing.
    Peercoin,
    /// Trimmed mean over PID-MW, digishield, LWMA, DGW, peercoin.
    EnsembleA,
    /// Trimmed mean over PID-MW, KGW, LWMA, DGW, peercoin.
    EnsembleB,
}

impl AlgorithmId {
    /// Run this strategy against the chain.
    pub fn compute<C: ChainView + ?Sized>(
        self,
        chain: &C,
        tip: &BlockSample,
        candidate_time: i64,
        params: &ConsensusParams,
    ) -> CompactTarget {
        match self {
            Self::IntervalV1 => interval::next_work_interval_v1(chain, tip, candidate_time, params),
            Self::Snap => SNAP_BITS,
            Self::IntervalV2 => interval::next_work_interval_v2(chain, tip, candidate_time, params),
            Self::TightClamp => interval::next_work_tight_clamp(chain, tip, candidate_time, params),
            Self::Pid => pid::next_work_pid(chain, tip, candidate_time, params),
            Self::PidMultiWindow => {
                pid::next_work_pid_multiwindow(chain, tip, candidate_time, params)
            }
            Self::DayNight => digishield::next_work_day_night(chain, tip, candidate_time, params),
            Self::Kgw => gravity::next_work_kgw(chain, tip, candidate_time, params),
            Self::Dgw => gravity::next_work_dgw(chain, tip, candidate_time, params),
            Self::Agw => gravity::next_work_agw(chain, tip, candidate_time, params),
            Self::Digishield => {
                digishield::next_work_digishield(chain, tip, candidate_time, params)
            }
            Self::Lwma => lwma::next_work_lwma(chain, tip, candidate_time, params),
            Self::Peercoin => peercoin::next_work_peercoin(chain, tip, candidate_time, params),
            Self::EnsembleA => ensemble::next_work_ensemble_a(chain, tip, candidate_time, params),
            Self::EnsembleB => ensemble::next_work_ensemble_b(chain, tip, candidate_time, params),
        }
    }
}

/// Pick the algorithm in force for the block built on a tip at
/// `tip_height`.
pub fn select_algorithm(
    tip_height: i64,
    network: NetworkId,
    params: &ConsensusParams,
) -> AlgorithmId {
    if tip_height < params.cip01_height {
        return AlgorithmId::IntervalV1;
    }
    if tip_height == params.cip01_height {
        return AlgorithmId::Snap;
    }
    if tip_height < params.cip02_height {
        return AlgorithmId::IntervalV2;
    }
    if tip_height < params.cip03_height {
        return AlgorithmId::TightClamp;
    }
    if tip_height < params.cip04_height {
        return AlgorithmId::Pid;
    }
    match network {
        NetworkId::Testnet1 => AlgorithmId::DayNight,
        NetworkId::Testnet2 => AlgorithmId::PidMultiWindow,
        NetworkId::Testnet3 => AlgorithmId::Dgw,
        NetworkId::Testnet4 => AlgorithmId::EnsembleA,
        NetworkId::Testnet5 => AlgorithmId::EnsembleB,
        NetworkId::Main | NetworkId::Regtest => AlgorithmId::DayNight,
    }
}

/// The compact work threshold required of the block built on `tip`.
///
/// Applies the two global overrides before any era dispatch: the
/// test-network min-difficulty escape, then the no-retargeting freeze.
pub fn next_required_target<C: ChainView + ?Sized>(
    chain: &C,
    tip: &BlockSample,
    candidate_time: i64,
    params: &ConsensusParams,
) -> CompactTarget {
    let limit_compact = params.pow_limit_compact();

    if params.pow_allow_min_difficulty_blocks {
        // Stalled test network: allow an easiest-difficulty block once the
        // candidate is more than twice the spacing late; otherwise inherit
        // the last difficulty that wasn't itself an escape block.
        if candidate_time > tip.time + params.pow_target_spacing * 2 {
            return limit_compact;
        }
        return last_non_min_difficulty_bits(
            chain,
            tip,
            params.difficulty_adjustment_interval_v2(),
            limit_compact,
        );
    }

    if params.pow_no_retargeting {
        return tip.bits;
    }

    let algorithm = select_algorithm(tip.height, params.network, params);
    let bits = algorithm.compute(chain, tip, candidate_time, params);
    tracing::debug!(
        network = params.network.as_str(),
        height = tip.height + 1,
        algorithm = ?algorithm,
        bits = %bits,
        "difficulty retarget"
    );
    bits
}

/// Walk back past min-difficulty escape blocks to the difficulty the chain
/// was really running at; retarget boundaries stop the walk.
pub(crate) fn last_non_min_difficulty_bits<C: ChainView + ?Sized>(
    chain: &C,
    tip: &BlockSample,
    interval: i64,
    escape_bits: CompactTarget,
) -> CompactTarget {
    let mut index = *tip;
    while index.height % interval != 0 && index.bits == escape_bits {
        match chain.previous(&index) {
            Some(prev) => index = prev,
            None => break,
        }
    }
    index.bits
}
