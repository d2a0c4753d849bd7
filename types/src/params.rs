//! Per-network consensus parameters.
//!
//! One immutable value per network, passed explicitly into every engine
//! call. There is deliberately no process-wide "current network" — a
//! strategy is a pure function of `(chain, tip, candidate, params)`.

use crate::compact::CompactTarget;
use crate::network::NetworkId;
use crate::target::Target;
use serde::{Deserialize, Serialize};

/// Parameters that influence chain consensus.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusParams {
    /// Which network these parameters describe; also selects the
    /// post-era retargeting algorithm.
    pub network: NetworkId,

    /// Easiest allowed target — every strategy clamps its result here.
    pub pow_limit: Target,

    /// Intended seconds between blocks.
    pub pow_target_spacing: i64,

    /// Ceiling on the effective spacing used by the exponential retarget.
    pub pow_target_spacing_max: i64,

    /// Measurement window of the original interval retarget (14 days).
    pub pow_target_timespan_v1: i64,

    /// Measurement window of every later interval retarget (6 hours).
    pub pow_target_timespan_v2: i64,

    /// Averaging window of the linearly-weighted moving average.
    pub lwma_averaging_window: i64,

    /// Era thresholds. Below `cip01_height` the original 14-day interval
    /// retarget applies; each threshold switches the chain to the next
    /// algorithm, and past `cip04_height` the network tag decides.
    pub cip01_height: i64,
    pub cip02_height: i64,
    pub cip03_height: i64,
    pub cip04_height: i64,

    /// Test-network escape valve: allow an easiest-difficulty block when
    /// block production stalls for more than twice the spacing.
    pub pow_allow_min_difficulty_blocks: bool,

    /// Skip retargeting entirely and inherit the tip's bits. Local testing.
    pub pow_no_retargeting: bool,
}

impl ConsensusParams {
    /// Blocks per retarget window under the 14-day timespan (2016).
    pub fn difficulty_adjustment_interval_v1(&self) -> i64 {
        self.pow_target_timespan_v1 / self.pow_target_spacing
    }

    /// Blocks per retarget window under the 6-hour timespan (36).
    pub fn difficulty_adjustment_interval_v2(&self) -> i64 {
        self.pow_target_timespan_v2 / self.pow_target_spacing
    }

    /// The easiest target in compact form — the min-difficulty escape value.
    pub fn pow_limit_compact(&self) -> CompactTarget {
        self.pow_limit.to_compact()
    }

    /// The production network.
    pub fn main() -> Self {
        Self {
            network: NetworkId::Main,
            pow_limit: Target::max_value() >> 20,
            pow_target_spacing: 10 * 60,
            pow_target_spacing_max: 12 * 10 * 60,
            pow_target_timespan_v1: 14 * 24 * 60 * 60,
            pow_target_timespan_v2: 6 * 60 * 60,
            lwma_averaging_window: 45,
            cip01_height: 20_289,
            cip02_height: 21_346,
            cip03_height: 27_260,
            cip04_height: 46_331,
            pow_allow_min_difficulty_blocks: false,
            pow_no_retargeting: false,
        }
    }

    pub fn testnet1() -> Self {
        Self::testnet(NetworkId::Testnet1)
    }

    pub fn testnet2() -> Self {
        Self::testnet(NetworkId::Testnet2)
    }

    pub fn testnet3() -> Self {
        Self::testnet(NetworkId::Testnet3)
    }

    pub fn testnet4() -> Self {
        Self::testnet(NetworkId::Testnet4)
    }

    pub fn testnet5() -> Self {
        Self::testnet(NetworkId::Testnet5)
    }

    /// Local development network: trivially easy work, no retargeting,
    /// min-difficulty escape always available.
    pub fn regtest() -> Self {
        Self {
            network: NetworkId::Regtest,
            pow_limit: Target::max_value() >> 1,
            cip01_height: 0,
            cip02_height: 0,
            cip03_height: 0,
            cip04_height: 0,
            pow_allow_min_difficulty_blocks: true,
            pow_no_retargeting: true,
            ..Self::main()
        }
    }

    /// The test networks share the compressed era schedule: every algorithm
    /// era is reachable within the first 150 blocks.
    fn testnet(network: NetworkId) -> Self {
        Self {
            network,
            cip01_height: 1,
            cip02_height: 50,
            cip03_height: 100,
            cip04_height: 150,
            ..Self::main()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjustment_intervals() {
        let params = ConsensusParams::main();
        assert_eq!(params.difficulty_adjustment_interval_v1(), 2016);
        assert_eq!(params.difficulty_adjustment_interval_v2(), 36);
    }

    #[test]
    fn pow_limit_compact_values() {
        assert_eq!(ConsensusParams::main().pow_limit_compact().raw(), 0x1e0f_ffff);
        assert_eq!(
            ConsensusParams::regtest().pow_limit_compact().raw(),
            0x207f_ffff
        );
    }

    #[test]
    fn era_schedule_is_ordered() {
        for params in [ConsensusParams::main(), ConsensusParams::testnet1()] {
            assert!(params.cip01_height <= params.cip02_height);
            assert!(params.cip02_height <= params.cip03_height);
            assert!(params.cip03_height <= params.cip04_height);
        }
    }

    #[test]
    fn params_round_trip_through_json() {
        let params = ConsensusParams::testnet3();
        let json = serde_json::to_string(&params).unwrap();
        let back: ConsensusParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);
    }
}
