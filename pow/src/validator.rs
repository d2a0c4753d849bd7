//! Proof-of-work validation.

use catamount_types::{BlockHash, CompactTarget, ConsensusParams, Target};

/// Check that `hash` satisfies the work threshold claimed in `bits`.
///
/// Fails when the claim is malformed (negative, overflowed, or zero),
/// easier than the network ceiling allows, or simply not met. A hash
/// exactly equal to the target passes.
pub fn check_proof_of_work(hash: &BlockHash, bits: CompactTarget, params: &ConsensusParams) -> bool {
    let target = match bits.to_target() {
        Ok(target) => target,
        Err(_) => return false,
    };
    if target > params.pow_limit {
        return false;
    }
    Target::from_be_bytes(*hash.as_bytes()) <= target
}
