#![no_main]

use libfuzzer_sys::fuzz_target;

use catamount_pow::check_proof_of_work;
use catamount_types::{BlockHash, CompactTarget, ConsensusParams};

fuzz_target!(|data: &[u8]| {
    // Validate PoW with an arbitrary hash and claimed bits.
    // Requires at least 36 bytes: 32 (hash) + 4 (compact word).
    if data.len() >= 36 {
        let mut hash_bytes = [0u8; 32];
        hash_bytes.copy_from_slice(&data[..32]);
        let hash = BlockHash::new(hash_bytes);
        let bits = CompactTarget::new(u32::from_le_bytes([
            data[32], data[33], data[34], data[35],
        ]));

        // This must never panic regardless of input.
        for params in [ConsensusParams::main(), ConsensusParams::regtest()] {
            let _ = check_proof_of_work(&hash, bits, &params);
        }
    }
});
