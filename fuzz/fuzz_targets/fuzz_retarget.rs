#![no_main]

use libfuzzer_sys::fuzz_target;

use catamount_pow::{next_required_target, MemoryChain};
use catamount_types::{CompactTarget, ConsensusParams};

fuzz_target!(|data: &[u8]| {
    // Build a chain from arbitrary solvetimes and header bits, then run
    // every network's retarget over it. Timestamps may run backwards and
    // bits may be garbage; the engine must never panic.
    let mut chain = MemoryChain::new();
    let mut time = 1_000_000i64;
    for record in data.chunks_exact(6) {
        let solvetime = i16::from_le_bytes([record[0], record[1]]) as i64;
        let raw = u32::from_le_bytes([record[2], record[3], record[4], record[5]]);
        time += solvetime;
        chain.push_block(time, CompactTarget::new(raw));
    }

    let tip = match chain.tip() {
        Some(tip) => tip,
        None => return,
    };

    for params in [
        ConsensusParams::main(),
        ConsensusParams::testnet1(),
        ConsensusParams::testnet2(),
        ConsensusParams::testnet3(),
        ConsensusParams::testnet4(),
        ConsensusParams::testnet5(),
        ConsensusParams::regtest(),
    ] {
        let _ = next_required_target(&chain, &tip, time + 600, &params);
    }
});
