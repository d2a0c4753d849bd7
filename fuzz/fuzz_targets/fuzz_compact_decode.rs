#![no_main]

use libfuzzer_sys::fuzz_target;

use catamount_types::CompactTarget;

fuzz_target!(|data: &[u8]| {
    // Decode arbitrary 32-bit words; decoding must be total and encoding
    // idempotent for anything that decodes cleanly.
    if data.len() >= 4 {
        let raw = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
        let compact = CompactTarget::new(raw);

        // Must never panic, whatever the word says.
        let decoded = compact.decode();
        let _ = compact.to_target();

        if !decoded.negative && !decoded.overflow {
            let once = decoded.target.to_compact();
            let twice = once.decode_lossy().to_compact();
            assert_eq!(twice, once, "encode must be idempotent");
        }
    }
});
