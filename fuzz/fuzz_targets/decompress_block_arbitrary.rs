#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Err results are expected; what we verify is no panics.
    let _ = lz77::decompress_block(data);

    // Bare token streams against a few fixed output sizes.
    for size in [0usize, 1, 4096, data.len().saturating_mul(64).min(1 << 20)] {
        let mut dst = vec![0u8; size];
        if let Ok(n) = lz77::block::decompress_tokens(data, &mut dst) {
            assert_eq!(n, size);
        }
    }
});
