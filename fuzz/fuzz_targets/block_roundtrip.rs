#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: &[u8]| {
    // The first byte picks the level; every level must round-trip.
    let Some((&selector, data)) = input.split_first() else {
        return;
    };
    let level = 1 + u32::from(selector) % lz77::block::LEVEL_MAX;

    // Anything that fits the 3-byte size header must compress.
    let compressed = lz77::compress_block_level(data, level).expect("input below the size limit");
    assert!(compressed.len() <= lz77::compress_bound(data.len()));

    let recovered = lz77::decompress_block(&compressed).expect("own output must decode");
    assert_eq!(
        recovered,
        data,
        "level {} round-trip mismatch: {} compressed bytes decoded to {} (expected {})",
        level,
        compressed.len(),
        recovered.len(),
        data.len()
    );
});
