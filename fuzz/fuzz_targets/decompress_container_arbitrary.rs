#![no_main]
use libfuzzer_sys::fuzz_target;
use lz77::ContainerOptions;

fuzz_target!(|data: &[u8]| {
    // Hostile headers and indexes must fail cleanly, with or without workers.
    for nb_workers in [1usize, 3] {
        let opts = ContainerOptions::new(1, nb_workers);
        if let Ok(out) = lz77::decompress_buffer(data, &opts) {
            let index = lz77::container::read_index(&data.to_vec()).expect("decoded, so valid");
            let total: u64 = index.iter().map(|e| e.uncompressed_size as u64).sum();
            assert_eq!(out.len() as u64, total);
        }
    }
});
