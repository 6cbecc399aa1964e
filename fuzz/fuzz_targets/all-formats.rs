#![no_main]

use libfuzzer_sys::fuzz_target;
use quakedemo::{charmap, DemoFormat};

fuzz_target!(|data: &[u8]| {
    for format in [DemoFormat::Dem, DemoFormat::Qwd, DemoFormat::Mvd] {
        if let Ok(info) = format.parse(data, charmap::quake) {
            assert!(!info.map_file_path.is_empty());
        }
    }
});
