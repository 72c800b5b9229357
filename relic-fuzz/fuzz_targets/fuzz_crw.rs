#![no_main]

use libfuzzer_sys::fuzz_target;
use relic_crw::{DecodeSettings, decode};

// Header layout (5 bytes):
// [0..2]  width (u16 LE)
// [2..4]  height (u16 LE)
// [4]     table index
// [5..]   image data

const HEADER_SIZE: usize = 5;

fuzz_target!(|data: &[u8]| {
    if data.len() < HEADER_SIZE {
        return;
    }

    let settings = DecodeSettings {
        width: u16::from_le_bytes([data[0], data[1]]) as u32,
        height: u16::from_le_bytes([data[2], data[3]]) as u32,
        table: data[4],
    };

    // Let's ignore larger images so we don't time out.
    if settings.width * settings.height > 4_000_000 {
        return;
    }

    let _ = decode(&data[HEADER_SIZE..], &settings);
});
