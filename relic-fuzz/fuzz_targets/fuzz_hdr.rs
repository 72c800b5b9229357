#![no_main]

use libfuzzer_sys::fuzz_target;
use relic_hdr::{DecodeSettings, DefaultToneMapper, decode};

fuzz_target!(|data: &[u8]| {
    let tone_mapper = DefaultToneMapper::default();
    let settings = DecodeSettings {
        tone_mapper: Some(&tone_mapper),
    };

    if let Ok(image) = decode(data, &settings) {
        let _ = image.into_rgb32f();
    }
});
