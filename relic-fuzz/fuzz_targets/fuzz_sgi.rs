#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(header) = relic_sgi::Header::read(data) {
        let layout = header.layout;

        // Let's ignore larger images so we don't time out.
        if layout.width as u64 * layout.height as u64 * layout.channels as u64 > 4_000_000 {
            return;
        }

        if let Ok(image) = relic_sgi::decode(data) {
            let _ = image.into_dynamic_image();
        }
    }
});
