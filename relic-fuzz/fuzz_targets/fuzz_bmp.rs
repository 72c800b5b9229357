#![no_main]

use libfuzzer_sys::fuzz_target;
use relic_bmp::{Compression, Reader, RleDecoder, decode};

// Header layout (5 bytes):
// [0..2]  width (u16 LE)
// [2..4]  height (u16 LE)
// [4]     bit 0: compression (0=RLE8, 1=RLE4), bits 1..: rows per chunk
// [5..]   RLE data

const HEADER_SIZE: usize = 5;

fuzz_target!(|data: &[u8]| {
    if data.len() < HEADER_SIZE {
        return;
    }

    let width = u16::from_le_bytes([data[0], data[1]]) as u32;
    let height = u16::from_le_bytes([data[2], data[3]]) as u32;
    let compression = if data[4] & 1 == 0 {
        Compression::Rle8
    } else {
        Compression::Rle4
    };
    let rows = (data[4] >> 1).max(1) as usize;
    let data = &data[HEADER_SIZE..];

    if width * height > 4_000_000 {
        return;
    }

    let bulk = decode(data, compression, width, height);

    // Decoding in chunks must agree with decoding in one go.
    if let Ok(mut decoder) = RleDecoder::new(compression, width) {
        let stride = decoder.stride();
        let mut reader = Reader::new(data);
        let mut buf = vec![0; stride * rows];
        let mut streamed = vec![];

        let result = loop {
            if streamed.len() >= stride * height as usize {
                break Ok(());
            }

            match decoder.decode(&mut reader, &mut buf) {
                Ok(0) => break Ok(()),
                Ok(n) => streamed.extend_from_slice(&buf[..n]),
                Err(e) => break Err(e),
            }
        };

        if let (Ok(bulk), Ok(())) = (&bulk, result) {
            streamed.resize(bulk.len().max(streamed.len()), 0);
            assert_eq!(&streamed[..bulk.len()], &bulk[..]);
        }
    }
});
