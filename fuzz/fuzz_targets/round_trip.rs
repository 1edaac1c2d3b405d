#![no_main]

use libfuzzer_sys::fuzz_target;
use range_coding::{factory, RangeDecoder, RangeEncoder};

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    // the leading bytes pick the alphabet, the rest is the symbol sequence
    let (header, symbols) = data.split_at(4);
    let frequencies: Vec<u64> = header.iter().map(|&b| u64::from(b) + 1).collect();
    let model = factory::from_frequencies(&frequencies).expect("non-zero frequencies");
    let symbol_count = model.symbol_count();

    let input: Vec<u32> = symbols
        .iter()
        .map(|&b| u32::from(b) % symbol_count)
        .collect();

    let mut encoder = RangeEncoder::new(Vec::new());
    for &symbol in &input {
        encoder
            .encode_symbol(&*model, symbol)
            .expect("writing to a Vec cannot fail");
    }
    let buffer = encoder.close().expect("writing to a Vec cannot fail");

    let mut decoder =
        RangeDecoder::new(buffer.as_slice()).expect("reading from a slice cannot fail");
    for &expected in &input {
        let decoded = decoder
            .decode_symbol(&*model)
            .expect("reading from a slice cannot fail");
        assert_eq!(decoded, expected);
    }
});
