use range_coding::{ProbabilityModel, RangeDecoder, RangeEncoder};

pub fn round_trip<M>(model: &M, input: &[u32])
where
    M: ProbabilityModel + ?Sized,
{
    let buffer = encode(model, input);
    let output = decode(model, &buffer, input.len());

    assert_eq!(input, output.as_slice());
}

pub fn encode<M>(model: &M, input: &[u32]) -> Vec<u8>
where
    M: ProbabilityModel + ?Sized,
{
    let mut encoder = RangeEncoder::new(Vec::new());

    for &symbol in input {
        encoder.encode_symbol(model, symbol).unwrap();
    }

    encoder.close().unwrap()
}

pub fn decode<M>(model: &M, buffer: &[u8], count: usize) -> Vec<u32>
where
    M: ProbabilityModel + ?Sized,
{
    let mut decoder = RangeDecoder::new(buffer).unwrap();

    (0..count)
        .map(|_| decoder.decode_symbol(model).unwrap())
        .collect()
}
