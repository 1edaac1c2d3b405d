use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use range_coding::{
    factory, BinaryProbabilityModel, RangeDecoder, RangeEncoder, SharedModel,
    UnaryProbabilityModel, MAX_SYMBOL_CDF,
};
use test_case::test_case;

mod common;

#[test]
fn even_split_scenario() {
    let model = BinaryProbabilityModel::new(32768).unwrap();

    common::round_trip(&model, &[0, 1, 0, 0, 1, 1, 0, 1]);
}

#[test_case(1 ; "near certain symbol 0")]
#[test_case(257 ; "skewed")]
#[test_case(MAX_SYMBOL_CDF / 2 ; "even split")]
#[test_case(MAX_SYMBOL_CDF - 1 ; "near certain symbol 1")]
fn binary_thresholds(threshold: u32) {
    let model = BinaryProbabilityModel::new(threshold).unwrap();
    let sequence: Vec<u32> = (0..500).map(|i| u32::from(i % 5 == 0)).collect();

    common::round_trip(&model, &sequence);
}

#[test]
fn unary_symbols_cost_nothing() {
    let buffer = common::encode(&UnaryProbabilityModel, &[0; 16]);
    assert!(buffer.is_empty());

    assert_eq!(
        common::decode(&UnaryProbabilityModel, &buffer, 16),
        vec![0; 16]
    );
}

#[test]
fn empty_sequence() {
    let model = BinaryProbabilityModel::new(4000).unwrap();

    common::round_trip(&model, &[]);
}

/// The decoder must replay the encoder's model sequence, not a single model;
/// interleave several models per step to exercise that contract.
#[test]
fn per_step_model_switching() {
    let models: Vec<SharedModel> = vec![
        factory::from_probabilities(&[32768, 32768]).unwrap(),
        factory::binary_fraction(1, 8).unwrap(),
        factory::from_frequencies(&[10, 80, 10]).unwrap(),
        UnaryProbabilityModel::instance(),
        factory::from_frequencies(&[5, 5, 5, 5, 100]).unwrap(),
    ];
    let symbols = [1_u32, 0, 2, 0, 4, 0, 1, 1, 0, 3, 1, 0, 0, 0, 2];

    let mut encoder = RangeEncoder::new(Vec::new());
    for (&symbol, model) in symbols.iter().zip(models.iter().cycle()) {
        encoder.encode_symbol(&**model, symbol).unwrap();
    }
    let buffer = encoder.close().unwrap();

    let mut decoder = RangeDecoder::new(buffer.as_slice()).unwrap();
    for (&expected, model) in symbols.iter().zip(models.iter().cycle()) {
        assert_eq!(decoder.decode_symbol(&**model).unwrap(), expected);
    }
}

/// A large random sequence over a 256-symbol alphabet, checking not only
/// the decoded symbols but that the decoder reproduces the encoder's exact
/// `(low, high)` trace, and that the stream holds no undecoded bytes at the
/// end.
#[test]
fn random_sequence_trace_equality() {
    const SYMBOL_COUNT: u32 = 256;
    const SEQUENCE_LENGTH: usize = 100_000;

    let mut rng = StdRng::seed_from_u64(12345);
    let frequencies: Vec<u64> = (0..SYMBOL_COUNT).map(|_| rng.gen_range(1..255)).collect();
    let model = factory::from_frequencies(&frequencies).unwrap();

    let sequence: Vec<u32> = (0..SEQUENCE_LENGTH)
        .map(|_| rng.gen_range(0..SYMBOL_COUNT))
        .collect();

    let mut encoder = RangeEncoder::new(Vec::new());
    let mut lows = Vec::with_capacity(SEQUENCE_LENGTH);
    let mut highs = Vec::with_capacity(SEQUENCE_LENGTH);

    for &symbol in &sequence {
        encoder.encode_symbol(&*model, symbol).unwrap();
        lows.push(encoder.low());
        highs.push(encoder.high());
    }
    let buffer = encoder.close().unwrap();

    let mut remaining = buffer.as_slice();
    let mut decoder = RangeDecoder::new(&mut remaining).unwrap();

    for (i, &expected) in sequence.iter().enumerate() {
        assert_eq!(decoder.decode_symbol(&*model).unwrap(), expected, "step {i}");
        assert_eq!(decoder.low(), lows[i], "low diverged at step {i}");
        assert_eq!(decoder.high(), highs[i], "high diverged at step {i}");
    }

    let _ = decoder.close();
    assert!(remaining.is_empty(), "undecoded bytes left in the stream");
}

#[test]
fn skewed_frequencies_normalize_exactly() {
    let probabilities = factory::normalize_probabilities(&[1_000_000, 1, 1]).unwrap();

    assert_eq!(
        probabilities.iter().map(|&p| u64::from(p)).sum::<u64>(),
        u64::from(MAX_SYMBOL_CDF)
    );
    assert!(probabilities.iter().all(|&p| p >= 1));
    assert_eq!(probabilities, vec![MAX_SYMBOL_CDF - 2, 1, 1]);
}

/// Truncating the final flush loses at most the last symbols; everything
/// already determined by the buffered bytes still decodes.
#[test]
fn truncated_stream_decodes_the_determined_prefix() {
    let model = BinaryProbabilityModel::new(32768).unwrap();
    let sequence: Vec<u32> = (0..64_u32).map(|i| (i ^ (i >> 2)) & 1).collect();

    let buffer = common::encode(&model, &sequence);
    assert!(buffer.len() > 2);

    // under an even split every symbol is exactly one bit of the stream, so
    // the first two bytes pin down the first sixteen symbols
    let truncated = &buffer[..2];
    let mut decoder = RangeDecoder::new(truncated).unwrap();

    for &expected in &sequence[..16] {
        assert_eq!(decoder.decode_symbol(&model).unwrap(), expected);
    }
}
