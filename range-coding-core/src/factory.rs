//! Builders that turn raw occurrence counts or preset fractions into valid,
//! normalized probability models.

use std::sync::{Arc, LazyLock};

use crate::model::{
    BinaryProbabilityModel, EnumerationProbabilityModel, SharedModel, UnaryProbabilityModel,
};
use crate::{Error, Result, MAX_SYMBOL_CDF, MIN_SYMBOL_PROBABILITY};

/// Largest denominator served by [`binary_fraction`].
pub const MAX_FRACTION: u32 = 64;

/// Triangular table of memoized binary models, row `d - 1` holding
/// numerators `0..=d`. Built once; proportional fractions share a single
/// instance because rows are filled in increasing denominator order and
/// every multiple of a reduced fraction receives a clone of the same `Arc`.
static BINARY_FRACTIONS: LazyLock<Vec<Vec<SharedModel>>> =
    LazyLock::new(initialize_binary_fractions);

fn initialize_binary_fractions() -> Vec<Vec<SharedModel>> {
    let mut fractions: Vec<Vec<Option<SharedModel>>> = (1..=MAX_FRACTION)
        .map(|denominator| vec![None; denominator as usize + 1])
        .collect();

    for denominator in 1..=MAX_FRACTION {
        for numerator in 0..=denominator {
            if fractions[denominator as usize - 1][numerator as usize].is_some() {
                continue;
            }

            let model: SharedModel = Arc::new(
                BinaryProbabilityModel::new(fraction_threshold(numerator, denominator))
                    .expect("threshold is clamped into the valid range"),
            );

            let mut multiple = 1;
            while multiple * denominator <= MAX_FRACTION {
                fractions[(multiple * denominator) as usize - 1]
                    [(multiple * numerator) as usize] = Some(Arc::clone(&model));
                multiple += 1;
            }
        }
    }

    fractions
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|model| model.expect("every numerator of every row is filled"))
                .collect()
        })
        .collect()
}

/// Threshold of the binary model closest to `numerator / denominator`,
/// clamped so both symbols keep a non-zero probability.
#[allow(clippy::cast_possible_truncation)]
fn fraction_threshold(numerator: u32, denominator: u32) -> u32 {
    let rounded = (u64::from(MAX_SYMBOL_CDF) * u64::from(numerator)
        + u64::from(denominator) / 2)
        / u64::from(denominator);

    (rounded as u32).clamp(MIN_SYMBOL_PROBABILITY, MAX_SYMBOL_CDF - MIN_SYMBOL_PROBABILITY)
}

/// Returns the memoized binary model for the probability
/// `numerator / denominator` of symbol `0`.
///
/// Proportional fractions map to one shared instance (1/2 and 2/4 return
/// the identical model). This is purely an allocation optimization; the
/// returned model behaves exactly like a freshly constructed
/// [`BinaryProbabilityModel`] with the same rounded threshold.
///
/// # Errors
///
/// Fails when `denominator` is zero or exceeds [`MAX_FRACTION`], or when
/// `numerator > denominator`.
pub fn binary_fraction(numerator: u32, denominator: u32) -> Result<SharedModel> {
    if denominator == 0 || denominator > MAX_FRACTION || numerator > denominator {
        return Err(Error::InvalidFraction {
            numerator,
            denominator,
        });
    }

    Ok(Arc::clone(
        &BINARY_FRACTIONS[denominator as usize - 1][numerator as usize],
    ))
}

/// Converts occurrence counts into a probability array summing exactly to
/// [`MAX_SYMBOL_CDF`](crate::MAX_SYMBOL_CDF), every entry at least
/// [`MIN_SYMBOL_PROBABILITY`](crate::MIN_SYMBOL_PROBABILITY).
///
/// Walks the symbols in order, giving each the rounded share of the
/// probability range still unassigned, clamped so the symbols still to come
/// can each receive the minimum; any rounding slack left at the end lands on
/// the last symbol.
///
/// # Errors
///
/// Fails on an empty alphabet, an alphabet too large for every symbol to
/// receive the minimum probability, or frequencies large enough that the
/// intermediate products could overflow.
pub fn normalize_probabilities(frequencies: &[u64]) -> Result<Vec<u32>> {
    let symbol_count = frequencies.len();

    if symbol_count == 0 {
        return Err(Error::EmptyAlphabet);
    }
    if symbol_count > (MAX_SYMBOL_CDF / MIN_SYMBOL_PROBABILITY) as usize {
        return Err(Error::TooManySymbols(symbol_count));
    }

    let mut frequency_sum: u64 = 0;
    for &frequency in frequencies {
        frequency_sum = frequency_sum
            .checked_add(frequency)
            .ok_or(Error::FrequencyOverflow)?;
    }
    // the rounding below computes frequency * range + sum / 2 in u64
    if frequency_sum >= u64::MAX / u64::from(2 * MAX_SYMBOL_CDF) {
        return Err(Error::FrequencyOverflow);
    }

    let mut probabilities = vec![0_u32; symbol_count];
    let mut remaining_range = MAX_SYMBOL_CDF;
    let mut remaining_sum = frequency_sum;

    for (i, &frequency) in frequencies.iter().enumerate() {
        // probability = round(frequency * remaining_range / remaining_sum)
        #[allow(clippy::cast_possible_truncation)]
        let rounded = if frequency == 0 {
            0
        } else {
            ((frequency * u64::from(remaining_range) + remaining_sum / 2) / remaining_sum) as u32
        };

        #[allow(clippy::cast_possible_truncation)]
        let remaining_symbols = (symbol_count - i - 1) as u32;
        let probability = rounded
            .min(remaining_range - remaining_symbols * MIN_SYMBOL_PROBABILITY)
            .max(MIN_SYMBOL_PROBABILITY);

        probabilities[i] = probability;
        remaining_range -= probability;
        remaining_sum -= frequency;
    }

    probabilities[symbol_count - 1] += remaining_range;

    Ok(probabilities)
}

/// Validates a probability array and builds the cheapest model for its
/// alphabet size: unary for one symbol, binary for two, enumeration
/// otherwise.
///
/// # Errors
///
/// Fails when the array is empty or too large, any entry is below
/// [`MIN_SYMBOL_PROBABILITY`](crate::MIN_SYMBOL_PROBABILITY), or the sum is
/// not exactly [`MAX_SYMBOL_CDF`](crate::MAX_SYMBOL_CDF).
pub fn from_probabilities(probabilities: &[u32]) -> Result<SharedModel> {
    validate_probabilities(probabilities)?;

    match probabilities.len() {
        1 => Ok(UnaryProbabilityModel::instance()),
        2 => Ok(Arc::new(BinaryProbabilityModel::new(probabilities[0])?)),
        _ => Ok(Arc::new(EnumerationProbabilityModel::new(probabilities)?)),
    }
}

/// Normalizes occurrence counts and builds the matching model in one step.
///
/// # Errors
///
/// See [`normalize_probabilities`].
pub fn from_frequencies(frequencies: &[u64]) -> Result<SharedModel> {
    let probabilities = normalize_probabilities(frequencies)?;

    from_probabilities(&probabilities)
}

fn validate_probabilities(probabilities: &[u32]) -> Result<()> {
    if probabilities.is_empty() {
        return Err(Error::EmptyAlphabet);
    }
    if probabilities.len() > (MAX_SYMBOL_CDF / MIN_SYMBOL_PROBABILITY) as usize {
        return Err(Error::TooManySymbols(probabilities.len()));
    }

    let mut sum: u64 = 0;
    for &probability in probabilities {
        if probability < MIN_SYMBOL_PROBABILITY {
            return Err(Error::ProbabilityOutOfRange(probability));
        }
        sum += u64::from(probability);
    }

    if sum != u64::from(MAX_SYMBOL_CDF) {
        return Err(Error::WrongProbabilitySum(sum));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProbabilityModel;

    #[test]
    fn proportional_fractions_share_one_model() {
        let half = binary_fraction(1, 2).unwrap();
        let two_quarters = binary_fraction(2, 4).unwrap();
        let thirty_seconds = binary_fraction(32, 64).unwrap();

        assert!(Arc::ptr_eq(&half, &two_quarters));
        assert!(Arc::ptr_eq(&half, &thirty_seconds));
        assert_eq!(half.cdf_lower_bound(1), MAX_SYMBOL_CDF / 2);
    }

    #[test]
    fn fraction_thresholds_round_to_nearest() {
        let third = binary_fraction(1, 3).unwrap();
        assert_eq!(third.cdf_lower_bound(1), 21845);

        // degenerate fractions are clamped to keep both symbols encodable
        let never = binary_fraction(0, 5).unwrap();
        assert_eq!(never.cdf_lower_bound(1), MIN_SYMBOL_PROBABILITY);

        let always = binary_fraction(64, 64).unwrap();
        assert_eq!(always.cdf_lower_bound(1), MAX_SYMBOL_CDF - 1);
    }

    #[test]
    fn rejects_invalid_fractions() {
        assert!(binary_fraction(1, 0).is_err());
        assert!(binary_fraction(5, 4).is_err());
        assert!(binary_fraction(1, MAX_FRACTION + 1).is_err());
    }

    #[test]
    fn dispatches_by_alphabet_size() {
        assert_eq!(from_probabilities(&[65536]).unwrap().symbol_count(), 1);
        assert_eq!(from_probabilities(&[100, 65436]).unwrap().symbol_count(), 2);
        assert_eq!(
            from_probabilities(&[100, 200, 65236]).unwrap().symbol_count(),
            3
        );
    }

    #[test]
    fn validates_probability_arrays() {
        assert_eq!(from_probabilities(&[]).unwrap_err(), Error::EmptyAlphabet);
        assert_eq!(
            from_probabilities(&[65535]).unwrap_err(),
            Error::WrongProbabilitySum(65535)
        );
        assert_eq!(
            from_probabilities(&[0, 65536]).unwrap_err(),
            Error::ProbabilityOutOfRange(0)
        );
    }

    #[test]
    fn normalization_keeps_the_minimum_floor() {
        let probabilities = normalize_probabilities(&[1_000_000, 1, 1]).unwrap();

        assert_eq!(probabilities, vec![MAX_SYMBOL_CDF - 2, 1, 1]);
    }

    #[test]
    fn normalization_dumps_slack_on_the_last_symbol() {
        let probabilities = normalize_probabilities(&[1, 1, 1]).unwrap();

        assert_eq!(
            probabilities.iter().map(|&p| u64::from(p)).sum::<u64>(),
            u64::from(MAX_SYMBOL_CDF)
        );
        assert!(probabilities[2] >= probabilities[0]);
    }

    #[test]
    fn normalization_handles_zero_frequencies() {
        let probabilities = normalize_probabilities(&[0, 0, 100]).unwrap();

        assert_eq!(probabilities, vec![1, 1, MAX_SYMBOL_CDF - 2]);
    }

    #[test]
    fn normalization_rejects_oversized_alphabets() {
        let frequencies = vec![1_u64; MAX_SYMBOL_CDF as usize + 1];

        assert_eq!(
            normalize_probabilities(&frequencies).unwrap_err(),
            Error::TooManySymbols(MAX_SYMBOL_CDF as usize + 1)
        );
    }

    #[test]
    fn normalization_rejects_overflowing_frequencies() {
        assert_eq!(
            normalize_probabilities(&[u64::MAX, 1]).unwrap_err(),
            Error::FrequencyOverflow
        );
        assert_eq!(
            normalize_probabilities(&[u64::MAX / 2, u64::MAX / 2]).unwrap_err(),
            Error::FrequencyOverflow
        );
    }
}
