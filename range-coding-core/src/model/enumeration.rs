use super::ProbabilityModel;
use crate::{Error, Result, MAX_SYMBOL_BITS, MAX_SYMBOL_CDF, MIN_SYMBOL_PROBABILITY};

/// Bucket count of the inverse-CDF acceleration table. A tuning constant,
/// not a protocol invariant: a coarser table only lengthens the decoder's
/// correction scan, it never changes the byte stream.
const SYMBOLS_BY_CDF_BITS: u32 = 10;
const SYMBOLS_BY_CDF_COUNT: usize = 1 << SYMBOLS_BY_CDF_BITS;
const SYMBOLS_BY_CDF_SHIFT: u32 = MAX_SYMBOL_BITS - SYMBOLS_BY_CDF_BITS;

/// General model over an arbitrary alphabet, backed by a prefix-sum CDF
/// array and an accelerated inverse-CDF lookup table.
///
/// The table maps the top `SYMBOLS_BY_CDF_BITS` bits of a CDF value to the
/// lowest symbol whose interval could contain any value in that bucket,
/// which bounds the decoder's correction scan to the symbols sharing one
/// bucket.
#[derive(Debug, Clone)]
pub struct EnumerationProbabilityModel {
    /// Cumulative distribution function, `symbol_count + 1` entries.
    cdf: Vec<u32>,
    /// Lowest symbol per coarse CDF bucket.
    symbols_by_cdf: Vec<u16>,
}

impl EnumerationProbabilityModel {
    /// Builds a model from per-symbol probabilities.
    ///
    /// # Errors
    ///
    /// Fails when the alphabet is empty, any probability is below
    /// [`MIN_SYMBOL_PROBABILITY`](crate::MIN_SYMBOL_PROBABILITY), or the
    /// probabilities do not sum to exactly
    /// [`MAX_SYMBOL_CDF`](crate::MAX_SYMBOL_CDF).
    pub fn new(probabilities: &[u32]) -> Result<Self> {
        let cdf = build_cdf(probabilities)?;
        let symbols_by_cdf = build_symbols_by_cdf(&cdf);

        Ok(Self {
            cdf,
            symbols_by_cdf,
        })
    }
}

fn build_cdf(probabilities: &[u32]) -> Result<Vec<u32>> {
    if probabilities.is_empty() {
        return Err(Error::EmptyAlphabet);
    }

    let sum: u64 = probabilities.iter().map(|&p| u64::from(p)).sum();
    if sum != u64::from(MAX_SYMBOL_CDF) {
        return Err(Error::WrongProbabilitySum(sum));
    }

    let mut cdf = Vec::with_capacity(probabilities.len() + 1);
    let mut bound = 0;
    cdf.push(bound);

    for &probability in probabilities {
        if probability < MIN_SYMBOL_PROBABILITY {
            return Err(Error::ProbabilityOutOfRange(probability));
        }

        bound += probability;
        cdf.push(bound);
    }

    Ok(cdf)
}

/// One monotone pass over the symbol list: for each bucket, advance the
/// cursor past every symbol whose interval ends at or before the bucket
/// boundary.
fn build_symbols_by_cdf(cdf: &[u32]) -> Vec<u16> {
    let mut table = vec![0_u16; SYMBOLS_BY_CDF_COUNT];
    let mut min_symbol = 0_usize;

    for (bucket, entry) in table.iter_mut().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let boundary = (bucket as u32) << SYMBOLS_BY_CDF_SHIFT;

        while cdf[min_symbol + 1] <= boundary {
            min_symbol += 1;
        }

        // symbol indices stay below MAX_SYMBOL_CDF, so they fit in a u16
        #[allow(clippy::cast_possible_truncation)]
        {
            *entry = min_symbol as u16;
        }
    }

    table
}

impl ProbabilityModel for EnumerationProbabilityModel {
    #[allow(clippy::cast_possible_truncation)]
    fn symbol_count(&self) -> u32 {
        (self.cdf.len() - 1) as u32
    }

    fn cdf_lower_bound(&self, symbol: u32) -> u32 {
        self.cdf[symbol as usize]
    }

    fn symbol_for_cdf(&self, cdf: u32) -> u32 {
        let index = (cdf >> SYMBOLS_BY_CDF_SHIFT) as usize;

        u32::from(self.symbols_by_cdf[index])
    }
}
