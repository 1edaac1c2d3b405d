use super::ProbabilityModel;
use crate::{Error, Result, MAX_SYMBOL_CDF, MIN_SYMBOL_PROBABILITY};

/// Two-symbol model with the CDF split point at `threshold`.
///
/// Symbol `0` owns `0..threshold` and symbol `1` owns
/// `threshold..`[`MAX_SYMBOL_CDF`](crate::MAX_SYMBOL_CDF). The inverse
/// lookup is exact, so the decoder never needs a correction scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryProbabilityModel {
    threshold: u32,
}

impl BinaryProbabilityModel {
    /// Creates a model where symbol `0` has probability `threshold` out of
    /// [`MAX_SYMBOL_CDF`](crate::MAX_SYMBOL_CDF).
    ///
    /// # Errors
    ///
    /// Fails when `threshold` would leave either symbol with less than
    /// [`MIN_SYMBOL_PROBABILITY`](crate::MIN_SYMBOL_PROBABILITY) mass.
    pub fn new(threshold: u32) -> Result<Self> {
        if threshold < MIN_SYMBOL_PROBABILITY
            || threshold > MAX_SYMBOL_CDF - MIN_SYMBOL_PROBABILITY
        {
            return Err(Error::ProbabilityOutOfRange(threshold));
        }

        Ok(Self { threshold })
    }

    /// The CDF split point between the two symbols.
    #[must_use]
    pub const fn threshold(&self) -> u32 {
        self.threshold
    }
}

impl ProbabilityModel for BinaryProbabilityModel {
    fn symbol_count(&self) -> u32 {
        2
    }

    fn cdf_lower_bound(&self, symbol: u32) -> u32 {
        match symbol {
            0 => 0,
            1 => self.threshold,
            _ => MAX_SYMBOL_CDF,
        }
    }

    fn symbol_for_cdf(&self, cdf: u32) -> u32 {
        u32::from(cdf >= self.threshold)
    }
}
