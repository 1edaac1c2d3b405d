//! Frequency accumulation feeding the model [`factory`](crate::factory).

use crate::model::SharedModel;
use crate::{factory, Result};

/// Accumulates per-symbol occurrence counts and builds a probability model
/// from them in one shot.
///
/// Intended for single-threaded accumulation; there is no internal locking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbabilityStatistics {
    frequencies: Vec<u64>,
}

impl ProbabilityStatistics {
    /// Creates an accumulator for an alphabet of `symbol_count` symbols,
    /// all counts zero.
    #[must_use]
    pub fn new(symbol_count: usize) -> Self {
        Self {
            frequencies: vec![0; symbol_count],
        }
    }

    /// Records one occurrence of `symbol`.
    pub fn add_symbol(&mut self, symbol: u32) {
        self.add_symbol_count(symbol, 1);
    }

    /// Records `count` occurrences of `symbol`.
    pub fn add_symbol_count(&mut self, symbol: u32, count: u64) {
        self.frequencies[symbol as usize] += count;
    }

    /// The accumulated count for `symbol`.
    #[must_use]
    pub fn frequency(&self, symbol: u32) -> u64 {
        self.frequencies[symbol as usize]
    }

    /// Normalizes the accumulated counts into a probability model.
    ///
    /// # Errors
    ///
    /// Fails when the counts cannot be normalized; see
    /// [`factory::normalize_probabilities`].
    pub fn build_probability_model(&self) -> Result<SharedModel> {
        factory::from_frequencies(&self.frequencies)
    }
}
