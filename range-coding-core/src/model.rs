//! The [`ProbabilityModel`] trait and its implementations.

use std::sync::Arc;

mod binary;
mod enumeration;
mod unary;

pub use binary::BinaryProbabilityModel;
pub use enumeration::EnumerationProbabilityModel;
pub use unary::UnaryProbabilityModel;

/// A reference-counted, thread-shareable probability model, as returned by
/// the [`factory`](crate::factory) functions.
pub type SharedModel = Arc<dyn ProbabilityModel + Send + Sync>;

/// A cumulative distribution over a finite symbol alphabet.
///
/// The distribution is scaled to integers: symbol `s` owns the CDF interval
/// `cdf_lower_bound(s)..cdf_lower_bound(s + 1)`, with `cdf_lower_bound(0) ==
/// 0` and `cdf_lower_bound(symbol_count()) ==` [`MAX_SYMBOL_CDF`]. The
/// bounds are strictly increasing by at least [`MIN_SYMBOL_PROBABILITY`] per
/// symbol, so every symbol can be encoded.
///
/// Models are immutable. The same model (by value, not identity) must be
/// supplied to the decoder for each step as was supplied to the encoder.
///
/// [`MAX_SYMBOL_CDF`]: crate::MAX_SYMBOL_CDF
/// [`MIN_SYMBOL_PROBABILITY`]: crate::MIN_SYMBOL_PROBABILITY
pub trait ProbabilityModel: std::fmt::Debug {
    /// Number of symbols in the alphabet.
    fn symbol_count(&self) -> u32;

    /// Lower CDF bound of `symbol`.
    ///
    /// Defined for every `symbol` in `0..=symbol_count()`; the upper bound
    /// of a symbol's interval is the lower bound of its successor.
    fn cdf_lower_bound(&self, symbol: u32) -> u32;

    /// A candidate for the symbol whose interval contains `cdf`.
    ///
    /// The result may under-estimate the true symbol but must never
    /// over-estimate it. The decoder corrects under-estimates with a linear
    /// scan, so implementations trade lookup-table memory against the scan
    /// length.
    fn symbol_for_cdf(&self, cdf: u32) -> u32;

    /// Probability mass of `symbol`, out of [`MAX_SYMBOL_CDF`](crate::MAX_SYMBOL_CDF).
    fn probability(&self, symbol: u32) -> u32 {
        self.cdf_lower_bound(symbol + 1) - self.cdf_lower_bound(symbol)
    }

    /// Per-symbol probabilities as a fresh vector.
    fn symbol_probabilities(&self) -> Vec<u32> {
        (0..self.symbol_count())
            .map(|symbol| self.probability(symbol))
            .collect()
    }
}
