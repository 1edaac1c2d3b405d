//! Error type for probability-model construction.

use thiserror::Error;

/// Errors raised while building or validating a probability model.
///
/// All of these indicate an invalid configuration supplied by the caller;
/// none of them can occur while encoding or decoding with a model that was
/// constructed successfully.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The alphabet has more symbols than the CDF resolution can give a
    /// non-zero probability each.
    #[error("too many symbols: {0}")]
    TooManySymbols(usize),

    /// A model must describe at least one symbol.
    #[error("empty alphabet")]
    EmptyAlphabet,

    /// A symbol probability below the minimum or above the CDF scale.
    #[error("probability out of range: {0}")]
    ProbabilityOutOfRange(u32),

    /// Probabilities must sum to exactly `MAX_SYMBOL_CDF`.
    #[error("wrong sum of probabilities: {0}")]
    WrongProbabilitySum(u64),

    /// Symbol frequencies large enough that normalization could overflow.
    #[error("symbol frequencies too large, overflow may occur")]
    FrequencyOverflow,

    /// A fraction outside the memoized binary-fraction table.
    #[error("invalid fraction: {numerator}/{denominator}")]
    InvalidFraction {
        /// Numerator of the rejected fraction.
        numerator: u32,
        /// Denominator of the rejected fraction.
        denominator: u32,
    },
}

/// A specialized `Result` for model construction.
pub type Result<T> = std::result::Result<T, Error>;
