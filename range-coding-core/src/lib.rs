//! Probability models and shared constants for the
//! [`range-coding`](https://crates.io/crates/range-coding) crate.
//!
//! A probability model describes a cumulative distribution function (CDF)
//! over a finite symbol alphabet, scaled to integers in
//! `0..=`[`MAX_SYMBOL_CDF`]. Models are immutable once built and can be
//! shared freely between concurrent encoder and decoder sessions; the
//! protocol in fact requires the decoder to replay value-identical models in
//! the same order as the encoder.

#![deny(missing_docs, clippy::all, missing_debug_implementations)]
#![warn(clippy::pedantic)]

mod error;
pub use error::{Error, Result};

pub mod factory;

mod model;
pub use model::{
    BinaryProbabilityModel, EnumerationProbabilityModel, ProbabilityModel, SharedModel,
    UnaryProbabilityModel,
};

mod statistics;
pub use statistics::ProbabilityStatistics;

/// Number of bits in one byte.
pub const BITS_IN_BYTE: u32 = 8;

/// Width in bytes below which a range must be renormalized.
pub const MIN_RANGE_BYTES: u32 = 2;

/// Width in bits below which a range must be renormalized.
pub const MIN_RANGE_BITS: u32 = BITS_IN_BYTE * MIN_RANGE_BYTES;

/// Minimal width of a normalized range. Must be at least [`MAX_SYMBOL_CDF`],
/// so that every symbol's sub-range keeps a non-zero width.
pub const MIN_RANGE_WIDTH: u64 = 1 << MIN_RANGE_BITS;

/// Size in bytes of the full range representation.
pub const MAX_RANGE_BYTES: u32 = 5;

/// Size in bits of the full range representation.
/// `MAX_RANGE_WIDTH * MAX_SYMBOL_CDF` must fit into a `u64` because the two
/// are multiplied when a sub-range lower bound is computed.
pub const MAX_RANGE_BITS: u32 = BITS_IN_BYTE * MAX_RANGE_BYTES;

/// Width of the full (initial) range.
pub const MAX_RANGE_WIDTH: u64 = 1 << MAX_RANGE_BITS;

/// Mask covering every bit of the range representation.
pub const MAX_RANGE_MASK: u64 = MAX_RANGE_WIDTH - 1;

/// Mask of the most significant byte of the range representation.
pub const HIGH_BYTE_MASK: u64 = 0xFF << ((MAX_RANGE_BYTES - 1) * BITS_IN_BYTE);

/// Resolution of symbol CDF values, in bits.
pub const MAX_SYMBOL_BITS: u32 = MIN_RANGE_BITS;

/// Upper bound of the CDF scale. `cdf(symbol_count)` equals exactly this
/// value for every valid model.
pub const MAX_SYMBOL_CDF: u32 = 1 << MAX_SYMBOL_BITS;

/// Smallest probability mass a single symbol may carry.
pub const MIN_SYMBOL_PROBABILITY: u32 = 1;
