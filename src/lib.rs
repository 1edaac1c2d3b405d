//! Carry-less byte-oriented range coding.
//!
//! A range coder compresses a sequence of symbols drawn from per-step
//! probability models into a dense byte stream, at a rate approaching the
//! Shannon entropy of the supplied distributions. The encoder starts with
//! the full range `[0, MAX_RANGE_WIDTH)` and narrows it per symbol; bytes
//! become determined as the bounds converge and are shifted out to the
//! stream. The classic carry-propagation problem is avoided by explicitly
//! narrowing a range that straddles a byte boundary to one side of it.
//!
//! The byte stream carries no header and no model metadata: the decoder must
//! replay the identical model sequence the encoder used, and callers needing
//! multiple independent streams must delimit them externally.
//!
//! # Example
//!
//! ```
//! use range_coding::{factory, RangeDecoder, RangeEncoder};
//!
//! # fn main() -> Result<(), range_coding::Error> {
//! let model = factory::from_frequencies(&[90, 5, 5])?;
//! let symbols = [0, 1, 0, 0, 2, 0];
//!
//! let mut encoder = RangeEncoder::new(Vec::new());
//! for &symbol in &symbols {
//!     encoder.encode_symbol(&*model, symbol)?;
//! }
//! let buffer = encoder.close()?;
//!
//! let mut decoder = RangeDecoder::new(buffer.as_slice())?;
//! for &symbol in &symbols {
//!     assert_eq!(decoder.decode_symbol(&*model)?, symbol);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs, clippy::all, missing_debug_implementations)]
#![warn(clippy::pedantic)]

pub use range_coding_core::{
    factory, BinaryProbabilityModel, EnumerationProbabilityModel, Error as ModelError,
    ProbabilityModel, ProbabilityStatistics, SharedModel, UnaryProbabilityModel, BITS_IN_BYTE,
    HIGH_BYTE_MASK, MAX_RANGE_BITS, MAX_RANGE_BYTES, MAX_RANGE_MASK, MAX_RANGE_WIDTH,
    MAX_SYMBOL_BITS, MAX_SYMBOL_CDF, MIN_RANGE_BITS, MIN_RANGE_BYTES, MIN_RANGE_WIDTH,
    MIN_SYMBOL_PROBABILITY,
};

pub mod decoder;
pub mod encoder;
mod state;

pub use decoder::RangeDecoder;
pub use encoder::RangeEncoder;

/// Errors that can occur while building models or running a coder session.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Io error when reading/writing bytes from a stream
    #[error("io error")]
    Io(#[from] std::io::Error),

    /// Invalid probability-model configuration
    #[error("model error")]
    Model(#[from] ModelError),
}

/// Callback receiving every symbol passing through a coder session, usually
/// for debugging.
///
/// Observers are injected explicitly at construction; see
/// [`RangeEncoder::with_observer`] and [`RangeDecoder::with_observer`].
pub type SymbolObserver = Box<dyn FnMut(u32)>;
