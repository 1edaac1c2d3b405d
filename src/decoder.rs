//! The [`RangeDecoder`] half of the range coding library.

use std::fmt;
use std::io::{self, Read};

use range_coding_core::{
    ProbabilityModel, BITS_IN_BYTE, HIGH_BYTE_MASK, MAX_RANGE_BYTES, MAX_SYMBOL_CDF,
};

use crate::state::RangeState;
use crate::SymbolObserver;

/// A range decoder.
///
/// Mirrors [`RangeEncoder`](crate::RangeEncoder): consumes bytes from the
/// source and recovers, for each step, the symbol whose CDF interval
/// contains the current numeric position within the range. The models
/// supplied per step must be value-identical to the ones used to encode.
///
/// An exhausted source is not an error; missing bytes read as zero, which
/// still decodes every symbol whose boundaries are determined by the bytes
/// already consumed. A byte stream that was not produced by the paired
/// encoder yields silently wrong symbols — there is no integrity checking
/// at this layer.
pub struct RangeDecoder<R: Read> {
    source: R,
    state: RangeState,
    /// The number read from the stream, always inside `[low, high)`.
    number: u64,
    observer: Option<SymbolObserver>,
}

impl<R: Read> RangeDecoder<R> {
    /// Constructs a decoder over `source`, priming the numeric position
    /// with the first [`MAX_RANGE_BYTES`] bytes.
    ///
    /// # Errors
    ///
    /// Fails if the source cannot be read from (a clean end of input is not
    /// a failure).
    pub fn new(source: R) -> io::Result<Self> {
        Self::build(source, None)
    }

    /// Constructs a decoder that also reports every decoded symbol to
    /// `observer`.
    ///
    /// # Errors
    ///
    /// Fails if the source cannot be read from.
    pub fn with_observer(source: R, observer: SymbolObserver) -> io::Result<Self> {
        Self::build(source, Some(observer))
    }

    fn build(source: R, observer: Option<SymbolObserver>) -> io::Result<Self> {
        // Growing `high` from 1 by one byte per shift leaves the full range
        // selected after exactly MAX_RANGE_BYTES shifts.
        let mut decoder = Self {
            source,
            state: RangeState { low: 0, high: 1 },
            number: 0,
            observer,
        };

        for _ in 0..MAX_RANGE_BYTES {
            let Self {
                source,
                state,
                number,
                ..
            } = &mut decoder;

            shift_in_byte(state, source, number)?;
        }

        Ok(decoder)
    }

    /// Decodes one symbol under `model`.
    ///
    /// # Errors
    ///
    /// Fails if the source cannot be read from.
    pub fn decode_symbol<M>(&mut self, model: &M) -> io::Result<u32>
    where
        M: ProbabilityModel + ?Sized,
    {
        let range = self.state.high - self.state.low;

        // Double-precision division, deliberately: `number - low < 2^40` is
        // exactly representable in an f64, the multiplication by 2^16 only
        // shifts the exponent, and the single rounded division is accurate
        // to ~2^-37 absolute. The true position sits at least
        // 2^16 / range >= 2^-24 below the next CDF boundary, so the
        // truncated result may under-estimate the symbol's interval but can
        // never land past it.
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_precision_loss,
            clippy::cast_sign_loss
        )]
        let cdf =
            ((self.number - self.state.low) as f64 * f64::from(MAX_SYMBOL_CDF) / range as f64)
                as u32;

        // Candidate from the model's accelerated lookup, corrected by
        // advancing until the sub-range upper bound passes `number`.
        let mut symbol = model.symbol_for_cdf(cdf);
        let mut updated_high = RangeState::symbol_lower_bound(model, self.state.low, range, symbol);
        let mut updated_low;

        loop {
            symbol += 1;
            updated_low = updated_high;
            updated_high = RangeState::symbol_lower_bound(model, self.state.low, range, symbol);

            if updated_high > self.number {
                break;
            }
        }

        self.state.low = updated_low;
        self.state.high = updated_high;

        {
            let Self {
                source,
                state,
                number,
                ..
            } = self;

            state.normalize(|st| shift_in_byte(st, source, number))?;
        }

        let decoded_symbol = symbol - 1;
        if let Some(observer) = &mut self.observer {
            observer(decoded_symbol);
        }

        Ok(decoded_symbol)
    }

    /// Current lower bound of the coding range.
    #[must_use]
    pub fn low(&self) -> u64 {
        self.state.low
    }

    /// Current upper bound of the coding range.
    #[must_use]
    pub fn high(&self) -> u64 {
        self.state.high
    }

    /// Releases the source. The source itself is not closed.
    #[must_use]
    pub fn close(self) -> R {
        self.source
    }
}

impl<R: Read> fmt::Debug for RangeDecoder<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeDecoder")
            .field("low", &self.state.low)
            .field("high", &self.state.high)
            .field("number", &self.number)
            .field("observer", &self.observer.is_some())
            .finish_non_exhaustive()
    }
}

/// Consumes one determined byte: drops the shared high byte from the bounds
/// and the numeric position, then shifts in the next source byte (zero once
/// the input is exhausted).
fn shift_in_byte<R: Read>(state: &mut RangeState, source: &mut R, number: &mut u64) -> io::Result<()> {
    let high_byte = state.low & HIGH_BYTE_MASK;
    state.pop_high_byte();

    *number = (*number - high_byte) << BITS_IN_BYTE;
    if let Some(byte) = next_byte(source)? {
        *number += u64::from(byte);
    }

    debug_assert!(
        *number >= state.low && *number < state.high,
        "number is out of range"
    );

    Ok(())
}

fn next_byte<R: Read>(source: &mut R) -> io::Result<Option<u8>> {
    let mut buffer = [0_u8; 1];

    loop {
        match source.read(&mut buffer) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(buffer[0])),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}
