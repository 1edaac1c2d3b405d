//! The [`RangeEncoder`] half of the range coding library.

use std::fmt;
use std::io::{self, Write};

use range_coding_core::{ProbabilityModel, BITS_IN_BYTE, MAX_RANGE_BYTES};

use crate::state::RangeState;
use crate::SymbolObserver;

/// A range encoder.
///
/// Narrows the coding range per symbol and writes stabilized high-order
/// bytes to the sink. Each step may use a different [`ProbabilityModel`];
/// the decoder must replay the identical model sequence.
///
/// A session is single-use and not thread-safe. Dropping an encoder without
/// calling [`close`](Self::close) loses the final disambiguating bytes,
/// leaving the stream decodable for all but possibly the last symbol.
pub struct RangeEncoder<W: Write> {
    sink: W,
    state: RangeState,
    observer: Option<SymbolObserver>,
}

impl<W: Write> RangeEncoder<W> {
    /// Constructs an encoder writing to `sink`, with the full range
    /// selected.
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            state: RangeState::full(),
            observer: None,
        }
    }

    /// Constructs an encoder that also reports every encoded symbol to
    /// `observer`.
    pub fn with_observer(sink: W, observer: SymbolObserver) -> Self {
        Self {
            sink,
            state: RangeState::full(),
            observer: Some(observer),
        }
    }

    /// Encodes one symbol under `model`.
    ///
    /// # Errors
    ///
    /// Fails if the sink cannot be written to.
    pub fn encode_symbol<M>(&mut self, model: &M, symbol: u32) -> io::Result<()>
    where
        M: ProbabilityModel + ?Sized,
    {
        debug_assert!(symbol < model.symbol_count(), "symbol out of alphabet");

        let Self {
            sink,
            state,
            observer,
        } = self;

        state.update_range(model, symbol, |st| {
            let byte = st.pop_high_byte();
            sink.write_all(&[byte])
        })?;

        if let Some(observer) = observer {
            observer(symbol);
        }

        Ok(())
    }

    /// Encodes a sequence of symbols under a single `model`.
    ///
    /// # Errors
    ///
    /// Fails if the sink cannot be written to.
    pub fn encode_all<M>(
        &mut self,
        model: &M,
        symbols: impl IntoIterator<Item = u32>,
    ) -> io::Result<()>
    where
        M: ProbabilityModel + ?Sized,
    {
        for symbol in symbols {
            self.encode_symbol(model, symbol)?;
        }

        Ok(())
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

    /// Flushes the minimal disambiguating suffix and releases the sink.
    ///
    /// Any number inside `[low, high)` identifies the encoded sequence.
    /// This picks `high - 1` and writes its bytes from the most significant
    /// position down, stopping as soon as the accumulated prefix (with the
    /// remaining positions zero) reaches `low` — at most
    /// [`MAX_RANGE_BYTES`] bytes. The sink itself is neither flushed nor
    /// closed.
    ///
    /// # Errors
    ///
    /// Fails if the sink cannot be written to.
    pub fn close(mut self) -> io::Result<W> {
        let requested_number = self.state.high - 1;
        let mut stored_number: u64 = 0;

        for i in (0..MAX_RANGE_BYTES).rev() {
            if stored_number >= self.state.low {
                break;
            }

            let shift = BITS_IN_BYTE * i;
            let digit = (requested_number >> shift) & 0xFF;
            stored_number |= digit << shift;

            #[allow(clippy::cast_possible_truncation)]
            self.sink.write_all(&[digit as u8])?;
        }

        Ok(self.sink)
    }
}

impl<W: Write> fmt::Debug for RangeEncoder<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeEncoder")
            .field("low", &self.state.low)
            .field("high", &self.state.high)
            .field("observer", &self.observer.is_some())
            .finish_non_exhaustive()
    }
}
