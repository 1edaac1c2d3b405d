//! The range state and renormalization algorithm shared by both coder
//! directions.

use std::io;

use range_coding_core::{
    ProbabilityModel, BITS_IN_BYTE, HIGH_BYTE_MASK, MAX_RANGE_BYTES, MAX_RANGE_WIDTH,
    MAX_SYMBOL_BITS, MIN_RANGE_WIDTH,
};

/// The current coding interval `[low, high)`.
///
/// Encoding a symbol divides the interval into sub-ranges with widths
/// proportional to the symbols' probabilities and keeps the encoded symbol's
/// sub-range. Whenever the most significant byte of `low` equals that of
/// `high - 1`, the byte is fully determined; the direction-specific
/// `add_byte` callback emits it (encoder) or consumes the next stream byte
/// (decoder), and both bounds shift left by one byte. This emulates an
/// infinitely wide initial range with 40-bit numbers.
///
/// Invariant: `0 <= low < high <= MAX_RANGE_WIDTH`, and after every
/// [`normalize`](Self::normalize) the width is at least [`MIN_RANGE_WIDTH`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RangeState {
    pub low: u64,
    pub high: u64,
}

impl RangeState {
    /// The full range selected at the start of a session.
    pub fn full() -> Self {
        Self {
            low: 0,
            high: MAX_RANGE_WIDTH,
        }
    }

    /// Lower bound of the sub-range belonging to `symbol`, within the range
    /// starting at `low` and `range` wide.
    ///
    /// Exact in `u64`: `range < 2^40` and `cdf <= 2^16`, so the product
    /// needs at most 57 bits.
    pub fn symbol_lower_bound<M>(model: &M, low: u64, range: u64, symbol: u32) -> u64
    where
        M: ProbabilityModel + ?Sized,
    {
        ((u64::from(model.cdf_lower_bound(symbol)) * range) >> MAX_SYMBOL_BITS) + low
    }

    /// Narrows the range to `symbol`'s sub-range, then renormalizes.
    pub fn update_range<M>(
        &mut self,
        model: &M,
        symbol: u32,
        add_byte: impl FnMut(&mut Self) -> io::Result<()>,
    ) -> io::Result<()>
    where
        M: ProbabilityModel + ?Sized,
    {
        let range = self.high - self.low;
        let orig_low = self.low;

        self.low = Self::symbol_lower_bound(model, orig_low, range, symbol);
        self.high = Self::symbol_lower_bound(model, orig_low, range, symbol + 1);

        self.normalize(add_byte)
    }

    /// Shifts out every determined byte, then resolves the straddling case.
    ///
    /// If no byte can be shifted but the range is narrower than
    /// [`MIN_RANGE_WIDTH`], the range covers exactly two different high
    /// bytes, and every byte right of the high one is 255 in `low` and 0 in
    /// `high`:
    ///
    /// ```text
    /// high = 124   0   0 |  115  48
    /// low  = 123 255 255 |  255  97
    /// ```
    ///
    /// `border` is the lowest number in the range sharing its high byte with
    /// `high`. Keeping the wider of `[low, border)` / `[border, high)` makes
    /// the high byte unique, so the first loop can run again. This is the
    /// carry-less alternative to carry-propagation bookkeeping, at the cost
    /// of at most one narrowing step per underflow.
    pub fn normalize(
        &mut self,
        mut add_byte: impl FnMut(&mut Self) -> io::Result<()>,
    ) -> io::Result<()> {
        self.shift_out_bytes(&mut add_byte)?;

        if self.high - self.low < MIN_RANGE_WIDTH {
            let border = self.high & (HIGH_BYTE_MASK | MAX_RANGE_WIDTH);

            if border - self.low > self.high - border {
                self.high = border;
            } else {
                self.low = border;
            }

            self.shift_out_bytes(&mut add_byte)?;
        }

        Ok(())
    }

    fn shift_out_bytes(
        &mut self,
        add_byte: &mut impl FnMut(&mut Self) -> io::Result<()>,
    ) -> io::Result<()> {
        while self.low & HIGH_BYTE_MASK == (self.high - 1) & HIGH_BYTE_MASK {
            add_byte(self)?;
        }

        Ok(())
    }

    /// Removes the shared high byte from both bounds, shifting the remaining
    /// width up by one byte, and returns it.
    pub fn pop_high_byte(&mut self) -> u8 {
        let high_byte = self.low & HIGH_BYTE_MASK;

        self.low = (self.low - high_byte) << BITS_IN_BYTE;
        self.high = (self.high - high_byte) << BITS_IN_BYTE;

        #[allow(clippy::cast_possible_truncation)]
        let byte = (high_byte >> ((MAX_RANGE_BYTES - 1) * BITS_IN_BYTE)) as u8;
        byte
    }
}
