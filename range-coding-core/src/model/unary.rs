use std::sync::{Arc, LazyLock};

use super::{ProbabilityModel, SharedModel};
use crate::MAX_SYMBOL_CDF;

static INSTANCE: LazyLock<SharedModel> = LazyLock::new(|| Arc::new(UnaryProbabilityModel));

/// The trivial single-symbol model.
///
/// Symbol `0` carries the whole probability mass, so encoding it never
/// narrows the range and costs no output bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnaryProbabilityModel;

impl UnaryProbabilityModel {
    /// The process-wide shared instance.
    #[must_use]
    pub fn instance() -> SharedModel {
        Arc::clone(&INSTANCE)
    }
}

impl ProbabilityModel for UnaryProbabilityModel {
    fn symbol_count(&self) -> u32 {
        1
    }

    fn cdf_lower_bound(&self, symbol: u32) -> u32 {
        if symbol == 0 {
            0
        } else {
            MAX_SYMBOL_CDF
        }
    }

    fn symbol_for_cdf(&self, _cdf: u32) -> u32 {
        0
    }
}
