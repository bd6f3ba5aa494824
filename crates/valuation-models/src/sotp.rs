//! Sum-of-the-parts valuation.

use serde::{Deserialize, Serialize};

use crate::math::finite_or_zero;
use crate::result::{Metric, ValuationResult};

/// A business segment and its standalone value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Segment name.
    pub name: String,
    /// Standalone value.
    pub value: f64,
}

impl Segment {
    /// Creates a segment.
    #[must_use]
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Output of [`sum_of_the_parts`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SotpValuation {
    /// Segments in input order.
    pub segments: Vec<Segment>,
    /// Sum of segment values.
    pub total: f64,
}

/// Adds up segment values, keeping the input order.
#[must_use]
pub fn sum_of_the_parts(segments: &[Segment]) -> SotpValuation {
    SotpValuation {
        segments: segments.to_vec(),
        total: finite_or_zero(segments.iter().map(|s| s.value).sum()),
    }
}

impl From<&SotpValuation> for ValuationResult {
    fn from(v: &SotpValuation) -> Self {
        v.segments
            .iter()
            .map(|s| (Metric::Segment(s.name.clone()), s.value))
            .chain(std::iter::once((Metric::Total, v.total)))
            .collect()
    }
}
