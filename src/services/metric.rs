use std::fmt;

/// After-to-before size ratio, in percent.
///
/// Only exists when both sizes are known; see [`CompressionMetric::from_sizes`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionMetric {
    ratio: f64,
}

/// Whole-percent change of the after image relative to the before image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeChange {
    Larger(u64),
    Smaller(u64),
}

impl CompressionMetric {
    /// Derive the metric from the two slot sizes.
    ///
    /// Returns `None` while either size is zero (or otherwise not positive).
    pub fn from_sizes(before_kb: f64, after_kb: f64) -> Option<Self> {
        if before_kb > 0.0 && after_kb > 0.0 {
            Some(Self {
                ratio: after_kb / before_kb * 100.0,
            })
        } else {
            None
        }
    }

    /// `after / before * 100`
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn classification(&self) -> SizeChange {
        if self.ratio > 100.0 {
            SizeChange::Larger((self.ratio - 100.0).round() as u64)
        } else {
            SizeChange::Smaller((100.0 - self.ratio).round() as u64)
        }
    }
}

impl fmt::Display for SizeChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeChange::Larger(pct) => write!(f, "{}% larger", pct),
            SizeChange::Smaller(pct) => write!(f, "{}% smaller", pct),
        }
    }
}

impl fmt::Display for CompressionMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.classification().fmt(f)
    }
}
