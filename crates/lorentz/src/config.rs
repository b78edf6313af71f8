//! Tolerances used by the approximate predicates.

/// Thresholds for approximate comparisons.
///
/// Values are physics-unit dependent (momentum, energy, mass squared), so
/// they are plain configuration rather than numeric constants.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Tolerances {
    /// `is_close`: bound on the summed absolute component difference.
    pub close: f64,
    /// `is_parallel`, `is_antiparallel`, `is_perpendicular`: bound on the
    /// cosine deviation.
    pub parallel: f64,
    /// `is_timelike`, `is_spacelike`: margin on `tau^2`.
    pub timelike: f64,
    /// `is_lightlike`: bound on `|tau^2|`.
    pub lightlike: f64,
}

impl Tolerances {
    pub const DEFAULT: Self = Self {
        close: 1e-3,
        parallel: 1e-5,
        timelike: 0.0,
        lightlike: 1e-5,
    };

    pub fn new() -> Self {
        Self::DEFAULT
    }

    pub fn with_close(mut self, close: f64) -> Self {
        self.close = close;
        self
    }

    pub fn with_parallel(mut self, parallel: f64) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_timelike(mut self, timelike: f64) -> Self {
        self.timelike = timelike;
        self
    }

    pub fn with_lightlike(mut self, lightlike: f64) -> Self {
        self.lightlike = lightlike;
        self
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self::DEFAULT
    }
}
