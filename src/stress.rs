//! Stress Regime Model
//!
//! Converts a historical series of systemic stress observations (e.g. a
//! supply chain stress index) into scenario multipliers via percentile
//! thresholds:
//!   - low:    observations <= P33
//!   - medium: P33 < observations < P66
//!   - high:   observations >= P66
//! The multiplier for a regime is the mean observation inside it.
//!
//! The model is built once by the caller and passed explicitly into the
//! estimator; there is no process-wide singleton. Unknown scenario labels
//! resolve to a neutral 1.0 by design.

/// Scenario labels in increasing stress order.
pub const STRESS_LEVELS: [&str; 3] = ["low", "medium", "high"];

pub const LOW_PERCENTILE: f64 = 33.0;
pub const HIGH_PERCENTILE: f64 = 66.0;

/// Multiplier used when a scenario label is not recognized.
pub const NEUTRAL_MULTIPLIER: f64 = 1.0;

/// Fallback series used when no usable observations are supplied.
const FALLBACK_OBSERVATIONS: [f64; 3] = [0.5, 1.0, 1.5];

/// Maps a scenario label to a propagation multiplier.
///
/// Implementations must be pure and must resolve unknown labels to a
/// defined fallback rather than failing.
pub trait StressProvider {
    fn multiplier(&self, scenario: &str) -> f64;
}

/// Percentile thresholds computed from the observation series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StressThresholds {
    pub p33: f64,
    pub p66: f64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

#[derive(Debug, Clone)]
pub struct StressModel {
    observations: usize,
    thresholds: StressThresholds,
    mult_low: f64,
    mult_medium: f64,
    mult_high: f64,
}

impl StressModel {
    /// Builds the model from raw stress observations.
    ///
    /// NaN entries are dropped. An empty (or all-NaN) series falls back
    /// to a default three-point series yielding multipliers 0.5/1.0/1.5.
    pub fn from_observations(values: &[f64]) -> Self {
        let mut clean: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        if clean.is_empty() {
            clean = FALLBACK_OBSERVATIONS.to_vec();
        }

        let mut sorted = clean.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());

        let p33 = percentile(&sorted, LOW_PERCENTILE);
        let p66 = percentile(&sorted, HIGH_PERCENTILE);
        let mean = clean.iter().sum::<f64>() / clean.len() as f64;

        let thresholds = StressThresholds {
            p33,
            p66,
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            mean,
        };

        let mult_low = regime_mean(&clean, |v| v <= p33).unwrap_or(0.5);
        let mult_medium = regime_mean(&clean, |v| v > p33 && v < p66).unwrap_or(1.0);
        let mult_high = regime_mean(&clean, |v| v >= p66).unwrap_or(1.5);

        Self {
            observations: clean.len(),
            thresholds,
            mult_low,
            mult_medium,
            mult_high,
        }
    }

    pub fn observations(&self) -> usize {
        self.observations
    }

    pub fn thresholds(&self) -> StressThresholds {
        self.thresholds
    }
}

impl Default for StressModel {
    fn default() -> Self {
        Self::from_observations(&[])
    }
}

impl StressProvider for StressModel {
    fn multiplier(&self, scenario: &str) -> f64 {
        match scenario.to_ascii_lowercase().as_str() {
            "low" => self.mult_low,
            "medium" => self.mult_medium,
            "high" => self.mult_high,
            _ => NEUTRAL_MULTIPLIER,
        }
    }
}

fn regime_mean(values: &[f64], keep: impl Fn(f64) -> bool) -> Option<f64> {
    let regime: Vec<f64> = values.iter().copied().filter(|&v| keep(v)).collect();
    if regime.is_empty() {
        None
    } else {
        Some(regime.iter().sum::<f64>() / regime.len() as f64)
    }
}

/// Linear-interpolation percentile over an ascending-sorted slice.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}
