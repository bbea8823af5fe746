//! Operational Fragility Simulation Library
//!
//! Estimates how much damage propagates through a directed dependency
//! graph of operational assets when a given asset fails, under varying
//! systemic stress regimes.
//!
//! ## Modules
//!
//! - `graph`: directed asset graph with weighted dependency edges
//! - `stress`: percentile-based stress regime multipliers
//! - `cascade`: single stochastic failure cascade (BFS propagation)
//! - `fragility`: Monte Carlo Fragility Index estimation, per node and batch
//! - `convergence`: estimator stability across sample sizes
//! - `synthetic`: seeded random network generation for reports and tests
//!
//! ## Usage
//!
//! ```bash
//! # Full scenario sweep plus convergence test
//! cargo run --bin pipeline --release
//!
//! # Structural and statistical sanity checks
//! cargo run --bin diagnostics --release
//! ```

pub mod cascade;
pub mod convergence;
pub mod error;
pub mod fragility;
pub mod graph;
pub mod stress;
pub mod synthetic;

pub use error::{FragilityError, Result};

/// Rounds to `places` decimal places; fragility records fix their field
/// precision with this so snapshot comparisons stay stable.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::round_to;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.23456789, 4), 1.2346);
        assert_eq!(round_to(0.123456789, 6), 0.123457);
        assert_eq!(round_to(2.0, 4), 2.0);
    }
}
