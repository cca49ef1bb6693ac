use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Normal distribution described by its mean and standard deviation
///
/// This is the belief a market (or a trader's position) commits to.
/// Floating point is used for the shape math only; amounts derived from it
/// are converted to fixed-point before they touch a balance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    /// Location of the distribution
    pub mean: f64,
    /// Spread of the distribution, strictly positive when well formed
    pub std_dev: f64,
}

impl Distribution {
    pub fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }

    /// Finite mean and finite, strictly positive standard deviation
    pub fn is_well_formed(&self) -> bool {
        self.mean.is_finite() && self.std_dev.is_finite() && self.std_dev > 0.0
    }

    /// Probability density at `x`
    pub fn pdf(&self, x: f64) -> f64 {
        let z = (x - self.mean) / self.std_dev;
        (-0.5 * z * z).exp() / (self.std_dev * (2.0 * PI).sqrt())
    }

    /// Density at `x` relative to the density at the mean, in (0, 1]
    pub fn relative_likelihood(&self, x: f64) -> f64 {
        let z = (x - self.mean) / self.std_dev;
        (-0.5 * z * z).exp()
    }

    /// Inner product of the two densities after scaling each to unit L2 norm
    ///
    /// Equals 1 exactly for identical distributions and decays towards 0 as
    /// the means separate or the spreads diverge.
    pub fn overlap(&self, other: &Distribution) -> f64 {
        let variance_sum = self.std_dev.powi(2) + other.std_dev.powi(2);
        let shape = (2.0 * self.std_dev * other.std_dev / variance_sum).sqrt();
        let distance = self.mean - other.mean;
        let location = (-(distance * distance) / (2.0 * variance_sum)).exp();
        (shape * location).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed() {
        assert!(Distribution::new(100.0, 10.0).is_well_formed());
        assert!(!Distribution::new(100.0, 0.0).is_well_formed());
        assert!(!Distribution::new(100.0, -1.0).is_well_formed());
        assert!(!Distribution::new(f64::NAN, 1.0).is_well_formed());
        assert!(!Distribution::new(0.0, f64::INFINITY).is_well_formed());
    }

    #[test]
    fn test_pdf_peak() {
        let dist = Distribution::new(0.0, 1.0);
        let expected = 1.0 / (2.0 * PI).sqrt();
        assert!((dist.pdf(0.0) - expected).abs() < 1e-12);
        assert!(dist.pdf(1.0) < dist.pdf(0.0));
    }

    #[test]
    fn test_relative_likelihood() {
        let dist = Distribution::new(105.0, 8.0);
        assert_eq!(dist.relative_likelihood(105.0), 1.0);
        let at_102 = dist.relative_likelihood(102.0);
        assert!((at_102 - 0.9321).abs() < 1e-3);
    }

    #[test]
    fn test_overlap_identity_and_symmetry() {
        let a = Distribution::new(100.0, 10.0);
        let b = Distribution::new(105.0, 8.0);
        assert_eq!(a.overlap(&a), 1.0);
        assert!((a.overlap(&b) - b.overlap(&a)).abs() < 1e-15);
        assert!(a.overlap(&b) < 1.0);
    }

    #[test]
    fn test_overlap_decreases_with_distance() {
        let base = Distribution::new(0.0, 1.0);
        let near = base.overlap(&Distribution::new(0.5, 1.0));
        let far = base.overlap(&Distribution::new(2.0, 1.0));
        let wider = base.overlap(&Distribution::new(0.0, 3.0));
        assert!(near > far);
        assert!(wider < 1.0);
    }
}
