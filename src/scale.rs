//! Scale functions for data-to-pixel mappings.
//!
//! Scales transform data values to screen positions. Based on the Grammar of
//! Graphics [Wilkinson 2005].

use crate::error::{Error, Result};

/// Fraction of the data span added on each side when autoscaling.
pub const DEFAULT_MARGIN: f32 = 0.05;

/// Relative slack for float rounding in tick placement.
const TICK_TOLERANCE: f32 = 1e-4;

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// Linear scale for continuous-to-continuous mapping.
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    domain_min: f32,
    domain_max: f32,
    range_min: f32,
    range_max: f32,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Errors
    ///
    /// Returns an error if domain_min equals domain_max or either bound is
    /// not finite.
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Result<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(Error::ScaleDomain(format!(
                "Domain must be finite, got ({}, {})",
                domain.0, domain.1
            )));
        }
        if (domain.0 - domain.1).abs() < f32::EPSILON {
            return Err(Error::ScaleDomain("Domain min and max cannot be equal".to_string()));
        }

        Ok(Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
        })
    }

    /// Create a scale whose domain is widened by `margin * span` on each side.
    ///
    /// A degenerate domain (all values equal) is widened to `value ± 0.5`
    /// so that a single point still lands in the middle of the range.
    ///
    /// # Errors
    ///
    /// Returns an error if the domain is not finite.
    pub fn padded(domain: (f32, f32), range: (f32, f32), margin: f32) -> Result<Self> {
        let (lo, hi) = if domain.0 <= domain.1 { domain } else { (domain.1, domain.0) };
        let span = hi - lo;

        if span.abs() < f32::EPSILON {
            return Self::new((lo - 0.5, hi + 0.5), range);
        }

        let pad = span * margin.max(0.0);
        Self::new((lo - pad, hi + pad), range)
    }
}

impl Scale<f32, f32> for LinearScale {
    fn scale(&self, value: f32) -> f32 {
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_min + t * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }
}

/// Tick positions at a "nice" step (1, 2, 2.5 or 5 times a power of ten).
///
/// Returns ticks inside `[min, max]`, aiming for about `target` of them.
#[must_use]
pub fn nice_ticks(min: f32, max: f32, target: usize) -> Vec<f32> {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    let span = hi - lo;
    if !span.is_finite() || span <= 0.0 || target == 0 {
        return Vec::new();
    }

    let raw = span / target as f32;
    let magnitude = 10f32.powf(raw.log10().floor());
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw * (1.0 - TICK_TOLERANCE))
        .unwrap_or(10.0 * magnitude);

    let first = (lo / step - TICK_TOLERANCE).ceil() as i64;
    let last = (hi / step + TICK_TOLERANCE).floor() as i64;

    (first..=last).map(|i| i as f32 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_scale() {
        let scale = LinearScale::new((0.0, 100.0), (0.0, 1.0)).expect("operation should succeed");
        assert_relative_eq!(scale.scale(0.0), 0.0);
        assert_relative_eq!(scale.scale(50.0), 0.5);
        assert_relative_eq!(scale.scale(100.0), 1.0);
    }

    #[test]
    fn test_linear_scale_inverted_range() {
        // Screen y grows downward
        let scale = LinearScale::new((-1.0, 1.0), (400.0, 0.0)).expect("operation should succeed");
        assert_relative_eq!(scale.scale(-1.0), 400.0);
        assert_relative_eq!(scale.scale(1.0), 0.0);
    }

    #[test]
    fn test_linear_scale_equal_domain_error() {
        assert!(LinearScale::new((5.0, 5.0), (0.0, 1.0)).is_err());
    }

    #[test]
    fn test_linear_scale_non_finite_error() {
        assert!(LinearScale::new((f32::NAN, 1.0), (0.0, 1.0)).is_err());
        assert!(LinearScale::new((0.0, f32::INFINITY), (0.0, 1.0)).is_err());
    }

    #[test]
    fn test_padded_adds_margin() {
        let scale = LinearScale::padded((0.0, 10.0), (0.0, 100.0), DEFAULT_MARGIN)
            .expect("operation should succeed");
        let (lo, hi) = scale.domain();
        assert_relative_eq!(lo, -0.5);
        assert_relative_eq!(hi, 10.5);
        // Data min is no longer on the range edge
        assert!(scale.scale(0.0) > 0.0);
        assert!(scale.scale(10.0) < 100.0);
    }

    #[test]
    fn test_padded_degenerate_domain() {
        let scale =
            LinearScale::padded((3.0, 3.0), (0.0, 100.0), DEFAULT_MARGIN).expect("operation should succeed");
        assert_relative_eq!(scale.scale(3.0), 50.0);
    }

    #[test]
    fn test_padded_reversed_domain() {
        let scale =
            LinearScale::padded((10.0, 0.0), (0.0, 1.0), 0.0).expect("operation should succeed");
        assert_eq!(scale.domain(), (0.0, 10.0));
    }

    #[test]
    fn test_nice_ticks_unit_range() {
        let ticks = nice_ticks(-2.3, 2.7, 5);
        assert_eq!(ticks, vec![-2.0, -1.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_nice_ticks_fractional_step() {
        let ticks = nice_ticks(0.0, 1.0, 4);
        assert_eq!(ticks.len(), 5);
        assert_relative_eq!(ticks[1], 0.25);
    }

    #[test]
    fn test_nice_ticks_degenerate() {
        assert!(nice_ticks(1.0, 1.0, 5).is_empty());
        assert!(nice_ticks(0.0, 1.0, 0).is_empty());
        assert!(nice_ticks(f32::NAN, 1.0, 5).is_empty());
    }
}
