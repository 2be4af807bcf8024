//! Random sample sets.
//!
//! Each iteration of the plot loop draws a fresh pair of coordinate
//! sequences from the standard normal distribution (mean 0, variance 1).

use crate::error::{Error, Result};
use rand::Rng;
use rand_distr::StandardNormal;
use trueno::Vector;

/// Number of points per sequence in the default sample set.
pub const DEFAULT_SAMPLE_COUNT: usize = 100;

/// Two equal-length coordinate sequences.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    xs: Vec<f32>,
    ys: Vec<f32>,
}

impl SampleSet {
    /// Wrap existing coordinates.
    ///
    /// # Errors
    ///
    /// Returns an error if either sequence is empty or their lengths differ.
    pub fn new(xs: Vec<f32>, ys: Vec<f32>) -> Result<Self> {
        if xs.is_empty() || ys.is_empty() {
            return Err(Error::EmptyData);
        }
        if xs.len() != ys.len() {
            return Err(Error::DataLengthMismatch {
                x_len: xs.len(),
                y_len: ys.len(),
            });
        }
        Ok(Self { xs, ys })
    }

    /// Draw `n` independent standard-normal samples for each axis.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] if `n` is zero.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Result<Self> {
        if n == 0 {
            return Err(Error::EmptyData);
        }

        let xs: Vec<f32> = (0..n).map(|_| rng.sample(StandardNormal)).collect();
        let ys: Vec<f32> = (0..n).map(|_| rng.sample(StandardNormal)).collect();

        Ok(Self { xs, ys })
    }

    /// X coordinates.
    #[must_use]
    pub fn xs(&self) -> &[f32] {
        &self.xs
    }

    /// Y coordinates.
    #[must_use]
    pub fn ys(&self) -> &[f32] {
        &self.ys
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Always false for a constructed set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// `((x_min, x_max), (y_min, y_max))`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] if the reduction fails.
    pub fn extent(&self) -> Result<((f32, f32), (f32, f32))> {
        let x = extent(&self.xs).ok_or(Error::EmptyData)?;
        let y = extent(&self.ys).ok_or(Error::EmptyData)?;
        Ok((x, y))
    }
}

/// Minimum and maximum of a slice using trueno's SIMD reductions.
///
/// Returns `None` for an empty slice.
#[must_use]
pub fn extent(values: &[f32]) -> Option<(f32, f32)> {
    if values.is_empty() {
        return None;
    }

    let vec = Vector::from_vec(values.to_vec());
    let min = vec.min().ok()?;
    let max = vec.max().ok()?;
    Some((min, max))
}
