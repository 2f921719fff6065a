use crate::error::{KMeansError, Result};
use ndarray::{Array1, ArrayView1};

/// A fixed-length sequence of `f64` coordinates.
///
/// Observations and centroids are both plain `Vector`s. The dimension is fixed
/// at construction; every binary operation checks that both operands agree.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    values: Array1<f64>,
}

impl Vector {
    /// All-zero vector of dimension `d`, used as a summation accumulator.
    pub fn zeroed(d: usize) -> Self {
        Self {
            values: Array1::zeros(d),
        }
    }

    /// Number of coordinates.
    pub fn dim(&self) -> usize {
        self.values.len()
    }

    /// Borrow the coordinates as an ndarray view.
    pub fn view(&self) -> ArrayView1<'_, f64> {
        self.values.view()
    }

    /// Coordinates in order.
    pub fn as_slice(&self) -> &[f64] {
        // Every constructor produces standard layout, and ndarray arithmetic
        // on standard-layout operands keeps it
        self.values
            .as_slice()
            .expect("Vector storage is always in standard layout")
    }

    /// Iterate over the coordinates in order.
    pub fn iter(&self) -> impl Iterator<Item = &f64> + '_ {
        self.values.iter()
    }

    /// True if no coordinate is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }

    /// Elementwise sum.
    ///
    /// # Errors
    ///
    /// Returns [`KMeansError::DimensionMismatch`] when the dimensions differ.
    pub fn add(&self, other: &Vector) -> Result<Vector> {
        self.check_dim(other)?;
        Ok(Vector {
            values: &self.values + &other.values,
        })
    }

    /// In-place elementwise sum, same contract as [`Vector::add`].
    pub fn add_assign(&mut self, other: &Vector) -> Result<()> {
        self.check_dim(other)?;
        self.values += &other.values;
        Ok(())
    }

    /// Multiply every coordinate by `s`.
    pub fn scale(&self, s: f64) -> Vector {
        Vector {
            values: &self.values * s,
        }
    }

    pub(crate) fn check_dim(&self, other: &Vector) -> Result<()> {
        if self.dim() != other.dim() {
            return Err(KMeansError::DimensionMismatch {
                expected: self.dim(),
                found: other.dim(),
            });
        }
        Ok(())
    }
}

impl From<Vec<f64>> for Vector {
    fn from(values: Vec<f64>) -> Self {
        Self {
            values: Array1::from(values),
        }
    }
}

impl From<Array1<f64>> for Vector {
    fn from(values: Array1<f64>) -> Self {
        Self::from(values.view())
    }
}

impl From<ArrayView1<'_, f64>> for Vector {
    fn from(values: ArrayView1<'_, f64>) -> Self {
        // Copy in logical order; views may be strided or reversed
        Self {
            values: Array1::from_iter(values.iter().copied()),
        }
    }
}

impl From<&[f64]> for Vector {
    fn from(values: &[f64]) -> Self {
        Self {
            values: Array1::from(values.to_vec()),
        }
    }
}
