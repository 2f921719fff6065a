use crate::error::{KMeansError, Result};
use crate::vector::Vector;
use ndarray::{Array2, ArrayView2};

/// Ordered collection of observations that all share one dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    observations: Vec<Vector>,
    dim: usize,
}

impl Dataset {
    /// Build a dataset from observations.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `observations` is empty
    /// - Any observation's dimension differs from the first one
    pub fn new(observations: Vec<Vector>) -> Result<Self> {
        let dim = observations
            .first()
            .map(Vector::dim)
            .ok_or_else(|| KMeansError::InvalidConfiguration("dataset is empty".to_string()))?;

        if let Some(bad) = observations.iter().find(|o| o.dim() != dim) {
            return Err(KMeansError::DimensionMismatch {
                expected: dim,
                found: bad.dim(),
            });
        }

        Ok(Self { observations, dim })
    }

    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::new(rows.into_iter().map(Vector::from).collect())
    }

    /// Build a dataset from a (n_samples, n_features) array, one observation per row.
    pub fn from_array(data: &ArrayView2<f64>) -> Result<Self> {
        Self::new(data.outer_iter().map(Vector::from).collect())
    }

    /// Copy the observations into a (n_samples, n_features) array.
    pub fn to_array(&self) -> Array2<f64> {
        let mut data = Array2::zeros((self.len(), self.dim));
        for (mut row, obs) in data.outer_iter_mut().zip(&self.observations) {
            row.assign(&obs.view());
        }
        data
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Always false for a constructed dataset; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Dimension shared by every observation.
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn get(&self, index: usize) -> Option<&Vector> {
        self.observations.get(index)
    }

    pub fn observations(&self) -> &[Vector] {
        &self.observations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vector> {
        self.observations.iter()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Vector;
    type IntoIter = std::slice::Iter<'a, Vector>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::euclidean_distance;
    use ndarray::{array, s};

    #[test]
    fn test_dataset_from_rows() {
        let ds = Dataset::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.dim(), 2);
        assert_eq!(ds.get(1).unwrap().as_slice(), &[3.0, 4.0]);
        assert!(ds.get(3).is_none());
    }

    #[test]
    fn test_dataset_rejects_empty() {
        let result = Dataset::new(Vec::new());
        assert!(matches!(result, Err(KMeansError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_dataset_rejects_ragged_rows() {
        let result = Dataset::from_rows(vec![vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(
            result,
            Err(KMeansError::DimensionMismatch {
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_from_array_with_reversed_columns() {
        let data = array![[0.0, 0.0], [4.0, 3.0]];
        let ds = Dataset::from_array(&data.slice(s![.., ..;-1])).unwrap();

        assert_eq!(ds.get(1).unwrap().as_slice(), &[3.0, 4.0]);
        let dist = euclidean_distance(ds.get(0).unwrap(), ds.get(1).unwrap()).unwrap();
        assert_eq!(dist, 5.0);
    }

    #[test]
    fn test_array_interop() {
        let data = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let ds = Dataset::from_array(&data.view()).unwrap();

        assert_eq!(ds.dim(), 3);
        assert_eq!(ds.to_array(), data);
    }
}
