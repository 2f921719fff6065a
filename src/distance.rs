use crate::error::Result;
use crate::vector::Vector;

/// Squared Euclidean distance between two vectors of equal dimension
#[inline]
pub fn squared_distance(a: &Vector, b: &Vector) -> Result<f64> {
    a.check_dim(b)?;

    let dist = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum();

    Ok(dist)
}

/// Euclidean distance `sqrt(Σ(aᵢ − bᵢ)²)`
///
/// Fails with `DimensionMismatch` when `a` and `b` differ in length.
#[inline]
pub fn euclidean_distance(a: &Vector, b: &Vector) -> Result<f64> {
    squared_distance(a, b).map(f64::sqrt)
}

/// Compute centroid shift (sum of L2 norms of centroid movements)
pub fn compute_centroid_shift(old_centroids: &[Vector], new_centroids: &[Vector]) -> Result<f64> {
    old_centroids
        .iter()
        .zip(new_centroids)
        .map(|(old_c, new_c)| euclidean_distance(old_c, new_c))
        .sum()
}
