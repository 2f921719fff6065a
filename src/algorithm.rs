use crate::cluster::Cluster;
use crate::config::EmptyClusterPolicy;
use crate::dataset::Dataset;
use crate::distance::euclidean_distance;
use crate::error::{KMeansError, Result};
use crate::vector::Vector;
use rand::Rng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Find the index of the cluster whose centroid is closest to `point`
///
/// Clusters are scanned in order and a candidate replaces the running best only
/// when strictly closer, so the lowest index wins ties. Centroids at a NaN
/// distance never win. Returns `None` when no cluster yields a comparable
/// distance (empty slice or every centroid undefined).
pub fn nearest_cluster(point: &Vector, clusters: &[Cluster]) -> Result<Option<usize>> {
    let mut best: Option<(usize, f64)> = None;

    for (idx, cluster) in clusters.iter().enumerate() {
        let dist = euclidean_distance(point, cluster.centroid())?;

        let closer = match best {
            Some((_, best_dist)) => dist < best_dist,
            None => !dist.is_nan(),
        };
        if closer {
            best = Some((idx, dist));
        }
    }

    Ok(best.map(|(idx, _)| idx))
}

/// Seed `k` clusters from observations drawn uniformly at random
///
/// Draws are with replacement: two clusters may start on the same observation.
pub fn initialize_clusters<R: Rng + ?Sized>(
    dataset: &Dataset,
    k: usize,
    rng: &mut R,
) -> Vec<Cluster> {
    let n_samples = dataset.len();

    let picks: Vec<usize> = (0..k).map(|_| rng.gen_range(0..n_samples)).collect();

    let distinct = {
        let mut sorted = picks.clone();
        sorted.sort_unstable();
        sorted.dedup();
        sorted.len()
    };
    if distinct < k {
        tracing::warn!(
            requested = k,
            distinct,
            "initial centroid draw picked the same observation more than once"
        );
    }
    tracing::debug!(?picks, "seeded initial centroids");

    picks
        .into_iter()
        .map(|idx| Cluster::new(dataset.observations()[idx].clone()))
        .collect()
}

/// Seed clusters from caller-provided centroids
pub fn clusters_from_centroids(dataset: &Dataset, centroids: Vec<Vector>) -> Result<Vec<Cluster>> {
    let dim = dataset.dim();

    centroids
        .into_iter()
        .map(|c| {
            if c.dim() != dim {
                return Err(KMeansError::DimensionMismatch {
                    expected: dim,
                    found: c.dim(),
                });
            }
            Ok(Cluster::new(c))
        })
        .collect()
}

/// Append every observation's index to the membership of its nearest cluster
///
/// Memberships are expected to be empty on entry; afterwards they partition
/// `0..dataset.len()`, each list in ascending observation order.
pub fn assign_observations(dataset: &Dataset, clusters: &mut [Cluster]) -> Result<()> {
    let labels = nearest_labels(dataset, clusters)?;

    for (obs_idx, label) in labels.into_iter().enumerate() {
        let cluster_idx = label.ok_or(KMeansError::EmptyModel)?;
        clusters[cluster_idx].push_member(obs_idx);
    }

    Ok(())
}

#[cfg(not(feature = "parallel"))]
fn nearest_labels(dataset: &Dataset, clusters: &[Cluster]) -> Result<Vec<Option<usize>>> {
    dataset
        .iter()
        .map(|obs| nearest_cluster(obs, clusters))
        .collect()
}

#[cfg(feature = "parallel")]
fn nearest_labels(dataset: &Dataset, clusters: &[Cluster]) -> Result<Vec<Option<usize>>> {
    // Centroids are read-only here; appends happen serially in the caller
    dataset
        .observations()
        .par_iter()
        .map(|obs| nearest_cluster(obs, clusters))
        .collect()
}

/// Recompute every centroid as the coordinatewise mean of its members
///
/// Clusters without members are handled by `policy`. Returns the indices of
/// the clusters that were empty in this pass.
pub fn update_centroids<R: Rng + ?Sized>(
    dataset: &Dataset,
    clusters: &mut [Cluster],
    policy: EmptyClusterPolicy,
    epoch: usize,
    rng: &mut R,
) -> Result<Vec<usize>> {
    let mut empty_clusters = Vec::new();

    for (cluster_idx, cluster) in clusters.iter_mut().enumerate() {
        if cluster.is_empty() {
            empty_clusters.push(cluster_idx);
            continue;
        }

        let mut sum = Vector::zeroed(dataset.dim());
        for &obs_idx in cluster.members() {
            sum.add_assign(&dataset.observations()[obs_idx])?;
        }
        let mean = sum.scale(1.0 / cluster.len() as f64);
        cluster.set_centroid(mean);
    }

    for &cluster_idx in &empty_clusters {
        match policy {
            EmptyClusterPolicy::KeepPrevious => {}
            EmptyClusterPolicy::Reseed => {
                let obs_idx = rng.gen_range(0..dataset.len());
                clusters[cluster_idx].set_centroid(dataset.observations()[obs_idx].clone());
                tracing::warn!(
                    cluster = cluster_idx,
                    observation = obs_idx,
                    epoch,
                    "reseeded empty cluster"
                );
            }
            EmptyClusterPolicy::Fail => {
                return Err(KMeansError::EmptyCluster {
                    cluster: cluster_idx,
                    epoch,
                });
            }
        }
    }

    Ok(empty_clusters)
}

/// Clear every cluster's membership, keeping centroids
pub fn clear_memberships(clusters: &mut [Cluster]) {
    for cluster in clusters.iter_mut() {
        cluster.clear_members();
    }
}
