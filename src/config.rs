use crate::error::{KMeansError, Result};

/// What the centroid update does with a cluster that received no observations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyClusterPolicy {
    /// Keep the centroid from the previous epoch
    #[default]
    KeepPrevious,
    /// Move the centroid onto a uniformly random observation
    Reseed,
    /// Abort the fit with `KMeansError::EmptyCluster`
    Fail,
}

/// Configuration for the k-means algorithm
#[derive(Debug, Clone)]
pub struct KMeansConfig {
    /// Number of clusters
    pub k: usize,

    /// Number of assignment/update passes. All of them always run.
    pub epochs: usize,

    /// Random seed for centroid initialization (and reseeding, if enabled)
    pub seed: u64,

    /// Handling of clusters left without members after an assignment pass
    pub empty_cluster: EmptyClusterPolicy,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            k: 2,
            epochs: 100,
            seed: 0,
            empty_cluster: EmptyClusterPolicy::KeepPrevious,
        }
    }
}

impl KMeansConfig {
    /// Create a new configuration with the specified number of clusters
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Default::default()
        }
    }

    /// Set the number of epochs
    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the empty-cluster policy
    pub fn with_empty_cluster(mut self, policy: EmptyClusterPolicy) -> Self {
        self.empty_cluster = policy;
        self
    }

    /// Check `1 <= k <= n_observations` and `epochs >= 1`.
    pub fn validate(&self, n_observations: usize) -> Result<()> {
        if self.k == 0 {
            return Err(KMeansError::InvalidConfiguration(
                "k must be greater than 0".to_string(),
            ));
        }

        if self.k > n_observations {
            return Err(KMeansError::InvalidConfiguration(format!(
                "k ({}) is greater than the number of observations ({})",
                self.k, n_observations
            )));
        }

        if self.epochs == 0 {
            return Err(KMeansError::InvalidConfiguration(
                "epochs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
