use crate::algorithm::{
    assign_observations, clear_memberships, clusters_from_centroids, initialize_clusters,
    nearest_cluster, update_centroids,
};
use crate::cluster::Cluster;
use crate::config::KMeansConfig;
use crate::dataset::Dataset;
use crate::distance::compute_centroid_shift;
use crate::error::{KMeansError, Result};
use crate::vector::Vector;
use ndarray::Array2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

/// Lifecycle of a [`KMeans`] engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitState {
    /// No dataset or clusters yet (also the state after a failed fit)
    Uninitialized,
    /// Centroids seeded, no epoch run yet.
    ///
    /// Transient: `fit` moves on to the first epoch before returning, so this
    /// state is never visible through [`KMeans::state`] between calls.
    Initialized,
    /// Running the given 1-based epoch
    Iterating { epoch: usize },
    /// All epochs completed
    Fitted,
}

/// Lloyd k-means with a fixed epoch budget.
///
/// Each epoch assigns every observation to its nearest centroid and then moves
/// each centroid to the mean of its members. There is no convergence check:
/// exactly `config.epochs` epochs run. Membership of the final epoch is kept
/// for inspection through [`KMeans::clusters`].
///
/// # Example
///
/// ```
/// use epochkmeans_rs::{Dataset, KMeans, KMeansConfig, Vector};
///
/// let data = Dataset::from_rows(vec![
///     vec![0.0, 0.0],
///     vec![0.0, 1.0],
///     vec![10.0, 10.0],
///     vec![10.0, 11.0],
/// ])
/// .unwrap();
///
/// let mut kmeans = KMeans::with_config(KMeansConfig::new(2).with_epochs(10).with_seed(1));
/// kmeans.fit(data).unwrap();
///
/// let label = kmeans.predict(&Vector::from(vec![0.5, 0.5])).unwrap();
/// assert!(label < 2);
/// ```
#[derive(Debug, Clone)]
pub struct KMeans {
    /// Model configuration
    config: KMeansConfig,

    /// Dataset of the last successful fit
    dataset: Option<Dataset>,

    /// Fitted clusters (empty until fitted)
    clusters: Vec<Cluster>,

    state: FitState,
}

impl KMeans {
    /// Create an engine for `k` clusters with the default configuration.
    pub fn new(k: usize) -> Self {
        Self::with_config(KMeansConfig::new(k))
    }

    /// Create an engine with a custom configuration.
    ///
    /// The configuration is validated when `fit` is called.
    pub fn with_config(config: KMeansConfig) -> Self {
        Self {
            config,
            dataset: None,
            clusters: Vec::new(),
            state: FitState::Uninitialized,
        }
    }

    /// Fit the model, seeding initial centroids from `config.seed`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `k` is 0 or larger than the dataset, or `epochs` is 0
    /// - A cluster empties under `EmptyClusterPolicy::Fail`
    pub fn fit(&mut self, dataset: Dataset) -> Result<&mut Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.fit_with_rng(dataset, &mut rng)
    }

    /// Fit the model, drawing initial centroids from `rng`.
    pub fn fit_with_rng<R: Rng + ?Sized>(
        &mut self,
        dataset: Dataset,
        rng: &mut R,
    ) -> Result<&mut Self> {
        self.config.validate(dataset.len())?;

        let clusters = initialize_clusters(&dataset, self.config.k, rng);
        self.run(dataset, clusters, rng)
    }

    /// Fit the model starting from the given centroids instead of a random draw.
    ///
    /// `centroids.len()` must equal `k`. The seeded RNG is still used when
    /// `EmptyClusterPolicy::Reseed` is configured.
    pub fn fit_from_centroids(
        &mut self,
        dataset: Dataset,
        centroids: Vec<Vector>,
    ) -> Result<&mut Self> {
        self.config.validate(dataset.len())?;

        if centroids.len() != self.config.k {
            return Err(KMeansError::InvalidConfiguration(format!(
                "expected {} initial centroids, got {}",
                self.config.k,
                centroids.len()
            )));
        }

        let clusters = clusters_from_centroids(&dataset, centroids)?;
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.run(dataset, clusters, &mut rng)
    }

    fn run<R: Rng + ?Sized>(
        &mut self,
        dataset: Dataset,
        clusters: Vec<Cluster>,
        rng: &mut R,
    ) -> Result<&mut Self> {
        self.dataset = None;
        self.clusters = clusters;
        self.state = FitState::Initialized;

        match self.run_epochs(&dataset, rng) {
            Ok(()) => {
                self.dataset = Some(dataset);
                self.state = FitState::Fitted;
                Ok(self)
            }
            Err(err) => {
                self.clusters.clear();
                self.state = FitState::Uninitialized;
                Err(err)
            }
        }
    }

    fn run_epochs<R: Rng + ?Sized>(&mut self, dataset: &Dataset, rng: &mut R) -> Result<()> {
        let epochs = self.config.epochs;
        let start = Instant::now();

        tracing::info!(
            n_samples = dataset.len(),
            n_features = dataset.dim(),
            k = self.config.k,
            epochs,
            "training k-means"
        );

        for epoch in 1..=epochs {
            let epoch_start = Instant::now();
            self.state = FitState::Iterating { epoch };

            let prev_centroids: Vec<Vector> =
                self.clusters.iter().map(|c| c.centroid().clone()).collect();

            assign_observations(dataset, &mut self.clusters)?;
            let empty_clusters = update_centroids(
                dataset,
                &mut self.clusters,
                self.config.empty_cluster,
                epoch,
                rng,
            )?;

            let new_centroids: Vec<Vector> =
                self.clusters.iter().map(|c| c.centroid().clone()).collect();
            let shift = compute_centroid_shift(&prev_centroids, &new_centroids)?;

            tracing::debug!(
                epoch,
                epochs,
                shift,
                empty = empty_clusters.len(),
                elapsed_s = epoch_start.elapsed().as_secs_f64(),
                "epoch complete"
            );

            // Membership of the last epoch is kept for inspection
            if epoch != epochs {
                clear_memberships(&mut self.clusters);
            }
        }

        tracing::info!(
            epochs,
            elapsed_s = start.elapsed().as_secs_f64(),
            "k-means training finished"
        );

        Ok(())
    }

    /// Index of the fitted cluster nearest to `point`.
    ///
    /// Ties go to the lowest cluster index.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The model has not been fitted, or no centroid is usable
    /// - `point` has a different dimension than the training data
    pub fn predict(&self, point: &Vector) -> Result<usize> {
        let dataset = match (&self.dataset, self.state) {
            (Some(dataset), FitState::Fitted) => dataset,
            _ => return Err(KMeansError::EmptyModel),
        };

        if point.dim() != dataset.dim() {
            return Err(KMeansError::DimensionMismatch {
                expected: dataset.dim(),
                found: point.dim(),
            });
        }

        nearest_cluster(point, &self.clusters)?.ok_or(KMeansError::EmptyModel)
    }

    /// Predict a cluster index for each point.
    pub fn predict_batch(&self, points: &[Vector]) -> Result<Vec<usize>> {
        points.iter().map(|p| self.predict(p)).collect()
    }

    /// Fit the model and predict cluster indices for its own observations.
    pub fn fit_predict(&mut self, dataset: Dataset) -> Result<Vec<usize>> {
        self.fit(dataset)?;

        let dataset = self.dataset.as_ref().ok_or(KMeansError::EmptyModel)?;
        self.predict_batch(dataset.observations())
    }

    /// Cluster index of each training observation from the final epoch's membership.
    ///
    /// Returns `None` if the model has not been fitted.
    pub fn labels(&self) -> Option<Vec<usize>> {
        let dataset = self.dataset.as_ref()?;

        let mut labels = vec![0; dataset.len()];
        for (cluster_idx, cluster) in self.clusters.iter().enumerate() {
            for &obs_idx in cluster.members() {
                labels[obs_idx] = cluster_idx;
            }
        }
        Some(labels)
    }

    /// Fitted clusters, centroids plus last-epoch membership.
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Get the centroids as a (k, n_features) array.
    ///
    /// Returns `None` if the model has not been fitted.
    pub fn centroids(&self) -> Option<Array2<f64>> {
        let dataset = self.dataset.as_ref()?;

        let mut centroids = Array2::zeros((self.clusters.len(), dataset.dim()));
        for (mut row, cluster) in centroids.outer_iter_mut().zip(&self.clusters) {
            row.assign(&cluster.centroid().view());
        }
        Some(centroids)
    }

    /// Dataset the model was fitted on.
    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn state(&self) -> FitState {
        self.state
    }

    /// Get the number of clusters.
    pub fn k(&self) -> usize {
        self.config.k
    }

    /// Get the configuration.
    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }
}
