//! Scoring fitted models against ground-truth labels.
//!
//! Cluster indices are arbitrary: nothing ties cluster `0` to label `0`. For
//! two clusters a run that found the right split but numbered it the other
//! way round scores `1 - s` instead of `s`, which is why [`Accuracy`] exposes
//! both readings.

use crate::config::KMeansConfig;
use crate::dataset::Dataset;
use crate::error::{KMeansError, Result};
use crate::kmeans::KMeans;

/// Fraction of observations whose predicted cluster equals the expected label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accuracy {
    pub correct: usize,
    pub total: usize,
}

impl Accuracy {
    /// `correct / total` as a ratio in `[0, 1]`
    pub fn score(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64
    }

    /// Score if the two cluster indices were swapped
    pub fn flipped(&self) -> f64 {
        1.0 - self.score()
    }

    /// The better of the two readings
    pub fn best(&self) -> f64 {
        self.score().max(self.flipped())
    }
}

/// Compare `model.predict` on each observation with its expected label.
///
/// # Errors
///
/// Returns an error if:
/// - `observations` and `labels` differ in length
/// - The model is not fitted, or an observation's dimension does not match
pub fn accuracy(model: &KMeans, observations: &Dataset, labels: &[usize]) -> Result<Accuracy> {
    if observations.len() != labels.len() {
        return Err(KMeansError::InvalidConfiguration(format!(
            "{} observations but {} labels",
            observations.len(),
            labels.len()
        )));
    }

    let mut correct = 0;
    for (obs, &expected) in observations.iter().zip(labels) {
        if model.predict(obs)? == expected {
            correct += 1;
        }
    }

    Ok(Accuracy {
        correct,
        total: labels.len(),
    })
}

/// Outcome of several independently seeded fits on one dataset
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Per-run accuracy, in run order
    pub runs: Vec<Accuracy>,
}

impl RunSummary {
    pub fn mean(&self) -> f64 {
        if self.runs.is_empty() {
            return 0.0;
        }
        self.runs.iter().map(Accuracy::score).sum::<f64>() / self.runs.len() as f64
    }

    pub fn min(&self) -> f64 {
        self.runs
            .iter()
            .map(Accuracy::score)
            .fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.runs
            .iter()
            .map(Accuracy::score)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Mean of [`Accuracy::best`] over all runs
    pub fn mean_best(&self) -> f64 {
        if self.runs.is_empty() {
            return 0.0;
        }
        self.runs.iter().map(Accuracy::best).sum::<f64>() / self.runs.len() as f64
    }
}

/// Fit `runs` models on `dataset` and score each against `labels`.
///
/// Run `i` uses seed `config.seed + i`, so the whole batch is reproducible
/// while each run draws different initial centroids.
pub fn repeat_runs(
    dataset: &Dataset,
    labels: &[usize],
    config: &KMeansConfig,
    runs: usize,
) -> Result<RunSummary> {
    if runs == 0 {
        return Err(KMeansError::InvalidConfiguration(
            "runs must be greater than 0".to_string(),
        ));
    }

    let mut results = Vec::with_capacity(runs);
    for run in 0..runs {
        let seed = config.seed.wrapping_add(run as u64);
        let mut model = KMeans::with_config(config.clone().with_seed(seed));
        model.fit(dataset.clone())?;

        let acc = accuracy(&model, dataset, labels)?;
        tracing::info!(run, seed, score = acc.score(), "run finished");
        results.push(acc);
    }

    Ok(RunSummary { runs: results })
}
