//! # epochkmeans-rs
//!
//! Lloyd k-means clustering with a fixed epoch budget, compatible with ndarray.
//!
//! ## Features
//!
//! - **Fixed epochs**: every fit runs exactly the configured number of
//!   assign-then-update passes, with no early stopping
//! - **Index memberships**: clusters hold indices into the dataset, and the
//!   final epoch's membership is kept for inspection
//! - **Explicit randomness**: initial centroids come from a seeded
//!   `ChaCha8Rng` or any caller-supplied `rand::Rng`
//! - **Defined empty-cluster handling**: see [`EmptyClusterPolicy`]
//! - **CSV loading and scoring**: [`data`] reads observations and labels,
//!   [`report`] scores predictions against them
//! - **Optional parallel assignment**: enable the `parallel` feature
//!
//! ## Example
//!
//! ```rust
//! use epochkmeans_rs::{Dataset, KMeans, KMeansConfig, Vector};
//!
//! let data = Dataset::from_rows(vec![
//!     vec![0.0, 0.0],
//!     vec![0.0, 1.0],
//!     vec![10.0, 10.0],
//!     vec![10.0, 11.0],
//! ])
//! .unwrap();
//!
//! let mut kmeans = KMeans::with_config(KMeansConfig::new(2).with_epochs(2));
//! kmeans
//!     .fit_from_centroids(
//!         data,
//!         vec![Vector::from(vec![0.0, 0.0]), Vector::from(vec![10.0, 10.0])],
//!     )
//!     .unwrap();
//!
//! assert_eq!(kmeans.clusters()[1].centroid().as_slice(), &[10.0, 10.5]);
//! assert_eq!(kmeans.predict(&Vector::from(vec![1.0, 1.0])).unwrap(), 0);
//! ```
//!
//! ## Scoring against labels
//!
//! ```no_run
//! use epochkmeans_rs::{data, report, KMeansConfig};
//!
//! let observations = data::read_csv("breast_data.csv").unwrap();
//! let labels = data::read_labels("breast_truth.csv").unwrap();
//!
//! let config = KMeansConfig::new(2).with_epochs(100).with_seed(42);
//! let summary = report::repeat_runs(&observations, &labels, &config, 10).unwrap();
//! println!("mean accuracy {:.5} (best reading {:.5})", summary.mean(), summary.mean_best());
//! ```

mod algorithm;
mod cluster;
mod config;
mod dataset;
mod distance;
mod error;
mod kmeans;
mod vector;

pub mod data;
pub mod report;

pub use cluster::Cluster;
pub use config::{EmptyClusterPolicy, KMeansConfig};
pub use dataset::Dataset;
pub use distance::{euclidean_distance, squared_distance};
pub use error::{KMeansError, Result};
pub use kmeans::{FitState, KMeans};
pub use vector::Vector;
