use approx::assert_relative_eq;
use epochkmeans_rs::{
    data, report, Dataset, EmptyClusterPolicy, FitState, KMeans, KMeansConfig, KMeansError,
    Vector,
};
use ndarray::{Array2, Axis};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;
use std::io::Write;

/// Random observations in [-1, 1)^n_features
fn random_dataset(n_samples: usize, n_features: usize, seed: u64) -> Dataset {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let data = Array2::random_using((n_samples, n_features), Uniform::new(-1.0f64, 1.0), &mut rng);
    Dataset::from_array(&data.view()).unwrap()
}

/// Generate well-separated clusters around known centers, returning data and labels
fn generate_clustered_data(
    n_samples: usize,
    n_features: usize,
    n_clusters: usize,
    seed: u64,
) -> (Dataset, Vec<usize>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    // Centers are spaced far apart along the first axis
    let noise = Array2::random_using((n_samples, n_features), Uniform::new(-0.5f64, 0.5), &mut rng);

    let mut data = Array2::zeros((n_samples, n_features));
    let mut labels = Vec::with_capacity(n_samples);
    for i in 0..n_samples {
        let cluster_idx = i % n_clusters;
        for j in 0..n_features {
            let center = if j == 0 { cluster_idx as f64 * 50.0 } else { 0.0 };
            data[[i, j]] = center + noise[[i, j]];
        }
        labels.push(cluster_idx);
    }

    (Dataset::from_array(&data.view()).unwrap(), labels)
}

fn centroid_rows(kmeans: &KMeans) -> Vec<Vec<f64>> {
    kmeans
        .clusters()
        .iter()
        .map(|c| c.centroid().as_slice().to_vec())
        .collect()
}

// ============================================================================
// Basic Functionality Tests
// ============================================================================

#[test]
fn test_basic_fit() {
    let data = random_dataset(500, 16, 1);
    let mut kmeans = KMeans::with_config(KMeansConfig::new(5).with_epochs(10));

    let result = kmeans.fit(data);
    assert!(result.is_ok(), "Fit should succeed");
    assert_eq!(kmeans.state(), FitState::Fitted);

    let centroids = kmeans.centroids().unwrap();
    assert_eq!(centroids.nrows(), 5, "Should have k centroids");
    assert_eq!(centroids.ncols(), 16, "Centroids should have correct dimensions");
}

#[test]
fn test_basic_predict() {
    let train = random_dataset(300, 8, 2);
    let test = random_dataset(50, 8, 3);

    let mut kmeans = KMeans::with_config(KMeansConfig::new(4).with_epochs(10));
    kmeans.fit(train).unwrap();

    let labels = kmeans.predict_batch(test.observations()).unwrap();
    assert_eq!(labels.len(), 50, "Should have one label per sample");
    assert!(labels.iter().all(|&l| l < 4), "Labels should be in range [0, k)");
}

// ============================================================================
// Partition and Mean Properties
// ============================================================================

#[test]
fn test_final_membership_is_partition() {
    let data = random_dataset(400, 4, 4);
    let n = data.len();

    let mut kmeans = KMeans::with_config(KMeansConfig::new(6).with_epochs(7).with_seed(5));
    kmeans.fit(data).unwrap();

    let total: usize = kmeans.clusters().iter().map(|c| c.len()).sum();
    assert_eq!(total, n, "Every observation should be in exactly one cluster");

    let mut seen = HashSet::new();
    for cluster in kmeans.clusters() {
        for &idx in cluster.members() {
            assert!(seen.insert(idx), "Observation {} assigned twice", idx);
        }
    }
    assert_eq!(seen.len(), n);
}

#[test]
fn test_centroid_is_mean_of_final_members() {
    let data = random_dataset(200, 3, 6);
    let mut kmeans = KMeans::with_config(KMeansConfig::new(3).with_epochs(4).with_seed(8));
    kmeans.fit(data).unwrap();

    let dataset = kmeans.dataset().unwrap();
    for cluster in kmeans.clusters().iter().filter(|c| !c.is_empty()) {
        let mut mean = vec![0.0; dataset.dim()];
        for &idx in cluster.members() {
            for (m, v) in mean.iter_mut().zip(dataset.get(idx).unwrap().as_slice()) {
                *m += v;
            }
        }
        for (m, c) in mean.iter().zip(cluster.centroid().as_slice()) {
            assert_relative_eq!(m / cluster.len() as f64, *c, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_k_equals_one() {
    let data = random_dataset(100, 8, 7);
    let data_mean = data.to_array().mean_axis(Axis(0)).unwrap();

    let mut one_epoch = KMeans::with_config(KMeansConfig::new(1).with_epochs(1));
    one_epoch.fit(data.clone()).unwrap();

    let mut many_epochs = KMeans::with_config(KMeansConfig::new(1).with_epochs(20));
    let labels = many_epochs.fit_predict(data).unwrap();

    assert!(labels.iter().all(|&l| l == 0), "All points should be in cluster 0 when k=1");

    let first = one_epoch.clusters()[0].centroid().as_slice();
    let last = many_epochs.clusters()[0].centroid().as_slice();
    for j in 0..data_mean.len() {
        assert_relative_eq!(first[j], data_mean[j], epsilon = 1e-9);
        assert_relative_eq!(last[j], first[j], epsilon = 1e-12);
    }
}

#[test]
fn test_k_equals_n_samples() {
    let data = random_dataset(10, 4, 9);
    let mut kmeans = KMeans::with_config(KMeansConfig::new(10).with_epochs(5));

    kmeans.fit(data).unwrap();

    let total: usize = kmeans.clusters().iter().map(|c| c.len()).sum();
    assert_eq!(total, 10);
}

// ============================================================================
// Worked Scenarios
// ============================================================================

#[test]
fn test_two_group_scenario() {
    let data = Dataset::from_rows(vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![10.0, 10.0],
        vec![10.0, 11.0],
    ])
    .unwrap();

    let mut kmeans = KMeans::with_config(KMeansConfig::new(2).with_epochs(5));
    kmeans
        .fit_from_centroids(
            data,
            vec![Vector::from(vec![0.0, 0.0]), Vector::from(vec![10.0, 10.0])],
        )
        .unwrap();

    assert_eq!(centroid_rows(&kmeans), vec![vec![0.0, 0.5], vec![10.0, 10.5]]);
    assert_eq!(kmeans.clusters()[0].members(), &[0, 1]);
    assert_eq!(kmeans.clusters()[1].members(), &[2, 3]);
    assert_eq!(kmeans.predict(&Vector::from(vec![1.0, 1.0])).unwrap(), 0);
}

#[test]
fn test_identical_points() {
    let data = Dataset::from_rows(vec![vec![2.0, -3.0]; 6]).unwrap();

    let mut kmeans = KMeans::with_config(KMeansConfig::new(2).with_epochs(3).with_seed(4));
    kmeans.fit(data).unwrap();

    // Both draws land on the same point, so the first cluster wins every tie
    for cluster in kmeans.clusters() {
        assert_eq!(cluster.centroid().as_slice(), &[2.0, -3.0]);
    }
    assert_eq!(kmeans.clusters()[0].len(), 6);
    assert!(kmeans.clusters()[1].is_empty());
}

#[test]
fn test_separated_clusters_recovered() {
    let (data, labels) = generate_clustered_data(200, 4, 2, 42);
    let config = KMeansConfig::new(2).with_epochs(10).with_seed(100);

    let summary = report::repeat_runs(&data, &labels, &config, 16).unwrap();

    // Any run seeded with one centroid per blob splits them perfectly
    assert_relative_eq!(
        summary.runs.iter().map(|a| a.best()).fold(0.0, f64::max),
        1.0
    );
}

#[test]
fn test_reseed_policy_keeps_centroids_defined() {
    let (data, _) = generate_clustered_data(90, 2, 3, 3);
    let config = KMeansConfig::new(8)
        .with_epochs(15)
        .with_seed(1)
        .with_empty_cluster(EmptyClusterPolicy::Reseed);

    let mut kmeans = KMeans::with_config(config);
    kmeans.fit(data).unwrap();

    assert!(kmeans.clusters().iter().all(|c| c.centroid().is_finite()));
}

// ============================================================================
// Determinism Tests
// ============================================================================

#[test]
fn test_reproducibility_with_seed() {
    let data = random_dataset(500, 32, 10);
    let probe = random_dataset(20, 32, 11);

    let mut kmeans1 = KMeans::with_config(KMeansConfig::new(5).with_epochs(25).with_seed(12345));
    let mut kmeans2 = KMeans::with_config(KMeansConfig::new(5).with_epochs(25).with_seed(12345));

    kmeans1.fit(data.clone()).unwrap();
    kmeans2.fit(data).unwrap();

    assert_eq!(kmeans1.centroids(), kmeans2.centroids());
    assert_eq!(
        kmeans1.predict_batch(probe.observations()).unwrap(),
        kmeans2.predict_batch(probe.observations()).unwrap()
    );
}

#[test]
fn test_fit_with_rng_matches_seeded_fit() {
    let data = random_dataset(100, 4, 13);

    let mut seeded = KMeans::with_config(KMeansConfig::new(3).with_epochs(5).with_seed(77));
    seeded.fit(data.clone()).unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(77);
    let mut explicit = KMeans::with_config(KMeansConfig::new(3).with_epochs(5));
    explicit.fit_with_rng(data, &mut rng).unwrap();

    assert_eq!(seeded.centroids(), explicit.centroids());
}

#[test]
fn test_different_seeds_produce_different_results() {
    let data = random_dataset(500, 32, 14);

    let mut kmeans1 = KMeans::with_config(KMeansConfig::new(5).with_epochs(10).with_seed(1));
    let mut kmeans2 = KMeans::with_config(KMeansConfig::new(5).with_epochs(10).with_seed(99999));

    kmeans1.fit(data.clone()).unwrap();
    kmeans2.fit(data).unwrap();

    assert_ne!(
        kmeans1.centroids(),
        kmeans2.centroids(),
        "Different seeds should produce different results"
    );
}

// ============================================================================
// Error Tests
// ============================================================================

#[test]
fn test_insufficient_data_for_k() {
    let data = random_dataset(5, 8, 15);
    let mut kmeans = KMeans::new(10);

    let result = kmeans.fit(data);
    assert!(matches!(result, Err(KMeansError::InvalidConfiguration(_))));
}

#[test]
fn test_predict_before_fit_fails() {
    let kmeans = KMeans::new(3);

    match kmeans.predict(&Vector::from(vec![0.0; 4])) {
        Err(KMeansError::EmptyModel) => {}
        other => panic!("Expected EmptyModel error, got {:?}", other),
    }
}

#[test]
fn test_dimension_mismatch_predict() {
    let mut kmeans = KMeans::new(3);
    kmeans.fit(random_dataset(50, 8, 16)).unwrap();

    let result = kmeans.predict(&Vector::from(vec![0.0; 16]));
    assert!(matches!(
        result,
        Err(KMeansError::DimensionMismatch {
            expected: 8,
            found: 16
        })
    ));
}

// ============================================================================
// CSV End-to-End
// ============================================================================

#[test]
fn test_csv_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = dir.path().join("data.csv");
    let truth_path = dir.path().join("truth.csv");

    let mut data_file = std::fs::File::create(&data_path).unwrap();
    let mut truth_file = std::fs::File::create(&truth_path).unwrap();
    for i in 0..20 {
        let (x, label) = if i % 2 == 0 { (0.0, 0) } else { (100.0, 1) };
        writeln!(data_file, "{},{}", x + i as f64 * 0.01, x).unwrap();
        writeln!(truth_file, "{}", label).unwrap();
    }
    drop(data_file);
    drop(truth_file);

    let observations = data::read_csv(&data_path).unwrap();
    let labels = data::read_labels(&truth_path).unwrap();
    assert_eq!(observations.len(), 20);
    assert_eq!(labels.len(), 20);

    let mut kmeans = KMeans::with_config(KMeansConfig::new(2).with_epochs(5));
    kmeans
        .fit_from_centroids(
            observations.clone(),
            vec![
                observations.get(0).unwrap().clone(),
                observations.get(1).unwrap().clone(),
            ],
        )
        .unwrap();

    let acc = report::accuracy(&kmeans, &observations, &labels).unwrap();
    assert_eq!(acc.correct, 20);
    assert_relative_eq!(acc.score(), 1.0);
}
