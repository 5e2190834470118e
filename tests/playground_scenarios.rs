use ml_playground::anomaly::{AnomalyAction, AnomalyState};
use ml_playground::classification::{LogisticAction, LogisticState, ModelWeights};
use ml_playground::clustering::{KMeansAction, KMeansState};
use ml_playground::datasets::{self, Category};
use ml_playground::{PlaygroundConfig, Point2D};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn test_customer_segments_converge() {
    let dataset = datasets::by_id("customers").unwrap();
    let mut rng = StdRng::seed_from_u64(2024);
    let mut state = KMeansState::new(3)
        .apply(KMeansAction::LoadDataset(dataset.points()), &mut rng)
        .apply(KMeansAction::Initialize, &mut rng);

    let mut steps = 0;
    while !state.converged && steps < 50 {
        state = state.apply(KMeansAction::Step, &mut rng);
        steps += 1;
    }
    assert!(state.converged, "k-means did not converge within 50 steps");
    assert!(state.points.iter().all(|p| p.cluster.is_some()));
    assert!(state.inertia() > 0.0);
}

#[test]
fn test_two_far_clusters_converge_quickly() {
    let mut points = Vec::new();
    for i in 0..10 {
        let jitter = i as f64 * 0.01;
        points.push(Point2D::new(1.0 + jitter, 1.0 - jitter));
        points.push(Point2D::new(9.0 - jitter, 9.0 + jitter));
    }
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let state = KMeansState::new(2).with_points(points.clone()).run_to_convergence(20, &mut rng);
        assert!(state.converged, "seed {} did not converge", seed);
    }
}

#[test]
fn test_credit_dataset_is_learnable() {
    let dataset = datasets::by_id("credit").unwrap();
    let state = LogisticState::new(0.1, 500)
        .apply(LogisticAction::LoadDataset(dataset.labeled_points()))
        .apply(LogisticAction::Train);
    assert!(state.accuracy() >= 0.95, "accuracy {} too low", state.accuracy());
    // A richer income and score means a higher approval probability.
    assert!(state.weights.w1 > 0.0 && state.weights.w2 > 0.0);
    assert!(state.weights.w0 < 0.0);
}

#[test]
fn test_training_continues_from_current_weights() {
    let dataset = datasets::by_id("credit").unwrap();
    let once = LogisticState::new(0.1, 100)
        .apply(LogisticAction::LoadDataset(dataset.labeled_points()))
        .apply(LogisticAction::Train);
    let twice = once.clone().apply(LogisticAction::Train);
    assert_ne!(once.weights, twice.weights);

    let reloaded = twice.apply(LogisticAction::LoadDataset(dataset.labeled_points()));
    assert_eq!(reloaded.weights, ModelWeights::default());
    assert!(reloaded.predictions.is_empty());
}

#[test]
fn test_planted_transactions_are_masked_at_default_threshold() {
    // The outliers inflate the standard deviation, so none of them clears 2.5.
    let dataset = datasets::by_id("transactions").unwrap();
    let state = AnomalyState::default().apply(AnomalyAction::LoadDataset(dataset.points()));
    assert_eq!(state.anomaly_count(), 0);

    let lowered = state.apply(AnomalyAction::SetThreshold(1.5));
    let flagged: Vec<bool> = lowered.scored.iter().map(|p| p.is_anomaly).collect();
    let planted: Vec<bool> = dataset.data.iter().map(|p| p.planted_anomaly).collect();
    assert_eq!(flagged, planted);
}

#[test]
fn test_added_outlier_shifts_the_mean() {
    let points = vec![Point2D::new(5.0, 5.0), Point2D::new(5.2, 4.8), Point2D::new(4.8, 5.2)];
    let state = AnomalyState::new(1.0, true).apply(AnomalyAction::LoadDataset(points));
    let before = state.stats;
    let after = state.apply(AnomalyAction::AddPoint(Point2D::new(10.0, 10.0))).stats;
    assert!(after.mean_x > before.mean_x);
    assert!(after.std_x > before.std_x);
}

#[test]
fn test_config_builds_sessions() {
    let config = PlaygroundConfig::from_toml_str(
        "[kmeans]\nk = 2\nseed = 3\n[logistic]\niterations = 50\nsnapshot_every = 5\n[anomaly]\nthreshold = 1.5\n",
    )
    .unwrap();
    let mut rng = config.rng();

    let kmeans = config
        .kmeans_state()
        .apply(KMeansAction::LoadDataset(datasets::CUSTOMERS.points()), &mut rng)
        .apply(KMeansAction::Step, &mut rng);
    assert_eq!(kmeans.centroids.len(), 2);

    let logistic = config
        .logistic_state()
        .apply(LogisticAction::LoadDataset(datasets::CREDIT.labeled_points()));
    let iterations: Vec<usize> = logistic.trainer().map(|s| s.iteration).collect();
    assert_eq!(iterations, vec![1, 6, 11, 16, 21, 26, 31, 36, 41, 46, 50]);

    let anomaly = config
        .anomaly_state()
        .apply(AnomalyAction::LoadDataset(datasets::TRANSACTIONS.points()));
    assert_eq!(anomaly.anomaly_count(), 5);
}

#[test]
fn test_datasets_match_their_demo() {
    assert!(datasets::by_category(Category::Clustering).iter().all(|d| d.labeled_points().is_empty()));
    assert!(datasets::CREDIT.expect_category(Category::Classification).is_ok());
}
