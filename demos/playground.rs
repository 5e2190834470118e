//! Runs the three playground demos on the bundled datasets.
//!
//! `RUST_LOG=ml_playground=debug cargo run --example playground` shows every step.

use ml_playground::anomaly::{AnomalyAction, AnomalyState};
use ml_playground::classification::{LogisticAction, accuracy_percent};
use ml_playground::clustering::KMeansAction;
use ml_playground::datasets::{self, Category};
use ml_playground::PlaygroundConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => PlaygroundConfig::load(path)?,
        None => PlaygroundConfig::default(),
    };
    let mut rng = config.rng();

    // --- K-means ---
    let customers = datasets::by_id("customers")?.expect_category(Category::Clustering)?;
    let mut kmeans = config
        .kmeans_state()
        .apply(KMeansAction::LoadDataset(customers.points()), &mut rng)
        .apply(KMeansAction::Initialize, &mut rng);
    while !kmeans.converged && kmeans.iterations < 50 {
        kmeans = kmeans.apply(KMeansAction::Step, &mut rng);
    }
    println!("=== K-means (k={}) on {} ===", kmeans.k, customers.name);
    println!("  iterations: {}, inertia: {:.2}", kmeans.iterations, kmeans.inertia());
    for c in &kmeans.centroids {
        println!("  centroid {} at ({:.2}, {:.2})", c.cluster_index, c.x, c.y);
    }

    // --- Logistic regression ---
    let credit = datasets::by_id("credit")?.expect_category(Category::Classification)?;
    let logistic = config
        .logistic_state()
        .apply(LogisticAction::LoadDataset(credit.labeled_points()));
    println!("\n=== Logistic regression on {} ===", credit.name);
    let mut last = None;
    for snapshot in logistic.trainer() {
        println!(
            "  pass {:3}: w0={:.3} w1={:.3} w2={:.3} accuracy={}%",
            snapshot.iteration,
            snapshot.weights.w0,
            snapshot.weights.w1,
            snapshot.weights.w2,
            accuracy_percent(&logistic.points, &snapshot.weights)
        );
        last = Some(snapshot);
    }
    if let Some(snapshot) = last {
        let trained = logistic.with_snapshot(snapshot);
        println!("  final accuracy: {:.0}%", trained.accuracy() * 100.0);
    }

    // --- Anomalies ---
    let transactions = datasets::by_id("transactions")?.expect_category(Category::Anomaly)?;
    let anomaly = config
        .anomaly_state()
        .apply(AnomalyAction::LoadDataset(transactions.points()));
    println!("\n=== Z-score anomalies on {} (threshold {}) ===", transactions.name, anomaly.threshold);
    println!(
        "  mean=({:.2}, {:.2}) std=({:.2}, {:.2})",
        anomaly.stats.mean_x, anomaly.stats.mean_y, anomaly.stats.std_x, anomaly.stats.std_y
    );
    println!(
        "  normal: {} ({}%), anomalies: {} ({}%)",
        anomaly.normal_count(),
        anomaly.normal_percent(),
        anomaly.anomaly_count(),
        anomaly.anomaly_percent()
    );
    for p in anomaly.anomalies() {
        println!("  anomaly at ({:.1}, {:.1}) score {:.2}", p.x, p.y, p.score);
    }

    let mut manual = AnomalyState::new(anomaly.threshold, false)
        .apply(AnomalyAction::LoadDataset(datasets::generate_anomaly_sample(&mut rng)));
    manual = manual.apply(AnomalyAction::Detect);
    println!("  random sample: {} of {} flagged", manual.anomaly_count(), manual.points.len());

    Ok(())
}
