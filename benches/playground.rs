use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ml_playground::Point2D;
use ml_playground::anomaly::detect;
use ml_playground::classification::{ModelWeights, train};
use ml_playground::clustering::KMeansState;
use ml_playground::datasets;
use rand::prelude::*;

fn bench_kmeans_step(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let points: Vec<Point2D> = (0..100)
        .map(|_| Point2D::new(rng.gen_range(0.0..10.0), rng.gen_range(0.0..10.0)))
        .collect();
    let seeded = KMeansState::new(6).with_points(points).step(&mut rng);

    c.bench_function("kmeans_step_n100_k6", |b| {
        b.iter(|| black_box(seeded.clone()).step(&mut rng))
    });
}

fn bench_logistic_train(c: &mut Criterion) {
    let points = datasets::CREDIT.labeled_points();
    c.bench_function("logistic_train_credit_500", |b| {
        b.iter(|| train(black_box(&points), ModelWeights::default(), 0.1, 500))
    });
}

fn bench_zscore_detect(c: &mut Criterion) {
    let points = datasets::TRANSACTIONS.points();
    c.bench_function("zscore_detect_transactions", |b| b.iter(|| detect(black_box(&points), 2.5)));
}

criterion_group!(benches, bench_kmeans_step, bench_logistic_train, bench_zscore_detect);
criterion_main!(benches);
