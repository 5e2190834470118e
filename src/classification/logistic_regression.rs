//! Logistic regression on two features, trained by full-batch gradient passes.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::common_types::LabeledPoint2D;

pub const DEFAULT_LEARNING_RATE: f64 = 0.1;
pub const DEFAULT_ITERATIONS: usize = 100;
/// Passes between two observable snapshots while training.
pub const DEFAULT_SNAPSHOT_EVERY: usize = 10;

/// Upper bound of both axes of the prediction grid.
pub const GRID_MAX: f64 = 10.0;
/// Spacing between two grid cells.
pub const GRID_STEP: f64 = 0.5;
/// Cells per axis: 0.0, 0.5, ..., 10.0.
pub const GRID_CELLS_PER_AXIS: usize = 21;

/// Logistic function.
pub fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Bias `w0` and the two feature weights `w1` (x) and `w2` (y).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelWeights {
    pub w0: f64,
    pub w1: f64,
    pub w2: f64,
}

impl ModelWeights {
    pub fn new(w0: f64, w1: f64, w2: f64) -> Self {
        ModelWeights { w0, w1, w2 }
    }

    /// Linear score `w0 + w1*x + w2*y`.
    pub fn linear(&self, x: f64, y: f64) -> f64 {
        self.w0 + self.w1 * x + self.w2 * y
    }

    /// Probability of class 1.
    pub fn probability(&self, x: f64, y: f64) -> f64 {
        sigmoid(self.linear(x, y))
    }

    /// Predicted class; an exact 0.5 falls on class 0.
    pub fn predict(&self, x: f64, y: f64) -> u8 {
        if self.probability(x, y) > 0.5 { 1 } else { 0 }
    }
}

/// One cell of the probability heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridPrediction {
    pub x: f64,
    pub y: f64,
    pub prob: f64,
}

/// One gradient pass over every point, updating the weights after each point.
fn train_pass(points: &[LabeledPoint2D], mut weights: ModelWeights, learning_rate: f64) -> ModelWeights {
    for p in points {
        let pred = weights.probability(p.x, p.y);
        let error = f64::from(p.label) - pred;
        weights.w0 += learning_rate * error;
        weights.w1 += learning_rate * error * p.x;
        weights.w2 += learning_rate * error * p.y;
    }
    weights
}

/// Runs exactly `iterations` passes starting from `weights` and returns the final weights.
///
/// There is no regularization and no early stop; large learning rates may diverge.
pub fn train(points: &[LabeledPoint2D], weights: ModelWeights, learning_rate: f64, iterations: usize) -> ModelWeights {
    (0..iterations).fold(weights, |w, _| train_pass(points, w, learning_rate))
}

/// Evaluates the model over the fixed `0..=10` grid, x-major.
pub fn generate_predictions(weights: &ModelWeights) -> Vec<GridPrediction> {
    let mut grid = Vec::with_capacity(GRID_CELLS_PER_AXIS * GRID_CELLS_PER_AXIS);
    for i in 0..GRID_CELLS_PER_AXIS {
        let x = i as f64 * GRID_STEP;
        for j in 0..GRID_CELLS_PER_AXIS {
            let y = j as f64 * GRID_STEP;
            grid.push(GridPrediction { x, y, prob: weights.probability(x, y) });
        }
    }
    grid
}

/// Fraction of points whose predicted class matches the label. Zero for an empty set.
pub fn calculate_accuracy(points: &[LabeledPoint2D], weights: &ModelWeights) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    let correct = points.iter().filter(|p| weights.predict(p.x, p.y) == p.label).count();
    correct as f64 / points.len() as f64
}

/// Accuracy as a rounded integer percentage.
pub fn accuracy_percent(points: &[LabeledPoint2D], weights: &ModelWeights) -> u32 {
    (calculate_accuracy(points, weights) * 100.0).round() as u32
}

/// Weights and heatmap captured part-way through training.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSnapshot {
    /// Number of passes completed when the snapshot was taken.
    pub iteration: usize,
    pub weights: ModelWeights,
    pub predictions: Vec<GridPrediction>,
}

/// Training as an iterator of snapshots.
///
/// A snapshot is yielded after every pass whose zero-based index is a multiple of
/// `snapshot_every`, and after the last pass. Dropping the iterator cancels training.
#[derive(Debug, Clone)]
pub struct Trainer<'a> {
    points: &'a [LabeledPoint2D],
    weights: ModelWeights,
    learning_rate: f64,
    iterations: usize,
    snapshot_every: usize,
    completed: usize,
}

impl<'a> Trainer<'a> {
    pub fn new(points: &'a [LabeledPoint2D], weights: ModelWeights, learning_rate: f64, iterations: usize) -> Self {
        Trainer {
            points,
            weights,
            learning_rate,
            iterations,
            snapshot_every: DEFAULT_SNAPSHOT_EVERY,
            completed: 0,
        }
    }

    /// Zero is treated as one.
    pub fn snapshot_every(mut self, every: usize) -> Self {
        self.snapshot_every = every.max(1);
        self
    }

    /// Weights after the passes run so far.
    pub fn weights(&self) -> ModelWeights {
        self.weights
    }

    pub fn completed(&self) -> usize {
        self.completed
    }
}

impl Iterator for Trainer<'_> {
    type Item = TrainingSnapshot;

    fn next(&mut self) -> Option<TrainingSnapshot> {
        if self.points.is_empty() {
            return None;
        }
        while self.completed < self.iterations {
            let pass_index = self.completed;
            self.weights = train_pass(self.points, self.weights, self.learning_rate);
            self.completed += 1;

            if pass_index % self.snapshot_every == 0 || self.completed == self.iterations {
                debug!(
                    iteration = self.completed,
                    w0 = self.weights.w0,
                    w1 = self.weights.w1,
                    w2 = self.weights.w2,
                    "training snapshot"
                );
                return Some(TrainingSnapshot {
                    iteration: self.completed,
                    weights: self.weights,
                    predictions: generate_predictions(&self.weights),
                });
            }
        }
        None
    }
}

/// User actions the classifier demo reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum LogisticAction {
    LoadDataset(Vec<LabeledPoint2D>),
    AddPoint(LabeledPoint2D),
    SetLearningRate(f64),
    SetIterations(usize),
    Train,
    Clear,
}

/// Everything the classifier demo remembers between user actions.
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticState {
    pub points: Vec<LabeledPoint2D>,
    pub weights: ModelWeights,
    /// Empty until the model has been trained at least once.
    pub predictions: Vec<GridPrediction>,
    pub learning_rate: f64,
    pub iterations: usize,
    pub snapshot_every: usize,
}

impl Default for LogisticState {
    fn default() -> Self {
        LogisticState {
            points: Vec::new(),
            weights: ModelWeights::default(),
            predictions: Vec::new(),
            learning_rate: DEFAULT_LEARNING_RATE,
            iterations: DEFAULT_ITERATIONS,
            snapshot_every: DEFAULT_SNAPSHOT_EVERY,
        }
    }
}

impl LogisticState {
    pub fn new(learning_rate: f64, iterations: usize) -> Self {
        LogisticState {
            learning_rate,
            iterations,
            ..LogisticState::default()
        }
    }

    pub fn apply(self, action: LogisticAction) -> Self {
        match action {
            LogisticAction::LoadDataset(points) => LogisticState {
                points,
                weights: ModelWeights::default(),
                predictions: Vec::new(),
                ..self
            },
            LogisticAction::AddPoint(point) => {
                let mut next = self;
                next.points.push(point);
                next
            }
            LogisticAction::SetLearningRate(learning_rate) => LogisticState { learning_rate, ..self },
            LogisticAction::SetIterations(iterations) => LogisticState { iterations, ..self },
            LogisticAction::Train => {
                let last = self.trainer().last();
                match last {
                    Some(snapshot) => self.with_snapshot(snapshot),
                    None => self,
                }
            }
            LogisticAction::Clear => LogisticState {
                points: Vec::new(),
                weights: ModelWeights::default(),
                predictions: Vec::new(),
                ..self
            },
        }
    }

    /// Training run that continues from the current weights.
    pub fn trainer(&self) -> Trainer<'_> {
        Trainer::new(&self.points, self.weights, self.learning_rate, self.iterations).snapshot_every(self.snapshot_every)
    }

    /// Adopts the weights and heatmap of a snapshot, e.g. one pulled from [`LogisticState::trainer`].
    pub fn with_snapshot(self, snapshot: TrainingSnapshot) -> Self {
        LogisticState {
            weights: snapshot.weights,
            predictions: snapshot.predictions,
            ..self
        }
    }

    /// Accuracy of the current weights, or zero while nothing has been trained.
    pub fn accuracy(&self) -> f64 {
        if self.predictions.is_empty() {
            return 0.0;
        }
        calculate_accuracy(&self.points, &self.weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn separable() -> Vec<LabeledPoint2D> {
        vec![
            LabeledPoint2D::new(1.0, 1.0, 0),
            LabeledPoint2D::new(1.5, 2.0, 0),
            LabeledPoint2D::new(2.0, 1.0, 0),
            LabeledPoint2D::new(8.0, 8.0, 1),
            LabeledPoint2D::new(8.5, 9.0, 1),
            LabeledPoint2D::new(9.0, 8.0, 1),
        ]
    }

    #[test]
    fn test_sigmoid() {
        assert!((sigmoid(0.0) - 0.5).abs() < EPS);
        assert!(sigmoid(10.0) > 0.99);
        assert!(sigmoid(-10.0) < 0.01);
    }

    #[test]
    fn test_single_pass_single_point() {
        let points = [LabeledPoint2D::new(1.0, 1.0, 1)];
        let w = train(&points, ModelWeights::default(), 0.1, 1);
        assert!((w.w0 - 0.05).abs() < EPS, "w0 should be 0.05, got {}", w.w0);
        assert!((w.w1 - 0.05).abs() < EPS, "w1 should be 0.05, got {}", w.w1);
        assert!((w.w2 - 0.05).abs() < EPS, "w2 should be 0.05, got {}", w.w2);
    }

    #[test]
    fn test_weights_update_per_point_within_a_pass() {
        // The second point must see the weights already moved by the first.
        let points = [LabeledPoint2D::new(1.0, 1.0, 1), LabeledPoint2D::new(1.0, 1.0, 1)];
        let w = train(&points, ModelWeights::default(), 0.1, 1);
        let second_error = 1.0 - sigmoid(0.15);
        let expected = 0.05 + 0.1 * second_error;
        assert!((w.w0 - expected).abs() < EPS, "Expected {}, got {}", expected, w.w0);
    }

    #[test]
    fn test_train_empty_leaves_weights() {
        let start = ModelWeights::new(0.3, -0.2, 0.1);
        assert_eq!(train(&[], start, 0.1, 50), start);
    }

    #[test]
    fn test_grid_shape_and_idempotence() {
        let w = ModelWeights::new(-5.0, 0.5, 0.5);
        let grid = generate_predictions(&w);
        assert_eq!(grid.len(), 441);
        assert_eq!((grid[0].x, grid[0].y), (0.0, 0.0));
        assert_eq!((grid[1].x, grid[1].y), (0.0, 0.5));
        assert_eq!((grid[440].x, grid[440].y), (10.0, 10.0));
        assert_eq!(grid, generate_predictions(&w));
    }

    #[test]
    fn test_accuracy_threshold_is_strict() {
        // Zero weights give exactly 0.5 everywhere, which predicts class 0.
        let points = [LabeledPoint2D::new(1.0, 1.0, 0), LabeledPoint2D::new(2.0, 2.0, 1)];
        let acc = calculate_accuracy(&points, &ModelWeights::default());
        assert!((acc - 0.5).abs() < EPS);
        assert_eq!(accuracy_percent(&points, &ModelWeights::default()), 50);
        assert_eq!(calculate_accuracy(&[], &ModelWeights::default()), 0.0);
    }

    #[test]
    fn test_trainer_snapshot_schedule() {
        let points = separable();
        let iterations: Vec<usize> = Trainer::new(&points, ModelWeights::default(), 0.1, 25)
            .map(|s| s.iteration)
            .collect();
        // Passes 0, 10 and 20 plus the final pass.
        assert_eq!(iterations, vec![1, 11, 21, 25]);
    }

    #[test]
    fn test_trainer_matches_train() {
        let points = separable();
        let trained = train(&points, ModelWeights::default(), 0.05, 40);
        let last = Trainer::new(&points, ModelWeights::default(), 0.05, 40).last().unwrap();
        assert_eq!(last.weights, trained);
        assert_eq!(last.predictions, generate_predictions(&trained));
    }

    #[test]
    fn test_trainer_can_be_cancelled() {
        let points = separable();
        let mut trainer = Trainer::new(&points, ModelWeights::default(), 0.1, 100);
        let first = trainer.next().unwrap();
        assert_eq!(first.iteration, 1);
        assert_eq!(trainer.completed(), 1);
        drop(trainer);
    }

    #[test]
    fn test_state_train_learns_separable_data() {
        let state = LogisticState::default()
            .apply(LogisticAction::LoadDataset(separable()))
            .apply(LogisticAction::SetLearningRate(0.05))
            .apply(LogisticAction::SetIterations(200))
            .apply(LogisticAction::Train);
        assert_eq!(state.predictions.len(), 441);
        assert!((state.accuracy() - 1.0).abs() < EPS, "Expected perfect accuracy, got {}", state.accuracy());
    }

    #[test]
    fn test_state_accuracy_zero_before_training() {
        let state = LogisticState::default().apply(LogisticAction::LoadDataset(separable()));
        assert_eq!(state.accuracy(), 0.0);
    }

    #[test]
    fn test_state_train_without_points_is_noop() {
        let state = LogisticState::default().apply(LogisticAction::Train);
        assert_eq!(state, LogisticState::default());
    }

    #[test]
    fn test_state_clear_resets_weights() {
        let state = LogisticState::default()
            .apply(LogisticAction::AddPoint(LabeledPoint2D::new(1.0, 1.0, 1)))
            .apply(LogisticAction::Train);
        assert_ne!(state.weights, ModelWeights::default());
        let cleared = state.apply(LogisticAction::Clear);
        assert!(cleared.points.is_empty());
        assert!(cleared.predictions.is_empty());
        assert_eq!(cleared.weights, ModelWeights::default());
    }
}
