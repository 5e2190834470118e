//! Binary classifier demo.
//!
//! A logistic model turns the linear score `z = w0 + w1*x + w2*y` into a probability with the
//! sigmoid. Training nudges the weights along the log-loss gradient one point at a time,
//! for a fixed number of full passes over the data.

mod logistic_regression;

pub use logistic_regression::{
    DEFAULT_ITERATIONS, DEFAULT_LEARNING_RATE, DEFAULT_SNAPSHOT_EVERY, GRID_CELLS_PER_AXIS, GRID_MAX,
    GRID_STEP, GridPrediction, LogisticAction, LogisticState, ModelWeights, Trainer, TrainingSnapshot,
    accuracy_percent, calculate_accuracy, generate_predictions, sigmoid, train,
};
