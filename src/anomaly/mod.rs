//! Anomaly-scoring demo.
//!
//! Each axis is standardized independently and a point's score is its worst per-axis z-score.
//! The mean and standard deviation are taken over all points, suspected outliers included,
//! so a far-away point pulls the statistics used to judge it.

mod zscore;

pub use zscore::{
    AnomalyAction, AnomalyState, AxisStats, DEFAULT_THRESHOLD, compute_stats, detect, z_score,
};
