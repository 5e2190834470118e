//! Numeric core of an educational ML playground.
//!
//! Three independent demos over small 2-D point sets:
//! - [`clustering`]: k-means, one assign+update step at a time
//! - [`classification`]: logistic regression trained by gradient passes, observable as it trains
//! - [`anomaly`]: per-axis z-score outlier flagging
//!
//! Each demo keeps its session in an owned state value updated by `apply(state, action)`, so
//! a UI layer only has to forward user actions and render the result.

pub mod anomaly;
pub mod classification;
pub mod clustering;
pub mod common_types;
pub mod config;
pub mod datasets;
pub mod error;
pub mod stats;

#[cfg(feature = "python")]
mod python;

pub use common_types::{AsPoint, Centroid, ClusteredPoint, LabeledPoint2D, Point2D, ScoredPoint};
pub use config::PlaygroundConfig;
pub use error::{PlaygroundError, Result};
pub use stats::euclidean_distance;
