//! This module contains the point types shared by the three playground demos.
//!
//! All coordinates live in the normalized `0..10` plane the playground canvas maps to.

use serde::{Deserialize, Serialize};

/// Anything that has a position in the playground plane.
///
/// Lets the algorithms accept raw, labeled, clustered or scored points alike.
pub trait AsPoint {
    fn as_point(&self) -> Point2D;
}

/// A sample in the synthetic 2-D feature space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Point2D { x, y }
    }
}

/// A point with its ground-truth class, used by the classifier demo.
///
/// The label is `0` or `1`; the classifier treats it as the numeric target of the log-loss.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabeledPoint2D {
    pub x: f64,
    pub y: f64,
    pub label: u8,
}

impl LabeledPoint2D {
    pub fn new(x: f64, y: f64, label: u8) -> Self {
        LabeledPoint2D { x, y, label }
    }

    pub fn point(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }
}

/// A point annotated with the index of its nearest centroid.
///
/// `cluster` stays `None` until the first assignment pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusteredPoint {
    pub x: f64,
    pub y: f64,
    pub cluster: Option<usize>,
}

impl ClusteredPoint {
    pub fn unassigned(point: Point2D) -> Self {
        ClusteredPoint { x: point.x, y: point.y, cluster: None }
    }

    pub fn point(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }
}

impl From<Point2D> for ClusteredPoint {
    fn from(point: Point2D) -> Self {
        ClusteredPoint::unassigned(point)
    }
}

/// One of the k cluster centers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    pub x: f64,
    pub y: f64,
    pub cluster_index: usize,
}

impl Centroid {
    pub fn new(x: f64, y: f64, cluster_index: usize) -> Self {
        Centroid { x, y, cluster_index }
    }

    pub fn point(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }
}

/// Output of the anomaly detector for a single point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredPoint {
    pub x: f64,
    pub y: f64,
    pub score: f64,
    pub is_anomaly: bool,
}

impl ScoredPoint {
    pub fn point(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }
}

impl AsPoint for Point2D {
    fn as_point(&self) -> Point2D {
        *self
    }
}

impl AsPoint for LabeledPoint2D {
    fn as_point(&self) -> Point2D {
        self.point()
    }
}

impl AsPoint for ClusteredPoint {
    fn as_point(&self) -> Point2D {
        self.point()
    }
}

impl AsPoint for Centroid {
    fn as_point(&self) -> Point2D {
        self.point()
    }
}

impl AsPoint for ScoredPoint {
    fn as_point(&self) -> Point2D {
        self.point()
    }
}
