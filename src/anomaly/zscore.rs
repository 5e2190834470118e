//! Per-axis z-score outlier flagging.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::common_types::{AsPoint, Point2D, ScoredPoint};
use crate::stats::{mean, population_std};

pub const DEFAULT_THRESHOLD: f64 = 2.5;

/// Mean and population standard deviation of both axes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisStats {
    pub mean_x: f64,
    pub mean_y: f64,
    pub std_x: f64,
    pub std_y: f64,
}

/// Statistics over every point, or `None` for an empty set.
pub fn compute_stats<P: AsPoint>(points: &[P]) -> Option<AxisStats> {
    let xs: Vec<f64> = points.iter().map(|p| p.as_point().x).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.as_point().y).collect();
    let mean_x = mean(&xs)?;
    let mean_y = mean(&ys)?;
    Some(AxisStats {
        mean_x,
        mean_y,
        std_x: population_std(&xs, mean_x),
        std_y: population_std(&ys, mean_y),
    })
}

/// `|value - mean| / std`, or exactly zero when `std` is zero.
pub fn z_score(value: f64, mean: f64, std: f64) -> f64 {
    if std == 0.0 {
        return 0.0;
    }
    ((value - mean) / std).abs()
}

impl AxisStats {
    /// The larger of the two per-axis z-scores.
    pub fn score(&self, point: &Point2D) -> f64 {
        let z_x = z_score(point.x, self.mean_x, self.std_x);
        let z_y = z_score(point.y, self.mean_y, self.std_y);
        z_x.max(z_y)
    }
}

/// Scores every point against statistics computed over the whole set, outliers included.
///
/// A point is an anomaly when its score is strictly above `threshold`.
pub fn detect<P: AsPoint>(points: &[P], threshold: f64) -> Vec<ScoredPoint> {
    match compute_stats(points) {
        Some(stats) => score_with(points, &stats, threshold),
        None => Vec::new(),
    }
}

fn score_with<P: AsPoint>(points: &[P], stats: &AxisStats, threshold: f64) -> Vec<ScoredPoint> {
    points
        .iter()
        .map(|p| {
            let point = p.as_point();
            let score = stats.score(&point);
            ScoredPoint {
                x: point.x,
                y: point.y,
                score,
                is_anomaly: score > threshold,
            }
        })
        .collect()
}

/// User actions the anomaly demo reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum AnomalyAction {
    LoadDataset(Vec<Point2D>),
    AddPoint(Point2D),
    SetThreshold(f64),
    SetAutoDetect(bool),
    Detect,
    Clear,
}

/// Everything the anomaly demo remembers between user actions.
#[derive(Debug, Clone, PartialEq)]
pub struct AnomalyState {
    pub points: Vec<Point2D>,
    /// Result of the last detection pass, one entry per point that existed at the time.
    pub scored: Vec<ScoredPoint>,
    pub stats: AxisStats,
    pub threshold: f64,
    /// Re-run detection whenever the points or the threshold change.
    pub auto_detect: bool,
}

impl Default for AnomalyState {
    fn default() -> Self {
        AnomalyState::new(DEFAULT_THRESHOLD, true)
    }
}

impl AnomalyState {
    pub fn new(threshold: f64, auto_detect: bool) -> Self {
        AnomalyState {
            points: Vec::new(),
            scored: Vec::new(),
            stats: AxisStats::default(),
            threshold,
            auto_detect,
        }
    }

    pub fn apply(self, action: AnomalyAction) -> Self {
        match action {
            AnomalyAction::LoadDataset(points) => AnomalyState {
                points,
                scored: Vec::new(),
                ..self
            }
            .auto(),
            AnomalyAction::AddPoint(point) => {
                let mut next = self;
                next.points.push(point);
                next.auto()
            }
            AnomalyAction::SetThreshold(threshold) => AnomalyState { threshold, ..self }.auto(),
            AnomalyAction::SetAutoDetect(auto_detect) => AnomalyState { auto_detect, ..self }.auto(),
            AnomalyAction::Detect => self.detect(),
            AnomalyAction::Clear => AnomalyState {
                points: Vec::new(),
                scored: Vec::new(),
                stats: AxisStats::default(),
                ..self
            },
        }
    }

    fn auto(self) -> Self {
        if self.auto_detect { self.detect() } else { self }
    }

    /// Recomputes statistics and scores from scratch. No-op on an empty set.
    pub fn detect(self) -> Self {
        let Some(stats) = compute_stats(&self.points) else {
            return self;
        };
        let scored = score_with(&self.points, &stats, self.threshold);
        let next = AnomalyState { scored, stats, ..self };
        debug!(
            points = next.points.len(),
            anomalies = next.anomaly_count(),
            threshold = next.threshold,
            "anomaly detection pass"
        );
        next
    }

    pub fn anomalies(&self) -> impl Iterator<Item = &ScoredPoint> {
        self.scored.iter().filter(|p| p.is_anomaly)
    }

    pub fn anomaly_count(&self) -> usize {
        self.anomalies().count()
    }

    /// Points not flagged by the last pass, including points added since.
    pub fn normal_count(&self) -> usize {
        self.points.len() - self.anomaly_count()
    }

    /// Share of anomalies as a rounded percentage; zero for an empty set.
    pub fn anomaly_percent(&self) -> u32 {
        percent(self.anomaly_count(), self.points.len())
    }

    pub fn normal_percent(&self) -> u32 {
        percent(self.normal_count(), self.points.len())
    }
}

fn percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (part as f64 / total as f64 * 100.0).round() as u32
}
