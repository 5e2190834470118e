//! Step-by-step k-means (Lloyd iterations) over a small 2-D point set.

use ordered_float::OrderedFloat;
use rand::Rng;
use tracing::{debug, warn};

use crate::common_types::{AsPoint, Centroid, ClusteredPoint, Point2D};
use crate::stats::{euclidean_distance, squared_distance};

/// Per-axis centroid movement below which an iteration counts as converged.
pub const DEFAULT_CONVERGENCE_TOLERANCE: f64 = 0.01;

/// Cluster count used when none is configured.
pub const DEFAULT_K: usize = 3;

/// Picks `k` starting centroids by sampling the points uniformly at random, with replacement.
///
/// Two centroids may start on the same point. An empty point set yields no centroids.
pub fn initialize_centroids<P, R>(points: &[P], k: usize, rng: &mut R) -> Vec<Centroid>
where
    P: AsPoint,
    R: Rng + ?Sized,
{
    if points.is_empty() {
        return Vec::new();
    }
    if k > points.len() {
        warn!(k, n_points = points.len(), "more clusters than points, some centroids will coincide");
    }
    (0..k)
        .map(|cluster_index| {
            let picked = points[rng.gen_range(0..points.len())].as_point();
            Centroid::new(picked.x, picked.y, cluster_index)
        })
        .collect()
}

/// Index of the nearest centroid. Ties go to the lowest index.
fn nearest_centroid(point: &Point2D, centroids: &[Centroid]) -> Option<usize> {
    // min_by_key keeps the first of several equal minima.
    centroids
        .iter()
        .enumerate()
        .min_by_key(|(_, c)| OrderedFloat(euclidean_distance(point, &c.point())))
        .map(|(idx, _)| idx)
}

/// Annotates every point with the index of its nearest centroid.
///
/// With no centroids the points come back unassigned.
pub fn assign_clusters<P: AsPoint>(points: &[P], centroids: &[Centroid]) -> Vec<ClusteredPoint> {
    points
        .iter()
        .map(|p| {
            let point = p.as_point();
            ClusteredPoint {
                x: point.x,
                y: point.y,
                cluster: nearest_centroid(&point, centroids),
            }
        })
        .collect()
}

/// Moves each of the `k` centroids to the mean of its assigned points.
///
/// A cluster that received no points keeps its previous centroid (or `(0, 0)` when there is
/// none at that index). Such a cluster can stay empty for good; it is not re-seeded.
pub fn update_centroids(assigned: &[ClusteredPoint], previous: &[Centroid], k: usize) -> Vec<Centroid> {
    let mut sums = vec![(0.0_f64, 0.0_f64, 0_usize); k];
    for p in assigned {
        if let Some(idx) = p.cluster {
            if let Some(slot) = sums.get_mut(idx) {
                slot.0 += p.x;
                slot.1 += p.y;
                slot.2 += 1;
            }
        }
    }

    sums.into_iter()
        .enumerate()
        .map(|(i, (sum_x, sum_y, count))| {
            if count > 0 {
                Centroid::new(sum_x / count as f64, sum_y / count as f64, i)
            } else {
                warn!(cluster = i, "empty cluster, centroid left in place");
                previous.get(i).copied().unwrap_or(Centroid::new(0.0, 0.0, i))
            }
        })
        .collect()
}

/// True when every centroid moved less than `tolerance` along both axes.
pub fn has_converged(previous: &[Centroid], next: &[Centroid], tolerance: f64) -> bool {
    previous.iter().enumerate().all(|(i, c)| {
        next.get(i)
            .is_some_and(|n| (c.x - n.x).abs() < tolerance && (c.y - n.y).abs() < tolerance)
    })
}

/// Sum of squared distances from each assigned point to its centroid.
///
/// Unassigned points, and points whose cluster has no centroid, contribute nothing.
pub fn calculate_inertia(points: &[ClusteredPoint], centroids: &[Centroid]) -> f64 {
    if centroids.is_empty() {
        return 0.0;
    }
    points
        .iter()
        .filter_map(|p| {
            let c = centroids.get(p.cluster?)?;
            Some(squared_distance(&p.point(), &c.point()))
        })
        .sum()
}

/// User actions the k-means demo reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum KMeansAction {
    LoadDataset(Vec<Point2D>),
    AddPoint(Point2D),
    SetK(usize),
    Initialize,
    Step,
    Clear,
}

/// Everything the k-means demo remembers between user actions.
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansState {
    pub points: Vec<ClusteredPoint>,
    pub centroids: Vec<Centroid>,
    pub k: usize,
    /// Completed assign+update cycles since the last initialization.
    pub iterations: usize,
    /// Whether the last step moved every centroid less than the tolerance.
    pub converged: bool,
    pub tolerance: f64,
}

impl Default for KMeansState {
    fn default() -> Self {
        KMeansState::new(DEFAULT_K)
    }
}

impl KMeansState {
    pub fn new(k: usize) -> Self {
        KMeansState {
            points: Vec::new(),
            centroids: Vec::new(),
            k,
            iterations: 0,
            converged: false,
            tolerance: DEFAULT_CONVERGENCE_TOLERANCE,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_points(mut self, points: impl IntoIterator<Item = Point2D>) -> Self {
        self.points = points.into_iter().map(ClusteredPoint::from).collect();
        self
    }

    /// Applies one user action and returns the resulting state.
    pub fn apply<R: Rng + ?Sized>(self, action: KMeansAction, rng: &mut R) -> Self {
        match action {
            KMeansAction::LoadDataset(points) => KMeansState {
                centroids: Vec::new(),
                iterations: 0,
                converged: false,
                ..self.with_points(points)
            },
            KMeansAction::AddPoint(point) => {
                let mut next = self;
                next.points.push(ClusteredPoint::unassigned(point));
                next
            }
            KMeansAction::SetK(k) => KMeansState {
                k,
                centroids: Vec::new(),
                iterations: 0,
                converged: false,
                ..self
            },
            KMeansAction::Initialize => self.initialize(rng),
            KMeansAction::Step => self.step(rng),
            KMeansAction::Clear => KMeansState {
                points: Vec::new(),
                centroids: Vec::new(),
                iterations: 0,
                converged: false,
                ..self
            },
        }
    }

    fn initialize<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        let centroids = initialize_centroids(&self.points, self.k, rng);
        KMeansState {
            centroids,
            iterations: 0,
            converged: false,
            ..self
        }
    }

    /// Runs one iteration. The first call on a fresh state only seeds the centroids.
    pub fn step<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        if self.centroids.is_empty() {
            return self.initialize(rng);
        }

        let assigned = assign_clusters(&self.points, &self.centroids);
        let centroids = update_centroids(&assigned, &self.centroids, self.k);
        let converged = has_converged(&self.centroids, &centroids, self.tolerance);
        let iterations = self.iterations + 1;
        let next = KMeansState {
            points: assigned,
            centroids,
            iterations,
            converged,
            ..self
        };
        debug!(iterations, converged, inertia = next.inertia(), "k-means step");
        next
    }

    /// Steps until convergence or until `max_steps` steps have been taken.
    pub fn run_to_convergence<R: Rng + ?Sized>(self, max_steps: usize, rng: &mut R) -> Self {
        let mut state = self;
        for _ in 0..max_steps {
            state = state.step(rng);
            if state.converged {
                break;
            }
        }
        state
    }

    pub fn inertia(&self) -> f64 {
        calculate_inertia(&self.points, &self.centroids)
    }
}
