//! Python bindings, so a notebook or web backend can drive the demos.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::anomaly::{AnomalyAction, AnomalyState};
use crate::classification::{LogisticAction, LogisticState, sigmoid};
use crate::clustering::{KMeansAction, KMeansState};
use crate::common_types::{LabeledPoint2D, Point2D};
use crate::datasets::{self, Category};
use crate::error::PlaygroundError;
use crate::stats;

impl From<PlaygroundError> for PyErr {
    fn from(err: PlaygroundError) -> Self {
        PyErr::new::<PyValueError, _>(err.to_string())
    }
}

fn to_points(points: Vec<(f64, f64)>) -> Vec<Point2D> {
    points.into_iter().map(|(x, y)| Point2D::new(x, y)).collect()
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[pyfunction]
#[pyo3(name = "sigmoid")]
fn sigmoid_py(z: f64) -> f64 {
    sigmoid(z)
}

#[pyfunction]
#[pyo3(name = "euclidean_distance")]
fn euclidean_distance_py(a: (f64, f64), b: (f64, f64)) -> f64 {
    stats::euclidean_distance(&Point2D::new(a.0, a.1), &Point2D::new(b.0, b.1))
}

#[pyclass(name = "KMeansSession")]
struct PyKMeansSession {
    state: KMeansState,
    rng: StdRng,
}

impl PyKMeansSession {
    fn dispatch(&mut self, action: KMeansAction) {
        let state = std::mem::take(&mut self.state);
        self.state = state.apply(action, &mut self.rng);
    }
}

#[pymethods]
impl PyKMeansSession {
    #[new]
    #[pyo3(signature = (k = 3, seed = None))]
    fn new(k: usize, seed: Option<u64>) -> Self {
        PyKMeansSession {
            state: KMeansState::new(k),
            rng: rng_from(seed),
        }
    }

    fn load_dataset(&mut self, points: Vec<(f64, f64)>) {
        self.dispatch(KMeansAction::LoadDataset(to_points(points)));
    }

    /// Loads one of the bundled clustering datasets by id.
    fn load_bundled(&mut self, id: &str) -> PyResult<()> {
        let dataset = datasets::by_id(id)?.expect_category(Category::Clustering)?;
        self.dispatch(KMeansAction::LoadDataset(dataset.points()));
        Ok(())
    }

    fn add_point(&mut self, x: f64, y: f64) {
        self.dispatch(KMeansAction::AddPoint(Point2D::new(x, y)));
    }

    fn set_k(&mut self, k: usize) {
        self.dispatch(KMeansAction::SetK(k));
    }

    fn initialize(&mut self) {
        self.dispatch(KMeansAction::Initialize);
    }

    fn step(&mut self) {
        self.dispatch(KMeansAction::Step);
    }

    fn clear(&mut self) {
        self.dispatch(KMeansAction::Clear);
    }

    #[getter]
    fn iterations(&self) -> usize {
        self.state.iterations
    }

    #[getter]
    fn converged(&self) -> bool {
        self.state.converged
    }

    #[getter]
    fn inertia(&self) -> f64 {
        self.state.inertia()
    }

    #[getter]
    fn centroids(&self) -> Vec<(f64, f64)> {
        self.state.centroids.iter().map(|c| (c.x, c.y)).collect()
    }

    #[getter]
    fn assignments(&self) -> Vec<Option<usize>> {
        self.state.points.iter().map(|p| p.cluster).collect()
    }
}

#[pyclass(name = "LogisticSession")]
struct PyLogisticSession {
    state: LogisticState,
}

impl PyLogisticSession {
    fn dispatch(&mut self, action: LogisticAction) {
        let state = std::mem::take(&mut self.state);
        self.state = state.apply(action);
    }
}

#[pymethods]
impl PyLogisticSession {
    #[new]
    #[pyo3(signature = (learning_rate = 0.1, iterations = 100))]
    fn new(learning_rate: f64, iterations: usize) -> Self {
        PyLogisticSession {
            state: LogisticState::new(learning_rate, iterations),
        }
    }

    /// Points as `(x, y, label)` tuples, label 0 or 1.
    fn load_dataset(&mut self, points: Vec<(f64, f64, u8)>) {
        let points = points.into_iter().map(|(x, y, label)| LabeledPoint2D::new(x, y, label)).collect();
        self.dispatch(LogisticAction::LoadDataset(points));
    }

    fn load_bundled(&mut self, id: &str) -> PyResult<()> {
        let dataset = datasets::by_id(id)?.expect_category(Category::Classification)?;
        self.dispatch(LogisticAction::LoadDataset(dataset.labeled_points()));
        Ok(())
    }

    fn add_point(&mut self, x: f64, y: f64, label: u8) -> PyResult<()> {
        if label > 1 {
            return Err(PyErr::new::<PyValueError, _>("label must be 0 or 1"));
        }
        self.dispatch(LogisticAction::AddPoint(LabeledPoint2D::new(x, y, label)));
        Ok(())
    }

    fn set_learning_rate(&mut self, learning_rate: f64) {
        self.dispatch(LogisticAction::SetLearningRate(learning_rate));
    }

    fn set_iterations(&mut self, iterations: usize) {
        self.dispatch(LogisticAction::SetIterations(iterations));
    }

    /// Trains and returns the intermediate `(iteration, (w0, w1, w2))` snapshots.
    fn train(&mut self) -> Vec<(usize, (f64, f64, f64))> {
        let snapshots: Vec<_> = self.state.trainer().collect();
        let history = snapshots
            .iter()
            .map(|s| (s.iteration, (s.weights.w0, s.weights.w1, s.weights.w2)))
            .collect();
        if let Some(last) = snapshots.into_iter().last() {
            let state = std::mem::take(&mut self.state);
            self.state = state.with_snapshot(last);
        }
        history
    }

    fn clear(&mut self) {
        self.dispatch(LogisticAction::Clear);
    }

    #[getter]
    fn weights(&self) -> (f64, f64, f64) {
        let w = self.state.weights;
        (w.w0, w.w1, w.w2)
    }

    #[getter]
    fn accuracy(&self) -> f64 {
        self.state.accuracy()
    }

    #[getter]
    fn predictions(&self) -> Vec<(f64, f64, f64)> {
        self.state.predictions.iter().map(|p| (p.x, p.y, p.prob)).collect()
    }
}

#[pyclass(name = "AnomalySession")]
struct PyAnomalySession {
    state: AnomalyState,
}

impl PyAnomalySession {
    fn dispatch(&mut self, action: AnomalyAction) {
        let state = std::mem::take(&mut self.state);
        self.state = state.apply(action);
    }
}

#[pymethods]
impl PyAnomalySession {
    #[new]
    #[pyo3(signature = (threshold = 2.5, auto_detect = true))]
    fn new(threshold: f64, auto_detect: bool) -> Self {
        PyAnomalySession {
            state: AnomalyState::new(threshold, auto_detect),
        }
    }

    fn load_dataset(&mut self, points: Vec<(f64, f64)>) {
        self.dispatch(AnomalyAction::LoadDataset(to_points(points)));
    }

    fn load_bundled(&mut self, id: &str) -> PyResult<()> {
        let dataset = datasets::by_id(id)?.expect_category(Category::Anomaly)?;
        self.dispatch(AnomalyAction::LoadDataset(dataset.points()));
        Ok(())
    }

    fn add_point(&mut self, x: f64, y: f64) {
        self.dispatch(AnomalyAction::AddPoint(Point2D::new(x, y)));
    }

    fn set_threshold(&mut self, threshold: f64) {
        self.dispatch(AnomalyAction::SetThreshold(threshold));
    }

    fn set_auto_detect(&mut self, auto_detect: bool) {
        self.dispatch(AnomalyAction::SetAutoDetect(auto_detect));
    }

    fn detect(&mut self) {
        self.dispatch(AnomalyAction::Detect);
    }

    fn clear(&mut self) {
        self.dispatch(AnomalyAction::Clear);
    }

    /// `(x, y, score, is_anomaly)` from the last detection pass.
    #[getter]
    fn scored(&self) -> Vec<(f64, f64, f64, bool)> {
        self.state.scored.iter().map(|p| (p.x, p.y, p.score, p.is_anomaly)).collect()
    }

    /// `(mean_x, mean_y, std_x, std_y)`.
    #[getter]
    fn stats(&self) -> (f64, f64, f64, f64) {
        let s = self.state.stats;
        (s.mean_x, s.mean_y, s.std_x, s.std_y)
    }

    #[getter]
    fn anomaly_count(&self) -> usize {
        self.state.anomaly_count()
    }
}

/// The Python module. Its name must match the `lib.name` in `Cargo.toml`.
#[pymodule]
fn ml_playground(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(sigmoid_py, m)?)?;
    m.add_function(wrap_pyfunction!(euclidean_distance_py, m)?)?;
    m.add_class::<PyKMeansSession>()?;
    m.add_class::<PyLogisticSession>()?;
    m.add_class::<PyAnomalySession>()?;
    Ok(())
}
