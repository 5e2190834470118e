//! Playground settings loaded from TOML.
//!
//! Every field is optional and defaults to what the playground page starts with:
//!
//! ```toml
//! [kmeans]
//! k = 3
//! convergence_tolerance = 0.01
//! seed = 42
//!
//! [logistic]
//! learning_rate = 0.1
//! iterations = 100
//! snapshot_every = 10
//!
//! [anomaly]
//! threshold = 2.5
//! auto_detect = true
//! ```
//!
//! The algorithms trust their inputs; [`PlaygroundConfig::validate`] is where the slider
//! ranges of the page are enforced.

use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;

use crate::anomaly::{AnomalyState, DEFAULT_THRESHOLD};
use crate::classification::{DEFAULT_ITERATIONS, DEFAULT_LEARNING_RATE, DEFAULT_SNAPSHOT_EVERY, LogisticState};
use crate::clustering::{DEFAULT_CONVERGENCE_TOLERANCE, DEFAULT_K, KMeansState};
use crate::error::{PlaygroundError, Result};

/// Top-level configuration.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlaygroundConfig {
    pub kmeans: KMeansConfig,
    pub logistic: LogisticConfig,
    pub anomaly: AnomalyConfig,
}

/// Clustering demo settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct KMeansConfig {
    pub k: usize,
    pub convergence_tolerance: f64,
    /// Fixed seed for centroid sampling. Unset means a fresh seed per session.
    pub seed: Option<u64>,
}

/// Classifier demo settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogisticConfig {
    pub learning_rate: f64,
    pub iterations: usize,
    pub snapshot_every: usize,
}

/// Anomaly demo settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnomalyConfig {
    pub threshold: f64,
    pub auto_detect: bool,
}

// --- Defaults ---

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            convergence_tolerance: DEFAULT_CONVERGENCE_TOLERANCE,
            seed: None,
        }
    }
}

impl Default for LogisticConfig {
    fn default() -> Self {
        Self {
            learning_rate: DEFAULT_LEARNING_RATE,
            iterations: DEFAULT_ITERATIONS,
            snapshot_every: DEFAULT_SNAPSHOT_EVERY,
        }
    }
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            auto_detect: true,
        }
    }
}

// --- Ranges accepted by the playground controls ---

pub const K_RANGE: std::ops::RangeInclusive<usize> = 2..=6;
pub const LEARNING_RATE_RANGE: std::ops::RangeInclusive<f64> = 0.01..=0.5;
pub const ITERATIONS_RANGE: std::ops::RangeInclusive<usize> = 10..=500;
pub const THRESHOLD_RANGE: std::ops::RangeInclusive<f64> = 1.0..=5.0;

fn check(name: &'static str, value: f64, ok: bool, range: &'static str) -> Result<()> {
    if ok {
        return Ok(());
    }
    Err(PlaygroundError::OutOfRange { name, value, range })
}

impl PlaygroundConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: PlaygroundConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Like [`PlaygroundConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn validate(&self) -> Result<()> {
        let k = &self.kmeans;
        check("kmeans.k", k.k as f64, K_RANGE.contains(&k.k), "2..=6")?;
        check(
            "kmeans.convergence_tolerance",
            k.convergence_tolerance,
            k.convergence_tolerance > 0.0,
            "(0, inf)",
        )?;

        let l = &self.logistic;
        check(
            "logistic.learning_rate",
            l.learning_rate,
            LEARNING_RATE_RANGE.contains(&l.learning_rate),
            "0.01..=0.5",
        )?;
        check(
            "logistic.iterations",
            l.iterations as f64,
            ITERATIONS_RANGE.contains(&l.iterations),
            "10..=500",
        )?;
        check("logistic.snapshot_every", l.snapshot_every as f64, l.snapshot_every >= 1, "1..")?;

        let a = &self.anomaly;
        check(
            "anomaly.threshold",
            a.threshold,
            THRESHOLD_RANGE.contains(&a.threshold),
            "1.0..=5.0",
        )?;
        Ok(())
    }

    /// Random source for centroid sampling, seeded when a seed is configured.
    pub fn rng(&self) -> StdRng {
        match self.kmeans.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    pub fn kmeans_state(&self) -> KMeansState {
        KMeansState::new(self.kmeans.k).with_tolerance(self.kmeans.convergence_tolerance)
    }

    pub fn logistic_state(&self) -> LogisticState {
        LogisticState {
            snapshot_every: self.logistic.snapshot_every,
            ..LogisticState::new(self.logistic.learning_rate, self.logistic.iterations)
        }
    }

    pub fn anomaly_state(&self) -> AnomalyState {
        AnomalyState::new(self.anomaly.threshold, self.anomaly.auto_detect)
    }
}
