//! Clustering demo.
//!
//! K-means alternates two moves until the centroids stop moving:
//!
//! 1. **Assignment**: each point joins the centroid closest to it (Euclidean distance).
//! 2. **Update**: each centroid moves to the mean of the points that joined it.
//!
//! The objective is the within-cluster sum of squares (the *inertia*):
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! The demo is driven one step at a time so each move can be shown on screen.
//!
//! ```rust
//! use ml_playground::clustering::{KMeansAction, KMeansState};
//! use ml_playground::Point2D;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let points = vec![
//!     Point2D::new(0.0, 0.0),
//!     Point2D::new(0.1, 0.1),
//!     Point2D::new(9.0, 9.0),
//!     Point2D::new(9.1, 9.1),
//! ];
//!
//! let state = KMeansState::new(2)
//!     .apply(KMeansAction::LoadDataset(points), &mut rng)
//!     .apply(KMeansAction::Initialize, &mut rng)
//!     .apply(KMeansAction::Step, &mut rng);
//! assert_eq!(state.iterations, 1);
//! assert_eq!(state.centroids.len(), 2);
//! ```

mod kmeans;

pub use kmeans::{
    DEFAULT_CONVERGENCE_TOLERANCE, DEFAULT_K, KMeansAction, KMeansState, assign_clusters,
    calculate_inertia, has_converged, initialize_centroids, update_centroids,
};
