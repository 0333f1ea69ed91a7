//! K-means clustering of the working set in RGB space.
//!
//! [`kmeans`] runs repeated random-restart Lloyd iterations and keeps the
//! lowest-inertia result; [`merge_identical_centroids`] collapses
//! centroids that degenerate restarts converged onto the same color.

mod dedup;
mod kmeans;
mod result;

pub use dedup::{merge_identical_centroids, MERGE_TOLERANCE};
pub use kmeans::{
    default_runs, kmeans, nearest_centroid, DEFAULT_RUNS, MAX_ITERATIONS, SMALL_INPUT_RUNS,
    SMALL_INPUT_THRESHOLD,
};
pub use result::{ClusteringResult, MAX_POPULATION_DISTANCE};
