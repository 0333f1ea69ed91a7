//! Repeated-restart Lloyd's algorithm.

use rand::Rng;

use super::ClusteringResult;
use crate::color::Rgb;

/// Maximum Lloyd rounds per restart.
pub const MAX_ITERATIONS: usize = 50;

/// Restart count for large working sets.
pub const DEFAULT_RUNS: usize = 8;

/// Restart count for working sets below [`SMALL_INPUT_THRESHOLD`].
pub const SMALL_INPUT_RUNS: usize = 32;

/// Working-set size below which the extra restarts of
/// [`SMALL_INPUT_RUNS`] are affordable.
pub const SMALL_INPUT_THRESHOLD: usize = 200_000;

/// Centroids owning fewer points than this are reseeded to a random data
/// point instead of being recomputed as a mean.
const MIN_CLUSTER_POPULATION: usize = 8;

/// Restart count for a working set of `sample_len` pixels: 32 below
/// [`SMALL_INPUT_THRESHOLD`], 8 otherwise.
///
/// Small inputs converge fast, so extra restarts buy quality cheaply.
#[inline]
pub fn default_runs(sample_len: usize) -> usize {
    if sample_len < SMALL_INPUT_THRESHOLD {
        SMALL_INPUT_RUNS
    } else {
        DEFAULT_RUNS
    }
}

/// Index of the centroid nearest to `point` by squared Euclidean
/// distance, ties broken toward the lowest index.
pub fn nearest_centroid(point: Rgb, centroids: &[Rgb]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, centroid) in centroids.iter().enumerate() {
        let d = point.distance_squared(*centroid);
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}

/// Cluster `points` into `k` colors, keeping the best of `runs` restarts.
///
/// Each restart initializes `k` centroids to independently uniform-random
/// points in the `[0,1]^3` RGB cube -- deliberately *not* drawn from the
/// dataset, so initialization is independent of the color distribution --
/// then iterates up to [`MAX_ITERATIONS`] Lloyd rounds: assign every
/// point to its nearest centroid, then recompute each centroid as the
/// mean of its points. A centroid owning fewer than 8 points is instead
/// reseeded to a uniformly-random data point, which keeps degenerate
/// clusters from collapsing. A round with no assignment changes ends the
/// restart early.
///
/// The restart with the lowest inertia (sum of squared pixel-to-centroid
/// distances) wins; ties keep the first found. This is quality-seeking
/// but not guaranteed convergent: best-of-N local optima, no global
/// claim.
///
/// Special cases: `k == 0` or empty `points` return
/// [`ClusteringResult::empty`]; `k == 1` short-circuits to a single
/// centroid equal to the first point with inertia 0.
pub fn kmeans<R: Rng>(points: &[Rgb], k: usize, runs: usize, rng: &mut R) -> ClusteringResult {
    if k == 0 || points.is_empty() {
        return ClusteringResult::empty();
    }
    if k == 1 {
        return ClusteringResult {
            centroids: vec![points[0]],
            assignments: vec![0; points.len()],
            inertia: 0.0,
        };
    }

    let mut best: Option<ClusteringResult> = None;
    for run in 0..runs {
        let result = lloyd_restart(points, k, rng);
        tracing::trace!(run, inertia = result.inertia, "Completed k-means restart");
        match &best {
            Some(current) if result.inertia >= current.inertia => {}
            _ => best = Some(result),
        }
    }

    // runs >= 1 by contract, so a best restart always exists
    let best = best.unwrap_or_else(ClusteringResult::empty);
    tracing::debug!(
        k,
        runs,
        points = points.len(),
        inertia = best.inertia,
        "Selected lowest-inertia clustering"
    );
    best
}

/// One Lloyd restart from fresh uniform-random centroids.
fn lloyd_restart<R: Rng>(points: &[Rgb], k: usize, rng: &mut R) -> ClusteringResult {
    let mut centroids: Vec<Rgb> = (0..k)
        .map(|_| Rgb::new(rng.gen(), rng.gen(), rng.gen()))
        .collect();
    let mut assignments = vec![0usize; points.len()];

    let mut changed = true;
    let mut iterations = 0;
    while changed && iterations < MAX_ITERATIONS {
        changed = false;

        for (i, point) in points.iter().enumerate() {
            let nearest = nearest_centroid(*point, &centroids);
            if assignments[i] != nearest {
                changed = true;
            }
            assignments[i] = nearest;
        }

        let mut sums = vec![[0.0f64; 3]; k];
        let mut counts = vec![0usize; k];
        for (point, &cluster) in points.iter().zip(&assignments) {
            sums[cluster][0] += point.r;
            sums[cluster][1] += point.g;
            sums[cluster][2] += point.b;
            counts[cluster] += 1;
        }
        for j in 0..k {
            if counts[j] >= MIN_CLUSTER_POPULATION {
                let n = counts[j] as f64;
                centroids[j] = Rgb::new(sums[j][0] / n, sums[j][1] / n, sums[j][2] / n);
            } else {
                // Undersized cluster: reseed from the data so the slot
                // cannot collapse to an empty region of the cube
                centroids[j] = points[rng.gen_range(0..points.len())];
            }
        }

        iterations += 1;
    }

    let inertia = points
        .iter()
        .zip(&assignments)
        .map(|(point, &cluster)| point.distance_squared(centroids[cluster]))
        .sum();

    ClusteringResult {
        centroids,
        assignments,
        inertia,
    }
}
