//! Centroid deduplication.
//!
//! Uniform-random initialization and the small-cluster reseed policy can
//! converge two centroid slots onto numerically identical colors. This
//! pass collapses them so the displayed palette never lists the same
//! color twice.

use std::collections::HashMap;

use super::ClusteringResult;
use crate::color::Rgb;

/// Rounding granularity for treating two centroids as identical.
pub const MERGE_TOLERANCE: f64 = 0.001;

/// Merge centroids that are identical after rounding each component to
/// the nearest multiple of [`MERGE_TOLERANCE`].
///
/// Assignments are remapped through a stable first-seen-wins index map:
/// the surviving centroid list preserves the relative order of first
/// occurrences, and the output count never exceeds the input count.
/// Inertia is carried through unchanged -- merged centroids are the same
/// color, so pixel distances are unaffected.
pub fn merge_identical_centroids(result: ClusteringResult) -> ClusteringResult {
    let before = result.centroids.len();

    let mut seen: HashMap<(i64, i64, i64), usize> = HashMap::new();
    let mut merged: Vec<Rgb> = Vec::with_capacity(before);
    let mut index_map: Vec<usize> = Vec::with_capacity(before);

    for centroid in &result.centroids {
        let key = quantize_key(*centroid);
        let new_index = *seen.entry(key).or_insert_with(|| {
            merged.push(*centroid);
            merged.len() - 1
        });
        index_map.push(new_index);
    }

    let assignments = result
        .assignments
        .iter()
        .map(|&a| index_map[a])
        .collect();

    if merged.len() < before {
        tracing::debug!(
            before,
            after = merged.len(),
            "Merged identical centroids"
        );
    }

    ClusteringResult {
        centroids: merged,
        assignments,
        inertia: result.inertia,
    }
}

/// Component-wise rounding to [`MERGE_TOLERANCE`] multiples, as an
/// integer key usable in a hash map.
#[inline]
fn quantize_key(c: Rgb) -> (i64, i64, i64) {
    (
        (c.r / MERGE_TOLERANCE).round() as i64,
        (c.g / MERGE_TOLERANCE).round() as i64,
        (c.b / MERGE_TOLERANCE).round() as i64,
    )
}
