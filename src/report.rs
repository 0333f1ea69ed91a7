//! Palette reports for display and machine consumption.

use color_cluster::{ClusteringResult, Rgb};
use serde::Serialize;
use std::fmt::Write as _;

/// Summary of one clustering run, ready to print or serialize.
#[derive(Debug, Clone, Serialize)]
pub struct PaletteReport {
    /// The user-requested color count.
    pub k: usize,
    /// Centroids surviving deduplication (or exactly `k` for exports).
    pub centroid_count: usize,
    /// Sum of squared pixel-to-centroid distances.
    pub inertia: f64,
    /// Working-set size the run clustered.
    pub sampled_pixels: usize,
    /// One entry per centroid, in palette order.
    pub centroids: Vec<CentroidEntry>,
}

/// A single palette color with its cluster population.
#[derive(Debug, Clone, Serialize)]
pub struct CentroidEntry {
    /// 8-bit channel values.
    pub rgb: [u8; 3],
    /// `#RRGGBB` form of `rgb`.
    pub hex: String,
    /// Assigned pixels actually near this centroid.
    pub population: usize,
    /// `population` as a percentage of the working set.
    pub share_pct: f64,
}

impl PaletteReport {
    /// Build a report from a clustering result and the working set it
    /// was computed from.
    pub fn from_result(k: usize, result: &ClusteringResult, working_set: &[Rgb]) -> Self {
        let counts = result.population_counts(working_set);
        let total = result.assignments.len().max(1);

        let centroids = result
            .centroids
            .iter()
            .zip(&counts)
            .map(|(centroid, &population)| {
                let [r, g, b] = centroid.to_bytes();
                CentroidEntry {
                    rgb: [r, g, b],
                    hex: format!("#{r:02X}{g:02X}{b:02X}"),
                    population,
                    share_pct: population as f64 / total as f64 * 100.0,
                }
            })
            .collect();

        Self {
            k,
            centroid_count: result.centroids.len(),
            inertia: result.inertia,
            sampled_pixels: working_set.len(),
            centroids,
        }
    }

    /// Human-readable rendering, one centroid per line.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "K-means centroids (k={}, {} after merge, {} pixels, inertia {:.4}):",
            self.k, self.centroid_count, self.sampled_pixels, self.inertia
        );
        for (i, entry) in self.centroids.iter().enumerate() {
            let [r, g, b] = entry.rgb;
            let _ = writeln!(
                out,
                "  C{}: rgb({r}, {g}, {b}) {}  {} pixels ({:.1}%)",
                i + 1,
                entry.hex,
                entry.population,
                entry.share_pct,
            );
        }
        out
    }
}
