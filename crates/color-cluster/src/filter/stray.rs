//! Bounded-window stray-pixel removal.

use super::FilterOptions;
use crate::color::Rgb;

/// Hard cap on the neighbor search window, in sample indices.
const MAX_SEARCH_WINDOW: usize = 1000;

/// Remove low-density outliers from the working set.
///
/// For each pixel `p` at index `i`, other pixels in the index window
/// `[i - W, i + W]` (`W = min(1000, len / 10)`, `i` itself excluded) are
/// counted as neighbors when their Euclidean RGB distance to `p` is at
/// most `options.neighbor_threshold`; counting stops early once
/// `options.min_neighbors` is reached. `p` survives iff its count reaches
/// `options.min_neighbors`.
///
/// The window is an index window over sampling order, not a spatial
/// search: neighbors are only found among pixels *nearby in the working
/// set*, which keeps the cost at O(n * W) and makes the result
/// order-dependent. Working sets no larger than `min_neighbors` are
/// returned unfiltered. An empty return value means every pixel was
/// filtered out; the caller treats that as terminal.
pub fn remove_stray_pixels(pixels: &[Rgb], options: &FilterOptions) -> Vec<Rgb> {
    if pixels.len() <= options.min_neighbors {
        tracing::debug!(
            pixels = pixels.len(),
            "Working set too small to filter, keeping all"
        );
        return pixels.to_vec();
    }

    let window = MAX_SEARCH_WINDOW.min(pixels.len() / 10);
    let threshold_sq = options.neighbor_threshold * options.neighbor_threshold;

    let mut kept = Vec::with_capacity(pixels.len());
    for (i, pixel) in pixels.iter().enumerate() {
        let lo = i.saturating_sub(window);
        let hi = (i + window).min(pixels.len() - 1);

        let mut neighbors = 0;
        for j in lo..=hi {
            if j == i {
                continue;
            }
            if pixel.distance_squared(pixels[j]) <= threshold_sq {
                neighbors += 1;
                if neighbors >= options.min_neighbors {
                    break;
                }
            }
        }

        if neighbors >= options.min_neighbors {
            kept.push(*pixel);
        }
    }

    let removed = pixels.len() - kept.len();
    tracing::debug!(
        removed,
        kept = kept.len(),
        removed_pct = removed as f64 / pixels.len() as f64 * 100.0,
        window,
        "Removed stray pixels"
    );
    kept
}
