//! Working-set extraction from a raw pixel buffer.

use rand::Rng;

use super::PixelBuffer;
use crate::color::Rgb;

/// Maximum number of pixels drawn into the working set by default.
pub const DEFAULT_PIXEL_LIMIT: usize = 200_000;

/// Extract the opaque working set from `buffer`, capped at `pixel_limit`
/// pixels.
///
/// Pixels with a zero alpha byte are always excluded. When the image has
/// at most `pixel_limit` pixels, every opaque pixel is included in raster
/// order. Larger images are sampled: `pixel_limit` distinct pixel indices
/// are drawn uniformly without replacement and the opaque ones among them
/// are kept, so the realized sample size may be below the limit.
///
/// An empty return value means the image has no opaque pixels (or none
/// landed in the sample); the orchestrator treats that as terminal for the
/// image.
pub fn sample_pixels<R: Rng>(
    buffer: &PixelBuffer<'_>,
    pixel_limit: usize,
    rng: &mut R,
) -> Vec<Rgb> {
    let total = buffer.pixel_count();

    let samples = if total <= pixel_limit {
        let mut samples = Vec::with_capacity(total);
        for index in 0..total {
            if let Some(sample) = opaque_sample(buffer, index) {
                samples.push(sample);
            }
        }
        samples
    } else {
        let indices = rand::seq::index::sample(rng, total, pixel_limit);
        let mut samples = Vec::with_capacity(pixel_limit);
        for index in indices.iter() {
            if let Some(sample) = opaque_sample(buffer, index) {
                samples.push(sample);
            }
        }
        samples
    };

    tracing::debug!(
        total_pixels = total,
        sampled = samples.len(),
        limit = pixel_limit,
        "Sampled working set"
    );
    samples
}

/// The normalized RGB of the pixel at `index`, or `None` if it is fully
/// transparent.
#[inline]
fn opaque_sample(buffer: &PixelBuffer<'_>, index: usize) -> Option<Rgb> {
    let [r, g, b, a] = buffer.rgba(index);
    if a == 0 {
        return None;
    }
    Some(Rgb::from_u8(r, g, b))
}
