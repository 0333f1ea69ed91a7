//! Point-sample reconstruction of a source buffer from a centroid set.

use super::ReconstructedImage;
use crate::cluster::nearest_centroid;
use crate::color::Rgb;
use crate::sample::PixelBuffer;

/// Longer-side cap for preview reconstructions, in pixels.
pub const MAX_PREVIEW_DIM: u32 = 800;

/// Preview dimensions for a `src_width` x `src_height` source: the longer
/// side is capped at `max_dim`, aspect ratio preserved, and neither side
/// drops below 1 pixel. Sources already within the cap keep their exact
/// dimensions.
pub fn preview_dimensions(src_width: u32, src_height: u32, max_dim: u32) -> (u32, u32) {
    let longer = src_width.max(src_height).max(1);
    let scale = f64::min(1.0, max_dim as f64 / longer as f64);
    let width = ((src_width as f64 * scale).round() as u32).max(1);
    let height = ((src_height as f64 * scale).round() as u32).max(1);
    (width, height)
}

/// Map every output pixel of a `target_width` x `target_height` raster to
/// the nearest centroid of its source pixel.
///
/// Source coordinates come from nearest-neighbor downsampling:
/// `src_x = min(src_w - 1, floor(x / scale))` with
/// `scale = target_width / src_w` (and symmetrically for y). This is a
/// point-sample downscale, not area averaging -- preview output shows
/// genuine source pixels, just fewer of them. The output pixel's RGB is
/// the nearest centroid (squared distance, ties to the lowest index) of
/// the source pixel's normalized RGB; alpha is copied unchanged from the
/// source pixel.
///
/// Reconstruction is deterministic: the same buffer, centroids, and
/// target dimensions always produce byte-identical output.
///
/// # Panics (debug only)
///
/// Debug-asserts that `centroids` is non-empty.
pub fn reconstruct(
    buffer: &PixelBuffer<'_>,
    centroids: &[Rgb],
    target_width: u32,
    target_height: u32,
) -> ReconstructedImage {
    debug_assert!(
        !centroids.is_empty(),
        "reconstruction requires at least one centroid"
    );

    let src_w = buffer.width();
    let src_h = buffer.height();
    let scale_x = target_width as f64 / src_w as f64;
    let scale_y = target_height as f64 / src_h as f64;

    let mut data = Vec::with_capacity(target_width as usize * target_height as usize * 4);
    for y in 0..target_height {
        let src_y = ((y as f64 / scale_y).floor() as u32).min(src_h - 1);
        for x in 0..target_width {
            let src_x = ((x as f64 / scale_x).floor() as u32).min(src_w - 1);
            let src_index = src_y as usize * src_w as usize + src_x as usize;
            let [r, g, b, a] = buffer.rgba(src_index);

            let source = Rgb::from_u8(r, g, b);
            let nearest = nearest_centroid(source, centroids);
            let [cr, cg, cb] = centroids[nearest].to_bytes();

            data.push(cr);
            data.push(cg);
            data.push(cb);
            data.push(a);
        }
    }

    ReconstructedImage::new(target_width, target_height, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_dimensions_pass_small_images_through() {
        assert_eq!(preview_dimensions(640, 480, MAX_PREVIEW_DIM), (640, 480));
        assert_eq!(preview_dimensions(800, 800, MAX_PREVIEW_DIM), (800, 800));
    }

    #[test]
    fn test_preview_dimensions_cap_longer_side() {
        assert_eq!(preview_dimensions(1600, 800, MAX_PREVIEW_DIM), (800, 400));
        assert_eq!(preview_dimensions(800, 1600, MAX_PREVIEW_DIM), (400, 800));
        let (w, h) = preview_dimensions(3000, 2000, MAX_PREVIEW_DIM);
        assert_eq!(w, 800);
        assert_eq!(h, 533);
    }

    #[test]
    fn test_preview_dimensions_never_collapse_to_zero() {
        assert_eq!(preview_dimensions(10_000, 1, MAX_PREVIEW_DIM), (800, 1));
        assert_eq!(preview_dimensions(1, 1, MAX_PREVIEW_DIM), (1, 1));
    }

    #[test]
    fn test_full_resolution_reconstruction_snaps_to_centroids() {
        // 2x1: a dark red and a dark green pixel.
        let data = [200, 10, 10, 255, 10, 200, 10, 128];
        let buffer = PixelBuffer::new(2, 1, &data);
        let centroids = [Rgb::from_u8(255, 0, 0), Rgb::from_u8(0, 255, 0)];

        let image = reconstruct(&buffer, &centroids, 2, 1);

        assert_eq!(image.rgba(0, 0), [255, 0, 0, 255]);
        assert_eq!(
            image.rgba(1, 0),
            [0, 255, 0, 128],
            "Alpha must be copied from the source pixel"
        );
    }

    #[test]
    fn test_downscale_point_samples_the_source() {
        // 4x1 source: red, red, blue, blue -> 2x1 target samples the
        // first pixel of each half.
        let data = [
            255, 0, 0, 255, //
            255, 0, 0, 255, //
            0, 0, 255, 255, //
            0, 0, 255, 255,
        ];
        let buffer = PixelBuffer::new(4, 1, &data);
        let centroids = [Rgb::from_u8(255, 0, 0), Rgb::from_u8(0, 0, 255)];

        let image = reconstruct(&buffer, &centroids, 2, 1);

        assert_eq!(image.width(), 2);
        assert_eq!(image.rgba(0, 0), [255, 0, 0, 255]);
        assert_eq!(image.rgba(1, 0), [0, 0, 255, 255]);
    }

    #[test]
    fn test_reconstruction_is_idempotent() {
        let data: Vec<u8> = (0..16 * 4).map(|i| (i * 7 % 256) as u8).collect();
        let buffer = PixelBuffer::new(4, 4, &data);
        let centroids = [
            Rgb::new(0.2, 0.3, 0.4),
            Rgb::new(0.8, 0.1, 0.6),
            Rgb::new(0.5, 0.5, 0.5),
        ];

        let first = reconstruct(&buffer, &centroids, 3, 3);
        let second = reconstruct(&buffer, &centroids, 3, 3);

        assert_eq!(first, second, "Same inputs must give byte-identical output");
    }

    #[test]
    fn test_single_centroid_flattens_image() {
        let data = [
            255, 0, 0, 255, //
            0, 255, 0, 255, //
            0, 0, 255, 255, //
            255, 255, 255, 0,
        ];
        let buffer = PixelBuffer::new(2, 2, &data);
        let centroids = [Rgb::from_u8(100, 110, 120)];

        let image = reconstruct(&buffer, &centroids, 2, 2);

        for y in 0..2 {
            for x in 0..2 {
                let [r, g, b, _] = image.rgba(x, y);
                assert_eq!([r, g, b], [100, 110, 120]);
            }
        }
        assert_eq!(image.rgba(1, 1)[3], 0, "Transparent source stays transparent");
    }
}
