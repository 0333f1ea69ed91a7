//! Export helpers: exact-k centroid sets and output naming.

use rand::Rng;

use crate::color::Rgb;
use crate::reconstruct::ReconstructedImage;

/// The product of an export run: a full-resolution reconstruction and
/// the exact-k centroid palette it used.
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    /// Full-resolution palette-reduced raster.
    pub image: ReconstructedImage,
    /// The palette, exactly `k` entries, not deduplicated.
    pub centroids: Vec<Rgb>,
}

/// Source image format family, used to pick the export extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormatFamily {
    /// PNG (also the fallback for unknown formats).
    Png,
    /// JPEG (`.jpg`/`.jpeg` sources).
    Jpeg,
    /// WebP.
    WebP,
}

impl ImageFormatFamily {
    /// The extension used for exported files of this family.
    #[inline]
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormatFamily::Png => ".png",
            ImageFormatFamily::Jpeg => ".jpg",
            ImageFormatFamily::WebP => ".webp",
        }
    }

    /// Recognize a family from a file extension (without the dot),
    /// case-insensitively.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(ImageFormatFamily::Png),
            "jpg" | "jpeg" => Some(ImageFormatFamily::Jpeg),
            "webp" => Some(ImageFormatFamily::WebP),
            _ => None,
        }
    }
}

/// Force a centroid list to exactly `k` entries.
///
/// Export never deduplicates: the user asked for `k` colors and gets
/// exactly `k`, even at the cost of visual redundancy. Missing slots are
/// filled with uniform-random colors; excess slots (which ordinary
/// clustering never produces) are truncated.
pub fn exact_k_centroids<R: Rng>(mut centroids: Vec<Rgb>, k: usize, rng: &mut R) -> Vec<Rgb> {
    while centroids.len() < k {
        centroids.push(Rgb::new(rng.gen(), rng.gen(), rng.gen()));
        tracing::debug!(k, "Padded export palette with a random centroid");
    }
    centroids.truncate(k);
    centroids
}

/// Suggested file name for an export:
/// `<base>_reconstructed_k<k><ext>`.
///
/// `<base>` is `source_name` with its final extension stripped; `<ext>`
/// preserves the source format family when known and falls back to
/// `.png` otherwise.
///
/// # Example
///
/// ```
/// use color_cluster::{suggested_file_name, ImageFormatFamily};
///
/// let name = suggested_file_name("sunset.jpeg", Some(ImageFormatFamily::Jpeg), 5);
/// assert_eq!(name, "sunset_reconstructed_k5.jpg");
/// ```
pub fn suggested_file_name(
    source_name: &str,
    format: Option<ImageFormatFamily>,
    k: usize,
) -> String {
    let base = strip_extension(source_name);
    let extension = format.unwrap_or(ImageFormatFamily::Png).extension();
    format!("{base}_reconstructed_k{k}{extension}")
}

/// Remove the final `.ext` component of a name, if there is one that
/// does not span a path separator.
fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(pos) if pos + 1 < name.len() && !name[pos + 1..].contains('/') => &name[..pos],
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_exact_k_pads_with_random_centroids() {
        let mut rng = StdRng::seed_from_u64(5);
        let centroids = vec![Rgb::new(0.5, 0.5, 0.5)];

        let padded = exact_k_centroids(centroids, 4, &mut rng);

        assert_eq!(padded.len(), 4);
        assert_eq!(padded[0], Rgb::new(0.5, 0.5, 0.5), "Existing entries kept");
        for c in &padded[1..] {
            assert!((0.0..1.0).contains(&c.r));
            assert!((0.0..1.0).contains(&c.g));
            assert!((0.0..1.0).contains(&c.b));
        }
    }

    #[test]
    fn test_exact_k_truncates_excess() {
        let mut rng = StdRng::seed_from_u64(5);
        let centroids = vec![
            Rgb::new(0.1, 0.1, 0.1),
            Rgb::new(0.2, 0.2, 0.2),
            Rgb::new(0.3, 0.3, 0.3),
        ];

        let trimmed = exact_k_centroids(centroids, 2, &mut rng);

        assert_eq!(
            trimmed,
            vec![Rgb::new(0.1, 0.1, 0.1), Rgb::new(0.2, 0.2, 0.2)],
            "The first k entries survive"
        );
    }

    #[test]
    fn test_format_family_extensions() {
        assert_eq!(ImageFormatFamily::Png.extension(), ".png");
        assert_eq!(ImageFormatFamily::Jpeg.extension(), ".jpg");
        assert_eq!(ImageFormatFamily::WebP.extension(), ".webp");
    }

    #[test]
    fn test_format_family_from_extension() {
        assert_eq!(
            ImageFormatFamily::from_extension("JPEG"),
            Some(ImageFormatFamily::Jpeg)
        );
        assert_eq!(
            ImageFormatFamily::from_extension("png"),
            Some(ImageFormatFamily::Png)
        );
        assert_eq!(ImageFormatFamily::from_extension("gif"), None);
    }

    #[test]
    fn test_suggested_file_name_strips_and_preserves_family() {
        assert_eq!(
            suggested_file_name("lakers.png", Some(ImageFormatFamily::Png), 3),
            "lakers_reconstructed_k3.png"
        );
        assert_eq!(
            suggested_file_name("photo.jpeg", Some(ImageFormatFamily::Jpeg), 12),
            "photo_reconstructed_k12.jpg"
        );
        assert_eq!(
            suggested_file_name("art.webp", Some(ImageFormatFamily::WebP), 2),
            "art_reconstructed_k2.webp"
        );
    }

    #[test]
    fn test_suggested_file_name_unknown_format_defaults_to_png() {
        assert_eq!(
            suggested_file_name("scan.tiff", None, 4),
            "scan_reconstructed_k4.png"
        );
        assert_eq!(
            suggested_file_name("no_extension", None, 4),
            "no_extension_reconstructed_k4.png"
        );
    }

    #[test]
    fn test_strip_extension_ignores_dots_in_directories() {
        assert_eq!(
            suggested_file_name("shots.v2/render", None, 2),
            "shots.v2/render_reconstructed_k2.png"
        );
    }
}
