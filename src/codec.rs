//! Image file decode/encode.
//!
//! The clustering pipeline only sees abstract RGBA buffers; this module
//! is the external collaborator that produces them from image files and
//! writes reconstructed buffers back to disk.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use color_cluster::{suggested_file_name, ImageFormatFamily, ReconstructedImage};
use image::ImageFormat;

/// A decoded image: RGBA bytes plus the detected source format family.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Row-major RGBA bytes, 4 per pixel.
    pub rgba: Vec<u8>,
    /// Source format family, when it is one the exporter preserves.
    pub format: Option<ImageFormatFamily>,
}

/// Decode an image file into an RGBA buffer.
///
/// The format is detected from content (falling back to the extension),
/// and any color type is expanded to RGBA.
pub fn decode_image(path: &Path) -> Result<DecodedImage> {
    let reader = image::ImageReader::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("failed to probe format of {}", path.display()))?;

    let format = reader.format().and_then(format_family);
    let decoded = reader
        .decode()
        .with_context(|| format!("failed to decode {}", path.display()))?;
    let rgba = decoded.to_rgba8();

    tracing::debug!(
        path = %path.display(),
        width = rgba.width(),
        height = rgba.height(),
        format = ?format,
        "Decoded image"
    );

    Ok(DecodedImage {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
        format,
    })
}

/// Write a reconstructed image to `path`.
///
/// The encoding format follows the target extension (PNG when the
/// extension is missing or unrecognized). JPEG has no alpha channel, so
/// `.jpg` targets are flattened to RGB.
pub fn encode_image(path: &Path, recon: &ReconstructedImage) -> Result<()> {
    let family = family_for_path(path).unwrap_or(ImageFormatFamily::Png);
    let rgba = image::RgbaImage::from_raw(recon.width(), recon.height(), recon.data().to_vec())
        .context("reconstructed buffer does not match its dimensions")?;

    match family {
        ImageFormatFamily::Jpeg => {
            let rgb = image::DynamicImage::ImageRgba8(rgba).to_rgb8();
            rgb.save_with_format(path, ImageFormat::Jpeg)
        }
        ImageFormatFamily::Png => rgba.save_with_format(path, ImageFormat::Png),
        ImageFormatFamily::WebP => rgba.save_with_format(path, ImageFormat::WebP),
    }
    .with_context(|| format!("failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), "Wrote reconstruction");
    Ok(())
}

/// The export path suggested for `input`: the
/// `<base>_reconstructed_k<k><ext>` name, placed next to the input file.
pub fn default_export_path(
    input: &Path,
    format: Option<ImageFormatFamily>,
    k: usize,
) -> PathBuf {
    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let format = format.or_else(|| family_for_path(input));
    let suggested = suggested_file_name(&file_name, format, k);
    match input.parent() {
        Some(parent) => parent.join(suggested),
        None => PathBuf::from(suggested),
    }
}

/// Format family implied by a path's extension.
pub fn family_for_path(path: &Path) -> Option<ImageFormatFamily> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(ImageFormatFamily::from_extension)
}

fn format_family(format: ImageFormat) -> Option<ImageFormatFamily> {
    match format {
        ImageFormat::Png => Some(ImageFormatFamily::Png),
        ImageFormat::Jpeg => Some(ImageFormatFamily::Jpeg),
        ImageFormat::WebP => Some(ImageFormatFamily::WebP),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_for_path() {
        assert_eq!(
            family_for_path(Path::new("a/b/photo.JPG")),
            Some(ImageFormatFamily::Jpeg)
        );
        assert_eq!(
            family_for_path(Path::new("art.webp")),
            Some(ImageFormatFamily::WebP)
        );
        assert_eq!(family_for_path(Path::new("scan.tiff")), None);
        assert_eq!(family_for_path(Path::new("noext")), None);
    }

    #[test]
    fn test_default_export_path_sits_next_to_input() {
        let path = default_export_path(Path::new("images/sunset.jpeg"), None, 4);
        assert_eq!(path, Path::new("images/sunset_reconstructed_k4.jpg"));
    }

    #[test]
    fn test_default_export_path_prefers_decoded_format() {
        // A decoder-detected family wins over the extension.
        let path = default_export_path(
            Path::new("shot.img"),
            Some(ImageFormatFamily::WebP),
            2,
        );
        assert_eq!(path, Path::new("shot_reconstructed_k2.webp"));
    }
}
