//! Decode -> pipeline -> encode round trips on real files.

mod common;

use std::collections::HashSet;
use std::path::Path;

use color_cluster::{Pipeline, PixelBuffer, QuantizeParams};
use palquant::codec;
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Write the shared two-block fixture as a PNG under `dir`.
fn write_fixture_png(dir: &Path, name: &str, width: u32, height: u32) -> std::path::PathBuf {
    let data = common::two_block_rgba(width, height, [210, 40, 40], [40, 40, 210]);
    let path = dir.join(name);
    image::RgbaImage::from_raw(width, height, data)
        .expect("fixture dimensions match")
        .save_with_format(&path, image::ImageFormat::Png)
        .expect("fixture PNG written");
    path
}

#[test]
fn test_decode_produces_rgba_and_family() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_fixture_png(dir.path(), "blocks.png", 8, 4);

    let decoded = codec::decode_image(&input).expect("decode succeeds");

    assert_eq!((decoded.width, decoded.height), (8, 4));
    assert_eq!(decoded.rgba.len(), 8 * 4 * 4);
    assert_eq!(decoded.format, Some(color_cluster::ImageFormatFamily::Png));
}

#[test]
fn test_quantize_round_trip_uses_at_most_k_colors() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_fixture_png(dir.path(), "blocks.png", 16, 8);
    let output = dir.path().join("out.png");

    let decoded = codec::decode_image(&input).expect("decode succeeds");
    let buffer = PixelBuffer::new(decoded.width, decoded.height, &decoded.rgba);

    let params = QuantizeParams::new(2).remove_stray_pixels(false);
    let mut pipeline =
        Pipeline::with_rng(params, StdRng::seed_from_u64(21)).expect("valid params");
    pipeline.load(buffer).expect("load succeeds");
    let outcome = pipeline.export().expect("export succeeds");

    codec::encode_image(&output, &outcome.image).expect("encode succeeds");

    let reread = codec::decode_image(&output).expect("output decodes");
    assert_eq!((reread.width, reread.height), (16, 8));

    let distinct: HashSet<[u8; 4]> = reread
        .rgba
        .chunks_exact(4)
        .map(|px| [px[0], px[1], px[2], px[3]])
        .collect();
    assert!(
        distinct.len() <= 2,
        "Exported PNG should contain at most k colors, found {}",
        distinct.len()
    );
}

#[test]
fn test_default_export_path_uses_suggested_name() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_fixture_png(dir.path(), "sunset.png", 4, 4);

    let decoded = codec::decode_image(&input).expect("decode succeeds");
    let path = codec::default_export_path(&input, decoded.format, 5);

    assert_eq!(path, dir.path().join("sunset_reconstructed_k5.png"));
}

#[test]
fn test_encode_to_jpeg_flattens_alpha() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("flat.jpg");

    // Reconstruction with a transparent pixel: JPEG cannot keep it.
    let image = color_cluster::ReconstructedImage::new(
        2,
        1,
        vec![255, 0, 0, 255, 0, 255, 0, 0],
    );
    codec::encode_image(&output, &image).expect("jpeg encode succeeds");

    let reread = codec::decode_image(&output).expect("jpeg decodes");
    assert_eq!((reread.width, reread.height), (2, 1));
    assert!(
        reread.rgba.chunks_exact(4).all(|px| px[3] == 255),
        "JPEG output is fully opaque"
    );
}
