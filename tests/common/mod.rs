//! Shared fixtures for integration tests.
//!
//! Each test file compiles its own copy of this module, so items may
//! appear unused from the perspective of a single test file even though
//! they're used elsewhere.

#![allow(dead_code)]

/// RGBA bytes for the four-pixel scenario image:
/// two reds, one green, one blue, fully opaque.
pub fn two_by_two_rgba() -> Vec<u8> {
    vec![
        255, 0, 0, 255, //
        255, 0, 0, 255, //
        0, 255, 0, 255, //
        0, 0, 255, 255,
    ]
}

/// A fully transparent square of the given side length.
pub fn transparent_rgba(side: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity((side * side * 4) as usize);
    for _ in 0..side * side {
        data.extend_from_slice(&[128, 128, 128, 0]);
    }
    data
}

/// An opaque `width x height` image built from two solid color blocks
/// (left half `a`, right half `b`).
pub fn two_block_rgba(width: u32, height: u32, a: [u8; 3], b: [u8; 3]) -> Vec<u8> {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for _y in 0..height {
        for x in 0..width {
            let rgb = if x < width / 2 { a } else { b };
            data.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
        }
    }
    data
}
