use image::{DynamicImage, GrayImage, Luma};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_ellipse_mut, draw_hollow_circle_mut};
use otoscan::DetectedRing;

/// Grayscale canvas filled with a uniform background level.
pub fn blank_canvas(width: u32, height: u32, level: u8) -> GrayImage {
    GrayImage::from_pixel(width, height, Luma([level]))
}

/// Bright filled disk on a dark background.
pub fn filled_disk(width: u32, height: u32, center: (i32, i32), radius: i32) -> GrayImage {
    let mut img = blank_canvas(width, height, 10);
    draw_filled_circle_mut(&mut img, center, radius, Luma([220]));
    img
}

/// Bright filled axis-aligned ellipse on a dark background.
pub fn filled_ellipse(
    width: u32,
    height: u32,
    center: (i32, i32),
    width_radius: i32,
    height_radius: i32,
) -> GrayImage {
    let mut img = blank_canvas(width, height, 10);
    draw_filled_ellipse_mut(&mut img, center, width_radius, height_radius, Luma([220]));
    img
}

/// Concentric bright rings (about 5 px thick) around one center,
/// imitating otolith growth bands.
pub fn concentric_rings(width: u32, height: u32, center: (i32, i32), radii: &[i32]) -> GrayImage {
    let mut img = blank_canvas(width, height, 20);
    for &radius in radii {
        for offset in -2..=2 {
            draw_hollow_circle_mut(&mut img, center, radius + offset, Luma([230]));
        }
    }
    img
}

/// Encode a grayscale image as in-memory PNG bytes.
pub fn png_bytes(img: &GrayImage) -> Vec<u8> {
    let mut buffer = std::io::Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(img.clone())
        .write_to(&mut buffer, image::ImageFormat::Png)
        .expect("failed to encode test image");
    buffer.into_inner()
}

/// Rings at the given radii around a shared center, already sorted the
/// way the detector hands them downstream.
pub fn make_rings(radii: &[f64]) -> Vec<DetectedRing> {
    radii
        .iter()
        .map(|&radius| DetectedRing::new(100.0, 100.0, radius))
        .collect()
}
