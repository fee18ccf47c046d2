use anyhow::Result;
use image::{DynamicImage, GrayImage};

/// Decode an image from an in-memory byte buffer.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes).map_err(|e| anyhow::anyhow!("Failed to decode image: {}", e))
}

/// Convert image to grayscale
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    img.to_luma8()
}

/// Tile-based local contrast enhancement with a clip limit.
///
/// Splits the image into `tile_grid x tile_grid` tiles, equalizes each
/// tile's histogram with the clipped excess redistributed uniformly, and
/// blends the per-tile lookup tables bilinearly so tile seams do not show.
/// Images smaller than the grid collapse to fewer (or one) tiles.
pub fn enhance_local_contrast(img: &GrayImage, clip_limit: f32, tile_grid: u32) -> GrayImage {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return img.clone();
    }

    let tiles_x = tile_grid.clamp(1, width) as usize;
    let tiles_y = tile_grid.clamp(1, height) as usize;

    // One 256-entry lookup table per tile, from its clipped histogram.
    let mut luts = vec![[0u8; 256]; tiles_x * tiles_y];
    for ty in 0..tiles_y {
        let y0 = (ty as u32 * height) / tiles_y as u32;
        let y1 = ((ty as u32 + 1) * height) / tiles_y as u32;
        for tx in 0..tiles_x {
            let x0 = (tx as u32 * width) / tiles_x as u32;
            let x1 = ((tx as u32 + 1) * width) / tiles_x as u32;

            let mut histogram = [0u32; 256];
            for y in y0..y1 {
                for x in x0..x1 {
                    histogram[img.get_pixel(x, y)[0] as usize] += 1;
                }
            }
            let pixel_count = (x1 - x0) * (y1 - y0);

            // Clip each bin and hand the excess back to all bins evenly,
            // bounding how much a flat region can be amplified.
            let clip = ((clip_limit * pixel_count as f32 / 256.0) as u32).max(1);
            let mut excess = 0u32;
            for bin in histogram.iter_mut() {
                if *bin > clip {
                    excess += *bin - clip;
                    *bin = clip;
                }
            }
            let bonus = excess / 256;
            for bin in histogram.iter_mut() {
                *bin += bonus;
            }

            let lut = &mut luts[ty * tiles_x + tx];
            let mut cumulative = 0u64;
            for (value, bin) in histogram.iter().enumerate() {
                cumulative += *bin as u64;
                lut[value] = ((cumulative * 255) / pixel_count.max(1) as u64).min(255) as u8;
            }
        }
    }

    // Blend the four surrounding tile mappings per pixel.
    let mut enhanced = GrayImage::new(width, height);
    for (x, y, pixel) in img.enumerate_pixels() {
        let value = pixel[0] as usize;

        let gx = ((x as f32 + 0.5) * tiles_x as f32 / width as f32 - 0.5)
            .clamp(0.0, tiles_x as f32 - 1.0);
        let gy = ((y as f32 + 0.5) * tiles_y as f32 / height as f32 - 0.5)
            .clamp(0.0, tiles_y as f32 - 1.0);
        let tx0 = gx.floor() as usize;
        let ty0 = gy.floor() as usize;
        let tx1 = (tx0 + 1).min(tiles_x - 1);
        let ty1 = (ty0 + 1).min(tiles_y - 1);
        let wx = gx - tx0 as f32;
        let wy = gy - ty0 as f32;

        let top = luts[ty0 * tiles_x + tx0][value] as f32 * (1.0 - wx)
            + luts[ty0 * tiles_x + tx1][value] as f32 * wx;
        let bottom = luts[ty1 * tiles_x + tx0][value] as f32 * (1.0 - wx)
            + luts[ty1 * tiles_x + tx1][value] as f32 * wx;
        let blended = top * (1.0 - wy) + bottom * wy;

        enhanced.put_pixel(x, y, image::Luma([blended.round().clamp(0.0, 255.0) as u8]));
    }

    enhanced
}
