use image::GrayImage;
use imageproc::edges::canny;
use imageproc::filter::median_filter;

use crate::config::AnalysisConfig;
use crate::models::DetectedRing;

/// Median smoothing to suppress pixel noise before the circular search.
/// The configured radius 2 gives a 5x5 window.
pub fn suppress_noise(img: &GrayImage, radius: u32) -> GrayImage {
    median_filter(img, radius, radius)
}

/// Edge map for ring voting. The low threshold is half the configured
/// edge sensitivity.
pub fn edge_map(smoothed: &GrayImage, config: &AnalysisConfig) -> GrayImage {
    canny(smoothed, config.edge_threshold / 2.0, config.edge_threshold)
}

/// Consecutive radius differences of a radius-sorted ring list.
pub fn spacings(rings: &[DetectedRing]) -> Vec<f64> {
    rings.windows(2).map(|w| w[1].radius - w[0].radius).collect()
}

/// Search for circular edge patterns by gradient voting.
///
/// Every edge pixel votes along both senses of its gradient direction for
/// each radius in range, accumulating candidate centers. Centers with
/// enough votes are kept local-maximum-first subject to the minimum
/// center distance, then each center's radius histogram yields one ring
/// per sufficiently supported peak. An image with no circular edge
/// pattern legitimately produces an empty list.
///
/// The returned rings are sorted ascending by radius; the age and growth
/// stages rely on that ordering.
pub fn detect_rings(
    smoothed: &GrayImage,
    edges: &GrayImage,
    config: &AnalysisConfig,
) -> Vec<DetectedRing> {
    let (width, height) = edges.dimensions();
    let min_radius = config.min_ring_radius as i64;
    let max_radius = config.max_ring_radius(width, height) as i64;
    if max_radius < min_radius || width == 0 || height == 0 {
        return Vec::new();
    }

    let edge_points: Vec<(u32, u32)> = edges
        .enumerate_pixels()
        .filter(|(_, _, p)| p[0] > 0)
        .map(|(x, y, _)| (x, y))
        .collect();
    if edge_points.is_empty() {
        return Vec::new();
    }

    let mut accumulator = vec![0u32; (width * height) as usize];
    for &(x, y) in &edge_points {
        let (gx, gy) = sobel_at(smoothed, x, y);
        let magnitude = ((gx * gx + gy * gy) as f64).sqrt();
        if magnitude < 1.0 {
            continue;
        }
        let dx = gx as f64 / magnitude;
        let dy = gy as f64 / magnitude;
        // Gradients point radially at a circular edge, in one of the two
        // senses depending on ring polarity; vote along both.
        for sign in [-1.0f64, 1.0] {
            for r in min_radius..=max_radius {
                let cx = (x as f64 + sign * dx * r as f64).round() as i64;
                let cy = (y as f64 + sign * dy * r as f64).round() as i64;
                if cx >= 0 && cy >= 0 && cx < width as i64 && cy < height as i64 {
                    accumulator[(cy as u32 * width + cx as u32) as usize] += 1;
                }
            }
        }
    }

    let centers = select_centers(&accumulator, width, height, config);

    let mut rings = Vec::new();
    for (cx, cy) in centers {
        collect_center_rings(
            &edge_points,
            cx,
            cy,
            min_radius as usize,
            max_radius as usize,
            config.accumulator_threshold,
            &mut rings,
        );
    }

    rings.sort_by(|a, b| a.radius.total_cmp(&b.radius));
    rings
}

/// 3x3 Sobel response at one pixel, with coordinates clamped at borders.
fn sobel_at(img: &GrayImage, x: u32, y: u32) -> (i32, i32) {
    let (width, height) = img.dimensions();
    let sample = |dx: i32, dy: i32| -> i32 {
        let sx = (x as i32 + dx).clamp(0, width as i32 - 1) as u32;
        let sy = (y as i32 + dy).clamp(0, height as i32 - 1) as u32;
        img.get_pixel(sx, sy)[0] as i32
    };
    let gx = sample(1, -1) + 2 * sample(1, 0) + sample(1, 1)
        - sample(-1, -1)
        - 2 * sample(-1, 0)
        - sample(-1, 1);
    let gy = sample(-1, 1) + 2 * sample(0, 1) + sample(1, 1)
        - sample(-1, -1)
        - 2 * sample(0, -1)
        - sample(1, -1);
    (gx, gy)
}

/// Accumulator cells that are local maxima with enough votes, accepted
/// strongest-first subject to the minimum center-to-center distance.
fn select_centers(
    accumulator: &[u32],
    width: u32,
    height: u32,
    config: &AnalysisConfig,
) -> Vec<(f64, f64)> {
    let votes_at = |x: i64, y: i64| -> u32 {
        if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
            0
        } else {
            accumulator[(y as u32 * width + x as u32) as usize]
        }
    };

    let mut candidates = Vec::new();
    for y in 0..height as i64 {
        for x in 0..width as i64 {
            let votes = votes_at(x, y);
            if votes < config.accumulator_threshold {
                continue;
            }
            let is_peak = (-1..=1).all(|dy| {
                (-1..=1).all(|dx| dx == 0 && dy == 0 || votes_at(x + dx, y + dy) <= votes)
            });
            if is_peak {
                candidates.push((votes, x, y));
            }
        }
    }
    candidates.sort_by(|a, b| b.0.cmp(&a.0));

    let min_distance_sq = config.min_center_distance * config.min_center_distance;
    let mut centers: Vec<(f64, f64)> = Vec::new();
    for (_, x, y) in candidates {
        let (cx, cy) = (x as f64, y as f64);
        let separated = centers
            .iter()
            .all(|&(px, py)| (cx - px).powi(2) + (cy - py).powi(2) >= min_distance_sq);
        if separated {
            centers.push((cx, cy));
        }
    }
    centers
}

/// One ring per radius-histogram peak around a candidate center.
fn collect_center_rings(
    edge_points: &[(u32, u32)],
    cx: f64,
    cy: f64,
    min_radius: usize,
    max_radius: usize,
    support_threshold: u32,
    rings: &mut Vec<DetectedRing>,
) {
    let mut histogram = vec![0u32; max_radius + 2];
    for &(x, y) in edge_points {
        let distance = ((x as f64 - cx).powi(2) + (y as f64 - cy).powi(2)).sqrt();
        let bin = distance.round() as usize;
        if bin >= min_radius && bin <= max_radius {
            histogram[bin] += 1;
        }
    }

    let mut last_accepted: Option<usize> = None;
    for bin in min_radius..=max_radius {
        let left = if bin > 0 { histogram[bin - 1] } else { 0 };
        let right = histogram[bin + 1];
        let support = left + histogram[bin] + right;
        let is_peak = histogram[bin] > 0 && histogram[bin] >= left && histogram[bin] >= right;
        if !is_peak || support < support_threshold {
            continue;
        }
        // Adjacent bins of one physical ring edge would otherwise both
        // qualify; require a 2 px gap between accepted radii.
        if let Some(last) = last_accepted {
            if bin - last < 3 {
                continue;
            }
        }
        rings.push(DetectedRing::new(cx, cy, bin as f64));
        last_accepted = Some(bin);
    }
}
