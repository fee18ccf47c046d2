use image::GrayImage;
use imageproc::contours::{BorderType, find_contours};
use imageproc::contrast::{ThresholdType, otsu_level, threshold};
use imageproc::geometry::arc_length;
use imageproc::point::Point;

use crate::config::AnalysisConfig;
use crate::models::{OtolithOutline, OutlineCenter};

/// Binarize with the global threshold that maximizes inter-class variance.
pub fn binarize(gray: &GrayImage) -> GrayImage {
    let level = otsu_level(gray);
    threshold(gray, level, ThresholdType::Binary)
}

/// Segment the otolith outline and compute its morphometrics.
pub fn measure_outline(gray: &GrayImage, config: &AnalysisConfig) -> OtolithOutline {
    measure_from_binary(&binarize(gray), config)
}

/// Largest external boundary of the binarized grid, measured. Returns the
/// zeroed outline when no boundary with enough points exists.
pub fn measure_from_binary(binary: &GrayImage, config: &AnalysisConfig) -> OtolithOutline {
    let contours = find_contours::<i32>(binary);
    let outline = contours
        .iter()
        .filter(|c| c.border_type == BorderType::Outer)
        .max_by(|a, b| shoelace_area(&a.points).total_cmp(&shoelace_area(&b.points)));

    match outline {
        Some(contour) if contour.points.len() >= config.min_outline_points => {
            measure_contour(&contour.points)
        }
        _ => OtolithOutline::empty(),
    }
}

/// Enclosed area of a closed boundary polygon by the shoelace formula.
fn shoelace_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut doubled = 0i64;
    for (i, p) in points.iter().enumerate() {
        let q = &points[(i + 1) % points.len()];
        doubled += p.x as i64 * q.y as i64 - q.x as i64 * p.y as i64;
    }
    (doubled.abs() as f64) / 2.0
}

/// Morphometrics from the boundary geometry. Area, perimeter, aspect
/// ratio, and circularity come from the contour itself; the axis lengths
/// and orientation come from an ellipse fitted to the boundary points via
/// second-order central moments.
fn measure_contour(points: &[Point<i32>]) -> OtolithOutline {
    let n = points.len() as f64;
    let area = shoelace_area(points);
    let perimeter = arc_length(points, true);

    let cx = points.iter().map(|p| p.x as f64).sum::<f64>() / n;
    let cy = points.iter().map(|p| p.y as f64).sum::<f64>() / n;

    let mut m20 = 0.0;
    let mut m02 = 0.0;
    let mut m11 = 0.0;
    for p in points {
        let dx = p.x as f64 - cx;
        let dy = p.y as f64 - cy;
        m20 += dx * dx;
        m02 += dy * dy;
        m11 += dx * dy;
    }
    m20 /= n;
    m02 /= n;
    m11 /= n;

    let disc = ((m20 - m02).powi(2) + 4.0 * m11 * m11).sqrt();
    let major_axis = 2.0 * (m20 + m02 + disc).sqrt();
    let minor_axis = 2.0 * (m20 + m02 - disc).max(0.0).sqrt();
    let orientation = 0.5 * (2.0 * m11).atan2(m20 - m02).to_degrees();

    let aspect_ratio = if minor_axis > 0.0 {
        major_axis / minor_axis
    } else {
        0.0
    };
    let circularity = if perimeter > 0.0 {
        4.0 * std::f64::consts::PI * area / (perimeter * perimeter)
    } else {
        0.0
    };

    OtolithOutline {
        area,
        perimeter,
        major_axis,
        minor_axis,
        aspect_ratio,
        circularity,
        center: OutlineCenter { x: cx, y: cy },
        orientation,
    }
}
