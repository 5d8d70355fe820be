#![allow(dead_code)]

use kpi_assoc::{Object, Timestamp};
use nalgebra::{Point2, Rotation2, Vector2};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn object(id: i64, timestamp: Timestamp, corners: [(f64, f64); 4]) -> Object {
    Object::new(id, timestamp, &corners, None).unwrap()
}

/// Axis-aligned box centred on `(cx, cy)`, corners ordered p1 (top left) clockwise,
/// so the `width` edge is `(p1, p2)` whenever `width <= length`.
pub fn rect(cx: f64, cy: f64, width: f64, length: f64) -> [(f64, f64); 4] {
    let (hw, hl) = (width / 2.0, length / 2.0);
    [
        (cx - hw, cy + hl),
        (cx + hw, cy + hl),
        (cx + hw, cy - hl),
        (cx - hw, cy - hl),
    ]
}

/// Rotates corners about their centroid by `degrees`, counter-clockwise.
pub fn rotated(corners: [(f64, f64); 4], degrees: f64) -> [(f64, f64); 4] {
    let center = corners
        .iter()
        .fold(Vector2::zeros(), |acc, &(x, y)| acc + Vector2::new(x, y))
        / 4.0;
    let rotation = Rotation2::new(degrees.to_radians());
    let mut out = corners;
    for (dst, &(x, y)) in out.iter_mut().zip(corners.iter()) {
        let p = Point2::from(center) + rotation * (Vector2::new(x, y) - center);
        *dst = (p.x, p.y);
    }
    out
}

pub fn shifted(corners: [(f64, f64); 4], dx: f64, dy: f64) -> [(f64, f64); 4] {
    let mut out = corners;
    for corner in out.iter_mut() {
        corner.0 += dx;
        corner.1 += dy;
    }
    out
}

pub fn points(raw: &[(f64, f64)]) -> Vec<Point2<f64>> {
    raw.iter().map(|&(x, y)| Point2::new(x, y)).collect()
}
