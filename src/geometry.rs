//! Planar geometry shared by the association and scoring stages.

use geo::{prelude::{Area, Contains, EuclideanLength, Intersects}, LineString, Point, Polygon};
use geo_clipper::Clipper;
use itertools::Itertools;
use nalgebra::{Point2, Rotation2, Vector2};
use ordered_float::OrderedFloat;

use crate::data::{centroid, ensure_finite};
use crate::error::{Error, Result};

/// Scale applied to coordinates before integer clipping (metres -> micrometres).
pub const DEFAULT_CLIPPER_FACTOR: f64 = 1e6;

/// Segments shorter than this carry no usable direction.
pub const MIN_SEGMENT_LENGTH: f64 = 1e-9;

/// Areas at or below this are treated as zero.
pub const MIN_AREA: f64 = 1e-12;

/// Builds a simple polygon from an ordered point sequence; the ring is closed implicitly.
pub fn polygon(points: &[Point2<f64>]) -> Result<Polygon<f64>> {
    if points.len() < 3 {
        return Err(Error::InvalidCornerCount {
            expected: 3,
            got: points.len(),
        });
    }
    ensure_finite(points)?;
    let exterior: LineString<f64> = points.iter().map(|p| (p.x, p.y)).collect::<Vec<_>>().into();
    Ok(Polygon::new(exterior, vec![]))
}

/// Intersection over union of two polygons, clipped at [`DEFAULT_CLIPPER_FACTOR`].
///
/// `Ok(None)` when either polygon has no area, since the ratio is undefined.
/// Polygons that coincide on the clipping grid give exactly `1.0`.
pub fn polygon_area_iou(poly_a: &[Point2<f64>], poly_b: &[Point2<f64>]) -> Result<Option<f64>> {
    polygon_area_iou_scaled(poly_a, poly_b, DEFAULT_CLIPPER_FACTOR)
}

pub fn polygon_area_iou_scaled(
    poly_a: &[Point2<f64>],
    poly_b: &[Point2<f64>],
    clipper_factor: f64,
) -> Result<Option<f64>> {
    let (poly_a, poly_b) = (polygon(poly_a)?, polygon(poly_b)?);
    let (area_a, area_b) = (poly_a.unsigned_area(), poly_b.unsigned_area());
    if area_a <= MIN_AREA || area_b <= MIN_AREA {
        return Ok(None);
    }

    if !poly_a.intersects(&poly_b) {
        return Ok(Some(0.0));
    }

    // both areas come off the same integer grid
    let intersection_area = poly_a.intersection(&poly_b, clipper_factor).unsigned_area();
    let union_area = poly_a.union(&poly_b, clipper_factor).unsigned_area();
    if union_area <= MIN_AREA {
        return Ok(None);
    }
    // outlines within half a grid cell of each other are the same polygon
    let grid_slack =
        (poly_a.exterior().euclidean_length() + poly_b.exterior().euclidean_length()) / (2.0 * clipper_factor);
    if union_area - intersection_area <= grid_slack {
        return Ok(Some(1.0));
    }
    Ok(Some((intersection_area / union_area).max(0.0).min(1.0)))
}

/// Unsigned angle between `p2 - p1` and `q2 - q1`, as `(radians, degrees)`.
pub fn angle_between_segments(
    p1: &Point2<f64>,
    p2: &Point2<f64>,
    q1: &Point2<f64>,
    q2: &Point2<f64>,
) -> Result<(f64, f64)> {
    let (a, b) = (p2 - p1, q2 - q1);
    let (norm_a, norm_b) = (a.norm(), b.norm());
    if !(norm_a >= MIN_SEGMENT_LENGTH && norm_b >= MIN_SEGMENT_LENGTH) {
        return Err(Error::DegenerateSegment);
    }
    let cos = (a.dot(&b) / (norm_a * norm_b)).max(-1.0).min(1.0);
    let radians = cos.acos();
    Ok((radians, radians.to_degrees()))
}

/// Counter-clockwise angle that turns `from` onto `to`, in `(-pi, pi]`.
pub fn signed_angle(from: &Vector2<f64>, to: &Vector2<f64>) -> f64 {
    from.perp(to).atan2(from.dot(to))
}

/// Rotates the points about their own centroid.
pub fn rotate_points(points: &[Point2<f64>], angle_rad: f64) -> Vec<Point2<f64>> {
    if points.is_empty() {
        return Vec::new();
    }
    let center = centroid(points);
    let rotation = Rotation2::new(angle_rad);
    points
        .iter()
        .map(|p| center + rotation * (p - center))
        .collect()
}

pub fn translate_points(points: &[Point2<f64>], offset: &Vector2<f64>) -> Vec<Point2<f64>> {
    points.iter().map(|p| p + offset).collect()
}

/// Containment test; `include_border` decides whether boundary points count as inside.
pub fn point_in_polygon(polygon_points: &[Point2<f64>], point: &Point2<f64>, include_border: bool) -> Result<bool> {
    let polygon = polygon(polygon_points)?;
    let point = Point::new(point.x, point.y);
    if polygon.contains(&point) {
        return Ok(true);
    }
    Ok(include_border && polygon.exterior().contains(&point))
}

/// Index of the point closest to `origin`; the first one wins ties.
pub fn nearest_point_index(points: &[Point2<f64>], origin: &Point2<f64>) -> Option<usize> {
    points
        .iter()
        .position_min_by_key(|p| OrderedFloat((*p - origin).norm()))
}
