//! Pose error of a matched box pair.
//!
//! The prediction is rotated onto the ground truth's orientation and moved
//! onto its centroid. The aligned corners only decide which corners
//! correspond; distances are then measured on the original prediction.

use std::f64::consts::{FRAC_PI_2, PI};

use log::warn;
use nalgebra::Point2;

use crate::association::match_points;
use crate::config::EvaluationParams;
use crate::data::{centroid, ensure_finite, AssociationRecord, Corners, Object, PoseError};
use crate::error::Result;
use crate::geometry::{
    angle_between_segments, nearest_point_index, polygon_area_iou_scaled, rotate_points, signed_angle,
    translate_points, MIN_SEGMENT_LENGTH,
};

/// The shorter of `(p1, p2)` and `(p2, p3)`; `(p1, p2)` on a tie.
pub fn width_edge(corners: &Corners) -> (Point2<f64>, Point2<f64>) {
    let (p1, p2, p3) = (corners[0], corners[1], corners[2]);
    if (p2 - p1).norm() <= (p3 - p2).norm() {
        (p1, p2)
    } else {
        (p2, p3)
    }
}

/// Folds an angle onto `[-90, 90]` degrees; box orientation has no direction.
fn fold_half_turn(angle_rad: f64) -> f64 {
    if angle_rad > FRAC_PI_2 {
        angle_rad - PI
    } else if angle_rad < -FRAC_PI_2 {
        angle_rad + PI
    } else {
        angle_rad
    }
}

/// Smallest angle between the width edges of two boxes, degrees in `[0, 90]`.
///
/// `Ok(None)` when either width edge is too short to have a direction.
pub fn orientation_error(gt_box: &Corners, pred_box: &Corners) -> Result<Option<f64>> {
    ensure_finite(gt_box)?;
    ensure_finite(pred_box)?;
    let ((g1, g2), (p1, p2)) = (width_edge(gt_box), width_edge(pred_box));
    if (g2 - g1).norm() < MIN_SEGMENT_LENGTH || (p2 - p1).norm() < MIN_SEGMENT_LENGTH {
        return Ok(None);
    }
    let (_, degrees) = angle_between_segments(&p1, &p2, &g1, &g2)?;
    Ok(Some(if degrees > 90.0 { 180.0 - degrees } else { degrees }))
}

/// Scores one association: orientation, corner, position and shape accuracy.
pub fn score_pair(
    gt: &Object,
    pred: &Object,
    record: &AssociationRecord,
    params: &EvaluationParams,
) -> Result<PoseError> {
    let (gt_box, pred_box) = (&gt.corners, &pred.corners);
    let not_computable = PoseError::not_computable(gt.timestamp, record.gt_index, record.pred_index);

    let orientation_accuracy_deg = match orientation_error(gt_box, pred_box)? {
        Some(degrees) => degrees,
        None => {
            warn!("ts {} gt {}: zero-length width edge, pose not computable", gt.timestamp, record.gt_index);
            return Ok(not_computable);
        }
    };

    let ((g1, g2), (p1, p2)) = (width_edge(gt_box), width_edge(pred_box));
    let rotation = fold_half_turn(signed_angle(&(p2 - p1), &(g2 - g1)));
    let rotated = rotate_points(pred_box, rotation);
    let aligned = translate_points(&rotated, &(centroid(gt_box) - centroid(&rotated)));

    let correspondences = match_points(gt_box, &aligned, params.corner_threshold)?;
    if correspondences.len() < gt_box.len() {
        warn!(
            "ts {} gt {}: only {} corner correspondences, pose not computable",
            gt.timestamp,
            record.gt_index,
            correspondences.len()
        );
        return Ok(not_computable);
    }

    let corner_distance = |c: &AssociationRecord| (gt_box[c.gt_index] - pred_box[c.pred_index]).norm();
    let point_to_point_error =
        correspondences.iter().map(corner_distance).sum::<f64>() / correspondences.len() as f64;
    let position_accuracy = nearest_point_index(gt_box, &params.origin)
        .and_then(|anchor| correspondences.iter().find(|c| c.gt_index == anchor))
        .map(corner_distance);
    let shape_accuracy_iou = polygon_area_iou_scaled(gt_box, &aligned, params.clipper_factor)?;

    Ok(PoseError {
        point_to_point_error: Some(point_to_point_error),
        position_accuracy,
        orientation_accuracy_deg: Some(orientation_accuracy_deg),
        shape_accuracy_iou,
        ..not_computable
    })
}
