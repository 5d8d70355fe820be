//! # Scoring output
//!
//! Value records handed to the reporting layer. All of them serialize with
//! serde; metrics that could not be computed are `None` (`null` in JSON).

use derive_more::Display;
use serde::{Deserialize, Serialize};

use super::Timestamp;

/// One accepted ground-truth / prediction pairing.
#[derive(Clone, Copy, Debug, PartialEq, Display, Serialize, Deserialize)]
#[display(fmt = "gt {} <-> pred {} ({:.3})", gt_index, pred_index, distance)]
pub struct AssociationRecord {
    pub gt_index: usize,
    pub pred_index: usize,
    /// Raw centroid distance, never above the threshold used.
    pub distance: f64,
}

/// Detection counts and rates of one frame. Rates are percentages.
#[derive(Clone, Copy, Debug, PartialEq, Display, Serialize, Deserialize)]
#[display(
    fmt = "ts {}: TP {} FP {} FN {} | TPR {:.1} FPR {:.1} FNR {:.1} | precision {:.1} recall {:.1}",
    ts,
    true_positives,
    false_positives,
    false_negatives,
    tpr,
    fpr,
    fnr,
    precision,
    recall
)]
pub struct FrameKpi {
    pub ts: Timestamp,
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    pub tpr: f64,
    pub fpr: f64,
    pub fnr: f64,
    pub precision: f64,
    pub recall: f64,
}

impl FrameKpi {
    /// `false` for frames without a single object on either side.
    pub fn has_objects(&self) -> bool {
        self.true_positives + self.false_positives + self.false_negatives > 0
    }
}

/// Pose error of one matched box pair.
#[derive(Clone, Copy, Debug, PartialEq, Display, Serialize, Deserialize)]
#[display(
    fmt = "ts {} gt {} pred {}: p2p {:?} position {:?} orientation {:?} iou {:?}",
    ts,
    gt_idx,
    pred_idx,
    point_to_point_error,
    position_accuracy,
    orientation_accuracy_deg,
    shape_accuracy_iou
)]
pub struct PoseError {
    pub ts: Timestamp,
    pub gt_idx: usize,
    pub pred_idx: usize,
    /// Mean corner distance over the four corresponding corners.
    pub point_to_point_error: Option<f64>,
    /// Distance of the ground-truth corner nearest the origin to its partner.
    pub position_accuracy: Option<f64>,
    pub orientation_accuracy_deg: Option<f64>,
    /// IoU after rotating and translating the prediction onto the ground truth.
    pub shape_accuracy_iou: Option<f64>,
}

impl PoseError {
    pub(crate) fn not_computable(ts: Timestamp, gt_idx: usize, pred_idx: usize) -> Self {
        Self {
            ts,
            gt_idx,
            pred_idx,
            point_to_point_error: None,
            position_accuracy: None,
            orientation_accuracy_deg: None,
            shape_accuracy_iou: None,
        }
    }

    /// All four metrics are present.
    pub fn is_complete(&self) -> bool {
        self.point_to_point_error.is_some()
            && self.position_accuracy.is_some()
            && self.orientation_accuracy_deg.is_some()
            && self.shape_accuracy_iou.is_some()
    }
}

/// Error of one matched delimiter pair.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DelimiterError {
    pub endpoint_error: f64,
    /// `None` when either line has zero length.
    pub orientation_deg: Option<f64>,
}

/// Everything computed for one timestamp.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameEvaluation {
    pub kpi: FrameKpi,
    pub associations: Vec<AssociationRecord>,
    pub poses: Vec<PoseError>,
}

/// Recording-wide fold of the frame evaluations.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub frames: usize,
    /// Frames with no object on either side; left out of the rate means.
    pub empty_frames: usize,
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    pub mean_tpr: Option<f64>,
    pub mean_fpr: Option<f64>,
    pub mean_fnr: Option<f64>,
    pub mean_precision: Option<f64>,
    pub mean_recall: Option<f64>,
    pub mean_point_to_point_error: Option<f64>,
    pub mean_position_accuracy: Option<f64>,
    pub mean_orientation_accuracy_deg: Option<f64>,
    pub mean_shape_accuracy_iou: Option<f64>,
    /// Matched pairs whose pose metrics could not all be computed.
    pub non_computable_pairs: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordingEvaluation {
    pub frames: Vec<FrameEvaluation>,
    pub summary: Summary,
}

impl RecordingEvaluation {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
