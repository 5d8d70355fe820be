//! Runs association, classification and pose scoring over a recording.

use log::{debug, info};

use crate::association::associate_at;
use crate::classification::classify;
use crate::config::EvaluationParams;
use crate::data::{
    input::FrameSlice, AssociationRecord, Delimiter, DelimiterError, FrameEvaluation, PoseError, Recording,
    RecordingEvaluation, Summary,
};
use crate::delimiter::{associate_delimiters, score_delimiter_pair};
use crate::error::Result;
use crate::pose::score_pair;

pub struct Evaluator {
    params: EvaluationParams,
}

impl Evaluator {
    pub fn new(params: EvaluationParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &EvaluationParams {
        &self.params
    }

    pub fn evaluate_frame(&self, frame: &FrameSlice<'_>) -> Result<FrameEvaluation> {
        let associations = associate_at(
            frame.ground_truth,
            frame.gt_offset,
            frame.predicted,
            frame.pred_offset,
            self.params.association_threshold,
        )?;
        let kpi = classify(
            frame.timestamp,
            frame.ground_truth.len(),
            frame.predicted.len(),
            &associations,
        )?;
        debug!("{}", kpi);

        let poses = associations
            .iter()
            .map(|record| {
                score_pair(
                    &frame.ground_truth[record.gt_index - frame.gt_offset],
                    &frame.predicted[record.pred_index - frame.pred_offset],
                    record,
                    &self.params,
                )
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(FrameEvaluation {
            kpi,
            associations,
            poses,
        })
    }

    /// Matches one frame of delimiters at `delimiter_threshold` and scores every pair.
    pub fn evaluate_delimiters(
        &self,
        gt_delimiters: &[Delimiter],
        pred_delimiters: &[Delimiter],
    ) -> Result<Vec<(AssociationRecord, DelimiterError)>> {
        associate_delimiters(gt_delimiters, pred_delimiters, self.params.delimiter_threshold)?
            .into_iter()
            .map(|record| {
                let error = score_delimiter_pair(&gt_delimiters[record.gt_index], &pred_delimiters[record.pred_index])?;
                Ok((record, error))
            })
            .collect()
    }

    /// Frames are independent; they are evaluated in timestamp order.
    pub fn evaluate(&self, recording: &Recording) -> Result<RecordingEvaluation> {
        let frames = recording
            .frames()
            .iter()
            .map(|frame| self.evaluate_frame(frame))
            .collect::<Result<Vec<_>>>()?;
        let summary = summarize(&frames);
        info!(
            "evaluated {} frames: TP {} FP {} FN {}, {} pairs not computable",
            summary.frames,
            summary.true_positives,
            summary.false_positives,
            summary.false_negatives,
            summary.non_computable_pairs
        );
        Ok(RecordingEvaluation { frames, summary })
    }
}

fn mean<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Folds frame results into recording-level numbers.
///
/// Rate means skip frames without any object; pose means only use pairs
/// whose metrics are all present.
pub fn summarize(frames: &[FrameEvaluation]) -> Summary {
    let kpis: Vec<_> = frames.iter().map(|f| f.kpi).filter(|k| k.has_objects()).collect();
    let poses: Vec<&PoseError> = frames
        .iter()
        .flat_map(|f| f.poses.iter())
        .filter(|p| p.is_complete())
        .collect();
    let scored_pairs: usize = frames.iter().map(|f| f.poses.len()).sum();

    Summary {
        frames: frames.len(),
        empty_frames: frames.len() - kpis.len(),
        true_positives: frames.iter().map(|f| f.kpi.true_positives).sum(),
        false_positives: frames.iter().map(|f| f.kpi.false_positives).sum(),
        false_negatives: frames.iter().map(|f| f.kpi.false_negatives).sum(),
        mean_tpr: mean(kpis.iter().map(|k| k.tpr)),
        mean_fpr: mean(kpis.iter().map(|k| k.fpr)),
        mean_fnr: mean(kpis.iter().map(|k| k.fnr)),
        mean_precision: mean(kpis.iter().map(|k| k.precision)),
        mean_recall: mean(kpis.iter().map(|k| k.recall)),
        mean_point_to_point_error: mean(poses.iter().filter_map(|p| p.point_to_point_error)),
        mean_position_accuracy: mean(poses.iter().filter_map(|p| p.position_accuracy)),
        mean_orientation_accuracy_deg: mean(poses.iter().filter_map(|p| p.orientation_accuracy_deg)),
        mean_shape_accuracy_iou: mean(poses.iter().filter_map(|p| p.shape_accuracy_iou)),
        non_computable_pairs: scored_pairs - poses.len(),
    }
}
