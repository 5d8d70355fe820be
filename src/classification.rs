use crate::data::{AssociationRecord, FrameKpi, Timestamp};
use crate::error::{Error, Result};

/// `numerator / denominator` as a percentage, `0` for an empty denominator.
fn percentage(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64 * 100.0
    }
}

/// Derives TP/FP/FN and the rates of one frame from its associations.
///
/// TPR, FPR and FNR share the denominator `TP + FP + FN`. Every rate falls
/// back to `0` when its denominator is zero so per-frame rows stay numeric.
pub fn classify(ts: Timestamp, num_gt: usize, num_pred: usize, associations: &[AssociationRecord]) -> Result<FrameKpi> {
    let true_positives = associations.len();
    if true_positives > num_gt || true_positives > num_pred {
        return Err(Error::InconsistentCounts {
            matched: true_positives,
            ground_truth: num_gt,
            predicted: num_pred,
        });
    }
    let false_positives = num_pred - true_positives;
    let false_negatives = num_gt - true_positives;
    let all = true_positives + false_positives + false_negatives;

    Ok(FrameKpi {
        ts,
        true_positives,
        false_positives,
        false_negatives,
        tpr: percentage(true_positives, all),
        fpr: percentage(false_positives, all),
        fnr: percentage(false_negatives, all),
        precision: percentage(true_positives, true_positives + false_positives),
        recall: percentage(true_positives, true_positives + false_negatives),
    })
}
