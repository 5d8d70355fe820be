//! Association of line-like features (curbs, slot lines) to ground truth.
//!
//! A delimiter has no direction, so both endpoint pairings are tried and the
//! better one is used for matching and for the reported error.

use log::debug;

use crate::association::{distance_matrix, ensure_single_frame, solve_assignment, validate_threshold};
use crate::data::{AssociationRecord, Delimiter, DelimiterError};
use crate::error::Result;
use crate::geometry::{angle_between_segments, MIN_SEGMENT_LENGTH};

/// Mean endpoint distance under the better endpoint pairing.
pub fn delimiter_distance(a: &Delimiter, b: &Delimiter) -> f64 {
    let direct = ((a.start - b.start).norm() + (a.end - b.end).norm()) / 2.0;
    let swapped = ((a.start - b.end).norm() + (a.end - b.start).norm()) / 2.0;
    direct.min(swapped)
}

/// Delimiters of one frame only; mixing timestamps is an error.
pub fn associate_delimiters(
    gt_delimiters: &[Delimiter],
    pred_delimiters: &[Delimiter],
    threshold: f64,
) -> Result<Vec<AssociationRecord>> {
    validate_threshold(threshold)?;
    if gt_delimiters.is_empty() || pred_delimiters.is_empty() {
        return Ok(Vec::new());
    }
    ensure_single_frame(gt_delimiters.iter().chain(pred_delimiters).map(|d| d.timestamp))?;

    let matched = solve_assignment(
        &distance_matrix(gt_delimiters, pred_delimiters, delimiter_distance),
        threshold,
    )?;
    debug!(
        "associated {} of {} gt / {} pred delimiters",
        matched.len(),
        gt_delimiters.len(),
        pred_delimiters.len()
    );
    Ok(matched)
}

pub fn score_delimiter_pair(gt: &Delimiter, pred: &Delimiter) -> Result<DelimiterError> {
    let orientation_deg = if gt.length() < MIN_SEGMENT_LENGTH || pred.length() < MIN_SEGMENT_LENGTH {
        None
    } else {
        let (_, degrees) = angle_between_segments(&pred.start, &pred.end, &gt.start, &gt.end)?;
        Some(if degrees > 90.0 { 180.0 - degrees } else { degrees })
    };
    Ok(DelimiterError {
        endpoint_error: delimiter_distance(gt, pred),
        orientation_deg,
    })
}
