//! Minimum-cost one-to-one association under a distance threshold.
//!
//! `kuhn_munkres` maximises integer weights and needs no more rows than
//! columns, so distances are negated into fixed-point weights and the matrix
//! is transposed whenever there is more ground truth than prediction.

use itertools::Itertools;
use log::{debug, trace};
use nalgebra::Point2;
use pathfinding::{kuhn_munkres::kuhn_munkres, matrix::Matrix};

use crate::data::{AssociationRecord, Object, Timestamp};
use crate::error::{Error, Result};

/// Solver weights are distances in micro-units; costs closer than that tie.
const COST_SCALE: f64 = 1e6;

/// Largest accepted threshold; keeps the integer weights far from overflow.
pub const MAX_THRESHOLD: f64 = 1e6;

pub fn validate_threshold(threshold: f64) -> Result<()> {
    if threshold.is_finite() && threshold > 0.0 && threshold <= MAX_THRESHOLD {
        Ok(())
    } else {
        Err(Error::InvalidThreshold(threshold))
    }
}

/// `|gt| x |pred|` matrix of `distance(gt, pred)`.
pub fn distance_matrix<G, P, F>(gt: &[G], pred: &[P], distance: F) -> Matrix<f64>
where
    F: Fn(&G, &P) -> f64,
{
    let mut distances = Matrix::new(gt.len(), pred.len(), 0f64);
    for ((gt_i, each_gt), (pred_j, each_pred)) in gt.iter().enumerate().cartesian_product(pred.iter().enumerate()) {
        distances[&(gt_i, pred_j)] = distance(each_gt, each_pred);
    }
    distances
}

/// Solves the assignment over a `gt x pred` distance matrix.
///
/// Entries above `threshold` are replaced by a sentinel cost larger than any
/// sum of feasible costs, so the solver only takes them when forced. Such
/// forced pairs are dropped afterwards by comparing the original distance.
/// Records come back ordered by `gt_index`.
pub fn solve_assignment(distances: &Matrix<f64>, threshold: f64) -> Result<Vec<AssociationRecord>> {
    validate_threshold(threshold)?;
    let (n_gt, n_pred) = (distances.rows, distances.columns);
    if n_gt == 0 || n_pred == 0 {
        return Ok(Vec::new());
    }

    let sentinel = threshold * (n_gt.min(n_pred) + 1) as f64;
    debug_assert!(
        sentinel * COST_SCALE * (n_gt.max(n_pred) as f64) < i64::MAX as f64,
        "assignment weights overflow for a {}x{} matrix",
        n_gt,
        n_pred
    );
    let weight = |distance: f64| -> i64 {
        let cost = if distance <= threshold { distance } else { sentinel };
        -(cost * COST_SCALE).round() as i64
    };

    // rows of the solver matrix are the smaller side
    let transposed = n_gt > n_pred;
    let (rows, columns) = if transposed { (n_pred, n_gt) } else { (n_gt, n_pred) };
    let mut weights = Matrix::new(rows, columns, 0i64);
    for (row, column) in (0..rows).cartesian_product(0..columns) {
        let (gt_i, pred_j) = if transposed { (column, row) } else { (row, column) };
        weights[&(row, column)] = weight(distances[&(gt_i, pred_j)]);
    }

    let (_, row_to_column) = kuhn_munkres(&weights);

    let mut matched: Vec<AssociationRecord> = Vec::with_capacity(rows);
    for (row, column) in row_to_column.into_iter().enumerate() {
        let (gt_index, pred_index) = if transposed { (column, row) } else { (row, column) };
        let distance = distances[&(gt_index, pred_index)];
        if distance <= threshold {
            matched.push(AssociationRecord {
                gt_index,
                pred_index,
                distance,
            });
        } else {
            trace!("dropping forced pair gt {} / pred {} at {:.3}", gt_index, pred_index, distance);
        }
    }
    matched.sort_by_key(|record| record.gt_index);
    Ok(matched)
}

/// Point-level association, used for box centroids and for corner correspondence.
pub fn match_points(gt: &[Point2<f64>], pred: &[Point2<f64>], threshold: f64) -> Result<Vec<AssociationRecord>> {
    validate_threshold(threshold)?;
    if gt.is_empty() || pred.is_empty() {
        return Ok(Vec::new());
    }
    solve_assignment(&distance_matrix(gt, pred, |a, b| (a - b).norm()), threshold)
}

/// Associates the objects of one frame by centroid distance.
pub fn associate(gt_objects: &[Object], pred_objects: &[Object], threshold: f64) -> Result<Vec<AssociationRecord>> {
    associate_at(gt_objects, 0, pred_objects, 0, threshold)
}

/// Like [`associate`], with indices shifted by the slices' positions in the caller's lists.
pub fn associate_at(
    gt_objects: &[Object],
    gt_offset: usize,
    pred_objects: &[Object],
    pred_offset: usize,
    threshold: f64,
) -> Result<Vec<AssociationRecord>> {
    validate_threshold(threshold)?;
    if gt_objects.is_empty() || pred_objects.is_empty() {
        return Ok(Vec::new());
    }
    ensure_single_frame(gt_objects.iter().chain(pred_objects).map(|o| o.timestamp))?;

    let gt_centroids: Vec<_> = gt_objects.iter().map(Object::centroid).collect();
    let pred_centroids: Vec<_> = pred_objects.iter().map(Object::centroid).collect();
    let matched = match_points(&gt_centroids, &pred_centroids, threshold)?;
    debug!(
        "associated {} of {} gt / {} pred objects at threshold {}",
        matched.len(),
        gt_objects.len(),
        pred_objects.len(),
        threshold
    );

    Ok(matched
        .into_iter()
        .map(|record| AssociationRecord {
            gt_index: record.gt_index + gt_offset,
            pred_index: record.pred_index + pred_offset,
            distance: record.distance,
        })
        .collect())
}

/// Every timestamp must equal the first one.
pub(crate) fn ensure_single_frame<I: Iterator<Item = Timestamp>>(mut timestamps: I) -> Result<()> {
    let expected = match timestamps.next() {
        Some(first) => first,
        None => return Ok(()),
    };
    match timestamps.find(|&ts| ts != expected) {
        Some(got) => Err(Error::MixedTimestamps { expected, got }),
        None => Ok(()),
    }
}
