//! # Recording input
//!
//! Ground truth and predictions arrive as flat object lists covering a whole
//! recording. They are grouped per timestamp here so each frame can be scored
//! on its own while association indices stay valid for the flat lists.

use std::{ops::Range, path::Path};

use itertools::{EitherOrBoth, Itertools};
use text_io::try_scan;

use super::{Object, ObjectType, Timestamp};
use crate::error::{Error, Result};

/// The objects of one timestamp, borrowed from a [`Recording`].
#[derive(Clone, Copy, Debug)]
pub struct FrameSlice<'a> {
    pub timestamp: Timestamp,
    pub ground_truth: &'a [Object],
    /// Index of `ground_truth[0]` in [`Recording::ground_truth`].
    pub gt_offset: usize,
    pub predicted: &'a [Object],
    /// Index of `predicted[0]` in [`Recording::predicted`].
    pub pred_offset: usize,
}

/// A full recording of ground truth and predicted objects.
///
/// Both lists stay sorted by timestamp, which [`Recording::frames`] relies on.
#[derive(Clone, Debug, Default)]
pub struct Recording {
    ground_truth: Vec<Object>,
    predicted: Vec<Object>,
}

impl Recording {
    /// Objects are stably sorted by timestamp; indices reported later refer
    /// to the sorted lists held here.
    pub fn new(mut ground_truth: Vec<Object>, mut predicted: Vec<Object>) -> Self {
        ground_truth.sort_by_key(|o| o.timestamp);
        predicted.sort_by_key(|o| o.timestamp);
        Self {
            ground_truth,
            predicted,
        }
    }

    pub fn ground_truth(&self) -> &[Object] {
        &self.ground_truth
    }

    pub fn predicted(&self) -> &[Object] {
        &self.predicted
    }

    /// Parses both sides from the line layout
    /// `timestamp,id,class,x1,y1,x2,y2,x3,y3,x4,y4`.
    pub fn from_text(ground_truth: &str, predicted: &str) -> Result<Self> {
        Ok(Self::new(parse_objects(ground_truth)?, parse_objects(predicted)?))
    }

    pub fn from_files<P: AsRef<Path>>(ground_truth: P, predicted: P) -> Result<Self> {
        let ground_truth = std::fs::read_to_string(ground_truth)?;
        let predicted = std::fs::read_to_string(predicted)?;
        Self::from_text(&ground_truth, &predicted)
    }

    /// One slice per timestamp present on either side, in ascending order.
    pub fn frames(&self) -> Vec<FrameSlice<'_>> {
        runs(&self.ground_truth)
            .into_iter()
            .merge_join_by(runs(&self.predicted), |(a, _), (b, _)| a.cmp(b))
            .map(|entry| {
                let (timestamp, gt, pred) = match entry {
                    EitherOrBoth::Both((ts, gt), (_, pred)) => (ts, gt, pred),
                    EitherOrBoth::Left((ts, gt)) => (ts, gt, 0..0),
                    EitherOrBoth::Right((ts, pred)) => (ts, 0..0, pred),
                };
                FrameSlice {
                    timestamp,
                    gt_offset: gt.start,
                    ground_truth: &self.ground_truth[gt],
                    pred_offset: pred.start,
                    predicted: &self.predicted[pred],
                }
            })
            .collect()
    }
}

/// Contiguous index ranges of equal timestamps in a sorted list.
fn runs(objects: &[Object]) -> Vec<(Timestamp, Range<usize>)> {
    let grouped = objects.iter().enumerate().group_by(|(_, o)| o.timestamp);
    let runs = grouped
        .into_iter()
        .filter_map(|(timestamp, mut group)| {
            let start = group.next()?.0;
            let end = group.last().map_or(start, |(i, _)| i) + 1;
            Some((timestamp, start..end))
        })
        .collect();
    runs
}

pub fn parse_objects(text: &str) -> Result<Vec<Object>> {
    let mut objects = Vec::new();
    for (line_idx, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        objects.push(parse_object(line).map_err(|reason| Error::Parse {
            line: line_idx + 1,
            reason,
        })?);
    }
    Ok(objects)
}

fn parse_object(line: &str) -> std::result::Result<Object, String> {
    let (timestamp, id, class, points) = scan_line(line).map_err(|e| format!("{:?}", e))?;
    let class = ObjectType::parse_label(&class).map_err(|e| e.to_string())?;
    Object::new(id, timestamp, &points, class).map_err(|e| e.to_string())
}

type RawLine = (Timestamp, i64, String, [(f64, f64); 4]);

fn scan_line(line: &str) -> std::result::Result<RawLine, text_io::Error> {
    let (timestamp, id, class, x1, y1, x2, y2, x3, y3, x4, y4):
        (Timestamp, i64, String, f64, f64, f64, f64, f64, f64, f64, f64);
    try_scan!(line.bytes() => "{},{},{},{},{},{},{},{},{},{},{}", timestamp, id, class, x1, y1, x2, y2, x3, y3, x4, y4);
    Ok((timestamp, id, class, [(x1, y1), (x2, y2), (x3, y3), (x4, y4)]))
}
