use std::{convert::TryFrom, str::FromStr};

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::error::{Error, Result};

pub mod input;
pub mod output;

pub use input::Recording;
pub use output::{
    AssociationRecord, DelimiterError, FrameEvaluation, FrameKpi, PoseError, RecordingEvaluation, Summary,
};

/// Frame time as recorded on the bus, in microseconds.
pub type Timestamp = u64;

/// Four ordered footprint corners of a box.
pub type Corners = [Point2<f64>; 4];

#[derive(Clone, Copy, Debug, PartialEq, Eq, num_enum::TryFromPrimitive, Display, EnumString, Serialize, Deserialize)]
#[repr(u8)]
pub enum ObjectType {
    #[strum(ascii_case_insensitive)]
    ParkingSlot = 1,
    #[strum(ascii_case_insensitive)]
    Car = 2,
    #[strum(ascii_case_insensitive)]
    Pedestrian = 3,
    #[strum(ascii_case_insensitive)]
    Cyclist = 4,
    #[strum(ascii_case_insensitive)]
    WheelStopper = 5,
}

impl ObjectType {
    /// Parses a class column: a case-insensitive name, a numeric id, or `-` for none.
    pub fn parse_label(label: &str) -> Result<Option<Self>> {
        let label = label.trim();
        if label.is_empty() || label == "-" {
            return Ok(None);
        }
        if let Ok(raw) = label.parse::<u8>() {
            return Self::try_from(raw)
                .map(Some)
                .map_err(|_| Error::UnknownClass(label.to_string()));
        }
        Self::from_str(label)
            .map(Some)
            .map_err(|_| Error::UnknownClass(label.to_string()))
    }
}

/*
   Corner ordering of a box footprint as emitted by the detectors:

        p1 __________ p2
          |          |
          |          |      the shorter of (p1,p2) and (p2,p3)
          |          |      is taken as the width edge
          |__________|
        p4            p3

   Ground truth and prediction each follow this order, but corner i of one
   is not guaranteed to be corner i of the other.
*/

/// One ground-truth or predicted box in a frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Object {
    /// Unique within its source frame only.
    pub id: i64,
    pub timestamp: Timestamp,
    pub corners: Corners,
    /// Only consumed by reporting.
    pub class: Option<ObjectType>,
}

impl Object {
    pub fn new(id: i64, timestamp: Timestamp, points: &[(f64, f64)], class: Option<ObjectType>) -> Result<Self> {
        let points: Vec<Point2<f64>> = points.iter().map(|&(x, y)| Point2::new(x, y)).collect();
        let corners = to_corners(&points)?;
        Ok(Self {
            id,
            timestamp,
            corners,
            class,
        })
    }

    pub fn centroid(&self) -> Point2<f64> {
        centroid(&self.corners)
    }
}

/// A line-like feature (curb, slot line) described by its two end points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Delimiter {
    pub id: i64,
    pub timestamp: Timestamp,
    pub start: Point2<f64>,
    pub end: Point2<f64>,
}

impl Delimiter {
    pub fn new(id: i64, timestamp: Timestamp, start: (f64, f64), end: (f64, f64)) -> Result<Self> {
        let (start, end) = (Point2::new(start.0, start.1), Point2::new(end.0, end.1));
        ensure_finite(&[start, end])?;
        Ok(Self {
            id,
            timestamp,
            start,
            end,
        })
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }
}

/// Mean of the points. Callers guarantee a non-empty slice.
pub(crate) fn centroid(points: &[Point2<f64>]) -> Point2<f64> {
    let sum = points
        .iter()
        .fold(Vector2::zeros(), |acc, p| acc + p.coords);
    Point2::from(sum / points.len() as f64)
}

pub(crate) fn ensure_finite(points: &[Point2<f64>]) -> Result<()> {
    match points
        .iter()
        .position(|p| !(p.x.is_finite() && p.y.is_finite()))
    {
        Some(index) => Err(Error::NonFiniteCoordinate { index }),
        None => Ok(()),
    }
}

pub(crate) fn to_corners(points: &[Point2<f64>]) -> Result<Corners> {
    if points.len() != 4 {
        return Err(Error::InvalidCornerCount {
            expected: 4,
            got: points.len(),
        });
    }
    ensure_finite(points)?;
    Ok([points[0], points[1], points[2], points[3]])
}
