use std::path::Path;

use derivative::Derivative;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::association::validate_threshold;
use crate::error::{Error, Result};
use crate::geometry::DEFAULT_CLIPPER_FACTOR;

/// Thresholds and constants of an evaluation run.
///
/// Missing keys in a JSON config fall back to the defaults below.
#[derive(Clone, Debug, PartialEq, Derivative, Serialize, Deserialize)]
#[derivative(Default)]
#[serde(default)]
pub struct EvaluationParams {
    /// Box centroid matching distance, metres.
    #[derivative(Default(value = "8.0"))]
    pub association_threshold: f64,
    /// Corner matching distance after aligning a predicted box onto its ground truth.
    #[derivative(Default(value = "10.0"))]
    pub corner_threshold: f64,
    /// Delimiter matching distance (mean endpoint distance), metres.
    #[derivative(Default(value = "1.0"))]
    pub delimiter_threshold: f64,
    #[derivative(Default(value = "DEFAULT_CLIPPER_FACTOR"))]
    pub clipper_factor: f64,
    /// Reference point for position accuracy, usually the ego vehicle origin.
    #[derivative(Default(value = "Point2::origin()"))]
    pub origin: Point2<f64>,
}

impl EvaluationParams {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.association_threshold)?;
        validate_threshold(self.corner_threshold)?;
        validate_threshold(self.delimiter_threshold)?;
        if !(self.clipper_factor.is_finite() && self.clipper_factor > 0.0) {
            return Err(Error::InvalidParameter {
                name: "clipper_factor",
                value: self.clipper_factor,
            });
        }
        if !(self.origin.x.is_finite() && self.origin.y.is_finite()) {
            return Err(Error::NonFiniteCoordinate { index: 0 });
        }
        Ok(())
    }
}
