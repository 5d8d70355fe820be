//! # kpi_assoc
//!
//! Offline scoring of parking perception output against ground truth.
//!
//! Per frame, predicted boxes are associated one-to-one with ground-truth
//! boxes by centroid distance (Hungarian assignment under a threshold), the
//! frame is classified into TP/FP/FN with their rates, and every matched pair
//! is decomposed into orientation, corner, position and shape errors.
//!
//! ```rust,ignore
//! use kpi_assoc::{EvaluationParams, Evaluator, Recording};
//!
//! let recording = Recording::from_files("gt.csv", "pred.csv")?;
//! let evaluation = Evaluator::new(EvaluationParams::default())?.evaluate(&recording)?;
//! println!("{}", evaluation.to_json()?);
//! ```

pub mod data;

pub mod association;
pub mod classification;
pub mod config;
pub mod delimiter;
pub mod evaluation;
pub mod geometry;
pub mod pose;

mod error;

pub use association::{associate, associate_at};
pub use classification::classify;
pub use config::EvaluationParams;
pub use data::{
    input::{FrameSlice, Recording},
    AssociationRecord, Delimiter, FrameKpi, Object, ObjectType, PoseError, Timestamp,
};
pub use delimiter::{associate_delimiters, score_delimiter_pair};
pub use error::{Error, Result};
pub use evaluation::Evaluator;
pub use pose::score_pair;
