//! Detection data model shared by the suppression crates.
//!
//! Detections are produced by an external detector and consumed read-only:
//! nothing in this crate mutates a box, score or label after construction.

pub mod detection;
pub mod error;

pub use detection::{Detection, DetectionSet, DetectionStats, Label};
pub use error::{InvalidDetection, Result, SuppressError};
