//! Single detections and their labels
//!
//! A [`Detection`] is one candidate object instance emitted by a detector:
//! an axis-aligned box in corner form plus a confidence score and a label.

pub mod set;

pub use set::{DetectionSet, DetectionStats};

use crate::error::InvalidDetection;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Object category identifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(pub u32);

impl From<u32> for Label {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Axis-aligned box `(x1, y1)`-`(x2, y2)` with confidence and label
///
/// Coordinates share one space (pixels or normalized units). A box with
/// `x2 < x1` or `y2 < y1` is degenerate and has zero area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub confidence: f32,
    #[serde(default)]
    pub label: Label,
}

impl Detection {
    /// Create a detection with the default label
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32, confidence: f32) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            confidence,
            label: Label::default(),
        }
    }

    /// Set the class label
    pub fn with_label(mut self, label: impl Into<Label>) -> Self {
        self.label = label.into();
        self
    }

    /// Box width, zero for degenerate boxes
    pub fn width(&self) -> f32 {
        (self.x2 - self.x1).max(0.0)
    }

    /// Box height, zero for degenerate boxes
    pub fn height(&self) -> f32 {
        (self.y2 - self.y1).max(0.0)
    }

    /// Area of the box, zero for degenerate boxes
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Center point
    pub fn center(&self) -> (f32, f32) {
        ((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// Whether the box encloses no area
    pub fn is_degenerate(&self) -> bool {
        self.area() <= 0.0
    }

    /// Check that every coordinate and the confidence are finite
    pub fn validate(&self) -> Result<(), InvalidDetection> {
        let fields = [
            ("x1", self.x1),
            ("y1", self.y1),
            ("x2", self.x2),
            ("y2", self.y2),
            ("confidence", self.confidence),
        ];

        match fields.into_iter().find(|(_, value)| !value.is_finite()) {
            Some((field, value)) => Err(InvalidDetection::new(field, value)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_geometry() {
        let det = Detection::new(150.0, 150.0, 250.0, 260.0, 0.98).with_label(1);

        assert_relative_eq!(det.width(), 100.0);
        assert_relative_eq!(det.height(), 110.0);
        assert_relative_eq!(det.area(), 11_000.0);
        assert_eq!(det.center(), (200.0, 205.0));
        assert_eq!(det.label, Label(1));
        assert!(!det.is_degenerate());
    }

    #[test]
    fn test_inverted_box_is_degenerate() {
        let det = Detection::new(10.0, 10.0, 5.0, 20.0, 0.5);
        assert_eq!(det.area(), 0.0);
        assert!(det.is_degenerate());
        assert!(det.validate().is_ok());
    }

    #[test]
    fn test_validate_reports_first_bad_field() {
        let det = Detection::new(0.0, f32::NAN, 1.0, f32::INFINITY, 0.5);
        let err = det.validate().unwrap_err();
        assert_eq!(err.field, "y1");
        assert!(err.value.is_nan());

        let det = Detection::new(0.0, 0.0, 1.0, 1.0, f32::NEG_INFINITY);
        assert_eq!(det.validate().unwrap_err().field, "confidence");
    }

    #[test]
    fn test_label_defaults_when_missing_from_json() {
        let det: Detection =
            serde_json::from_str(r#"{"x1":0,"y1":0,"x2":2,"y2":2,"confidence":0.5}"#).unwrap();
        assert_eq!(det.label, Label(0));

        let det: Detection =
            serde_json::from_str(r#"{"x1":0,"y1":0,"x2":2,"y2":2,"confidence":0.5,"label":7}"#)
                .unwrap();
        assert_eq!(det.label, Label(7));
    }
}
