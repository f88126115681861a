//! Non-maximum suppression for object detector output
//!
//! Filters a raw, redundant set of detections down to the highest-confidence
//! box of each overlapping cluster, using Intersection-over-Union as the
//! overlap measure.
//!
//! ```
//! use boxnms_core::Detection;
//! use boxnms_suppress::suppress;
//!
//! let raw = [
//!     Detection::new(150.0, 150.0, 250.0, 250.0, 0.98),
//!     Detection::new(155.0, 148.0, 255.0, 248.0, 0.85),
//!     Detection::new(600.0, 100.0, 700.0, 200.0, 0.91),
//! ];
//! let kept = suppress(&raw, 0.45);
//! assert_eq!(kept.len(), 2);
//! ```

pub mod overlap;
pub mod suppression;

pub use overlap::{intersection_area, iou, Overlap};
pub use suppression::{
    suppress, suppress_by_class, SuppressionConfig, SuppressionEngine, SuppressionMode,
    SuppressionOutcome,
};

/// Seams to the outside of the suppression core
pub mod traits {
    use boxnms_core::{Detection, DetectionSet};

    /// External inference capability producing raw detections
    pub trait Detector {
        type Image;

        fn infer(&self, image: &Self::Image) -> anyhow::Result<DetectionSet>;
    }

    /// Trait for non-maximum suppression implementations
    pub trait NonMaxSuppression {
        fn apply_nms(&self, detections: &[Detection]) -> DetectionSet;
    }
}
