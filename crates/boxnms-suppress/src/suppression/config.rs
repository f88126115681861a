//! Suppression configuration

use anyhow::Context;
use boxnms_core::{Result, SuppressError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Threshold used by the reference pipeline
pub const DEFAULT_IOU_THRESHOLD: f32 = 0.45;

/// How labels partition the candidates before suppression
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuppressionMode {
    /// Suppress only within a label; different classes never erase each other
    #[default]
    ClassAware,
    /// Suppress across all labels
    ClassAgnostic,
}

/// Suppression engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuppressionConfig {
    /// Overlap above which a lower-ranked detection is discarded (strict `>`)
    pub iou_threshold: f32,
    pub mode: SuppressionMode,
    /// Reject thresholds outside `[0, 1]` instead of accepting them
    pub strict_threshold: bool,
    /// Drop detections below this confidence before ranking
    pub min_confidence: Option<f32>,
}

impl Default for SuppressionConfig {
    fn default() -> Self {
        Self {
            iou_threshold: DEFAULT_IOU_THRESHOLD,
            mode: SuppressionMode::ClassAware,
            strict_threshold: false,
            min_confidence: None,
        }
    }
}

impl SuppressionConfig {
    /// Suppress across labels
    pub fn class_agnostic() -> Self {
        Self {
            mode: SuppressionMode::ClassAgnostic,
            ..Default::default()
        }
    }

    /// Threshold of 1.0: nothing is ever suppressed
    pub fn disabled() -> Self {
        Self {
            iou_threshold: 1.0,
            ..Default::default()
        }
    }

    /// Strict validation with the given threshold
    pub fn strict(iou_threshold: f32) -> Self {
        Self {
            iou_threshold,
            strict_threshold: true,
            ..Default::default()
        }
    }

    /// Set the IoU threshold
    pub fn with_threshold(mut self, iou_threshold: f32) -> Self {
        self.iou_threshold = iou_threshold;
        self
    }

    /// Set the label partitioning
    pub fn with_mode(mut self, mode: SuppressionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set a confidence floor applied before ranking
    pub fn with_min_confidence(mut self, min_confidence: f32) -> Self {
        self.min_confidence = Some(min_confidence);
        self
    }

    /// Check the threshold against the configured strictness
    ///
    /// NaN is always rejected. Other out-of-range values pass unless
    /// `strict_threshold` is set: `<= 0` suppresses any overlap, `>= 1`
    /// suppresses nothing. A confidence floor must be finite.
    pub fn validate(&self) -> Result<()> {
        let t = self.iou_threshold;
        if t.is_nan() || (self.strict_threshold && !(0.0..=1.0).contains(&t)) {
            return Err(SuppressError::InvalidThreshold(t));
        }
        match self.min_confidence {
            Some(floor) if !floor.is_finite() => Err(SuppressError::InvalidMinConfidence(floor)),
            _ => Ok(()),
        }
    }

    /// Load configuration from a JSON file, missing fields take defaults
    pub fn load_json<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {:?}", path))?;
        serde_json::from_str(&json).with_context(|| format!("Invalid config file: {:?}", path))
    }
}
