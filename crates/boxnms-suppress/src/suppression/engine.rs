//! Greedy non-maximum suppression

use super::config::{SuppressionConfig, SuppressionMode};
use crate::overlap::Overlap;
use crate::traits::{Detector, NonMaxSuppression};
use boxnms_core::{Detection, DetectionSet, InvalidDetection, Label, Result};
use log::{debug, warn};
use std::cmp::Ordering;
use std::collections::BTreeMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Result of one suppression call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuppressionOutcome {
    /// Surviving detections, confidence descending
    pub kept: DetectionSet,
    /// Detections excluded from ranking because of non-finite fields
    pub skipped: Vec<InvalidDetection>,
    /// Number of detections handed to the engine
    pub raw_count: usize,
}

impl SuppressionOutcome {
    /// Detections removed by overlap or the confidence floor
    pub fn discarded(&self) -> usize {
        self.raw_count - self.kept.len() - self.skipped.len()
    }
}

/// Configured suppression engine
///
/// Holds no state between calls; every run is a pure function of its input
/// and the configuration.
#[derive(Debug, Clone)]
pub struct SuppressionEngine {
    config: SuppressionConfig,
}

impl SuppressionEngine {
    /// Create a new engine, validating the configuration
    pub fn new(config: SuppressionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the active configuration
    pub fn config(&self) -> &SuppressionConfig {
        &self.config
    }

    /// Suppress `detections`, returning the kept subset
    pub fn run(&self, detections: &[Detection]) -> SuppressionOutcome {
        let (kept, skipped) = self.suppress_indices(detections);

        debug!(
            "NMS kept {} of {} detections (threshold {}, {:?})",
            kept.len(),
            detections.len(),
            self.config.iou_threshold,
            self.config.mode
        );

        SuppressionOutcome {
            kept: kept.into_iter().map(|i| detections[i]).collect(),
            skipped,
            raw_count: detections.len(),
        }
    }

    /// Indices into `detections` of the survivors, in output order
    ///
    /// Invalid detections are left out of the ranking and returned
    /// alongside the kept indices.
    pub fn suppress_indices(&self, detections: &[Detection]) -> (Vec<usize>, Vec<InvalidDetection>) {
        let mut candidates = Vec::with_capacity(detections.len());
        let mut skipped = Vec::new();

        for (index, det) in detections.iter().enumerate() {
            match det.validate() {
                Ok(()) => candidates.push(index),
                Err(err) => {
                    let err = err.at(index);
                    warn!("Skipping {}", err);
                    skipped.push(err);
                }
            }
        }

        if let Some(min_confidence) = self.config.min_confidence {
            candidates.retain(|&i| detections[i].confidence >= min_confidence);
        }

        let threshold = self.config.iou_threshold;
        let kept = match self.config.mode {
            SuppressionMode::ClassAgnostic => greedy_nms(detections, candidates, threshold),
            SuppressionMode::ClassAware => class_aware_nms(detections, candidates, threshold),
        };

        (kept, skipped)
    }

    /// Run an external detector and suppress its raw output
    pub fn detect<D: Detector>(&self, detector: &D, image: &D::Image) -> anyhow::Result<SuppressionOutcome> {
        let raw = detector.infer(image)?;
        Ok(self.run(raw.as_slice()))
    }
}

impl Default for SuppressionEngine {
    fn default() -> Self {
        Self {
            config: SuppressionConfig::default(),
        }
    }
}

impl NonMaxSuppression for SuppressionEngine {
    fn apply_nms(&self, detections: &[Detection]) -> DetectionSet {
        self.run(detections).kept
    }
}

/// Class-agnostic greedy suppression with the given threshold
///
/// Thresholds outside `[0, 1]` are accepted: `<= 0` drops anything that
/// overlaps a kept box, `>= 1` keeps everything. A NaN threshold never
/// compares true, so nothing is suppressed. Invalid detections are skipped
/// with a warning.
pub fn suppress(detections: &[Detection], iou_threshold: f32) -> DetectionSet {
    let engine = SuppressionEngine {
        config: SuppressionConfig::class_agnostic().with_threshold(iou_threshold),
    };
    engine.run(detections).kept
}

/// Per-label greedy suppression with the given threshold
pub fn suppress_by_class(detections: &[Detection], iou_threshold: f32) -> DetectionSet {
    let engine = SuppressionEngine {
        config: SuppressionConfig::default().with_threshold(iou_threshold),
    };
    engine.run(detections).kept
}

/// Confidence descending; callers feed candidates in input order so the
/// stable sort keeps ties in that order.
fn rank(detections: &[Detection], candidates: &mut [usize]) {
    candidates.sort_by(|&a, &b| {
        detections[b]
            .confidence
            .partial_cmp(&detections[a].confidence)
            .unwrap_or(Ordering::Equal)
    });
}

/// Single greedy pass over `candidates`, returning kept indices in rank order
fn greedy_nms(detections: &[Detection], mut candidates: Vec<usize>, threshold: f32) -> Vec<usize> {
    rank(detections, &mut candidates);

    // indexed by rank position
    let mut suppressed = vec![false; candidates.len()];
    let mut keep = Vec::new();

    for i in 0..candidates.len() {
        if suppressed[i] {
            continue;
        }

        let current = &detections[candidates[i]];
        keep.push(candidates[i]);

        for j in (i + 1)..candidates.len() {
            if !suppressed[j] && current.overlaps(&detections[candidates[j]], threshold) {
                suppressed[j] = true;
            }
        }
    }

    keep
}

/// Suppress each label independently, then merge by confidence with ties
/// resolved by input position
fn class_aware_nms(detections: &[Detection], candidates: Vec<usize>, threshold: f32) -> Vec<usize> {
    let mut groups: BTreeMap<Label, Vec<usize>> = BTreeMap::new();
    for index in candidates {
        groups.entry(detections[index].label).or_default().push(index);
    }

    #[cfg(feature = "parallel")]
    let per_group: Vec<Vec<usize>> = groups
        .into_par_iter()
        .map(|(_, group)| greedy_nms(detections, group, threshold))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let per_group: Vec<Vec<usize>> = groups
        .into_values()
        .map(|group| greedy_nms(detections, group, threshold))
        .collect();

    let mut keep: Vec<usize> = per_group.into_iter().flatten().collect();
    keep.sort_by(|&a, &b| {
        detections[b]
            .confidence
            .partial_cmp(&detections[a].confidence)
            .unwrap_or(Ordering::Equal)
            .then(a.cmp(&b))
    });
    keep
}
