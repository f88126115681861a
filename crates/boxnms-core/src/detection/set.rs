//! Ordered collections of detections from one inference pass

use super::{Detection, Label};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Ordered sequence of detections, duplicates allowed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DetectionSet {
    detections: Vec<Detection>,
}

/// On-disk layouts accepted by [`DetectionSet::from_json_str`]
#[derive(Deserialize)]
#[serde(untagged)]
enum DetectionFile {
    Bare(Vec<Detection>),
    Wrapped { detections: Vec<Detection> },
}

impl DetectionSet {
    /// Create new empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from vector of detections
    pub fn from_vec(detections: Vec<Detection>) -> Self {
        Self { detections }
    }

    /// Append a detection
    pub fn push(&mut self, detection: Detection) {
        self.detections.push(detection);
    }

    /// Extend with another set
    pub fn extend(&mut self, other: DetectionSet) {
        self.detections.extend(other.detections);
    }

    /// Get detections as slice
    pub fn as_slice(&self) -> &[Detection] {
        &self.detections
    }

    /// Take the underlying vector
    pub fn into_vec(self) -> Vec<Detection> {
        self.detections
    }

    /// Get number of detections
    pub fn len(&self) -> usize {
        self.detections.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }

    /// Iterate in input order
    pub fn iter(&self) -> std::slice::Iter<'_, Detection> {
        self.detections.iter()
    }

    /// Keep detections with `confidence >= threshold`
    pub fn filter_by_confidence(mut self, threshold: f32) -> Self {
        self.detections.retain(|det| det.confidence >= threshold);
        self
    }

    /// Keep detections with the given label
    pub fn filter_by_label(mut self, label: Label) -> Self {
        self.detections.retain(|det| det.label == label);
        self
    }

    /// Detections grouped by label, labels in ascending order
    pub fn group_by_label(&self) -> BTreeMap<Label, Vec<&Detection>> {
        let mut groups: BTreeMap<Label, Vec<&Detection>> = BTreeMap::new();
        for det in &self.detections {
            groups.entry(det.label).or_default().push(det);
        }
        groups
    }

    /// Get statistics
    pub fn stats(&self) -> DetectionStats {
        let mut label_counts: BTreeMap<Label, usize> = BTreeMap::new();
        let mut total_confidence = 0.0;
        let mut max_confidence = f32::NEG_INFINITY;
        let mut min_confidence = f32::INFINITY;

        for det in &self.detections {
            *label_counts.entry(det.label).or_insert(0) += 1;
            total_confidence += det.confidence;
            max_confidence = max_confidence.max(det.confidence);
            min_confidence = min_confidence.min(det.confidence);
        }

        if self.detections.is_empty() {
            return DetectionStats::default();
        }

        DetectionStats {
            total: self.detections.len(),
            label_counts,
            avg_confidence: total_confidence / self.detections.len() as f32,
            max_confidence,
            min_confidence,
        }
    }

    /// Parse a bare JSON array or an object with a `detections` array
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let file: DetectionFile =
            serde_json::from_str(json).context("Failed to parse detections JSON")?;
        let detections = match file {
            DetectionFile::Bare(detections) => detections,
            DetectionFile::Wrapped { detections } => detections,
        };
        Ok(Self::from_vec(detections))
    }

    /// Load detections from a JSON file
    pub fn load_json<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read detections from: {:?}", path))?;
        Self::from_json_str(&json).with_context(|| format!("Invalid detections file: {:?}", path))
    }

    /// Serialize as a pretty-printed JSON array
    pub fn to_json_pretty(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize detections")
    }

    /// Write detections to a JSON file
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json_pretty()?)
            .with_context(|| format!("Failed to write detections to: {:?}", path))
    }
}

impl From<Vec<Detection>> for DetectionSet {
    fn from(detections: Vec<Detection>) -> Self {
        Self::from_vec(detections)
    }
}

impl IntoIterator for DetectionSet {
    type Item = Detection;
    type IntoIter = std::vec::IntoIter<Detection>;

    fn into_iter(self) -> Self::IntoIter {
        self.detections.into_iter()
    }
}

impl<'a> IntoIterator for &'a DetectionSet {
    type Item = &'a Detection;
    type IntoIter = std::slice::Iter<'a, Detection>;

    fn into_iter(self) -> Self::IntoIter {
        self.detections.iter()
    }
}

impl FromIterator<Detection> for DetectionSet {
    fn from_iter<T: IntoIterator<Item = Detection>>(iter: T) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

/// Summary of a detection set
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DetectionStats {
    pub total: usize,
    pub label_counts: BTreeMap<Label, usize>,
    pub avg_confidence: f32,
    pub max_confidence: f32,
    pub min_confidence: f32,
}
