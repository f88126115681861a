//! Suppression engine and its configuration

pub mod config;
pub mod engine;

pub use config::{SuppressionConfig, SuppressionMode, DEFAULT_IOU_THRESHOLD};
pub use engine::{suppress, suppress_by_class, SuppressionEngine, SuppressionOutcome};
