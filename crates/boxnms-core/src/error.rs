//! Error types for detection validation and suppression

use thiserror::Error;

/// A detection carrying a non-finite coordinate or confidence
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("invalid detection{}: {field} is {value}", .index.map(|i| format!(" at index {i}")).unwrap_or_default())]
pub struct InvalidDetection {
    /// Position in the input sequence, when known
    pub index: Option<usize>,
    pub field: &'static str,
    pub value: f32,
}

impl InvalidDetection {
    pub fn new(field: &'static str, value: f32) -> Self {
        Self {
            index: None,
            field,
            value,
        }
    }

    /// Attach the input position of the offending detection
    pub fn at(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

/// Errors raised by the suppression engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SuppressError {
    #[error("IoU threshold {0} is outside [0, 1]")]
    InvalidThreshold(f32),

    #[error("minimum confidence {0} is not finite")]
    InvalidMinConfidence(f32),

    #[error(transparent)]
    InvalidDetection(#[from] InvalidDetection),
}

pub type Result<T> = std::result::Result<T, SuppressError>;
