//! Error types for persona.
//!
//! All errors are strongly typed using thiserror so that callers can
//! render a specific message per condition. Row-level parse problems are
//! not errors in this sense: they are collected as [`RowError`] values
//! alongside the records that did parse.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors that occur while checking caller-supplied input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid value '{value}' for feature '{field}' (expected Yes or No)")]
    InvalidFeatureValue {
        field: String,
        value: String,
    },

    #[error("Required field '{field}' is missing")]
    MissingField {
        field: String,
    },

    #[error("Invalid classifier configuration: {reason}")]
    InvalidConfig {
        reason: String,
    },
}

/// Dataset-level conditions raised while aggregating or classifying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    #[error("Dataset has no usable records")]
    EmptyDataset,

    #[error("Not enough labeled records to predict (need {required}, have {available})")]
    InsufficientData {
        required: usize,
        available: usize,
    },
}

/// Top-level error type for persona.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersonaError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),
}

impl PersonaError {
    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is an execution error.
    #[must_use]
    pub const fn is_execution(&self) -> bool {
        matches!(self, Self::Execution(_))
    }

    /// Returns true if the dataset had nothing to work with.
    #[must_use]
    pub const fn is_empty_dataset(&self) -> bool {
        matches!(self, Self::Execution(ExecutionError::EmptyDataset))
    }

    /// Returns true if there were too few labeled records to predict.
    #[must_use]
    pub const fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::Execution(ExecutionError::InsufficientData { .. }))
    }
}

/// Result type alias for persona operations.
pub type PersonaResult<T> = Result<T, PersonaError>;

/// Why a source row was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowErrorKind {
    /// The row has no `id` field at all, or it is empty.
    MissingId,
    /// The `id` field is present but is not an integer.
    InvalidId,
}

impl fmt::Display for RowErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingId => write!(f, "missing id"),
            Self::InvalidId => write!(f, "id is not an integer"),
        }
    }
}

/// A single rejected source row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("line {line}: {kind} in {raw:?}")]
pub struct RowError {
    /// 1-based line number in the source text (the header is line 1).
    pub line: usize,
    /// The raw line content, untrimmed.
    pub raw: String,
    /// What went wrong.
    pub kind: RowErrorKind,
}
