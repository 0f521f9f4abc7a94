//! Per-class summary statistics.
//!
//! Aggregation is a pure function of the borrowed records: no caching, no
//! side effects. A class with no members reports its mean as `None`, which
//! is distinct from a legitimate mean of `0.0`.

use serde::{Deserialize, Serialize};

use crate::error::{ExecutionError, PersonaResult};
use crate::record::{NumericFeatures, NumericField, Personality, PersonalityRecord};

/// Count and mean for one personality class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassStats {
    /// Number of records carrying this label.
    pub count: usize,
    /// Mean of the summarized field, `None` when `count == 0`.
    pub mean: Option<f64>,
}

impl ClassStats {
    fn from_values(values: impl Iterator<Item = f64>) -> Self {
        let values: Vec<f64> = values.collect();
        let count = values.len();
        let mean = (count > 0).then(|| mean_of(&values));
        Self { count, mean }
    }
}

/// Mean of a non-empty slice of finite values.
///
/// Falls back to a running mean when the plain sum overflows.
#[allow(clippy::cast_precision_loss)]
fn mean_of(values: &[f64]) -> f64 {
    let sum: f64 = values.iter().sum();
    if sum.is_finite() {
        return sum / values.len() as f64;
    }
    values
        .iter()
        .enumerate()
        .fold(0.0, |mean, (i, v)| mean + (v - mean) / (i + 1) as f64)
}

/// Per-class means of one numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldSummary {
    /// The summarized column.
    pub field: NumericField,
    pub extrovert: ClassStats,
    pub introvert: ClassStats,
}

impl FieldSummary {
    /// Returns the stats for one class.
    #[must_use]
    pub const fn class(&self, personality: Personality) -> &ClassStats {
        match personality {
            Personality::Extrovert => &self.extrovert,
            Personality::Introvert => &self.introvert,
        }
    }
}

/// Dataset overview: counts per class and mean friends-circle size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassSummary {
    /// Every record, labeled or not.
    pub total: usize,
    /// Records whose label is missing or unrecognized.
    pub unlabeled: usize,
    pub extrovert: ClassStats,
    pub introvert: ClassStats,
}

impl ClassSummary {
    /// Returns the stats for one class.
    #[must_use]
    pub const fn class(&self, personality: Personality) -> &ClassStats {
        match personality {
            Personality::Extrovert => &self.extrovert,
            Personality::Introvert => &self.introvert,
        }
    }

    /// Number of records carrying a known label.
    #[must_use]
    pub const fn labeled(&self) -> usize {
        self.extrovert.count + self.introvert.count
    }
}

/// Summarizes a dataset by personality class.
///
/// The class means are over `friends_circle_size`.
///
/// # Errors
///
/// Returns `ExecutionError::EmptyDataset` if `records` is empty.
///
/// # Example
/// ```
/// let text = "h\n1,0,No,0,0,No,10,0,Extrovert\n2,0,No,0,0,No,2,0,Introvert\n";
/// let summary = persona::summarize(&persona::parse(text).records).unwrap();
/// assert_eq!(summary.total, 2);
/// assert_eq!(summary.extrovert.mean, Some(10.0));
/// ```
pub fn summarize(records: &[PersonalityRecord]) -> PersonaResult<ClassSummary> {
    let friends = summarize_field(records, NumericField::FriendsCircleSize)?;
    let summary = ClassSummary {
        total: records.len(),
        unlabeled: records.len() - friends.extrovert.count - friends.introvert.count,
        extrovert: friends.extrovert,
        introvert: friends.introvert,
    };
    log::trace!(
        "summarized {} records ({} unlabeled)",
        summary.total,
        summary.unlabeled
    );
    Ok(summary)
}

/// Computes per-class means of any numeric field.
///
/// # Errors
///
/// Returns `ExecutionError::EmptyDataset` if `records` is empty.
pub fn summarize_field(
    records: &[PersonalityRecord],
    field: NumericField,
) -> PersonaResult<FieldSummary> {
    if records.is_empty() {
        return Err(ExecutionError::EmptyDataset.into());
    }

    Ok(FieldSummary {
        field,
        extrovert: ClassStats::from_values(class_values(records, Personality::Extrovert, field)),
        introvert: ClassStats::from_values(class_values(records, Personality::Introvert, field)),
    })
}

fn class_values(
    records: &[PersonalityRecord],
    personality: Personality,
    field: NumericField,
) -> impl Iterator<Item = f64> + '_ {
    records
        .iter()
        .filter(move |r| r.label() == Some(personality))
        .map(move |r| r.numeric(field))
}
