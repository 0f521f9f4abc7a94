//! Leave-one-out evaluation of the classifier on a labeled dataset.

use serde::{Deserialize, Serialize};

use super::Classifier;
use crate::error::{ExecutionError, PersonaResult};
use crate::feature::FeatureVector;
use crate::record::PersonalityRecord;

/// Leave-one-out accuracy report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Records that were predicted against the rest of the dataset.
    pub evaluated: usize,
    /// Predictions that matched the record's own label.
    pub correct: usize,
    /// Records that could not be evaluated: unlabeled, an unknown answer, or
    /// too few remaining references.
    pub skipped: usize,
    /// `correct / evaluated`, `None` when nothing was evaluated.
    pub accuracy: Option<f64>,
}

impl Classifier {
    /// Predicts every labeled record from all the others and scores the result.
    ///
    /// # Errors
    ///
    /// Returns `ExecutionError::EmptyDataset` if `records` is empty.
    pub fn evaluate(&self, records: &[PersonalityRecord]) -> PersonaResult<Evaluation> {
        if records.is_empty() {
            return Err(ExecutionError::EmptyDataset.into());
        }

        let mut evaluated = 0usize;
        let mut correct = 0usize;
        for (pos, record) in records.iter().enumerate() {
            let (Some(label), Some(query)) = (record.label(), FeatureVector::from_record(record))
            else {
                continue;
            };
            match self.classify_excluding(records, &query, Some(pos)) {
                Ok(result) => {
                    evaluated += 1;
                    if result.personality == label {
                        correct += 1;
                    }
                }
                Err(err) => log::trace!("record {} not evaluated: {err}", record.id),
            }
        }

        #[allow(clippy::cast_precision_loss)]
        let accuracy = (evaluated > 0).then(|| correct as f64 / evaluated as f64);
        let evaluation = Evaluation {
            evaluated,
            correct,
            skipped: records.len() - evaluated,
            accuracy,
        };
        log::debug!(
            "leave-one-out: {}/{} correct, {} skipped",
            evaluation.correct,
            evaluation.evaluated,
            evaluation.skipped
        );
        Ok(evaluation)
    }
}
