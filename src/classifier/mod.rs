//! Nearest-neighbor personality classifier.
//!
//! The classifier has no training phase. Each call scales the labeled
//! reference records and the query onto the reference population's
//! min-max range, measures the distance to every reference record, and
//! lets the `k` closest vote. The result lists those neighbors so every
//! prediction can be traced back to specific records.
//!
//! Voting is deterministic:
//! - neighbors are ordered by distance, then record `id`, then input position;
//! - the class with most votes wins;
//! - a vote tie goes to the class whose voters are closer on average;
//! - an exact average tie goes to the class of the closest neighbor.

mod config;
mod evaluate;
mod scaling;

pub use config::{ClassifierConfig, DistanceMetric};
pub use evaluate::Evaluation;
pub use scaling::FeatureScale;

use serde::{Deserialize, Serialize};

use crate::error::{ExecutionError, PersonaResult, ValidationError};
use crate::feature::FeatureVector;
use crate::record::{
    sanitize_numeric, Categorical, Label, NumericFeatures, NumericField, Personality,
    PersonalityRecord, Response,
};

/// One reference record that took part in a vote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    /// Source `id` of the reference record.
    pub id: i64,
    pub personality: Personality,
    /// Distance from the query in the scaled feature space.
    pub distance: f64,
}

/// Vote tally among the selected neighbors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Votes {
    pub extrovert: usize,
    pub introvert: usize,
}

impl Votes {
    /// Votes cast for one class.
    #[must_use]
    pub const fn of(&self, personality: Personality) -> usize {
        match personality {
            Personality::Extrovert => self.extrovert,
            Personality::Introvert => self.introvert,
        }
    }

    fn record(&mut self, personality: Personality) {
        match personality {
            Personality::Extrovert => self.extrovert += 1,
            Personality::Introvert => self.introvert += 1,
        }
    }
}

/// Outcome of a classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// The predicted class.
    pub personality: Personality,
    /// Share of the `k` neighbors that voted for the prediction, in `[0, 1]`.
    pub confidence: f64,
    /// Average distance of the neighbors that voted for the prediction.
    pub score: f64,
    /// Number of neighbors that actually voted.
    pub k: usize,
    pub votes: Votes,
    /// The voting neighbors, closest first.
    pub neighbors: Vec<Neighbor>,
}

/// A configured k-nearest-neighbor classifier.
///
/// Holds only its configuration; the reference set is passed to every
/// call, so edits to the dataset are reflected in the next prediction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classifier {
    config: ClassifierConfig,
}

impl Classifier {
    /// Creates a classifier from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidConfig` if the configuration is invalid.
    pub fn new(config: ClassifierConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub const fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Predicts the personality class of `query`.
    ///
    /// Only records with a known label are used as references.
    ///
    /// # Errors
    ///
    /// Returns `ExecutionError::EmptyDataset` if there is no labeled record,
    /// and `ExecutionError::InsufficientData` if there are fewer than
    /// `min_labeled`.
    pub fn classify(
        &self,
        reference: &[PersonalityRecord],
        query: &FeatureVector,
    ) -> PersonaResult<PredictionResult> {
        self.classify_excluding(reference, query, None)
    }

    /// Classifies with the record at position `exclude` left out of the reference set.
    pub(crate) fn classify_excluding(
        &self,
        reference: &[PersonalityRecord],
        query: &FeatureVector,
        exclude: Option<usize>,
    ) -> PersonaResult<PredictionResult> {
        let labeled: Vec<(usize, &PersonalityRecord, Personality)> = reference
            .iter()
            .enumerate()
            .filter(|(pos, _)| Some(*pos) != exclude)
            .filter_map(|(pos, r)| r.label().map(|label| (pos, r, label)))
            .collect();

        if labeled.is_empty() {
            return Err(ExecutionError::EmptyDataset.into());
        }
        if labeled.len() < self.config.min_labeled {
            return Err(ExecutionError::InsufficientData {
                required: self.config.min_labeled,
                available: labeled.len(),
            }
            .into());
        }

        let scale = FeatureScale::fit(labeled.iter().map(|(_, r, _)| *r));
        let mut ranked: Vec<(usize, Neighbor)> = labeled
            .iter()
            .map(|&(pos, r, personality)| {
                let neighbor = Neighbor {
                    id: r.id,
                    personality,
                    distance: self.distance(&scale, r, query),
                };
                (pos, neighbor)
            })
            .collect();

        ranked.sort_by(|(pa, a), (pb, b)| {
            a.distance
                .total_cmp(&b.distance)
                .then(a.id.cmp(&b.id))
                .then(pa.cmp(pb))
        });

        let k = self.config.k.min(ranked.len());
        let neighbors: Vec<Neighbor> = ranked.into_iter().take(k).map(|(_, n)| n).collect();
        let result = decide(neighbors);

        log::debug!(
            "predicted {} (confidence {:.3}, k={}, metric={})",
            result.personality,
            result.confidence,
            result.k,
            self.config.metric.name()
        );
        Ok(result)
    }

    fn distance(
        &self,
        scale: &FeatureScale,
        record: &PersonalityRecord,
        query: &FeatureVector,
    ) -> f64 {
        let numeric = NumericField::ALL.into_iter().map(|field| {
            scale.scale(field, sanitize_numeric(query.numeric(field)))
                - scale.scale(field, record.numeric(field))
        });
        let categorical = [
            mismatch(&record.stage_fear, query.stage_fear),
            mismatch(&record.drained_after_socializing, query.drained_after_socializing),
        ];
        self.config.metric.combine(numeric.chain(categorical))
    }
}

/// Predicts with the default configuration (`k = 5`, Euclidean).
///
/// # Errors
///
/// See [`Classifier::classify`].
///
/// # Example
/// ```
/// use persona::{classify, parse, FeatureVector, Personality};
///
/// let text = "h\n1,9,Yes,1,1,Yes,2,1,Introvert\n2,1,No,9,8,No,14,9,Extrovert\n";
/// let records = parse(text).records;
/// let query = FeatureVector::builder()
///     .time_spent_alone(8.0)
///     .stage_fear("Yes")
///     .drained_after_socializing("Yes")
///     .friends_circle_size(3.0)
///     .build()
///     .unwrap();
/// let result = classify(&records, &query).unwrap();
/// assert_eq!(result.personality, Personality::Introvert);
/// ```
pub fn classify(
    reference: &[PersonalityRecord],
    query: &FeatureVector,
) -> PersonaResult<PredictionResult> {
    Classifier::default().classify(reference, query)
}

/// 0 when the reference answer equals the query, 1 otherwise.
///
/// Missing and unrecognized reference answers never equal a query answer.
fn mismatch(reference: &Categorical<Response>, query: Response) -> f64 {
    if reference.known() == Some(query) {
        0.0
    } else {
        1.0
    }
}

struct Tally {
    personality: Personality,
    votes: usize,
    distance_sum: f64,
    first_rank: usize,
}

impl Tally {
    #[allow(clippy::cast_precision_loss)]
    fn mean_distance(&self) -> f64 {
        self.distance_sum / self.votes as f64
    }
}

/// Majority vote over a non-empty, ordered neighbor list.
fn decide(neighbors: Vec<Neighbor>) -> PredictionResult {
    let mut votes = Votes::default();
    let mut tallies: Vec<Tally> = Vec::with_capacity(Personality::ALL.len());

    for (rank, n) in neighbors.iter().enumerate() {
        votes.record(n.personality);
        match tallies.iter_mut().find(|t| t.personality == n.personality) {
            Some(t) => {
                t.votes += 1;
                t.distance_sum += n.distance;
            }
            None => tallies.push(Tally {
                personality: n.personality,
                votes: 1,
                distance_sum: n.distance,
                first_rank: rank,
            }),
        }
    }

    tallies.sort_by(|a, b| {
        b.votes
            .cmp(&a.votes)
            .then(a.mean_distance().total_cmp(&b.mean_distance()))
            .then(a.first_rank.cmp(&b.first_rank))
    });
    let winner = &tallies[0];

    let k = neighbors.len();
    #[allow(clippy::cast_precision_loss)]
    let confidence = winner.votes as f64 / k as f64;

    PredictionResult {
        personality: winner.personality,
        confidence,
        score: winner.mean_distance(),
        k,
        votes,
        neighbors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PersonaError;

    fn record(id: i64, alone: f64, label: Personality) -> PersonalityRecord {
        PersonalityRecord {
            id,
            time_spent_alone: alone,
            stage_fear: Response::No.into(),
            social_event_attendance: 5.0,
            going_outside: 3.0,
            drained_after_socializing: Response::No.into(),
            friends_circle_size: 8.0,
            post_frequency: 4.0,
            personality: label.into(),
        }
    }

    fn query(alone: f64) -> FeatureVector {
        FeatureVector::builder()
            .time_spent_alone(alone)
            .stage_fear("No")
            .social_event_attendance(5.0)
            .going_outside(3.0)
            .drained_after_socializing("No")
            .friends_circle_size(8.0)
            .post_frequency(4.0)
            .build()
            .unwrap()
    }

    fn k(k: usize) -> Classifier {
        Classifier::new(ClassifierConfig::default().with_k(k)).unwrap()
    }

    #[test]
    fn test_majority_of_three_nearest() {
        let reference = vec![
            record(1, 0.0, Personality::Extrovert),
            record(2, 1.0, Personality::Extrovert),
            record(3, 2.0, Personality::Introvert),
            record(4, 9.0, Personality::Introvert),
            record(5, 10.0, Personality::Introvert),
        ];
        let result = k(3).classify(&reference, &query(0.0)).unwrap();

        assert_eq!(result.personality, Personality::Extrovert);
        assert_eq!(result.k, 3);
        assert!((result.confidence - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(result.votes, Votes { extrovert: 2, introvert: 1 });
        let ids: Vec<i64> = result.neighbors.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_unanimous_neighborhood_has_full_confidence() {
        let reference = vec![
            record(1, 9.0, Personality::Introvert),
            record(2, 10.0, Personality::Introvert),
            record(3, 0.0, Personality::Extrovert),
        ];
        let result = k(2).classify(&reference, &query(10.0)).unwrap();
        assert_eq!(result.personality, Personality::Introvert);
        assert!((result.confidence - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_k_larger_than_reference_degrades() {
        let reference = vec![
            record(1, 0.0, Personality::Extrovert),
            record(2, 10.0, Personality::Introvert),
        ];
        let result = k(50).classify(&reference, &query(1.0)).unwrap();
        assert_eq!(result.k, 2);
        assert_eq!(result.neighbors.len(), 2);
    }

    #[test]
    fn test_vote_tie_broken_by_average_distance() {
        let reference = vec![
            record(1, 0.0, Personality::Introvert),
            record(2, 3.0, Personality::Extrovert),
            record(3, 4.0, Personality::Extrovert),
            record(4, 10.0, Personality::Introvert),
        ];
        // From 3.5: Extrovert voters at 0.05 each, Introvert voters at 0.35 and 0.65.
        let result = k(4).classify(&reference, &query(3.5)).unwrap();
        assert_eq!(result.votes, Votes { extrovert: 2, introvert: 2 });
        assert_eq!(result.personality, Personality::Extrovert);
        assert!((result.confidence - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_exact_tie_goes_to_closest_neighbor() {
        let reference = vec![
            record(7, 0.0, Personality::Introvert),
            record(3, 10.0, Personality::Extrovert),
        ];
        // Equidistant: ordering falls back to id, so record 3 ranks first.
        let result = k(2).classify(&reference, &query(5.0)).unwrap();
        assert_eq!(result.neighbors[0].id, 3);
        assert_eq!(result.personality, Personality::Extrovert);

        let swapped = vec![
            record(7, 0.0, Personality::Extrovert),
            record(3, 10.0, Personality::Introvert),
        ];
        let result = k(2).classify(&swapped, &query(5.0)).unwrap();
        assert_eq!(result.personality, Personality::Introvert);
    }

    #[test]
    fn test_categorical_mismatch_counts_as_one() {
        let mut yes = record(1, 0.0, Personality::Introvert);
        yes.stage_fear = Response::Yes.into();
        let no = record(2, 0.0, Personality::Extrovert);

        let result = k(2).classify(&[yes, no], &query(0.0)).unwrap();
        assert_eq!(result.neighbors[0].id, 2);
        assert_eq!(result.neighbors[0].distance, 0.0);
        assert!((result.neighbors[1].distance - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_answer_never_matches() {
        let mut unknown = record(1, 0.0, Personality::Introvert);
        unknown.drained_after_socializing = Categorical::Missing;
        let result = k(1).classify(&[unknown], &query(0.0)).unwrap();
        assert!((result.neighbors[0].distance - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_scaling_stops_large_features_dominating() {
        // Raw attendance differs by 20, raw alone time by 2; both span their full range.
        let mut a = record(1, 0.0, Personality::Extrovert);
        a.social_event_attendance = 0.0;
        let mut b = record(2, 2.0, Personality::Introvert);
        b.social_event_attendance = 20.0;
        let mut q = query(0.0);
        q.social_event_attendance = 20.0;

        let result = k(2).classify(&[a, b], &q).unwrap();
        assert!((result.neighbors[0].distance - result.neighbors[1].distance).abs() < 1e-12);
    }

    #[test]
    fn test_far_out_query_still_votes_by_features() {
        let reference = vec![
            record(1, 0.0, Personality::Introvert),
            record(2, 10.0, Personality::Extrovert),
            record(3, 10.0, Personality::Extrovert),
        ];
        let result = k(1).classify(&reference, &query(1e200)).unwrap();

        assert_eq!(result.personality, Personality::Extrovert);
        assert_eq!(result.neighbors[0].id, 2);
        assert_eq!(result.neighbors[0].distance, 0.0);
        assert!(result.score.is_finite());
    }

    #[test]
    fn test_manhattan_metric() {
        let reference = vec![
            record(1, 0.0, Personality::Extrovert),
            record(2, 4.0, Personality::Introvert),
        ];
        let mut q = query(1.0);
        q.stage_fear = Response::Yes;
        let classifier = Classifier::new(
            ClassifierConfig::default()
                .with_k(1)
                .with_metric(DistanceMetric::Manhattan),
        )
        .unwrap();
        let result = classifier.classify(&reference, &q).unwrap();
        assert!((result.neighbors[0].distance - 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_unlabeled_records_are_ignored() {
        let mut stray = record(1, 0.0, Personality::Introvert);
        stray.personality = Categorical::Unrecognized("Ambivert".to_string());
        let reference = vec![stray, record(2, 5.0, Personality::Extrovert)];
        let result = k(5).classify(&reference, &query(0.0)).unwrap();
        assert_eq!(result.k, 1);
        assert_eq!(result.personality, Personality::Extrovert);
    }

    #[test]
    fn test_empty_reference_set() {
        let err = classify(&[], &query(0.0)).unwrap_err();
        assert!(err.is_empty_dataset());

        let mut unlabeled = record(1, 0.0, Personality::Introvert);
        unlabeled.personality = Categorical::Missing;
        let err = classify(&[unlabeled], &query(0.0)).unwrap_err();
        assert!(err.is_empty_dataset());
    }

    #[test]
    fn test_insufficient_data() {
        let classifier =
            Classifier::new(ClassifierConfig::default().with_min_labeled(3)).unwrap();
        let reference = vec![
            record(1, 0.0, Personality::Extrovert),
            record(2, 1.0, Personality::Introvert),
        ];
        let err = classifier.classify(&reference, &query(0.0)).unwrap_err();
        assert_eq!(
            err,
            PersonaError::from(ExecutionError::InsufficientData {
                required: 3,
                available: 2,
            })
        );
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(Classifier::new(ClassifierConfig::default().with_k(0)).is_err());
    }

    #[test]
    fn test_classify_does_not_mutate_reference() {
        let reference = vec![
            record(1, 0.0, Personality::Extrovert),
            record(2, 1.0, Personality::Introvert),
        ];
        let before = reference.clone();
        let first = classify(&reference, &query(0.3)).unwrap();
        let second = classify(&reference, &query(0.3)).unwrap();
        assert_eq!(reference, before);
        assert_eq!(first, second);
    }
}
