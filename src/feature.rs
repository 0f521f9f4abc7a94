//! Query feature vectors for classification.
//!
//! A [`FeatureVector`] is a record without `id` and label. Its categorical
//! answers are plain [`Response`] values: a predictor always receives a
//! decision, so the builder rejects empty or out-of-set answers before any
//! distance is computed.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::record::{
    sanitize_numeric, Label, NumericFeatures, NumericField, PersonalityRecord, Response,
};

/// An unlabeled respondent submitted for prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub time_spent_alone: f64,
    pub stage_fear: Response,
    pub social_event_attendance: f64,
    pub going_outside: f64,
    pub drained_after_socializing: Response,
    pub friends_circle_size: f64,
    pub post_frequency: f64,
}

impl FeatureVector {
    /// Creates a builder for a query vector.
    #[must_use]
    pub fn builder() -> FeatureVectorBuilder {
        FeatureVectorBuilder::new()
    }

    /// Projects a record onto its features.
    ///
    /// Returns `None` when either categorical answer is missing or
    /// unrecognized.
    #[must_use]
    pub fn from_record(record: &PersonalityRecord) -> Option<Self> {
        Some(Self {
            time_spent_alone: record.time_spent_alone,
            stage_fear: record.stage_fear.known()?,
            social_event_attendance: record.social_event_attendance,
            going_outside: record.going_outside,
            drained_after_socializing: record.drained_after_socializing.known()?,
            friends_circle_size: record.friends_circle_size,
            post_frequency: record.post_frequency,
        })
    }
}

impl NumericFeatures for FeatureVector {
    fn numeric(&self, field: NumericField) -> f64 {
        match field {
            NumericField::TimeSpentAlone => self.time_spent_alone,
            NumericField::SocialEventAttendance => self.social_event_attendance,
            NumericField::GoingOutside => self.going_outside,
            NumericField::FriendsCircleSize => self.friends_circle_size,
            NumericField::PostFrequency => self.post_frequency,
        }
    }
}

/// Builder for [`FeatureVector`].
///
/// Numeric fields that are never set default to `0`, the same rule the
/// parser applies. Both categorical answers are required.
///
/// # Example
/// ```
/// use persona::FeatureVector;
///
/// let query = FeatureVector::builder()
///     .time_spent_alone(2.0)
///     .stage_fear("No")
///     .social_event_attendance(7.0)
///     .going_outside(5.0)
///     .drained_after_socializing("No")
///     .friends_circle_size(12.0)
///     .post_frequency(6.0)
///     .build()
///     .unwrap();
/// assert_eq!(query.friends_circle_size, 12.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FeatureVectorBuilder {
    time_spent_alone: f64,
    stage_fear: Option<String>,
    social_event_attendance: f64,
    going_outside: f64,
    drained_after_socializing: Option<String>,
    friends_circle_size: f64,
    post_frequency: f64,
}

impl FeatureVectorBuilder {
    /// Creates a new builder with every numeric field at `0`.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn time_spent_alone(mut self, value: f64) -> Self {
        self.time_spent_alone = value;
        self
    }

    /// Set the stage fear answer, `"Yes"` or `"No"` (required).
    #[must_use]
    pub fn stage_fear(mut self, answer: impl Into<String>) -> Self {
        self.stage_fear = Some(answer.into());
        self
    }

    #[must_use]
    pub fn social_event_attendance(mut self, value: f64) -> Self {
        self.social_event_attendance = value;
        self
    }

    #[must_use]
    pub fn going_outside(mut self, value: f64) -> Self {
        self.going_outside = value;
        self
    }

    /// Set the drained-after-socializing answer, `"Yes"` or `"No"` (required).
    #[must_use]
    pub fn drained_after_socializing(mut self, answer: impl Into<String>) -> Self {
        self.drained_after_socializing = Some(answer.into());
        self
    }

    #[must_use]
    pub fn friends_circle_size(mut self, value: f64) -> Self {
        self.friends_circle_size = value;
        self
    }

    #[must_use]
    pub fn post_frequency(mut self, value: f64) -> Self {
        self.post_frequency = value;
        self
    }

    /// Sets one numeric field by name.
    #[must_use]
    pub fn numeric(self, field: NumericField, value: f64) -> Self {
        match field {
            NumericField::TimeSpentAlone => self.time_spent_alone(value),
            NumericField::SocialEventAttendance => self.social_event_attendance(value),
            NumericField::GoingOutside => self.going_outside(value),
            NumericField::FriendsCircleSize => self.friends_circle_size(value),
            NumericField::PostFrequency => self.post_frequency(value),
        }
    }

    /// Build the query vector.
    ///
    /// Returns `ValidationError::MissingField` if a categorical answer was not set.
    /// Returns `ValidationError::InvalidFeatureValue` if it is not `Yes` or `No`.
    pub fn build(self) -> Result<FeatureVector, ValidationError> {
        let stage_fear = require_response("stage_fear", self.stage_fear)?;
        let drained_after_socializing =
            require_response("drained_after_socializing", self.drained_after_socializing)?;

        Ok(FeatureVector {
            time_spent_alone: sanitize_numeric(self.time_spent_alone),
            stage_fear,
            social_event_attendance: sanitize_numeric(self.social_event_attendance),
            going_outside: sanitize_numeric(self.going_outside),
            drained_after_socializing,
            friends_circle_size: sanitize_numeric(self.friends_circle_size),
            post_frequency: sanitize_numeric(self.post_frequency),
        })
    }
}

fn require_response(field: &str, raw: Option<String>) -> Result<Response, ValidationError> {
    let raw = raw.ok_or_else(|| ValidationError::MissingField {
        field: field.to_string(),
    })?;
    Response::from_label(raw.trim()).ok_or_else(|| ValidationError::InvalidFeatureValue {
        field: field.to_string(),
        value: raw,
    })
}

impl From<Response> for String {
    fn from(answer: Response) -> Self {
        answer.as_str().to_string()
    }
}
