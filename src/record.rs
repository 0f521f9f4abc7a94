//! Survey record types.
//!
//! A [`PersonalityRecord`] is one respondent row. The categorical columns
//! are closed enums wrapped in [`Categorical`], which also keeps the two
//! states the source format allows besides a recognized value: an empty
//! cell and an out-of-set spelling.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A closed set of labels that has a canonical source spelling.
pub trait Label: Copy + Eq + Sized + 'static {
    /// Every variant, in a fixed order.
    const ALL: &'static [Self];

    /// The spelling used in source data.
    fn as_str(&self) -> &'static str;

    /// Looks up a variant by its exact source spelling.
    fn from_label(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == raw)
    }
}

/// Personality class, the ground-truth label of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Personality {
    Extrovert,
    Introvert,
}

impl Label for Personality {
    const ALL: &'static [Self] = &[Self::Extrovert, Self::Introvert];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Extrovert => "Extrovert",
            Self::Introvert => "Introvert",
        }
    }
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Yes/No survey answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Response {
    Yes,
    No,
}

impl Label for Response {
    const ALL: &'static [Self] = &[Self::Yes, Self::No];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A categorical cell as it appeared in the source.
///
/// `Missing` is the empty cell (for `drained_after_socializing` this is the
/// "Unknown" answer). `Unrecognized` keeps the raw text of a value outside
/// the label set; the parser does not reject it, consumers that need a
/// decision do.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Categorical<T> {
    Known(T),
    Missing,
    Unrecognized(String),
}

impl<T: Label> Categorical<T> {
    /// Interprets a trimmed source cell.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::Missing;
        }
        match T::from_label(raw) {
            Some(v) => Self::Known(v),
            None => Self::Unrecognized(raw.to_string()),
        }
    }

    /// The text this cell serializes back to.
    #[must_use]
    pub fn as_raw(&self) -> &str {
        match self {
            Self::Known(v) => v.as_str(),
            Self::Missing => "",
            Self::Unrecognized(raw) => raw,
        }
    }

    /// Returns the recognized value, if any.
    #[must_use]
    pub fn known(&self) -> Option<T> {
        match self {
            Self::Known(v) => Some(*v),
            _ => None,
        }
    }

    /// True for an empty source cell.
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl<T> From<T> for Categorical<T> {
    fn from(value: T) -> Self {
        Self::Known(value)
    }
}

/// The numeric survey columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    TimeSpentAlone,
    SocialEventAttendance,
    GoingOutside,
    FriendsCircleSize,
    PostFrequency,
}

impl NumericField {
    /// All numeric columns in source order.
    pub const ALL: [Self; 5] = [
        Self::TimeSpentAlone,
        Self::SocialEventAttendance,
        Self::GoingOutside,
        Self::FriendsCircleSize,
        Self::PostFrequency,
    ];

    /// Short stable identifier suitable for logging/debugging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::TimeSpentAlone => "time_spent_alone",
            Self::SocialEventAttendance => "social_event_attendance",
            Self::GoingOutside => "going_outside",
            Self::FriendsCircleSize => "friends_circle_size",
            Self::PostFrequency => "post_frequency",
        }
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Applies the numeric defaulting rule: non-finite or negative values become `0`.
#[must_use]
pub fn sanitize_numeric(value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        0.0
    }
}

/// Anything that carries the five numeric survey columns.
pub trait NumericFeatures {
    /// Reads one numeric column.
    fn numeric(&self, field: NumericField) -> f64;
}

/// One respondent's survey row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalityRecord {
    /// Source-assigned identifier, unique within a dataset.
    pub id: i64,
    pub time_spent_alone: f64,
    pub stage_fear: Categorical<Response>,
    pub social_event_attendance: f64,
    pub going_outside: f64,
    /// `Missing` is the "Unknown" answer and is kept as such.
    pub drained_after_socializing: Categorical<Response>,
    pub friends_circle_size: f64,
    pub post_frequency: f64,
    pub personality: Categorical<Personality>,
}

impl PersonalityRecord {
    /// Returns the ground-truth label when it is one of the known classes.
    #[must_use]
    pub fn label(&self) -> Option<Personality> {
        self.personality.known()
    }
}

impl NumericFeatures for PersonalityRecord {
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
