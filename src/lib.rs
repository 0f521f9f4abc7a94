//! # persona - personality survey ingestion and classification
//!
//! persona turns raw survey exports into typed records, summarizes them per
//! personality class, and predicts the class of a new respondent with an
//! explainable nearest-neighbor vote.
//!
//! ## Core Concepts
//!
//! - **Record**: one respondent row with nine positional attributes
//! - **Reference set**: the labeled records a prediction is compared against
//! - **Feature vector**: an unlabeled query with the same attributes
//! - **Confidence**: the share of the `k` nearest neighbors that agree
//!
//! Every entry point is a pure function over borrowed input. The caller owns
//! the dataset and passes it to each call; nothing is cached between calls.
//!
//! ## Usage
//!
//! ```
//! use persona::{classify, parse, summarize, FeatureVector, Personality};
//!
//! let text = "\
//! id,Time_spent_Alone,Stage_fear,Social_event_attendance,Going_outside,Drained_after_socializing,Friends_circle_size,Post_frequency,Personality
//! 1,1,No,8,6,No,14,8,Extrovert
//! 2,9,Yes,1,1,Yes,2,1,Introvert
//! 3,2,No,7,5,No,12,7,Extrovert
//! ";
//! let parsed = parse(text);
//! assert!(parsed.errors.is_empty());
//!
//! let summary = summarize(&parsed.records)?;
//! assert_eq!(summary.extrovert.mean, Some(13.0));
//!
//! let query = FeatureVector::builder()
//!     .time_spent_alone(1.5)
//!     .stage_fear("No")
//!     .social_event_attendance(7.5)
//!     .going_outside(5.5)
//!     .drained_after_socializing("No")
//!     .friends_circle_size(13.0)
//!     .post_frequency(7.5)
//!     .build()?;
//! let prediction = classify(&parsed.records, &query)?;
//! assert_eq!(prediction.personality, Personality::Extrovert);
//! # Ok::<(), persona::PersonaError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod classifier;
pub mod error;
pub mod feature;
pub mod parser;
pub mod record;
pub mod stats;

// Re-export primary types at crate root for convenience
pub use classifier::{
    classify, Classifier, ClassifierConfig, DistanceMetric, Evaluation, Neighbor,
    PredictionResult, Votes,
};
pub use error::{
    ExecutionError, PersonaError, PersonaResult, RowError, RowErrorKind, ValidationError,
};
pub use feature::{FeatureVector, FeatureVectorBuilder};
pub use parser::{parse, to_text, ParseOutput};
pub use record::{
    Categorical, Label, NumericFeatures, NumericField, Personality, PersonalityRecord, Response,
};
pub use stats::{summarize, summarize_field, ClassStats, ClassSummary, FieldSummary};
