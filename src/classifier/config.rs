//! Classifier configuration and distance metrics.

use serde::{Deserialize, Serialize};

use crate::error::{PersonaResult, ValidationError};

/// How per-feature differences are combined into one distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// Square root of the summed squared differences.
    #[default]
    Euclidean,
    /// Sum of absolute differences.
    Manhattan,
}

impl DistanceMetric {
    /// Combines per-feature differences.
    #[must_use]
    pub fn combine(self, diffs: impl IntoIterator<Item = f64>) -> f64 {
        match self {
            Self::Euclidean => diffs.into_iter().map(|d| d * d).sum::<f64>().sqrt(),
            Self::Manhattan => diffs.into_iter().map(f64::abs).sum(),
        }
    }

    /// Returns a short stable identifier suitable for logging/debugging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Euclidean => "euclidean",
            Self::Manhattan => "manhattan",
        }
    }
}

/// Classifier configuration.
///
/// Every field has a default, so a partial JSON document such as
/// `{"k": 3}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Number of neighbors that vote. Reduced to the reference size when larger.
    pub k: usize,
    /// Minimum number of labeled reference records required to predict.
    pub min_labeled: usize,
    /// Distance metric over the scaled feature space.
    pub metric: DistanceMetric,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            k: 5,
            min_labeled: 1,
            metric: DistanceMetric::Euclidean,
        }
    }
}

impl ClassifierConfig {
    /// Sets `k`.
    #[must_use]
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Sets the minimum labeled reference size.
    #[must_use]
    pub fn with_min_labeled(mut self, min_labeled: usize) -> Self {
        self.min_labeled = min_labeled;
        self
    }

    /// Sets the distance metric.
    #[must_use]
    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Checks the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidConfig` if `k` or `min_labeled` is zero.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.k == 0 {
            return Err(ValidationError::InvalidConfig {
                reason: "k must be at least 1".to_string(),
            });
        }
        if self.min_labeled == 0 {
            return Err(ValidationError::InvalidConfig {
                reason: "min_labeled must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Loads and validates a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidConfig` if the document does not parse
    /// or the values are out of range.
    pub fn from_json(json: &str) -> PersonaResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ValidationError::InvalidConfig {
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClassifierConfig::default();
        assert_eq!(config.k, 5);
        assert_eq!(config.min_labeled, 1);
        assert_eq!(config.metric, DistanceMetric::Euclidean);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_k_is_rejected() {
        let err = ClassifierConfig::default().with_k(0).validate().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidConfig { .. }));
    }

    #[test]
    fn test_zero_min_labeled_is_rejected() {
        assert!(ClassifierConfig::default()
            .with_min_labeled(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_from_json_partial_document() {
        let config = ClassifierConfig::from_json(r#"{"k": 3, "metric": "manhattan"}"#).unwrap();
        assert_eq!(config.k, 3);
        assert_eq!(config.min_labeled, 1);
        assert_eq!(config.metric, DistanceMetric::Manhattan);
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        let err = ClassifierConfig::from_json(r#"{"k": 0}"#).unwrap_err();
        assert!(err.is_validation());
        let err = ClassifierConfig::from_json("not json").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_metric_combine() {
        assert!((DistanceMetric::Euclidean.combine([3.0, 4.0]) - 5.0).abs() < f64::EPSILON);
        assert!((DistanceMetric::Manhattan.combine([3.0, -4.0]) - 7.0).abs() < f64::EPSILON);
        assert_eq!(DistanceMetric::Manhattan.name(), "manhattan");
    }
}
