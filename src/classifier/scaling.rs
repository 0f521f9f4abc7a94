//! Min-max scaling over the reference population.

use crate::record::{NumericFeatures, NumericField};

/// Observed range of each numeric feature in a reference population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureScale {
    ranges: [(f64, f64); NumericField::ALL.len()],
}

impl FeatureScale {
    /// Records the min and max of every numeric feature.
    ///
    /// An empty population yields zero-width ranges.
    pub fn fit<'a, R>(population: impl IntoIterator<Item = &'a R>) -> Self
    where
        R: NumericFeatures + 'a,
    {
        let mut ranges = [(f64::INFINITY, f64::NEG_INFINITY); NumericField::ALL.len()];
        for item in population {
            for (slot, field) in ranges.iter_mut().zip(NumericField::ALL) {
                let v = item.numeric(field);
                slot.0 = slot.0.min(v);
                slot.1 = slot.1.max(v);
            }
        }
        for slot in &mut ranges {
            if slot.0 > slot.1 {
                *slot = (0.0, 0.0);
            }
        }
        Self { ranges }
    }

    /// Maps a value onto the reference range.
    ///
    /// Values outside the observed range are clamped to it, so every scaled
    /// value lies in `[0, 1]`. A zero-width range maps everything to `0`.
    #[must_use]
    pub fn scale(&self, field: NumericField, value: f64) -> f64 {
        let (min, max) = self.ranges[field as usize];
        let width = max - min;
        if width > 0.0 {
            (value.clamp(min, max) - min) / width
        } else {
            0.0
        }
    }

    /// Returns the observed `(min, max)` for a field.
    #[must_use]
    pub fn range(&self, field: NumericField) -> (f64, f64) {
        self.ranges[field as usize]
    }
}
