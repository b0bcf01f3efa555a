//! Prediction results produced by the inference orchestrator.

use crate::{CoreError, LabelSchema};

/// Classification of one message, or of a group of messages after averaging.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    /// Winning class index (arg-max of `probabilities`).
    pub index: usize,
    /// Human-readable label for `index`.
    pub label: String,
    /// Full per-class probability vector, in schema order. Never rounded.
    pub probabilities: Vec<f64>,
}

impl PredictionResult {
    /// Build a result by taking the arg-max of `probabilities` and looking up
    /// its label.
    pub fn from_probabilities(
        probabilities: Vec<f64>,
        schema: &LabelSchema,
    ) -> Result<Self, CoreError> {
        let index = argmax(&probabilities).ok_or(CoreError::EmptyProbabilities)?;
        Self::with_index(index, probabilities, schema)
    }

    /// Build a result for a class index chosen by the classifier.
    pub fn with_index(
        index: usize,
        probabilities: Vec<f64>,
        schema: &LabelSchema,
    ) -> Result<Self, CoreError> {
        let label = schema.label(index)?.to_string();
        Ok(Self {
            index,
            label,
            probabilities,
        })
    }

    /// Probability of the winning class.
    pub fn confidence(&self) -> f64 {
        self.probabilities.get(self.index).copied().unwrap_or(0.0)
    }

    /// `(label, probability)` pairs for every class in the schema.
    pub fn breakdown<'a>(
        &'a self,
        schema: &'a LabelSchema,
    ) -> impl Iterator<Item = (&'a str, f64)> + 'a {
        schema.iter().zip(self.probabilities.iter().copied())
    }
}

/// Aggregate prediction for all messages attributed to one user.
#[derive(Debug, Clone, PartialEq)]
pub struct UserPrediction {
    /// Arg-max over the element-wise mean of the per-message vectors.
    pub result: PredictionResult,
    /// Number of non-empty messages that contributed to the mean.
    pub message_count: usize,
}

/// Index of the largest value. Ties go to the lowest index.
///
/// Returns `None` for an empty slice.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut iter = values.iter().enumerate();
    let (mut best_idx, mut best_val) = iter.next().map(|(i, &v)| (i, v))?;
    for (i, &v) in iter {
        // Strict comparison keeps the first occurrence on ties.
        if v > best_val || (best_val.is_nan() && !v.is_nan()) {
            best_idx = i;
            best_val = v;
        }
    }
    Some(best_idx)
}
