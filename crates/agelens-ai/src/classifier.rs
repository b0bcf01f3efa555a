//! Classifier seam and serialized classifier artifacts.

use agelens_core::argmax;
use serde::Deserialize;

use crate::ArtifactError;
use crate::features::SparseVector;
use crate::linear::{LogisticRegression, LogisticRegressionParams};
use crate::naive_bayes::{MultinomialNb, MultinomialNbParams};

/// A pre-trained model mapping feature vectors to class probabilities.
pub trait Classifier: Send + Sync {
    /// Number of classes (length of every probability vector).
    fn n_classes(&self) -> usize;

    /// Feature width the model was trained on.
    fn n_features(&self) -> usize;

    /// One probability vector per row, each summing to 1.
    fn predict_proba(&self, features: &[SparseVector]) -> Vec<Vec<f64>>;

    /// Predicted class index per row. Ties go to the lowest index.
    fn predict(&self, features: &[SparseVector]) -> Vec<usize> {
        self.predict_proba(features)
            .iter()
            .map(|p| argmax(p).unwrap_or(0))
            .collect()
    }
}

/// Classifier document as stored in `<platform>_classifier.json`, tagged by `kind`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    LogisticRegression(LogisticRegressionParams),
    MultinomialNb(MultinomialNbParams),
}

impl ClassifierArtifact {
    /// Validate parameters and build the model.
    pub fn build(self) -> Result<Box<dyn Classifier>, ArtifactError> {
        Ok(match self {
            Self::LogisticRegression(params) => Box::new(LogisticRegression::new(params)?),
            Self::MultinomialNb(params) => Box::new(MultinomialNb::new(params)?),
        })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::LogisticRegression(_) => "logistic_regression",
            Self::MultinomialNb(_) => "multinomial_nb",
        }
    }
}

/// Class labels stored in the artifact must be exactly `0..n` so that
/// probability column `i` is class `i`.
pub(crate) fn check_classes(classes: &[i64]) -> Result<usize, ArtifactError> {
    if classes.len() < 2 {
        return Err(ArtifactError::Incompatible(format!(
            "classifier needs at least 2 classes, found {}",
            classes.len()
        )));
    }
    if let Some((pos, &class)) = classes
        .iter()
        .enumerate()
        .find(|&(pos, &class)| class != pos as i64)
    {
        return Err(ArtifactError::Incompatible(format!(
            "class at position {pos} is {class}; classes must be 0..{}",
            classes.len()
        )));
    }
    Ok(classes.len())
}

/// Check that every row of a weight matrix has the same width and return it.
pub(crate) fn check_matrix(name: &str, rows: &[Vec<f64>]) -> Result<usize, ArtifactError> {
    let width = rows.first().map(Vec::len).unwrap_or(0);
    if width == 0 {
        return Err(ArtifactError::Incompatible(format!("{name} is empty")));
    }
    if let Some(pos) = rows.iter().position(|r| r.len() != width) {
        return Err(ArtifactError::Incompatible(format!(
            "{name} row {pos} has {} columns, expected {width}",
            rows[pos].len()
        )));
    }
    Ok(width)
}
