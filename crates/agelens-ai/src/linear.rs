//! Logistic regression over sparse features.

use serde::Deserialize;

use crate::ArtifactError;
use crate::classifier::{Classifier, check_classes, check_matrix};
use crate::features::SparseVector;

/// How decision values become probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MultiClass {
    /// One-vs-rest for binary models, multinomial otherwise.
    #[default]
    Auto,
    Multinomial,
    Ovr,
}

/// Unknown keys such as `solver` are rejected rather than ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogisticRegressionParams {
    pub classes: Vec<i64>,
    /// One row per class, or a single row for binary models.
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
    #[serde(default)]
    pub multi_class: MultiClass,
}

#[derive(Debug)]
pub struct LogisticRegression {
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
    n_classes: usize,
    n_features: usize,
    multi_class: MultiClass,
}

impl LogisticRegression {
    pub fn new(params: LogisticRegressionParams) -> Result<Self, ArtifactError> {
        let n_classes = check_classes(&params.classes)?;
        let n_features = check_matrix("coef", &params.coef)?;

        let expected_rows = if n_classes == 2 { 1 } else { n_classes };
        if params.coef.len() != expected_rows {
            return Err(ArtifactError::Incompatible(format!(
                "coef has {} rows, expected {expected_rows} for {n_classes} classes",
                params.coef.len()
            )));
        }
        if params.intercept.len() != expected_rows {
            return Err(ArtifactError::Incompatible(format!(
                "intercept has {} values, expected {expected_rows}",
                params.intercept.len()
            )));
        }

        Ok(Self {
            coef: params.coef,
            intercept: params.intercept,
            n_classes,
            n_features,
            multi_class: params.multi_class,
        })
    }

    /// Raw decision values, one per coefficient row.
    pub fn decision_function(&self, x: &SparseVector) -> Vec<f64> {
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, b)| x.dot(row) + b)
            .collect()
    }

    fn proba_one(&self, x: &SparseVector) -> Vec<f64> {
        let decision = self.decision_function(x);
        let binary = decision.len() == 1;

        match (self.multi_class, binary) {
            (MultiClass::Multinomial, true) => {
                let d = decision[0];
                let mut scores = vec![-d, d];
                softmax_inplace(&mut scores);
                scores
            }
            (MultiClass::Auto | MultiClass::Ovr, true) => {
                let p = sigmoid(decision[0]);
                vec![1.0 - p, p]
            }
            (MultiClass::Auto | MultiClass::Multinomial, false) => {
                let mut scores = decision;
                softmax_inplace(&mut scores);
                scores
            }
            (MultiClass::Ovr, false) => {
                let mut scores: Vec<f64> = decision.into_iter().map(sigmoid).collect();
                let sum: f64 = scores.iter().sum();
                if sum > 0.0 {
                    for s in &mut scores {
                        *s /= sum;
                    }
                }
                scores
            }
        }
    }
}

impl Classifier for LogisticRegression {
    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_proba(&self, features: &[SparseVector]) -> Vec<Vec<f64>> {
        features.iter().map(|x| self.proba_one(x)).collect()
    }
}

fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Softmax in place, shifted by the max for stability.
fn softmax_inplace(values: &mut [f64]) {
    if values.is_empty() {
        return;
    }
    let max = values.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    let mut sum = 0.0;
    for v in values.iter_mut() {
        *v = (*v - max).exp();
        sum += *v;
    }
    if sum > 0.0 {
        for v in values.iter_mut() {
            *v /= sum;
        }
    }
}
