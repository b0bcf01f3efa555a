//! Multinomial naive Bayes over term-weight features.

use serde::Deserialize;

use crate::ArtifactError;
use crate::classifier::{Classifier, check_classes, check_matrix};
use crate::features::SparseVector;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MultinomialNbParams {
    pub classes: Vec<i64>,
    /// Log prior per class.
    pub class_log_prior: Vec<f64>,
    /// Log P(feature | class), one row per class.
    pub feature_log_prob: Vec<Vec<f64>>,
}

#[derive(Debug)]
pub struct MultinomialNb {
    class_log_prior: Vec<f64>,
    feature_log_prob: Vec<Vec<f64>>,
    n_features: usize,
}

impl MultinomialNb {
    pub fn new(params: MultinomialNbParams) -> Result<Self, ArtifactError> {
        let n_classes = check_classes(&params.classes)?;
        let n_features = check_matrix("feature_log_prob", &params.feature_log_prob)?;

        if params.feature_log_prob.len() != n_classes {
            return Err(ArtifactError::Incompatible(format!(
                "feature_log_prob has {} rows for {n_classes} classes",
                params.feature_log_prob.len()
            )));
        }
        if params.class_log_prior.len() != n_classes {
            return Err(ArtifactError::Incompatible(format!(
                "class_log_prior has {} values for {n_classes} classes",
                params.class_log_prior.len()
            )));
        }

        Ok(Self {
            class_log_prior: params.class_log_prior,
            feature_log_prob: params.feature_log_prob,
            n_features,
        })
    }

    /// Unnormalised log posterior per class.
    pub fn joint_log_likelihood(&self, x: &SparseVector) -> Vec<f64> {
        self.feature_log_prob
            .iter()
            .zip(&self.class_log_prior)
            .map(|(row, prior)| x.dot(row) + prior)
            .collect()
    }

    fn proba_one(&self, x: &SparseVector) -> Vec<f64> {
        let jll = self.joint_log_likelihood(x);
        let lse = log_sum_exp(&jll);
        jll.into_iter().map(|v| (v - lse).exp()).collect()
    }
}

impl Classifier for MultinomialNb {
    fn n_classes(&self) -> usize {
        self.class_log_prior.len()
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_proba(&self, features: &[SparseVector]) -> Vec<Vec<f64>> {
        features.iter().map(|x| self.proba_one(x)).collect()
    }
}

fn log_sum_exp(values: &[f64]) -> f64 {
    let max = values.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    if !max.is_finite() {
        return max;
    }
    max + values.iter().map(|v| (v - max).exp()).sum::<f64>().ln()
}
