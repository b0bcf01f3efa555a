//! Mock transformer and classifier for orchestrator tests.
//!
//! `WholeTextTransformer` maps each known (trimmed) text to its own one-hot
//! feature; `LookupClassifier` returns a fixed probability row per feature.
//! Together they let a test pin the exact probability vector of every
//! message.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use agelens_core::LabelSchema;

use crate::features::{SparseVector, Transformer};
use crate::{Classifier, InferenceContext};

pub struct WholeTextTransformer {
    texts: Vec<String>,
    calls: Arc<AtomicUsize>,
}

impl WholeTextTransformer {
    pub fn new(texts: &[&str]) -> Self {
        Self {
            texts: texts.iter().map(|t| t.to_string()).collect(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared counter of `transform` invocations.
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl Transformer for WholeTextTransformer {
    fn n_features(&self) -> usize {
        self.texts.len()
    }

    fn transform(&self, texts: &[&str]) -> Vec<SparseVector> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        texts
            .iter()
            .map(|t| match self.texts.iter().position(|known| known == t.trim()) {
                Some(idx) => SparseVector::from_pairs(vec![(idx, 1.0)]),
                None => SparseVector::default(),
            })
            .collect()
    }
}

pub struct LookupClassifier {
    rows: Vec<Vec<f64>>,
    fallback: Vec<f64>,
}

impl LookupClassifier {
    /// `rows[i]` is returned for feature `i`; `fallback` for empty rows.
    pub fn new(rows: Vec<Vec<f64>>, fallback: Vec<f64>) -> Self {
        Self { rows, fallback }
    }
}

impl Classifier for LookupClassifier {
    fn n_classes(&self) -> usize {
        self.fallback.len()
    }

    fn n_features(&self) -> usize {
        self.rows.len()
    }

    fn predict_proba(&self, features: &[SparseVector]) -> Vec<Vec<f64>> {
        features
            .iter()
            .map(|x| {
                x.max_index()
                    .and_then(|idx| self.rows.get(idx))
                    .unwrap_or(&self.fallback)
                    .clone()
            })
            .collect()
    }
}

/// Context whose classifier returns `probs` for each `text`.
pub fn lookup_context(entries: &[(&str, Vec<f64>)], labels: &[&str]) -> InferenceContext {
    let texts: Vec<&str> = entries.iter().map(|(t, _)| *t).collect();
    let rows: Vec<Vec<f64>> = entries.iter().map(|(_, p)| p.clone()).collect();
    let uniform = vec![1.0 / labels.len() as f64; labels.len()];
    InferenceContext::new(
        Box::new(WholeTextTransformer::new(&texts)),
        Box::new(LookupClassifier::new(rows, uniform)),
        LabelSchema::new(labels.iter().copied()).unwrap(),
    )
    .unwrap()
}
