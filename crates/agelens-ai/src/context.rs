//! The model state every orchestrator call runs against.

use agelens_core::LabelSchema;

use crate::features::{SparseVector, Transformer};
use crate::{ArtifactError, Classifier};

/// A transformer, a classifier, and the label schema that names its classes.
///
/// Construction checks that the three agree: the schema has one label per
/// class and the transformer emits the feature width the classifier expects.
/// After that the context is read-only.
pub struct InferenceContext {
    transformer: Box<dyn Transformer>,
    classifier: Box<dyn Classifier>,
    schema: LabelSchema,
}

impl InferenceContext {
    pub fn new(
        transformer: Box<dyn Transformer>,
        classifier: Box<dyn Classifier>,
        schema: LabelSchema,
    ) -> Result<Self, ArtifactError> {
        if schema.len() != classifier.n_classes() {
            return Err(ArtifactError::Incompatible(format!(
                "label schema has {} labels but classifier produces {} classes",
                schema.len(),
                classifier.n_classes()
            )));
        }
        if transformer.n_features() != classifier.n_features() {
            return Err(ArtifactError::Incompatible(format!(
                "vectorizer produces {} features but classifier expects {}",
                transformer.n_features(),
                classifier.n_features()
            )));
        }
        Ok(Self {
            transformer,
            classifier,
            schema,
        })
    }

    pub fn schema(&self) -> &LabelSchema {
        &self.schema
    }

    pub fn transformer(&self) -> &dyn Transformer {
        self.transformer.as_ref()
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    /// Transform all texts in one call.
    pub fn features(&self, texts: &[&str]) -> Vec<SparseVector> {
        self.transformer.transform(texts)
    }

    /// Transform and score all texts in one call.
    pub fn predict_proba(&self, texts: &[&str]) -> Vec<Vec<f64>> {
        let features = self.features(texts);
        self.classifier.predict_proba(&features)
    }
}

impl std::fmt::Debug for InferenceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceContext")
            .field("n_features", &self.transformer.n_features())
            .field("n_classes", &self.classifier.n_classes())
            .field("schema", &self.schema)
            .finish()
    }
}
