//! Inference layer: text features, pre-trained classifiers, and the
//! orchestrator that turns raw messages into predictions.

pub mod artifacts;
pub mod classifier;
pub mod context;
mod error;
pub mod features;
pub mod linear;
pub mod naive_bayes;
pub mod orchestrator;
pub mod registry;
pub mod tfidf;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use classifier::{Classifier, ClassifierArtifact};
pub use context::InferenceContext;
pub use error::{ArtifactError, InferenceError};
pub use features::{SparseVector, Transformer};
pub use orchestrator::{
    classify_batch, classify_messages, classify_single, classify_user, split_messages,
};
pub use registry::{ArtifactCache, PlatformConfig, Registry};
pub use tfidf::TfidfVectorizer;
