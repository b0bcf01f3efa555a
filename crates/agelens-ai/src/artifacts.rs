//! Loading classifier and vectorizer artifacts from JSON files.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::info;

use crate::registry::PlatformConfig;
use crate::tfidf::{TfidfConfig, TfidfVectorizer};
use crate::{ArtifactError, Classifier, ClassifierArtifact, InferenceContext};

/// Load and validate a classifier artifact.
pub fn load_classifier(path: &Path) -> Result<Box<dyn Classifier>, ArtifactError> {
    let artifact: ClassifierArtifact = read_json(path)?;
    let kind = artifact.kind();
    let classifier = artifact.build()?;
    info!(
        path = %path.display(),
        kind,
        classes = classifier.n_classes(),
        features = classifier.n_features(),
        "loaded classifier"
    );
    Ok(classifier)
}

/// Load and validate a TF-IDF vectorizer artifact.
pub fn load_vectorizer(path: &Path) -> Result<TfidfVectorizer, ArtifactError> {
    let config: TfidfConfig = read_json(path)?;
    let vectorizer = TfidfVectorizer::from_config(config)?;
    info!(
        path = %path.display(),
        vocabulary = vectorizer.vocabulary_size(),
        "loaded vectorizer"
    );
    Ok(vectorizer)
}

/// Eagerly load everything a platform needs and check the pieces agree.
pub fn load_context(config: &PlatformConfig) -> Result<InferenceContext, ArtifactError> {
    let classifier = load_classifier(&config.classifier)?;
    let vectorizer = load_vectorizer(&config.vectorizer)?;
    InferenceContext::new(Box::new(vectorizer), classifier, config.labels.clone())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    if !path.exists() {
        return Err(ArtifactError::NotFound(path.to_path_buf()));
    }
    let file = File::open(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
