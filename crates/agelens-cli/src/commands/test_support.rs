//! On-disk artifacts for command tests.
//!
//! Both platforms get a binary logistic regression over three words:
//! "homework" pushes towards class 1, "mortgage" towards class 0 and "bro"
//! slightly towards class 1.

use std::sync::Arc;

use agelens_ai::{ArtifactCache, InferenceContext, Registry};
use agelens_core::Platform;
use tempfile::TempDir;

const VECTORIZER_JSON: &str = r#"{
    "vocabulary": {"bro": 0, "homework": 1, "mortgage": 2},
    "idf": [1.0, 1.0, 1.0],
    "norm": null
}"#;

const CLASSIFIER_JSON: &str = r#"{
    "kind": "logistic_regression",
    "classes": [0, 1],
    "coef": [[0.5, 3.0, -3.0]],
    "intercept": [0.0]
}"#;

/// Artifacts for TikTok and Character.ai; Roblox is left missing.
pub fn artifact_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    for id in ["tiktok", "characterai"] {
        std::fs::write(dir.path().join(format!("{id}_classifier.json")), CLASSIFIER_JSON).unwrap();
        std::fs::write(dir.path().join(format!("{id}_vectorizer.json")), VECTORIZER_JSON).unwrap();
    }
    dir
}

pub fn cache(dir: &TempDir) -> ArtifactCache {
    ArtifactCache::new(Registry::builtin(dir.path()))
}

pub fn context(dir: &TempDir, platform: Platform) -> Arc<InferenceContext> {
    cache(dir).select(platform).unwrap()
}
