//! TF-IDF text vectorizer, inference side only.
//!
//! Reproduces the transform of a fitted word-level TF-IDF vectorizer from
//! its exported parameters: vocabulary, IDF weights, and preprocessing
//! switches. Fitting happens elsewhere; this module never updates the
//! vocabulary.
//!
//! Pipeline per document:
//! 1. optional lowercasing
//! 2. tokenization with `token_pattern` (whole match is the token)
//! 3. stop-word removal
//! 4. word n-grams for every `n` in `ngram_range`, joined with one space
//! 5. counts of in-vocabulary terms, optionally clipped (`binary`) or
//!    damped (`sublinear_tf`: `1 + ln(tf)`)
//! 6. multiplication by `idf[term]` when IDF weights are present
//! 7. row normalisation (`l2` by default)

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, HashSet};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ArtifactError;
use crate::features::{SparseVector, Transformer};

/// Token pattern used when the artifact does not specify one.
pub const DEFAULT_TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// Serialized vectorizer parameters as stored in `<platform>_vectorizer.json`.
///
/// Unknown keys such as `analyzer` or `strip_accents` are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TfidfConfig {
    /// term → feature index
    pub vocabulary: HashMap<String, usize>,
    /// Per-feature IDF weight. Absent for plain count features.
    #[serde(default)]
    pub idf: Option<Vec<f64>>,
    #[serde(default = "default_lowercase")]
    pub lowercase: bool,
    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub stop_words: Vec<String>,
    #[serde(default)]
    pub binary: bool,
    #[serde(default)]
    pub sublinear_tf: bool,
    /// `null` disables normalisation.
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
}

fn default_lowercase() -> bool {
    true
}

fn default_token_pattern() -> String {
    DEFAULT_TOKEN_PATTERN.to_string()
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

impl TfidfConfig {
    /// Minimal config over a vocabulary, all other settings at their defaults.
    pub fn with_vocabulary(vocabulary: HashMap<String, usize>) -> Self {
        Self {
            vocabulary,
            idf: None,
            lowercase: default_lowercase(),
            token_pattern: default_token_pattern(),
            ngram_range: default_ngram_range(),
            stop_words: Vec::new(),
            binary: false,
            sublinear_tf: false,
            norm: default_norm(),
        }
    }
}

/// A validated, ready-to-use TF-IDF vectorizer.
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Option<Vec<f64>>,
    lowercase: bool,
    token_re: Regex,
    ngram_range: (usize, usize),
    stop_words: HashSet<String>,
    binary: bool,
    sublinear_tf: bool,
    norm: Option<Norm>,
}

impl std::fmt::Debug for TfidfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfidfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("ngram_range", &self.ngram_range)
            .field("use_idf", &self.idf.is_some())
            .field("norm", &self.norm)
            .finish()
    }
}

impl TfidfVectorizer {
    /// Validate a config and compile its token pattern.
    pub fn from_config(config: TfidfConfig) -> Result<Self, ArtifactError> {
        let n_features = config.vocabulary.len();

        let (min_n, max_n) = config.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(ArtifactError::Incompatible(format!(
                "invalid ngram_range ({min_n}, {max_n})"
            )));
        }

        if let Some((term, &idx)) = config.vocabulary.iter().find(|(_, idx)| **idx >= n_features) {
            return Err(ArtifactError::Incompatible(format!(
                "vocabulary term {term:?} has index {idx} outside 0..{n_features}"
            )));
        }

        if let Some(idf) = &config.idf
            && idf.len() != n_features
        {
            return Err(ArtifactError::Incompatible(format!(
                "idf has {} weights for a vocabulary of {n_features} terms",
                idf.len()
            )));
        }

        let token_re =
            Regex::new(&config.token_pattern).map_err(|source| ArtifactError::TokenPattern {
                pattern: config.token_pattern.clone(),
                source,
            })?;

        Ok(Self {
            vocabulary: config.vocabulary,
            idf: config.idf,
            lowercase: config.lowercase,
            token_re,
            ngram_range: config.ngram_range,
            stop_words: config.stop_words.into_iter().collect(),
            binary: config.binary,
            sublinear_tf: config.sublinear_tf,
            norm: config.norm,
        })
    }

    /// Transform a single document.
    pub fn transform_one(&self, text: &str) -> SparseVector {
        let text: Cow<'_, str> = if self.lowercase {
            Cow::Owned(text.to_lowercase())
        } else {
            Cow::Borrowed(text)
        };

        let tokens: Vec<&str> = self
            .token_re
            .find_iter(&text)
            .map(|m| m.as_str())
            .filter(|t| !self.stop_words.contains(*t))
            .collect();

        // Ordered so the resulting row is already sorted by index.
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        let (min_n, max_n) = self.ngram_range;
        for n in min_n..=max_n.min(tokens.len()) {
            for window in tokens.windows(n) {
                let term: Cow<'_, str> = if n == 1 {
                    Cow::Borrowed(window[0])
                } else {
                    Cow::Owned(window.join(" "))
                };
                if let Some(&idx) = self.vocabulary.get(term.as_ref()) {
                    *counts.entry(idx).or_insert(0.0) += 1.0;
                }
            }
        }

        let mut row: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(idx, count)| {
                let tf = if self.binary {
                    1.0
                } else if self.sublinear_tf {
                    1.0 + count.ln()
                } else {
                    count
                };
                let weight = match &self.idf {
                    Some(idf) => tf * idf[idx],
                    None => tf,
                };
                (idx, weight)
            })
            .collect();

        if let Some(norm) = self.norm {
            normalize(&mut row, norm);
        }

        SparseVector::from_pairs(row)
    }

    /// Number of vocabulary terms.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}

impl Transformer for TfidfVectorizer {
    fn n_features(&self) -> usize {
        self.vocabulary.len()
    }

    fn transform(&self, texts: &[&str]) -> Vec<SparseVector> {
        texts.iter().map(|t| self.transform_one(t)).collect()
    }
}

/// Normalize a row in place. Zero rows are left untouched.
fn normalize(row: &mut [(usize, f64)], norm: Norm) {
    let total = match norm {
        Norm::L1 => row.iter().map(|(_, v)| v.abs()).sum::<f64>(),
        Norm::L2 => row.iter().map(|(_, v)| v * v).sum::<f64>().sqrt(),
    };
    if total > 0.0 {
        for (_, v) in row.iter_mut() {
            *v /= total;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(terms: &[&str]) -> HashMap<String, usize> {
        terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.to_string(), i))
            .collect()
    }

    fn dense(v: &SparseVector, width: usize) -> Vec<f64> {
        let mut out = vec![0.0; width];
        for (idx, val) in v.iter() {
            out[idx] = val;
        }
        out
    }

    #[test]
    fn unigram_counts_with_idf_and_l2() {
        let mut config = TfidfConfig::with_vocabulary(vocab(&["hello", "world"]));
        config.idf = Some(vec![1.0, 2.0]);
        let vec = TfidfVectorizer::from_config(config).unwrap();

        let row = dense(&vec.transform_one("Hello world hello"), 2);
        // Raw weights [2*1, 1*2] = [2, 2], normalized to [1/√2, 1/√2].
        let expected = 1.0 / 2.0f64.sqrt();
        assert!((row[0] - expected).abs() < 1e-12);
        assert!((row[1] - expected).abs() < 1e-12);
    }

    #[test]
    fn bigrams_use_single_space_join() {
        let mut config = TfidfConfig::with_vocabulary(vocab(&["hello", "world", "hello world"]));
        config.idf = Some(vec![1.0, 2.0, 1.5]);
        config.ngram_range = (1, 2);
        let vec = TfidfVectorizer::from_config(config).unwrap();

        let row = dense(&vec.transform_one("hello   world hello"), 3);
        // Raw weights: hello 2*1, world 1*2, "hello world" 1*1.5.
        let norm = (4.0f64 + 4.0 + 2.25).sqrt();
        assert!((row[0] - 2.0 / norm).abs() < 1e-12);
        assert!((row[1] - 2.0 / norm).abs() < 1e-12);
        assert!((row[2] - 1.5 / norm).abs() < 1e-12);
    }

    #[test]
    fn bigram_only_range_skips_unigrams() {
        let mut config = TfidfConfig::with_vocabulary(vocab(&["lol", "lol same"]));
        config.ngram_range = (2, 2);
        config.norm = None;
        let vec = TfidfVectorizer::from_config(config).unwrap();

        let row = vec.transform_one("lol same");
        assert_eq!(row.iter().collect::<Vec<_>>(), vec![(1, 1.0)]);
    }

    #[test]
    fn default_pattern_drops_single_characters() {
        let mut config = TfidfConfig::with_vocabulary(vocab(&["a", "ok"]));
        config.norm = None;
        let vec = TfidfVectorizer::from_config(config).unwrap();

        let row = vec.transform_one("a ok a");
        assert_eq!(row.iter().collect::<Vec<_>>(), vec![(1, 1.0)]);
    }

    #[test]
    fn stop_words_removed_before_ngrams() {
        let mut config = TfidfConfig::with_vocabulary(vocab(&["good game", "good", "game"]));
        config.ngram_range = (1, 2);
        config.stop_words = vec!["the".into()];
        config.norm = None;
        let vec = TfidfVectorizer::from_config(config).unwrap();

        // "the" vanishes, so "good game" becomes adjacent.
        let row = dense(&vec.transform_one("good the game"), 3);
        assert_eq!(row, vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn lowercase_can_be_disabled() {
        let mut config = TfidfConfig::with_vocabulary(vocab(&["omg"]));
        config.lowercase = false;
        config.norm = None;
        let vec = TfidfVectorizer::from_config(config).unwrap();

        assert!(vec.transform_one("OMG").is_empty());
        assert_eq!(vec.transform_one("omg").nnz(), 1);
    }

    #[test]
    fn sublinear_and_binary_tf() {
        let mut config = TfidfConfig::with_vocabulary(vocab(&["xd"]));
        config.sublinear_tf = true;
        config.norm = None;
        let sub = TfidfVectorizer::from_config(config.clone()).unwrap();
        let row = sub.transform_one("xd xd xd");
        assert!((row.dot(&[1.0]) - (1.0 + 3.0f64.ln())).abs() < 1e-12);

        config.sublinear_tf = false;
        config.binary = true;
        let bin = TfidfVectorizer::from_config(config).unwrap();
        assert_eq!(bin.transform_one("xd xd xd").dot(&[1.0]), 1.0);
    }

    #[test]
    fn l1_norm_sums_to_one() {
        let mut config = TfidfConfig::with_vocabulary(vocab(&["aa", "bb"]));
        config.norm = Some(Norm::L1);
        let vec = TfidfVectorizer::from_config(config).unwrap();

        let row = dense(&vec.transform_one("aa aa aa bb"), 2);
        assert!((row[0] - 0.75).abs() < 1e-12);
        assert!((row[1] - 0.25).abs() < 1e-12);
    }

    #[test]
    fn out_of_vocabulary_text_gives_empty_row() {
        let config = TfidfConfig::with_vocabulary(vocab(&["hello"]));
        let vec = TfidfVectorizer::from_config(config).unwrap();
        assert!(vec.transform_one("nothing known here").is_empty());
        assert!(vec.transform_one("").is_empty());
    }

    #[test]
    fn batch_transform_keeps_order() {
        let config = TfidfConfig::with_vocabulary(vocab(&["aa", "bb"]));
        let vec = TfidfVectorizer::from_config(config).unwrap();
        let rows = vec.transform(&["bb", "aa", "cc"]);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].max_index(), Some(1));
        assert_eq!(rows[1].max_index(), Some(0));
        assert!(rows[2].is_empty());
        assert_eq!(vec.n_features(), 2);
    }

    #[test]
    fn rejects_idf_length_mismatch() {
        let mut config = TfidfConfig::with_vocabulary(vocab(&["aa", "bb"]));
        config.idf = Some(vec![1.0]);
        assert!(matches!(
            TfidfVectorizer::from_config(config),
            Err(ArtifactError::Incompatible(_))
        ));
    }

    #[test]
    fn rejects_sparse_vocabulary_indices() {
        let mut vocabulary = HashMap::new();
        vocabulary.insert("aa".to_string(), 0);
        vocabulary.insert("bb".to_string(), 5);
        let config = TfidfConfig::with_vocabulary(vocabulary);
        assert!(matches!(
            TfidfVectorizer::from_config(config),
            Err(ArtifactError::Incompatible(_))
        ));
    }

    #[test]
    fn rejects_bad_ngram_range() {
        let mut config = TfidfConfig::with_vocabulary(vocab(&["aa"]));
        config.ngram_range = (2, 1);
        assert!(TfidfVectorizer::from_config(config).is_err());
    }

    #[test]
    fn rejects_bad_token_pattern() {
        let mut config = TfidfConfig::with_vocabulary(vocab(&["aa"]));
        config.token_pattern = "(unclosed".into();
        assert!(matches!(
            TfidfVectorizer::from_config(config),
            Err(ArtifactError::TokenPattern { .. })
        ));
    }

    #[test]
    fn config_defaults_from_json() {
        let config: TfidfConfig =
            serde_json::from_str(r#"{"vocabulary": {"hi": 0}, "idf": [1.5]}"#).unwrap();
        assert!(config.lowercase);
        assert_eq!(config.ngram_range, (1, 1));
        assert_eq!(config.norm, Some(Norm::L2));
        assert_eq!(config.token_pattern, DEFAULT_TOKEN_PATTERN);

        let config: TfidfConfig =
            serde_json::from_str(r#"{"vocabulary": {"hi": 0}, "norm": null}"#).unwrap();
        assert_eq!(config.norm, None);
    }
}
