//! Label schemas: human-readable class names in classifier output order.
//!
//! A classifier only knows class indices. The schema maps index `i` to the
//! name shown to the user, so its length must match the classifier's class
//! count. That check happens when artifacts are loaded; the schema itself
//! only guarantees it is non-empty.

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Ordered, non-empty list of label names aligned with class indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct LabelSchema {
    labels: Vec<String>,
}

impl LabelSchema {
    /// Build a schema from label names in class-index order.
    pub fn new<I, S>(labels: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(CoreError::EmptyLabelSchema);
        }
        Ok(Self { labels })
    }

    /// Schema from compile-time label lists. Callers guarantee non-empty input.
    pub(crate) fn from_static(labels: &[&str]) -> Self {
        debug_assert!(!labels.is_empty());
        Self {
            labels: labels.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Never true: schemas are non-empty by construction.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label for a class index.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Label for a class index, or [`CoreError::ClassOutOfRange`].
    pub fn label(&self, index: usize) -> Result<&str, CoreError> {
        self.get(index).ok_or(CoreError::ClassOutOfRange {
            index,
            classes: self.len(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

impl TryFrom<Vec<String>> for LabelSchema {
    type Error = CoreError;

    fn try_from(labels: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(labels)
    }
}

impl From<LabelSchema> for Vec<String> {
    fn from(schema: LabelSchema) -> Self {
        schema.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_order() {
        let schema = LabelSchema::new(["Adult", "Teen", "Child"]).unwrap();
        assert_eq!(schema.len(), 3);
        assert!(!schema.is_empty());
        assert_eq!(schema.get(0), Some("Adult"));
        assert_eq!(schema.get(2), Some("Child"));
        assert_eq!(schema.iter().collect::<Vec<_>>(), vec!["Adult", "Teen", "Child"]);
    }

    #[test]
    fn rejects_empty() {
        let result = LabelSchema::new(Vec::<String>::new());
        assert_eq!(result, Err(CoreError::EmptyLabelSchema));
    }

    #[test]
    fn label_out_of_range() {
        let schema = LabelSchema::new(["Adult", "Minor"]).unwrap();
        assert_eq!(schema.label(1), Ok("Minor"));
        assert_eq!(
            schema.label(2),
            Err(CoreError::ClassOutOfRange {
                index: 2,
                classes: 2
            })
        );
    }

    #[test]
    fn json_is_a_plain_array() {
        let schema: LabelSchema = serde_json::from_str(r#"["Adult", "Minor"]"#).unwrap();
        assert_eq!(schema.len(), 2);
        assert_eq!(serde_json::to_string(&schema).unwrap(), r#"["Adult","Minor"]"#);
    }

    #[test]
    fn json_rejects_empty_array() {
        let result: Result<LabelSchema, _> = serde_json::from_str("[]");
        assert!(result.is_err());
    }
}
