/// Column names and Arrow fields for batch prediction tables.
pub mod batch {
    use arrow::datatypes::{DataType, Field};

    /// Mandatory input column holding the text to classify.
    pub const MESSAGE: &str = "message";
    /// Derived column: winning label for the row.
    pub const PREDICTED_LABEL: &str = "predicted_label";
    /// Derived column: per-class confidence string for the row.
    pub const CONFIDENCE: &str = "confidence";

    /// Columns shown when a batch result is rendered in the terminal.
    pub const DISPLAY_COLUMNS: [&str; 3] = [MESSAGE, PREDICTED_LABEL, CONFIDENCE];

    pub fn predicted_label_field() -> Field {
        Field::new(PREDICTED_LABEL, DataType::Utf8, false)
    }

    pub fn confidence_field() -> Field {
        Field::new(CONFIDENCE, DataType::Utf8, false)
    }
}
