//! Terminal rendering for predictions and batch tables.

use agelens_ai::Registry;
use agelens_core::{LabelSchema, PredictionResult, UserPrediction, batch, format};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

/// Label plus the inline breakdown, one decimal.
pub fn single(schema: &LabelSchema, result: &PredictionResult) -> String {
    format!(
        "Predicted: {}\nConfidence: {}",
        result.label,
        format::inline_breakdown(schema, &result.probabilities)
    )
}

/// Label, message count and a per-class list, two decimals.
pub fn user(schema: &LabelSchema, prediction: &UserPrediction) -> String {
    let noun = if prediction.message_count == 1 {
        "message"
    } else {
        "messages"
    };
    format!(
        "Predicted age group for this user: {}\nBased on {} {noun}\n\nConfidence Breakdown:\n{}",
        prediction.result.label,
        prediction.message_count,
        format::list_breakdown(schema, &prediction.result.probabilities)
    )
}

/// Table of `message`, `predicted_label` and `confidence` for a classified batch.
pub fn batch_table(classified: &RecordBatch) -> Result<String, ArrowError> {
    let schema = classified.schema();
    let indices = batch::DISPLAY_COLUMNS
        .iter()
        .map(|name| schema.index_of(name))
        .collect::<Result<Vec<_>, _>>()?;
    let view = classified.project(&indices)?;
    Ok(pretty_format_batches(&[view])?.to_string())
}

/// One block per configured platform listing its labels in class order.
pub fn platforms(registry: &Registry) -> String {
    let mut out = String::new();
    for (platform, config) in registry.platforms() {
        out.push_str(&format!("{} ({})\n", platform.display_name(), platform.as_str()));
        for (i, label) in config.labels.iter().enumerate() {
            out.push_str(&format!("  {i}: {label}\n"));
        }
    }
    out
}
