//! Inference orchestration for the three input modes.
//!
//! - [`classify_single`]: one message → one prediction.
//! - [`classify_user`]: many messages from one user → per-message
//!   probabilities averaged with equal weight, arg-max of the mean.
//! - [`classify_batch`]: a table with a `message` column → the same table
//!   plus `predicted_label` and `confidence` columns.
//!
//! Every call is a pure function of its input and the supplied
//! [`InferenceContext`]. All texts of a call go through the transformer
//! in a single batch.

use std::sync::Arc;

use agelens_core::{CoreError, PredictionResult, UserPrediction, argmax, batch, format};
use arrow::array::{Array, ArrayRef, StringArray, StringBuilder};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use tracing::{debug, info};

use crate::{InferenceContext, InferenceError};

/// Text a missing `message` cell is classified as.
pub const MISSING_MESSAGE: &str = "nan";

/// Classify one message.
///
/// Fails with [`InferenceError::EmptyInput`] when `text` is blank. The text
/// itself is transformed untrimmed.
pub fn classify_single(
    text: &str,
    ctx: &InferenceContext,
) -> Result<PredictionResult, InferenceError> {
    if text.trim().is_empty() {
        return Err(InferenceError::EmptyInput);
    }

    let features = ctx.features(&[text]);
    let classifier = ctx.classifier();
    let index = classifier
        .predict(&features)
        .into_iter()
        .next()
        .ok_or(CoreError::EmptyProbabilities)?;
    let probabilities = classifier
        .predict_proba(&features)
        .into_iter()
        .next()
        .ok_or(CoreError::EmptyProbabilities)?;

    let result = PredictionResult::with_index(index, probabilities, ctx.schema())?;
    debug!(label = %result.label, confidence = result.confidence(), "classified message");
    Ok(result)
}

/// Split raw multi-line input into messages: one per line, trimmed, blanks dropped.
pub fn split_messages(raw: &str) -> Vec<&str> {
    raw.split('\n')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .collect()
}

/// Classify all lines of `raw` as messages from a single user.
pub fn classify_user(raw: &str, ctx: &InferenceContext) -> Result<UserPrediction, InferenceError> {
    classify_messages(&split_messages(raw), ctx)
}

/// Classify an already-split list of messages from a single user.
///
/// The aggregate vector is the element-wise mean of the per-message
/// vectors; each message weighs the same regardless of length. Ties in the
/// mean go to the lowest class index.
pub fn classify_messages(
    messages: &[&str],
    ctx: &InferenceContext,
) -> Result<UserPrediction, InferenceError> {
    if messages.is_empty() {
        return Err(InferenceError::EmptyInput);
    }

    let per_message = ctx.predict_proba(messages);
    let mean = mean_probabilities(&per_message).ok_or(CoreError::EmptyProbabilities)?;
    let result = PredictionResult::from_probabilities(mean, ctx.schema())?;

    debug!(
        messages = messages.len(),
        label = %result.label,
        "classified user"
    );
    Ok(UserPrediction {
        result,
        message_count: messages.len(),
    })
}

/// Classify every row of `table` by its `message` column.
///
/// The column may hold any type castable to string; nulls are classified as
/// the text [`MISSING_MESSAGE`], the way a dataframe renders a missing cell
/// when cast to string. Fails with [`InferenceError::MissingColumn`] before any row
/// is processed if the column is absent. The returned batch keeps every
/// input column and row in order and adds `predicted_label` and
/// `confidence`, replacing same-named input columns in place.
pub fn classify_batch(
    table: &RecordBatch,
    ctx: &InferenceContext,
) -> Result<RecordBatch, InferenceError> {
    let schema = table.schema();
    let message_idx = schema
        .index_of(batch::MESSAGE)
        .map_err(|_| InferenceError::MissingColumn(batch::MESSAGE.to_string()))?;

    let messages = cast(table.column(message_idx), &DataType::Utf8)?;
    let messages = messages
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| ArrowError::CastError("message column is not Utf8 after cast".into()))?;
    let texts: Vec<&str> = (0..messages.len())
        .map(|i| {
            if messages.is_null(i) {
                MISSING_MESSAGE
            } else {
                messages.value(i)
            }
        })
        .collect();

    let probabilities = ctx.predict_proba(&texts);

    let n = texts.len();
    let mut labels = StringBuilder::with_capacity(n, n * 16);
    let mut confidences = StringBuilder::with_capacity(n, n * 48);
    for probs in &probabilities {
        let index = argmax(probs).ok_or(CoreError::EmptyProbabilities)?;
        labels.append_value(ctx.schema().label(index)?);
        confidences.append_value(format::batch_confidence(ctx.schema(), probs));
    }

    let mut fields: Vec<Field> = schema.fields().iter().map(|f| f.as_ref().clone()).collect();
    let mut columns: Vec<ArrayRef> = table.columns().to_vec();
    set_column(
        &mut fields,
        &mut columns,
        batch::predicted_label_field(),
        Arc::new(labels.finish()),
    );
    set_column(
        &mut fields,
        &mut columns,
        batch::confidence_field(),
        Arc::new(confidences.finish()),
    );

    let output_schema = Schema::new_with_metadata(fields, schema.metadata().clone());
    let output = RecordBatch::try_new(Arc::new(output_schema), columns)?;
    info!(rows = output.num_rows(), "classified batch");
    Ok(output)
}

/// Element-wise arithmetic mean of equal-length vectors. `None` when `rows` is empty.
pub fn mean_probabilities(rows: &[Vec<f64>]) -> Option<Vec<f64>> {
    let width = rows.first()?.len();
    let mut sum = vec![0.0f64; width];
    for row in rows {
        for (acc, &val) in sum.iter_mut().zip(row) {
            *acc += val;
        }
    }
    let count = rows.len() as f64;
    for v in &mut sum {
        *v /= count;
    }
    Some(sum)
}

/// Replace the column named like `field`, or append it.
fn set_column(fields: &mut Vec<Field>, columns: &mut Vec<ArrayRef>, field: Field, column: ArrayRef) {
    match fields.iter().position(|f| f.name() == field.name()) {
        Some(idx) => {
            fields[idx] = field;
            columns[idx] = column;
        }
        None => {
            fields.push(field);
            columns.push(column);
        }
    }
}
