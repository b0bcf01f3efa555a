use std::io::Write;
use std::path::Path;

use agelens_ai::{InferenceContext, InferenceError, classify_batch};
use agelens_store::{read_csv, write_csv};
use anyhow::{Context, Result, bail};

use crate::display;

/// Classify every row of `input`, print the summary table and write the
/// augmented table to `output`.
pub fn run<W: Write>(
    ctx: &InferenceContext,
    input: &Path,
    output: &Path,
    out: &mut W,
) -> Result<()> {
    let table = read_csv(input).with_context(|| format!("failed to read '{}'", input.display()))?;

    let classified = match classify_batch(&table, ctx) {
        Ok(classified) => classified,
        Err(InferenceError::MissingColumn(column)) => {
            bail!("CSV must have a '{column}' column: {}", input.display())
        }
        Err(e) => return Err(e.into()),
    };

    writeln!(out, "{}", display::batch_table(&classified)?)?;
    write_csv(&classified, output)
        .with_context(|| format!("failed to write '{}'", output.display()))?;
    writeln!(
        out,
        "Wrote {} rows to {}",
        classified.num_rows(),
        output.display()
    )?;
    Ok(())
}
