//! CSV tables as Arrow record batches.
//!
//! Reading infers the schema from every record in the file so a column that
//! only turns non-numeric near the end still comes back as text. The whole
//! file is returned as one batch.

use std::fs::File;
use std::io::{BufReader, BufWriter, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::Arc;

use arrow::compute::concat_batches;
use arrow::csv::reader::Format;
use arrow::csv::{ReaderBuilder, WriterBuilder};
use arrow::record_batch::RecordBatch;
use tracing::info;

use crate::StoreError;

/// Read a CSV file with a header row into a single batch.
pub fn read_csv(path: &Path) -> Result<RecordBatch, StoreError> {
    if !path.exists() {
        return Err(StoreError::NotFound(path.to_path_buf()));
    }
    let mut file = File::open(path)?;

    let (schema, records) = Format::default()
        .with_header(true)
        .infer_schema(BufReader::new(&mut file), None)?;
    file.seek(SeekFrom::Start(0))?;

    let schema = Arc::new(schema);
    let reader = ReaderBuilder::new(Arc::clone(&schema))
        .with_header(true)
        .build(BufReader::new(file))?;
    let batches = reader.collect::<Result<Vec<_>, _>>()?;
    let batch = concat_batches(&schema, &batches)?;

    info!(
        path = %path.display(),
        rows = batch.num_rows(),
        columns = batch.num_columns(),
        records,
        "read csv"
    );
    Ok(batch)
}

/// Write `batch` to `path` with a header row, replacing any existing file.
pub fn write_csv(batch: &RecordBatch, path: &Path) -> Result<(), StoreError> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    write_csv_to(batch, &mut out)?;
    out.flush()?;
    info!(path = %path.display(), rows = batch.num_rows(), "wrote csv");
    Ok(())
}

pub fn write_csv_to<W: Write>(batch: &RecordBatch, writer: W) -> Result<(), StoreError> {
    let mut csv = WriterBuilder::new().with_header(true).build(writer);
    csv.write(batch)?;
    Ok(())
}
