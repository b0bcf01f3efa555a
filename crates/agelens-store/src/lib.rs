//! Storage layer: CSV tables in and out as Arrow batches, and the line auditor.

pub mod audit;
pub mod csv;
mod error;

pub use audit::{FlaggedLine, LineAudit, audit_file};
pub use csv::{read_csv, write_csv, write_csv_to};
pub use error::StoreError;
