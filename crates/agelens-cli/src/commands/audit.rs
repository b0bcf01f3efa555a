use std::io::Write;
use std::path::Path;

use agelens_store::LineAudit;
use anyhow::{Context, Result};
use tracing::info;

/// Print `Line <n> → <content>` for every line with more than one delimiter.
pub fn run<W: Write>(path: &Path, delimiter: char, out: &mut W) -> Result<()> {
    let mut audit = LineAudit::open(path, delimiter)
        .with_context(|| format!("failed to open '{}'", path.display()))?;

    let mut flagged = 0usize;
    for line in audit.by_ref() {
        let line = line.with_context(|| format!("failed to read '{}'", path.display()))?;
        writeln!(out, "{line}")?;
        flagged += 1;
    }

    info!(lines = audit.lines_read(), flagged, "audit complete");
    Ok(())
}
