use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;

use agelens_ai::{ArtifactCache, InferenceContext};
use agelens_core::Platform;
use anyhow::{Context, Result};

use crate::Cli;

/// Text from the argument, or all of stdin when none was given.
pub fn resolve_text(text: Option<&str>) -> Result<String> {
    match text {
        Some(text) => Ok(text.to_string()),
        None => read_stdin(),
    }
}

/// Contents of `file`, or all of stdin when none was given.
pub fn resolve_file(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read '{}'", path.display())),
        None => read_stdin(),
    }
}

fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin()
        .lock()
        .read_to_string(&mut buffer)
        .context("failed to read stdin")?;
    Ok(buffer)
}

/// Empty cache over the registry the global options describe.
pub fn open_cache(cli: &Cli) -> Result<ArtifactCache> {
    let registry = cli.registry().context("failed to load artifact registry")?;
    Ok(ArtifactCache::new(registry))
}

pub fn select(cache: &mut ArtifactCache, platform: Platform) -> Result<Arc<InferenceContext>> {
    cache
        .select(platform)
        .with_context(|| format!("failed to load {} artifacts", platform.display_name()))
}

/// Non-fatal user-facing warning.
pub fn warn(message: &str) {
    eprintln!("warning: {message}");
}
