use std::io::Write;

use agelens_ai::Registry;
use anyhow::Result;

use crate::display;

pub fn run<W: Write>(registry: &Registry, out: &mut W) -> Result<()> {
    write!(out, "{}", display::platforms(registry))?;
    Ok(())
}
