use std::io::Write;

use agelens_ai::{InferenceContext, InferenceError, classify_user};
use anyhow::Result;

use super::util;
use crate::display;

pub fn run<W: Write>(ctx: &InferenceContext, raw: &str, out: &mut W) -> Result<()> {
    match classify_user(raw, ctx) {
        Ok(prediction) => writeln!(out, "{}", display::user(ctx.schema(), &prediction))?,
        Err(InferenceError::EmptyInput) => util::warn("Please enter at least one message."),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
