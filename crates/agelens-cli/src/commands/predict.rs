use std::io::Write;

use agelens_ai::{InferenceContext, InferenceError, classify_single};
use anyhow::Result;

use super::util;
use crate::display;

pub fn run<W: Write>(ctx: &InferenceContext, text: &str, out: &mut W) -> Result<()> {
    match classify_single(text, ctx) {
        Ok(result) => writeln!(out, "{}", display::single(ctx.schema(), &result))?,
        Err(InferenceError::EmptyInput) => util::warn("Please enter a message."),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{artifact_dir, context};
    use agelens_core::Platform;

    #[test]
    fn prints_label_and_breakdown() {
        let dir = artifact_dir();
        let ctx = context(&dir, Platform::TikTok);

        let mut out = Vec::new();
        run(&ctx, "so much homework", &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Predicted: Minor (under 18)\n\
             Confidence: Not Minor (18+): 4.7%  |  Minor (under 18): 95.3%\n"
        );
    }

    #[test]
    fn blank_text_prints_nothing() {
        let dir = artifact_dir();
        let ctx = context(&dir, Platform::CharacterAi);

        let mut out = Vec::new();
        run(&ctx, "   \n", &mut out).unwrap();
        assert!(out.is_empty());
    }
}
