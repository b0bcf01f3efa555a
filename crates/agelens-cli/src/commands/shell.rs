//! Interactive session over one artifact cache.
//!
//! Every plain line is classified as a single message. Commands start with
//! `:`. Switching platform goes through the cache, so the old context is
//! dropped and the new one loaded eagerly; if that fails the session keeps
//! running with no platform until another `:platform` succeeds.

use std::io::{BufRead, Write};
use std::sync::Arc;

use agelens_ai::{ArtifactCache, InferenceContext, InferenceError, classify_single, classify_user};
use agelens_core::Platform;
use anyhow::Result;
use tracing::warn;

use super::util;
use crate::display;

const HELP: &str = "\
Commands:
  :user               classify the following lines, up to a blank line, as one user
  :platform <name>    switch platform (roblox, tiktok, characterai)
  :help               show this help
  :quit               exit";

pub fn run<R: BufRead, W: Write>(
    cache: &mut ArtifactCache,
    platform: Platform,
    input: R,
    out: &mut W,
) -> Result<()> {
    let mut ctx: Option<Arc<InferenceContext>> = Some(util::select(cache, platform)?);
    writeln!(
        out,
        "AgeLens shell: {}. Type ':help' for commands, ':quit' to exit.",
        platform.display_name()
    )?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            break; // EOF
        };
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(command) = line.strip_prefix(':') {
            let (name, arg) = match command.split_once(char::is_whitespace) {
                Some((name, arg)) => (name, arg.trim()),
                None => (command, ""),
            };
            match name {
                "quit" | "q" | "exit" => break,
                "help" => writeln!(out, "{HELP}")?,
                "platform" => ctx = switch(cache, arg, ctx.take(), out)?,
                "user" => {
                    let mut raw = String::new();
                    for next in lines.by_ref() {
                        let next = next?;
                        if next.trim().is_empty() {
                            break;
                        }
                        raw.push_str(&next);
                        raw.push('\n');
                    }
                    if let Some(ctx) = require(&ctx) {
                        match classify_user(&raw, ctx) {
                            Ok(prediction) => {
                                writeln!(out, "{}", display::user(ctx.schema(), &prediction))?
                            }
                            Err(InferenceError::EmptyInput) => {
                                util::warn("Please enter at least one message.")
                            }
                            Err(e) => return Err(e.into()),
                        }
                    }
                }
                other => util::warn(&format!("unknown command ':{other}', try ':help'")),
            }
            continue;
        }

        if let Some(ctx) = require(&ctx) {
            let result = classify_single(line, ctx)?;
            writeln!(out, "{}", display::single(ctx.schema(), &result))?;
        }
    }
    Ok(())
}

/// Context to use after `:platform <name>`. An unparseable name keeps `current`.
fn switch<W: Write>(
    cache: &mut ArtifactCache,
    name: &str,
    current: Option<Arc<InferenceContext>>,
    out: &mut W,
) -> Result<Option<Arc<InferenceContext>>> {
    let platform: Platform = match name.parse() {
        Ok(platform) => platform,
        Err(e) => {
            util::warn(&e.to_string());
            return Ok(current);
        }
    };
    drop(current);
    match cache.select(platform) {
        Ok(ctx) => {
            writeln!(out, "Switched to {}.", platform.display_name())?;
            Ok(Some(ctx))
        }
        Err(e) => {
            warn!(%platform, error = %e, "platform switch failed");
            util::warn(&format!(
                "could not load {} artifacts: {e}. Use ':platform <name>' to pick another.",
                platform.display_name()
            ));
            Ok(None)
        }
    }
}

fn require(ctx: &Option<Arc<InferenceContext>>) -> Option<&InferenceContext> {
    let ctx = ctx.as_deref();
    if ctx.is_none() {
        util::warn("no platform loaded, use ':platform <name>'");
    }
    ctx
}
