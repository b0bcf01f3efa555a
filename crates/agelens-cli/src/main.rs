use std::io;

use anyhow::Result;
use clap::Parser;

use agelens_cli::commands::{self, util};
use agelens_cli::{Cli, Commands, verbosity_to_level};

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(verbosity_to_level(cli.verbose))
        .init();
    tracing::info!("agelens v{}", env!("CARGO_PKG_VERSION"));

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Commands::Platforms => {
            let registry = cli.registry()?;
            commands::platforms::run(&registry, &mut out)
        }

        Commands::Predict { platform, text } => {
            let mut cache = util::open_cache(&cli)?;
            let ctx = util::select(&mut cache, *platform)?;
            let text = util::resolve_text(text.as_deref())?;
            commands::predict::run(&ctx, &text, &mut out)
        }

        Commands::User { platform, file } => {
            let mut cache = util::open_cache(&cli)?;
            let ctx = util::select(&mut cache, *platform)?;
            let raw = util::resolve_file(file.as_deref())?;
            commands::user::run(&ctx, &raw, &mut out)
        }

        Commands::Batch {
            platform,
            input,
            output,
        } => {
            let mut cache = util::open_cache(&cli)?;
            let ctx = util::select(&mut cache, *platform)?;
            commands::batch::run(&ctx, input, output, &mut out)
        }

        Commands::Shell { platform } => {
            let mut cache = util::open_cache(&cli)?;
            commands::shell::run(&mut cache, *platform, io::stdin().lock(), &mut out)
        }

        Commands::Audit { path, delimiter } => commands::audit::run(path, *delimiter, &mut out),
    }
}
