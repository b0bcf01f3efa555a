//! Command-line surface for AgeLens.

pub mod commands;
pub mod display;

use std::path::PathBuf;

use agelens_ai::{ArtifactError, Registry};
use agelens_core::Platform;
use clap::{Parser, Subcommand};

/// Default file the batch command writes its augmented table to.
pub const DEFAULT_BATCH_OUTPUT: &str = "predictions_output.csv";

#[derive(Parser)]
#[command(name = "agelens")]
#[command(about = "Infer a user's age group from the messages they write", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding `<platform>_classifier.json` and `<platform>_vectorizer.json`
    #[arg(long, env = "AGELENS_ARTIFACTS", default_value = ".", global = true)]
    pub artifacts: PathBuf,

    /// JSON manifest mapping platforms to artifact files (overrides --artifacts)
    #[arg(long, env = "AGELENS_MANIFEST", global = true)]
    pub manifest: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

impl Cli {
    /// Registry described by `--manifest`, or the conventional layout under `--artifacts`.
    pub fn registry(&self) -> Result<Registry, ArtifactError> {
        match &self.manifest {
            Some(path) => Registry::from_manifest(path),
            None => Ok(Registry::builtin(&self.artifacts)),
        }
    }
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// List platforms and their age-group labels
    Platforms,

    /// Classify a single message
    Predict {
        #[arg(short, long)]
        platform: Platform,

        /// Message text (read from stdin if not provided)
        text: Option<String>,
    },

    /// Classify several messages (one per line) as coming from one user
    User {
        #[arg(short, long)]
        platform: Platform,

        /// File with one message per line (read from stdin if not provided)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Classify every row of a CSV file with a `message` column
    Batch {
        #[arg(short, long)]
        platform: Platform,

        /// Input CSV with a header row
        input: PathBuf,

        /// Where to write the table with predictions added
        #[arg(short, long, default_value = DEFAULT_BATCH_OUTPUT)]
        output: PathBuf,
    },

    /// Interactive session: one message per line, `:help` for commands
    Shell {
        #[arg(short, long)]
        platform: Platform,
    },

    /// Report lines of a delimited file that contain more than one delimiter
    Audit {
        path: PathBuf,

        #[arg(short, long, default_value_t = ',')]
        delimiter: char,
    },
}

/// Convert verbosity count to a log level.
pub fn verbosity_to_level(verbose: u8) -> tracing::Level {
    match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn parse_args(args: &[&str]) -> Result<Cli, clap::Error> {
        let mut full_args = vec!["agelens"];
        full_args.extend(args);
        Cli::try_parse_from(full_args)
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(verbosity_to_level(0), tracing::Level::WARN);
        assert_eq!(verbosity_to_level(1), tracing::Level::INFO);
        assert_eq!(verbosity_to_level(2), tracing::Level::DEBUG);
        assert_eq!(verbosity_to_level(9), tracing::Level::TRACE);
    }

    #[test]
    fn test_predict_with_text() {
        let cli = parse_args(&["predict", "--platform", "tiktok", "no cap fr"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Predict {
                platform: Platform::TikTok,
                text: Some("no cap fr".to_string()),
            }
        );
    }

    #[test]
    fn test_predict_reads_stdin_when_text_missing() {
        let cli = parse_args(&["predict", "-p", "roblox"]).unwrap();
        match cli.command {
            Commands::Predict { platform, text } => {
                assert_eq!(platform, Platform::Roblox);
                assert!(text.is_none());
            }
            _ => panic!("Expected Predict command"),
        }
    }

    #[test]
    fn test_platform_display_name_accepted() {
        let cli = parse_args(&["shell", "--platform", "Character.ai"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Shell {
                platform: Platform::CharacterAi
            }
        );
    }

    #[test]
    fn test_unknown_platform_rejected() {
        assert!(parse_args(&["predict", "--platform", "myspace", "hi"]).is_err());
    }

    #[test]
    fn test_platform_required() {
        assert!(parse_args(&["user"]).is_err());
    }

    #[test]
    fn test_batch_default_output() {
        let cli = parse_args(&["batch", "-p", "tiktok", "in.csv"]).unwrap();
        match cli.command {
            Commands::Batch { input, output, .. } => {
                assert_eq!(input, PathBuf::from("in.csv"));
                assert_eq!(output, PathBuf::from(DEFAULT_BATCH_OUTPUT));
            }
            _ => panic!("Expected Batch command"),
        }
    }

    #[test]
    fn test_audit_delimiter() {
        let cli = parse_args(&["audit", "data.csv"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Audit {
                path: PathBuf::from("data.csv"),
                delimiter: ',',
            }
        );

        let cli = parse_args(&["audit", "data.tsv", "-d", "\t"]).unwrap();
        match cli.command {
            Commands::Audit { delimiter, .. } => assert_eq!(delimiter, '\t'),
            _ => panic!("Expected Audit command"),
        }
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = parse_args(&["platforms", "--artifacts", "/models", "-vv"]).unwrap();
        assert_eq!(cli.artifacts, PathBuf::from("/models"));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_registry_defaults_to_artifact_dir() {
        let cli = parse_args(&["platforms", "--artifacts", "/models"]).unwrap();
        let registry = cli.registry().unwrap();
        let tiktok = registry.get(Platform::TikTok).unwrap();
        assert_eq!(
            tiktok.classifier,
            Path::new("/models").join("tiktok_classifier.json")
        );
    }

    #[test]
    fn test_missing_manifest_is_error() {
        let cli = parse_args(&["platforms", "--manifest", "/nonexistent/agelens.json"]).unwrap();
        assert!(matches!(cli.registry(), Err(ArtifactError::NotFound(_))));
    }
}
