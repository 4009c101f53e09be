//! creative-lint CLI tool.
//!
//! Usage:
//! ```bash
//! creative-lint check [OPTIONS] [PATH]
//! creative-lint fix [OPTIONS] <FILE>
//! creative-lint place --element-type badge --width 200 --height 100 <FILE>
//! creative-lint place --element-type headline --width 600 --height 80 --over-image hero.png <FILE>
//! creative-lint list-rules
//! creative-lint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use creative_lint_core::{ElementRole, FormatType};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Compliance linter for retail ad creatives
#[derive(Parser)]
#[command(name = "creative-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate design snapshots
    Check {
        /// Snapshot file or directory to search for `*.json` (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only run specific rules (comma-separated names or codes)
        #[arg(long)]
        rules: Option<String>,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Apply auto-fixes to a snapshot
    Fix {
        /// Snapshot file to correct
        file: PathBuf,

        /// Where to write the corrected snapshot (default: `<FILE>` with a `.fixed.json` suffix)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Suggest a position for a new element
    Place {
        /// Snapshot the element is added to
        file: PathBuf,

        /// Element type to place (badge, logo, tag, headline, ...)
        #[arg(long)]
        element_type: ElementRole,

        /// Element width in pixels
        #[arg(long)]
        width: f64,

        /// Element height in pixels
        #[arg(long)]
        height: f64,

        /// Creative format (overrides config)
        #[arg(long)]
        format_type: Option<FormatType>,

        /// Background image (file path or data URI) to place text over
        #[arg(long)]
        over_image: Option<String>,
    },

    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Per-run overrides of the configured validation options.
#[derive(clap::Args, Debug, Default)]
pub struct TargetArgs {
    /// Creative format (overrides config)
    #[arg(long)]
    pub format_type: Option<FormatType>,

    /// Treat the creative as an alcohol campaign
    #[arg(long)]
    pub alcohol: bool,
}

/// Output format for validation results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
    /// Rich diagnostics rendered by miette.
    Fancy,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            path,
            format,
            rules,
            exclude,
            target,
        } => {
            let source = config_resolver::resolve(&project_dir(&path), cli.config.as_deref());
            commands::check::run(&path, format, rules, exclude, &target, &source)
        }
        Commands::Fix {
            file,
            output,
            target,
        } => {
            let source = config_resolver::resolve(&project_dir(&file), cli.config.as_deref());
            commands::fix::run(&file, output.as_deref(), &target, &source)
        }
        Commands::Place {
            file,
            element_type,
            width,
            height,
            format_type,
            over_image,
        } => {
            let source = config_resolver::resolve(&project_dir(&file), cli.config.as_deref());
            commands::place::run(
                &file,
                element_type,
                (width, height),
                format_type,
                over_image.as_deref(),
                &source,
            )
        }
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}

/// Directory searched for a project config: the path itself or its parent.
fn project_dir(path: &std::path::Path) -> PathBuf {
    if path.is_dir() {
        path.to_path_buf()
    } else {
        path.parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), std::path::Path::to_path_buf)
    }
}
