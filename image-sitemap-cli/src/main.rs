//! image-sitemap: render Google image sitemaps from record files.
//!
//! # Usage
//!
//! ```text
//! image-sitemap render <records.yaml|json> [-o sitemap.xml] [--header STR] [--policy reject|skip] [--templates DIR] [--dry-run]
//! image-sitemap validate <records.yaml|json> [--json]
//! image-sitemap diff <records.yaml|json> <sitemap.xml> [--header STR] [--policy reject|skip] [--templates DIR]
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{diff::DiffArgs, render::RenderArgs, validate::ValidateArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "image-sitemap",
    version,
    about = "Render Google image sitemaps from page and image records",
    long_about = None,
)]
struct Cli {
    /// Log debug output to stderr (overridden by RUST_LOG).
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a record file into an image sitemap.
    Render(RenderArgs),

    /// Check a record file for nodes or images without a location URL.
    Validate(ValidateArgs),

    /// Show unified diff of what `render -o` would change on disk.
    Diff(DiffArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Render(args) => args.run(),
        Commands::Validate(args) => args.run(),
        Commands::Diff(args) => args.run(),
    }
}
