mod commands;
mod summary;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "docscan", about = "Document scanning and upload tool")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (TOML). Defaults to ./docscan.toml when present
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show what a file is and how it would render
    Info(commands::info::InfoArgs),
    /// Render and transform a document without uploading it
    Process(commands::process::ProcessArgs),
    /// Process a document and store it with its metadata
    Upload(commands::upload::UploadArgs),
    /// List stored documents for a user
    Gallery(commands::gallery::GalleryArgs),
    /// Print or save a default config
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = cli.config.as_deref();
    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Process(args) => commands::process::run(args, config),
        Commands::Upload(args) => commands::upload::run(args, config),
        Commands::Gallery(args) => commands::gallery::run(args, config),
        Commands::Config(args) => commands::config::run(args),
    }
}
