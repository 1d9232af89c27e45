//! CLI for inspecting locale formats and resolving OCR text.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, formats, locales, resolve};

/// ocrfmt - Turn OCR text into typed field values
#[derive(Parser)]
#[command(name = "ocrfmt")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the distinct formats of each category
    Formats(formats::FormatsArgs),

    /// Resolve text into a value for a field type
    Resolve(resolve::ResolveArgs),

    /// List the built-in locales
    Locales(locales::LocalesArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Formats(args) => formats::run(args, cli.config.as_deref()),
        Commands::Resolve(args) => resolve::run(args, cli.config.as_deref()),
        Commands::Locales(args) => locales::run(args, cli.config.as_deref()),
        Commands::Config(args) => config::run(args, cli.config.as_deref()),
    }
}
