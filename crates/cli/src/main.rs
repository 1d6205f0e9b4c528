use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;
mod output;

use output::OutputFormat;

/// workbench - declarative development shell composer
#[derive(Parser)]
#[command(name = "wb")]
#[command(author, version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// List the supported platform identifiers
  Platforms,

  /// Compose and print the environment descriptor for a platform
  Show {
    /// Platform identifier (default: detected host platform)
    platform: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
  },

  /// Render the activation script for a platform
  Env {
    /// Platform identifier (default: detected host platform)
    platform: Option<String>,

    /// Shell to render for (auto-detected if not specified)
    #[arg(short, long)]
    shell: Option<String>,

    /// Package location, repeatable (NAME[:OUTPUT]=PATH)
    #[arg(long = "pkg", value_name = "NAME[:OUTPUT]=PATH")]
    packages: Vec<String>,
  },
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .without_time()
    .init();

  let cli = Cli::parse();

  match cli.command {
    Commands::Platforms => cmd::cmd_platforms(),
    Commands::Show { platform, format } => cmd::cmd_show(platform.as_deref(), format),
    Commands::Env {
      platform,
      shell,
      packages,
    } => cmd::cmd_env(platform.as_deref(), shell.as_deref(), &packages),
  }
}
