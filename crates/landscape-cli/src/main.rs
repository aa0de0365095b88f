mod commands;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use landscape_core::Config;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "landscape")]
#[command(about = "Structural code graph of a repository", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a repository and print its graph as JSON
    Analyze {
        /// Repository root
        path: PathBuf,
        /// Write the graph to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// Write a default landscape.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Serve the analysis API
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 8000)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            path,
            output,
            compact,
        } => {
            let config = Config::load()?;
            commands::analyze(path, output, compact, config).await
        }
        Commands::Init { force } => commands::init(force),
        Commands::Serve { port } => {
            let config = Config::load()?;
            serve::start_server(serve::ServeConfig { port, config }).await?;
            Ok(())
        }
    }
}
