//! Matrixload CLI - square integer matrix operations on CSV files
//!
//! # Main Commands
//!
//! ```bash
//! matrixload serve                      # Start HTTP server (port 8080)
//! matrixload run sum matrix.csv         # Apply one operation to a local file
//! matrixload validate matrix.csv        # Check a file without transforming it
//! matrixload operations                 # Show available operations
//! ```
//!
//! Send a request to a running server with:
//!
//! ```bash
//! curl -F 'file=@matrix.csv' "localhost:8080/echo"
//! ```

use clap::{Parser, Subcommand};
use matrixload::{check_file, operations_description, run_file, Operation, ServerConfig};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "matrixload")]
#[command(
    about = "Echo, invert, flatten, sum or multiply square CSV integer matrices",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server
    Serve {
        #[command(flatten)]
        config: ServerConfig,
    },

    /// Apply an operation to a CSV file and print the result
    Run {
        /// echo, invert, flatten, sum or multiply
        operation: Operation,

        /// Input CSV file
        input: PathBuf,
    },

    /// Check that a CSV file holds a square integer matrix
    Validate {
        /// Input CSV file
        input: PathBuf,
    },

    /// Show available operations
    Operations,
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { config } => cmd_serve(config).await,
        Commands::Run { operation, input } => cmd_run(operation, &input),
        Commands::Validate { input } => cmd_validate(&input),
        Commands::Operations => cmd_operations(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn cmd_serve(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    matrixload::server::start_server(config).await?;
    Ok(())
}

fn cmd_run(operation: Operation, input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let output = run_file(operation, input)?;
    print!("{}", output);
    Ok(())
}

fn cmd_validate(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let matrix = check_file(input)?;
    println!(
        "{}: valid {}x{} integer matrix",
        input.display(),
        matrix.row_count(),
        matrix.column_count()
    );
    Ok(())
}

fn cmd_operations() -> Result<(), Box<dyn std::error::Error>> {
    print!("{}", operations_description());
    Ok(())
}
