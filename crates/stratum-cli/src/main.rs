//! Stratum Command-Line Interface
//!
//! Inspect subtemplates, detector databases and merged block layouts.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{common, db, layout, subtemplates, version};

/// Stratum - lattice compilation for surface-code computations
#[derive(Parser)]
#[command(name = "stratum")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// YAML configuration file
    #[arg(short, long, global = true, env = "STRATUM_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the distinct subtemplates of the qubit template
    Subtemplates {
        /// Scale parameter
        #[arg(short, long)]
        k: Option<u32>,

        /// Manhattan radius of the subtemplates
        #[arg(short, long)]
        radius: Option<usize>,

        /// Also keep subtemplates centred on index 0
        #[arg(long)]
        keep_empty: bool,

        /// Print every distinct subtemplate
        #[arg(long)]
        show: bool,
    },

    /// Inspect a detector database
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Merge memory blocks placed in a row and print each layer
    Layout {
        /// Scale parameter
        #[arg(short, long)]
        k: Option<u32>,

        /// Number of blocks
        #[arg(short, long, default_value = "2")]
        blocks: u32,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
enum DbAction {
    /// Print a summary of the database
    Stats {
        /// Database file (defaults to the configured database)
        file: Option<PathBuf>,
    },

    /// Check that a re-encoded database answers every situation identically
    Verify {
        /// Database file (defaults to the configured database)
        file: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let result = common::load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Subtemplates {
            k,
            radius,
            keep_empty,
            show,
        } => subtemplates::execute(&config, k, radius, keep_empty, show),
        Commands::Db { action } => match action {
            DbAction::Stats { file } => db::stats(&config, file.as_deref()),
            DbAction::Verify { file } => db::verify(&config, file.as_deref()),
        },
        Commands::Layout { k, blocks } => layout::execute(&config, k, blocks),
        Commands::Version => {
            version::execute();
            Ok(())
        }
    });

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}
