//! Lineage CLI - Interactive prompt for the relationship graph

use std::io::BufRead;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use lineage_core::Lineage;

mod files;
mod output;
mod repl;

#[derive(Parser)]
#[command(name = "lineage")]
#[command(author, version, about = "Genealogical record keeper")]
pub struct Cli {
    /// Data directory for snapshots
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Load a specific snapshot at startup
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Get the data directory path
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(files::default_data_dir)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting lineage prompt");

    let data_dir = cli.data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let lineage = match &cli.file {
        Some(path) => {
            let (lineage, report) = lineage_store::load(path)?;
            println!("{} from {}", report, path.display());
            lineage
        }
        None => Lineage::new(),
    };

    let stdin = std::io::stdin();
    repl::Session::new(lineage, data_dir).run(stdin.lock().lines())
}
