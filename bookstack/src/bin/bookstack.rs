//! Command-line driver: load book and patron files, then replay a command
//! script against the library.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use bookstack::Library;

#[derive(Parser)]
#[command(
    name = "bookstack",
    about = "Replay a library circulation script against BST-backed stores",
    version
)]
struct Cli {
    /// Book records, one per line
    books: PathBuf,

    /// Patron records, one per line
    patrons: PathBuf,

    /// Command script
    commands: PathBuf,

    /// Enable verbose output
    #[arg(long, short = 'v', conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    quiet: bool,

    /// Skip the balanced rebuild after the bulk load
    #[arg(long)]
    no_rebalance: bool,
}

fn init_tracing(cli: &Cli) {
    // Logging policy:
    //   --quiet  → "off" (display output only)
    //   --verbose → "debug" unless RUST_LOG overrides
    //   default  → "warn" (skipped-line diagnostics stay visible) unless
    //              RUST_LOG overrides
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("off")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "debug".into())
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Open an input file, attaching the path to the error. A missing file is
/// fatal before any processing begins.
fn open(path: &Path) -> io::Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|err| io::Error::new(err.kind(), format!("{}: {err}", path.display())))
}

fn run(cli: &Cli) -> bookstack::Result<()> {
    let books = open(&cli.books)?;
    let patrons = open(&cli.patrons)?;
    let commands = open(&cli.commands)?;

    let mut library = Library::new();

    let stats = library.load_books(books)?;
    info!(applied = stats.applied, rejected = stats.rejected, "books loaded");
    let stats = library.load_patrons(patrons)?;
    info!(applied = stats.applied, rejected = stats.rejected, "patrons loaded");

    if !cli.no_rebalance {
        library.rebalance();
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let stats = library.run_commands(commands, &mut out)?;
    info!(applied = stats.applied, rejected = stats.rejected, "commands replayed");
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("bookstack: {err}");
            ExitCode::FAILURE
        }
    }
}
