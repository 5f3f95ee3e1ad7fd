//! Huff: Huffman file compressor
//!
//! ## Usage
//!
//! ```bash
//! # Compress a file
//! huff compress notes.txt notes.huf
//!
//! # Restore it
//! huff decompress notes.huf notes.txt
//!
//! # Verbose, with a tighter output limit
//! huff --log-level debug --max-decoded-size 1048576 decompress notes.huf notes.txt
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use haagenti_huff::{compress_file, decompress_file, failure_message};
use haagenti_huffman::{HuffmanCodec, HuffmanConfig};

#[derive(Parser, Debug)]
#[command(name = "huff")]
#[command(author = "Daemoniorum LLC")]
#[command(version)]
#[command(about = "Huffman file compressor", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    /// Configuration file path (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Largest output a container may declare, in bytes
    #[arg(long, global = true)]
    max_decoded_size: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress INPUT into a container at OUTPUT
    Compress { input: PathBuf, output: PathBuf },
    /// Decompress the container INPUT into OUTPUT
    Decompress { input: PathBuf, output: PathBuf },
}

fn init_logging(log_level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    // RUST_LOG wins over --log-level when set.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_lowercase()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn load_config(args: &Args) -> haagenti_core::Result<HuffmanConfig> {
    let mut config = match &args.config {
        Some(path) => HuffmanConfig::from_json_file(path)?,
        None => HuffmanConfig::default(),
    };
    if let Some(limit) = args.max_decoded_size {
        config = config.with_max_decoded_size(limit);
    }
    Ok(config)
}

fn run(args: &Args) -> haagenti_core::Result<()> {
    let codec = HuffmanCodec::with_config(load_config(args)?);

    match &args.command {
        Command::Compress { input, output } => {
            let stats = compress_file(&codec, input, output)?;
            println!(
                "{} -> {}: {} -> {} bytes ({:.1}% saved)",
                input.display(),
                output.display(),
                stats.original_size,
                stats.compressed_size,
                stats.savings_percent()
            );
        }
        Command::Decompress { input, output } => {
            let written = decompress_file(&codec, input, output)?;
            println!("{} -> {}: {} bytes", input.display(), output.display(), written);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging(&args.log_level) {
        eprintln!("huff: failed to set tracing subscriber: {e}");
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if !e.is_invalid_container() {
                error!(category = e.category(), "{e}");
            }
            eprintln!("{}", failure_message(&e));
            ExitCode::FAILURE
        }
    }
}
