//! # AV1 Batch Converter - Main Entry Point
//!
//! Questo è il punto di ingresso principale dell'applicazione.
//!
//! ## Responsabilità:
//! - Parsing degli argomenti della command line con `clap`
//! - Inizializzazione del sistema di logging con `tracing`
//! - Creazione e validazione di `ConversionSettings`
//! - Avvio del batch e conversione del risultato in exit code
//!
//! ## Exit code:
//! - `0`: nessun file fallito (i file saltati non contano)
//! - `1`: almeno un file fallito, oppure errore fatale prima del batch
//!
//! ## Esempio di utilizzo:
//! ```bash
//! av1-convert ~/videos/raw ~/videos/av1 --quality 30 --allow-software
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use av1_batch_converter::file_manager::FileManager;
use av1_batch_converter::{BatchConverter, ConversionSettings, Ffmpeg, Quality};

#[derive(Parser)]
#[command(name = "av1-convert")]
#[command(about = "Convert MP4 files to AV1 format")]
struct Args {
    /// Input directory containing the videos to convert
    input: PathBuf,

    /// Output directory for converted files and the conversion log
    output: PathBuf,

    /// Quality parameter (0-51)
    #[arg(long, default_value = "28")]
    quality: u32,

    /// Rename colliding outputs instead of skipping them
    #[arg(long)]
    no_skip_existing: bool,

    /// Delete the original file after a successful conversion
    #[arg(long)]
    delete_original: bool,

    /// Fall back to software encoding when NVENC is unavailable
    #[arg(long)]
    allow_software: bool,

    /// Emit start, per-file and summary events as JSON lines
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Initialize logging; stdout is reserved for the report
    let default_level = if args.verbose { "debug" } else { "info" };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let quality = Quality::new(args.quality)?;
    let input_dir = FileManager::resolve_path(&args.input)
        .with_context(|| format!("Failed to resolve {}", args.input.display()))?;
    let output_dir = FileManager::resolve_path(&args.output)
        .with_context(|| format!("Failed to resolve {}", args.output.display()))?;
    let settings = ConversionSettings::new(input_dir, output_dir)
        .with_quality(quality)
        .with_skip_existing(!args.no_skip_existing)
        .with_delete_original(args.delete_original)
        .with_allow_software(args.allow_software);

    debug!("Settings: {:?}", settings);

    let report = BatchConverter::new(settings, Ffmpeg::locate())
        .with_json_output(args.json)
        .run()
        .await?;

    Ok(ExitCode::from(report.exit_code()))
}
