//! # Error Types Module
//!
//! Questo modulo definisce i tipi di errore custom del convertitore.
//!
//! ## Categorie di errori:
//! - `InvalidQuality`, `InputDirMissing`, `OutputNotWritable`: errori di configurazione,
//!   fatali prima dell'avvio del batch
//! - `ToolMissing`, `NoEncoderAvailable`: nessun encoder utilizzabile, fatali
//! - `InsufficientSpace`, `FFmpeg`: errori del singolo file, registrati come `failed`
//! - `Io`, `Log`: errori di I/O generici e di scrittura del log CSV
//!
//! ## Esempio:
//! ```rust,ignore
//! if !encoders.contains(HARDWARE_ENCODER) && !allow_software {
//!     return Err(ConvertError::NoEncoderAvailable);
//! }
//! ```

use std::path::PathBuf;

/// Custom error types for batch conversion
#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Log file error: {0}")]
    Log(#[from] csv::Error),

    #[error("Quality must be between 0 and 51 (got {0})")]
    InvalidQuality(u32),

    #[error("Input directory does not exist: {}", .0.display())]
    InputDirMissing(PathBuf),

    #[error("Output directory is not writable: {}", .0.display())]
    OutputNotWritable(PathBuf),

    #[error("ffmpeg command not found: {0}")]
    ToolMissing(String),

    #[error("AV1 NVENC encoder is unavailable and software fallback is not allowed")]
    NoEncoderAvailable,

    #[error("Insufficient disk space: {required} bytes required, {available} bytes available")]
    InsufficientSpace { required: u64, available: u64 },

    #[error("FFmpeg error: {0}")]
    FFmpeg(String),
}
