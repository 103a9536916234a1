//! # Conversion Log Module
//!
//! Questo modulo gestisce il log CSV persistente dei risultati per file.
//!
//! ## Responsabilità:
//! - Definisce `ConversionStatus` e `LogEntry` (una riga per file di input)
//! - Scrive il log in modalità append, con header solo alla creazione del file
//! - Usa il crate `csv` per quoting ed escaping standard
//!
//! ## Formato:
//! ```text
//! input,output,status,message
//! /videos/in/a.mp4,/videos/out/a.mkv,success,
//! /videos/in/b.mp4,,skipped,existing output skipped
//! ```
//!
//! Il file non viene creato finché non arriva la prima entry.

use crate::error::ConvertError;
use serde::Serialize;
use std::fmt;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

const HEADER: [&str; 4] = ["input", "output", "status", "message"];

/// Terminal classification of one input file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversionStatus {
    Success,
    Failed,
    Skipped,
}

impl ConversionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
        }
    }
}

impl fmt::Display for ConversionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the conversion log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub input_path: PathBuf,
    pub output_path: Option<PathBuf>,
    pub status: ConversionStatus,
    pub message: Option<String>,
}

/// Append-only CSV log
pub struct ConversionLog {
    path: PathBuf,
}

impl ConversionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry, writing the header first if the file is new
    pub fn append(&self, entry: &LogEntry) -> Result<(), ConvertError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let write_header = !self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if write_header {
            writer.write_record(HEADER)?;
        }

        let input = entry.input_path.display().to_string();
        let output = entry
            .output_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();

        writer.write_record([
            input.as_str(),
            output.as_str(),
            entry.status.as_str(),
            entry.message.as_deref().unwrap_or(""),
        ])?;
        writer.flush()?;
        Ok(())
    }
}
