//! # JSON Output Module
//!
//! Output strutturato (una riga JSON per evento) per chi invoca il
//! convertitore da script, attivato con `--json`.
//!
//! ## Tipi di messaggi:
//! - `start`: inizio del batch, encoder scelto e numero di file
//! - `file_complete`: esito di un file (stessi campi della riga CSV)
//! - `summary`: contatori finali e path del log

use crate::conversion_log::{ConversionStatus, LogEntry};
use crate::progress::ConversionSummary;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Tipo di messaggio JSON
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JsonMessage {
    Start {
        input_dir: PathBuf,
        output_dir: PathBuf,
        total_files: usize,
        encoder: String,
        quality: u8,
    },

    FileComplete {
        input: PathBuf,
        output: Option<PathBuf>,
        status: ConversionStatus,
        message: Option<String>,
    },

    Summary {
        #[serde(flatten)]
        counts: ConversionSummary,
        log_file: PathBuf,
    },
}

impl JsonMessage {
    /// Print as a single JSON line on stdout
    pub fn emit(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            println!("{}", json);
        }
    }

    pub fn file_complete(entry: &LogEntry) -> Self {
        Self::FileComplete {
            input: entry.input_path.clone(),
            output: entry.output_path.clone(),
            status: entry.status,
            message: entry.message.clone(),
        }
    }

    pub fn summary(summary: &ConversionSummary, log_path: &Path) -> Self {
        Self::Summary {
            counts: *summary,
            log_file: log_path.to_path_buf(),
        }
    }
}
