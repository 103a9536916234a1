//! # File Processor Module
//!
//! Porta un singolo file attraverso la pipeline completa:
//! risoluzione path → controllo spazio → ffmpeg → eliminazione opzionale.
//!
//! Ogni esito viene restituito per valore come `FileOutcome`: nessun errore
//! del singolo file può uscire dal loop del batch.

use crate::command::build_ffmpeg_args;
use crate::config::ConversionSettings;
use crate::conversion_log::{ConversionStatus, LogEntry};
use crate::converter::path_resolver::{PathResolution, PathResolver};
use crate::encoder::EncoderChoice;
use crate::error::ConvertError;
use crate::ffmpeg::EncoderTool;
use crate::file_manager::{DiskSpace, FileManager};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

/// Result of processing one input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Success { output: PathBuf },
    Skipped { reason: String },
    Failed { output: Option<PathBuf>, message: String },
}

impl FileOutcome {
    pub fn status(&self) -> ConversionStatus {
        match self {
            Self::Success { .. } => ConversionStatus::Success,
            Self::Skipped { .. } => ConversionStatus::Skipped,
            Self::Failed { .. } => ConversionStatus::Failed,
        }
    }

    pub fn into_log_entry(self, input_path: &Path) -> LogEntry {
        let status = self.status();
        let (output_path, message) = match self {
            Self::Success { output } => (Some(output), None),
            Self::Skipped { reason } => (None, Some(reason)),
            Self::Failed { output, message } => (output, Some(message)),
        };
        LogEntry {
            input_path: input_path.to_path_buf(),
            output_path,
            status,
            message,
        }
    }
}

/// Processes files one at a time with a fixed encoder
pub struct FileProcessor<'a, T: ?Sized> {
    settings: &'a ConversionSettings,
    tool: &'a T,
    space: &'a dyn DiskSpace,
    encoder: EncoderChoice,
}

impl<'a, T: EncoderTool + ?Sized> FileProcessor<'a, T> {
    pub fn new(
        settings: &'a ConversionSettings,
        tool: &'a T,
        space: &'a dyn DiskSpace,
        encoder: EncoderChoice,
    ) -> Self {
        Self {
            settings,
            tool,
            space,
            encoder,
        }
    }

    /// Run the whole single-file pipeline. Exactly one encode attempt.
    pub async fn process(&self, input_path: &Path) -> FileOutcome {
        let output = match PathResolver::resolve(input_path, self.settings).await {
            Ok(PathResolution::Proceed(output)) => output,
            Ok(PathResolution::Skip(reason)) => return FileOutcome::Skipped { reason },
            Err(e) => {
                return FileOutcome::Failed {
                    output: None,
                    message: e.to_string(),
                }
            }
        };

        if let Err(e) = self.check_capacity(input_path, &output).await {
            return FileOutcome::Failed {
                output: None,
                message: e.to_string(),
            };
        }

        let args = build_ffmpeg_args(input_path, &output, self.encoder, self.settings.quality);
        if let Err(e) = self.tool.encode(&args) {
            return FileOutcome::Failed {
                output: Some(output),
                message: e.to_string(),
            };
        }

        if self.settings.delete_original {
            Self::delete_original(input_path).await;
        }

        FileOutcome::Success { output }
    }

    async fn check_capacity(&self, input_path: &Path, output: &Path) -> Result<(), ConvertError> {
        let required = fs::metadata(input_path).await?.len();
        let target_dir = output.parent().unwrap_or(self.settings.output_dir.as_path());
        debug!(
            "Checking free space for {} ({})",
            input_path.display(),
            FileManager::format_size(required)
        );
        FileManager::ensure_disk_capacity(self.space, target_dir, required)
    }

    /// Best effort: a missing file is fine, other errors only warn
    async fn delete_original(input_path: &Path) {
        match fs::remove_file(input_path).await {
            Ok(()) => debug!("Deleted original: {}", input_path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to delete original {}: {}", input_path.display(), e),
        }
    }
}
