//! # Batch Converter
//!
//! Orchestratore principale: enumera i file, sceglie l'encoder una volta sola,
//! processa i file in sequenza, registra ogni esito nel log CSV e stampa il
//! riepilogo finale.
//!
//! ## Flusso di esecuzione:
//! 1. **Discovery**: tutti i `.mp4` sotto la directory di input, ordinati per path
//! 2. **Output**: la directory di output deve esistere ed essere scrivibile
//! 3. **Encoder**: interrogazione unica di ffmpeg (`av1_nvenc` o fallback `libaom-av1`)
//! 4. **Loop**: un file alla volta → `FileOutcome` → riga CSV → contatori
//! 5. **Report**: totali e path del log
//!
//! Gli errori dei punti 1-3 interrompono l'esecuzione prima di toccare qualsiasi
//! file; gli errori del singolo file diventano righe `failed`.

use crate::{
    config::ConversionSettings,
    conversion_log::{ConversionLog, ConversionStatus},
    converter::file_processor::FileProcessor,
    encoder::select_encoder,
    ffmpeg::{EncoderTool, Ffmpeg},
    file_manager::{DiskSpace, FileManager, SystemDiskSpace},
    json_output::JsonMessage,
    progress::{ConversionSummary, ProgressManager},
};
use anyhow::Result;
use std::path::PathBuf;
use tracing::{error, info};

/// Final state of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub summary: ConversionSummary,
    pub log_path: PathBuf,
}

impl RunReport {
    /// 1 if any file failed, otherwise 0
    pub fn exit_code(&self) -> u8 {
        if self.summary.has_failures() {
            1
        } else {
            0
        }
    }
}

/// Orchestratore del batch
pub struct BatchConverter<T> {
    settings: ConversionSettings,
    tool: T,
    space: Box<dyn DiskSpace>,
    json_output: bool,
}

impl<T: EncoderTool> BatchConverter<T> {
    pub fn new(settings: ConversionSettings, tool: T) -> Self {
        Self {
            settings,
            tool,
            space: Box::new(SystemDiskSpace),
            json_output: false,
        }
    }

    /// Replace the free-space source used by the capacity check
    pub fn with_disk_space(mut self, space: impl DiskSpace + 'static) -> Self {
        self.space = Box::new(space);
        self
    }

    /// Emit JSON lines instead of the text report and progress bar
    pub fn with_json_output(mut self, json_output: bool) -> Self {
        self.json_output = json_output;
        self
    }

    pub fn tool(&self) -> &T {
        &self.tool
    }

    /// Esegue l'intero batch
    pub async fn run(&self) -> Result<RunReport> {
        let files = FileManager::find_video_files(&self.settings.input_dir)?;
        FileManager::ensure_output_directory(&self.settings.output_dir).await?;
        let encoder = select_encoder(&self.tool, self.settings.allow_software)?;

        let log = ConversionLog::new(self.settings.log_path());
        let processor =
            FileProcessor::new(&self.settings, &self.tool, self.space.as_ref(), encoder);
        let mut summary = ConversionSummary::new();

        if self.json_output {
            JsonMessage::Start {
                input_dir: self.settings.input_dir.clone(),
                output_dir: self.settings.output_dir.clone(),
                total_files: files.len(),
                encoder: encoder.codec().to_string(),
                quality: self.settings.quality.value(),
            }
            .emit();
        } else {
            info!(
                "Converting {} files from {} (encoder: {}, quality: {})",
                files.len(),
                self.settings.input_dir.display(),
                encoder,
                self.settings.quality
            );
        }

        let progress = ProgressManager::new(files.len() as u64, !self.json_output);

        for file_path in &files {
            progress.start_file(file_path);

            let entry = processor.process(file_path).await.into_log_entry(file_path);
            if entry.status == ConversionStatus::Failed {
                error!(
                    "Failed to convert {}: {}",
                    file_path.display(),
                    entry.message.as_deref().unwrap_or_default()
                );
            } else {
                info!("{}: {}", entry.status, file_path.display());
            }

            log.append(&entry)?;
            summary.register(entry.status);
            if self.json_output {
                JsonMessage::file_complete(&entry).emit();
            }

            progress.file_done();
        }

        progress.finish();

        let log_path = log.path().to_path_buf();
        if self.json_output {
            JsonMessage::summary(&summary, &log_path).emit();
        } else {
            println!("{}", summary.format_report(&log_path));
        }

        Ok(RunReport { summary, log_path })
    }
}

/// Run a conversion with the ffmpeg found on this system
pub async fn run_conversion(settings: ConversionSettings) -> Result<RunReport> {
    BatchConverter::new(settings, Ffmpeg::locate()).run().await
}
