//! # Progress Tracking and Summary Module
//!
//! Questo modulo gestisce la barra di avanzamento e le statistiche finali.
//!
//! ## Componenti principali:
//! - `ProgressManager`: barra `indicatif`, nascosta se stdout non è un terminale
//! - `ConversionSummary`: contatori total/success/failed/skipped
//!
//! ## Visual feedback:
//! ```text
//! ⠋ [00:02:15] [========================>---------------] 3/5 (60%) episode3.mp4
//! ```
//!
//! ## Report finale:
//! ```text
//! === Conversion Summary ===
//! Total   : 5
//! Success : 4
//! Failed  : 1
//! Skipped : 0
//! Log file: /videos/out/convert_log.csv
//! ```

use crate::conversion_log::ConversionStatus;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::io::IsTerminal;
use std::path::Path;
use std::time::Duration;

/// Manages the per-file progress bar
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a progress bar, drawn only when `visible` and stdout is a terminal
    pub fn new(total_files: u64, visible: bool) -> Self {
        if !visible || !std::io::stdout().is_terminal() {
            return Self {
                bar: ProgressBar::hidden(),
            };
        }

        let bar = ProgressBar::new(total_files);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Show the file currently being converted
    pub fn start_file(&self, file_path: &Path) {
        let name = file_path.file_name().unwrap_or_default().to_string_lossy();
        self.bar.set_message(name.into_owned());
    }

    /// Advance by one file
    pub fn file_done(&self) {
        self.bar.inc(1);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

/// Counters for one run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConversionSummary {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl ConversionSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one file's outcome
    pub fn register(&mut self, status: ConversionStatus) {
        self.total += 1;
        match status {
            ConversionStatus::Success => self.success += 1,
            ConversionStatus::Failed => self.failed += 1,
            ConversionStatus::Skipped => self.skipped += 1,
        }
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    pub fn format_report(&self, log_path: &Path) -> String {
        format!(
            "=== Conversion Summary ===\n\
             Total   : {}\n\
             Success : {}\n\
             Failed  : {}\n\
             Skipped : {}\n\
             Log file: {}",
            self.total,
            self.success,
            self.failed,
            self.skipped,
            log_path.display()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_counts_each_status() {
        let mut summary = ConversionSummary::new();
        summary.register(ConversionStatus::Success);
        summary.register(ConversionStatus::Success);
        summary.register(ConversionStatus::Skipped);
        assert!(!summary.has_failures());
        summary.register(ConversionStatus::Failed);

        assert_eq!(
            summary,
            ConversionSummary {
                total: 4,
                success: 2,
                failed: 1,
                skipped: 1,
            }
        );
        assert!(summary.has_failures());
    }

    #[test]
    fn test_format_report() {
        let summary = ConversionSummary {
            total: 3,
            success: 1,
            failed: 1,
            skipped: 1,
        };
        let report = summary.format_report(Path::new("/out/convert_log.csv"));
        assert_eq!(
            report,
            "=== Conversion Summary ===\nTotal   : 3\nSuccess : 1\nFailed  : 1\nSkipped : 1\nLog file: /out/convert_log.csv"
        );
    }

    #[test]
    fn test_hidden_progress_is_noop() {
        let progress = ProgressManager::new(2, false);
        progress.start_file(Path::new("/in/a.mp4"));
        progress.file_done();
        progress.finish();
    }
}
