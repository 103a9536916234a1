//! # Path Resolution Module
//!
//! Centralizza il calcolo del path di output di ogni file.
//!
//! Il path relativo alla directory di input viene riprodotto sotto la
//! directory di output con estensione `.mkv`. Se il file esiste già:
//! - con skip-existing attivo → `PathResolution::Skip`
//! - altrimenti → primo nome libero tra `nome_1`, `nome_2`, ...

use crate::config::ConversionSettings;
use crate::error::ConvertError;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Extension of the converted files
pub const OUTPUT_EXTENSION: &str = "mkv";

/// Message recorded for skipped inputs
pub const SKIP_MESSAGE: &str = "existing output skipped";

/// Outcome of output path resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathResolution {
    /// Convert into this path
    Proceed(PathBuf),
    /// Leave the input untouched
    Skip(String),
}

/// Utility per calcolare i path di output in modo centralizzato
pub struct PathResolver;

impl PathResolver {
    /// Calcola il path di output e crea la directory padre
    pub async fn resolve(
        input_path: &Path,
        settings: &ConversionSettings,
    ) -> Result<PathResolution, ConvertError> {
        let candidate = Self::candidate_path(input_path, settings);

        if let Some(parent) = candidate.parent() {
            fs::create_dir_all(parent).await?;
        }

        if !fs::try_exists(&candidate).await? {
            return Ok(PathResolution::Proceed(candidate));
        }

        if settings.skip_existing {
            debug!("Output exists, skipping: {}", candidate.display());
            return Ok(PathResolution::Skip(SKIP_MESSAGE.to_string()));
        }

        let unique = Self::unique_path(&candidate);
        debug!("Output exists, renamed: {} -> {}", candidate.display(), unique.display());
        Ok(PathResolution::Proceed(unique))
    }

    /// Mirror the input's relative location under the output root
    fn candidate_path(input_path: &Path, settings: &ConversionSettings) -> PathBuf {
        let relative = match input_path.strip_prefix(&settings.input_dir) {
            Ok(rel) => rel.to_path_buf(),
            Err(e) => {
                debug!("[ERROR] Strip prefix failed: {} - fallback to file name", e);
                PathBuf::from(input_path.file_name().unwrap_or_default())
            }
        };

        settings.output_dir.join(relative).with_extension(OUTPUT_EXTENSION)
    }

    /// First free path among `stem_1.ext`, `stem_2.ext`, ...
    pub fn unique_path(base_path: &Path) -> PathBuf {
        let stem = base_path.file_stem().unwrap_or_default().to_string_lossy();
        let extension = base_path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();
        let parent = base_path.parent().unwrap_or(Path::new(""));

        let mut new_path = base_path.to_path_buf();
        let mut counter = 1u64;
        while new_path.exists() {
            new_path = parent.join(format!("{}_{}{}", stem, counter, extension));
            counter += 1;
        }
        new_path
    }
}
