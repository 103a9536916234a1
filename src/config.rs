//! # Configuration Management Module
//!
//! Questo modulo gestisce la configurazione di una singola esecuzione.
//!
//! ## Responsabilità:
//! - Definisce la struct `ConversionSettings` con tutti i parametri di conversione
//! - Garantisce che il parametro di qualità sia sempre nel range 0-51 tramite `Quality`
//! - Fornisce valori di default coerenti con la CLI
//!
//! ## Parametri di configurazione:
//! - `input_dir`: Directory con i file MP4 da convertire
//! - `output_dir`: Directory dove scrivere i file MKV e il log CSV
//! - `quality`: Qualità (0-51, default: 28), passata invariata all'encoder
//! - `skip_existing`: Salta i file il cui output esiste già (default: true)
//! - `delete_original`: Elimina il sorgente dopo una conversione riuscita (default: false)
//! - `allow_software`: Permette il fallback su libaom-av1 (default: false)
//!
//! ## Esempio:
//! ```rust,ignore
//! let settings = ConversionSettings::new("/videos/in", "/videos/out")
//!     .with_quality(Quality::new(30)?)
//!     .with_delete_original(true);
//! ```

use crate::error::ConvertError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Name of the CSV log written inside the output directory
pub const LOG_FILE_NAME: &str = "convert_log.csv";

/// Quality parameter, always within 0-51
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quality(u8);

impl Quality {
    pub const MAX: u32 = 51;
    pub const DEFAULT: Quality = Quality(28);

    pub fn new(value: u32) -> Result<Self, ConvertError> {
        if value > Self::MAX {
            return Err(ConvertError::InvalidQuality(value));
        }
        Ok(Self(value as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for Quality {
    type Error = ConvertError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quality> for u32 {
    fn from(quality: Quality) -> Self {
        quality.0 as u32
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Configuration for one conversion run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionSettings {
    /// Directory containing the MP4 files to convert
    pub input_dir: PathBuf,
    /// Directory receiving the converted files and the log
    pub output_dir: PathBuf,
    /// Quality (0-51, lower = better quality)
    pub quality: Quality,
    /// Skip inputs whose output already exists instead of renaming
    pub skip_existing: bool,
    /// Remove the source file after a successful conversion
    pub delete_original: bool,
    /// Fall back to software encoding when NVENC is unavailable
    pub allow_software: bool,
}

impl ConversionSettings {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            quality: Quality::default(),
            skip_existing: true,
            delete_original: false,
            allow_software: false,
        }
    }

    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_skip_existing(mut self, skip_existing: bool) -> Self {
        self.skip_existing = skip_existing;
        self
    }

    pub fn with_delete_original(mut self, delete_original: bool) -> Self {
        self.delete_original = delete_original;
        self
    }

    pub fn with_allow_software(mut self, allow_software: bool) -> Self {
        self.allow_software = allow_software;
        self
    }

    /// Path of the CSV log for this run
    pub fn log_path(&self) -> PathBuf {
        self.output_dir.join(LOG_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_accepts_full_range() {
        for value in 0..=51 {
            let quality = Quality::new(value).unwrap();
            assert_eq!(quality.value() as u32, value);
        }
    }

    #[test]
    fn test_quality_rejects_out_of_range() {
        for value in [52, 100, 255, u32::MAX] {
            assert!(matches!(
                Quality::new(value),
                Err(ConvertError::InvalidQuality(v)) if v == value
            ));
        }
    }

    #[test]
    fn test_settings_default() {
        let settings = ConversionSettings::new("/in", "/out");
        assert_eq!(settings.quality.value(), 28);
        assert!(settings.skip_existing);
        assert!(!settings.delete_original);
        assert!(!settings.allow_software);
        assert_eq!(settings.log_path(), PathBuf::from("/out/convert_log.csv"));
    }

    #[test]
    fn test_settings_deserialize_validates_quality() {
        let valid = r#"{"input_dir":"/in","output_dir":"/out","quality":30,
            "skip_existing":false,"delete_original":true,"allow_software":true}"#;
        let settings: ConversionSettings = serde_json::from_str(valid).unwrap();
        assert_eq!(settings.quality.value(), 30);
        assert!(!settings.skip_existing);

        let invalid = valid.replace("30", "60");
        assert!(serde_json::from_str::<ConversionSettings>(&invalid).is_err());
    }
}
