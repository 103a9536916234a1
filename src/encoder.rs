//! # Encoder Selection Module
//!
//! Sceglie una sola volta per esecuzione il backend di codifica AV1.
//!
//! ## Politica di selezione:
//! 1. Se `av1_nvenc` compare nell'output di `ffmpeg -encoders` → hardware (NVENC)
//! 2. Altrimenti, se il fallback software è permesso → `libaom-av1`
//! 3. Altrimenti → `ConvertError::NoEncoderAvailable` (l'esecuzione si interrompe)

use crate::config::Quality;
use crate::error::ConvertError;
use crate::ffmpeg::EncoderTool;
use std::fmt;
use tracing::{info, warn};

pub const HARDWARE_ENCODER: &str = "av1_nvenc";
pub const SOFTWARE_ENCODER: &str = "libaom-av1";

/// Encoding backend chosen for the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderChoice {
    Hardware,
    Software,
}

impl EncoderChoice {
    /// ffmpeg codec identifier passed to `-c:v`
    pub fn codec(self) -> &'static str {
        match self {
            Self::Hardware => HARDWARE_ENCODER,
            Self::Software => SOFTWARE_ENCODER,
        }
    }

    /// Rate-control flags implied by the backend.
    ///
    /// The quality value is used unmodified on both branches even though
    /// NVENC's `-cq` scale differs from libaom's `-crf`.
    pub fn quality_args(self, quality: Quality) -> [String; 6] {
        let quality = quality.to_string();
        match self {
            Self::Hardware => [
                "-cq".into(),
                quality,
                "-b:v".into(),
                "0".into(),
                "-preset".into(),
                "p5".into(),
            ],
            Self::Software => [
                "-crf".into(),
                quality,
                "-b:v".into(),
                "0".into(),
                "-cpu-used".into(),
                "4".into(),
            ],
        }
    }
}

impl fmt::Display for EncoderChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.codec())
    }
}

/// Query the tool once and pick a backend
pub fn select_encoder<T: EncoderTool + ?Sized>(
    tool: &T,
    allow_software: bool,
) -> Result<EncoderChoice, ConvertError> {
    let encoders = tool.list_encoders()?;

    if encoders.contains(HARDWARE_ENCODER) {
        info!("Using hardware encoder: {}", HARDWARE_ENCODER);
        return Ok(EncoderChoice::Hardware);
    }

    if allow_software {
        warn!(
            "{} not available, falling back to software encoder {}",
            HARDWARE_ENCODER, SOFTWARE_ENCODER
        );
        return Ok(EncoderChoice::Software);
    }

    Err(ConvertError::NoEncoderAvailable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    struct Listing(&'static str);

    impl EncoderTool for Listing {
        fn list_encoders(&self) -> Result<String, ConvertError> {
            Ok(self.0.to_string())
        }

        fn encode(&self, _args: &[OsString]) -> Result<(), ConvertError> {
            unreachable!("selection never encodes")
        }
    }

    struct Missing;

    impl EncoderTool for Missing {
        fn list_encoders(&self) -> Result<String, ConvertError> {
            Err(ConvertError::ToolMissing("ffmpeg".to_string()))
        }

        fn encode(&self, _args: &[OsString]) -> Result<(), ConvertError> {
            unreachable!("selection never encodes")
        }
    }

    const WITH_NVENC: &str = " V....D av1_nvenc            NVIDIA NVENC av1 encoder (codec av1)\n";
    const WITHOUT_NVENC: &str = " V....D libaom-av1           libaom AV1 (codec av1)\n";

    #[test]
    fn test_hardware_preferred() {
        assert_eq!(select_encoder(&Listing(WITH_NVENC), false).unwrap(), EncoderChoice::Hardware);
        assert_eq!(select_encoder(&Listing(WITH_NVENC), true).unwrap(), EncoderChoice::Hardware);
    }

    #[test]
    fn test_software_fallback() {
        assert_eq!(select_encoder(&Listing(WITHOUT_NVENC), true).unwrap(), EncoderChoice::Software);
    }

    #[test]
    fn test_no_encoder_without_fallback() {
        assert!(matches!(
            select_encoder(&Listing(WITHOUT_NVENC), false),
            Err(ConvertError::NoEncoderAvailable)
        ));
    }

    #[test]
    fn test_tool_missing_propagates() {
        assert!(matches!(
            select_encoder(&Missing, true),
            Err(ConvertError::ToolMissing(_))
        ));
    }

    #[test]
    fn test_quality_args_are_not_rescaled() {
        let quality = Quality::new(40).unwrap();
        assert_eq!(EncoderChoice::Hardware.quality_args(quality)[..2], ["-cq", "40"]);
        assert_eq!(EncoderChoice::Software.quality_args(quality)[..2], ["-crf", "40"]);
    }
}
