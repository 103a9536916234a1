//! # Command Builder
//!
//! Builds the ffmpeg argument list for one encode. The program name is not
//! part of the list; `EncoderTool` supplies the binary.

use crate::config::Quality;
use crate::encoder::EncoderChoice;
use std::ffi::OsString;
use std::path::Path;

/// Ordered ffmpeg arguments for converting `input_path` into `output_path`
pub fn build_ffmpeg_args(
    input_path: &Path,
    output_path: &Path,
    encoder: EncoderChoice,
    quality: Quality,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-y", "-hide_banner", "-loglevel", "error", "-stats", "-i"]
        .into_iter()
        .map(OsString::from)
        .collect();
    args.push(input_path.into());
    args.push("-c:v".into());
    args.push(encoder.codec().into());
    args.extend(encoder.quality_args(quality).into_iter().map(OsString::from));
    args.push("-c:a".into());
    args.push("copy".into());
    args.push(output_path.into());
    args
}
