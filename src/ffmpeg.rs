//! # FFmpeg Invocation Module
//!
//! Unico punto di contatto con il processo esterno `ffmpeg`.
//!
//! ## Responsabilità:
//! - Interrogare ffmpeg per l'elenco degli encoder disponibili (`-encoders`)
//! - Eseguire in modo sincrono un comando di codifica e verificarne l'exit code
//! - Tradurre un binario assente in `ConvertError::ToolMissing`
//!
//! Il trait `EncoderTool` permette ai test di sostituire ffmpeg con uno stub
//! che registra le invocazioni senza avviare alcun processo.

use crate::error::ConvertError;
use crate::tool_resolver::ToolPathResolver;
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::process::Command;
use std::time::Instant;
use tracing::debug;

/// Number of trailing stderr lines kept in a failure message
const STDERR_TAIL_LINES: usize = 5;

/// External encoding tool
pub trait EncoderTool {
    /// Raw standard output of the encoder listing
    fn list_encoders(&self) -> Result<String, ConvertError>;

    /// Run one encode with the given arguments; non-zero exit is an error
    fn encode(&self, args: &[OsString]) -> Result<(), ConvertError>;
}

/// The real ffmpeg binary
pub struct Ffmpeg {
    program: PathBuf,
}

impl Ffmpeg {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Locate ffmpeg through `FFMPEG_PATH` or the system PATH
    pub fn locate() -> Self {
        Self::new(ToolPathResolver::new().resolve_tool("ffmpeg"))
    }

    fn spawn_error(&self, error: io::Error) -> ConvertError {
        if error.kind() == io::ErrorKind::NotFound {
            ConvertError::ToolMissing(self.program.display().to_string())
        } else {
            ConvertError::Io(error)
        }
    }
}

impl EncoderTool for Ffmpeg {
    fn list_encoders(&self) -> Result<String, ConvertError> {
        let output = Command::new(&self.program)
            .args(["-hide_banner", "-encoders"])
            .output()
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            return Err(ConvertError::FFmpeg(format!(
                "encoder listing exited with {}: {}",
                output.status,
                stderr_tail(&output.stderr)
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn encode(&self, args: &[OsString]) -> Result<(), ConvertError> {
        debug!("Running {} with {} arguments", self.program.display(), args.len());
        let start_time = Instant::now();

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|e| self.spawn_error(e))?;

        debug!("ffmpeg finished in {:.1}s", start_time.elapsed().as_secs_f64());

        if !output.status.success() {
            let tail = stderr_tail(&output.stderr);
            let message = if tail.is_empty() {
                format!("ffmpeg exited with {}", output.status)
            } else {
                format!("ffmpeg exited with {}: {}", output.status, tail)
            };
            return Err(ConvertError::FFmpeg(message));
        }

        Ok(())
    }
}

/// Last diagnostic lines of ffmpeg's stderr, without `-stats` progress lines
fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("frame="))
        .collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stderr_tail_drops_stats_lines() {
        let stderr = b"frame=  10 fps=0.0 q=0.0\rframe=  20 fps=0.0\r\ninput.mp4: Invalid data found when processing input\n";
        assert_eq!(
            stderr_tail(stderr),
            "input.mp4: Invalid data found when processing input"
        );
    }

    #[test]
    fn test_stderr_tail_keeps_last_lines() {
        let stderr = b"l1\nl2\nl3\nl4\nl5\nl6\nl7\n";
        assert_eq!(stderr_tail(stderr), "l3 | l4 | l5 | l6 | l7");
        assert_eq!(stderr_tail(b""), "");
    }

    #[test]
    fn test_missing_binary_is_tool_missing() {
        let ffmpeg = Ffmpeg::new("/nonexistent/dir/ffmpeg-does-not-exist");
        assert!(matches!(
            ffmpeg.list_encoders(),
            Err(ConvertError::ToolMissing(_))
        ));
        assert!(matches!(
            ffmpeg.encode(&[]),
            Err(ConvertError::ToolMissing(_))
        ));
    }
}
