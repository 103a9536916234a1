//! # Tool Path Resolver
//!
//! Finds the ffmpeg binary:
//! - `FFMPEG_PATH` environment variable (direct override)
//! - System PATH
//!
//! When nothing is found the bare command name is returned, so spawning it
//! fails with `NotFound` and is reported as a missing tool.

use std::env;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Environment variable overriding the ffmpeg location
pub const FFMPEG_PATH_ENV: &str = "FFMPEG_PATH";

/// Tool path resolver for ffmpeg
pub struct ToolPathResolver {
    override_path: Option<PathBuf>,
    search_path: Option<std::ffi::OsString>,
}

impl ToolPathResolver {
    /// Create a resolver from the current process environment
    pub fn new() -> Self {
        Self {
            override_path: env::var_os(FFMPEG_PATH_ENV).map(PathBuf::from),
            search_path: env::var_os("PATH"),
        }
    }

    /// Resolve the path to a specific tool
    pub fn resolve_tool(&self, tool_name: &str) -> PathBuf {
        debug!("Resolving tool: {}", tool_name);

        if let Some(ref path) = self.override_path {
            if path.is_file() {
                debug!("Using {} override: {} -> {:?}", FFMPEG_PATH_ENV, tool_name, path);
                return path.clone();
            }
            warn!("{} points to a missing file: {}", FFMPEG_PATH_ENV, path.display());
        }

        if let Some(system_path) = self.find_in_system_path(tool_name) {
            debug!("Using system tool: {} -> {:?}", tool_name, system_path);
            return system_path;
        }

        warn!("Tool not found in PATH: {}", tool_name);
        PathBuf::from(tool_name)
    }

    /// Find tool in system PATH
    fn find_in_system_path(&self, tool_name: &str) -> Option<PathBuf> {
        let extension = if cfg!(windows) { ".exe" } else { "" };
        let tool_with_ext = format!("{}{}", tool_name, extension);

        env::split_paths(self.search_path.as_ref()?)
            .map(|dir| dir.join(&tool_with_ext))
            .find(|path| path.is_file())
    }
}

impl Default for ToolPathResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn fake_tool(dir: &Path, name: &str) -> PathBuf {
        let extension = if cfg!(windows) { ".exe" } else { "" };
        let path = dir.join(format!("{}{}", name, extension));
        std::fs::write(&path, b"").unwrap();
        path
    }

    #[test]
    fn test_override_takes_precedence() {
        let temp_dir = TempDir::new().unwrap();
        let custom = fake_tool(temp_dir.path(), "my-ffmpeg");
        let resolver = ToolPathResolver {
            override_path: Some(custom.clone()),
            search_path: None,
        };
        assert_eq!(resolver.resolve_tool("ffmpeg"), custom);
    }

    #[test]
    fn test_found_in_search_path() {
        let temp_dir = TempDir::new().unwrap();
        let expected = fake_tool(temp_dir.path(), "ffmpeg");
        let resolver = ToolPathResolver {
            override_path: Some(temp_dir.path().join("missing")),
            search_path: Some(env::join_paths([temp_dir.path()]).unwrap()),
        };
        assert_eq!(resolver.resolve_tool("ffmpeg"), expected);
    }

    #[test]
    fn test_falls_back_to_bare_name() {
        let temp_dir = TempDir::new().unwrap();
        let resolver = ToolPathResolver {
            override_path: None,
            search_path: Some(env::join_paths([temp_dir.path()]).unwrap()),
        };
        assert_eq!(resolver.resolve_tool("ffmpeg"), PathBuf::from("ffmpeg"));
    }
}
