//! # File Management Module
//!
//! Questo modulo gestisce le operazioni sui file e la discovery dei video.
//!
//! ## Responsabilità:
//! - Discovery ricorsiva dei file MP4 in una directory, in ordine deterministico
//! - Verifica che la directory di output esista e sia scrivibile
//! - Controllo preventivo dello spazio libero sul disco di destinazione
//! - Formattazione human-readable delle dimensioni
//!
//! ## Ordinamento:
//! I file vengono ordinati per path, così log e test sono riproducibili
//! indipendentemente dall'ordine restituito dal filesystem.

use crate::error::ConvertError;
use std::ffi::OsStr;
use std::io;
use std::path::{Component, Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::fs;
use tracing::debug;
use walkdir::WalkDir;

/// Extension of the files picked up for conversion
pub const INPUT_EXTENSION: &str = "mp4";

/// Free-space query for the filesystem holding a directory
pub trait DiskSpace {
    fn available_space(&self, dir: &Path) -> io::Result<u64>;
}

/// Free space as reported by the operating system
pub struct SystemDiskSpace;

impl DiskSpace for SystemDiskSpace {
    fn available_space(&self, dir: &Path) -> io::Result<u64> {
        fs2::available_space(dir)
    }
}

/// Manages file operations and discovery
pub struct FileManager;

impl FileManager {
    /// Find all input videos below `input_dir`, sorted by path
    pub fn find_video_files(input_dir: &Path) -> Result<Vec<PathBuf>, ConvertError> {
        if !input_dir.is_dir() {
            return Err(ConvertError::InputDirMissing(input_dir.to_path_buf()));
        }

        let mut files: Vec<PathBuf> = WalkDir::new(input_dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|path| Self::is_input_video(path))
            .collect();

        files.sort();
        debug!("Found {} input videos in {}", files.len(), input_dir.display());
        Ok(files)
    }

    /// Check if a file has the input extension (case-sensitive, `CLIP.MP4` is ignored)
    pub fn is_input_video(path: &Path) -> bool {
        path.extension() == Some(OsStr::new(INPUT_EXTENSION))
    }

    /// Absolute form of a CLI path with `.` and `..` removed.
    ///
    /// Existing paths are canonicalized (symlinks resolved); paths that do not
    /// exist yet are normalized lexically against the current directory.
    pub fn resolve_path(path: &Path) -> io::Result<PathBuf> {
        if let Ok(canonical) = path.canonicalize() {
            return Ok(canonical);
        }

        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };

        let mut normalized = PathBuf::new();
        for component in absolute.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    normalized.pop();
                }
                other => normalized.push(other.as_os_str()),
            }
        }
        Ok(normalized)
    }

    /// Create the output directory and check that files can be written into it
    pub async fn ensure_output_directory(output_dir: &Path) -> Result<(), ConvertError> {
        fs::create_dir_all(output_dir)
            .await
            .map_err(|_| ConvertError::OutputNotWritable(output_dir.to_path_buf()))?;

        // Temporary file is removed when dropped
        NamedTempFile::new_in(output_dir)
            .map_err(|_| ConvertError::OutputNotWritable(output_dir.to_path_buf()))?;

        Ok(())
    }

    /// Fail if the filesystem holding `target_dir` has less than `required_bytes` free
    pub fn ensure_disk_capacity(
        space: &dyn DiskSpace,
        target_dir: &Path,
        required_bytes: u64,
    ) -> Result<(), ConvertError> {
        let available = space.available_space(target_dir)?;
        if available < required_bytes {
            return Err(ConvertError::InsufficientSpace {
                required: required_bytes,
                available,
            });
        }
        Ok(())
    }

    /// Get human-readable file size
    pub fn format_size(size: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", size as u64, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"0").unwrap();
    }

    #[test]
    fn test_find_video_files_recursive_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(&root.join("b.mp4"));
        touch(&root.join("a.mp4"));
        touch(&root.join("nested/deep/c.mp4"));
        touch(&root.join("nested/CLIP.MP4"));
        touch(&root.join("upper.Mp4"));
        touch(&root.join("notes.txt"));
        touch(&root.join("movie.mkv"));
        std::fs::create_dir_all(root.join("dir.mp4")).unwrap();

        let files = FileManager::find_video_files(root).unwrap();
        assert_eq!(
            files,
            vec![
                root.join("a.mp4"),
                root.join("b.mp4"),
                root.join("nested/deep/c.mp4"),
            ]
        );
    }

    #[test]
    fn test_find_video_files_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");
        assert!(matches!(
            FileManager::find_video_files(&missing),
            Err(ConvertError::InputDirMissing(p)) if p == missing
        ));
    }

    #[tokio::test]
    async fn test_ensure_output_directory_creates_nested() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("out/nested");
        FileManager::ensure_output_directory(&output).await.unwrap();
        assert!(output.is_dir());
        assert_eq!(std::fs::read_dir(&output).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_ensure_output_directory_rejects_file() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("file");
        std::fs::write(&output, b"x").unwrap();
        assert!(matches!(
            FileManager::ensure_output_directory(&output).await,
            Err(ConvertError::OutputNotWritable(_))
        ));
    }

    #[test]
    fn test_disk_capacity() {
        let temp_dir = TempDir::new().unwrap();
        assert!(FileManager::ensure_disk_capacity(&SystemDiskSpace, temp_dir.path(), 1024).is_ok());
        assert!(matches!(
            FileManager::ensure_disk_capacity(&SystemDiskSpace, temp_dir.path(), u64::MAX),
            Err(ConvertError::InsufficientSpace { required: u64::MAX, .. })
        ));
    }

    #[test]
    fn test_is_input_video_is_case_sensitive() {
        assert!(FileManager::is_input_video(Path::new("/in/a.mp4")));
        assert!(!FileManager::is_input_video(Path::new("/in/CLIP.MP4")));
        assert!(!FileManager::is_input_video(Path::new("/in/a.mp4.part")));
        assert!(!FileManager::is_input_video(Path::new("/in/mp4")));
    }

    #[test]
    fn test_resolve_path_removes_parent_components() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().canonicalize().unwrap();
        std::fs::create_dir_all(base.join("in")).unwrap();

        let existing = FileManager::resolve_path(&base.join("in/../in/./")).unwrap();
        assert_eq!(existing, base.join("in"));

        let missing = FileManager::resolve_path(&base.join("in/../out/./new")).unwrap();
        assert_eq!(missing, base.join("out/new"));
    }

    #[test]
    fn test_resolve_path_relative_is_absolute() {
        let resolved = FileManager::resolve_path(Path::new("does-not-exist/../x")).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("x"));
        assert!(!resolved.components().any(|c| c == Component::ParentDir));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(FileManager::format_size(512), "512 B");
        assert_eq!(FileManager::format_size(1536), "1.50 KB");
        assert_eq!(FileManager::format_size(5 * 1024 * 1024), "5.00 MB");
    }
}
