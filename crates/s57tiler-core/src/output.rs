//! Output directory handling.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::{IoError, IoErrorExt, Result};

/// Resolves `out_dir` and makes sure it is a usable directory.
///
/// Relative paths are resolved against the current working directory. A missing directory is
/// created along with its parents.
///
/// # Errors
///
/// Returns [`IoError::NotADirectory`] when the path exists but is not a directory,
/// [`IoError::CreateDir`] when it cannot be created and [`IoError::WorkingDir`] when a
/// relative path cannot be resolved.
pub fn prepare_output_dir(out_dir: &Path) -> Result<PathBuf> {
    let path = if out_dir.is_absolute() {
        out_dir.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|source| IoError::WorkingDir { source })?
            .join(out_dir)
    };

    if path.exists() && !path.is_dir() {
        return Err(IoError::NotADirectory { path }.into());
    }

    if !path.exists() {
        info!("creating output directory: {}", path.display());
        fs::create_dir_all(&path).map_err(|source| IoError::CreateDir {
            path: path.clone(),
            source,
        })?;
    }

    info!("output directory is set to {}", path.display());
    Ok(path)
}

/// Writes `contents` to `out_dir/file_name`, replacing any existing file.
///
/// # Errors
///
/// Returns [`IoError::Write`] if the file cannot be removed or written.
pub fn write_json(out_dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf> {
    let path = out_dir.join(file_name);
    debug!("writing to - {}", path.display());
    if path.exists() {
        fs::remove_file(&path).with_write_context("JSON", &path)?;
    }
    fs::write(&path, contents).with_write_context("JSON", &path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::S57Error;
    use tempfile::TempDir;

    #[test]
    fn test_creates_missing_nested_directory() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("charts").join("US5WA22M");

        let resolved = prepare_output_dir(&target).unwrap();

        assert_eq!(resolved, target);
        assert!(target.is_dir());
    }

    #[test]
    fn test_existing_directory_is_kept() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("keep.txt"), "x").unwrap();

        let resolved = prepare_output_dir(temp_dir.path()).unwrap();

        assert_eq!(resolved, temp_dir.path());
        assert!(temp_dir.path().join("keep.txt").exists());
    }

    #[test]
    fn test_existing_file_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("out");
        std::fs::write(&file, "not a dir").unwrap();

        let err = prepare_output_dir(&file).unwrap_err();

        assert!(matches!(err, S57Error::Io(IoError::NotADirectory { .. })));
    }

    #[test]
    fn test_relative_path_resolves_against_cwd() {
        let cwd = std::env::current_dir().unwrap();
        let temp_dir = TempDir::new_in(&cwd).unwrap();
        let relative = temp_dir
            .path()
            .strip_prefix(&cwd)
            .unwrap()
            .join("US5WA22M");

        let resolved = prepare_output_dir(&relative).unwrap();

        assert!(relative.is_relative());
        assert!(resolved.is_absolute());
        assert_eq!(resolved, cwd.join(&relative));
        assert!(resolved.is_dir());
    }

    #[test]
    fn test_write_json_replaces_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        write_json(temp_dir.path(), "meta.json", "{\"layers\":[]}").unwrap();

        let path = write_json(temp_dir.path(), "meta.json", "{}").unwrap();

        assert_eq!(std::fs::read_to_string(path).unwrap(), "{}");
    }
}
