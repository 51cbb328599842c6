//! MBTiles generation with tippecanoe.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use tokio::process::Command;

use crate::error::{IoErrorExt, Result, ToolError};

/// Program used to cut vector tiles.
pub const TIPPECANOE: &str = "tippecanoe";

/// File name of the generated tile set.
pub const MBTILES_FILE: &str = "chart.mbtiles";

/// Arguments passed to tippecanoe for a set of GeoJSON layers.
#[must_use]
pub fn tippecanoe_args(output: &Path, geojson_files: &[PathBuf]) -> Vec<String> {
    let mut args = vec![
        "-zg".to_string(),
        "-o".to_string(),
        output.display().to_string(),
        "--coalesce-densest-as-needed".to_string(),
        "--extend-zooms-if-still-dropping".to_string(),
    ];
    args.extend(geojson_files.iter().map(|f| f.display().to_string()));
    args
}

/// Builds `out_dir/chart.mbtiles` from the given GeoJSON files.
///
/// An existing tile set is replaced.
///
/// # Errors
///
/// Returns [`ToolError::Spawn`] when tippecanoe cannot be started, [`ToolError::Failed`] when
/// it exits unsuccessfully, and an I/O error if the previous tile set cannot be removed.
pub async fn generate_mbtiles(out_dir: &Path, geojson_files: &[PathBuf]) -> Result<PathBuf> {
    let output = out_dir.join(MBTILES_FILE);
    if output.exists() {
        tokio::fs::remove_file(&output)
            .await
            .with_write_context("MBTiles", &output)?;
    }
    run_tiler(TIPPECANOE, &output, geojson_files).await?;
    Ok(output)
}

/// Runs `program` with tippecanoe arguments, logging whatever it prints.
pub(crate) async fn run_tiler(
    program: &str,
    output: &Path,
    geojson_files: &[PathBuf],
) -> Result<()> {
    let args = tippecanoe_args(output, geojson_files);
    info!("running {program} on {} file(s)", geojson_files.len());
    debug!("{program} {}", args.join(" "));

    let result = Command::new(program)
        .args(&args)
        .output()
        .await
        .map_err(|source| ToolError::Spawn {
            program: program.to_string(),
            source,
        })?;

    let stdout = String::from_utf8_lossy(&result.stdout);
    let stderr = String::from_utf8_lossy(&result.stderr);
    if !stdout.trim().is_empty() {
        info!("{}", stdout.trim_end());
    }
    if !stderr.trim().is_empty() {
        warn!("{}", stderr.trim_end());
    }

    if !result.status.success() {
        return Err(ToolError::Failed {
            program: program.to_string(),
            status: result.status.to_string(),
        }
        .into());
    }
    info!("wrote {}", output.display());
    Ok(())
}

/// Deletes intermediate GeoJSON files.
///
/// # Errors
///
/// Returns an I/O error for the first file that cannot be removed.
pub async fn remove_geojson(files: &[PathBuf]) -> Result<()> {
    for file in files {
        debug!("removing {}", file.display());
        tokio::fs::remove_file(file)
            .await
            .with_write_context("GeoJSON", file)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::S57Error;
    use tempfile::TempDir;

    #[test]
    fn test_tippecanoe_args() {
        let args = tippecanoe_args(
            Path::new("/out/chart.mbtiles"),
            &[
                PathBuf::from("/out/DEPARE.json"),
                PathBuf::from("/out/SOUNDG.json"),
            ],
        );
        assert_eq!(
            args,
            vec![
                "-zg",
                "-o",
                "/out/chart.mbtiles",
                "--coalesce-densest-as-needed",
                "--extend-zooms-if-still-dropping",
                "/out/DEPARE.json",
                "/out/SOUNDG.json",
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_program_is_a_spawn_error() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join(MBTILES_FILE);

        let err = run_tiler("s57tiler-no-such-tiler", &output, &[])
            .await
            .unwrap_err();

        match err {
            S57Error::Tool(ToolError::Spawn { program, .. }) => {
                assert_eq!(program, "s57tiler-no-such-tiler");
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_program_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join(MBTILES_FILE);

        let err = run_tiler("false", &output, &[temp_dir.path().join("SOUNDG.json")])
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            S57Error::Tool(ToolError::Failed { ref program, .. }) if program == "false"
        ));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_remove_geojson() {
        let temp_dir = TempDir::new().unwrap();
        let files = vec![
            temp_dir.path().join("LIGHTS.json"),
            temp_dir.path().join("SOUNDG.json"),
        ];
        for file in &files {
            std::fs::write(file, "{}").unwrap();
        }

        remove_geojson(&files).await.unwrap();

        assert!(files.iter().all(|f| !f.exists()));
    }

    #[tokio::test]
    async fn test_remove_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let result = remove_geojson(&[temp_dir.path().join("missing.json")]).await;
        assert!(result.is_err());
    }
}
