//! S-57 chart access through the GDAL S-57 driver.
//!
//! # Examples
//!
//! ```no_run
//! use std::path::Path;
//! use s57tiler_core::chart::S57Chart;
//! use s57tiler_core::options::S57Options;
//!
//! let mut chart = S57Chart::open(Path::new("US5WA22M.000"), &S57Options::default())?;
//! for name in chart.layer_names() {
//!     println!("{name}");
//! }
//! # Ok::<(), s57tiler_core::error::S57Error>(())
//! ```

use std::path::{Path, PathBuf};

use gdal::vector::{Layer, LayerAccess};
use gdal::{Dataset, DatasetOptions, GdalOpenFlags};
use log::{debug, info};

use crate::error::{ChartError, IoError, Result};
use crate::options::{S57_OPTIONS_KEY, S57Options};
use crate::types::LayerInfo;

/// An opened chart.
///
/// Layers borrow from the dataset owned here and cannot outlive it.
pub struct S57Chart {
    path: PathBuf,
    dataset: Dataset,
    layer_names: Option<Vec<String>>,
}

impl S57Chart {
    /// Opens the chart at `path` with the given driver options.
    ///
    /// The options are installed as the process wide `OGR_S57_OPTIONS` configuration value
    /// before the dataset is opened.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::FileNotFound`] when `path` does not exist and [`ChartError::Open`]
    /// when GDAL cannot open it as a vector dataset.
    pub fn open(path: &Path, options: &S57Options) -> Result<Self> {
        info!("opening s57 file: {}", path.display());
        if !path.exists() {
            return Err(IoError::FileNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }

        let value = options.to_option_string();
        debug!("{S57_OPTIONS_KEY}={value}");
        gdal::config::set_config_option(S57_OPTIONS_KEY, &value).map_err(|source| {
            ChartError::DriverOption {
                key: S57_OPTIONS_KEY.to_string(),
                source,
            }
        })?;

        let dataset = Dataset::open_ex(
            path,
            DatasetOptions {
                open_flags: GdalOpenFlags::GDAL_OF_VECTOR,
                ..DatasetOptions::default()
            },
        )
        .map_err(|source| ChartError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            dataset,
            layer_names: None,
        })
    }

    /// Path the chart was opened from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of layers reported by the driver.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.dataset.layer_count()
    }

    /// Layer names in driver order.
    pub fn layer_names(&mut self) -> &[String] {
        let dataset = &self.dataset;
        self.layer_names
            .get_or_insert_with(|| dataset.layers().map(|layer| layer.name()).collect())
    }

    /// Fetches the layer at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::Layer`] when the driver cannot provide the layer.
    pub fn layer(&self, index: usize) -> Result<Layer<'_>> {
        self.dataset.layer(index).map_err(|source| {
            ChartError::Layer {
                path: self.path.clone(),
                index,
                source,
            }
            .into()
        })
    }

    /// Summary of every layer.
    #[must_use]
    pub fn layers(&self) -> Vec<LayerInfo> {
        self.dataset
            .layers()
            .map(|layer| LayerInfo {
                name: layer.name(),
                feature_count: layer.feature_count(),
                epsg: layer.spatial_ref().and_then(|sr| sr.auth_code().ok()),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::S57Error;

    #[test]
    fn test_open_missing_chart() {
        let result = S57Chart::open(Path::new("does/not/exist/US5WA22M.000"), &S57Options::default());
        assert!(matches!(
            result,
            Err(S57Error::Io(IoError::FileNotFound { .. }))
        ));
    }

    #[test]
    fn test_open_non_chart_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.000");
        std::fs::write(&path, "not an ISO 8211 file").unwrap();

        let result = S57Chart::open(&path, &S57Options::default());

        assert!(matches!(result, Err(S57Error::Chart(ChartError::Open { .. }))));
    }

    #[test]
    fn test_options_are_installed() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.000");
        std::fs::write(&path, "").unwrap();

        let _ = S57Chart::open(&path, &S57Options::default());

        assert_eq!(
            gdal::config::get_config_option(S57_OPTIONS_KEY, "").unwrap(),
            S57Options::default().to_option_string()
        );
    }
}
