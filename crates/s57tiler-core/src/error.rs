//! Error types for chart export operations.
//!
//! Errors are grouped by the layer of the pipeline that produced them: opening the chart,
//! touching the filesystem, converting features, interpreting options, and running external
//! tools. [`S57Error`] is the root type returned by every fallible public function.

use std::path::PathBuf;
use thiserror::Error;

/// Root error type for `s57tiler` operations.
///
/// Display formatting is delegated to the underlying variant.
#[derive(Debug, Error)]
pub enum S57Error {
    /// Chart open and layer access errors
    #[error(transparent)]
    Chart(#[from] ChartError),

    /// I/O errors (file read/write, path issues, permissions)
    #[error(transparent)]
    Io(#[from] IoError),

    /// Feature and GeoJSON conversion errors
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// External tool errors (tippecanoe)
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// Generic errors from dependencies
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Errors raised while opening a chart or reading its layers.
#[derive(Debug, Error)]
pub enum ChartError {
    /// GDAL could not open the dataset
    #[error("Failed to open chart '{path}': {source}")]
    Open {
        /// The chart path
        path: PathBuf,
        /// The underlying GDAL error
        #[source]
        source: gdal::errors::GdalError,
    },

    /// GDAL rejected a configuration option
    #[error("Failed to set GDAL option {key}: {source}")]
    DriverOption {
        /// The option key
        key: String,
        /// The underlying GDAL error
        #[source]
        source: gdal::errors::GdalError,
    },

    /// A layer could not be fetched from the dataset
    #[error("Failed to read layer {index} of '{path}': {source}")]
    Layer {
        /// The chart path
        path: PathBuf,
        /// Index of the layer in driver order
        index: usize,
        /// The underlying GDAL error
        #[source]
        source: gdal::errors::GdalError,
    },
}

/// I/O related errors.
#[derive(Debug, Error)]
pub enum IoError {
    /// Failed to write to a file
    #[error("Failed to write {format} file '{path}': {source}")]
    Write {
        /// The format being written
        format: String,
        /// The file path
        path: PathBuf,
        /// The underlying error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Output path exists but is a regular file
    #[error("'{path}' exists and is not a directory")]
    NotADirectory {
        /// The offending path
        path: PathBuf,
    },

    /// Directory could not be created
    #[error("Failed to create directory '{path}': {source}")]
    CreateDir {
        /// The directory path
        path: PathBuf,
        /// The underlying error
        #[source]
        source: std::io::Error,
    },

    /// The working directory could not be determined
    #[error("Unable to resolve the current working directory: {source}")]
    WorkingDir {
        /// The underlying error
        #[source]
        source: std::io::Error,
    },

    /// File was not found
    #[error("File not found: '{path}'")]
    FileNotFound {
        /// The missing file path
        path: PathBuf,
    },
}

/// Feature conversion errors.
#[derive(Debug, Error)]
pub enum FormatError {
    /// GDAL failed to serialize or transform a geometry
    #[error("Invalid geometry in layer {layer}: {message}")]
    InvalidGeometry {
        /// The layer name
        layer: String,
        /// Description of the geometry problem
        message: String,
    },

    /// A GeoJSON document could not be produced
    #[error("Failed to encode GeoJSON for layer {layer}: {source}")]
    Encode {
        /// The layer name
        layer: String,
        /// The underlying serializer error
        #[source]
        source: serde_json::Error,
    },

    /// The target spatial reference could not be built
    #[error("Failed to build spatial reference EPSG:{epsg}: {source}")]
    SpatialRef {
        /// The EPSG code
        epsg: u32,
        /// The underlying GDAL error
        #[source]
        source: gdal::errors::GdalError,
    },

    /// Coordinates could not be projected between two reference systems
    #[error("Failed to transform coordinates from EPSG:{from} to EPSG:{to}: {source}")]
    Transform {
        /// Source EPSG code
        from: u32,
        /// Target EPSG code
        to: u32,
        /// The underlying GDAL error
        #[source]
        source: gdal::errors::GdalError,
    },
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid option value
    #[error("Invalid {option} option: {message}")]
    InvalidOption {
        /// The option name
        option: String,
        /// Why it's invalid
        message: String,
    },
}

/// Errors from external programs.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The program could not be started
    #[error("Failed to execute {program}: {source}")]
    Spawn {
        /// The program name
        program: String,
        /// The underlying error
        #[source]
        source: std::io::Error,
    },

    /// The program ran but reported failure
    #[error("{program} exited with {status}")]
    Failed {
        /// The program name
        program: String,
        /// Exit status description
        status: String,
    },
}

/// Type alias for Results using `S57Error`.
pub type Result<T> = std::result::Result<T, S57Error>;

impl S57Error {
    /// Get a user-friendly error message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Chart(e) => e.user_message(),
            Self::Io(e) => e.user_message(),
            Self::Format(e) => e.to_string(),
            Self::Config(e) => format!("Configuration error: {e}"),
            Self::Tool(e) => e.to_string(),
            Self::Other(e) => format!("Error: {e}"),
        }
    }

    /// Get recovery suggestions if available.
    #[must_use]
    pub fn recovery_suggestion(&self) -> Option<String> {
        match self {
            Self::Chart(e) => e.recovery_suggestion(),
            Self::Io(e) => e.recovery_suggestion(),
            Self::Tool(e) => e.recovery_suggestion(),
            _ => None,
        }
    }
}

impl ChartError {
    fn user_message(&self) -> String {
        match self {
            Self::Open { path, .. } => format!("Could not open chart {}", path.display()),
            Self::DriverOption { .. } | Self::Layer { .. } => self.to_string(),
        }
    }

    fn recovery_suggestion(&self) -> Option<String> {
        match self {
            Self::Open { .. } => Some(
                "Make sure the file is an S-57 base cell (usually ending in .000) and that GDAL was built with the S57 driver."
                    .to_string(),
            ),
            _ => None,
        }
    }
}

impl IoError {
    fn user_message(&self) -> String {
        match self {
            Self::Write { format, path, .. } => {
                format!("Failed to write {} file: {}", format, path.display())
            },
            Self::FileNotFound { path } => {
                format!("File not found: {}", path.display())
            },
            _ => self.to_string(),
        }
    }

    fn recovery_suggestion(&self) -> Option<String> {
        match self {
            Self::FileNotFound { .. } => {
                Some("Check that the file path is correct and the file exists.".to_string())
            },
            Self::NotADirectory { .. } => {
                Some("Choose a different output directory or remove the file.".to_string())
            },
            Self::CreateDir { .. } => {
                Some("Check file permissions and ensure you have access.".to_string())
            },
            _ => None,
        }
    }
}

impl ToolError {
    fn recovery_suggestion(&self) -> Option<String> {
        match self {
            Self::Spawn { program, .. } => Some(format!("Install {program} and make sure it is on the PATH.")),
            Self::Failed { .. } => None,
        }
    }
}

/// Extension trait for adding I/O context to errors.
pub trait IoErrorExt<T> {
    /// Add write context to an error.
    ///
    /// # Errors
    ///
    /// Returns an [`IoError::Write`] if the underlying operation fails.
    fn with_write_context(self, format: &str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T, E> IoErrorExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_write_context(self, format: &str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| {
            S57Error::Io(IoError::Write {
                format: format.to_string(),
                path: path.into(),
                source: Box::new(e),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_a_directory_message() {
        let err = S57Error::from(IoError::NotADirectory {
            path: PathBuf::from("/tmp/chart.json"),
        });
        assert_eq!(err.to_string(), "'/tmp/chart.json' exists and is not a directory");
        assert!(err.recovery_suggestion().is_some());
    }

    #[test]
    fn test_file_not_found_user_message() {
        let err = S57Error::from(IoError::FileNotFound {
            path: PathBuf::from("US5WA22M.000"),
        });
        assert_eq!(err.user_message(), "File not found: US5WA22M.000");
    }

    #[test]
    fn test_write_context() {
        let result: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::other("disk full"));
        let err = result
            .with_write_context("GeoJSON", "out/SOUNDG.json")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to write GeoJSON file 'out/SOUNDG.json': disk full"
        );
    }

    #[test]
    fn test_tool_spawn_suggestion() {
        let err = S57Error::from(ToolError::Spawn {
            program: "tippecanoe".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        });
        assert_eq!(
            err.recovery_suggestion().as_deref(),
            Some("Install tippecanoe and make sure it is on the PATH.")
        );
    }

    #[test]
    fn test_config_user_message() {
        let err = S57Error::from(ConfigError::InvalidOption {
            option: "UPDATES".to_string(),
            message: "expected ON or OFF, found MAYBE".to_string(),
        });
        assert_eq!(
            err.user_message(),
            "Configuration error: Invalid UPDATES option: expected ON or OFF, found MAYBE"
        );
    }
}
