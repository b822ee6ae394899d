//! Error types for engine configuration, source handling and output export

use std::fmt;
use std::path::PathBuf;

/// Main error type for all halftone operations
#[derive(Debug)]
pub enum HalftoneError {
    /// Failed to load source image from filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Source image cannot be used for sampling
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Render configuration validation failed
    ///
    /// Raised eagerly by constructors and setters so that bad values never
    /// reach the lattice or solver stages as NaN geometry.
    InvalidConfiguration {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Render was requested before any input image was attached
    SourceNotReady,

    /// Renderer name is not one of `svgpath`, `svg` or `canvas`
    UnsupportedRenderer {
        /// The unrecognized renderer name
        name: String,
    },

    /// Shape name does not match any known tiling
    UnsupportedShape {
        /// The unrecognized shape name
        name: String,
    },

    /// Failed to save rendered output to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for HalftoneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::InvalidConfiguration {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid configuration '{parameter}' = '{value}': {reason}")
            }
            Self::SourceNotReady => {
                write!(f, "No input image attached; set an input before rendering")
            }
            Self::UnsupportedRenderer { name } => {
                write!(
                    f,
                    "Unsupported renderer '{name}' (expected svgpath, svg or canvas)"
                )
            }
            Self::UnsupportedShape { name } => {
                write!(f, "Unsupported shape '{name}'")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for HalftoneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for halftone results
pub type Result<T> = std::result::Result<T, HalftoneError>;

impl From<image::ImageError> for HalftoneError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for HalftoneError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid configuration error
pub fn invalid_configuration(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> HalftoneError {
    HalftoneError::InvalidConfiguration {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an error for CLI targets that cannot be processed
pub fn target_error(path: impl Into<PathBuf>, msg: &str) -> HalftoneError {
    HalftoneError::FileSystem {
        path: path.into(),
        operation: "resolve target",
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, msg.to_string()),
    }
}
