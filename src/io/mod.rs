//! Input/output, configuration and error handling

/// Command-line interface and batch file processing
pub mod cli;
/// Engine constants and render configuration
pub mod configuration;
/// Error types and constructors
pub mod error;
/// Source frames, decoding and output export
pub mod image;
/// Global logger setup
pub mod logging;
/// Batch progress display
pub mod progress;
