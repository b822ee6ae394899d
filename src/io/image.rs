//! Source frames, image loading and output export

use crate::io::error::{HalftoneError, Result};
use image::{DynamicImage, RgbaImage};
use std::path::Path;

/// Anything that can hand the engine its current frame
///
/// Still images always return the same frame. Live sources may return a new
/// frame on every call; the engine only asks for one when initialising or
/// when a render is requested with `refresh_image`.
pub trait FrameSource {
    /// Frame size in pixels `(width, height)`
    fn dimensions(&self) -> (u32, u32);

    /// Snapshot of the current frame
    fn frame(&self) -> RgbaImage;
}

impl FrameSource for RgbaImage {
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn frame(&self) -> RgbaImage {
        self.clone()
    }
}

impl FrameSource for DynamicImage {
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn frame(&self) -> RgbaImage {
        self.to_rgba8()
    }
}

/// Decode an image file into RGBA pixels
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_rgba<P: AsRef<Path>>(path: P) -> Result<RgbaImage> {
    let path_buf = path.as_ref().to_path_buf();
    let img = image::open(&path_buf).map_err(|e| HalftoneError::ImageLoad {
        path: path_buf,
        source: e,
    })?;
    Ok(img.to_rgba8())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| HalftoneError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }
    Ok(())
}

/// Save a rendered surface as PNG, creating parent directories
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn export_png<P: AsRef<Path>>(surface: &RgbaImage, output_path: P) -> Result<()> {
    let path = output_path.as_ref();
    ensure_parent(path)?;
    surface.save(path).map_err(|e| HalftoneError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write SVG or path text output, creating parent directories
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written
pub fn export_text<P: AsRef<Path>>(contents: &str, output_path: P) -> Result<()> {
    let path = output_path.as_ref();
    ensure_parent(path)?;
    std::fs::write(path, contents).map_err(|e| HalftoneError::FileSystem {
        path: path.to_path_buf(),
        operation: "write output",
        source: e,
    })
}
