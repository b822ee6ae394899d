//! Command-line interface for batch halftoning of image files

use crate::algorithm::engine::{HalftoneEngine, Rendered};
use crate::algorithm::shapes::ShapeKind;
use crate::io::configuration::{
    DEFAULT_DISTANCE_BETWEEN, OUTPUT_SUFFIX, OutputSize, RenderConfig, Renderer,
    SUPPORTED_EXTENSIONS,
};
use crate::io::error::{Result, target_error};
use crate::io::image::{export_png, export_text, load_rgba};
use crate::io::progress::ProgressManager;
use clap::{ArgAction, Parser};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "halftile")]
#[command(
    author,
    version,
    about = "Render images as halftone tile patterns in SVG or PNG"
)]
/// Command-line arguments for the halftone tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input image (PNG or JPEG) or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Tile shape (hexagon, circle, alt-circle, square, offset-square, diamond,
    /// triangle, alt-triangle, cross, wave, rings, phyllotaxis)
    #[arg(short, long, default_value = "hexagon")]
    pub shape: String,

    /// Output renderer (svgpath, svg or canvas)
    #[arg(short, long, default_value = "svg")]
    pub renderer: String,

    /// Spacing between tile centers in output pixels
    #[arg(short, long, default_value_t = DEFAULT_DISTANCE_BETWEEN)]
    pub distance: f64,

    /// Sample the green channel directly (light areas get large tiles)
    #[arg(short, long)]
    pub inverse: bool,

    /// Cross bar length in output pixels (cross shape only)
    #[arg(short = 'c', long)]
    pub cross_bar_length: Option<f64>,

    /// Canvas output width in pixels (keeps aspect ratio if height is omitted)
    #[arg(short = 'w', long)]
    pub width: Option<u32>,

    /// Canvas output height in pixels (keeps aspect ratio if width is omitted)
    #[arg(short = 'H', long)]
    pub height: Option<u32>,

    /// Log per-phase timings
    #[arg(short, long)]
    pub benchmark: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Canvas size for a source, honouring one or both requested dimensions
    pub fn output_size(&self, source_width: u32, source_height: u32) -> Option<OutputSize> {
        let aspect = f64::from(source_height) / f64::from(source_width.max(1));
        match (self.width, self.height) {
            (Some(width), Some(height)) => Some(OutputSize { width, height }),
            (Some(width), None) => Some(OutputSize {
                width,
                height: ((f64::from(width) * aspect).round() as u32).max(1),
            }),
            (None, Some(height)) => Some(OutputSize {
                width: ((f64::from(height) / aspect).round() as u32).max(1),
                height,
            }),
            (None, None) => None,
        }
    }
}

/// Orchestrates batch processing of image files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments, returning how many were rendered
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The shape or renderer name is unknown
    /// - The target is neither a supported image nor a directory
    /// - Any file fails to load, render or export
    pub fn process(&mut self) -> Result<usize> {
        let kind: ShapeKind = self.cli.shape.parse()?;
        let renderer: Renderer = self.cli.renderer.parse()?;
        let files = self.collect_files(renderer)?;

        if files.is_empty() {
            return Ok(0);
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for file in &files {
            self.process_file(file, kind, renderer)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(files.len())
    }

    fn collect_files(&self, renderer: Renderer) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if is_supported_image(target) {
                Ok(self
                    .should_process_file(target, renderer)
                    .then(|| target.clone())
                    .into_iter()
                    .collect())
            } else {
                Err(target_error(target, "Target file must be a PNG or JPEG image"))
            }
        } else if target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target)? {
                let path = entry?.path();
                if is_supported_image(&path)
                    && !is_rendered_output(&path)
                    && self.should_process_file(&path, renderer)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(target_error(target, "Target must be an image file or directory"))
        }
    }

    fn should_process_file(&self, input_path: &Path, renderer: Renderer) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = output_path(input_path, renderer);
        if output_path.exists() {
            log::info!("Skipping: {} (output exists)", input_path.display());
            false
        } else {
            true
        }
    }

    fn process_file(&self, input_path: &Path, kind: ShapeKind, renderer: Renderer) -> Result<()> {
        let start_time = Instant::now();

        if let Some(ref pm) = self.progress_manager {
            pm.start_file(input_path);
        }

        let source = load_rgba(input_path)?;
        let output_size = if renderer.is_raster() {
            self.cli.output_size(source.width(), source.height())
        } else {
            None
        };

        let config = RenderConfig {
            distance_between: self.cli.distance,
            renderer,
            output_size,
            inverse: self.cli.inverse,
            benchmark: self.cli.benchmark,
            cross_bar_length: self.cli.cross_bar_length,
            ..RenderConfig::default()
        };

        let mut engine = HalftoneEngine::new(kind, config)?;
        engine.set_input(source)?;

        let output = output_path(input_path, renderer);
        match engine.render(false)? {
            Rendered::PathData(text) | Rendered::Document(text) => export_text(&text, &output)?,
            Rendered::Canvas(surface) => export_png(surface, &output)?,
        }
        log::debug!("wrote {}", output.display());

        if let Some(ref pm) = self.progress_manager {
            pm.complete_file(input_path, start_time.elapsed());
        }

        Ok(())
    }
}

/// Whether a path has one of the supported image extensions
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

/// Whether a path looks like a file this tool produced
pub fn is_rendered_output(path: &Path) -> bool {
    path.file_stem()
        .is_some_and(|stem| stem.to_string_lossy().ends_with(OUTPUT_SUFFIX))
}

/// Output file for an input, next to it with the renderer's extension
pub fn output_path(input_path: &Path, renderer: Renderer) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let output_name = format!(
        "{}{}.{}",
        stem.to_string_lossy(),
        OUTPUT_SUFFIX,
        renderer.file_extension()
    );

    if let Some(parent) = input_path.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}
