//! Halftone engine lifecycle: attach, downsample, lattice, sample, solve, emit

use crate::algorithm::benchmark::{BenchmarkLog, Span};
use crate::algorithm::sampler::{Assignment, accumulate};
use crate::algorithm::shapes::{Shape, ShapeKind};
use crate::emit::canvas::{RasterCanvas, draw_tiles};
use crate::emit::geometry::{OrientationTracker, Tile};
use crate::emit::svg;
use crate::io::configuration::{OutputSize, RenderConfig, Renderer};
use crate::io::error::{HalftoneError, Result};
use crate::io::image::{FrameSource, load_rgba};
use crate::spatial::index::SpatialIndex;
use crate::spatial::lattice::Seed;
use crate::spatial::raster::{WorkingRaster, working_dimensions};
use image::RgbaImage;
use std::path::Path;
use std::time::Instant;

/// Engine lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Configuration accepted, no input attached yet
    Configured,
    /// Input attached and lattice built
    Ready,
    /// A render is in progress
    Rendering,
}

/// Output of one render call
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered<'a> {
    /// SVG path data for the `svgpath` renderer
    PathData(String),
    /// Complete SVG document for the `svg` renderer
    Document(String),
    /// Filled raster surface for the `canvas` renderer
    Canvas(&'a RgbaImage),
}

/// Lattice-derived state rebuilt by every init
struct Prepared {
    raster: WorkingRaster,
    seeds: Vec<Seed>,
    assignment: Assignment,
}

/// Converts an attached image into a halftone tile pattern
///
/// Changing the input or the tile spacing rebuilds the lattice from scratch;
/// every other option takes effect on the next render.
pub struct HalftoneEngine {
    shape: Shape,
    config: RenderConfig,
    source: Option<Box<dyn FrameSource>>,
    source_size: (u32, u32),
    prepared: Option<Prepared>,
    canvas: Option<RasterCanvas>,
    tiles: Vec<Tile>,
    benchmark: BenchmarkLog,
    state: EngineState,
}

impl HalftoneEngine {
    /// Create an engine for a shape with a validated configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid for the shape
    pub fn new(kind: ShapeKind, config: RenderConfig) -> Result<Self> {
        let shape = Shape::new(kind, &config)?;
        let benchmark = BenchmarkLog::new(config.benchmark);
        log::debug!(
            "configured {kind} engine, distance {} via {}",
            config.distance_between,
            config.renderer
        );
        Ok(Self {
            shape,
            config,
            source: None,
            source_size: (0, 0),
            prepared: None,
            canvas: None,
            tiles: Vec::new(),
            benchmark,
            state: EngineState::Configured,
        })
    }

    /// Create an engine from shape and renderer names
    ///
    /// # Errors
    ///
    /// Returns an error if either name is unknown or the configuration is invalid
    pub fn from_names(shape: &str, renderer: &str, config: RenderConfig) -> Result<Self> {
        let kind: ShapeKind = shape.parse()?;
        let renderer: Renderer = renderer.parse()?;
        Self::new(kind, RenderConfig { renderer, ..config })
    }

    /// Attach a new input and rebuild all lattice state
    ///
    /// # Errors
    ///
    /// Returns an error if the source has a zero dimension
    pub fn set_input(&mut self, source: impl FrameSource + 'static) -> Result<()> {
        self.source = Some(Box::new(source));
        self.prepared = None;
        self.state = EngineState::Configured;
        let result = self.init();
        if result.is_err() {
            self.source = None;
        }
        result
    }

    /// Decode an image file and attach it as input
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be decoded or has a zero dimension
    pub fn load_image<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let image = load_rgba(path.as_ref())?;
        log::debug!(
            "loaded {} ({}x{})",
            path.as_ref().display(),
            image.width(),
            image.height()
        );
        self.set_input(image)
    }

    /// Whether an input is attached and the lattice is built
    pub const fn is_source_ready(&self) -> bool {
        self.prepared.is_some()
    }

    /// Change the tile spacing, rebuilding the lattice when an input is attached
    ///
    /// # Errors
    ///
    /// Returns an error if the new spacing is invalid; the engine keeps its
    /// previous configuration in that case
    pub fn set_distance_between(&mut self, distance_between: f64) -> Result<()> {
        let previous = self.config.clone();
        self.reconfigure(RenderConfig {
            distance_between,
            ..previous.clone()
        })?;
        if self.source.is_none() {
            return Ok(());
        }
        if let Err(error) = self.init() {
            self.reconfigure(previous)?;
            self.init()?;
            return Err(error);
        }
        Ok(())
    }

    /// Change the cross bar length used by the cross shape
    ///
    /// # Errors
    ///
    /// Returns an error if the length is outside the valid range
    pub fn set_cross_bar_length(&mut self, cross_bar_length: Option<f64>) -> Result<()> {
        self.reconfigure(RenderConfig {
            cross_bar_length,
            ..self.config.clone()
        })
    }

    /// Switch between inverted and direct green-channel sampling
    pub const fn set_inverse(&mut self, inverse: bool) {
        self.config.inverse = inverse;
    }

    /// Enable or disable phase timing
    pub const fn set_benchmark(&mut self, benchmark: bool) {
        self.config.benchmark = benchmark;
        self.benchmark.set_enabled(benchmark);
    }

    /// Change the output backend and, for the canvas, its surface size
    ///
    /// # Errors
    ///
    /// Returns an error if the combination of renderer and size is invalid
    pub fn set_renderer(
        &mut self,
        renderer: Renderer,
        output_size: Option<OutputSize>,
    ) -> Result<()> {
        self.reconfigure(RenderConfig {
            renderer,
            output_size,
            ..self.config.clone()
        })?;
        self.size_canvas();
        Ok(())
    }

    fn reconfigure(&mut self, config: RenderConfig) -> Result<()> {
        self.shape = Shape::new(self.shape.kind(), &config)?;
        self.config = config;
        Ok(())
    }

    fn init(&mut self) -> Result<()> {
        let Some(source) = self.source.as_ref() else {
            return Err(HalftoneError::SourceNotReady);
        };
        let start = Instant::now();

        let (width, height) = source.dimensions();
        let (working_width, working_height) =
            working_dimensions(width, height, self.config.scale())?;
        let raster = WorkingRaster::from_frame(&source.frame(), working_width, working_height);

        let seeds = self
            .shape
            .generate_lattice(f64::from(working_width), f64::from(working_height))?;
        let index = SpatialIndex::from_seeds(&seeds);
        let assignment = Assignment::build(raster.width(), raster.height(), &seeds, &index);

        log::debug!(
            "init: source {width}x{height}, working {working_width}x{working_height}, {} seeds",
            seeds.len()
        );

        self.source_size = (width, height);
        self.prepared = Some(Prepared {
            raster,
            seeds,
            assignment,
        });
        self.tiles.clear();
        self.size_canvas();
        self.state = EngineState::Ready;
        self.benchmark.record("init", start);
        Ok(())
    }

    fn size_canvas(&mut self) {
        if !self.config.renderer.is_raster() {
            self.canvas = None;
            return;
        }
        let (width, height) = self
            .config
            .output_size
            .map_or(self.source_size, |size| (size.width, size.height));
        if width == 0 || height == 0 {
            return;
        }
        let stale = self
            .canvas
            .as_ref()
            .is_none_or(|canvas| canvas.dimensions() != (width, height));
        if stale {
            self.canvas = Some(RasterCanvas::new(width, height, self.config.fill));
        }
    }

    fn output_dimensions(&self) -> (u32, u32) {
        self.canvas
            .as_ref()
            .map_or(self.source_size, RasterCanvas::dimensions)
    }

    /// Sample, solve and emit the attached input
    ///
    /// With `refresh_image` the source frame is drawn again before sampling,
    /// which picks up new frames from live sources. A source whose size
    /// changed triggers a full re-initialisation instead.
    ///
    /// # Errors
    ///
    /// Returns [`HalftoneError::SourceNotReady`] if no input is attached, or an
    /// error from re-initialisation when the source size changed
    pub fn render(&mut self, refresh_image: bool) -> Result<Rendered<'_>> {
        if self.prepared.is_none() {
            return Err(HalftoneError::SourceNotReady);
        }
        if refresh_image {
            self.refresh()?;
        }
        self.state = EngineState::Rendering;
        let (output_width, output_height) = self.output_dimensions();

        let Some(prepared) = self.prepared.as_mut() else {
            return Err(HalftoneError::SourceNotReady);
        };

        let start = Instant::now();
        accumulate(
            &prepared.raster,
            &prepared.assignment,
            &mut prepared.seeds,
            self.config.inverse,
        );
        self.benchmark.record("process", start);

        let start = Instant::now();
        for seed in &mut prepared.seeds {
            seed.radius = seed.want_rate().map_or(0.0, |rate| self.shape.solve(rate));
        }
        self.benchmark.record("calculate", start);

        let start = Instant::now();
        let factor = f64::from(output_width) / prepared.raster.width().max(1) as f64;

        let mut tracker = OrientationTracker::new();
        let mut tiles = Vec::with_capacity(prepared.seeds.len());
        for seed in &prepared.seeds {
            if let Some(tile) = self.shape.place(seed, &mut tracker) {
                tiles.push(tile.scaled(factor));
            }
        }
        self.tiles = tiles;

        let rendered = match self.config.renderer {
            Renderer::SvgPath => Rendered::PathData(svg::path_data(&self.tiles)),
            Renderer::Svg => {
                let path = svg::path_data(&self.tiles);
                Rendered::Document(svg::document(
                    &path,
                    output_width,
                    output_height,
                    self.config.fill,
                ))
            }
            Renderer::Canvas => {
                let Some(canvas) = self.canvas.as_mut() else {
                    self.state = EngineState::Ready;
                    return Err(HalftoneError::SourceNotReady);
                };
                canvas.clear();
                draw_tiles(canvas, &self.tiles);
                Rendered::Canvas(canvas.surface())
            }
        };
        self.benchmark.record("render", start);
        self.state = EngineState::Ready;
        log::debug!("rendered {} tiles", self.tiles.len());

        Ok(rendered)
    }

    fn refresh(&mut self) -> Result<()> {
        let Some(size) = self.source.as_ref().map(|source| source.dimensions()) else {
            return Err(HalftoneError::SourceNotReady);
        };
        if size != self.source_size {
            log::debug!("source size changed, rebuilding lattice");
            return self.init();
        }
        let Some(frame) = self.source.as_ref().map(|source| source.frame()) else {
            return Err(HalftoneError::SourceNotReady);
        };
        if let Some(prepared) = self.prepared.as_mut() {
            prepared.raster.redraw(&frame);
        }
        Ok(())
    }

    /// Shape this engine renders
    pub const fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Current configuration
    pub const fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Lifecycle state
    pub const fn state(&self) -> EngineState {
        self.state
    }

    /// Seeds in generation order, with samples and radii of the last render
    pub fn seeds(&self) -> &[Seed] {
        self.prepared.as_ref().map_or(&[], |p| p.seeds.as_slice())
    }

    /// Pixel ownership for the current lattice
    pub fn assignment(&self) -> Option<&Assignment> {
        self.prepared.as_ref().map(|p| &p.assignment)
    }

    /// Downsampled working raster
    pub fn raster(&self) -> Option<&WorkingRaster> {
        self.prepared.as_ref().map(|p| &p.raster)
    }

    /// Tiles emitted by the last render, in output coordinates
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Size of the attached source `(width, height)`
    pub const fn source_size(&self) -> (u32, u32) {
        self.source_size
    }

    /// Recorded benchmark spans
    pub fn benchmarks(&self) -> &[Span] {
        self.benchmark.spans()
    }
}
