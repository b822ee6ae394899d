//! Canvas drawing backend and a raster surface implementing it

use crate::emit::geometry::{PathOp, Tile};
use image::{Rgba, RgbaImage};

/// Immediate-mode 2D drawing context
///
/// Mirrors the subset of a browser canvas context the emitter needs.
pub trait Canvas {
    /// Discard the current path and start a new one
    fn begin_path(&mut self);
    /// Start a new subpath at a point
    fn move_to(&mut self, x: f64, y: f64);
    /// Add a straight segment to the current subpath
    fn line_to(&mut self, x: f64, y: f64);
    /// Add a clockwise arc, joined to the current point by a straight line
    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64);
    /// Close the current subpath
    fn close_path(&mut self);
    /// Fill the current path with the context's fill colour
    fn fill(&mut self);
}

/// Replay outline operations onto a canvas context
pub fn execute(canvas: &mut impl Canvas, ops: &[PathOp]) {
    for op in ops {
        match *op {
            PathOp::MoveTo { x, y } => canvas.move_to(x, y),
            PathOp::LineTo { x, y } => canvas.line_to(x, y),
            PathOp::Arc {
                cx,
                cy,
                radius,
                start,
                end,
            } => canvas.arc(cx, cy, radius, start, end),
            PathOp::Close => canvas.close_path(),
        }
    }
}

/// Draw every tile as its own filled path, in emission order
pub fn draw_tiles(canvas: &mut impl Canvas, tiles: &[Tile]) {
    for tile in tiles {
        canvas.begin_path();
        execute(canvas, &tile.outline());
        canvas.fill();
    }
}

/// RGBA surface filled with a nonzero-winding scanline rasterizer
///
/// Arcs are flattened into short line segments; pixels are filled when their
/// center lies inside the path.
#[derive(Debug, Clone)]
pub struct RasterCanvas {
    surface: RgbaImage,
    fill: [u8; 4],
    subpaths: Vec<Vec<(f64, f64)>>,
}

impl RasterCanvas {
    /// Transparent surface of the given size
    pub fn new(width: u32, height: u32, fill: [u8; 4]) -> Self {
        Self {
            surface: RgbaImage::new(width, height),
            fill,
            subpaths: Vec::new(),
        }
    }

    /// Reset every pixel to transparent
    pub fn clear(&mut self) {
        for pixel in self.surface.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }

    /// Rendered pixels
    pub const fn surface(&self) -> &RgbaImage {
        &self.surface
    }

    /// Consume the canvas and keep the rendered pixels
    pub fn into_surface(self) -> RgbaImage {
        self.surface
    }

    /// Surface `(width, height)`
    pub fn dimensions(&self) -> (u32, u32) {
        self.surface.dimensions()
    }

    fn current_point(&self) -> Option<(f64, f64)> {
        self.subpaths.last().and_then(|path| path.last().copied())
    }

    fn push_point(&mut self, point: (f64, f64)) {
        match self.subpaths.last_mut() {
            Some(path) => path.push(point),
            None => self.subpaths.push(vec![point]),
        }
    }

    fn blend(&mut self, x: u32, y: u32) {
        let [r, g, b, a] = self.fill;
        let Some(pixel) = self.surface.get_pixel_mut_checked(x, y) else {
            return;
        };
        if a == u8::MAX {
            *pixel = Rgba(self.fill);
            return;
        }

        let src_alpha = f64::from(a) / 255.0;
        let dst_alpha = f64::from(pixel.0[3]) / 255.0;
        let out_alpha = dst_alpha.mul_add(1.0 - src_alpha, src_alpha);
        if out_alpha <= 0.0 {
            return;
        }
        let mix = |src: u8, dst: u8| -> u8 {
            let value = (f64::from(dst) * dst_alpha)
                .mul_add(1.0 - src_alpha, f64::from(src) * src_alpha)
                / out_alpha;
            value.round().clamp(0.0, 255.0) as u8
        };
        *pixel = Rgba([
            mix(r, pixel.0[0]),
            mix(g, pixel.0[1]),
            mix(b, pixel.0[2]),
            (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8,
        ]);
    }

    fn edges(&self) -> Vec<((f64, f64), (f64, f64))> {
        let mut edges = Vec::new();
        for path in &self.subpaths {
            if path.len() < 2 {
                continue;
            }
            for pair in path.windows(2) {
                if let [a, b] = *pair {
                    edges.push((a, b));
                }
            }
            if let (Some(&first), Some(&last)) = (path.first(), path.last()) {
                edges.push((last, first));
            }
        }
        edges
    }
}

impl Canvas for RasterCanvas {
    fn begin_path(&mut self) {
        self.subpaths.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.subpaths.push(vec![(x, y)]);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.push_point((x, y));
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64) {
        let sweep = end - start;
        let segments = (sweep.abs() * radius.max(1.0)).ceil().clamp(8.0, 256.0) as usize;
        let first = (radius.mul_add(start.cos(), cx), radius.mul_add(start.sin(), cy));
        if self.current_point().is_none() {
            self.subpaths.push(Vec::new());
        }
        self.push_point(first);
        for i in 1..=segments {
            let angle = sweep.mul_add(i as f64 / segments as f64, start);
            self.push_point((radius.mul_add(angle.cos(), cx), radius.mul_add(angle.sin(), cy)));
        }
    }

    fn close_path(&mut self) {
        if let Some(&first) = self.subpaths.last().and_then(|path| path.first()) {
            self.subpaths.push(vec![first]);
        }
    }

    fn fill(&mut self) {
        let edges = self.edges();
        if edges.is_empty() {
            return;
        }
        let (width, height) = self.surface.dimensions();

        let (min_y, max_y) = edges.iter().fold((f64::MAX, f64::MIN), |(lo, hi), (a, b)| {
            (lo.min(a.1).min(b.1), hi.max(a.1).max(b.1))
        });
        let first_row = (min_y - 0.5).ceil().max(0.0) as u32;
        let last_row = ((max_y - 0.5).floor().min(f64::from(height) - 1.0)).max(-1.0);
        if last_row < 0.0 {
            return;
        }

        let mut crossings: Vec<(f64, i32)> = Vec::new();
        for y in first_row..=last_row as u32 {
            let sample_y = f64::from(y) + 0.5;
            crossings.clear();
            for &((x0, y0), (x1, y1)) in &edges {
                let direction = if y0 <= sample_y && sample_y < y1 {
                    1
                } else if y1 <= sample_y && sample_y < y0 {
                    -1
                } else {
                    continue;
                };
                let t = (sample_y - y0) / (y1 - y0);
                crossings.push(((x1 - x0).mul_add(t, x0), direction));
            }
            crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut winding = 0;
            for pair in crossings.windows(2) {
                let [(left, dir), (right, _)] = *pair else {
                    continue;
                };
                winding += dir;
                if winding == 0 {
                    continue;
                }
                let start = (left - 0.5).ceil().max(0.0);
                let end = (right - 0.5).ceil().min(f64::from(width));
                if end <= start {
                    continue;
                }
                for x in start as u32..end as u32 {
                    self.blend(x, y);
                }
            }
        }
    }
}
