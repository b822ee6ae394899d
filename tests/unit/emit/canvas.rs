//! Tests for the canvas backend and the scanline raster surface

#[cfg(test)]
mod tests {
    use halftile::emit::canvas::{Canvas, RasterCanvas, draw_tiles, execute};
    use halftile::emit::geometry::{Tile, TileShape, circle, square};

    #[derive(Debug, Default)]
    struct RecordingCanvas {
        calls: Vec<String>,
    }

    impl Canvas for RecordingCanvas {
        fn begin_path(&mut self) {
            self.calls.push("begin".to_string());
        }

        fn move_to(&mut self, x: f64, y: f64) {
            self.calls.push(format!("move {x} {y}"));
        }

        fn line_to(&mut self, x: f64, y: f64) {
            self.calls.push(format!("line {x} {y}"));
        }

        fn arc(&mut self, cx: f64, cy: f64, radius: f64, _start: f64, _end: f64) {
            self.calls.push(format!("arc {cx} {cy} {radius}"));
        }

        fn close_path(&mut self) {
            self.calls.push("close".to_string());
        }

        fn fill(&mut self) {
            self.calls.push("fill".to_string());
        }
    }

    fn filled(canvas: &RasterCanvas) -> usize {
        canvas.surface().pixels().filter(|p| p.0[3] > 0).count()
    }

    // Tests that operations are replayed in order
    #[test]
    fn test_execute_replays_operations() {
        let mut canvas = RecordingCanvas::default();
        execute(&mut canvas, &circle(1.0, 2.0, 3.0));

        assert_eq!(canvas.calls, vec!["move 4 2", "arc 1 2 3", "close"]);
    }

    // Tests that every tile is drawn as its own filled path
    #[test]
    fn test_draw_tiles_fills_each_tile() {
        let tiles = [
            Tile {
                cx: 0.0,
                cy: 0.0,
                radius: 1.0,
                shape: TileShape::Circle,
            },
            Tile {
                cx: 4.0,
                cy: 0.0,
                radius: 2.0,
                shape: TileShape::Square,
            },
        ];
        let mut canvas = RecordingCanvas::default();
        draw_tiles(&mut canvas, &tiles);

        let begins = canvas.calls.iter().filter(|c| *c == "begin").count();
        let fills = canvas.calls.iter().filter(|c| *c == "fill").count();
        assert_eq!((begins, fills), (2, 2));
        assert_eq!(canvas.calls.first().map(String::as_str), Some("begin"));
        assert_eq!(canvas.calls.last().map(String::as_str), Some("fill"));
    }

    // Tests that a square fills exactly the pixels whose centers it contains
    #[test]
    fn test_fill_square() {
        let mut canvas = RasterCanvas::new(10, 10, [0, 0, 0, 255]);
        canvas.begin_path();
        execute(&mut canvas, &square(5.0, 5.0, 4.0));
        canvas.fill();

        assert_eq!(filled(&canvas), 16);
        assert_eq!(canvas.surface().get_pixel(3, 3).0, [0, 0, 0, 255]);
        assert_eq!(canvas.surface().get_pixel(6, 6).0, [0, 0, 0, 255]);
        assert_eq!(canvas.surface().get_pixel(7, 7).0[3], 0);
        assert_eq!(canvas.surface().get_pixel(2, 5).0[3], 0);
    }

    // Tests that a flattened circle covers roughly its analytic area
    #[test]
    fn test_fill_circle_area() {
        let mut canvas = RasterCanvas::new(40, 40, [0, 0, 0, 255]);
        canvas.begin_path();
        execute(&mut canvas, &circle(20.0, 20.0, 10.0));
        canvas.fill();

        let expected = std::f64::consts::PI * 100.0;
        let actual = filled(&canvas) as f64;
        assert!((actual - expected).abs() / expected < 0.05, "filled {actual}");
    }

    // Tests that shapes partly outside the surface are clipped
    #[test]
    fn test_fill_clips_to_surface() {
        let mut canvas = RasterCanvas::new(4, 4, [0, 0, 0, 255]);
        canvas.begin_path();
        execute(&mut canvas, &square(0.0, 0.0, 4.0));
        canvas.fill();

        assert_eq!(filled(&canvas), 4);
    }

    // Tests translucent fill blending over existing ink
    #[test]
    fn test_fill_blends_translucent_colour() {
        let mut canvas = RasterCanvas::new(2, 2, [255, 0, 0, 128]);
        for _ in 0..2 {
            canvas.begin_path();
            execute(&mut canvas, &square(1.0, 1.0, 2.0));
            canvas.fill();
        }

        let pixel = canvas.surface().get_pixel(0, 0).0;
        assert_eq!(pixel[0], 255);
        assert!(pixel[3] > 128 && pixel[3] < 255, "alpha {}", pixel[3]);
    }

    // Tests clearing and surface ownership
    #[test]
    fn test_clear_and_into_surface() {
        let mut canvas = RasterCanvas::new(6, 4, [0, 0, 0, 255]);
        canvas.begin_path();
        execute(&mut canvas, &square(3.0, 2.0, 2.0));
        canvas.fill();
        assert_eq!(filled(&canvas), 4);

        canvas.clear();
        assert_eq!(filled(&canvas), 0);
        assert_eq!(canvas.dimensions(), (6, 4));
        assert_eq!(canvas.into_surface().dimensions(), (6, 4));
    }
}
