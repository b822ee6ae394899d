//! Tests for SVG path serialization

#[cfg(test)]
mod tests {
    use halftile::emit::geometry::{PathOp, Tile, TileShape, circle, square};
    use halftile::emit::svg::{document, format_number, path_data, serialize};

    // Tests two-decimal formatting with trailing zeros removed
    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(10.0), "10");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(1.256), "1.26");
        assert_eq!(format_number(-3.14159), "-3.14");
        assert_eq!(format_number(-0.001), "0");
        assert_eq!(format_number(f64::NAN), "0");
    }

    // Tests polygon serialization
    #[test]
    fn test_serialize_polygon() {
        let mut out = String::new();
        serialize(&square(1.0, 1.0, 2.0), &mut out);

        assert_eq!(out, "M0 0L2 0L2 2L0 2Z");
    }

    // Tests that full circles become two half arcs back to the start point
    #[test]
    fn test_serialize_circle() {
        let mut out = String::new();
        serialize(&circle(5.0, 5.0, 2.0), &mut out);

        assert_eq!(out, "M7 5A2 2 0 1 1 3 5A2 2 0 1 1 7 5Z");
    }

    // Tests partial arcs joined to the current point
    #[test]
    fn test_serialize_partial_arc() {
        let mut out = String::new();
        serialize(
            &[
                PathOp::MoveTo { x: 0.0, y: 0.0 },
                PathOp::Arc {
                    cx: 0.0,
                    cy: 0.0,
                    radius: 1.0,
                    start: 0.0,
                    end: std::f64::consts::FRAC_PI_2,
                },
            ],
            &mut out,
        );

        assert_eq!(out, "M0 0L1 0A1 1 0 0 1 0 1");
    }

    // Tests that tiles are concatenated in emission order
    #[test]
    fn test_path_data() {
        assert_eq!(path_data(&[]), "");

        let tiles = [
            Tile {
                cx: 1.0,
                cy: 1.0,
                radius: 2.0,
                shape: TileShape::Square,
            },
            Tile {
                cx: 5.0,
                cy: 1.0,
                radius: 2.0,
                shape: TileShape::Square,
            },
        ];
        assert_eq!(path_data(&tiles), "M0 0L2 0L2 2L0 2ZM4 0L6 0L6 2L4 2Z");
    }

    // Tests the standalone document wrapper and fill attributes
    #[test]
    fn test_document() {
        let svg = document("M0 0Z", 40, 30, [255, 0, 16, 255]);
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.contains("viewBox=\"0 0 40 30\""));
        assert!(svg.contains("fill=\"#ff0010\""));
        assert!(svg.contains("d=\"M0 0Z\""));
        assert!(!svg.contains("fill-opacity"));

        let translucent = document("", 1, 1, [0, 0, 0, 51]);
        assert!(translucent.contains("fill-opacity=\"0.2\""));
    }
}
