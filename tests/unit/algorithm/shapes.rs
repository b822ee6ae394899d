//! Tests for the shape registry and tile placement

#[cfg(test)]
mod tests {
    use halftile::algorithm::shapes::{Shape, ShapeKind};
    use halftile::emit::geometry::{Orientation, OrientationTracker, TileShape};
    use halftile::io::configuration::RenderConfig;
    use halftile::io::error::HalftoneError;
    use halftile::math::area::AreaSolver;
    use halftile::spatial::lattice::{LatticeStrategy, Seed};

    fn sampled_seed(x: f64, y: f64, row_start: bool, radius: f64) -> Seed {
        Seed {
            samples: vec![255],
            radius,
            ..Seed::new(x, y, row_start)
        }
    }

    // Tests that every canonical name parses back to its kind
    #[test]
    fn test_names_round_trip() {
        for kind in ShapeKind::ALL {
            assert_eq!(kind.name().parse::<ShapeKind>().ok(), Some(kind));
            assert_eq!(kind.to_string(), kind.name());
        }
    }

    // Tests lenient name parsing and rejection of unknown names
    #[test]
    fn test_parse_variants() {
        assert_eq!("Hexagons".parse::<ShapeKind>().ok(), Some(ShapeKind::Hexagon));
        assert_eq!("ALT_CIRCLE".parse::<ShapeKind>().ok(), Some(ShapeKind::AltCircle));
        assert_eq!("offset square".parse::<ShapeKind>().ok(), Some(ShapeKind::OffsetSquare));
        assert_eq!("rings".parse::<ShapeKind>().ok(), Some(ShapeKind::ConcentricRings));
        assert_eq!("Squares".parse::<ShapeKind>().ok(), Some(ShapeKind::Square));
        assert_eq!(
            "concentric-rings".parse::<ShapeKind>().ok(),
            Some(ShapeKind::ConcentricRings)
        );
        assert_eq!(
            "Concentric_Ring".parse::<ShapeKind>().ok(),
            Some(ShapeKind::ConcentricRings)
        );

        assert!(matches!(
            "blob".parse::<ShapeKind>(),
            Err(HalftoneError::UnsupportedShape { name }) if name == "blob"
        ));
    }

    // Tests lattice and solver pairings
    #[test]
    fn test_kind_mappings() {
        assert_eq!(ShapeKind::Circle.lattice(), LatticeStrategy::Hex);
        assert_eq!(ShapeKind::AltCircle.lattice(), LatticeStrategy::Square);
        assert_eq!(ShapeKind::Circle.solver(0.0), AreaSolver::HexCircle);
        assert_eq!(ShapeKind::Wave.solver(0.0), AreaSolver::SquareCircle);
        assert_eq!(ShapeKind::Diamond.solver(0.0), AreaSolver::Square);
        assert_eq!(
            ShapeKind::Cross.solver(1.5),
            AreaSolver::Cross { bar_length: 1.5 }
        );
    }

    // Tests cross bar length validation bounds
    #[test]
    fn test_cross_bar_length_validation() {
        let config = RenderConfig::default();
        let shape = Shape::new(ShapeKind::Cross, &config).expect("default bar length is valid");
        assert!((shape.spacing() - 3.0).abs() < 1e-12);

        for bar in [0.0, -1.0, 0.75 * config.distance_between, 10.0] {
            let invalid = RenderConfig {
                cross_bar_length: Some(bar),
                ..RenderConfig::default()
            };
            assert!(
                matches!(
                    Shape::new(ShapeKind::Cross, &invalid),
                    Err(HalftoneError::InvalidConfiguration { .. })
                ),
                "bar length {bar} accepted"
            );
        }

        let ignored = RenderConfig {
            cross_bar_length: Some(100.0),
            ..RenderConfig::default()
        };
        assert!(Shape::new(ShapeKind::Square, &ignored).is_ok());
    }

    // Tests that a cross spans the bar length when thin and the full cell when solid
    #[test]
    fn test_cross_span() {
        let shape = Shape::new(ShapeKind::Cross, &RenderConfig::default()).expect("valid");

        assert!((shape.cross_span(0.0) - 1.5).abs() < 1e-12);
        assert!((shape.cross_span(1.5) - 3.0).abs() < 1e-12);
    }

    // Tests that unsampled and zero-radius seeds are skipped but still advance orientation
    #[test]
    fn test_place_skips_empty_seeds() {
        let shape = Shape::from_name("triangle", &RenderConfig::default()).expect("valid");
        let mut tracker = OrientationTracker::new();

        let empty = Seed::new(0.0, 0.0, true);
        let zero = sampled_seed(1.0, 0.0, false, 0.0);
        let filled = sampled_seed(2.0, 0.0, false, 1.0);

        assert!(shape.place(&empty, &mut tracker).is_none());
        assert!(shape.place(&zero, &mut tracker).is_none());
        let tile = shape.place(&filled, &mut tracker).expect("emitted");

        assert_eq!(tile.shape, TileShape::Triangle(Orientation::Up));
        assert_eq!(tracker.position(), (0, 3));
    }

    // Tests triangle orientation alternation across columns and rows
    #[test]
    fn test_place_triangle_orientation() {
        let up_down = Shape::from_name("triangle", &RenderConfig::default()).expect("valid");
        let left_right = Shape::from_name("alt-triangle", &RenderConfig::default()).expect("valid");

        let seeds = [
            sampled_seed(0.0, 0.0, true, 1.0),
            sampled_seed(1.0, 0.0, false, 1.0),
            sampled_seed(0.0, 1.0, true, 1.0),
        ];

        let mut tracker = OrientationTracker::new();
        let shapes: Vec<TileShape> = seeds
            .iter()
            .filter_map(|seed| up_down.place(seed, &mut tracker))
            .map(|tile| tile.shape)
            .collect();
        assert_eq!(
            shapes,
            vec![
                TileShape::Triangle(Orientation::Up),
                TileShape::Triangle(Orientation::Down),
                TileShape::Triangle(Orientation::Down),
            ]
        );

        let mut tracker = OrientationTracker::new();
        let shapes: Vec<TileShape> = seeds
            .iter()
            .filter_map(|seed| left_right.place(seed, &mut tracker))
            .map(|tile| tile.shape)
            .collect();
        assert_eq!(
            shapes,
            vec![
                TileShape::Triangle(Orientation::Right),
                TileShape::Triangle(Orientation::Left),
                TileShape::Triangle(Orientation::Left),
            ]
        );
    }

    // Tests that placed tiles keep seed position and radius in lattice units
    #[test]
    fn test_place_tile_geometry() {
        let shape = Shape::from_name("circle", &RenderConfig::default()).expect("valid");
        let tile = shape
            .place(&sampled_seed(4.0, 5.0, true, 1.25), &mut OrientationTracker::new())
            .expect("emitted");

        assert!((tile.cx - 4.0).abs() < f64::EPSILON);
        assert!((tile.cy - 5.0).abs() < f64::EPSILON);
        assert!((tile.radius - 1.25).abs() < f64::EPSILON);
        assert_eq!(tile.shape, TileShape::Circle);
    }

    // Tests that generated lattices and solved radii follow the configured spacing
    #[test]
    fn test_generate_and_solve() {
        let shape = Shape::new(ShapeKind::Square, &RenderConfig::default()).expect("valid");
        let seeds = shape.generate_lattice(6.0, 3.0).expect("valid lattice");

        assert_eq!(seeds.len(), 6);
        assert!((shape.solve(1.0) - 3.0).abs() < 1e-12);
        assert_eq!(shape.kind(), ShapeKind::Square);
        assert_eq!(shape.solver(), AreaSolver::Square);
    }
}
