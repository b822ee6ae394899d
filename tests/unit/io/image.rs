//! Tests for frame sources, image loading and output export

#[cfg(test)]
mod tests {
    use halftile::io::error::HalftoneError;
    use halftile::io::image::{FrameSource, export_png, export_text, load_rgba};
    use image::{DynamicImage, Rgba, RgbaImage};
    use tempfile::TempDir;

    // Tests frame source dimensions and snapshots for still images
    #[test]
    fn test_frame_source_for_images() {
        let rgba = RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 4]));
        let source: &dyn FrameSource = &rgba;
        assert_eq!(source.dimensions(), (3, 2));
        assert_eq!(source.frame(), rgba);

        let dynamic = DynamicImage::ImageRgba8(rgba.clone());
        let source: &dyn FrameSource = &dynamic;
        assert_eq!(source.dimensions(), (3, 2));
        assert_eq!(source.frame(), rgba);
    }

    // Tests PNG export into a fresh directory and loading it back
    #[test]
    fn test_export_and_load_png() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("nested").join("out.png");
        let surface = RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 255]));

        export_png(&surface, &path).expect("export");
        let loaded = load_rgba(&path).expect("load");

        assert_eq!(loaded, surface);
    }

    // Tests text export
    #[test]
    fn test_export_text() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("out.svg");

        export_text("<svg/>", &path).expect("export");

        assert_eq!(std::fs::read_to_string(&path).ok().as_deref(), Some("<svg/>"));
    }

    // Tests that missing files report the path
    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("absent.png");

        match load_rgba(&path) {
            Err(HalftoneError::ImageLoad { path: reported, .. }) => assert_eq!(reported, path),
            other => unreachable!("expected ImageLoad error, got {other:?}"),
        }
    }
}
