//! Unit tests mirroring the `src/` layout, plus a smoke test of the binary


#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use std::process::Command;
    use tempfile::TempDir;

    // Tests the command-line entry point end to end
    #[test]
    fn test_binary_renders_path_data() {
        let dir = TempDir::new().expect("temp dir");
        let input = dir.path().join("input.png");
        RgbaImage::from_fn(30, 20, |x, y| Rgba([0, ((x + y) * 5) as u8, 0, 255]))
            .save(&input)
            .expect("write input");

        let status = Command::new(env!("CARGO_BIN_EXE_halftile"))
            .arg(&input)
            .args(["--shape", "triangle", "--renderer", "svgpath", "--quiet"])
            .status()
            .expect("run binary");
        assert!(status.success());

        let path = std::fs::read_to_string(dir.path().join("input_halftone.path"))
            .expect("path output");
        assert!(path.starts_with('M'));
        assert!(!path.contains("NaN"));
    }

    // Tests that the binary reports configuration errors with a failure status
    #[test]
    fn test_binary_rejects_unknown_shape() {
        let dir = TempDir::new().expect("temp dir");
        let input = dir.path().join("input.png");
        RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]))
            .save(&input)
            .expect("write input");

        let status = Command::new(env!("CARGO_BIN_EXE_halftile"))
            .arg(&input)
            .args(["--shape", "blob", "--quiet"])
            .status()
            .expect("run binary");
        assert!(!status.success());
    }
}
