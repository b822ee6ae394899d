//! Keeps `tests/unit` a compiled mirror of `src`
//!
//! The unit tests build as one target rooted at `tests/unit/main.rs`, so a
//! mirrored file only runs when every directory on its path declares it.

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    const SRC_DIR: &str = "src";
    const UNIT_DIR: &str = "tests/unit";
    const UNIT_ROOT: &str = "main.rs";

    /// Module tree files that carry no logic of their own
    fn is_module_file(relative: &str) -> bool {
        relative == "main.rs" || relative == "lib.rs" || relative.ends_with("mod.rs")
    }

    /// Relative `.rs` files and directories below `base`
    fn relative_paths(base: &Path) -> io::Result<BTreeSet<String>> {
        let mut found = BTreeSet::new();
        let mut pending = vec![base.to_path_buf()];

        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir)? {
                let path = entry?.path();
                let relative = path
                    .strip_prefix(base)
                    .map_err(|_| io::Error::other("path outside scanned directory"))?
                    .to_string_lossy()
                    .replace('\\', "/");

                if path.is_dir() {
                    found.insert(relative);
                    pending.push(path);
                } else if path.extension().is_some_and(|ext| ext == "rs") {
                    found.insert(relative);
                }
            }
        }

        Ok(found)
    }

    fn mirrored_paths() -> (BTreeSet<String>, BTreeSet<String>) {
        let src = relative_paths(Path::new(SRC_DIR))
            .unwrap_or_else(|error| unreachable!("cannot scan {SRC_DIR}: {error}"));
        let unit = relative_paths(Path::new(UNIT_DIR)).unwrap_or_default();
        (src, unit)
    }

    fn report(title: &str, lines: &[String]) -> String {
        format!("{title}:\n{}", lines.join("\n"))
    }

    /// `mod` names declared at the top level of a module file
    fn declared_modules(file: &Path) -> BTreeSet<String> {
        let Ok(content) = fs::read_to_string(file) else {
            return BTreeSet::new();
        };
        content
            .lines()
            .filter_map(|line| {
                let line = line.trim();
                let line = line.strip_prefix("pub ").unwrap_or(line);
                line.strip_prefix("mod ")?
                    .strip_suffix(';')
                    .map(|name| name.trim().to_string())
            })
            .collect()
    }

    /// File that must declare the module living at `relative`
    fn declaring_file(relative: &Path) -> PathBuf {
        let unit = Path::new(UNIT_DIR);
        match relative.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => unit.join(parent).join("mod.rs"),
            _ => unit.join(UNIT_ROOT),
        }
    }

    // Tests that every logic file in src has a unit test file at the same path
    #[test]
    fn test_src_files_have_unit_tests() {
        let (src, unit) = mirrored_paths();

        let missing: Vec<String> = src
            .iter()
            .filter(|path| !is_module_file(path) && !unit.contains(*path))
            .map(|path| format!("  - src/{path} -> {UNIT_DIR}/{path}"))
            .collect();

        assert!(
            missing.is_empty(),
            "{}",
            report("Source files without unit tests", &missing)
        );
    }

    // Tests that no unit test file outlives the source it covers
    #[test]
    fn test_unit_tests_have_src_counterparts() {
        let (src, unit) = mirrored_paths();

        let orphaned: Vec<String> = unit
            .iter()
            .filter(|path| !is_module_file(path) && !src.contains(*path))
            .map(|path| format!("  - {UNIT_DIR}/{path} -> src/{path} (missing)"))
            .collect();

        assert!(
            orphaned.is_empty(),
            "{}",
            report("Unit tests without source files", &orphaned)
        );
    }

    // Tests that every unit file and directory is reachable from the test root
    #[test]
    fn test_unit_files_are_declared() {
        let (_, unit) = mirrored_paths();

        let undeclared: Vec<String> = unit
            .iter()
            .filter(|path| !path.ends_with("mod.rs") && path.as_str() != UNIT_ROOT)
            .filter_map(|path| {
                let relative = Path::new(path);
                let name = relative.file_stem()?.to_string_lossy().to_string();
                let parent = declaring_file(relative);
                (!declared_modules(&parent).contains(&name)).then(|| {
                    format!(
                        "  - {UNIT_DIR}/{path} (no `mod {name};` in {})",
                        parent.display()
                    )
                })
            })
            .collect();

        assert!(
            undeclared.is_empty(),
            "{}",
            report("Unit test modules that never compile", &undeclared)
        );
    }

    // Tests that every test file outside the module tree defines a test
    #[test]
    fn test_test_files_contain_tests() {
        let tests_dir = Path::new("tests");
        let files = relative_paths(tests_dir)
            .unwrap_or_else(|error| unreachable!("cannot scan tests: {error}"));

        let empty: Vec<String> = files
            .iter()
            .filter(|path| path.ends_with(".rs") && !path.ends_with("mod.rs"))
            .filter(|path| {
                fs::read_to_string(tests_dir.join(path))
                    .is_ok_and(|content| !content.contains("#[test]"))
            })
            .map(|path| format!("  - tests/{path}"))
            .collect();

        assert!(
            empty.is_empty(),
            "{}",
            report("Test files without #[test] functions", &empty)
        );
    }
}
