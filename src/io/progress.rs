//! Batch progress display for multi-file runs

use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Single progress bar advanced once per processed file
///
/// The message shows the file currently being rendered and, once done, how
/// long it took.
pub struct ProgressManager {
    bar: ProgressBar,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a hidden progress manager; call [`initialize`] to show it
    ///
    /// [`initialize`]: ProgressManager::initialize
    pub fn new() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Show the bar for a known number of files
    pub fn initialize(&mut self, file_count: usize) {
        let bar = ProgressBar::new(file_count as u64);
        bar.set_style(BATCH_STYLE.clone());
        self.bar = bar;
    }

    /// Announce the file being rendered
    pub fn start_file(&self, path: &Path) {
        self.bar.set_message(display_name(path));
    }

    /// Mark a file as finished
    pub fn complete_file(&self, path: &Path, elapsed: Duration) {
        self.bar.set_message(format!(
            "✓ {} ({:.0} ms)",
            display_name(path),
            elapsed.as_secs_f64() * 1000.0
        ));
        self.bar.inc(1);
    }

    /// Number of files completed so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Clean up the display
    pub fn finish(&self) {
        self.bar.finish_with_message("All files processed");
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}
