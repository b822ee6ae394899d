//! Optional per-phase timing spans

use std::time::{Duration, Instant};

/// One timed engine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Phase name (`init`, `process`, `calculate` or `render`)
    pub title: &'static str,
    /// When the phase started
    pub start: Instant,
    /// When the phase finished
    pub end: Instant,
}

impl Span {
    /// Elapsed time of the phase
    pub fn duration(&self) -> Duration {
        self.end.saturating_duration_since(self.start)
    }
}

/// Collects spans when enabled, otherwise ignores every record
#[derive(Debug, Clone, Default)]
pub struct BenchmarkLog {
    enabled: bool,
    spans: Vec<Span>,
}

impl BenchmarkLog {
    /// Create a log that records only when `enabled`
    pub const fn new(enabled: bool) -> Self {
        Self {
            enabled,
            spans: Vec::new(),
        }
    }

    /// Toggle recording without discarding earlier spans
    pub const fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether spans are being recorded
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Close a phase that started at `start`
    pub fn record(&mut self, title: &'static str, start: Instant) {
        if !self.enabled {
            return;
        }
        let span = Span {
            title,
            start,
            end: Instant::now(),
        };
        log::info!("{title}: {:.3} ms", span.duration().as_secs_f64() * 1000.0);
        self.spans.push(span);
    }

    /// Spans recorded so far, oldest first
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Forget all recorded spans
    pub fn clear(&mut self) {
        self.spans.clear();
    }
}
