//! Tests for optional phase timing

#[cfg(test)]
mod tests {
    use halftile::algorithm::benchmark::BenchmarkLog;
    use std::time::Instant;

    // Tests that a disabled log ignores records
    #[test]
    fn test_disabled_log_records_nothing() {
        let mut log = BenchmarkLog::new(false);
        log.record("init", Instant::now());

        assert!(!log.is_enabled());
        assert!(log.spans().is_empty());
    }

    // Tests span order, titles and toggling
    #[test]
    fn test_enabled_log_records_spans() {
        let mut log = BenchmarkLog::new(true);
        let start = Instant::now();
        log.record("process", start);
        log.record("calculate", Instant::now());

        let titles: Vec<&str> = log.spans().iter().map(|s| s.title).collect();
        assert_eq!(titles, vec!["process", "calculate"]);
        assert!(log.spans().iter().all(|s| s.end >= s.start));

        log.set_enabled(false);
        log.record("render", Instant::now());
        assert_eq!(log.spans().len(), 2);

        log.clear();
        assert!(log.spans().is_empty());
    }
}
