//! Priority-keyed dispatch.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::level::{Priority, Severity};
use crate::printer::Printer;

/// Dispatch table from priority threshold to printer. At most one printer
/// per threshold; registering again at an occupied threshold replaces the
/// previous printer.
///
/// The registry is an explicit handle rather than process-global state:
/// construct it once at startup and clone it wherever logging happens.
/// Thresholds are iterated in ascending order, so dispatch order is
/// deterministic.
#[derive(Clone, Default)]
pub struct Registry {
    printers: Arc<RwLock<BTreeMap<Priority, Arc<Printer>>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, threshold: Priority, printer: Printer) {
        self.printers
            .write()
            .unwrap()
            .insert(threshold, Arc::new(printer));
    }

    /// Fans an event out to every printer whose threshold admits it
    /// (`priority <= threshold`). With nothing registered this is a silent
    /// no-op. A missing message renders as the literal `NULL`.
    pub fn log(&self, severity: Severity, tag: &str, message: Option<&str>, priority: Priority) {
        let selected: Vec<Arc<Printer>> = {
            let printers = self.printers.read().unwrap();
            printers
                .iter()
                .filter(|(threshold, _)| priority <= **threshold)
                .map(|(_, printer)| Arc::clone(printer))
                .collect()
        };
        // Render outside the lock so sink I/O never blocks registration.
        for printer in selected {
            printer.print(severity, tag, message);
        }
    }

    pub fn trace(&self, tag: &str, message: &str) {
        self.log(Severity::Trace, tag, Some(message), Priority::DEFAULT);
    }

    pub fn trace_with(&self, tag: &str, message: &str, priority: Priority) {
        self.log(Severity::Trace, tag, Some(message), priority);
    }

    pub fn debug(&self, tag: &str, message: &str) {
        self.log(Severity::Debug, tag, Some(message), Priority::DEFAULT);
    }

    pub fn debug_with(&self, tag: &str, message: &str, priority: Priority) {
        self.log(Severity::Debug, tag, Some(message), priority);
    }

    pub fn info(&self, tag: &str, message: &str) {
        self.log(Severity::Info, tag, Some(message), Priority::DEFAULT);
    }

    pub fn info_with(&self, tag: &str, message: &str, priority: Priority) {
        self.log(Severity::Info, tag, Some(message), priority);
    }

    pub fn warn(&self, tag: &str, message: &str) {
        self.log(Severity::Warn, tag, Some(message), Priority::DEFAULT);
    }

    pub fn warn_with(&self, tag: &str, message: &str, priority: Priority) {
        self.log(Severity::Warn, tag, Some(message), priority);
    }

    pub fn error(&self, tag: &str, message: &str) {
        self.log(Severity::Error, tag, Some(message), Priority::DEFAULT);
    }

    pub fn error_with(&self, tag: &str, message: &str, priority: Priority) {
        self.log(Severity::Error, tag, Some(message), priority);
    }

    pub fn fatal(&self, tag: &str, message: &str) {
        self.log(Severity::Fatal, tag, Some(message), Priority::DEFAULT);
    }

    pub fn fatal_with(&self, tag: &str, message: &str, priority: Priority) {
        self.log(Severity::Fatal, tag, Some(message), priority);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::test_support::CaptureSink;

    fn capture_printer() -> (Printer, CaptureSink) {
        let sink = CaptureSink::default();
        let printer = Printer::builder()
            .no_console()
            .show_thread_info(false)
            .with_method_count(0)
            .with_sink(Box::new(sink.clone()))
            .build()
            .unwrap();
        (printer, sink)
    }

    #[test]
    fn delivery_requires_priority_at_or_below_threshold() {
        let registry = Registry::new();
        let (high_printer, high_sink) = capture_printer();
        let (low_printer, low_sink) = capture_printer();
        registry.register(Priority::High, high_printer);
        registry.register(Priority::Low, low_printer);

        registry.info_with("t", "normal", Priority::Normal);
        assert_eq!(high_sink.blocks().len(), 0);
        assert_eq!(low_sink.blocks().len(), 1);

        registry.info_with("t", "non-debug", Priority::NonDebug);
        assert_eq!(high_sink.blocks().len(), 1);
        assert_eq!(low_sink.blocks().len(), 2);

        registry.info_with("t", "low", Priority::Low);
        assert_eq!(high_sink.blocks().len(), 1);
        assert_eq!(low_sink.blocks().len(), 3);
    }

    #[test]
    fn reregistration_replaces_the_previous_printer() {
        let registry = Registry::new();
        let (first_printer, first_sink) = capture_printer();
        let (second_printer, second_sink) = capture_printer();
        registry.register(Priority::Low, first_printer);
        registry.register(Priority::Low, second_printer);

        registry.info("t", "after replacement");
        assert!(first_sink.blocks().is_empty());
        assert_eq!(second_sink.blocks().len(), 1);
    }

    #[test]
    fn dispatch_with_no_printers_is_a_silent_noop() {
        let registry = Registry::new();
        registry.error("t", "nobody listening");
    }

    #[test]
    fn default_priority_event_reaches_low_threshold_printer() {
        let registry = Registry::new();
        let (printer, sink) = capture_printer();
        registry.register(Priority::Low, printer);

        registry.warn("endpoints", "connection pool exhausted");

        let blocks = sink.blocks();
        assert_eq!(blocks.len(), 1);
        let (severity, tag, block) = &blocks[0];
        assert_eq!(*severity, Severity::Warn);
        assert_eq!(tag, "endpoints");
        assert!(block.contains("Message:"));
        assert!(block.contains("connection pool exhausted"));
    }

    #[test]
    fn missing_message_dispatches_as_literal_null() {
        let registry = Registry::new();
        let (printer, sink) = capture_printer();
        registry.register(Priority::Low, printer);

        registry.log(Severity::Info, "t", None, Priority::DEFAULT);
        assert!(sink.blocks()[0].2.contains("NULL"));
    }

    #[test]
    fn severity_entry_points_carry_their_severity() {
        let registry = Registry::new();
        let (printer, sink) = capture_printer();
        registry.register(Priority::Low, printer);

        registry.trace("t", "a");
        registry.debug("t", "b");
        registry.info("t", "c");
        registry.warn("t", "d");
        registry.error("t", "e");
        registry.fatal("t", "f");

        let severities: Vec<Severity> = sink.blocks().iter().map(|b| b.0).collect();
        assert_eq!(
            severities,
            vec![
                Severity::Trace,
                Severity::Debug,
                Severity::Info,
                Severity::Warn,
                Severity::Error,
                Severity::Fatal,
            ]
        );
    }

    #[test]
    fn concurrent_dispatch_yields_complete_blocks_per_thread() {
        let registry = Registry::new();
        let (printer, sink) = capture_printer();
        registry.register(Priority::Low, printer);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = registry.clone();
                std::thread::spawn(move || {
                    registry.info(&format!("thread-{i}"), &format!("payload {i}"));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let blocks = sink.blocks();
        assert_eq!(blocks.len(), 8);
        let mut seen_tags: Vec<&str> = blocks.iter().map(|b| b.1.as_str()).collect();
        seen_tags.sort();
        seen_tags.dedup();
        assert_eq!(seen_tags.len(), 8);
        for (_, tag, block) in &blocks {
            let lines: Vec<&str> = block.lines().collect();
            assert_eq!(lines.len(), 4, "interleaved block for {tag}: {block:?}");
            assert!(lines[0].starts_with('┌'));
            assert!(lines[3].starts_with('└'));
            let index = tag.trim_start_matches("thread-");
            assert!(lines[2].contains(&format!("payload {index}")));
        }
    }
}
