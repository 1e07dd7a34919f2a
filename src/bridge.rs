//! Adapter from the `log` facade to a [`Registry`].

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::level::{Priority, Severity};
use crate::registry::Registry;

struct LogBridge {
    registry: Registry,
    level: LevelFilter,
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if record.level() > self.level {
            return;
        }
        let message = record.args().to_string();
        self.registry.log(
            Severity::from(record.level()),
            record.target(),
            Some(&message),
            Priority::DEFAULT,
        );
    }

    fn flush(&self) {}
}

/// Routes `log` macro calls through the registry for the rest of the
/// process: the record target becomes the tag and every record carries the
/// default priority.
pub fn init_global(registry: Registry, level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(LogBridge { registry, level }))?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::Printer;
    use crate::sink::test_support::CaptureSink;

    // One test only: the global logger can be installed once per process.
    #[test]
    fn log_macros_route_through_the_registry() {
        let registry = Registry::new();
        let sink = CaptureSink::default();
        let printer = Printer::builder()
            .no_console()
            .show_thread_info(false)
            .with_method_count(0)
            .with_sink(Box::new(sink.clone()))
            .build()
            .unwrap();
        registry.register(Priority::Low, printer);

        init_global(registry, LevelFilter::Info).unwrap();
        log::info!(target: "bridge", "via macro");
        log::debug!(target: "bridge", "filtered out");

        let blocks = sink.blocks();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].0, Severity::Info);
        assert_eq!(blocks[0].1, "bridge");
        assert!(blocks[0].2.contains("via macro"));
    }
}
