//! Severity and priority enumerations.
//!
//! The two sets are deliberately distinct types: severity says how loud a
//! message is, priority says which registered printers get to see it. The
//! numeric ranges of the two overlap in the wire values of older builds, so
//! conflating them silently routes messages to the wrong printers.

use std::fmt;

/// How loud a message is. Ordered from quietest to loudest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    /// The assert/wtf tier of the console backends.
    Fatal,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<log::Level> for Severity {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Trace => Severity::Trace,
            log::Level::Debug => Severity::Debug,
            log::Level::Info => Severity::Info,
            log::Level::Warn => Severity::Warn,
            log::Level::Error => Severity::Error,
        }
    }
}

/// Routing key for dispatch. A printer registered at threshold `T` receives
/// every event whose priority `P` satisfies `P <= T`, so `Low`-threshold
/// printers are the most permissive and `NonDebug` the most restrictive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    NonDebug,
    High,
    Normal,
    Low,
}

impl Priority {
    /// Priority used by the entry points that do not take one explicitly.
    pub const DEFAULT: Priority = Priority::High;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_is_totally_ordered() {
        assert!(Severity::Trace < Severity::Debug);
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
        assert!(Severity::Error < Severity::Fatal);
    }

    #[test]
    fn priority_orders_most_restrictive_first() {
        assert!(Priority::NonDebug < Priority::High);
        assert!(Priority::High < Priority::Normal);
        assert!(Priority::Normal < Priority::Low);
        assert_eq!(Priority::DEFAULT, Priority::High);
    }

    #[test]
    fn severity_from_log_level() {
        assert_eq!(Severity::from(log::Level::Trace), Severity::Trace);
        assert_eq!(Severity::from(log::Level::Error), Severity::Error);
    }
}
