//! # prettylog
//! Decorated, priority-routed logging with console and file sinks.
//!
//! Every log call renders into a bordered block showing the calling thread,
//! a staircase of call-site frames and the message body, with JSON and XML
//! payloads pretty-printed and long lines chunked to a fixed width.
//!
//! ## Usage
//! ```toml
//! // Cargo.toml
//! ...
//! [dependencies]
//! prettylog = "0.1.0"
//! ```
//!
//! ```rust
//! use prettylog::{Printer, Priority, Registry};
//!
//! let registry = Registry::new();
//! registry.register(Priority::Low, Printer::builder().build().unwrap());
//! registry.info("app", "pretty logger test");
//! ```
//!
//! ## Priorities
//! Each printer is registered at a threshold; a call reaches every printer
//! whose threshold is at or above the call's priority. The severity entry
//! points default to [`Priority::High`], so a `Low`-threshold printer sees
//! everything and a `NonDebug`-threshold printer only what is explicitly
//! sent there.
//!
//! ```rust
//! use prettylog::{Printer, Priority, Registry};
//!
//! let registry = Registry::new();
//! registry.register(Priority::NonDebug, Printer::builder().build().unwrap());
//! // Default priority is High, so nothing is printed here.
//! registry.debug("app", "chatty detail");
//! // Explicit NonDebug priority reaches the printer.
//! registry.warn_with("app", "ship-blocking problem", Priority::NonDebug);
//! ```
//!
//! ## Logging to files
//! A printer can also append each block to a date-named file, truncating
//! once the file outgrows its cap.
//!
//! ```rust
//! use prettylog::{Printer, Priority, Registry};
//!
//! let _ = std::fs::remove_dir_all("/tmp/prettylog_docs");
//! let registry = Registry::new();
//! let printer = Printer::builder()
//!     .no_console()
//!     .with_method_count(0)
//!     .log_to_file("/tmp/prettylog_docs", "app")
//!     .build()
//!     .unwrap();
//! registry.register(Priority::Normal, printer);
//! registry.warn("app", "saved to disk");
//!
//! let content: String = std::fs::read_dir("/tmp/prettylog_docs")
//!     .unwrap()
//!     .flatten()
//!     .map(|entry| std::fs::read_to_string(entry.path()).unwrap())
//!     .collect();
//! assert!(content.contains("saved to disk"));
//! ```
//!
//! ## `log` macros
//! ```rust
//! use prettylog::{Printer, Priority, Registry};
//!
//! let registry = Registry::new();
//! registry.register(Priority::Low, Printer::builder().build().unwrap());
//! prettylog::init_global(registry, log::LevelFilter::Info).unwrap();
//! log::info!("Hello, world!");
//! ```

mod bridge;
mod callsite;
mod config;
mod format;
mod level;
mod printer;
mod queue;
mod registry;
mod sink;

pub use bridge::init_global;
pub use level::{Priority, Severity};
pub use printer::{Printer, PrinterBuilder};
pub use queue::QueuedSink;
pub use registry::Registry;
pub use sink::{ConsoleSink, FileSink, PathNotifier, Sink};
