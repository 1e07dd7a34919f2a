//! The decorator: renders one log call into a bordered block and hands the
//! finished block to each configured sink.
//!
//! Every call renders into its own buffer, so concurrent callers never share
//! mutable state and a sink always receives a complete block in one piece.

use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use crate::callsite::{self, CallSite};
use crate::config::PRETTYLOG_CONFIG;
use crate::format;
use crate::level::Severity;
use crate::queue::QueuedSink;
use crate::sink::{ConsoleSink, FileSink, PathNotifier, Sink};

const TOP_LEFT_CORNER: char = '┌';
const BOTTOM_LEFT_CORNER: char = '└';
const MIDDLE_CORNER: char = '├';
const HORIZONTAL_LINE: char = '│';
const DOUBLE_DIVIDER: &str = "────────────────────────────────────────────────────────";
const SINGLE_DIVIDER: &str = "┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄";
const THREAD_TITLE: &str = "Thread: ";
const MESSAGE_TITLE: &str = "Message: ";

/// Middle-border width minus the message gutter.
pub(crate) const DEFAULT_CHUNK_WIDTH: usize = 60;

const DEFAULT_METHOD_COUNT: usize = 2;

/// A configured rendering pipeline plus the sinks it feeds. Register one per
/// priority threshold on a [`crate::Registry`].
pub struct Printer {
    show_thread_info: bool,
    method_offset: usize,
    method_count: usize,
    chunk_width: usize,
    sinks: Vec<Box<dyn Sink>>,
}

impl Printer {
    pub fn builder() -> PrinterBuilder {
        PrinterBuilder::default()
    }

    /// Renders the decorated block once and delivers it to every sink. A
    /// missing message renders as the literal `NULL`.
    pub(crate) fn print(&self, severity: Severity, tag: &str, message: Option<&str>) {
        let message = message.unwrap_or("NULL");
        let mut block = String::new();
        self.render_header(&mut block);
        self.render_trace(&mut block);
        self.render_message(&mut block, message);
        for sink in &self.sinks {
            sink.accept(severity, tag, &block);
        }
    }

    fn render_header(&self, block: &mut String) {
        push_border(block, TOP_LEFT_CORNER, DOUBLE_DIVIDER);
        if self.show_thread_info {
            let thread = std::thread::current();
            block.push(HORIZONTAL_LINE);
            block.push(' ');
            block.push_str(THREAD_TITLE);
            block.push_str(thread.name().unwrap_or("<unnamed>"));
            block.push('\n');
        }
    }

    fn render_trace(&self, block: &mut String) {
        if self.method_count == 0 {
            return;
        }
        let frames = callsite::resolve(self.method_offset, self.method_count);
        self.render_frames(block, &frames);
    }

    /// Staircase of call-site lines, most recent call last, each line two
    /// spaces deeper than the one above.
    fn render_frames(&self, block: &mut String, frames: &[CallSite]) {
        if frames.is_empty() {
            return;
        }
        if self.show_thread_info {
            push_border(block, MIDDLE_CORNER, SINGLE_DIVIDER);
        }
        let mut indent = 1;
        for frame in frames.iter().rev() {
            block.push(HORIZONTAL_LINE);
            for _ in 0..indent {
                block.push(' ');
            }
            block.push_str(&frame.render());
            block.push('\n');
            indent += 2;
        }
        push_border(block, MIDDLE_CORNER, SINGLE_DIVIDER);
    }

    fn render_message(&self, block: &mut String, message: &str) {
        block.push(HORIZONTAL_LINE);
        block.push(' ');
        block.push_str(MESSAGE_TITLE);
        block.push('\n');

        let pretty = format::prettify(message);
        let gutter = " ".repeat(MESSAGE_TITLE.len() + 1);
        for line in format::split_lines(&pretty) {
            for chunk in format::chunk_line(line, self.chunk_width) {
                block.push(HORIZONTAL_LINE);
                block.push_str(&gutter);
                block.push_str(chunk);
                block.push('\n');
            }
        }

        push_border(block, BOTTOM_LEFT_CORNER, DOUBLE_DIVIDER);
    }
}

fn push_border(block: &mut String, corner: char, divider: &str) {
    block.push(corner);
    block.push_str(divider);
    block.push_str(divider);
    block.push('\n');
}

/// Builder for [`Printer`]. Defaults: thread info on, two trace frames, no
/// offset, console output on, no file output.
pub struct PrinterBuilder {
    show_thread_info: bool,
    method_offset: usize,
    method_count: usize,
    chunk_width: usize,
    console: bool,
    folder: Option<PathBuf>,
    file_prefix: String,
    max_file_size: Option<u64>,
    notifier: Option<PathNotifier>,
    queued_file_io: bool,
    extra_sinks: Vec<Box<dyn Sink>>,
}

impl Default for PrinterBuilder {
    fn default() -> Self {
        Self {
            show_thread_info: true,
            method_offset: 0,
            method_count: DEFAULT_METHOD_COUNT,
            chunk_width: DEFAULT_CHUNK_WIDTH,
            console: true,
            folder: None,
            file_prefix: String::new(),
            max_file_size: None,
            notifier: None,
            queued_file_io: false,
            extra_sinks: Vec::new(),
        }
    }
}

impl PrinterBuilder {
    pub fn show_thread_info(self, show_thread_info: bool) -> Self {
        Self {
            show_thread_info,
            ..self
        }
    }

    /// Extra frames to skip above the detected call site.
    pub fn with_method_offset(self, method_offset: usize) -> Self {
        Self {
            method_offset,
            ..self
        }
    }

    /// Number of trace frames to render; zero disables the trace block.
    pub fn with_method_count(self, method_count: usize) -> Self {
        Self {
            method_count,
            ..self
        }
    }

    pub fn with_chunk_width(self, chunk_width: usize) -> Self {
        Self {
            chunk_width,
            ..self
        }
    }

    /// Disable console output.
    pub fn no_console(self) -> Self {
        Self {
            console: false,
            ..self
        }
    }

    /// Also write every block to `<folder>/<prefix><DD-MM-YYYY>.txt`.
    pub fn log_to_file<P: AsRef<Path>>(self, folder: P, prefix: &str) -> Self {
        Self {
            folder: Some(folder.as_ref().to_path_buf()),
            file_prefix: prefix.into(),
            ..self
        }
    }

    /// Size cap for the file sink; past it the file is truncated instead of
    /// appended. Defaults to `PRETTYLOG_MAX_FILE_SIZE_BYTES`.
    pub fn with_max_file_size(self, max_file_size: u64) -> Self {
        Self {
            max_file_size: Some(max_file_size),
            ..self
        }
    }

    /// Called with the written path after each successful file write.
    pub fn with_file_notifier(self, notifier: PathNotifier) -> Self {
        Self {
            notifier: Some(notifier),
            ..self
        }
    }

    /// Move file writes behind a bounded queue and a worker thread.
    pub fn queued_file_io(self) -> Self {
        Self {
            queued_file_io: true,
            ..self
        }
    }

    /// Attach a custom sink alongside the built-in ones.
    pub fn with_sink(mut self, sink: Box<dyn Sink>) -> Self {
        self.extra_sinks.push(sink);
        self
    }

    /// Validates the configuration and assembles the printer. Invalid
    /// settings are rejected here so a fault never surfaces mid-render.
    pub fn build(self) -> io::Result<Printer> {
        if self.chunk_width == 0 {
            return Err(io::Error::new(
                ErrorKind::InvalidInput,
                "chunk_width must be at least 1",
            ));
        }
        let mut sinks: Vec<Box<dyn Sink>> = Vec::new();
        if self.console {
            sinks.push(Box::new(ConsoleSink));
        }
        if let Some(folder) = self.folder {
            let max_file_size = self
                .max_file_size
                .unwrap_or(PRETTYLOG_CONFIG.MAX_FILE_SIZE_BYTES);
            let mut file = FileSink::new(folder, &self.file_prefix, max_file_size)?;
            if let Some(notifier) = self.notifier {
                file = file.with_notifier(notifier);
            }
            if self.queued_file_io {
                sinks.push(Box::new(QueuedSink::spawn(Box::new(file))));
            } else {
                sinks.push(Box::new(file));
            }
        }
        sinks.extend(self.extra_sinks);
        Ok(Printer {
            show_thread_info: self.show_thread_info,
            method_offset: self.method_offset,
            method_count: self.method_count,
            chunk_width: self.chunk_width,
            sinks,
        })
    }
}
