//! Output sinks.
//!
//! A sink accepts a fully decorated block at a given severity and must not
//! surface ordinary failures to the logging caller.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use colored::Colorize;

use crate::level::Severity;

#[cfg(not(test))]
mod limits {
    pub const MIN_FILE_SIZE: u64 = 4_096;
}


/// Invoked with the path of the log file after each successful write.
pub type PathNotifier = Box<dyn Fn(&Path) + Send + Sync>;

pub trait Sink: Send + Sync {
    fn accept(&self, severity: Severity, tag: &str, block: &str);
}

/// Writes each block line to stdout behind a colored severity label. The
/// stdout lock is held for the whole block, so concurrent blocks never
/// interleave.
pub struct ConsoleSink;

impl Sink for ConsoleSink {
    fn accept(&self, severity: Severity, tag: &str, block: &str) {
        let label = match severity {
            Severity::Trace => "TRACE".purple(),
            Severity::Debug => "DEBUG".blue(),
            Severity::Info => "INFO".green(),
            // Fatal goes out through the warn arm, not a tier of its own.
            Severity::Warn | Severity::Fatal => "WARN".yellow(),
            Severity::Error => "ERROR".red(),
        };
        let mut out = io::stdout().lock();
        for line in block.lines() {
            let _ = writeln!(out, "{label} {tag}: {line}");
        }
        let _ = out.flush();
    }
}

/// Appends timestamped blocks to `<folder>/<prefix><DD-MM-YYYY>.txt`,
/// truncating once the file grows past `max_file_size`. The folder is
/// created on demand and I/O errors stay on the console side channel.
pub struct FileSink {
    folder: PathBuf,
    prefix: String,
    max_file_size: u64,
    notifier: Option<PathNotifier>,
}

impl FileSink {
    pub fn new<P: AsRef<Path>>(folder: P, prefix: &str, max_file_size: u64) -> io::Result<Self> {
        if max_file_size < limits::MIN_FILE_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "max_file_size must be at least {} bytes",
                    limits::MIN_FILE_SIZE
                ),
            ));
        }
        Ok(Self {
            folder: folder.as_ref().to_path_buf(),
            prefix: prefix.into(),
            max_file_size,
            notifier: None,
        })
    }

    pub fn with_notifier(self, notifier: PathNotifier) -> Self {
        Self {
            notifier: Some(notifier),
            ..self
        }
    }

    fn write_block(&self, block: &str) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.folder)?;
        let now = Local::now();
        let path = self
            .folder
            .join(format!("{}{}.txt", self.prefix, now.format("%d-%m-%Y")));
        let append = match path.metadata() {
            Ok(metadata) => metadata.len() < self.max_file_size,
            Err(_) => true,
        };
        let mut options = File::options();
        options.create(true);
        if append {
            options.append(true);
        } else {
            options.write(true).truncate(true);
        }
        let mut file = options.open(&path)?;
        // One write per block keeps concurrent appenders whole.
        let entry = format!("{}: {block}", now.format("%a %b %d %Y at %H:%M:%S:%3f"));
        file.write_all(entry.as_bytes())?;
        Ok(path)
    }
}

impl Sink for FileSink {
    fn accept(&self, _severity: Severity, tag: &str, block: &str) {
        match self.write_block(block) {
            Ok(path) => {
                if let Some(notifier) = &self.notifier {
                    notifier(&path);
                }
            }
            Err(error) => {
                eprintln!(
                    "{} {tag}: error while logging into file: {error}",
                    "ERROR".red()
                );
            }
        }
    }
}
