//! Bounded queued delivery in front of a sink.
//!
//! Dispatch stays synchronous; this wrapper only moves the sink's own I/O to
//! a worker thread. The channel is FIFO, so per-caller ordering is exactly
//! the order blocks were accepted in.

use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use crossbeam_channel::{Sender, bounded};

use crate::config::PRETTYLOG_CONFIG;
use crate::level::Severity;
use crate::sink::Sink;

enum Command {
    Block {
        severity: Severity,
        tag: String,
        block: String,
    },
    Shutdown,
}

pub struct QueuedSink {
    sender: Sender<Command>,
    worker: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl QueuedSink {
    /// Queue capacity comes from `PRETTYLOG_QUEUE_CAPACITY`.
    pub fn spawn(inner: Box<dyn Sink>) -> Self {
        Self::with_capacity(inner, PRETTYLOG_CONFIG.QUEUE_CAPACITY as usize)
    }

    pub fn with_capacity(inner: Box<dyn Sink>, capacity: usize) -> Self {
        let (sender, receiver) = bounded::<Command>(capacity);
        let worker = std::thread::spawn(move || {
            while let Ok(command) = receiver.recv() {
                match command {
                    Command::Block {
                        severity,
                        tag,
                        block,
                    } => inner.accept(severity, &tag, &block),
                    Command::Shutdown => break,
                }
            }
        });
        Self {
            sender,
            worker: Arc::new(Mutex::new(Some(worker))),
        }
    }

    /// Drains the queue and joins the worker. Safe to call more than once.
    pub fn shutdown(&self) {
        let mut guard = self.worker.lock().unwrap();
        if let Some(handle) = guard.take() {
            let _ = self.sender.send(Command::Shutdown);
            let _ = handle.join();
        }
    }
}

impl Drop for QueuedSink {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl Sink for QueuedSink {
    fn accept(&self, severity: Severity, tag: &str, block: &str) {
        let _ = self.sender.send(Command::Block {
            severity,
            tag: tag.into(),
            block: block.into(),
        });
    }
}
