//! Write-notification fan-out.
//!
//! Observers can subscribe on two channels over the same internal event
//! source: a typed file-written subscription receiving the absolute path,
//! and a catch-all subscription receiving the full event. Every write
//! reaches each subscriber of each channel exactly once.

use std::fmt;
use std::path::{Path, PathBuf};

/// An event emitted by the synthesis engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// A generated file was written (created or overwritten).
    FileWritten {
        /// Absolute path of the written file.
        path: PathBuf,
    },
}

impl EngineEvent {
    /// Returns the stable name of this event.
    pub fn name(&self) -> &'static str {
        match self {
            EngineEvent::FileWritten { .. } => "file-written",
        }
    }
}

type FileWrittenObserver = Box<dyn Fn(&Path) + Send + Sync>;
type CatchAllObserver = Box<dyn Fn(&EngineEvent) + Send + Sync>;

/// Observer registrations for engine events.
#[derive(Default)]
pub struct EventHub {
    file_written: Vec<FileWrittenObserver>,
    catch_all: Vec<CatchAllObserver>,
}

impl EventHub {
    /// Creates a hub with no observers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a typed observer for file-written events.
    pub fn on_file_written(&mut self, observer: impl Fn(&Path) + Send + Sync + 'static) {
        self.file_written.push(Box::new(observer));
    }

    /// Registers a catch-all observer receiving every event.
    pub fn on_any(&mut self, observer: impl Fn(&EngineEvent) + Send + Sync + 'static) {
        self.catch_all.push(Box::new(observer));
    }

    /// Emits one file-written event on both channels.
    pub fn emit_file_written(&self, path: &Path) {
        for observer in &self.file_written {
            observer(path);
        }
        let event = EngineEvent::FileWritten {
            path: path.to_path_buf(),
        };
        for observer in &self.catch_all {
            observer(&event);
        }
    }
}

impl fmt::Debug for EventHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHub")
            .field("file_written_observers", &self.file_written.len())
            .field("catch_all_observers", &self.catch_all.len())
            .finish()
    }
}
