//! Occurrence history: JSONL append-only persistence of executed trades.
//!
//! One JSON object per line, making the format resilient to partial writes
//! and easy to stream. The log keeps a bounded in-memory tail so the decision
//! engine's `last_occurrence()` lookup never touches the disk.

use std::fs::{self, OpenOptions};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use signalforge_core::collaborators::{OccurrenceLog, OccurrenceLogError};
use signalforge_core::domain::TradeOccurrence;
use tracing::debug;

use crate::ring::BoundedRing;

/// JSONL-backed occurrence log.
pub struct JsonlOccurrenceLog {
    path: PathBuf,
    tail: BoundedRing<TradeOccurrence>,
}

impl JsonlOccurrenceLog {
    /// Open (or prepare to create) the log at `path`, loading the newest
    /// `capacity` records into memory.
    ///
    /// A malformed line is an error: a corrupted entry price must not silently
    /// become the stop-loss reference.
    pub fn open(path: impl Into<PathBuf>, capacity: usize) -> Result<Self, OccurrenceLogError> {
        let path = path.into();
        let mut tail = BoundedRing::new(capacity);
        tail.extend(read_occurrences(&path)?);
        debug!(path = %path.display(), loaded = tail.len(), "occurrence log opened");
        Ok(Self { path, tail })
    }

    /// Every record in the file, oldest first.
    pub fn read_all(&self) -> Result<Vec<TradeOccurrence>, OccurrenceLogError> {
        read_occurrences(&self.path)
    }

    /// The in-memory tail, oldest first.
    pub fn recent(&self) -> Vec<TradeOccurrence> {
        self.tail.to_vec()
    }

    /// Path to the history file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OccurrenceLog for JsonlOccurrenceLog {
    fn last_occurrence(&self) -> Result<Option<TradeOccurrence>, OccurrenceLogError> {
        Ok(self.tail.last().cloned())
    }

    fn append(&mut self, occurrence: TradeOccurrence) -> Result<(), OccurrenceLogError> {
        let json = serde_json::to_string(&occurrence).map_err(OccurrenceLogError::Serialize)?;

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{json}")?;
        file.flush()?;

        self.tail.push(occurrence);
        Ok(())
    }
}

/// Read a JSONL occurrence file. A missing file is an empty history.
pub fn read_occurrences(path: &Path) -> Result<Vec<TradeOccurrence>, OccurrenceLogError> {
    let file = match fs::File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut occurrences = Vec::new();
    for (index, line) in io::BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let occurrence = serde_json::from_str(&line).map_err(|source| {
            OccurrenceLogError::Malformed {
                line: index + 1,
                source,
            }
        })?;
        occurrences.push(occurrence);
    }
    Ok(occurrences)
}

/// Ring-buffer-only log for tests and dry runs.
#[derive(Debug, Clone)]
pub struct MemoryOccurrenceLog {
    tail: BoundedRing<TradeOccurrence>,
}

impl MemoryOccurrenceLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            tail: BoundedRing::new(capacity),
        }
    }

    pub fn recent(&self) -> Vec<TradeOccurrence> {
        self.tail.to_vec()
    }
}

impl OccurrenceLog for MemoryOccurrenceLog {
    fn last_occurrence(&self) -> Result<Option<TradeOccurrence>, OccurrenceLogError> {
        Ok(self.tail.last().cloned())
    }

    fn append(&mut self, occurrence: TradeOccurrence) -> Result<(), OccurrenceLogError> {
        self.tail.push(occurrence);
        Ok(())
    }
}
