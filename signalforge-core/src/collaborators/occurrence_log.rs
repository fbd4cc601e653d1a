//! Occurrence log trait: the record of executed trades.

use crate::domain::TradeOccurrence;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OccurrenceLogError {
    #[error("occurrence log I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed occurrence record at line {line}: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("serialize occurrence: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Append-only store of executed trades.
///
/// The decision engine only ever calls [`last_occurrence`](Self::last_occurrence).
pub trait OccurrenceLog {
    /// The most recent recorded trade, if any.
    fn last_occurrence(&self) -> Result<Option<TradeOccurrence>, OccurrenceLogError>;

    /// Record a trade that actually executed.
    fn append(&mut self, occurrence: TradeOccurrence) -> Result<(), OccurrenceLogError>;
}

/// Plain in-memory log, newest last.
impl OccurrenceLog for Vec<TradeOccurrence> {
    fn last_occurrence(&self) -> Result<Option<TradeOccurrence>, OccurrenceLogError> {
        Ok(self.last().cloned())
    }

    fn append(&mut self, occurrence: TradeOccurrence) -> Result<(), OccurrenceLogError> {
        self.push(occurrence);
        Ok(())
    }
}
