// 📂 Data Loader - CSV file → Dataset, last load wins
//
// Loads may overlap. Each one is issued a ticket; only the most recently
// issued ticket's result is ever applied, and it is applied whole.
// A failed read becomes an empty dataset, never an error for the analyst.

use crate::aggregator::CategoryIndex;
use crate::error::LoadError;
use crate::parser::{parse_competitors, CompetitorRecord};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

// ============================================================================
// DATASET
// ============================================================================

/// Parsed records plus their category index. Immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    pub source: String,
    pub records: Vec<CompetitorRecord>,
    pub categories: CategoryIndex,
    pub loaded_at: DateTime<Utc>,
}

impl Dataset {
    pub fn from_records(source: impl Into<String>, records: Vec<CompetitorRecord>) -> Self {
        let categories = CategoryIndex::build(&records);
        Dataset {
            source: source.into(),
            records,
            categories,
            loaded_at: Utc::now(),
        }
    }

    pub fn from_csv_text(source: impl Into<String>, text: &str) -> Self {
        Dataset::from_records(source, parse_competitors(text))
    }

    pub fn empty(source: impl Into<String>) -> Self {
        Dataset::from_records(source, Vec::new())
    }

    /// Turn a read result into a dataset, degrading failures to empty
    pub fn from_read(source: impl Into<String>, result: Result<String, LoadError>) -> Self {
        let source = source.into();
        match result {
            Ok(text) => {
                let dataset = Dataset::from_csv_text(source, &text);
                info!(
                    source = %dataset.source,
                    records = dataset.records.len(),
                    categories = dataset.categories.len(),
                    "competitor data loaded"
                );
                dataset
            }
            Err(e) => {
                warn!(error = %e, "competitor data unavailable, continuing with an empty dataset");
                Dataset::empty(source)
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ============================================================================
// LOAD TICKETS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Hands out load tickets and decides which result is final.
#[derive(Debug, Clone, Default)]
pub struct LoadCoordinator {
    issued: u64,
    applied: Option<u64>,
}

impl LoadCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new load; every earlier ticket becomes stale
    pub fn begin(&mut self) -> LoadTicket {
        self.issued += 1;
        LoadTicket(self.issued)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.issued
    }

    /// Claim the right to apply a result. True at most once, and only for
    /// the most recently issued ticket.
    pub fn accept(&mut self, ticket: LoadTicket) -> bool {
        if !self.is_current(ticket) || self.applied == Some(ticket.0) {
            return false;
        }
        self.applied = Some(ticket.0);
        true
    }

    /// True while the latest issued load has not been applied
    pub fn in_flight(&self) -> bool {
        self.issued > 0 && self.applied != Some(self.issued)
    }
}

// ============================================================================
// SOURCES
// ============================================================================

pub fn read_csv_text(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Blocking load. Run it off the interaction thread.
pub fn load_dataset(path: &Path) -> Dataset {
    Dataset::from_read(path.display().to_string(), read_csv_text(path))
}

/// Non-blocking load for async front ends
#[cfg(feature = "server")]
pub async fn fetch_dataset(path: PathBuf) -> Dataset {
    let result = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| LoadError::Read {
            path: path.clone(),
            source,
        });

    Dataset::from_read(path.display().to_string(), result)
}

/// Load on a worker thread, delivering `(ticket, dataset)` over `sender`.
pub fn spawn_load(
    path: PathBuf,
    ticket: LoadTicket,
    sender: std::sync::mpsc::Sender<(LoadTicket, Dataset)>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        let dataset = load_dataset(&path);
        // The receiver may have gone away (dashboard closed); nothing to do then
        let _ = sender.send((ticket, dataset));
    })
}

// ============================================================================
// TESTS
// ============================================================================
