//! Top scores per difficulty and the store that persists them.
//!
//! The JSON form is one object with an array per mode:
//! `{"Balanced": [12, 10, 8], "Extreme": [], "Relaxed": [4]}`.

use crate::core::constants::RECORDS_PER_DIFFICULTY;
use crate::core::types::DifficultyMode;
use crate::error::{GameError, Result};
use crate::utils::persistence;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

type RawRecords = BTreeMap<String, Vec<u32>>;

/// Best scores for each difficulty, highest first, at most
/// [`RECORDS_PER_DIFFICULTY`] per mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawRecords", into = "RawRecords")]
pub struct RecordSet {
    scores: BTreeMap<DifficultyMode, Vec<u32>>,
}

impl Default for RecordSet {
    fn default() -> Self {
        Self {
            scores: DifficultyMode::ALL
                .iter()
                .map(|mode| (*mode, Vec::new()))
                .collect(),
        }
    }
}

impl From<RawRecords> for RecordSet {
    fn from(raw: RawRecords) -> Self {
        let mut records = RecordSet::default();
        for (name, mut scores) in raw {
            match DifficultyMode::from_name(&name) {
                Some(mode) => {
                    scores.sort_unstable_by(|a, b| b.cmp(a));
                    scores.truncate(RECORDS_PER_DIFFICULTY);
                    records.scores.insert(mode, scores);
                }
                None => tracing::warn!(mode = %name, "dropping records for unknown difficulty"),
            }
        }
        records
    }
}

impl From<RecordSet> for RawRecords {
    fn from(records: RecordSet) -> Self {
        records
            .scores
            .into_iter()
            .map(|(mode, scores)| (mode.name().to_string(), scores))
            .collect()
    }
}

impl RecordSet {
    /// Scores for `mode`, highest first.
    pub fn scores(&self, mode: DifficultyMode) -> &[u32] {
        self.scores.get(&mode).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Highest recorded score for `mode`, 0 when none exist.
    pub fn best(&self, mode: DifficultyMode) -> u32 {
        self.scores(mode).first().copied().unwrap_or(0)
    }

    /// A run enters the table only by beating the current best.
    pub fn beats_best(&self, mode: DifficultyMode, score: u32) -> bool {
        score > self.best(mode)
    }

    /// Insert `score`, keeping the list sorted and capped.
    pub fn insert(&mut self, mode: DifficultyMode, score: u32) {
        let scores = self.scores.entry(mode).or_default();
        scores.push(score);
        scores.sort_unstable_by(|a, b| b.cmp(a));
        scores.truncate(RECORDS_PER_DIFFICULTY);
    }

    /// Fold in scores from `other`, keeping the top entries of both.
    /// A score present in both sets is kept once.
    pub fn merge(&mut self, other: &RecordSet) {
        for (mode, theirs) in &other.scores {
            for score in theirs {
                if !self.scores(*mode).contains(score) {
                    self.insert(*mode, *score);
                }
            }
        }
    }

    /// Record a run's new best. `previous` is the score this run already wrote,
    /// if any; that entry is replaced instead of adding a second one for the
    /// same run.
    pub fn raise(&mut self, mode: DifficultyMode, previous: Option<u32>, score: u32) {
        if let Some(previous) = previous {
            let scores = self.scores.entry(mode).or_default();
            if let Some(pos) = scores.iter().position(|s| *s == previous) {
                scores.remove(pos);
            }
        }
        self.insert(mode, score);
    }
}

/// Read/write access to the persisted record set.
pub trait RecordStore {
    /// Load the stored records. A store with no data yet yields the defaults.
    fn load(&self) -> Result<RecordSet>;

    /// Replace the stored records with `records`.
    fn save(&mut self, records: &RecordSet) -> Result<()>;
}

/// Records kept as JSON on disk.
#[derive(Debug, Clone)]
pub struct JsonRecordStore {
    path: PathBuf,
}

impl JsonRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at ~/.snake/<filename>.
    pub fn in_data_dir(filename: &str) -> Result<Self> {
        let path = persistence::save_path(filename)?;
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for JsonRecordStore {
    fn load(&self) -> Result<RecordSet> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(RecordSet::default()),
            Err(e) => Err(GameError::Io(e)),
        }
    }

    fn save(&mut self, records: &RecordSet) -> Result<()> {
        persistence::save_json_atomic(&self.path, records)?;
        Ok(())
    }
}

/// In-memory store, for tests and for running without a writable home.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    records: RecordSet,
    read_only: bool,
}

impl MemoryRecordStore {
    /// A store that rejects every save.
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Default::default()
        }
    }
}

impl RecordStore for MemoryRecordStore {
    fn load(&self) -> Result<RecordSet> {
        Ok(self.records.clone())
    }

    fn save(&mut self, records: &RecordSet) -> Result<()> {
        if self.read_only {
            return Err(GameError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "record store is read-only",
            )));
        }
        self.records = records.clone();
        Ok(())
    }
}

/// Load records, substituting defaults when the store cannot be read.
pub fn load_or_default(store: &dyn RecordStore) -> RecordSet {
    store.load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "could not load records, starting fresh");
        RecordSet::default()
    })
}
