// File: ./src/store.rs
// Bridges the in-memory card collection and the data file
use crate::error::{BonusError, Result, ValidationError};
use crate::model::{Card, RawPoints, Record, from_record, to_record};
use crate::storage::LocalStorage;
use serde_json::Value;
use std::fs;
use std::io;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Ordered cards, in the order they were found on disk or added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection(Vec<Card>);

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the raw inputs and appends the resulting card. On failure
    /// the collection is left untouched. Persisting is the caller's job.
    pub fn add<'a>(
        &mut self,
        raw_name: &str,
        raw_points: impl Into<RawPoints<'a>>,
        raw_date: &str,
    ) -> std::result::Result<&Card, ValidationError> {
        let card = Card::new(raw_name, raw_points, raw_date)?;
        tracing::debug!("Adding card {:?}", card.card_name());
        self.0.push(card);
        match self.0.last() {
            Some(added) => Ok(added),
            None => unreachable!("collection is non-empty right after a push"),
        }
    }

    pub fn push(&mut self, card: Card) {
        self.0.push(card);
    }

    /// Removes the card at `index` (0-based, display order).
    pub fn remove(&mut self, index: usize) -> Result<Card> {
        if index >= self.0.len() {
            return Err(BonusError::IndexOutOfRange {
                index,
                len: self.0.len(),
            });
        }
        let card = self.0.remove(index);
        tracing::debug!("Removed card {:?} at {}", card.card_name(), index);
        Ok(card)
    }

    pub fn list(&self) -> &[Card] {
        &self.0
    }

    pub fn total_points(&self) -> u64 {
        self.0
            .iter()
            .fold(0u64, |sum, c| sum.saturating_add(c.welcome_points()))
    }
}

impl Deref for Collection {
    type Target = [Card];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<Card> for Collection {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Something the loader had to work around. None of these stop a load.
#[derive(Debug, Error)]
pub enum LoadWarning {
    #[error("cannot read {0:?}: {1}, starting with an empty list")]
    Unreadable(PathBuf, io::Error),
    #[error("{0:?} contains invalid JSON, starting with an empty list: {1}")]
    InvalidJson(PathBuf, serde_json::Error),
    #[error("{0:?} does not hold a list of cards, starting with an empty list")]
    NotAList(PathBuf),
    #[error("skipped entry #{0}: not a card record")]
    NotARecord(usize),
    #[error("skipped entry #{index}: {source}")]
    InvalidRecord {
        index: usize,
        source: ValidationError,
    },
}

#[derive(Debug, Default)]
pub struct Loaded {
    pub collection: Collection,
    pub warnings: Vec<LoadWarning>,
}

impl Loaded {
    fn empty_with(warning: LoadWarning) -> Self {
        tracing::warn!("{}", warning);
        Self {
            collection: Collection::default(),
            warnings: vec![warning],
        }
    }
}

/// Handle on the data file. Holds no cards itself; every front-end loads
/// its own [`Collection`] and hands it back to [`Store::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Never fails: a missing file is a first run, a broken one degrades to
    /// whatever could be salvaged, with the problems listed in `warnings`.
    pub fn load(&self) -> Loaded {
        let content = match LocalStorage::read(&self.path) {
            Ok(Some(content)) => content,
            Ok(None) => {
                tracing::info!("No data file at {}, starting empty", self.path.display());
                return Loaded::default();
            }
            Err(e) => return Loaded::empty_with(LoadWarning::Unreadable(self.path.clone(), e)),
        };
        if content.trim().is_empty() {
            return Loaded::default();
        }

        let entries = match serde_json::from_str::<Value>(&content) {
            Ok(Value::Array(entries)) => entries,
            Ok(_) => return Loaded::empty_with(LoadWarning::NotAList(self.path.clone())),
            Err(e) => return Loaded::empty_with(LoadWarning::InvalidJson(self.path.clone(), e)),
        };

        let mut loaded = Loaded::default();
        for (index, entry) in entries.iter().enumerate() {
            let result = match entry {
                Value::Object(record) => from_record(record)
                    .map_err(|source| LoadWarning::InvalidRecord { index, source }),
                _ => Err(LoadWarning::NotARecord(index)),
            };
            match result {
                Ok(card) => loaded.collection.push(card),
                Err(warning) => {
                    tracing::warn!("{}: {}", self.path.display(), warning);
                    loaded.warnings.push(warning);
                }
            }
        }

        tracing::info!(
            "Loaded {} card(s) from {} ({} skipped)",
            loaded.collection.len(),
            self.path.display(),
            loaded.warnings.len()
        );
        loaded
    }

    /// Writes the whole collection, replacing the file atomically.
    pub fn save(&self, collection: &Collection) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)
                .map_err(|e| BonusError::CreateDataDirError(parent.to_path_buf(), e))?;
        }

        let records: Vec<Record> = collection.iter().map(to_record).collect();
        let json = serde_json::to_string_pretty(&records).map_err(BonusError::SerializeCardsError)?;

        if let Err(e) = LocalStorage::atomic_write(&self.path, json) {
            tracing::error!("Saving to {} failed: {}", self.path.display(), e);
            return Err(BonusError::WriteCardsError(self.path.clone(), e));
        }
        tracing::info!("Saved {} card(s) to {}", collection.len(), self.path.display());
        Ok(())
    }
}
