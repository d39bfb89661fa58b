//! A flat-file fact collection with brute-force nearest-neighbour search.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::embedder::Embedder;
use crate::core::CoachError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactRecord {
    pub id: String,
    pub text: String,
    pub embedding: Vec<f32>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CollectionFile {
    name: String,
    records: Vec<FactRecord>,
}

/// A named collection stored as `{db}/{collection}.json`.
#[derive(Debug)]
pub struct FactStore {
    path: PathBuf,
    name: String,
    records: Vec<FactRecord>,
}

impl FactStore {
    /// Open `collection` inside `db`, starting empty if it was never saved.
    pub fn open(db: impl AsRef<Path>, collection: &str) -> anyhow::Result<Self> {
        let path = db.as_ref().join(format!("{collection}.json"));
        let records = if path.is_file() {
            let file: CollectionFile = serde_json::from_str(&fs::read_to_string(&path)?)?;
            file.records
        } else {
            Vec::new()
        };
        tracing::debug!(path = %path.display(), records = records.len(), "opened fact store");
        Ok(Self {
            path,
            name: collection.to_string(),
            records,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[FactRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn dimension(&self) -> Option<usize> {
        self.records.first().map(|r| r.embedding.len())
    }

    fn check_dimension(&self, actual: usize) -> Result<(), CoachError> {
        match self.dimension() {
            Some(expected) if expected != actual => Err(CoachError::DimensionMismatch { expected, actual }),
            _ => Ok(()),
        }
    }

    /// Insert `record`, replacing any record with the same id.
    pub fn upsert(&mut self, record: FactRecord) -> anyhow::Result<()> {
        self.check_dimension(record.embedding.len())?;
        match self.records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
        Ok(())
    }

    /// Embed and upsert each `(id, text)` pair. Returns how many were stored.
    pub async fn add_texts<E: Embedder + ?Sized>(
        &mut self,
        embedder: &E,
        facts: &[(&str, &str)],
    ) -> anyhow::Result<usize> {
        for (id, text) in facts {
            let embedding = embedder.embed(text).await?;
            tracing::debug!(id, dim = embedding.len(), "embedded fact");
            self.upsert(FactRecord {
                id: id.to_string(),
                text: text.to_string(),
                embedding,
            })?;
        }
        Ok(facts.len())
    }

    /// The `k` records nearest to `embedding` by squared Euclidean distance, nearest first.
    pub fn query(&self, embedding: &[f32], k: usize) -> anyhow::Result<Vec<(&FactRecord, f32)>> {
        self.check_dimension(embedding.len())?;
        let mut scored: Vec<(&FactRecord, f32)> = self
            .records
            .iter()
            .map(|record| (record, squared_l2(&record.embedding, embedding)))
            .collect();
        scored.sort_by(|a, b| a.1.total_cmp(&b.1));
        scored.truncate(k);
        Ok(scored)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = CollectionFile {
            name: self.name.clone(),
            records: self.records.clone(),
        };
        fs::write(&self.path, serde_json::to_string(&file)?)?;
        tracing::info!(path = %self.path.display(), records = self.len(), "saved fact store");
        Ok(())
    }
}

fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}
