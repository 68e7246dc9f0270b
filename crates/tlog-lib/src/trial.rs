use serde::Serialize;
use std::collections::BTreeMap;

/// Trial outcome as recorded in the `Result` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Hit,
    Miss,
    Other,
}

impl Outcome {
    pub fn from_result(value: &str) -> Self {
        match value {
            "Hit" => Outcome::Hit,
            "Miss" => Outcome::Miss,
            _ => Outcome::Other,
        }
    }
}

/// (block id, trial id) pair used to join timestamps with data rows.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RelationKey {
    pub block: String,
    pub trial: String,
}

impl RelationKey {
    pub fn new(block: impl Into<String>, trial: impl Into<String>) -> Self {
        Self {
            block: block.into(),
            trial: trial.into(),
        }
    }
}

/// Drag/drop relation per trial. Values are `"<drag> - <drop>"` or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationMap {
    entries: BTreeMap<RelationKey, String>,
}

impl RelationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a relation, returning the value it replaced (last write wins).
    pub fn insert(&mut self, key: RelationKey, relation: String) -> Option<String> {
        self.entries.insert(key, relation)
    }

    pub fn get(&self, block: &str, trial: &str) -> Option<&str> {
        self.entries
            .get(&RelationKey::new(block, trial))
            .map(String::as_str)
    }

    /// Relation for a trial, empty when the key was never seen.
    pub fn relation_for(&self, block: &str, trial: &str) -> String {
        self.get(block, trial).unwrap_or_default().to_string()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RelationKey, &str)> {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }
}

/// One trial from the data file, joined with its relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialRow {
    pub block: String,
    pub trial: String,
    pub tipo: String,
    pub resultado: String,
    pub relation: String,
}

impl TrialRow {
    pub fn outcome(&self) -> Outcome {
        Outcome::from_result(&self.resultado)
    }
}
