use crate::error::RepositoryError;
use crate::flow::Flow;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Saved node positions, keyed by page id.
///
/// This is a side-table for the visualization only. It is stored apart from
/// the flow document and joined to the pages when a graph is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutStore {
    positions: AHashMap<String, Position>,
}

impl LayoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, page_id: impl Into<String>, position: Position) {
        self.positions.insert(page_id.into(), position);
    }

    pub fn get(&self, page_id: &str) -> Option<Position> {
        self.positions.get(page_id).copied()
    }

    pub fn remove(&mut self, page_id: &str) -> Option<Position> {
        self.positions.remove(page_id)
    }

    /// Drops positions of pages that no longer exist in `flow`.
    pub fn prune(&mut self, flow: &Flow) {
        self.positions
            .retain(|page_id, _| flow.page_ordinal(page_id).is_some());
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Loads a layout file. A missing file is an empty layout.
    pub fn from_file(path: &Path) -> Result<Self, RepositoryError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(RepositoryError::Io {
                    path: path.display().to_string(),
                    message: e.to_string(),
                });
            }
        };
        serde_json::from_str(&content).map_err(|e| RepositoryError::Corrupt {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), RepositoryError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| RepositoryError::Encode(path.display().to_string(), e.to_string()))?;
        fs::write(path, json).map_err(|e| RepositoryError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}
