use super::{FlowRepository, upsert};
use crate::document::FlowDocument;
use crate::error::RepositoryError;
use crate::flow::{Flow, IntoFlow};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

/// Stores every flow in one JSON array file.
///
/// A missing file reads as an empty store. Each `put` rewrites the whole
/// file; there is no locking, so only one writer may use a file at a time.
#[derive(Debug, Clone)]
pub struct JsonFileFlowRepository {
    path: PathBuf,
}

impl JsonFileFlowRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<Flow>, RepositoryError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let documents: Vec<FlowDocument> =
            serde_json::from_str(&content).map_err(|e| self.corrupt(e.to_string()))?;
        documents
            .into_iter()
            .map(|document| document.into_flow().map_err(|e| self.corrupt(e.to_string())))
            .collect()
    }

    fn store(&self, flows: &[Flow]) -> Result<(), RepositoryError> {
        let documents: Vec<FlowDocument> = flows.iter().map(FlowDocument::from).collect();
        let json = serde_json::to_string_pretty(&documents).map_err(|e| {
            RepositoryError::Encode(self.path.display().to_string(), e.to_string())
        })?;
        fs::write(&self.path, json).map_err(|e| self.io_error(e))
    }

    fn io_error(&self, e: std::io::Error) -> RepositoryError {
        RepositoryError::Io {
            path: self.path.display().to_string(),
            message: e.to_string(),
        }
    }

    fn corrupt(&self, message: String) -> RepositoryError {
        RepositoryError::Corrupt {
            path: self.path.display().to_string(),
            message,
        }
    }
}

impl FlowRepository for JsonFileFlowRepository {
    fn list(&self) -> Result<Vec<Flow>, RepositoryError> {
        self.load()
    }

    fn get(&self, id: &str) -> Result<Option<Flow>, RepositoryError> {
        Ok(self.load()?.into_iter().find(|flow| flow.id == id))
    }

    fn put(&mut self, flow: Flow) -> Result<(), RepositoryError> {
        let mut flows = self.load()?;
        let id = flow.id.clone();
        upsert(&mut flows, flow);
        self.store(&flows)?;
        info!(flow = %id, path = %self.path.display(), "saved flow");
        Ok(())
    }
}
