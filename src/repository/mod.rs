//! Storage collaborators for flow documents.
//!
//! The navigation engine never touches storage; a host loads a flow through a
//! [`FlowRepository`], hands it to a `Navigator`, and saves edits back
//! (usually through a [`SaveDebouncer`]).

use crate::error::RepositoryError;
use crate::flow::Flow;

pub mod debounce;
pub mod file;

pub use debounce::SaveDebouncer;
pub use file::JsonFileFlowRepository;

/// A store of flows keyed by id.
pub trait FlowRepository {
    /// All stored flows, in insertion order.
    fn list(&self) -> Result<Vec<Flow>, RepositoryError>;

    fn get(&self, id: &str) -> Result<Option<Flow>, RepositoryError>;

    /// Inserts the flow, or replaces the stored flow with the same id.
    fn put(&mut self, flow: Flow) -> Result<(), RepositoryError>;
}

/// A repository that lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFlowRepository {
    flows: Vec<Flow>,
}

impl InMemoryFlowRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FlowRepository for InMemoryFlowRepository {
    fn list(&self) -> Result<Vec<Flow>, RepositoryError> {
        Ok(self.flows.clone())
    }

    fn get(&self, id: &str) -> Result<Option<Flow>, RepositoryError> {
        Ok(self.flows.iter().find(|flow| flow.id == id).cloned())
    }

    fn put(&mut self, flow: Flow) -> Result<(), RepositoryError> {
        upsert(&mut self.flows, flow);
        Ok(())
    }
}

pub(crate) fn upsert(flows: &mut Vec<Flow>, flow: Flow) {
    match flows.iter_mut().find(|stored| stored.id == flow.id) {
        Some(stored) => *stored = flow,
        None => flows.push(flow),
    }
}
