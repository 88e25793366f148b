//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the
//! vejviser crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use vejviser::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let json = std::fs::read_to_string("path/to/flow.json")?;
//! let flow = import_flow(&json)?;
//!
//! let mut navigator = Navigator::preview(&flow)?;
//! navigator.record_input(0, 0, "42")?;
//! println!("{:?}", navigator.advance());
//! # Ok(())
//! # }
//! ```

// Entity model
pub use crate::flow::{
    ConditionValue, Flow, IntoFlow, Operator, Page, PostCondition, Question, QuestionKind,
};

// Answers and evaluation
pub use crate::answer::{AnswerKey, AnswerStore, AnswerValue};
pub use crate::evaluator::evaluate;
pub use crate::trace::RuleFormatter;

// Navigation
pub use crate::navigation::{
    CompletionSummary, Decision, HistoryStack, NavState, NavigationMode, Navigator, Transition,
};

// Documents, storage and visualization
pub use crate::document::{export_flow, import_flow};
pub use crate::graph::{FlowGraph, LayoutStore};
pub use crate::repository::{FlowRepository, InMemoryFlowRepository, JsonFileFlowRepository};

// Error types
pub use crate::error::{
    AnswerError, AuthoringError, ImportError, NavigationError, RepositoryError,
};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
