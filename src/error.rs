use thiserror::Error;

/// Errors that can occur while importing a flow document.
///
/// A failed import never yields a partial flow: the caller keeps whatever it
/// had before.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImportError {
    #[error("Failed to parse flow JSON: {0}")]
    InvalidJson(String),

    #[error("Invalid flow format: field '{field}' must be {expected}")]
    InvalidShape {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Page {page_index} could not be read: {message}")]
    InvalidPage { page_index: usize, message: String },

    #[error(
        "Question {question_index} on page '{page_id}' has an unknown input type: '{input_type}'"
    )]
    UnknownInputType {
        page_id: String,
        question_index: usize,
        input_type: String,
    },
}

/// Errors raised by authoring mutations on a `Flow`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthoringError {
    #[error("A flow needs a non-empty name")]
    EmptyFlowName,

    #[error("Page {0} does not exist")]
    PageOutOfRange(usize),

    #[error("Page '{0}' does not exist")]
    PageNotFound(String),

    #[error("Question {question} does not exist on page {page}")]
    QuestionOutOfRange { page: usize, question: usize },

    #[error("Rule {rule} does not exist on page {page}")]
    RuleOutOfRange { page: usize, rule: usize },

    #[error("Question {question} on page {page} is a text block and cannot carry a condition")]
    NotAnswerable { page: usize, question: usize },

    #[error("Question text must not be empty")]
    EmptyQuestionText,

    #[error("A {input_type} question needs at least two options")]
    TooFewOptions { input_type: &'static str },

    #[error("A text block needs a body")]
    EmptyTextBlock,

    #[error("A condition needs a comparison value")]
    EmptyConditionValue,

    #[error("Condition value {0} is not a finite number")]
    NonFiniteConditionValue(f64),

    #[error("A condition needs a target page")]
    MissingTargetPage,
}

/// Errors raised when a navigation session cannot perform a request.
///
/// Ordinary navigation (`advance`, `retreat`) never fails; these cover only
/// setup and explicit jumps.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("The flow has no pages; add a page before starting navigation")]
    EmptyFlow,

    #[error("Page {0} does not exist")]
    PageOutOfRange(usize),

    #[error("Jumping between pages is only possible in preview mode")]
    JumpNotAllowed,
}

/// Errors produced when turning raw input into a typed answer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnswerError {
    #[error("Question {question} on page {page} does not exist")]
    QuestionNotFound { page: usize, question: usize },

    #[error("Text blocks do not take answers")]
    NotAnswerable,

    #[error("'{0}' is not a number")]
    InvalidNumber(String),

    #[error("'{0}' is not one of the question's options")]
    UnknownOption(String),

    #[error("The question does not accept multiple answers")]
    NotMultiSelect,
}

/// Errors from a `FlowRepository` backend.
#[derive(Error, Debug, Clone)]
pub enum RepositoryError {
    #[error("Could not access flow store '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Flow store '{path}' is corrupt: {message}")]
    Corrupt { path: String, message: String },

    #[error("Flow '{0}' could not be stored: {1}")]
    Encode(String, String),
}
