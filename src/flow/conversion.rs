use super::definition::Flow;
use crate::error::ImportError;

/// A trait for external questionnaire formats that can be converted into a `Flow`.
///
/// The engine only depends on the shape of [`Flow`]; any source format (the
/// bundled JSON document, a database row set, another survey tool's export)
/// plugs in by implementing this trait.
///
/// # Example
///
/// ```rust
/// use vejviser::prelude::{Flow, ImportError, IntoFlow, Page, Question};
///
/// struct Checklist {
///     title: String,
///     items: Vec<String>,
/// }
///
/// impl IntoFlow for Checklist {
///     fn into_flow(self) -> Result<Flow, ImportError> {
///         let mut page = Page::new("page1", "Side 1");
///         for item in self.items {
///             page.questions.push(Question::text(item, None));
///         }
///         Ok(Flow {
///             id: Flow::fresh_id(),
///             name: self.title,
///             description: String::new(),
///             pages: vec![page],
///         })
///     }
/// }
///
/// let flow = Checklist { title: "Intake".into(), items: vec!["Name?".into()] }
///     .into_flow()
///     .unwrap();
/// assert_eq!(flow.pages[0].questions.len(), 1);
/// ```
pub trait IntoFlow {
    /// Consumes the object and converts it into a flow.
    fn into_flow(self) -> Result<Flow, ImportError>;
}
