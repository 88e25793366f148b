//! Authoring mutations on a [`Flow`].
//!
//! These run outside of any navigation session: a `Navigator` holds a shared
//! borrow of the flow, so the borrow checker keeps editing and playing apart.

use super::{ConditionValue, Flow, Page, PostCondition, Question};
use crate::error::AuthoringError;
use tracing::debug;

impl Flow {
    /// Creates an empty flow with a fresh id.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, AuthoringError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AuthoringError::EmptyFlowName);
        }
        Ok(Self {
            id: Self::fresh_id(),
            name,
            description: description.into(),
            pages: Vec::new(),
        })
    }

    /// Generates a new flow id.
    pub fn fresh_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    /// Appends a new empty page and returns its ordinal.
    ///
    /// Pages are named `Side <n>` with id `page<n>`, `n` starting at the new
    /// page count and skipping ids already in use.
    pub fn add_page(&mut self) -> usize {
        let mut n = self.pages.len() + 1;
        while self.page_ordinal(&format!("page{}", n)).is_some() {
            n += 1;
        }
        self.pages
            .push(Page::new(format!("page{}", n), format!("Side {}", n)));
        debug!(flow = %self.id, page = n, "added page");
        self.pages.len() - 1
    }

    /// Makes sure the flow has at least one page. Returns true if one was added.
    pub fn ensure_page(&mut self) -> bool {
        if self.pages.is_empty() {
            self.add_page();
            true
        } else {
            false
        }
    }

    /// Removes the page at `ordinal` and returns the ordinal an editor cursor
    /// should move to.
    ///
    /// A flow never ends up empty: deleting the last remaining page adds a
    /// fresh one. Rules elsewhere that targeted the page become dangling.
    pub fn delete_page(&mut self, ordinal: usize) -> Result<usize, AuthoringError> {
        if ordinal >= self.pages.len() {
            return Err(AuthoringError::PageOutOfRange(ordinal));
        }
        let removed = self.pages.remove(ordinal);
        debug!(flow = %self.id, page = %removed.id, "deleted page");
        self.ensure_page();
        Ok(ordinal.min(self.pages.len() - 1))
    }

    pub fn delete_page_by_id(&mut self, id: &str) -> Result<usize, AuthoringError> {
        let ordinal = self
            .page_ordinal(id)
            .ok_or_else(|| AuthoringError::PageNotFound(id.to_string()))?;
        self.delete_page(ordinal)
    }

    /// Validates and appends a question, returning its ordinal on the page.
    pub fn add_question(
        &mut self,
        page: usize,
        question: Question,
    ) -> Result<usize, AuthoringError> {
        question.validate()?;
        let target = self.page_mut(page)?;
        target.questions.push(question);
        Ok(target.questions.len() - 1)
    }

    /// Removes a question. Rules keep their indices, so a rule pointing past
    /// the end afterwards simply never matches.
    pub fn delete_question(
        &mut self,
        page: usize,
        question: usize,
    ) -> Result<Question, AuthoringError> {
        let target = self.page_mut(page)?;
        if question >= target.questions.len() {
            return Err(AuthoringError::QuestionOutOfRange { page, question });
        }
        Ok(target.questions.remove(question))
    }

    /// Appends a branching rule after the page's existing rules.
    ///
    /// The target page id is not resolved here; a rule may point at a page
    /// that is created (or deleted) later.
    pub fn add_post_condition(
        &mut self,
        page: usize,
        rule: PostCondition,
    ) -> Result<usize, AuthoringError> {
        let target = self.page_mut(page)?;
        let question = target.questions.get(rule.question_index).ok_or(
            AuthoringError::QuestionOutOfRange {
                page,
                question: rule.question_index,
            },
        )?;
        if !question.is_answerable() {
            return Err(AuthoringError::NotAnswerable {
                page,
                question: rule.question_index,
            });
        }
        match &rule.value {
            ConditionValue::Number(n) if !n.is_finite() => {
                return Err(AuthoringError::NonFiniteConditionValue(*n));
            }
            _ if rule.value.is_empty() => return Err(AuthoringError::EmptyConditionValue),
            _ => {}
        }
        if rule.next_page_id.trim().is_empty() {
            return Err(AuthoringError::MissingTargetPage);
        }
        target.post_conditions.push(rule);
        Ok(target.post_conditions.len() - 1)
    }

    pub fn delete_post_condition(
        &mut self,
        page: usize,
        rule: usize,
    ) -> Result<PostCondition, AuthoringError> {
        let target = self.page_mut(page)?;
        if rule >= target.post_conditions.len() {
            return Err(AuthoringError::RuleOutOfRange { page, rule });
        }
        Ok(target.post_conditions.remove(rule))
    }

    fn page_mut(&mut self, ordinal: usize) -> Result<&mut Page, AuthoringError> {
        self.pages
            .get_mut(ordinal)
            .ok_or(AuthoringError::PageOutOfRange(ordinal))
    }
}
