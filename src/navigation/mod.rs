//! The navigation state machine.
//!
//! A [`Navigator`] walks one flow for one session. It owns the session's
//! answers and history and borrows the flow read-only, so the flow cannot be
//! edited while a session is running.

use crate::answer::{AnswerKey, AnswerStore, AnswerValue};
use crate::error::{AnswerError, NavigationError};
use crate::evaluator;
use crate::flow::{Flow, Page, PostCondition, Question, QuestionKind};
use crate::trace::RuleFormatter;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub mod history;
pub mod summary;

pub use history::HistoryStack;
pub use summary::{AnswerEntry, CompletionSummary, PageSummary};

/// What happens when no rule on the current page sends the respondent anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationMode {
    /// Author preview: continue with the next page in order, or stay on the
    /// last page.
    Preview,
    /// Respondent play-through: the flow ends.
    Play,
}

/// The state of a navigation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    Active(usize),
    Ended,
}

/// The outcome of evaluating the current page's rules, before it is applied.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Rule `rule` matched and its target resolves to page `target`.
    Branch {
        rule: usize,
        target: usize,
        reason: String,
    },
    /// No usable rule; the mode's fallback applies. `dormant_rule` is set when
    /// the first matching rule pointed at a page that does not exist.
    Fallback { dormant_rule: Option<usize> },
}

/// A state change performed by the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Branched { from: usize, to: usize, rule: usize },
    Sequential { from: usize, to: usize },
    /// Preview fallback on the last page: nothing to move to.
    Stayed { at: usize },
    Ended { from: usize },
    Retreated { from: usize, to: usize },
    /// The request had no effect (ended flow, empty history).
    Unchanged,
}

/// Walks a flow page by page, choosing each next page from the answers given.
pub struct Navigator<'a> {
    flow: &'a Flow,
    mode: NavigationMode,
    state: NavState,
    answers: AnswerStore,
    history: HistoryStack,
    page_index: AHashMap<&'a str, usize>,
}

/// Configures a [`Navigator`].
pub struct NavigatorBuilder<'a> {
    flow: &'a Flow,
    mode: NavigationMode,
    answers: AnswerStore,
}

impl<'a> NavigatorBuilder<'a> {
    pub fn new(flow: &'a Flow, mode: NavigationMode) -> Self {
        Self {
            flow,
            mode,
            answers: AnswerStore::new(),
        }
    }

    pub fn mode(mut self, mode: NavigationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Starts the session with answers already in place.
    pub fn with_answers(mut self, answers: AnswerStore) -> Self {
        self.answers = answers;
        self
    }

    pub fn build(self) -> Result<Navigator<'a>, NavigationError> {
        if self.flow.is_empty() {
            return Err(NavigationError::EmptyFlow);
        }
        let mut page_index = AHashMap::with_capacity(self.flow.pages.len());
        for (ordinal, page) in self.flow.pages.iter().enumerate() {
            page_index.entry(page.id.as_str()).or_insert(ordinal);
        }
        Ok(Navigator {
            flow: self.flow,
            mode: self.mode,
            state: NavState::Active(0),
            answers: self.answers,
            history: HistoryStack::new(),
            page_index,
        })
    }
}

impl<'a> Navigator<'a> {
    pub fn builder(flow: &'a Flow, mode: NavigationMode) -> NavigatorBuilder<'a> {
        NavigatorBuilder::new(flow, mode)
    }

    /// A respondent play-through of `flow`.
    pub fn play(flow: &'a Flow) -> Result<Self, NavigationError> {
        Self::builder(flow, NavigationMode::Play).build()
    }

    /// An author preview of `flow`.
    pub fn preview(flow: &'a Flow) -> Result<Self, NavigationError> {
        Self::builder(flow, NavigationMode::Preview).build()
    }

    pub fn flow(&self) -> &'a Flow {
        self.flow
    }

    pub fn mode(&self) -> NavigationMode {
        self.mode
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn is_ended(&self) -> bool {
        self.state == NavState::Ended
    }

    pub fn current_ordinal(&self) -> Option<usize> {
        match self.state {
            NavState::Active(ordinal) => Some(ordinal),
            NavState::Ended => None,
        }
    }

    pub fn current_page(&self) -> Option<&'a Page> {
        self.current_ordinal()
            .and_then(|ordinal| self.flow.page(ordinal))
    }

    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    /// Evaluates the current page's rules without moving.
    ///
    /// Returns `None` once the flow has ended.
    pub fn decide(&self) -> Option<Decision> {
        self.current_ordinal()
            .map(|current| self.decide_at(current))
    }

    fn decide_at(&self, current: usize) -> Decision {
        let Some(page) = self.flow.page(current) else {
            return Decision::Fallback { dormant_rule: None };
        };
        let Some((index, rule)) = evaluator::first_match(page, current, &self.answers) else {
            return Decision::Fallback { dormant_rule: None };
        };
        match self.page_index.get(rule.next_page_id.as_str()) {
            Some(&target) => Decision::Branch {
                rule: index,
                target,
                reason: self.reason(current, rule),
            },
            None => {
                warn!(
                    page = %page.id,
                    rule = index,
                    target = %rule.next_page_id,
                    "rule matched but its target page does not exist; ignoring it"
                );
                Decision::Fallback {
                    dormant_rule: Some(index),
                }
            }
        }
    }

    fn reason(&self, page: usize, rule: &PostCondition) -> String {
        self.answers
            .lookup(page, rule.question_index)
            .map(|answer| RuleFormatter::explain(rule, answer))
            .unwrap_or_else(|| RuleFormatter::label(rule))
    }

    /// Describes why a `Branched` transition happened, from the rule and the
    /// answers as they are now. Rules are not evaluated again.
    pub fn explain(&self, transition: &Transition) -> Option<String> {
        let Transition::Branched { from, rule, .. } = *transition else {
            return None;
        };
        let rule = self.flow.page(from)?.post_conditions.get(rule)?;
        Some(self.reason(from, rule))
    }

    /// Moves forward from the current page.
    ///
    /// The first matching rule with a resolvable target wins. Otherwise the
    /// mode decides: preview moves to the next page in order (or stays on the
    /// last one), play ends the flow. Does nothing once the flow has ended.
    pub fn advance(&mut self) -> Transition {
        let NavState::Active(current) = self.state else {
            return Transition::Unchanged;
        };
        match self.decide_at(current) {
            Decision::Branch {
                rule,
                target,
                reason,
            } => {
                debug!(from = current, to = target, rule, %reason, "branching");
                self.history.push(current);
                self.state = NavState::Active(target);
                Transition::Branched {
                    from: current,
                    to: target,
                    rule,
                }
            }
            Decision::Fallback { .. } => self.fall_back(current),
        }
    }

    fn fall_back(&mut self, current: usize) -> Transition {
        match self.mode {
            NavigationMode::Preview => {
                let next = current + 1;
                if next < self.flow.pages.len() {
                    debug!(from = current, to = next, "no rule matched; next page in order");
                    self.history.push(current);
                    self.state = NavState::Active(next);
                    Transition::Sequential {
                        from: current,
                        to: next,
                    }
                } else {
                    Transition::Stayed { at: current }
                }
            }
            NavigationMode::Play => {
                debug!(from = current, "no rule matched; flow ended");
                self.state = NavState::Ended;
                Transition::Ended { from: current }
            }
        }
    }

    /// Undoes the last forward move. Does nothing with an empty history or
    /// once the flow has ended.
    pub fn retreat(&mut self) -> Transition {
        let NavState::Active(current) = self.state else {
            return Transition::Unchanged;
        };
        match self.history.pop() {
            Some(previous) => {
                self.state = NavState::Active(previous);
                Transition::Retreated {
                    from: current,
                    to: previous,
                }
            }
            None => Transition::Unchanged,
        }
    }

    /// Moves the preview cursor straight to a page, leaving the history alone.
    pub fn jump_to(&mut self, ordinal: usize) -> Result<(), NavigationError> {
        if self.mode == NavigationMode::Play {
            return Err(NavigationError::JumpNotAllowed);
        }
        if ordinal >= self.flow.pages.len() {
            return Err(NavigationError::PageOutOfRange(ordinal));
        }
        self.state = NavState::Active(ordinal);
        Ok(())
    }

    /// Stores an answer as given. The value is not checked against the
    /// question's kind.
    pub fn record_answer(
        &mut self,
        page: usize,
        question: usize,
        value: AnswerValue,
    ) -> Option<AnswerValue> {
        self.answers.record(AnswerKey::new(page, question), value)
    }

    /// Parses raw input by the question's declared kind and stores it.
    pub fn record_input(
        &mut self,
        page: usize,
        question: usize,
        raw: &str,
    ) -> Result<&AnswerValue, AnswerError> {
        let value = AnswerValue::parse_for(&self.question(page, question)?.kind, raw)?;
        let key = AnswerKey::new(page, question);
        self.answers.record(key, value);
        self.answers
            .get(key)
            .ok_or(AnswerError::QuestionNotFound { page, question })
    }

    /// Selects or deselects one option of a choice question.
    ///
    /// Multi-answer questions toggle the option in the selected set.
    /// Single-answer multiple-choice and dropdown questions replace the answer
    /// with the option; a single-answer checkbox selects only that option, or
    /// nothing if it was already the selection.
    pub fn toggle_choice(
        &mut self,
        page: usize,
        question: usize,
        option: &str,
    ) -> Result<&AnswerValue, AnswerError> {
        let kind = &self.question(page, question)?.kind;
        let choices = match kind {
            QuestionKind::TekstBlock { .. } => return Err(AnswerError::NotAnswerable),
            other => other.choices().ok_or(AnswerError::NotMultiSelect)?,
        };
        if !choices.iter().any(|choice| choice == option) {
            return Err(AnswerError::UnknownOption(option.to_string()));
        }
        let key = AnswerKey::new(page, question);
        match kind {
            QuestionKind::MultipleChoice {
                allow_multiple: true,
                ..
            }
            | QuestionKind::Checkbox {
                allow_multiple: true,
                ..
            } => {
                self.answers.toggle(key, option);
            }
            QuestionKind::Checkbox { .. } => {
                let already_selected = matches!(
                    self.answers.get(key),
                    Some(AnswerValue::MultiSelect(set)) if set.len() == 1 && set.contains(option)
                );
                let selection = if already_selected {
                    AnswerValue::multi(Vec::<String>::new())
                } else {
                    AnswerValue::multi([option])
                };
                self.answers.record(key, selection);
            }
            _ => {
                self.answers
                    .record(key, AnswerValue::Text(option.to_string()));
            }
        }
        self.answers
            .get(key)
            .ok_or(AnswerError::QuestionNotFound { page, question })
    }

    /// Clears answers and history and starts over on the first page.
    pub fn reset(&mut self) {
        self.answers.clear();
        self.history.clear();
        self.state = NavState::Active(0);
    }

    /// The answers given so far, laid out over the flow's pages.
    pub fn summary(&self) -> CompletionSummary<'_> {
        CompletionSummary::build(self.flow, &self.answers)
    }

    fn question(&self, page: usize, question: usize) -> Result<&'a Question, AnswerError> {
        self.flow
            .page(page)
            .and_then(|p| p.question(question))
            .ok_or(AnswerError::QuestionNotFound { page, question })
    }
}
