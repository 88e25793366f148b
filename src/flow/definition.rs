use crate::answer::value::format_number;
use crate::error::AuthoringError;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A complete branching questionnaire: metadata plus ordered pages.
///
/// Page ids are unique within a flow. A freshly created flow has no pages;
/// navigation cannot start until `ensure_page` (or `add_page`) has run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Flow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub pages: Vec<Page>,
}

impl Flow {
    pub fn page(&self, ordinal: usize) -> Option<&Page> {
        self.pages.get(ordinal)
    }

    /// Resolves a page id to its ordinal.
    pub fn page_ordinal(&self, id: &str) -> Option<usize> {
        self.pages.iter().position(|page| page.id == id)
    }

    /// Page ids used by more than one page, each listed once.
    ///
    /// Navigation resolves a duplicated id to its first page; the later pages
    /// can only be reached in order.
    pub fn duplicate_page_ids(&self) -> Vec<&str> {
        self.pages
            .iter()
            .map(|page| page.id.as_str())
            .duplicates()
            .collect()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// One screen of questions plus its outgoing branching rules.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub id: String,
    pub name: String,
    pub questions: Vec<Question>,
    /// Evaluated in declaration order; the first matching rule wins.
    pub post_conditions: Vec<PostCondition>,
}

impl Page {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            questions: Vec::new(),
            post_conditions: Vec::new(),
        }
    }

    pub fn with_question(mut self, question: Question) -> Self {
        self.questions.push(question);
        self
    }

    pub fn with_rule(mut self, rule: PostCondition) -> Self {
        self.post_conditions.push(rule);
        self
    }

    pub fn question(&self, ordinal: usize) -> Option<&Question> {
        self.questions.get(ordinal)
    }
}

/// One input prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub text: String,
    pub kind: QuestionKind,
}

/// The input kind of a question, carrying only the fields that kind uses.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionKind {
    Number,
    Text {
        placeholder: Option<String>,
    },
    MultipleChoice {
        answers: Vec<String>,
        allow_multiple: bool,
    },
    Checkbox {
        options: Vec<String>,
        allow_multiple: bool,
    },
    Calendar,
    Dropdown {
        options: Vec<String>,
    },
    /// Non-interactive annotation with a title (`Question::text`) and a body.
    TekstBlock {
        body: String,
    },
}

impl QuestionKind {
    /// The `inputType` tag used by flow documents.
    pub fn input_type(&self) -> &'static str {
        match self {
            QuestionKind::Number => "number",
            QuestionKind::Text { .. } => "text",
            QuestionKind::MultipleChoice { .. } => "multiple-choice",
            QuestionKind::Checkbox { .. } => "checkbox",
            QuestionKind::Calendar => "calendar",
            QuestionKind::Dropdown { .. } => "dropdown",
            QuestionKind::TekstBlock { .. } => "tekst-block",
        }
    }

    /// The selectable options of a choice question.
    pub fn choices(&self) -> Option<&[String]> {
        match self {
            QuestionKind::MultipleChoice { answers, .. } => Some(answers),
            QuestionKind::Checkbox { options, .. } | QuestionKind::Dropdown { options } => {
                Some(options)
            }
            _ => None,
        }
    }

    pub fn is_answerable(&self) -> bool {
        !matches!(self, QuestionKind::TekstBlock { .. })
    }
}

impl Question {
    pub fn new(text: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn number(text: impl Into<String>) -> Self {
        Self::new(text, QuestionKind::Number)
    }

    pub fn text(text: impl Into<String>, placeholder: Option<String>) -> Self {
        Self::new(text, QuestionKind::Text { placeholder })
    }

    pub fn calendar(text: impl Into<String>) -> Self {
        Self::new(text, QuestionKind::Calendar)
    }

    pub fn multiple_choice<S: Into<String>>(
        text: impl Into<String>,
        answers: impl IntoIterator<Item = S>,
        allow_multiple: bool,
    ) -> Self {
        Self::new(
            text,
            QuestionKind::MultipleChoice {
                answers: answers.into_iter().map(Into::into).collect(),
                allow_multiple,
            },
        )
    }

    pub fn checkbox<S: Into<String>>(
        text: impl Into<String>,
        options: impl IntoIterator<Item = S>,
        allow_multiple: bool,
    ) -> Self {
        Self::new(
            text,
            QuestionKind::Checkbox {
                options: options.into_iter().map(Into::into).collect(),
                allow_multiple,
            },
        )
    }

    pub fn dropdown<S: Into<String>>(
        text: impl Into<String>,
        options: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::new(
            text,
            QuestionKind::Dropdown {
                options: options.into_iter().map(Into::into).collect(),
            },
        )
    }

    pub fn tekst_block(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(title, QuestionKind::TekstBlock { body: body.into() })
    }

    pub fn is_answerable(&self) -> bool {
        self.kind.is_answerable()
    }

    /// Checks the authoring rules for a question of this kind.
    pub fn validate(&self) -> Result<(), AuthoringError> {
        if self.text.trim().is_empty() {
            return Err(AuthoringError::EmptyQuestionText);
        }
        match &self.kind {
            QuestionKind::MultipleChoice { answers: choices, .. }
            | QuestionKind::Dropdown { options: choices } => {
                if choices.iter().filter(|c| !c.trim().is_empty()).count() < 2 {
                    return Err(AuthoringError::TooFewOptions {
                        input_type: self.kind.input_type(),
                    });
                }
            }
            QuestionKind::TekstBlock { body } if body.trim().is_empty() => {
                return Err(AuthoringError::EmptyTextBlock);
            }
            _ => {}
        }
        Ok(())
    }
}

/// Comparison operator of a branching rule.
///
/// `Unknown` keeps an unrecognised operator string from a document so that it
/// survives a round trip; it never matches anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operator {
    #[default]
    Equal,
    GreaterThan,
    SmallerThan,
    GreaterThanOrEqual,
    SmallerThanOrEqual,
    Unknown(String),
}

impl Operator {
    pub fn symbol(&self) -> &str {
        match self {
            Operator::Equal => "=",
            Operator::GreaterThan => ">",
            Operator::SmallerThan => "<",
            Operator::GreaterThanOrEqual => ">=",
            Operator::SmallerThanOrEqual => "<=",
            Operator::Unknown(raw) => raw,
        }
    }
}

impl From<&str> for Operator {
    fn from(raw: &str) -> Self {
        match raw.trim() {
            "=" | "==" => Operator::Equal,
            ">" => Operator::GreaterThan,
            "<" => Operator::SmallerThan,
            ">=" => Operator::GreaterThanOrEqual,
            "<=" => Operator::SmallerThanOrEqual,
            _ => Operator::Unknown(raw.to_string()),
        }
    }
}

impl From<String> for Operator {
    fn from(raw: String) -> Self {
        Operator::from(raw.as_str())
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.symbol().to_string()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// The comparison value of a branching rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    Number(f64),
    Text(String),
    /// Every listed option must be selected for the rule to match.
    Set(BTreeSet<String>),
}

impl ConditionValue {
    pub fn set<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ConditionValue::Set(values.into_iter().map(Into::into).collect())
    }

    /// True for an empty text or an empty set, which an author cannot save.
    pub fn is_empty(&self) -> bool {
        match self {
            ConditionValue::Number(_) => false,
            ConditionValue::Text(s) => s.is_empty(),
            ConditionValue::Set(set) => set.is_empty(),
        }
    }
}

impl From<f64> for ConditionValue {
    fn from(n: f64) -> Self {
        ConditionValue::Number(n)
    }
}

impl From<&str> for ConditionValue {
    fn from(s: &str) -> Self {
        ConditionValue::Text(s.to_string())
    }
}

impl fmt::Display for ConditionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionValue::Number(n) => write!(f, "{}", format_number(*n)),
            ConditionValue::Text(s) => write!(f, "{}", s),
            ConditionValue::Set(set) => write!(f, "{}", set.iter().join(", ")),
        }
    }
}

/// A branching rule on a page: if the answer to `question_index` (on the same
/// page) satisfies `operator value`, continue at `next_page_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct PostCondition {
    pub question_index: usize,
    pub operator: Operator,
    pub value: ConditionValue,
    pub next_page_id: String,
}

impl PostCondition {
    pub fn new(
        question_index: usize,
        operator: impl Into<Operator>,
        value: impl Into<ConditionValue>,
        next_page_id: impl Into<String>,
    ) -> Self {
        Self {
            question_index,
            operator: operator.into(),
            value: value.into(),
            next_page_id: next_page_id.into(),
        }
    }
}
