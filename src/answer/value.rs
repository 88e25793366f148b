use crate::error::AnswerError;
use crate::flow::QuestionKind;
use itertools::Itertools;
use std::collections::BTreeSet;
use std::fmt;

/// A respondent's answer to one question.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerValue {
    Number(f64),
    Text(String),
    MultiSelect(BTreeSet<String>),
}

impl AnswerValue {
    /// Builds a multi-select answer from any iterator of options.
    pub fn multi<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AnswerValue::MultiSelect(options.into_iter().map(Into::into).collect())
    }

    /// Parses raw UI input according to the question's declared kind.
    ///
    /// The type of the answer always follows the question, never the shape of
    /// the string: `"123"` typed into a text question stays text.
    /// Multi-select input is a comma-separated list of options.
    pub fn parse_for(kind: &QuestionKind, raw: &str) -> Result<Self, AnswerError> {
        match kind {
            QuestionKind::Number => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(AnswerValue::Number)
                .ok_or_else(|| AnswerError::InvalidNumber(raw.to_string())),
            QuestionKind::Text { .. } | QuestionKind::Calendar => {
                Ok(AnswerValue::Text(raw.to_string()))
            }
            QuestionKind::Dropdown { options } => {
                Self::single_choice(options, raw.trim()).map(AnswerValue::Text)
            }
            QuestionKind::MultipleChoice {
                answers,
                allow_multiple,
            } => {
                if *allow_multiple {
                    Self::choice_set(answers, raw).map(AnswerValue::MultiSelect)
                } else {
                    Self::single_choice(answers, raw.trim()).map(AnswerValue::Text)
                }
            }
            QuestionKind::Checkbox {
                options,
                allow_multiple,
            } => {
                let selected = Self::choice_set(options, raw)?;
                if !allow_multiple && selected.len() > 1 {
                    return Err(AnswerError::NotMultiSelect);
                }
                Ok(AnswerValue::MultiSelect(selected))
            }
            QuestionKind::TekstBlock { .. } => Err(AnswerError::NotAnswerable),
        }
    }

    fn single_choice(choices: &[String], raw: &str) -> Result<String, AnswerError> {
        choices
            .iter()
            .find(|choice| choice.as_str() == raw)
            .cloned()
            .ok_or_else(|| AnswerError::UnknownOption(raw.to_string()))
    }

    fn choice_set(choices: &[String], raw: &str) -> Result<BTreeSet<String>, AnswerError> {
        raw.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| Self::single_choice(choices, part))
            .collect()
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Number(n) => write!(f, "{}", format_number(*n)),
            AnswerValue::Text(s) => write!(f, "{}", s),
            AnswerValue::MultiSelect(set) => write!(f, "{}", set.iter().join(", ")),
        }
    }
}

/// Formats a number without a trailing `.0` for whole values.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
