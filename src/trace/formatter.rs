use crate::answer::AnswerValue;
use crate::flow::{ConditionValue, PostCondition};

/// Formats branching rules and navigation decisions into human-readable strings.
pub struct RuleFormatter;

impl RuleFormatter {
    /// A short label for a rule, as shown on a visualization edge.
    ///
    /// Question numbers are 1-based.
    pub fn label(rule: &PostCondition) -> String {
        format!(
            "question {} {} \"{}\"",
            rule.question_index + 1,
            rule.operator,
            rule.value
        )
    }

    /// Explains why a rule matched, quoting the answer it matched against.
    pub fn explain(rule: &PostCondition, answer: &AnswerValue) -> String {
        let condition = match (answer, &rule.value) {
            (AnswerValue::MultiSelect(_), ConditionValue::Set(_)) => {
                format!("includes all of [{}]", rule.value)
            }
            (AnswerValue::MultiSelect(_), _) => format!("includes {}", rule.value),
            _ => format!("{} {}", rule.operator, Self::format_value(&rule.value)),
        };
        format!(
            "question {} (was {}) {} -> {}",
            rule.question_index + 1,
            Self::format_answer(answer),
            condition,
            rule.next_page_id
        )
    }

    fn format_answer(answer: &AnswerValue) -> String {
        match answer {
            AnswerValue::Text(s) => format!("\"{}\"", s),
            AnswerValue::MultiSelect(_) => format!("[{}]", answer),
            AnswerValue::Number(_) => answer.to_string(),
        }
    }

    fn format_value(value: &ConditionValue) -> String {
        match value {
            ConditionValue::Text(s) => format!("\"{}\"", s),
            ConditionValue::Set(_) => format!("[{}]", value),
            ConditionValue::Number(_) => value.to_string(),
        }
    }
}
