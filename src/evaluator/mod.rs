//! The condition evaluator.
//!
//! Everything here is a pure function of its arguments: no state, no I/O, and
//! no failure mode. It can be called from any number of threads at once.

use crate::answer::{AnswerStore, AnswerValue};
use crate::flow::{ConditionValue, Operator, Page, PostCondition};

/// Tests one respondent answer against a rule's comparison value.
///
/// * A multi-select answer matches a text value when the value is selected,
///   and a set value when every element of the set is selected. The operator
///   is ignored for multi-select answers.
/// * Two numbers are compared with the operator. `Operator::Unknown` never
///   matches.
/// * Everything else matches only on structural equality, whatever the
///   operator. Text is never coerced to a number.
pub fn evaluate(operator: &Operator, answer: &AnswerValue, condition: &ConditionValue) -> bool {
    match answer {
        AnswerValue::MultiSelect(selected) => match condition {
            ConditionValue::Text(value) => selected.contains(value),
            ConditionValue::Set(required) => required.is_subset(selected),
            ConditionValue::Number(_) => false,
        },
        AnswerValue::Number(a) => match condition {
            ConditionValue::Number(b) => compare(operator, *a, *b),
            ConditionValue::Text(_) | ConditionValue::Set(_) => false,
        },
        AnswerValue::Text(a) => match condition {
            ConditionValue::Text(b) => a == b,
            ConditionValue::Number(_) | ConditionValue::Set(_) => false,
        },
    }
}

fn compare(operator: &Operator, a: f64, b: f64) -> bool {
    match operator {
        Operator::Equal => a == b,
        Operator::GreaterThan => a > b,
        Operator::SmallerThan => a < b,
        Operator::GreaterThanOrEqual => a >= b,
        Operator::SmallerThanOrEqual => a <= b,
        Operator::Unknown(_) => false,
    }
}

/// Tests a rule of the page at `page_ordinal` against the answer store.
///
/// An unanswered question, including one past the end of the page, never
/// matches.
pub fn rule_matches(rule: &PostCondition, page_ordinal: usize, answers: &AnswerStore) -> bool {
    answers
        .lookup(page_ordinal, rule.question_index)
        .is_some_and(|answer| evaluate(&rule.operator, answer, &rule.value))
}

/// Returns the first rule of `page` that matches, with its index.
///
/// Later rules are not consulted once one matches.
pub fn first_match<'p>(
    page: &'p Page,
    page_ordinal: usize,
    answers: &AnswerStore,
) -> Option<(usize, &'p PostCondition)> {
    page.post_conditions
        .iter()
        .enumerate()
        .find(|(_, rule)| rule_matches(rule, page_ordinal, answers))
}
