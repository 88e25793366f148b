use crate::answer::{AnswerStore, AnswerValue};
use crate::flow::Flow;
use std::fmt;

/// What the respondent answered, page by page, for the end-of-flow screen.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSummary<'a> {
    pub pages: Vec<PageSummary<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageSummary<'a> {
    pub ordinal: usize,
    pub name: &'a str,
    pub entries: Vec<AnswerEntry<'a>>,
}

/// One answerable question and its answer, if any. Text blocks are left out.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerEntry<'a> {
    pub question: usize,
    pub text: &'a str,
    pub answer: Option<&'a AnswerValue>,
}

impl<'a> CompletionSummary<'a> {
    pub fn build(flow: &'a Flow, answers: &'a AnswerStore) -> Self {
        let pages = flow
            .pages
            .iter()
            .enumerate()
            .map(|(ordinal, page)| PageSummary {
                ordinal,
                name: &page.name,
                entries: page
                    .questions
                    .iter()
                    .enumerate()
                    .filter(|(_, question)| question.is_answerable())
                    .map(|(index, question)| AnswerEntry {
                        question: index,
                        text: &question.text,
                        answer: answers.lookup(ordinal, index),
                    })
                    .collect(),
            })
            .collect();
        Self { pages }
    }

    pub fn answered_count(&self) -> usize {
        self.pages
            .iter()
            .flat_map(|page| &page.entries)
            .filter(|entry| entry.answer.is_some())
            .count()
    }
}

impl fmt::Display for CompletionSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for page in &self.pages {
            writeln!(f, "{}", page.name)?;
            for entry in &page.entries {
                match entry.answer {
                    Some(answer) => writeln!(f, "  - {}: {}", entry.text, answer)?,
                    None => writeln!(f, "  - {}: (no answer)", entry.text)?,
                }
            }
        }
        Ok(())
    }
}
