//! The JSON shape of a flow document.
//!
//! These structs follow the exported file format field for field (camelCase,
//! flat questions tagged by `inputType`, rules wrapped in a `condition`
//! object). They are only a transport layer; the engine works on
//! [`crate::flow::Flow`].

use crate::error::ImportError;
use crate::flow::{
    ConditionValue, Flow, IntoFlow, Operator, Page, PostCondition, Question, QuestionKind,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowDocument {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub pages: Vec<PageDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDocument {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub questions: Vec<QuestionDocument>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub post_conditions: Vec<PostConditionDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDocument {
    pub text: String,
    pub input_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_multiple_answers: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostConditionDocument {
    pub condition: ConditionDocument,
    pub next_page_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionDocument {
    pub question_index: usize,
    pub value: ConditionValue,
    /// Absent in older documents; treated as `=`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<Operator>,
}

impl IntoFlow for FlowDocument {
    fn into_flow(self) -> Result<Flow, ImportError> {
        let pages = self
            .pages
            .into_iter()
            .map(PageDocument::into_page)
            .collect::<Result<_, _>>()?;
        Ok(Flow {
            id: self.id,
            name: self.name,
            description: self.description,
            pages,
        })
    }
}

impl PageDocument {
    fn into_page(self) -> Result<Page, ImportError> {
        let questions = self
            .questions
            .into_iter()
            .enumerate()
            .map(|(index, question)| {
                question.into_question().map_err(|input_type| {
                    ImportError::UnknownInputType {
                        page_id: self.id.clone(),
                        question_index: index,
                        input_type,
                    }
                })
            })
            .collect::<Result<_, _>>()?;
        let post_conditions = self
            .post_conditions
            .into_iter()
            .map(|rule| PostCondition {
                question_index: rule.condition.question_index,
                operator: rule.condition.operator.unwrap_or_default(),
                value: rule.condition.value,
                next_page_id: rule.next_page_id,
            })
            .collect();
        Ok(Page {
            id: self.id,
            name: self.name,
            questions,
            post_conditions,
        })
    }
}

impl QuestionDocument {
    /// Converts to a typed question, or returns the unknown `inputType`.
    fn into_question(self) -> Result<Question, String> {
        let allow_multiple = self.allow_multiple_answers.unwrap_or(false);
        let kind = match self.input_type.as_str() {
            "number" => QuestionKind::Number,
            "text" => QuestionKind::Text {
                placeholder: self.placeholder,
            },
            "multiple-choice" => QuestionKind::MultipleChoice {
                answers: self.answers.unwrap_or_default(),
                allow_multiple,
            },
            "checkbox" => QuestionKind::Checkbox {
                options: self.options.unwrap_or_default(),
                allow_multiple,
            },
            "calendar" => QuestionKind::Calendar,
            "dropdown" => QuestionKind::Dropdown {
                options: self.options.unwrap_or_default(),
            },
            // Older text blocks kept their body in `placeholder`.
            "tekst-block" => QuestionKind::TekstBlock {
                body: self
                    .body
                    .filter(|body| !body.is_empty())
                    .or(self.placeholder)
                    .unwrap_or_default(),
            },
            _ => return Err(self.input_type),
        };
        Ok(Question {
            text: self.text,
            kind,
        })
    }
}

impl From<&Flow> for FlowDocument {
    fn from(flow: &Flow) -> Self {
        Self {
            id: flow.id.clone(),
            name: flow.name.clone(),
            description: flow.description.clone(),
            pages: flow.pages.iter().map(PageDocument::from).collect(),
        }
    }
}

impl From<&Page> for PageDocument {
    fn from(page: &Page) -> Self {
        Self {
            id: page.id.clone(),
            name: page.name.clone(),
            questions: page.questions.iter().map(QuestionDocument::from).collect(),
            post_conditions: page
                .post_conditions
                .iter()
                .map(|rule| PostConditionDocument {
                    condition: ConditionDocument {
                        question_index: rule.question_index,
                        value: rule.value.clone(),
                        operator: Some(rule.operator.clone()),
                    },
                    next_page_id: rule.next_page_id.clone(),
                })
                .collect(),
        }
    }
}

impl From<&Question> for QuestionDocument {
    fn from(question: &Question) -> Self {
        let mut doc = QuestionDocument {
            text: question.text.clone(),
            input_type: question.kind.input_type().to_string(),
            placeholder: None,
            body: None,
            answers: None,
            allow_multiple_answers: None,
            options: None,
        };
        match &question.kind {
            QuestionKind::Number | QuestionKind::Calendar => {}
            QuestionKind::Text { placeholder } => doc.placeholder = placeholder.clone(),
            QuestionKind::MultipleChoice {
                answers,
                allow_multiple,
            } => {
                doc.answers = Some(answers.clone());
                doc.allow_multiple_answers = Some(*allow_multiple);
            }
            QuestionKind::Checkbox {
                options,
                allow_multiple,
            } => {
                doc.options = Some(options.clone());
                doc.allow_multiple_answers = Some(*allow_multiple);
            }
            QuestionKind::Dropdown { options } => doc.options = Some(options.clone()),
            QuestionKind::TekstBlock { body } => doc.body = Some(body.clone()),
        }
        doc
    }
}
