//! Common test utilities for building flows and flow documents.
use vejviser::prelude::*;

/// Pages A, B, C. Page A asks for a number and branches to C when it is
/// greater than 10. B and C have no rules.
#[allow(dead_code)]
pub fn create_abc_flow() -> Flow {
    Flow {
        id: "abc".to_string(),
        name: "ABC".to_string(),
        description: "Branch past B for large numbers".to_string(),
        pages: vec![
            Page::new("A", "Page A")
                .with_question(Question::number("How many?"))
                .with_rule(PostCondition::new(0, ">", 10.0, "C")),
            Page::new("B", "Page B").with_question(Question::text("Why so few?", None)),
            Page::new("C", "Page C").with_question(Question::text("Why so many?", None)),
        ],
    }
}

/// A color picker whose rules test set membership.
///
/// * Rule 0: `Red` selected -> `red`
/// * Rule 1: both `Blue` and `Green` selected -> `teal`
#[allow(dead_code)]
pub fn create_color_flow() -> Flow {
    Flow {
        id: "colors".to_string(),
        name: "Colors".to_string(),
        description: String::new(),
        pages: vec![
            Page::new("pick", "Pick")
                .with_question(Question::tekst_block("Welcome", "Pick your colors below."))
                .with_question(Question::checkbox(
                    "Colors",
                    ["Red", "Green", "Blue"],
                    true,
                ))
                .with_rule(PostCondition::new(1, "=", "Red", "red"))
                .with_rule(PostCondition::new(
                    1,
                    "=",
                    ConditionValue::set(["Blue", "Green"]),
                    "teal",
                )),
            Page::new("red", "Red"),
            Page::new("teal", "Teal"),
        ],
    }
}

/// Page `start` has two rules that both match any answer of 1. The first
/// points at a page that does not exist, the second at `second`.
#[allow(dead_code)]
pub fn create_dangling_flow() -> Flow {
    Flow {
        id: "dangling".to_string(),
        name: "Dangling".to_string(),
        description: String::new(),
        pages: vec![
            Page::new("start", "Start")
                .with_question(Question::number("Pick 1"))
                .with_rule(PostCondition::new(0, "=", 1.0, "deleted-page"))
                .with_rule(PostCondition::new(0, ">=", 1.0, "second")),
            Page::new("next", "Next"),
            Page::new("second", "Second"),
        ],
    }
}

/// A flow document as exported by the authoring tool. The rule on page 2 has
/// no `operator` field.
#[allow(dead_code)]
pub const SURVEY_FLOW_JSON: &str = r#"
{
    "id": "f-123",
    "name": "Customer survey",
    "description": "Short satisfaction survey",
    "pages": [
        {
            "id": "page1",
            "name": "Side 1",
            "questions": [
                { "text": "Intro", "inputType": "tekst-block", "body": "Thanks for joining." },
                { "text": "Age", "inputType": "number" },
                { "text": "Favourite", "inputType": "multiple-choice", "answers": ["Tea", "Coffee"], "allowMultipleAnswers": false }
            ],
            "postConditions": [
                { "condition": { "questionIndex": 1, "operator": ">=", "value": 18 }, "nextPageId": "page3" }
            ]
        },
        {
            "id": "page2",
            "name": "Side 2",
            "questions": [
                { "text": "Extras", "inputType": "checkbox", "options": ["Milk", "Sugar"], "allowMultipleAnswers": true },
                { "text": "Size", "inputType": "dropdown", "options": ["Small", "Large"] }
            ],
            "postConditions": [
                { "condition": { "questionIndex": 0, "value": ["Milk", "Sugar"] }, "nextPageId": "page3" }
            ]
        },
        {
            "id": "page3",
            "name": "Side 3",
            "questions": [
                { "text": "Comments", "inputType": "text", "placeholder": "Anything else?" },
                { "text": "Visit date", "inputType": "calendar" }
            ]
        }
    ]
}
"#;

/// Builds a one-page flow around a single question.
#[allow(dead_code)]
pub fn single_question_flow(question: Question) -> Flow {
    Flow {
        id: "single".to_string(),
        name: "Single".to_string(),
        description: String::new(),
        pages: vec![Page::new("only", "Only").with_question(question)],
    }
}
