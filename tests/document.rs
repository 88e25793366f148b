//! Tests for flow document import and export.
mod common;
use common::*;
use vejviser::document::{FlowDocument, export_file_name, import_flow_with_id};
use vejviser::prelude::*;

#[test]
fn test_import_survey_document() {
    let flow = import_flow_with_id(SURVEY_FLOW_JSON, "new-id").expect("document is valid");

    assert_eq!(flow.id, "new-id");
    assert_eq!(flow.name, "Customer survey");
    assert_eq!(flow.page_count(), 3);

    let first = &flow.pages[0];
    assert_eq!(
        first.questions[0].kind,
        QuestionKind::TekstBlock {
            body: "Thanks for joining.".to_string()
        }
    );
    assert_eq!(first.questions[1].kind, QuestionKind::Number);
    assert_eq!(
        first.post_conditions[0],
        PostCondition::new(1, ">=", 18.0, "page3")
    );

    // A rule without an operator defaults to equality.
    let second = &flow.pages[1];
    assert_eq!(second.post_conditions[0].operator, Operator::Equal);
    assert_eq!(
        second.post_conditions[0].value,
        ConditionValue::set(["Milk", "Sugar"])
    );
    assert_eq!(
        second.questions[1].kind,
        QuestionKind::Dropdown {
            options: vec!["Small".to_string(), "Large".to_string()]
        }
    );

    assert!(flow.pages[2].post_conditions.is_empty());
    assert_eq!(flow.pages[2].questions[1].kind, QuestionKind::Calendar);
}

#[test]
fn test_import_regenerates_id() {
    let first = import_flow(SURVEY_FLOW_JSON).expect("document is valid");
    let second = import_flow(SURVEY_FLOW_JSON).expect("document is valid");

    assert_ne!(first.id, "f-123");
    assert_ne!(first.id, second.id);
}

#[test]
fn test_round_trip_preserves_everything_but_id() {
    let original = import_flow(SURVEY_FLOW_JSON).expect("document is valid");
    let json = export_flow(&original).expect("flow serializes");
    let reimported = import_flow(&json).expect("export is importable");

    assert_ne!(reimported.id, original.id);
    assert_eq!(
        Flow {
            id: original.id.clone(),
            ..reimported
        },
        original
    );
}

#[test]
fn test_authored_flow_round_trip() {
    let mut flow = Flow::new("Authored", "Built through the editing API").expect("name is set");
    flow.add_page();
    flow.add_page();
    flow.add_question(0, Question::number("Score")).expect("valid question");
    flow.add_post_condition(0, PostCondition::new(0, ">=", 7.5, "page2"))
        .expect("valid rule");
    assert!(
        flow.add_post_condition(0, PostCondition::new(0, ">", f64::INFINITY, "page2"))
            .is_err()
    );

    let reimported =
        import_flow(&export_flow(&flow).expect("flow serializes")).expect("export is importable");
    assert_eq!(
        Flow {
            id: flow.id.clone(),
            ..reimported
        },
        flow
    );
}

#[test]
fn test_export_keeps_id_and_writes_operator() {
    let flow = create_abc_flow();
    let json = export_flow(&flow).expect("flow serializes");
    let value: serde_json::Value = serde_json::from_str(&json).expect("export is JSON");

    assert_eq!(value["id"], "abc");
    let condition = &value["pages"][0]["postConditions"][0]["condition"];
    assert_eq!(condition["operator"], ">");
    assert_eq!(condition["questionIndex"], 0);
    assert_eq!(condition["value"], 10.0);
    assert_eq!(value["pages"][0]["postConditions"][0]["nextPageId"], "C");
    assert_eq!(value["pages"][0]["questions"][0]["inputType"], "number");
}

#[test]
fn test_unknown_operator_survives_round_trip() {
    let json = r#"{
        "id": "x", "name": "n", "description": "d",
        "pages": [{
            "id": "p", "name": "P",
            "questions": [{ "text": "q", "inputType": "number" }],
            "postConditions": [
                { "condition": { "questionIndex": 0, "operator": "!=", "value": 1 }, "nextPageId": "p" }
            ]
        }]
    }"#;
    let flow = import_flow(json).expect("unknown operators are kept");
    let operator = &flow.pages[0].post_conditions[0].operator;
    assert_eq!(operator, &Operator::Unknown("!=".to_string()));

    let reimported = import_flow(&export_flow(&flow).expect("flow serializes"))
        .expect("export is importable");
    assert_eq!(&reimported.pages[0].post_conditions[0].operator, operator);
}

#[test]
fn test_empty_pages_are_accepted() {
    let flow = import_flow(r#"{"id": "x", "name": "n", "description": "", "pages": []}"#)
        .expect("an empty page list is valid");
    assert!(flow.is_empty());
}

#[test]
fn test_invalid_json_is_rejected() {
    assert!(matches!(
        import_flow("{ not json"),
        Err(ImportError::InvalidJson(_))
    ));
}

#[test]
fn test_shape_validation() {
    let cases = [
        (r#"[]"#, "document"),
        (r#"{"name": "n", "description": "d", "pages": []}"#, "id"),
        (r#"{"id": 7, "name": "n", "description": "d", "pages": []}"#, "id"),
        (r#"{"id": "x", "description": "d", "pages": []}"#, "name"),
        (r#"{"id": "x", "name": "n", "pages": []}"#, "description"),
        (r#"{"id": "x", "name": "n", "description": "d"}"#, "pages"),
        (r#"{"id": "x", "name": "n", "description": "d", "pages": {}}"#, "pages"),
    ];
    for (json, expected_field) in cases {
        match import_flow(json) {
            Err(ImportError::InvalidShape { field, .. }) => {
                assert_eq!(field, expected_field, "document: {}", json)
            }
            other => panic!("expected a shape error for {}, got {:?}", json, other),
        }
    }
}

#[test]
fn test_invalid_page_reports_index() {
    let json = r#"{
        "id": "x", "name": "n", "description": "d",
        "pages": [
            { "id": "ok", "name": "Ok" },
            { "name": "Missing id" }
        ]
    }"#;
    match import_flow(json) {
        Err(ImportError::InvalidPage { page_index, .. }) => assert_eq!(page_index, 1),
        other => panic!("expected a page error, got {:?}", other),
    }
}

#[test]
fn test_unknown_input_type_is_rejected() {
    let json = r#"{
        "id": "x", "name": "n", "description": "d",
        "pages": [{
            "id": "p", "name": "P",
            "questions": [
                { "text": "ok", "inputType": "text" },
                { "text": "Slider", "inputType": "slider" }
            ]
        }]
    }"#;
    assert_eq!(
        import_flow(json).err(),
        Some(ImportError::UnknownInputType {
            page_id: "p".to_string(),
            question_index: 1,
            input_type: "slider".to_string(),
        })
    );
}

#[test]
fn test_legacy_text_block_body_in_placeholder() {
    let json = r#"{
        "id": "x", "name": "n", "description": "d",
        "pages": [{
            "id": "p", "name": "P",
            "questions": [{ "text": "Note", "inputType": "tekst-block", "placeholder": "Old body" }]
        }]
    }"#;
    let flow = import_flow(json).expect("document is valid");
    assert_eq!(
        flow.pages[0].questions[0],
        Question::tekst_block("Note", "Old body")
    );
}

#[test]
fn test_empty_text_block_body_falls_back_to_placeholder() {
    let json = r#"{
        "id": "x", "name": "n", "description": "d",
        "pages": [{
            "id": "p", "name": "P",
            "questions": [
                { "text": "Note", "inputType": "tekst-block", "body": "", "placeholder": "Old body" },
                { "text": "Empty", "inputType": "tekst-block", "body": "" }
            ]
        }]
    }"#;
    let flow = import_flow(json).expect("document is valid");
    assert_eq!(
        flow.pages[0].questions[0],
        Question::tekst_block("Note", "Old body")
    );
    assert_eq!(flow.pages[0].questions[1], Question::tekst_block("Empty", ""));
}

#[test]
fn test_duplicate_page_ids_are_imported_and_reported() {
    let json = r#"{
        "id": "x", "name": "n", "description": "d",
        "pages": [
            { "id": "p", "name": "First" },
            { "id": "q", "name": "Other" },
            { "id": "p", "name": "Second" }
        ]
    }"#;
    let flow = import_flow(json).expect("duplicates do not block import");
    assert_eq!(flow.page_count(), 3);
    assert_eq!(flow.duplicate_page_ids(), ["p"]);
    assert_eq!(flow.page_ordinal("p"), Some(0));
}

#[test]
fn test_into_flow_keeps_document_id() {
    let document: FlowDocument =
        serde_json::from_str(SURVEY_FLOW_JSON).expect("document deserializes");
    let flow = document.into_flow().expect("document converts");
    assert_eq!(flow.id, "f-123");
}

#[test]
fn test_export_file_name() {
    let mut flow = create_abc_flow();
    assert_eq!(export_file_name(&flow), "ABC.json");
    flow.name = "  ".to_string();
    assert_eq!(export_file_name(&flow), "flow.json");
}
