//! Integration tests for Vejviser
//!
//! End-to-end tests that take a flow document from import through storage
//! and a complete play-through.
//!
mod common;
use common::*;
use vejviser::prelude::*;

#[test]
fn test_import_store_and_play_survey() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut repository = JsonFileFlowRepository::new(dir.path().join("flows.json"));

    let flow = import_flow(SURVEY_FLOW_JSON).expect("document is valid");
    let id = flow.id.clone();
    repository.put(flow).expect("flow is stored");

    let flow = repository
        .get(&id)
        .expect("store is readable")
        .expect("flow was stored");
    let mut navigator = Navigator::play(&flow).expect("flow has pages");

    // Adult respondents skip the second page.
    navigator.record_input(0, 1, "34").expect("number question");
    navigator.record_input(0, 2, "Coffee").expect("known option");
    assert_eq!(
        navigator.advance(),
        Transition::Branched { from: 0, to: 2, rule: 0 }
    );

    navigator.record_input(2, 0, "All good").expect("text question");
    assert_eq!(navigator.advance(), Transition::Ended { from: 2 });

    let summary = navigator.summary();
    assert_eq!(summary.answered_count(), 3);
    let rendered = summary.to_string();
    assert!(rendered.contains("  - Age: 34"));
    assert!(rendered.contains("  - Size: (no answer)"));
}

#[test]
fn test_preview_walks_every_page_of_survey() {
    let flow = import_flow(SURVEY_FLOW_JSON).expect("document is valid");
    let mut navigator = Navigator::preview(&flow).expect("flow has pages");

    navigator.record_input(0, 1, "12").expect("number question");
    assert_eq!(navigator.advance(), Transition::Sequential { from: 0, to: 1 });

    navigator.toggle_choice(1, 0, "Milk").expect("known option");
    navigator.toggle_choice(1, 0, "Sugar").expect("known option");
    assert_eq!(
        navigator.advance(),
        Transition::Branched { from: 1, to: 2, rule: 0 }
    );
    assert_eq!(navigator.advance(), Transition::Stayed { at: 2 });
    assert_eq!(navigator.history().as_slice(), &[0, 1]);

    navigator.retreat();
    navigator.retreat();
    assert_eq!(navigator.state(), NavState::Active(0));
    assert_eq!(navigator.advance(), Transition::Sequential { from: 0, to: 1 });
}

#[test]
fn test_edit_then_replay() {
    let mut flow = create_abc_flow();
    flow.add_post_condition(1, PostCondition::new(0, "=", "skip", "A"))
        .expect("rule is valid");

    let mut repository = InMemoryFlowRepository::new();
    repository.put(flow.clone()).expect("flow is stored");

    let mut navigator = Navigator::preview(&flow).expect("flow has pages");
    navigator.record_answer(0, 0, AnswerValue::Number(1.0));
    navigator.advance();
    navigator.record_input(1, 0, "skip").expect("text question");
    assert_eq!(
        navigator.advance(),
        Transition::Branched { from: 1, to: 0, rule: 0 }
    );
    assert_eq!(navigator.history().as_slice(), &[0, 1]);
}
