//! # Vejviser - Conditional Page Navigation for Branching Questionnaires
//!
//! **Vejviser** decides which page of a multi-page questionnaire ("flow") a
//! respondent sees next. Each page carries an ordered list of branching rules
//! ("post-conditions") that compare one of the page's answers against a value
//! and name the page to continue on. The first rule that matches wins.
//!
//! ## Core Workflow
//!
//! 1.  **Load a Flow**: Import a JSON flow document with [`document::import_flow`],
//!     fetch one from a [`repository::FlowRepository`], or build one in code.
//!     Other formats plug in through the [`flow::IntoFlow`] trait.
//! 2.  **Start a Session**: Create a [`navigation::Navigator`] in either
//!     [`NavigationMode::Play`](navigation::NavigationMode::Play) (respondent;
//!     the flow ends when no rule matches) or
//!     [`NavigationMode::Preview`](navigation::NavigationMode::Preview)
//!     (author; falls back to the next page in order).
//! 3.  **Record Answers and Navigate**: Record answers for the current page and
//!     call `advance()` / `retreat()`. Every call returns the
//!     [`navigation::Transition`] it performed.
//! 4.  **Finish**: Once the session has ended, `summary()` lists every answer
//!     by page.
//!
//! ## Quick Start
//!
//! ```rust
//! use vejviser::prelude::*;
//!
//! let flow = Flow {
//!     id: "intake".to_string(),
//!     name: "Intake".to_string(),
//!     description: String::new(),
//!     pages: vec![
//!         Page::new("A", "Age")
//!             .with_question(Question::number("How old are you?"))
//!             .with_rule(PostCondition::new(0, ">", 10.0, "C")),
//!         Page::new("B", "Young"),
//!         Page::new("C", "Older"),
//!     ],
//! };
//!
//! let mut navigator = Navigator::play(&flow).expect("flow has pages");
//! navigator.record_answer(0, 0, AnswerValue::Number(15.0));
//!
//! let transition = navigator.advance();
//! assert_eq!(transition, Transition::Branched { from: 0, to: 2, rule: 0 });
//! assert_eq!(navigator.history().as_slice(), &[0]);
//!
//! // No rule on page C: a play-through ends here.
//! assert_eq!(navigator.advance(), Transition::Ended { from: 2 });
//! println!("{}", navigator.summary());
//! ```

pub mod answer;
pub mod document;
pub mod error;
pub mod evaluator;
pub mod flow;
pub mod graph;
pub mod navigation;
pub mod prelude;
pub mod repository;
pub mod trace;
