//! Read-only graph data for visualizing a flow.
//!
//! Pages become nodes and rules become edges. Nothing here lays the graph out:
//! positions come from a [`LayoutStore`] or a simple default row.

use crate::flow::Flow;
use crate::trace::RuleFormatter;
use ahash::AHashSet;
use serde::Serialize;

pub mod layout;

pub use layout::{LayoutStore, Position};

const DEFAULT_SPACING_X: f64 = 300.0;
const DEFAULT_ROW_Y: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowNode<'a> {
    pub id: String,
    pub page_id: &'a str,
    pub ordinal: usize,
    pub label: &'a str,
    /// `(question text, input type)` per question, for the node body.
    pub questions: Vec<(&'a str, &'static str)>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: String,
    /// Index of the rule on its source page.
    pub rule: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowGraph<'a> {
    pub nodes: Vec<FlowNode<'a>>,
    pub edges: Vec<FlowEdge>,
}

/// The graph node id of a page.
pub fn node_id(page_id: &str) -> String {
    format!("page-{}", page_id)
}

/// Maps a graph node id back to a page ordinal.
pub fn page_for_node(flow: &Flow, node: &str) -> Option<usize> {
    node.strip_prefix("page-")
        .and_then(|page_id| flow.page_ordinal(page_id))
}

/// One edge per rule whose target page exists. Dangling rules are left out.
pub fn edges(flow: &Flow) -> Vec<FlowEdge> {
    let known: AHashSet<&str> = flow.pages.iter().map(|page| page.id.as_str()).collect();
    flow.pages
        .iter()
        .flat_map(|page| {
            let known = &known;
            page.post_conditions
                .iter()
                .enumerate()
                .filter(move |(_, rule)| known.contains(rule.next_page_id.as_str()))
                .map(move |(index, rule)| FlowEdge {
                    id: format!("post-edge-{}-{}", page.id, index),
                    source: node_id(&page.id),
                    target: node_id(&rule.next_page_id),
                    label: RuleFormatter::label(rule),
                    rule: index,
                })
        })
        .collect()
}

/// One node per page, placed at its saved position or in a default row.
pub fn nodes<'a>(flow: &'a Flow, layout: &LayoutStore) -> Vec<FlowNode<'a>> {
    flow.pages
        .iter()
        .enumerate()
        .map(|(ordinal, page)| FlowNode {
            id: node_id(&page.id),
            page_id: &page.id,
            ordinal,
            label: &page.name,
            questions: page
                .questions
                .iter()
                .map(|q| (q.text.as_str(), q.kind.input_type()))
                .collect(),
            position: layout.get(&page.id).unwrap_or_else(|| {
                Position::new(ordinal as f64 * DEFAULT_SPACING_X, DEFAULT_ROW_Y)
            }),
        })
        .collect()
}

pub fn build<'a>(flow: &'a Flow, layout: &LayoutStore) -> FlowGraph<'a> {
    FlowGraph {
        nodes: nodes(flow, layout),
        edges: edges(flow),
    }
}
