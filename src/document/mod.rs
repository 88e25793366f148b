//! Import and export of flow documents.
//!
//! Import is all-or-nothing: a document that fails validation yields an
//! [`ImportError`] and no flow. The imported flow always gets a new id so it
//! cannot collide with a flow already in a repository.

use crate::error::ImportError;
use crate::flow::{Flow, IntoFlow};
use serde_json::{Map, Value};
use tracing::{info, warn};

pub mod wire;

pub use wire::*;

/// Parses and validates a flow document, assigning it a fresh id.
pub fn import_flow(json: &str) -> Result<Flow, ImportError> {
    import_flow_with_id(json, Flow::fresh_id())
}

/// Like [`import_flow`], with the new id supplied by the caller.
pub fn import_flow_with_id(json: &str, new_id: impl Into<String>) -> Result<Flow, ImportError> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| ImportError::InvalidJson(e.to_string()))?;
    let Value::Object(mut object) = value else {
        return Err(ImportError::InvalidShape {
            field: "document",
            expected: "an object",
        });
    };

    require_string(&object, "id")?;
    require_string(&object, "name")?;
    require_string(&object, "description")?;
    let pages = match object.remove("pages") {
        Some(Value::Array(pages)) => pages,
        _ => {
            return Err(ImportError::InvalidShape {
                field: "pages",
                expected: "an array",
            });
        }
    };

    let pages = pages
        .into_iter()
        .enumerate()
        .map(|(page_index, page)| {
            serde_json::from_value::<PageDocument>(page).map_err(|e| ImportError::InvalidPage {
                page_index,
                message: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let document = FlowDocument {
        id: new_id.into(),
        name: take_string(&mut object, "name"),
        description: take_string(&mut object, "description"),
        pages,
    };
    let flow = document.into_flow()?;
    for page_id in flow.duplicate_page_ids() {
        warn!(
            flow = %flow.id,
            page = %page_id,
            "page id is used more than once; rules reach only the first page"
        );
    }
    info!(flow = %flow.id, name = %flow.name, pages = flow.pages.len(), "imported flow");
    Ok(flow)
}

/// Serializes a flow as pretty-printed JSON, keeping its id.
pub fn export_flow(flow: &Flow) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&FlowDocument::from(flow))
}

/// The file name offered when a flow is downloaded.
pub fn export_file_name(flow: &Flow) -> String {
    let name = flow.name.trim();
    if name.is_empty() {
        "flow.json".to_string()
    } else {
        format!("{}.json", name)
    }
}

fn require_string(object: &Map<String, Value>, field: &'static str) -> Result<(), ImportError> {
    match object.get(field) {
        Some(Value::String(_)) => Ok(()),
        _ => Err(ImportError::InvalidShape {
            field,
            expected: "a string",
        }),
    }
}

fn take_string(object: &mut Map<String, Value>, field: &str) -> String {
    match object.remove(field) {
        Some(Value::String(s)) => s,
        _ => String::new(),
    }
}
