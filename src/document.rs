//! Document shape classification and dispatch to the sorter.
//!
//! A document is either a top-level array of records, an object that may
//! hold the record array under the list key, or an unsupported scalar.

use serde_json::Value;
use tracing::debug;

use crate::sorter::{SortStats, plan_sort};

/// Report label used for a top-level array.
pub const TOP_LEVEL_LABEL: &str = "top-level-list";

/// The recognized structure of a parsed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Top-level array of records.
    List,
    /// Top-level object; `sortable` is true when the list key maps to an array.
    Keyed { sortable: bool },
    /// Any scalar.
    Unsupported { type_name: &'static str },
}

impl Shape {
    /// Classify `doc`, looking for an array under `list_key` in objects.
    pub fn classify(doc: &Value, list_key: &str) -> Self {
        match doc {
            Value::Array(_) => Self::List,
            Value::Object(map) => Self::Keyed {
                sortable: map.get(list_key).is_some_and(Value::is_array),
            },
            other => Self::Unsupported {
                type_name: json_type_name(other),
            },
        }
    }
}

/// Name of a JSON value's type as shown in warnings.
pub const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Options controlling one dispatch.
#[derive(Debug, Clone, Copy)]
pub struct DispatchOptions<'a> {
    pub dry_run: bool,
    pub timestamp_key: &'a str,
    pub list_key: &'a str,
}

/// Result of dispatching a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// The document shape is supported; one entry per sortable list found.
    Sorted(Vec<SortStats>),
    /// The document is a scalar and was left alone.
    Unsupported { type_name: &'static str },
}

impl Dispatch {
    /// True when some list was reordered in the document.
    pub fn modified(&self, dry_run: bool) -> bool {
        match self {
            Self::Sorted(stats) => !dry_run && stats.iter().any(|s| s.changed),
            Self::Unsupported { .. } => false,
        }
    }
}

/// Sort the record list(s) of `doc` in place.
///
/// Lists are only reordered when not in dry-run mode and the sort changed
/// something. Sibling keys of a keyed document are never examined.
pub fn dispatch(doc: &mut Value, opts: &DispatchOptions<'_>) -> Dispatch {
    let shape = Shape::classify(doc, opts.list_key);
    debug!(?shape, "classified document");

    let (records, label) = match (shape, doc) {
        (Shape::List, Value::Array(records)) => (records, TOP_LEVEL_LABEL),
        (Shape::Keyed { sortable: true }, Value::Object(map)) => {
            match map.get_mut(opts.list_key) {
                Some(Value::Array(records)) => (records, opts.list_key),
                _ => return Dispatch::Sorted(Vec::new()),
            }
        }
        (Shape::Unsupported { type_name }, _) => return Dispatch::Unsupported { type_name },
        _ => return Dispatch::Sorted(Vec::new()),
    };

    let plan = plan_sort(records, label, opts.timestamp_key);
    if !opts.dry_run && plan.stats.changed {
        plan.apply(records);
        debug!(label, "reordered records");
    }
    Dispatch::Sorted(vec![plan.stats])
}
