//! Completeness validation of an enriched record

use serde_json::Value;
use tracing::debug;

use crate::model::DebriefInput;
use crate::{Error, Result};

/// Ensure no required top-level field is null or absent
///
/// Fields are checked in declaration order and the first missing one is
/// named in the error. `id` is optional by definition and never checked.
pub fn ensure_complete(record: &DebriefInput) -> Result<()> {
    let fields: [(&str, bool); 6] = [
        ("title", record.title.is_some()),
        ("date", record.date.is_some()),
        ("labels", record.labels.is_some()),
        ("contentItems", record.content_items.is_some()),
        ("tasks", record.tasks.is_some()),
        ("lessons", record.lessons.is_some()),
    ];

    match fields.iter().find(|(_, present)| !present) {
        Some((name, _)) => Err(Error::MissingField((*name).to_string())),
        None => Ok(()),
    }
}

/// Log every top-level field of a record, one line each
pub fn log_input_fields(record: &DebriefInput, prefix: &str) {
    debug!("{}:", prefix);

    let Ok(Value::Object(fields)) = serde_json::to_value(record) else {
        return;
    };

    for (field, value) in &fields {
        match value {
            Value::Null => debug!("  {}: null", field),
            Value::Array(items) => debug!("  {}: Array with {} items", field, items.len()),
            Value::Object(_) => debug!("  {}: Object {}", field, value),
            Value::String(s) => debug!("  {}: {}", field, s),
            other => debug!("  {}: {}", field, other),
        }
    }
}
