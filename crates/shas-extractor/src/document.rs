//! Decode store records into source documents

use crate::error::ExtractorError;
use serde_json::Value;
use shas_domain::{ContentNode, SourceDocument, Structure};
use tracing::{debug, warn};

/// Decode a single store record
///
/// The record must carry a string `title`. `language` defaults to an empty
/// tag when missing. The content field becomes an ordered list (JSON array),
/// a keyed mapping (JSON object), or absent (missing, null, or any scalar).
pub fn parse_document(record: &Value, content_field: &str) -> Result<SourceDocument, String> {
    let obj = record
        .as_object()
        .ok_or_else(|| "Record is not a JSON object".to_string())?;

    let title = obj
        .get("title")
        .and_then(|v| v.as_str())
        .ok_or_else(|| "Missing or invalid 'title'".to_string())?
        .to_string();

    let language_tag = obj
        .get("language")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();

    let content = match obj.get(content_field) {
        Some(Value::Array(items)) => Structure::OrderedList(items.iter().map(to_node).collect()),
        Some(Value::Object(map)) => Structure::KeyedMapping(
            map.iter().map(|(k, v)| (k.clone(), to_node(v))).collect(),
        ),
        Some(Value::Null) | None => Structure::Absent,
        Some(other) => {
            debug!("'{}': scalar content field treated as absent ({})", title, other);
            Structure::Absent
        }
    };

    Ok(SourceDocument {
        title,
        language_tag,
        content,
    })
}

/// Decode a store export
///
/// Accepts a JSON array of records or newline-delimited JSON. A record that
/// cannot be decoded fails the whole export with its position.
pub fn parse_export(input: &str, content_field: &str) -> Result<Vec<SourceDocument>, ExtractorError> {
    let trimmed = input.trim_start();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let records: Vec<Value> = if trimmed.starts_with('[') {
        serde_json::from_str(trimmed)?
    } else {
        trimmed
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str::<Value>(line))
            .collect::<Result<_, _>>()?
    };

    let documents = records
        .iter()
        .enumerate()
        .map(|(position, record)| {
            parse_document(record, content_field).map_err(|reason| {
                warn!("Rejecting record {}: {}", position, reason);
                ExtractorError::InvalidDocument { position, reason }
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Decoded {} documents", documents.len());
    Ok(documents)
}

fn to_node(value: &Value) -> ContentNode {
    match value {
        Value::String(s) => ContentNode::Text(s.clone()),
        Value::Array(items) => ContentNode::List(items.iter().map(to_node).collect()),
        Value::Object(map) => {
            ContentNode::Mapping(map.iter().map(|(k, v)| (k.clone(), to_node(v))).collect())
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => ContentNode::Other,
    }
}
