//! Typed property access and temporal normalization for raw nodes.
//!
//! Timestamps are written as RFC 3339 strings; rows written through other
//! stacks may carry naive `YYYY-MM-DDTHH:MM:SS[.f]` text instead. Both are
//! normalized to a single canonical representation, [`DateTime<Utc>`].

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::client::GraphError;

pub fn string_prop(node: &neo4rs::Node, key: &'static str) -> Result<String, GraphError> {
    node.get::<String>(key)
        .map_err(|e| GraphError::Hydration(format!("missing or mistyped {key}: {e}")))
}

/// Absent optional properties hydrate as `None` rather than failing.
pub fn opt_string_prop(node: &neo4rs::Node, key: &'static str) -> Option<String> {
    node.get::<String>(key).ok()
}

pub fn int_prop(node: &neo4rs::Node, key: &'static str) -> Result<i64, GraphError> {
    node.get::<i64>(key)
        .map_err(|e| GraphError::Hydration(format!("missing or mistyped {key}: {e}")))
}

pub fn bool_prop(node: &neo4rs::Node, key: &'static str) -> Result<bool, GraphError> {
    node.get::<bool>(key)
        .map_err(|e| GraphError::Hydration(format!("missing or mistyped {key}: {e}")))
}

pub fn temporal_prop(node: &neo4rs::Node, key: &'static str) -> Result<DateTime<Utc>, GraphError> {
    let raw = string_prop(node, key)?;
    parse_temporal(&raw)
        .ok_or_else(|| GraphError::Hydration(format!("invalid temporal value for {key}: {raw}")))
}

/// Parse a stored temporal string into the canonical UTC representation.
pub fn parse_temporal(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    // Naive fallback for rows written without an offset.
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
