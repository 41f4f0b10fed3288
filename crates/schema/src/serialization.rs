//! JSON helpers for reading candidates and writing validated output.
//!
//! Output is deterministic so saved collections produce clean diffs:
//! - Keys keep the order the validator emitted them in
//! - 2-space indentation
//! - Trailing newline

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::SchemaResult;

/// Parses JSON text into a candidate value.
///
/// # Errors
///
/// Returns an error if the text is not valid JSON.
pub fn from_json(json: &str) -> SchemaResult<Value> {
    Ok(serde_json::from_str(json)?)
}

/// Parses JSON bytes into a candidate value.
///
/// # Errors
///
/// Returns an error if the bytes are not valid JSON.
pub fn from_json_bytes(bytes: &[u8]) -> SchemaResult<Value> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Serializes a value to stable, pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable<T: Serialize>(value: &T) -> SchemaResult<String> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    let mut json = String::from_utf8(buffer)?;
    json.push('\n');
    Ok(json)
}
