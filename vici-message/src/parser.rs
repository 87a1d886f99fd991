use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::message::Message;

/// Errors that can occur while reading a JSON document into a [`Message`].
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input was not JSON, or used numbers, booleans, nulls or nested lists.
    #[error("failed to parse VICI message JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Failed to read input file.
    #[error("failed to read VICI message file: {0}")]
    Io(#[from] std::io::Error),
    /// The document root was not a JSON object.
    #[error("malformed VICI message: {0}")]
    Malformed(String),
}

/// Parse JSON bytes into a [`Message`].
///
/// Strings map to values, arrays of strings to lists and objects to
/// sections. Every other JSON type is rejected.
pub fn parse(json: &[u8]) -> Result<Message, ParseError> {
    let raw: serde_json::Value = serde_json::from_slice(json)?;
    if !raw.is_object() {
        return Err(ParseError::Malformed(
            "top-level element must be an object".to_string(),
        ));
    }
    Ok(serde_json::from_value(raw)?)
}

/// Parse a JSON file into a [`Message`].
pub fn parse_file(path: &Path) -> Result<Message, ParseError> {
    let bytes = fs::read(path)?;
    parse(&bytes)
}
