use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::message::Message;

/// Errors that can occur while writing a [`Message`] as JSON.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to serialize JSON bytes.
    #[error("failed to write VICI message JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Failed to write output file.
    #[error("failed to write VICI message file: {0}")]
    Io(#[from] std::io::Error),
}

/// Serialize a [`Message`] into pretty-printed JSON bytes.
pub fn write(message: &Message) -> Result<Vec<u8>, WriteError> {
    let mut bytes = serde_json::to_vec_pretty(message)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Serialize a [`Message`] and write it to `path`.
pub fn write_file(message: &Message, path: &Path) -> Result<(), WriteError> {
    let bytes = write(message)?;
    fs::write(path, bytes)?;
    Ok(())
}
