use crate::message::Message;

/// Format a message as pretty JSON.
pub fn format_json(message: &Message) -> String {
    serde_json::to_string_pretty(message).unwrap_or_else(|_| "{}".to_string())
}
