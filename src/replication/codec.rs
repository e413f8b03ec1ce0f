//! Wire encoding.
//!
//! Messages travel as JSON, one message per line in streams. The transport
//! itself (ordered, reliable, at-least-once) is out of scope.

use super::message::ReplicationMessage;
use crate::core::BattleError;

/// Encode one message.
pub fn encode(message: &ReplicationMessage) -> Result<String, BattleError> {
    Ok(serde_json::to_string(message)?)
}

/// Decode one message.
pub fn decode(text: &str) -> Result<ReplicationMessage, BattleError> {
    Ok(serde_json::from_str(text)?)
}

/// Encode a batch as newline-delimited JSON.
pub fn encode_stream(messages: &[ReplicationMessage]) -> Result<String, BattleError> {
    let mut out = String::new();
    for message in messages {
        out.push_str(&encode(message)?);
        out.push('\n');
    }
    Ok(out)
}

/// Decode newline-delimited JSON, skipping blank lines.
pub fn decode_stream(text: &str) -> Result<Vec<ReplicationMessage>, BattleError> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(decode)
        .collect()
}
