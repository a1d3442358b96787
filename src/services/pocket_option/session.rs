//! Session token handling

use tracing::warn;

const SESSION_KEY: &str = "s:10:\"session_id\";s:";

/// Normalise a user-supplied session token.
///
/// Accepts either a bare token or the PHP-serialized session blob copied from
/// the browser (`a:4:{...s:10:"session_id";s:32:"<token>"...}`), in which case
/// the embedded `session_id` is extracted. Returns `None` for blank input.
pub fn normalize_session_token(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.starts_with("a:4:") && trimmed.contains("session_id") {
        match extract_serialized_session_id(trimmed) {
            Some(id) => return Some(id.trim().to_string()),
            None => warn!("Serialized session blob has no readable session_id"),
        }
    } else if trimmed.len() > 100 {
        warn!(length = trimmed.len(), "Session token is unusually long");
    }

    Some(trimmed.to_string())
}

fn extract_serialized_session_id(blob: &str) -> Option<&str> {
    let start = blob.find(SESSION_KEY)? + SESSION_KEY.len();
    let rest = &blob[start..];

    // `<len>:"<value>"`
    let colon = rest.find(':')?;
    let declared_len: usize = rest[..colon].parse().ok()?;
    let value = rest[colon + 1..].strip_prefix('"')?;
    let end = value.find('"')?;
    let id = &value[..end];

    if id.is_empty() {
        return None;
    }
    if id.len() != declared_len {
        warn!(declared_len, actual = id.len(), "Serialized session_id length mismatch");
    }
    Some(id)
}
