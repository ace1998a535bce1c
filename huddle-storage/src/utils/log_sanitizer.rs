//! Keeps logged response bodies short.
//!
//! Storage responses can echo object metadata (download tokens included), so
//! bodies are cut before they reach debug/error logs.

/// Maximum number of bytes of a body that is logged verbatim.
const TRUNCATE_LIMIT: usize = 256;

/// Truncate `s` to at most [`TRUNCATE_LIMIT`] bytes on a char boundary.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        return s.to_string();
    }
    let cut = s
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|i| *i <= TRUNCATE_LIMIT)
        .last()
        .unwrap_or(0);
    format!("{}... [truncated, total {} bytes]", &s[..cut], s.len())
}

/// Mask a secret token, keeping only its first four characters.
pub fn mask_token(token: &str) -> String {
    let visible: String = token.chars().take(4).collect();
    if token.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{visible}****")
    }
}
