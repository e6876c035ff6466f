//! Log Redaction
//!
//! Scrubs bearer tokens and `access_token` query parameters from strings
//! before they are logged or echoed into chat.

use regex::Regex;
use std::sync::LazyLock;

static BEARER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Bearer\s+[a-zA-Z0-9\-\._~+/]+=*").expect("valid bearer pattern"));
static QUERY_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(access_token=)[^&\s]+").expect("valid query token pattern"));

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = BEARER_RE.replace_all(input, "Bearer [REDACTED_TOKEN]");
    QUERY_TOKEN_RE
        .replace_all(&redacted, "${1}[REDACTED_TOKEN]")
        .into_owned()
}
