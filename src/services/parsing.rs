//! Helpers for parsing oracle text payloads.

/// Strip an incidental fenced code block wrapper from an oracle response.
///
/// Oracles are instructed to reply with bare JSON but frequently wrap it in
/// triple backticks, with or without a `json` language tag. Returns the
/// inner text trimmed of surrounding backticks and whitespace; text without
/// a fence is returned trimmed.
pub fn strip_code_fences(raw: &str) -> String {
    let mut inner = raw.trim();

    if let Some(rest) = inner.strip_prefix("```") {
        // Drop an optional language tag occupying the rest of the first line.
        inner = match rest.split_once('\n') {
            Some((tag, body)) if tag.trim().chars().all(char::is_alphanumeric) => body,
            _ => rest,
        };
        inner = inner.trim_end();
        inner = inner.strip_suffix("```").unwrap_or(inner);
    }

    inner
        .trim_matches(|c: char| c == '`' || c.is_whitespace())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_json_passes_through() {
        assert_eq!(strip_code_fences(r#"  {"a": 1}  "#), r#"{"a": 1}"#);
    }

    #[test]
    fn test_fenced_with_language_tag() {
        let raw = "```json\n[{\"url\": \"https://a.example\"}]\n```";
        assert_eq!(strip_code_fences(raw), "[{\"url\": \"https://a.example\"}]");
    }

    #[test]
    fn test_fenced_without_language_tag() {
        let raw = "```\n{\"title\": \"x\"}\n```";
        assert_eq!(strip_code_fences(raw), "{\"title\": \"x\"}");
    }

    #[test]
    fn test_stray_backticks_trimmed() {
        assert_eq!(strip_code_fences("`{\"a\": 1}`"), "{\"a\": 1}");
    }

    #[test]
    fn test_fence_content_containing_backticks_inline() {
        let raw = "```json\n{\"snippet\": \"use `cargo`\"}\n```";
        assert_eq!(strip_code_fences(raw), "{\"snippet\": \"use `cargo`\"}");
    }
}
