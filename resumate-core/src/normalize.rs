//! Normalization of raw model output into JSON.
//!
//! Models are told to emit bare JSON but now and then wrap it in a fenced
//! code block anyway. Exactly that one deviation is tolerated: the text is
//! parsed as-is, then once more with the fence markers removed. Anything
//! else is reported as unparseable.

use serde_json::Value;

/// Parse raw model output as JSON.
///
/// Returns `None` when the text is not JSON even after fence stripping.
pub fn parse_response(raw: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str(raw) {
        return Some(value);
    }

    let cleaned = strip_code_fences(raw);
    match serde_json::from_str(cleaned) {
        Ok(value) => {
            tracing::debug!("model output parsed after stripping code fences");
            Some(value)
        }
        Err(e) => {
            tracing::warn!("model output is not valid JSON: {}", e);
            None
        }
    }
}

/// Remove a leading ```` ```json ```` / ```` ``` ```` and a trailing ```` ``` ```` marker
pub fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let text = text.strip_prefix("```json").unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    let text = text.strip_prefix("```").unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    text.trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn samples() -> Vec<Value> {
        vec![
            json!({"overall": {"score": 72}}),
            json!([1, 2, 3]),
            json!("just a string"),
            json!(42),
            json!(null),
            json!({"nested": {"list": [true, false, {"x": "```"}]}}),
        ]
    }

    #[test]
    fn test_round_trip() {
        for value in samples() {
            let raw = serde_json::to_string(&value).unwrap();
            assert_eq!(parse_response(&raw), Some(value.clone()));

            let pretty = serde_json::to_string_pretty(&value).unwrap();
            assert_eq!(parse_response(&pretty), Some(value));
        }
    }

    #[test]
    fn test_json_fence() {
        for value in samples() {
            let raw = format!("```json\n{}\n```", serde_json::to_string(&value).unwrap());
            assert_eq!(parse_response(&raw), Some(value));
        }
    }

    #[test]
    fn test_bare_fence_and_whitespace() {
        let raw = "  \n```\n{\"a\": 1}\n```\n  ";
        assert_eq!(parse_response(raw), Some(json!({"a": 1})));
    }

    #[test]
    fn test_rejects_non_json() {
        assert_eq!(parse_response("not json at all"), None);
        assert_eq!(parse_response(""), None);
        assert_eq!(parse_response("```json\n```"), None);
    }

    #[test]
    fn test_no_salvage_of_embedded_json() {
        assert_eq!(parse_response("Here you go: {\"a\": 1}"), None);
        assert_eq!(parse_response("```json\n{\"a\": 1}\n``` trailing prose"), None);
        assert_eq!(parse_response("{\"a\": 1,}"), None);
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("```\n[]\n```"), "[]");
        assert_eq!(strip_code_fences("  {}  "), "{}");
        assert_eq!(strip_code_fences("{}"), "{}");
    }
}
