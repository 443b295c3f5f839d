//! Response parsing for `generateContent`.

use super::types::GenerateContentResponse;
use crate::{Error, Result};
use serde::Deserialize;

/// Extract `candidates[0].content.parts[0].text` from a raw response body.
pub fn parse(bytes: &[u8]) -> Result<String> {
    let value: serde_json::Value = serde_json::from_slice(bytes).map_err(|e| {
        tracing::error!("Gemini response is not valid JSON: {}", e);
        Error::Parse(e.to_string())
    })?;

    if !value.is_object() {
        return Err(Error::Parse("response root is not an object".to_string()));
    }

    GenerateContentResponse::deserialize(value)
        .map(GenerateContentResponse::into_text)
        .map_err(|e| {
            tracing::error!("Unexpected Gemini response shape: {}", e);
            Error::Parse(e.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_json(value: serde_json::Value) -> Result<String> {
        parse(&serde_json::to_vec(&value).unwrap())
    }

    #[test]
    fn test_extracts_first_candidate_first_part() {
        let text = parse_json(serde_json::json!({
            "candidates": [
                { "content": { "parts": [{ "text": "Vertical farms." }, { "text": "ignored" }] } },
                { "content": { "parts": [{ "text": "also ignored" }] } }
            ]
        }))
        .unwrap();
        assert_eq!(text, "Vertical farms.");
    }

    #[test]
    fn test_ignores_unrelated_fields() {
        let text = parse_json(serde_json::json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "ok" }] },
                "finishReason": "STOP"
            }],
            "usageMetadata": { "totalTokenCount": 12 }
        }))
        .unwrap();
        assert_eq!(text, "ok");
    }

    #[test]
    fn test_missing_candidates_is_parse_error() {
        let err = parse_json(serde_json::json!({ "promptFeedback": {} })).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_empty_candidates_is_parse_error() {
        let err = parse_json(serde_json::json!({ "candidates": [] })).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_empty_parts_is_parse_error() {
        let err = parse_json(serde_json::json!({
            "candidates": [{ "content": { "parts": [] } }]
        }))
        .unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_wrong_shapes_are_parse_errors() {
        let bodies = [
            serde_json::json!(["candidates"]),
            serde_json::json!({ "candidates": "nope" }),
            serde_json::json!({ "candidates": [{ "content": "nope" }] }),
            serde_json::json!({ "candidates": [{ "content": { "parts": [{ "text": 7 }] } }] }),
            serde_json::json!({ "candidates": [{ "content": { "parts": [{ "inlineData": {} }] } }] }),
        ];

        for body in bodies {
            let err = parse_json(body.clone()).unwrap_err();
            assert!(matches!(err, Error::Parse(_)), "expected parse error for {}", body);
        }
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = parse(b"<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }
}
