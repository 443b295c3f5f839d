//! Idea generation: validate, encode, call, parse.

use crate::ai::gemini::{parse, GenerateContentRequest};
use crate::ai::ContentService;
use crate::{Error, Result};

/// Check the preconditions of a generation attempt, in order.
pub fn validate(prompt: &str, api_key: &str) -> Result<()> {
    if api_key.trim().is_empty() {
        return Err(Error::missing_api_key());
    }
    if prompt.is_empty() {
        return Err(Error::Validation);
    }
    Ok(())
}

/// Run one generation attempt and return the primary candidate's text.
///
/// Preconditions are checked before anything is sent, so a failing
/// validation never reaches `service`.
pub async fn generate(service: &dyn ContentService, prompt: &str, api_key: &str) -> Result<String> {
    validate(prompt, api_key)?;

    let body = serde_json::to_vec(&GenerateContentRequest::from_prompt(prompt))
        .map_err(Error::Encoding)?;

    let bytes = service.generate_content(api_key, body).await?;
    let text = parse(&bytes)?;

    tracing::info!("Generated {} characters of content", text.chars().count());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{MockContentClient, MockReply};

    #[tokio::test]
    async fn test_empty_prompt_is_validation_error_without_call() {
        let client = MockContentClient::new();
        let err = generate(&client, "", "key").await.unwrap_err();
        assert!(matches!(err, Error::Validation));
        assert_eq!(client.get_call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_key_is_configuration_error_without_call() {
        let client = MockContentClient::new();
        for key in ["", "   "] {
            let err = generate(&client, "ideas", key).await.unwrap_err();
            assert!(matches!(err, Error::Configuration(_)));
        }
        assert_eq!(client.get_call_count(), 0);
    }

    #[tokio::test]
    async fn test_key_is_checked_before_prompt() {
        let client = MockContentClient::new();
        let err = generate(&client, "", "").await.unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[tokio::test]
    async fn test_sends_payload_and_returns_text() {
        let client = MockContentClient::new().with_text_response("Vertical farms.");
        let text = generate(&client, "sustainable city ideas", "valid-key")
            .await
            .unwrap();
        assert_eq!(text, "Vertical farms.");

        let requests = client.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, "valid-key");
        let body: serde_json::Value = serde_json::from_slice(&requests[0].1).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "contents": [{ "parts": [{ "text": "sustainable city ideas" }] }] })
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let client =
            MockContentClient::new().with_reply(MockReply::Raw(b"{\"candidates\":[]}".to_vec()));
        let err = generate(&client, "ideas", "key").await.unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[tokio::test]
    async fn test_service_errors_pass_through() {
        let client = MockContentClient::new()
            .with_reply(MockReply::Status(429))
            .with_reply(MockReply::Transport("connection refused".to_string()));

        let err = generate(&client, "ideas", "key").await.unwrap_err();
        assert!(matches!(err, Error::Http { status: 429 }));

        let err = generate(&client, "ideas", "key").await.unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }
}
