use crate::ai::ContentService;
use crate::config::{Config, DEFAULT_BASE_URL};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Gemini REST client for the `generateContent` endpoint.
pub struct GeminiClient {
    client: Client,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl GeminiClient {
    /// Construct a Gemini client.
    ///
    /// `model` should be the bare model ID (for example `gemini-1.5-flash-latest`),
    /// not a `models/...`-prefixed path segment.
    pub fn new(model: String, timeout: Duration) -> Self {
        Self::new_with_client(model, timeout, Client::new())
    }

    pub fn new_with_client(model: String, timeout: Duration, client: Client) -> Self {
        let model = model.strip_prefix("models/").unwrap_or(&model).to_string();

        Self {
            client,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.model.clone(), config.timeout).with_base_url(config.base_url.clone())
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Returns the configured model ID without the `models/` prefix.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

/// Flatten a reqwest error and its causes into one line, without the URL
/// (which carries the API key).
fn describe_transport_error(e: reqwest::Error) -> String {
    use std::error::Error as _;

    let e = e.without_url();
    let mut message = e.to_string();

    let mut source = e.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }

    if e.is_timeout() && !message.contains("timed out") {
        message.push_str(" (timed out)");
    }
    message
}

#[async_trait]
impl ContentService for GeminiClient {
    async fn generate_content(&self, api_key: &str, body: Vec<u8>) -> Result<Vec<u8>> {
        tracing::debug!("Sending generateContent request to Gemini (model: {})", self.model);

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .timeout(self.timeout)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                let message = describe_transport_error(e);
                tracing::error!("Failed to send request to Gemini: {}", message);
                Error::Transport(message)
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error (status {}): {}", status, error_text);
            return Err(Error::Http {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| {
            let message = describe_transport_error(e);
            tracing::error!("Failed to read Gemini response body: {}", message);
            Error::Transport(message)
        })?;

        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MODEL: &str = "gemini-1.5-flash-latest";

    fn make_client(server: &MockServer, model: &str) -> GeminiClient {
        GeminiClient::new(model.to_string(), Duration::from_secs(5)).with_base_url(server.uri())
    }

    fn request_body(prompt: &str) -> Vec<u8> {
        serde_json::to_vec(&serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_posts_payload_with_query_key() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(
                "/v1beta/models/gemini-1.5-flash-latest:generateContent",
            ))
            .and(query_param("key", "test-key"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(serde_json::json!({
                "contents": [{ "parts": [{ "text": "sustainable city ideas" }] }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"candidates\":[]}"))
            .expect(1)
            .mount(&server)
            .await;

        let client = make_client(&server, MODEL);
        let bytes = client
            .generate_content("test-key", request_body("sustainable city ideas"))
            .await
            .unwrap();
        assert_eq!(bytes, b"{\"candidates\":[]}");
    }

    #[tokio::test]
    async fn test_non_200_returns_http_error_with_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
            .mount(&server)
            .await;

        let client = make_client(&server, MODEL);
        let err = client
            .generate_content("test-key", request_body("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Http { status: 500 }));
    }

    #[tokio::test]
    async fn test_other_success_codes_are_not_accepted() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = make_client(&server, MODEL);
        let err = client
            .generate_content("test-key", request_body("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Http { status: 204 }));
    }

    #[tokio::test]
    async fn test_connection_failure_returns_transport_error() {
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let client =
            GeminiClient::new(MODEL.to_string(), Duration::from_secs(5)).with_base_url(uri);
        let err = client
            .generate_content("secret-key", request_body("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
        assert!(!err.to_string().contains("secret-key"));
    }

    #[tokio::test]
    async fn test_connection_failure_names_the_cause() {
        let client = GeminiClient::new(MODEL.to_string(), Duration::from_secs(5))
            .with_base_url("http://127.0.0.1:1".to_string());
        let err = client
            .generate_content("secret-key", request_body("x"))
            .await
            .unwrap_err();

        let message = err.to_string().to_lowercase();
        assert!(message.contains("connect"), "unexpected message: {}", message);
        assert!(!message.contains("secret-key"));
    }

    #[tokio::test]
    async fn test_timeout_is_reported_as_transport_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("{}")
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client = GeminiClient::new(MODEL.to_string(), Duration::from_millis(200))
            .with_base_url(server.uri());
        let err = client
            .generate_content("test-key", request_body("x"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Transport(_)));
        assert!(err.to_string().contains("timed out"), "unexpected message: {}", err);
    }

    #[tokio::test]
    async fn test_strips_models_prefix_from_model_id() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(
                "/v1beta/models/gemini-1.5-flash-latest:generateContent",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let client = make_client(&server, "models/gemini-1.5-flash-latest");
        assert_eq!(client.model(), MODEL);
        client
            .generate_content("test-key", request_body("x"))
            .await
            .unwrap();
    }
}
