use super::ContentService;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Scripted outcome for one mock call.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// A well-formed 200 response whose primary candidate carries this text.
    Text(String),
    /// A 200 response with this exact body.
    Raw(Vec<u8>),
    /// A non-200 response.
    Status(u16),
    /// A transport failure with this description.
    Transport(String),
}

#[derive(Clone)]
pub struct MockContentClient {
    replies: Arc<Mutex<Vec<MockReply>>>,
    requests: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockContentClient {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_reply(self, reply: MockReply) -> Self {
        self.replies.lock().unwrap().push(reply);
        self
    }

    pub fn with_text_response(self, text: &str) -> Self {
        self.with_reply(MockReply::Text(text.to_string()))
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// `(api_key, body)` pairs received so far.
    pub fn get_requests(&self) -> Vec<(String, Vec<u8>)> {
        self.requests.lock().unwrap().clone()
    }

    fn envelope(text: &str) -> Vec<u8> {
        serde_json::to_vec(&serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": text }] } }]
        }))
        .unwrap_or_default()
    }
}

impl Default for MockContentClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentService for MockContentClient {
    async fn generate_content(&self, api_key: &str, body: Vec<u8>) -> Result<Vec<u8>> {
        let count = {
            let mut count = self.call_count.lock().unwrap();
            *count += 1;
            *count
        };
        self.requests
            .lock()
            .unwrap()
            .push((api_key.to_string(), body));

        let reply = {
            let replies = self.replies.lock().unwrap();
            if replies.is_empty() {
                MockReply::Text("A mock idea".to_string())
            } else {
                replies[(count - 1) % replies.len()].clone()
            }
        };

        match reply {
            MockReply::Text(text) => Ok(Self::envelope(&text)),
            MockReply::Raw(bytes) => Ok(bytes),
            MockReply::Status(status) => Err(Error::Http { status }),
            MockReply::Transport(message) => Err(Error::Transport(message)),
        }
    }
}
