//! Generative text API integration
//!
//! The HTTP adapter only moves bytes: it posts an already-encoded request
//! body and hands back the raw response body. Payload construction and
//! response parsing live next to it in [`gemini`].

pub mod gemini;
pub mod mock;

pub use gemini::GeminiClient;
pub use mock::{MockContentClient, MockReply};

use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ContentService: Send + Sync {
    /// POST `body` to the `generateContent` endpoint using `api_key` as the
    /// query credential, returning the body of a 200 response.
    async fn generate_content(&self, api_key: &str, body: Vec<u8>) -> Result<Vec<u8>>;
}
