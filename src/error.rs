//! Error handling and custom error types
//!
//! Every failure an attempt can end in, as one enum. The `Display` text of
//! each variant is what the interface shows as its error message.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Configuration(String),

    #[error("Please enter some keywords for an idea.")]
    Validation,

    #[error("Could not encode request payload: {0}")]
    Encoding(#[source] serde_json::Error),

    #[error("Error while calling the API: {0}")]
    Transport(String),

    #[error("API request failed: {status}")]
    Http { status: u16 },

    #[error("API response was not in the expected format: {0}")]
    Parse(String),

    #[error("There is no generated content to export.")]
    NoContent,

    #[error("PDF could not be saved or shared: {0}")]
    Io(#[from] std::io::Error),

    #[error("No presentation context is available to share from: {0}")]
    NoPresentationContext(String),
}

impl Error {
    pub(crate) fn missing_api_key() -> Self {
        Error::Configuration("API key is missing. Set GEMINI_API_KEY or pass --api-key.".to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
