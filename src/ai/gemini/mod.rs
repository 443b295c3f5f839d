pub mod client;
pub mod parser;
pub mod types;

pub use client::GeminiClient;
pub use parser::parse;
pub use types::GenerateContentRequest;
