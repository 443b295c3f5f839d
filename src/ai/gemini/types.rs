//! Gemini `generateContent` payload types.

use serde::de::{self, Deserializer, IgnoredAny, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// Request body: `{ "contents": [ { "parts": [ { "text": ... } ] } ] }`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// A single-turn request carrying one text part.
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// Response envelope, reduced to its primary candidate.
///
/// Only the first element of `candidates` and of `parts` is decoded; any
/// further elements are skipped without being inspected.
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(rename = "candidates", deserialize_with = "first_element")]
    pub primary: Candidate,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: CandidateContent,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(rename = "parts", deserialize_with = "first_element")]
    pub primary: Part,
}

impl GenerateContentResponse {
    pub fn into_text(self) -> String {
        self.primary.content.primary.text
    }
}

/// Decode the first element of a JSON array, rejecting empty arrays.
fn first_element<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    struct FirstVisitor<T>(PhantomData<T>);

    impl<'de, T: Deserialize<'de>> Visitor<'de> for FirstVisitor<T> {
        type Value = T;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a non-empty array")
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<T, A::Error> {
            let first = seq
                .next_element::<T>()?
                .ok_or_else(|| de::Error::invalid_length(0, &self))?;
            while seq.next_element::<IgnoredAny>()?.is_some() {}
            Ok(first)
        }
    }

    deserializer.deserialize_seq(FirstVisitor(PhantomData))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_matches_wire_shape() {
        let request = GenerateContentRequest::from_prompt("sustainable city ideas");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "contents": [{ "parts": [{ "text": "sustainable city ideas" }] }]
            })
        );
    }

    #[test]
    fn test_extra_candidates_are_not_inspected() {
        // The second candidate would not decode as a Candidate.
        let body = serde_json::json!({
            "candidates": [
                { "content": { "parts": [{ "text": "first" }] } },
                42
            ]
        });
        let response: GenerateContentResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.into_text(), "first");
    }
}
