//! Question-answering client
//!
//! One query in, one answer out. The controller treats every error from
//! a client the same way, so implementations only need to fail on
//! transport errors, non-success statuses and undecodable bodies.

pub mod http;

pub use http::HttpAnswerClient;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Body returned by the answering service
///
/// `content` is optional: a successful response without text is a soft
/// absence, not a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    #[serde(default)]
    pub content: Option<String>,
}

impl Answer {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
        }
    }

    /// The answer text, if present and non-empty
    pub fn text(&self) -> Option<&str> {
        self.content.as_deref().filter(|text| !text.is_empty())
    }
}

/// Single-shot question answering
///
/// Only the raw question is sent; no conversation history travels upstream.
#[async_trait]
pub trait AnswerClient: Send + Sync {
    /// Ask `query` and wait for the answer
    async fn ask(&self, query: &str) -> Result<Answer>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_text_present() {
        assert_eq!(Answer::new("Paris").text(), Some("Paris"));
    }

    #[test]
    fn test_answer_text_empty_is_absent() {
        assert_eq!(Answer::new("").text(), None);
        assert_eq!(Answer::default().text(), None);
    }

    #[test]
    fn test_answer_deserializes_null_and_missing_content() {
        let null: Answer = serde_json::from_str(r#"{"content": null}"#).unwrap();
        assert!(null.content.is_none());
        let missing: Answer = serde_json::from_str("{}").unwrap();
        assert!(missing.content.is_none());
    }
}
