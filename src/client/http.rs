//! HTTP implementation of the question-answering client
//!
//! Sends `POST {base_url}/ask` with `{"query": ...}` and decodes
//! `{"content": ...}` from the response.

use crate::client::{Answer, AnswerClient};
use crate::config::ApiConfig;
use crate::error::{ChatError, Result};

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

/// Request body for the `/ask` endpoint
#[derive(Debug, Serialize)]
struct AskRequest<'a> {
    query: &'a str,
}

/// Client for the remote answering service
///
/// No request timeout is configured: a slow service keeps the turn
/// pending until it answers or the connection fails.
///
/// # Examples
///
/// ```
/// use research_chat::client::HttpAnswerClient;
/// use research_chat::config::ApiConfig;
///
/// let client = HttpAnswerClient::new(ApiConfig::default()).unwrap();
/// assert_eq!(client.endpoint(), "http://127.0.0.1:8000/ask");
/// ```
pub struct HttpAnswerClient {
    client: Client,
    endpoint: String,
}

impl HttpAnswerClient {
    /// Build a client targeting `config.base_url`
    ///
    /// # Errors
    ///
    /// Returns `ChatError::Client` if the HTTP client cannot be created
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("research-chat/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ChatError::Client(format!("Failed to create HTTP client: {}", e)))?;

        let endpoint = format!("{}/ask", config.base_url.trim_end_matches('/'));
        tracing::debug!("Initialized answer client: endpoint={}", endpoint);

        Ok(Self { client, endpoint })
    }

    /// Full URL every question is posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AnswerClient for HttpAnswerClient {
    async fn ask(&self, query: &str) -> Result<Answer> {
        tracing::debug!("Sending question ({} chars)", query.chars().count());

        let response = self
            .client
            .post(&self.endpoint)
            .json(&AskRequest { query })
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Ask request failed: {}", e);
                ChatError::Client(format!("Ask request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Answer service returned error {}: {}", status, error_text);
            return Err(ChatError::Client(format!(
                "Answer service returned error {}: {}",
                status, error_text
            ))
            .into());
        }

        let answer: Answer = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse answer: {}", e);
            ChatError::Client(format!("Failed to parse answer: {}", e))
        })?;

        tracing::debug!("Received answer (has text: {})", answer.text().is_some());
        Ok(answer)
    }
}
