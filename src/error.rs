//! Error types for Research Chat
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Research Chat operations
///
/// Persistence and remote failures are normally absorbed at the store and
/// controller boundaries; the variants here are what escapes to callers
/// that need to know (configuration, preconditions, explicit lookups).
#[derive(Error, Debug)]
pub enum ChatError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Persistence backend errors (unavailable, quota, I/O)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Question-answering client errors (transport, status, body)
    #[error("Client error: {0}")]
    Client(String),

    /// Message content was blank after trimming
    #[error("Message content cannot be empty")]
    EmptyMessage,

    /// A turn is already outstanding for this controller
    #[error("A message is already being processed; wait for the reply")]
    TurnInProgress,

    /// No chat with the given identifier exists in the conversation set
    #[error("Chat not found: {0}")]
    ChatNotFound(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Research Chat operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
