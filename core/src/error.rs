//! Error types for the workspace API client.
//!
//! # Design
//! The variants follow the three ways a call can fail: nothing came back
//! (`Transport`), the server answered with a non-2xx status (`NotFound`,
//! `HttpError`), or the body did not have the expected shape
//! (`DeserializationError`). `NotFound` gets its own variant because callers
//! routinely branch on "does not exist". Nothing is retried or recovered
//! here; every error goes straight back to the caller.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was received: connection refused, timeout, TLS failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server returned 404.
    #[error("resource not found{}", format_message(.message))]
    NotFound { message: Option<String> },

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {}", error_detail(.message, .body))]
    HttpError {
        status: u16,
        message: Option<String>,
        body: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

fn format_message(message: &Option<String>) -> String {
    match message {
        Some(message) => format!(": {message}"),
        None => String::new(),
    }
}

fn error_detail<'a>(message: &'a Option<String>, body: &'a str) -> &'a str {
    message.as_deref().unwrap_or(body)
}

impl ApiError {
    /// HTTP status of the response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound { .. } => Some(404),
            ApiError::HttpError { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The `message` field of the server's error body, if it had one.
    pub fn message(&self) -> Option<&str> {
        match self {
            ApiError::NotFound { message } | ApiError::HttpError { message, .. } => {
                message.as_deref()
            }
            _ => None,
        }
    }
}
