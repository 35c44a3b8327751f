//! Error types for the compte API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the resource does not exist" from "the server returned an unexpected
//! status." All other non-2xx responses land in `Http` with the raw status
//! code and body. Transport failures keep the underlying `reqwest` error as
//! their source so the cause chain (connect refused, timeout, DNS) survives
//! all the way to the caller. No failure is ever swallowed internally.

use std::fmt;

/// Errors returned by the endpoint, transport, and repository layers.
#[derive(Debug)]
pub enum ApiError {
    /// The server returned 404 — the requested compte does not exist.
    NotFound,

    /// The server returned a non-2xx status other than 404.
    Http { status: u16, body: String },

    /// The request never completed: connection, timeout, DNS, TLS.
    Transport(reqwest::Error),

    /// A 2xx response arrived without the body the operation requires.
    MissingBody,

    /// The response body could not be deserialized for the negotiated format.
    Deserialization(String),

    /// The request payload could not be serialized for the negotiated format.
    Serialization(String),

    /// The format token is not one of the recognized wire formats.
    UnsupportedFormat(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound => write!(f, "compte not found"),
            ApiError::Http { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
            ApiError::Transport(e) => {
                write!(f, "transport failure: {e}")
            }
            ApiError::MissingBody => write!(f, "missing response body"),
            ApiError::Deserialization(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::Serialization(msg) => {
                write!(f, "serialization failed: {msg}")
            }
            ApiError::UnsupportedFormat(token) => {
                write!(f, "unsupported wire format: {token:?} (expected \"JSON\" or \"XML\")")
            }
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e)
    }
}
