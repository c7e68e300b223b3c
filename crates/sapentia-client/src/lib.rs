//! Chat client library for Sapentia.
//!
//! Forwards user messages to the chat backend over HTTP and maps every
//! outcome to a reply string.

pub mod client;
pub mod config;
pub mod error;
pub mod transport;

pub use client::{ChatClient, FALLBACK_REPLY};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::ClientError;
pub use transport::{ChatTransport, HttpTransport, TransportResponse};

// Status type carried by `TransportResponse` and `ClientError::Status`.
pub use reqwest::StatusCode;
