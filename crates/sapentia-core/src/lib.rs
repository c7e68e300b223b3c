//! Sapentia Core Types
//!
//! This crate contains the chat domain with no dependencies on:
//! - Network/HTTP
//! - Persistence
//! - A particular UI
//!
//! It holds the message types, the wire payloads exchanged with the chat
//! backend, the known model catalog, and the observable transcript state.

pub mod chat;
pub mod error;
pub mod ids;
pub mod model;
pub mod payload;
pub mod store;

// Re-export commonly used types
pub use chat::{ChatMessage, ChatRole, NewMessage};
pub use error::CoreError;
pub use ids::MessageId;
pub use model::{find_model, KnownModel, DEFAULT_MODEL_ID, KNOWN_MODELS};
pub use payload::{ChatRequest, ChatResponse};
pub use store::{Subscription, TranscriptStore, DEFAULT_SUBSCRIPTION_CAPACITY};
