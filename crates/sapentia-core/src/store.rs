//! Observable transcript state.
//!
//! The store is an explicit context object owned by a chat session. Mutations
//! take `&mut self` and run to completion synchronously; observers receive
//! every publication through broadcast subscriptions, one for the transcript
//! and one for the loading flag. A new subscription yields the value current
//! at subscribe time before any later publication.

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tracing::debug;

use crate::chat::{ChatMessage, NewMessage};
use crate::ids::MessageId;

/// Publications a subscriber may fall behind by before it starts lagging.
pub const DEFAULT_SUBSCRIPTION_CAPACITY: usize = 64;

/// In-memory conversation transcript plus the "request in flight" flag.
#[derive(Debug)]
pub struct TranscriptStore {
    messages: Vec<ChatMessage>,
    loading: bool,
    messages_tx: broadcast::Sender<Vec<ChatMessage>>,
    loading_tx: broadcast::Sender<bool>,
}

impl TranscriptStore {
    /// Create an empty, idle store.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_SUBSCRIPTION_CAPACITY)
    }

    /// Create an empty store whose subscriptions buffer `capacity` publications.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (messages_tx, _) = broadcast::channel(capacity);
        let (loading_tx, _) = broadcast::channel(capacity);
        Self {
            messages: Vec::new(),
            loading: false,
            messages_tx,
            loading_tx,
        }
    }

    /// Append a message with a freshly generated id and publish the transcript.
    pub fn append(&mut self, message: NewMessage) -> MessageId {
        let id = MessageId::generate();
        debug!(message_id = %id, role = %message.role, "Appending message");

        self.messages.push(message.into_message(id.clone()));
        self.publish_messages();
        id
    }

    /// Drop every message and publish the empty transcript.
    pub fn clear(&mut self) {
        debug!(count = self.messages.len(), "Clearing transcript");
        self.messages.clear();
        self.publish_messages();
    }

    /// Set the loading flag and publish it, even if unchanged.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        // No subscribers is fine.
        self.loading_tx.send(loading).ok();
    }

    /// Current transcript, oldest first.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Current loading flag.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Number of messages in the transcript.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if the transcript has no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Subscribe to transcript snapshots, starting with the current one.
    pub fn subscribe_messages(&self) -> Subscription<Vec<ChatMessage>> {
        Subscription::new(self.messages.clone(), self.messages_tx.subscribe())
    }

    /// Subscribe to loading flag values, starting with the current one.
    pub fn subscribe_loading(&self) -> Subscription<bool> {
        Subscription::new(self.loading, self.loading_tx.subscribe())
    }

    fn publish_messages(&self) {
        self.messages_tx.send(self.messages.clone()).ok();
    }
}

impl Default for TranscriptStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving side of a store subscription.
///
/// Yields the value held when the subscription was taken, then every value
/// published afterwards, in order. Errors are those of the underlying
/// broadcast channel: `Lagged(n)` when `n` publications were overwritten
/// before being read, `Closed` once the store is dropped and drained.
#[derive(Debug)]
pub struct Subscription<T> {
    current: Option<T>,
    rx: broadcast::Receiver<T>,
}

impl<T: Clone> Subscription<T> {
    fn new(current: T, rx: broadcast::Receiver<T>) -> Self {
        Self {
            current: Some(current),
            rx,
        }
    }

    /// Wait for the next value.
    pub async fn recv(&mut self) -> Result<T, RecvError> {
        match self.current.take() {
            Some(value) => Ok(value),
            None => self.rx.recv().await,
        }
    }

    /// Take the next value if one is ready.
    pub fn try_recv(&mut self) -> Result<T, TryRecvError> {
        match self.current.take() {
            Some(value) => Ok(value),
            None => self.rx.try_recv(),
        }
    }
}
