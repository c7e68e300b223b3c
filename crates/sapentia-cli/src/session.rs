//! A chat session: one transcript plus the client that feeds it.

use std::io::{self, Write};

use sapentia_client::{ChatClient, ChatTransport, HttpTransport};
use sapentia_core::{ChatRequest, NewMessage, TranscriptStore};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{error, info, warn};

use crate::view::print_transcript;

/// Owns the transcript for one conversation and drives the request cycle.
pub struct ChatSession<T = HttpTransport> {
    client: ChatClient<T>,
    store: TranscriptStore,
    model_id: Option<String>,
    assisted_learning: bool,
}

impl<T: ChatTransport> ChatSession<T> {
    /// Create a session with an empty transcript.
    pub fn new(client: ChatClient<T>) -> Self {
        Self {
            client,
            store: TranscriptStore::new(),
            model_id: None,
            assisted_learning: false,
        }
    }

    /// Builder method to select the backend model.
    pub fn with_model(mut self, model_id: Option<String>) -> Self {
        self.model_id = model_id;
        self
    }

    /// Builder method to toggle assisted learning.
    pub fn with_assisted_learning(mut self, enabled: bool) -> Self {
        self.assisted_learning = enabled;
        self
    }

    /// Transcript state, for reading and subscribing.
    pub fn store(&self) -> &TranscriptStore {
        &self.store
    }

    /// Start the conversation over.
    pub fn clear(&mut self) {
        info!(messages = self.store.len(), "Clearing conversation");
        self.store.clear();
    }

    /// Record `text`, ask the backend, record and return the reply.
    ///
    /// The loading flag is raised for the duration of the request. The reply is
    /// always appended, including the fallback text on failure.
    pub async fn submit(&mut self, text: &str) -> String {
        self.store.append(NewMessage::user(text));
        self.store.set_loading(true);

        let reply = {
            let messages = self.store.messages();
            let history = messages
                .split_last()
                .map_or(&[][..], |(_, earlier)| earlier);
            let request = ChatRequest::new(text)
                .with_model(self.model_id.as_deref())
                .with_assisted_learning(self.assisted_learning)
                .with_history(history);
            self.client.send_request(&request).await
        };

        self.store.set_loading(false);
        self.store.append(NewMessage::ai(reply.clone()));
        reply
    }

    /// Drive the session from `input` until `/quit`, end of input, or a read error.
    ///
    /// `/clear` and `/history` are handled here, blank lines are ignored and
    /// everything else is submitted. Lines that are not UTF-8 are skipped.
    pub async fn run_lines<R>(&mut self, input: R, out: &mut impl Write)
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                    warn!(error = %e, "Skipping unreadable input line");
                    continue;
                }
                Err(e) => {
                    error!(error = %e, "Failed to read input");
                    break;
                }
            };

            match line.trim() {
                "" => {}
                "/quit" => break,
                "/clear" => self.clear(),
                "/history" => {
                    if let Err(e) = print_transcript(self.store.messages(), out) {
                        warn!(error = %e, "Failed to print transcript");
                    }
                }
                text => {
                    self.submit(text).await;
                }
            }
        }
    }
}
