//! Terminal rendering of transcript updates.

use std::io::{self, Write};

use sapentia_core::{ChatMessage, ChatRole, Subscription};
use tokio::sync::broadcast::error::RecvError;
use tracing::warn;

/// Prints messages as they land in the transcript.
///
/// Only the tail beyond what was already shown is printed, so each message
/// appears once no matter how many snapshots mention it.
#[derive(Debug, Default)]
pub struct TranscriptView {
    shown: usize,
}

impl TranscriptView {
    /// Create a view that has shown nothing yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a transcript snapshot.
    pub fn on_messages(&mut self, snapshot: &[ChatMessage], out: &mut impl Write) -> io::Result<()> {
        if snapshot.len() < self.shown {
            writeln!(out, "-- conversation cleared --")?;
            self.shown = 0;
        }
        for message in &snapshot[self.shown..] {
            // The user's own lines are already on screen.
            if message.role == ChatRole::Ai {
                writeln!(out, "{}", message.content)?;
            }
        }
        self.shown = snapshot.len();
        out.flush()
    }

    /// Forget what was shown after missing snapshots.
    ///
    /// A skipped snapshot may have been a clear, so the next one is drawn in
    /// full instead of being diffed against a stale count.
    pub fn resync(&mut self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "-- catching up --")?;
        self.shown = 0;
        out.flush()
    }

    /// Render a loading flag change.
    pub fn on_loading(&mut self, loading: bool, out: &mut impl Write) -> io::Result<()> {
        if loading {
            writeln!(out, "...")?;
        }
        out.flush()
    }
}

/// Drive `view` from the store subscriptions until the store goes away.
pub async fn run_view(
    mut view: TranscriptView,
    mut messages: Subscription<Vec<ChatMessage>>,
    mut loading: Subscription<bool>,
) -> io::Result<()> {
    let mut messages_open = true;
    let mut loading_open = true;

    while messages_open || loading_open {
        tokio::select! {
            update = messages.recv(), if messages_open => match update {
                Ok(snapshot) => view.on_messages(&snapshot, &mut io::stdout())?,
                Err(RecvError::Lagged(n)) => {
                    warn!(skipped = n, "Transcript view lagged");
                    view.resync(&mut io::stdout())?;
                }
                Err(RecvError::Closed) => messages_open = false,
            },
            update = loading.recv(), if loading_open => match update {
                Ok(flag) => view.on_loading(flag, &mut io::stderr())?,
                Err(RecvError::Lagged(n)) => warn!(skipped = n, "Loading view lagged"),
                Err(RecvError::Closed) => loading_open = false,
            },
        }
    }
    Ok(())
}

/// Print the whole transcript with timestamps.
pub fn print_transcript(messages: &[ChatMessage], out: &mut impl Write) -> io::Result<()> {
    if messages.is_empty() {
        writeln!(out, "(no messages)")?;
    }
    for message in messages {
        let when = message
            .timestamp
            .map(format_timestamp)
            .unwrap_or_else(|| "-".to_string());
        writeln!(out, "[{}] {:<4} {}", when, message.role, message.content)?;
    }
    out.flush()
}

fn format_timestamp(ms: i64) -> String {
    match chrono::DateTime::<chrono::Utc>::from_timestamp_millis(ms) {
        Some(datetime) => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => ms.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sapentia_core::{NewMessage, TranscriptStore};
    use tokio::sync::broadcast::error::TryRecvError;

    fn rendered(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_prints_only_new_replies() {
        let mut store = TranscriptStore::new();
        let mut view = TranscriptView::new();
        let mut out = Vec::new();

        store.append(NewMessage::user("hi"));
        view.on_messages(store.messages(), &mut out).unwrap();
        store.append(NewMessage::ai("hello"));
        view.on_messages(store.messages(), &mut out).unwrap();
        view.on_messages(store.messages(), &mut out).unwrap();

        assert_eq!(rendered(out), "hello\n");
    }

    #[test]
    fn test_clear_resets_view() {
        let mut store = TranscriptStore::new();
        let mut view = TranscriptView::new();
        let mut out = Vec::new();

        store.append(NewMessage::ai("first"));
        view.on_messages(store.messages(), &mut out).unwrap();
        store.clear();
        view.on_messages(store.messages(), &mut out).unwrap();
        store.append(NewMessage::ai("again"));
        view.on_messages(store.messages(), &mut out).unwrap();

        assert_eq!(rendered(out), "first\n-- conversation cleared --\nagain\n");
    }

    #[test]
    fn test_lag_across_clear_redraws() {
        let mut store = TranscriptStore::with_capacity(1);
        let mut rx = store.subscribe_messages();
        let mut view = TranscriptView::new();
        let mut out = Vec::new();

        view.on_messages(&rx.try_recv().unwrap(), &mut out).unwrap();
        store.append(NewMessage::ai("a"));
        view.on_messages(&rx.try_recv().unwrap(), &mut out).unwrap();

        store.clear();
        store.append(NewMessage::ai("b"));
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Lagged(1))));
        view.resync(&mut out).unwrap();
        view.on_messages(&rx.try_recv().unwrap(), &mut out).unwrap();

        assert_eq!(rendered(out), "a\n-- catching up --\nb\n");
    }

    #[test]
    fn test_loading_indicator() {
        let mut view = TranscriptView::new();
        let mut out = Vec::new();

        view.on_loading(true, &mut out).unwrap();
        view.on_loading(false, &mut out).unwrap();

        assert_eq!(rendered(out), "...\n");
    }

    #[test]
    fn test_print_transcript() {
        let mut store = TranscriptStore::new();
        store.append(NewMessage::user("hi").with_timestamp(0));
        store.append(NewMessage::new(ChatRole::Ai, "hello"));

        let mut out = Vec::new();
        print_transcript(store.messages(), &mut out).unwrap();

        assert_eq!(
            rendered(out),
            "[1970-01-01 00:00:00] user hi\n[-] ai   hello\n"
        );
    }

    #[test]
    fn test_print_empty_transcript() {
        let mut out = Vec::new();
        print_transcript(&[], &mut out).unwrap();
        assert_eq!(rendered(out), "(no messages)\n");
    }

    #[tokio::test]
    async fn test_run_view_ends_with_store() {
        let mut store = TranscriptStore::new();
        let handle = tokio::spawn(run_view(
            TranscriptView::new(),
            store.subscribe_messages(),
            store.subscribe_loading(),
        ));

        store.append(NewMessage::user("hi"));
        store.set_loading(true);
        drop(store);

        handle.await.unwrap().unwrap();
    }
}
