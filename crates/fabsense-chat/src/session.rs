//! Chat session: owns one conversation and its in-flight reply.
//!
//! A send appends the user message and schedules the assistant reply after a
//! random "thinking" delay. While that reply is pending further sends are
//! rejected. The reply runs as a tokio task whose handle the session keeps, so
//! it can be awaited, cancelled, or aborted when the session is dropped.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use fabsense_core::config::ChatConfig;
use fabsense_core::types::SessionId;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::task::JoinHandle;

use crate::conversation::{ConversationExport, ConversationLog, Message, Role};
use crate::error::ChatError;
use crate::index::KeywordIndex;
use crate::selector::ResponseSelector;

struct SessionState {
    log: ConversationLog,
    generating: bool,
    rng: StdRng,
}

/// One user's conversation with the assistant.
pub struct ChatSession {
    id: SessionId,
    user_label: String,
    delay_min_ms: u64,
    delay_max_ms: u64,
    selector: ResponseSelector,
    state: Arc<Mutex<SessionState>>,
    pending: Option<JoinHandle<()>>,
}

impl ChatSession {
    /// Create a session over the builtin index with an OS-seeded RNG.
    pub fn new(config: &ChatConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Create a session with an explicit randomness source.
    ///
    /// The RNG drives both the reply delay and the choice among a category's
    /// responses, so a seeded RNG makes a session fully reproducible.
    pub fn with_rng(config: &ChatConfig, rng: StdRng) -> Self {
        let id = SessionId::generate(&config.session_prefix);
        tracing::info!(session_id = %id, "Chat session started");
        Self {
            id,
            user_label: config.user_label.clone(),
            delay_min_ms: config.reply_delay_min_ms.min(config.reply_delay_max_ms),
            delay_max_ms: config.reply_delay_max_ms,
            selector: ResponseSelector::default(),
            state: Arc::new(Mutex::new(SessionState {
                log: ConversationLog::new(),
                generating: false,
                rng,
            })),
            pending: None,
        }
    }

    /// Replace the keyword index replies are selected from.
    pub fn with_index(mut self, index: Arc<KeywordIndex>) -> Self {
        self.selector = ResponseSelector::new(index);
        self
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Submit a user message and schedule the assistant reply.
    ///
    /// Must be called from within a tokio runtime. Returns the delay after
    /// which the reply will be appended.
    pub fn send(&mut self, text: &str) -> Result<Duration, ChatError> {
        let message = text.trim();
        if message.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let delay = {
            let mut state = lock(&self.state);
            if state.generating {
                tracing::debug!(session_id = %self.id, "Send rejected, reply in flight");
                return Err(ChatError::ReplyPending);
            }
            state.log.append(Message::user(message));
            state.generating = true;
            Duration::from_millis(state.rng.random_range(self.delay_min_ms..=self.delay_max_ms))
        };

        let state = Arc::clone(&self.state);
        let selector = self.selector.clone();
        let question = message.to_string();
        let session_id = self.id.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut state = lock(&state);
            let selection = selector.select(&question, &mut state.rng);
            tracing::debug!(
                session_id = %session_id,
                category = selection.category.as_deref().unwrap_or("fallback"),
                "Reply generated"
            );
            state.log.append(Message::assistant(selection));
            state.generating = false;
        }));

        tracing::debug!(session_id = %self.id, delay_ms = delay.as_millis() as u64, "Reply scheduled");
        Ok(delay)
    }

    /// Wait for the pending reply, if any, and return it.
    ///
    /// Cancel-safe: dropping the returned future leaves the reply pending.
    pub async fn wait_for_reply(&mut self) -> Option<Message> {
        let handle = self.pending.as_mut()?;
        let joined = handle.await;
        self.pending = None;
        if let Err(e) = joined {
            tracing::warn!(session_id = %self.id, error = %e, "Reply task did not complete");
            lock(&self.state).generating = false;
            return None;
        }
        lock(&self.state)
            .log
            .messages()
            .last()
            .filter(|m| m.role == Role::Assistant)
            .cloned()
    }

    /// Abort the pending reply and accept new sends. Returns whether a reply was pending.
    pub fn cancel_pending(&mut self) -> bool {
        let Some(handle) = self.pending.take() else {
            return false;
        };
        handle.abort();
        let mut state = lock(&self.state);
        let was_generating = state.generating;
        state.generating = false;
        if was_generating {
            tracing::info!(session_id = %self.id, "Pending reply cancelled");
        }
        was_generating
    }

    /// Whether a reply task exists that has not been awaited or cancelled.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_generating(&self) -> bool {
        lock(&self.state).generating
    }

    /// Empty the conversation. A reply still pending is cancelled with it.
    pub fn clear(&mut self) {
        self.cancel_pending();
        lock(&self.state).log.clear();
        tracing::info!(session_id = %self.id, "Conversation cleared");
    }

    pub fn messages(&self) -> Vec<Message> {
        lock(&self.state).log.messages().to_vec()
    }

    pub fn len(&self) -> usize {
        lock(&self.state).log.len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.state).log.is_empty()
    }

    /// Starter questions are offered until the first user message.
    pub fn suggestions_visible(&self) -> bool {
        lock(&self.state).log.user_message_count() == 0
    }

    pub fn export_at(&self, now: DateTime<Utc>) -> ConversationExport {
        lock(&self.state).log.export(&self.id, &self.user_label, now)
    }

    pub fn export(&self) -> ConversationExport {
        self.export_at(Utc::now())
    }

    /// Write the export artifact into `dir` and return its path.
    pub fn write_export(&self, dir: &Path) -> Result<PathBuf, ChatError> {
        self.export().write_to(dir)
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        tracing::debug!(session_id = %self.id, "Chat session ended");
    }
}

fn lock(state: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{Category, Response};

    fn fast_config() -> ChatConfig {
        ChatConfig {
            reply_delay_min_ms: 5,
            reply_delay_max_ms: 10,
            ..ChatConfig::default()
        }
    }

    fn session() -> ChatSession {
        ChatSession::with_rng(&fast_config(), StdRng::seed_from_u64(42))
    }

    #[tokio::test]
    async fn test_send_then_reply() {
        let mut s = session();
        let delay = s.send("What's the yield trend?").unwrap();
        assert!(delay >= Duration::from_millis(5) && delay <= Duration::from_millis(10));
        assert!(s.is_generating());
        assert_eq!(s.len(), 1);

        let reply = s.wait_for_reply().await.unwrap();
        assert_eq!(reply.role, Role::Assistant);
        assert_eq!(reply.meta.unwrap().category.as_deref(), Some("yield"));
        assert!(!s.is_generating());
        assert_eq!(s.len(), 2);
    }

    #[tokio::test]
    async fn test_second_send_rejected_while_pending() {
        let mut s = session();
        s.send("What's the yield trend?").unwrap();
        let err = s.send("Which equipment needs attention?").unwrap_err();
        assert!(matches!(err, ChatError::ReplyPending));
        assert_eq!(s.len(), 1);

        s.wait_for_reply().await;
        assert!(s.send("Which equipment needs attention?").is_ok());
        assert_eq!(s.len(), 3);
    }

    #[tokio::test]
    async fn test_wait_for_reply_is_cancel_safe() {
        let config = ChatConfig {
            reply_delay_min_ms: 50,
            reply_delay_max_ms: 50,
            ..ChatConfig::default()
        };
        let mut s = ChatSession::with_rng(&config, StdRng::seed_from_u64(42));
        s.send("yield").unwrap();
        let timed_out =
            tokio::time::timeout(Duration::from_millis(1), s.wait_for_reply()).await;
        assert!(timed_out.is_err());
        assert!(s.has_pending());
        assert!(s.is_generating());
        assert_eq!(s.len(), 1);

        let reply = s.wait_for_reply().await;
        assert!(reply.is_some());
        assert!(!s.has_pending());
        assert_eq!(s.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_message_is_ignored() {
        let mut s = session();
        assert!(matches!(s.send("   "), Err(ChatError::EmptyMessage)));
        assert!(s.is_empty());
        assert!(!s.is_generating());
    }

    #[tokio::test]
    async fn test_message_is_trimmed() {
        let mut s = session();
        s.send("  trace the lineage \n").unwrap();
        assert_eq!(s.messages()[0].text, "trace the lineage");
        s.wait_for_reply().await;
    }

    #[tokio::test]
    async fn test_cancel_pending_drops_reply() {
        let mut s = session();
        s.send("forecast").unwrap();
        assert!(s.cancel_pending());
        assert!(!s.is_generating());

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(s.len(), 1);
        assert!(!s.cancel_pending());
        assert!(s.wait_for_reply().await.is_none());
    }

    #[tokio::test]
    async fn test_drop_aborts_pending_reply() {
        let mut s = session();
        s.send("forecast").unwrap();
        let state = Arc::clone(&s.state);
        drop(s);

        tokio::time::sleep(Duration::from_millis(30)).await;
        let state = lock(&state);
        assert_eq!(state.log.len(), 1);
        assert!(state.generating);
    }

    #[tokio::test]
    async fn test_clear_resets_log_and_suggestions() {
        let mut s = session();
        assert!(s.suggestions_visible());
        s.send("yield").unwrap();
        assert!(!s.suggestions_visible());
        s.wait_for_reply().await;

        s.clear();
        assert!(s.is_empty());
        assert!(s.suggestions_visible());
        assert!(s.export().messages.is_empty());
    }

    #[tokio::test]
    async fn test_clear_cancels_pending_reply() {
        let mut s = session();
        s.send("yield").unwrap();
        s.clear();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(s.is_empty());
        assert!(!s.is_generating());
    }

    #[tokio::test]
    async fn test_export_carries_session_details() {
        let mut s = session();
        s.send("asdkfj random text").unwrap();
        s.wait_for_reply().await;

        let export = s.export();
        assert_eq!(export.user, "Engineer Chen");
        assert_eq!(&export.session_id, s.id());
        assert!(export.session_id.as_str().starts_with("demo-session-"));
        assert_eq!(export.messages.len(), 2);
        assert_eq!(
            export.messages[1].text,
            Response::fallback("asdkfj random text").text
        );
    }

    #[tokio::test]
    async fn test_seeded_sessions_are_reproducible() {
        let mut a = session();
        let mut b = session();
        assert_eq!(a.send("yield").unwrap(), b.send("yield").unwrap());
        a.wait_for_reply().await;
        b.wait_for_reply().await;
        assert_eq!(a.messages()[1].text, b.messages()[1].text);
    }

    #[tokio::test]
    async fn test_custom_index() {
        let index = KeywordIndex::new(vec![Category::new(
            "litho",
            &["overlay"],
            vec![Response::new("Overlay within spec", &[], &[])],
        )
        .unwrap()])
        .unwrap();
        let mut s = session().with_index(Arc::new(index));
        s.send("check overlay").unwrap();
        let reply = s.wait_for_reply().await.unwrap();
        assert_eq!(reply.text, "Overlay within spec");
    }

    #[tokio::test]
    async fn test_zero_delay() {
        let config = ChatConfig {
            reply_delay_min_ms: 0,
            reply_delay_max_ms: 0,
            ..ChatConfig::default()
        };
        let mut s = ChatSession::with_rng(&config, StdRng::seed_from_u64(1));
        assert_eq!(s.send("defect").unwrap(), Duration::ZERO);
        assert!(s.wait_for_reply().await.is_some());
    }
}
