//! Conversation log and its JSON export artifact.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fabsense_core::types::SessionId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::action::{ChartId, QuickAction};
use crate::error::ChatError;
use crate::selector::Selection;

/// Who sent a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// Reply metadata attached to assistant messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMeta {
    /// Matched category, `None` for the fallback reply.
    pub category: Option<String>,
    pub charts: Vec<ChartId>,
    pub actions: Vec<QuickAction>,
}

/// One exchanged message. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub role: Role,
    pub text: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::User,
            text: text.into(),
            created_at: Utc::now(),
            meta: None,
        }
    }

    pub fn assistant(selection: Selection) -> Self {
        let Selection {
            category, response, ..
        } = selection;
        Self {
            id: Uuid::new_v4(),
            role: Role::Assistant,
            text: response.text,
            created_at: Utc::now(),
            meta: Some(ResponseMeta {
                category,
                charts: response.charts,
                actions: response.actions,
            }),
        }
    }
}

/// Append-only ordered history of one session.
#[derive(Debug, Clone, Default)]
pub struct ConversationLog {
    messages: Vec<Message>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn user_message_count(&self) -> usize {
        self.messages.iter().filter(|m| m.role == Role::User).count()
    }

    /// Snapshot the log for download. The log itself is left untouched.
    pub fn export(
        &self,
        session_id: &SessionId,
        user: &str,
        now: DateTime<Utc>,
    ) -> ConversationExport {
        ConversationExport {
            timestamp: now,
            user: user.to_string(),
            session_id: session_id.clone(),
            messages: self.messages.clone(),
        }
    }
}

/// The downloadable conversation document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationExport {
    pub timestamp: DateTime<Utc>,
    pub user: String,
    pub session_id: SessionId,
    pub messages: Vec<Message>,
}

impl ConversationExport {
    /// `chat-export-YYYY-MM-DD.json`, dated by the export timestamp.
    pub fn file_name(&self) -> String {
        format!("chat-export-{}.json", self.timestamp.format("%Y-%m-%d"))
    }

    pub fn to_json_pretty(&self) -> Result<String, ChatError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the export into `dir`, creating it if needed. Returns the file path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ChatError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name());
        std::fs::write(&path, self.to_json_pretty()?)?;
        tracing::info!(
            path = %path.display(),
            messages = self.messages.len(),
            "Conversation exported"
        );
        Ok(path)
    }
}
