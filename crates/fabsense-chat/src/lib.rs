//! Canned fab-analytics assistant.
//!
//! Scores free-text questions against a static keyword index, replies with
//! fixed analysis payloads after a simulated thinking delay, and records the
//! exchange in an exportable conversation log.

pub mod action;
mod builtin;
pub mod conversation;
pub mod error;
pub mod format;
pub mod index;
pub mod selector;
pub mod session;
pub mod suggestions;

pub use action::{ActionOutcome, ChartId, QuickAction};
pub use conversation::{ConversationExport, ConversationLog, Message, ResponseMeta, Role};
pub use error::ChatError;
pub use index::{Category, KeywordIndex, Response};
pub use selector::{ResponseSelector, Selection};
pub use session::ChatSession;
pub use suggestions::SUGGESTED_QUESTIONS;
