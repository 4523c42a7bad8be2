//! Error types for the assistant chat.

use fabsense_core::error::FabsenseError;

/// Errors from the chat engine.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("a reply is still being generated")]
    ReplyPending,
    #[error("invalid keyword index: {0}")]
    InvalidIndex(String),
    #[error("export error: {0}")]
    Export(String),
}

impl From<FabsenseError> for ChatError {
    fn from(err: FabsenseError) -> Self {
        ChatError::Export(err.to_string())
    }
}

impl From<std::io::Error> for ChatError {
    fn from(err: std::io::Error) -> Self {
        ChatError::Export(err.to_string())
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(err: serde_json::Error) -> Self {
        ChatError::Export(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_error_display() {
        assert_eq!(ChatError::EmptyMessage.to_string(), "message cannot be empty");
        assert_eq!(
            ChatError::ReplyPending.to_string(),
            "a reply is still being generated"
        );
        assert_eq!(
            ChatError::InvalidIndex("category 'x' has no keywords".to_string()).to_string(),
            "invalid keyword index: category 'x' has no keywords"
        );
        assert_eq!(
            ChatError::Export("disk full".to_string()).to_string(),
            "export error: disk full"
        );
    }

    #[test]
    fn test_chat_error_from_fabsense_error() {
        let err: ChatError = FabsenseError::Serialization("bad".to_string()).into();
        assert!(matches!(err, ChatError::Export(_)));
        assert!(err.to_string().contains("bad"));
    }

    #[test]
    fn test_chat_error_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: ChatError = io.into();
        assert!(matches!(err, ChatError::Export(_)));
        assert!(err.to_string().contains("read-only"));
    }
}
