//! Error types for the response engine.

use parley_core::error::ParleyError;

/// Errors from the response engine.
///
/// A classification miss is never an error; it falls through to the
/// clarification reply. Only collaborator failures surface here.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("context retrieval failed: {0}")]
    Context(String),
}

impl From<ParleyError> for ChatError {
    fn from(err: ParleyError) -> Self {
        ChatError::Context(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_error_display() {
        let err = ChatError::Context("store unreachable".to_string());
        assert_eq!(
            err.to_string(),
            "context retrieval failed: store unreachable"
        );
    }

    #[test]
    fn test_chat_error_from_parley_error() {
        let err: ChatError = ParleyError::Storage("connection lost".to_string()).into();
        assert!(matches!(err, ChatError::Context(_)));
        assert!(err.to_string().contains("connection lost"));
    }
}
