use thiserror::Error;

/// Errors from the flat-file snapshot store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt backing file {path}: {message}")]
    Corrupt { path: String, message: String },
}

/// Errors from session registry reads.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("chat '{0}' not found")]
    NotFound(String),
}

/// Errors from contact directory operations.
#[derive(Debug, Error)]
pub enum ContactError {
    #[error("contact details already exist for chat '{0}'")]
    AlreadyExists(String),

    #[error("no contact details for chat '{0}'")]
    NotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_error_display() {
        let err = SessionError::NotFound("abc123".to_string());
        assert_eq!(err.to_string(), "chat 'abc123' not found");
    }

    #[test]
    fn test_contact_error_display() {
        let err = ContactError::AlreadyExists("abc123".to_string());
        assert!(err.to_string().contains("abc123"));
    }

    #[test]
    fn test_store_error_from_io() {
        let err: StoreError = std::io::Error::other("disk full").into();
        assert!(err.to_string().contains("disk full"));
    }
}
