use thiserror::Error;

/// Failures reported by a `UserDirectory` implementation.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("user already exists: {0}")]
    AlreadyExists(String),
    #[error("user record rejected: {0}")]
    Rejected(String),
    #[error("user directory unavailable: {0}")]
    Unavailable(String),
}

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("email already in use")]
    DuplicateIdentifier,
    #[error("user not found")]
    IdentifierNotFound,
    #[error("bad password")]
    InvalidCredential,
    #[error("data integrity error: {0}")]
    Integrity(String),
    #[error("hashing error: {0}")]
    Hash(String),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 1001,
            AuthError::DuplicateIdentifier => 1002,
            AuthError::IdentifierNotFound => 1003,
            AuthError::InvalidCredential => 1004,
            AuthError::Hash(_) => 1101,
            AuthError::Directory(_) => 1200,
            AuthError::Integrity(_) => 1201,
        }
    }

    /// True when the caller supplied something wrong (4xx territory).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AuthError::Validation(_)
                | AuthError::DuplicateIdentifier
                | AuthError::IdentifierNotFound
                | AuthError::InvalidCredential
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_caller_contract() {
        assert_eq!(AuthError::DuplicateIdentifier.to_string(), "email already in use");
        assert_eq!(AuthError::IdentifierNotFound.to_string(), "user not found");
        assert_eq!(AuthError::InvalidCredential.to_string(), "bad password");
    }

    #[test]
    fn directory_errors_are_transparent() {
        let err: AuthError = DirectoryError::Unavailable("pool timed out".into()).into();
        assert_eq!(err.to_string(), "user directory unavailable: pool timed out");
        assert!(!err.is_client_error());
        assert_eq!(err.code(), 1200);
    }

    #[test]
    fn classification() {
        assert!(AuthError::InvalidCredential.is_client_error());
        assert!(AuthError::Validation("x".into()).is_client_error());
        assert!(!AuthError::Integrity("x".into()).is_client_error());
        assert!(!AuthError::Hash("x".into()).is_client_error());
    }
}
