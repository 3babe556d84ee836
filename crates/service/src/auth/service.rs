use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::digest::{KdfParams, PasswordDigest};
use super::domain::User;
use super::errors::{AuthError, DirectoryError};
use super::repository::UserDirectory;

/// Signup/signin over a [`UserDirectory`], independent of web framework.
pub struct CredentialService<D: UserDirectory> {
    directory: Arc<D>,
    kdf: KdfParams,
}

impl<D: UserDirectory> CredentialService<D> {
    pub fn new(directory: Arc<D>, kdf: KdfParams) -> Self {
        Self { directory, kdf }
    }

    pub fn directory(&self) -> &Arc<D> {
        &self.directory
    }

    /// Register `email` with a salted digest of `password`.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{CredentialService, KdfParams, repository::memory::MemoryUserDirectory};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MemoryUserDirectory::default());
    /// let kdf = KdfParams { memory_kib: 64, iterations: 1, ..KdfParams::default() };
    /// let svc = CredentialService::new(repo, kdf);
    /// let user = tokio_test::block_on(svc.signup("user@example.com", "Secret123")).unwrap();
    /// assert_eq!(user.email, "user@example.com");
    /// assert_ne!(user.password, "Secret123");
    /// ```
    #[instrument(skip(self, email, password), fields(email = %email))]
    pub async fn signup(&self, email: &str, password: &str) -> Result<User, AuthError> {
        validate(email, password)?;
        let existing = self.directory.find(email).await?;
        if !existing.is_empty() {
            debug!(matches = existing.len(), "email already registered");
            return Err(AuthError::DuplicateIdentifier);
        }

        let digest = PasswordDigest::generate(password, &self.kdf)?;
        // the storage unique key still catches a concurrent signup that slipped past the check
        let user = self.directory
            .create(email, &digest.to_string())
            .await
            .map_err(|e| match e {
                DirectoryError::AlreadyExists(_) => AuthError::DuplicateIdentifier,
                other => AuthError::Directory(other),
            })?;
        info!(user_id = %user.id, "user_registered");
        Ok(user)
    }

    /// Authenticate `email` with `password` and return the stored record.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthError, CredentialService, KdfParams, repository::memory::MemoryUserDirectory};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MemoryUserDirectory::default());
    /// let kdf = KdfParams { memory_kib: 64, iterations: 1, ..KdfParams::default() };
    /// let svc = CredentialService::new(repo, kdf);
    /// tokio_test::block_on(svc.signup("u@e.com", "Passw0rd")).unwrap();
    /// let user = tokio_test::block_on(svc.signin("u@e.com", "Passw0rd")).unwrap();
    /// assert_eq!(user.email, "u@e.com");
    /// let err = tokio_test::block_on(svc.signin("u@e.com", "nope")).unwrap_err();
    /// assert!(matches!(err, AuthError::InvalidCredential));
    /// ```
    #[instrument(skip(self, email, password), fields(email = %email))]
    pub async fn signin(&self, email: &str, password: &str) -> Result<User, AuthError> {
        validate(email, password)?;
        let mut matches = self.directory.find(email).await?;
        if matches.len() > 1 {
            warn!(matches = matches.len(), "multiple users share one email");
            return Err(AuthError::Integrity(format!("{} users registered under one email", matches.len())));
        }
        let Some(user) = matches.pop() else {
            debug!("signin_failed: unknown email");
            return Err(AuthError::IdentifierNotFound);
        };

        let digest = PasswordDigest::parse(&user.password)?;
        if !digest.verify(password, &self.kdf)? {
            debug!(user_id = %user.id, "signin_failed: bad password");
            return Err(AuthError::InvalidCredential);
        }
        info!(user_id = %user.id, "user_signed_in");
        Ok(user)
    }
}

fn validate(email: &str, password: &str) -> Result<(), AuthError> {
    if email.trim().is_empty() {
        return Err(AuthError::Validation("email required".into()));
    }
    if password.is_empty() {
        return Err(AuthError::Validation("password required".into()));
    }
    Ok(())
}
