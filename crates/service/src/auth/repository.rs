use async_trait::async_trait;

use super::domain::User;
use super::errors::DirectoryError;

/// Persistence collaborator for user records.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Every record registered under `email`; empty when there is none.
    async fn find(&self, email: &str) -> Result<Vec<User>, DirectoryError>;
    /// Store a new record and return it with its assigned id.
    async fn create(&self, email: &str, password: &str) -> Result<User, DirectoryError>;
}

/// In-process directory for tests and embedding.
pub mod memory {
    use super::*;
    use tokio::sync::Mutex;
    use uuid::Uuid;

    /// Enforces email uniqueness under its lock, like the unique key on the
    /// `users` table does for the sea-orm adapter.
    #[derive(Default)]
    pub struct MemoryUserDirectory {
        users: Mutex<Vec<User>>,
    }

    impl MemoryUserDirectory {
        pub async fn len(&self) -> usize {
            self.users.lock().await.len()
        }

        pub async fn is_empty(&self) -> bool {
            self.users.lock().await.is_empty()
        }
    }

    #[async_trait]
    impl UserDirectory for MemoryUserDirectory {
        async fn find(&self, email: &str) -> Result<Vec<User>, DirectoryError> {
            let users = self.users.lock().await;
            Ok(users.iter().filter(|u| u.email == email).cloned().collect())
        }

        async fn create(&self, email: &str, password: &str) -> Result<User, DirectoryError> {
            let mut users = self.users.lock().await;
            if users.iter().any(|u| u.email == email) {
                return Err(DirectoryError::AlreadyExists(email.to_string()));
            }
            let user = User { id: Uuid::new_v4(), email: email.to_string(), password: password.to_string() };
            users.push(user.clone());
            Ok(user)
        }
    }
}
