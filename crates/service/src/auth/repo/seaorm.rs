use sea_orm::DatabaseConnection;

use models::errors::ModelError;

use crate::auth::domain::User;
use crate::auth::errors::DirectoryError;
use crate::auth::repository::UserDirectory;

pub struct SeaOrmUserDirectory {
    pub db: DatabaseConnection,
}

impl From<models::user::Model> for User {
    fn from(m: models::user::Model) -> Self {
        User { id: m.id, email: m.email, password: m.password }
    }
}

impl From<ModelError> for DirectoryError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Conflict(msg) => DirectoryError::AlreadyExists(msg),
            ModelError::Validation(msg) => DirectoryError::Rejected(msg),
            ModelError::Db(msg) => DirectoryError::Unavailable(msg),
        }
    }
}

#[async_trait::async_trait]
impl UserDirectory for SeaOrmUserDirectory {
    async fn find(&self, email: &str) -> Result<Vec<User>, DirectoryError> {
        let found = models::user::find_by_email(&self.db, email).await?;
        Ok(found.into_iter().map(User::from).collect())
    }

    async fn create(&self, email: &str, password: &str) -> Result<User, DirectoryError> {
        let created = models::user::create(&self.db, email, password).await?;
        Ok(created.into())
    }
}
