use sea_orm::{entity::prelude::*, Set, DatabaseConnection, QueryOrder};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Registered user. `password` holds the `salt.hash` digest, never the raw secret.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub password: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create(db: &DatabaseConnection, email: &str, password: &str) -> Result<Model, ModelError> {
    if email.trim().is_empty() { return Err(ModelError::Validation("email required".into())); }
    if password.trim().is_empty() { return Err(ModelError::Validation("password digest required".into())); }
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_string()),
        password: Set(password.to_string()),
        created_at: Set(Utc::now().into()),
    };
    Ok(am.insert(db).await?)
}

/// All users registered under `email`, oldest first. Empty when none.
pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> Result<Vec<Model>, ModelError> {
    let found = Entity::find()
        .filter(Column::Email.eq(email))
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await?;
    Ok(found)
}
