use anyhow::Result;
use sea_orm::EntityTrait;

use super::memory_db;
use crate::errors::ModelError;
use crate::user;

#[tokio::test]
async fn test_create_and_find_by_email() -> Result<()> {
    let db = memory_db().await?;

    let created = user::create(&db, "a@a.com", "0011223344556677.abcdef").await?;
    assert_eq!(created.email, "a@a.com");

    let found = user::find_by_email(&db, "a@a.com").await?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, created.id);
    assert_eq!(found[0].password, "0011223344556677.abcdef");

    let by_id = user::Entity::find_by_id(created.id).one(&db).await?;
    assert!(by_id.is_some());
    Ok(())
}

#[tokio::test]
async fn test_find_unknown_email_is_empty() -> Result<()> {
    let db = memory_db().await?;
    user::create(&db, "a@a.com", "aa.bb").await?;
    assert!(user::find_by_email(&db, "x@x.com").await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_duplicate_email_hits_unique_key() -> Result<()> {
    let db = memory_db().await?;
    user::create(&db, "dup@a.com", "aa.bb").await?;

    let err = user::create(&db, "dup@a.com", "cc.dd").await.unwrap_err();
    assert!(matches!(err, ModelError::Conflict(_)), "unexpected error: {err:?}");
    assert_eq!(user::find_by_email(&db, "dup@a.com").await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_blank_fields_rejected_before_insert() -> Result<()> {
    let db = memory_db().await?;
    assert!(matches!(user::create(&db, " ", "aa.bb").await, Err(ModelError::Validation(_))));
    assert!(matches!(user::create(&db, "a@a.com", "").await, Err(ModelError::Validation(_))));
    assert!(user::Entity::find().all(&db).await?.is_empty());
    Ok(())
}
