use common::{FieldKind, Projection, ProjectionError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Domain user as returned by the directory.
///
/// `password` is the stored `salt.hash` digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password: String,
}

/// Outbound view of a [`User`]: `id` and `email` only.
pub fn user_projection() -> Result<Projection, ProjectionError> {
    Projection::new([("id", FieldKind::String), ("email", FieldKind::String)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn projection_strips_digest() {
        let user = User { id: Uuid::nil(), email: "a@a.com".into(), password: "00ff.abcd".into() };
        let shaped = user_projection().unwrap().shape(&user).unwrap();
        assert_eq!(shaped, json!({"id": Uuid::nil().to_string(), "email": "a@a.com"}));
    }
}
