//! Response shaping: reduce handler output to an allowlisted projection.
//!
//! A [`Projection`] names the fields a response may carry, each with the
//! JSON kind it is expected to have. [`ResponseShaper::intercept`] wraps a
//! handler call, serializes whatever it returns and keeps only the projected
//! fields, so internal attributes never reach the transport layer even when
//! the handler hands back a full record.

use std::future::Future;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

/// JSON kind a projected field must have. `null` satisfies every kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    Object,
    Array,
    Any,
}

impl FieldKind {
    fn admits(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (_, Value::Null)
                | (FieldKind::Any, _)
                | (FieldKind::String, Value::String(_))
                | (FieldKind::Number, Value::Number(_))
                | (FieldKind::Boolean, Value::Bool(_))
                | (FieldKind::Object, Value::Object(_))
                | (FieldKind::Array, Value::Array(_))
        )
    }
}

/// Malformed projection schema. Raised while building, never per request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("projection must allow at least one field")]
    Empty,
    #[error("projection field names must not be empty")]
    EmptyFieldName,
    #[error("field `{0}` listed more than once")]
    DuplicateField(String),
}

#[derive(Debug, Error)]
pub enum ShapeError {
    #[error("failed to serialize handler output: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
}

/// Field allowlist applied to every value passing through a shaper.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<Field>")]
pub struct Projection {
    fields: Vec<Field>,
}

impl TryFrom<Vec<Field>> for Projection {
    type Error = ProjectionError;

    fn try_from(fields: Vec<Field>) -> Result<Self, Self::Error> {
        if fields.is_empty() {
            return Err(ProjectionError::Empty);
        }
        for (idx, field) in fields.iter().enumerate() {
            if field.name.trim().is_empty() {
                return Err(ProjectionError::EmptyFieldName);
            }
            if fields[..idx].iter().any(|f| f.name == field.name) {
                return Err(ProjectionError::DuplicateField(field.name.clone()));
            }
        }
        Ok(Self { fields })
    }
}

impl Projection {
    /// Build a projection from `(name, kind)` pairs.
    ///
    /// ```
    /// use common::{FieldKind, Projection};
    /// use serde_json::json;
    ///
    /// let p = Projection::new([("id", FieldKind::Number), ("email", FieldKind::String)]).unwrap();
    /// let out = p.apply(json!({"id": 7, "email": "a@a.com", "password": "salt.hash"}));
    /// assert_eq!(out, json!({"id": 7, "email": "a@a.com"}));
    /// ```
    pub fn new<I, S>(fields: I) -> Result<Self, ProjectionError>
    where
        I: IntoIterator<Item = (S, FieldKind)>,
        S: Into<String>,
    {
        fields
            .into_iter()
            .map(|(name, kind)| Field { name: name.into(), kind })
            .collect::<Vec<_>>()
            .try_into()
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Apply the projection. Objects are filtered, arrays are projected
    /// element-wise and any other value is returned unchanged.
    pub fn apply(&self, value: Value) -> Value {
        match value {
            Value::Object(map) => self.project_object(map),
            Value::Array(items) => Value::Array(items.into_iter().map(|v| self.apply(v)).collect()),
            other => other,
        }
    }

    /// Serialize `data` and apply the projection to the result.
    pub fn shape<T: Serialize + ?Sized>(&self, data: &T) -> Result<Value, ShapeError> {
        let value = serde_json::to_value(data)?;
        Ok(self.apply(value))
    }

    fn project_object(&self, mut source: Map<String, Value>) -> Value {
        let mut out = Map::new();
        for field in &self.fields {
            match source.remove(&field.name) {
                Some(value) if field.kind.admits(&value) => {
                    out.insert(field.name.clone(), value);
                }
                Some(_) => {
                    debug!(field = %field.name, expected = ?field.kind, "dropping field with mismatched kind");
                }
                None => {}
            }
        }
        Value::Object(out)
    }
}

/// Post-processing hook composed explicitly around a handler call.
#[derive(Debug, Clone)]
pub struct ResponseShaper {
    projection: Projection,
}

impl ResponseShaper {
    pub fn new(projection: Projection) -> Self {
        Self { projection }
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Run `handler`, then shape its successful output. Handler errors are
    /// returned untouched.
    pub async fn intercept<F, Fut, T, E>(&self, handler: F) -> Result<Value, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        T: Serialize,
        E: From<ShapeError>,
    {
        let data = handler().await?;
        Ok(self.projection.shape(&data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user_projection() -> Projection {
        Projection::new([("id", FieldKind::String), ("email", FieldKind::String)]).unwrap()
    }

    #[test]
    fn keeps_only_allowlisted_fields() {
        let out = user_projection().apply(json!({
            "id": "u-1",
            "email": "a@a.com",
            "password": "abcd.ef01",
            "created_at": "2024-01-01T00:00:00Z"
        }));
        assert_eq!(out, json!({"id": "u-1", "email": "a@a.com"}));
    }

    #[test]
    fn missing_fields_are_omitted() {
        let out = user_projection().apply(json!({"email": "a@a.com"}));
        assert_eq!(out, json!({"email": "a@a.com"}));
    }

    #[test]
    fn arrays_are_projected_per_element() {
        let out = user_projection().apply(json!([
            {"id": "1", "email": "a@a.com", "password": "x.y"},
            {"id": "2", "email": "b@b.com", "password": "z.w"}
        ]));
        assert_eq!(out, json!([{"id": "1", "email": "a@a.com"}, {"id": "2", "email": "b@b.com"}]));
    }

    #[test]
    fn mismatched_kind_is_dropped_and_null_kept() {
        let p = Projection::new([("id", FieldKind::Number), ("email", FieldKind::String)]).unwrap();
        let out = p.apply(json!({"id": "not-a-number", "email": null}));
        assert_eq!(out, json!({"email": null}));
    }

    #[test]
    fn scalars_pass_through() {
        assert_eq!(user_projection().apply(json!(42)), json!(42));
        assert_eq!(user_projection().apply(Value::Null), Value::Null);
    }

    #[test]
    fn malformed_schemas_are_rejected() {
        let empty: [(&str, FieldKind); 0] = [];
        assert_eq!(Projection::new(empty).unwrap_err(), ProjectionError::Empty);
        assert_eq!(
            Projection::new([(" ", FieldKind::Any)]).unwrap_err(),
            ProjectionError::EmptyFieldName
        );
        assert_eq!(
            Projection::new([("id", FieldKind::Any), ("id", FieldKind::String)]).unwrap_err(),
            ProjectionError::DuplicateField("id".into())
        );
    }

    #[test]
    fn deserializes_from_field_list() {
        let p: Projection = serde_json::from_value(json!([
            {"name": "id", "kind": "string"},
            {"name": "admin", "kind": "boolean"}
        ]))
        .unwrap();
        assert_eq!(p.fields().len(), 2);
        let bad: Result<Projection, _> = serde_json::from_value(json!([]));
        assert!(bad.is_err());
    }

    #[derive(Serialize)]
    struct Record {
        id: String,
        email: String,
        password: String,
    }

    #[derive(Debug, Error)]
    enum HandlerError {
        #[error("boom")]
        Boom,
        #[error(transparent)]
        Shape(#[from] ShapeError),
    }

    #[tokio::test]
    async fn intercept_shapes_handler_output() {
        let shaper = ResponseShaper::new(user_projection());
        let out = shaper
            .intercept(|| async {
                Ok::<_, HandlerError>(Record { id: "u-9".into(), email: "z@z.com".into(), password: "s.h".into() })
            })
            .await
            .unwrap();
        assert_eq!(out, json!({"id": "u-9", "email": "z@z.com"}));
    }

    #[tokio::test]
    async fn intercept_passes_handler_errors_through() {
        let shaper = ResponseShaper::new(user_projection());
        let res = shaper.intercept(|| async { Err::<Record, _>(HandlerError::Boom) }).await;
        assert!(matches!(res, Err(HandlerError::Boom)));
    }
}
