//! Shared glue for the credential workspace: tracing setup and response shaping.

pub mod serialize;
pub mod utils;

pub use serialize::{FieldKind, Projection, ProjectionError, ResponseShaper, ShapeError};
