//! Auth module: domain, digest, directory abstraction and service.
//!
//! The service owns salting, hashing and comparison; lookup and creation of
//! user records are delegated to a `UserDirectory` implementation.

pub mod digest;
pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use digest::{KdfParams, PasswordDigest};
pub use domain::User;
pub use errors::{AuthError, DirectoryError};
pub use repository::UserDirectory;
pub use service::CredentialService;
