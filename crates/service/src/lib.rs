//! Service layer for account credentials.
//! - Signup/signin business logic independent of any web framework.
//! - Persistence reached only through the `UserDirectory` trait.
//! - Bootstrap helpers wiring configuration, logging and the sea-orm adapter.

pub mod auth;
pub mod runtime;
#[cfg(test)]
pub mod test_support;
