//! Stored password digests: `hex(salt) + "." + hex(argon2id(secret, salt))`.
//!
//! The hex-encoded salt string itself is the salt input to the KDF, so a
//! digest can be re-derived from its text form alone plus the [`KdfParams`].

use std::fmt;
use std::str::FromStr;

use argon2::{password_hash::Output, Algorithm, Argon2, Params, Version};
use rand::{rngs::OsRng, RngCore};
use thiserror::Error;

use super::errors::AuthError;

pub const SEPARATOR: char = '.';

/// Shortest stored salt text: hex of the 8-byte minimum in `auth.salt_len`.
pub const MIN_SALT_HEX_LEN: usize = 2 * 8;

/// Argon2id cost and sizing. Must be identical for signup and signin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KdfParams {
    pub salt_len: usize,
    pub hash_len: usize,
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self::from(&configs::AuthConfig::default())
    }
}

impl From<&configs::AuthConfig> for KdfParams {
    fn from(cfg: &configs::AuthConfig) -> Self {
        Self {
            salt_len: cfg.salt_len,
            hash_len: cfg.hash_len,
            memory_kib: cfg.memory_kib,
            iterations: cfg.iterations,
            parallelism: cfg.parallelism,
        }
    }
}

impl KdfParams {
    fn derive(&self, secret: &str, salt: &str) -> Result<Vec<u8>, AuthError> {
        let params = Params::new(self.memory_kib, self.iterations, self.parallelism, Some(self.hash_len))
            .map_err(|e| AuthError::Hash(e.to_string()))?;
        let mut out = vec![0u8; self.hash_len];
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
            .hash_password_into(secret.as_bytes(), salt.as_bytes(), &mut out)
            .map_err(|e| AuthError::Hash(e.to_string()))?;
        Ok(out)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DigestError {
    #[error("digest has no `.` separator")]
    MissingSeparator,
    #[error("digest has more than one `.` separator")]
    ExtraSeparator,
    #[error("digest salt is empty")]
    EmptySalt,
    #[error("digest hash is empty")]
    EmptyHash,
    #[error("digest hash is not valid hex")]
    InvalidHash,
    #[error("digest salt must be at least {MIN_SALT_HEX_LEN} hex characters")]
    InvalidSalt,
}

impl From<DigestError> for AuthError {
    fn from(e: DigestError) -> Self {
        AuthError::Integrity(e.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest {
    salt: String,
    hash: String,
}

impl PasswordDigest {
    /// Digest `secret` under a fresh random salt.
    pub fn generate(secret: &str, params: &KdfParams) -> Result<Self, AuthError> {
        let mut salt = vec![0u8; params.salt_len];
        OsRng.fill_bytes(&mut salt);
        Self::with_salt(secret, &hex::encode(salt), params)
    }

    pub fn with_salt(secret: &str, salt: &str, params: &KdfParams) -> Result<Self, AuthError> {
        let hash = params.derive(secret, salt)?;
        Ok(Self { salt: salt.to_string(), hash: hex::encode(hash) })
    }

    pub fn parse(encoded: &str) -> Result<Self, DigestError> {
        let (salt, hash) = encoded.split_once(SEPARATOR).ok_or(DigestError::MissingSeparator)?;
        if hash.contains(SEPARATOR) {
            return Err(DigestError::ExtraSeparator);
        }
        if salt.is_empty() {
            return Err(DigestError::EmptySalt);
        }
        if hash.is_empty() {
            return Err(DigestError::EmptyHash);
        }
        if hex::decode(hash).is_err() {
            return Err(DigestError::InvalidHash);
        }
        if salt.len() < MIN_SALT_HEX_LEN || !salt.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(DigestError::InvalidSalt);
        }
        Ok(Self { salt: salt.to_string(), hash: hash.to_string() })
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Re-derive `secret` under this digest's salt and compare in constant time.
    pub fn verify(&self, secret: &str, params: &KdfParams) -> Result<bool, AuthError> {
        let stored = hex::decode(&self.hash).map_err(|_| DigestError::InvalidHash)?;
        if stored.len() != params.hash_len {
            return Err(AuthError::Integrity(format!(
                "stored hash is {} bytes, expected {}",
                stored.len(),
                params.hash_len
            )));
        }
        let stored = Output::new(&stored).map_err(|e| AuthError::Integrity(e.to_string()))?;
        let candidate = params.derive(secret, &self.salt)?;
        let candidate = Output::new(&candidate).map_err(|e| AuthError::Hash(e.to_string()))?;
        // Output equality is constant-time
        Ok(stored == candidate)
    }
}

impl fmt::Display for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.salt, SEPARATOR, self.hash)
    }
}

impl FromStr for PasswordDigest {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
