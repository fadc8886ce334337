//! Password value object and the configured credential hasher.
//!
//! `CredentialHasher` owns the argon2id cost parameters; `Password` wraps a
//! stored PHC hash string and knows how to verify a candidate against it.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use once_cell::sync::OnceCell;

use crate::config::HashConfig;
use crate::errors::{AppError, AppResult};

/// Secret hashed once per hasher and used when a login names an unknown user.
const DECOY_SECRET: &str = "decoy-secret-never-matches";

/// Hashed password value object.
///
/// Immutable, compared by value.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output (security)
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Create a Password from an existing hash (from database).
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    ///
    /// Cost parameters are read back from the PHC string, so hashes made
    /// under an older configuration still verify. A malformed hash never
    /// matches.
    pub fn verify(&self, plain_text: &str) -> bool {
        match PasswordHash::new(&self.hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(plain_text.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!("Stored password hash is malformed: {}", e);
                false
            }
        }
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Password {}

/// Argon2id hasher built from explicit cost parameters.
#[derive(Clone)]
pub struct CredentialHasher {
    argon2: Argon2<'static>,
    decoy: OnceCell<Password>,
}

impl std::fmt::Debug for CredentialHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialHasher")
            .field("params", self.argon2.params())
            .finish()
    }
}

impl CredentialHasher {
    /// Build a hasher, rejecting cost parameters argon2 cannot run with.
    pub fn new(config: &HashConfig) -> AppResult<Self> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| AppError::hashing(format!("Invalid hash parameters: {}", e)))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            decoy: OnceCell::new(),
        })
    }

    /// Hash a secret with a fresh random salt.
    pub fn hash(&self, plain_text: &str) -> AppResult<Password> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::hashing(format!("Password hash failed: {}", e)))?;
        Ok(Password::from_hash(hash.to_string()))
    }

    /// Check a candidate secret against a stored hash.
    pub fn verify(&self, hashed: &str, candidate: &str) -> bool {
        Password::from_hash(hashed.to_string()).verify(candidate)
    }

    /// A real hash that no caller knows the secret of.
    ///
    /// Verifying against it costs the same as verifying a genuine user.
    pub fn decoy(&self) -> AppResult<&Password> {
        self.decoy.get_or_try_init(|| self.hash(DECOY_SECRET))
    }
}
