//! Cryptographic error types.

use thiserror::Error;

/// Cryptographic operation errors
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Argon2 digest computation failed
    #[error("Argon2 hashing failed: {0}")]
    Argon2Failed(String),

    /// Argon2 cost parameters rejected
    #[error("Invalid Argon2 parameters: {0}")]
    InvalidParameters(String),

    /// Stored text could not be decoded back into bytes
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// Password rule bounds admit no generated password
    #[error("Invalid password rule: {0}")]
    InvalidPasswordRule(String),
}

/// Result type for cryptographic operations
pub type Result<T> = std::result::Result<T, CryptoError>;
