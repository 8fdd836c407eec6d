//! Account Core error types.

use thiserror::Error;
use uuid::Uuid;

/// Stable, machine-checkable error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed input, duplicates, password rule failures
    Validation,
    /// Referenced account does not exist
    NotFound,
    /// Account status blocks the requested action
    Frozen,
    /// Underlying store failure
    Storage,
    /// Credential primitive or other internal failure
    Internal,
}

/// Account Core errors
#[derive(Debug, Error)]
pub enum AccountError {
    /// One or more required parameters were absent
    #[error("Required parameter missing: {0}")]
    MissingParameter(String),

    /// Email already used by another account
    #[error("Duplicate email: {0}")]
    DuplicateEmail(String),

    /// Phone already used by another account
    #[error("Duplicate phone: {0}")]
    DuplicatePhone(String),

    /// Password rejected by the password rule
    #[error("Password does not satisfy the password rule")]
    PasswordRuleViolation,

    /// Action name outside the supported set
    #[error("Unknown account action: {0}")]
    UnknownAction(String),

    /// Status value outside the supported set
    #[error("Invalid account status: {0}")]
    InvalidStatus(u8),

    /// Account not found
    #[error("Account not found: {0}")]
    NotFound(Uuid),

    /// Account is frozen
    #[error("Account {0} is frozen: only status changes are allowed")]
    AccountFrozen(Uuid),

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(#[from] uniauth_storage::StorageError),

    /// Cryptographic error
    #[error("Cryptographic error: {0}")]
    Crypto(#[from] uniauth_crypto::CryptoError),
}

impl AccountError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::MissingParameter(_)
            | AccountError::DuplicateEmail(_)
            | AccountError::DuplicatePhone(_)
            | AccountError::PasswordRuleViolation
            | AccountError::UnknownAction(_)
            | AccountError::InvalidStatus(_) => ErrorKind::Validation,
            AccountError::NotFound(_) => ErrorKind::NotFound,
            AccountError::AccountFrozen(_) => ErrorKind::Frozen,
            AccountError::Storage(_) => ErrorKind::Storage,
            AccountError::Crypto(_) => ErrorKind::Internal,
        }
    }

    /// True for validation failures, including frozen-account rejections
    pub fn is_validation(&self) -> bool {
        matches!(self.kind(), ErrorKind::Validation | ErrorKind::Frozen)
    }

    pub(crate) fn missing(names: &[&str]) -> Self {
        AccountError::MissingParameter(names.join(", "))
    }
}

/// Result type for Account Core operations
pub type Result<T> = std::result::Result<T, AccountError>;
