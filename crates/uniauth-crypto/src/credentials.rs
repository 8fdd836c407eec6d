//! Argon2id-backed credential capabilities.

use crate::{
    constants::GENERATED_PASSWORD_LENGTH,
    errors::Result,
    hashing::{
        constant_time_compare, decode, digest_password, encode, generate_salt, Argon2Config,
    },
    password::{generate_password, PasswordRule},
};
use zeroize::Zeroizing;

/// Bundles the digest parameters, the password rule and the generated
/// password length into one injectable value.
#[derive(Debug, Clone, Default)]
pub struct Argon2Credentials {
    argon2: Argon2Config,
    rule: PasswordRule,
    generated_length: Option<usize>,
}

impl Argon2Credentials {
    /// Create credentials with explicit digest parameters and password rule.
    ///
    /// Fails when the Argon2 parameters are out of range or the rule's
    /// bounds admit no password.
    pub fn new(argon2: Argon2Config, rule: PasswordRule) -> Result<Self> {
        argon2.params()?;
        rule.check_bounds()?;
        Ok(Self {
            argon2,
            rule,
            generated_length: None,
        })
    }

    /// Override the length of generated initial passwords.
    ///
    /// The length is clamped into the rule's bounds.
    pub fn with_generated_length(mut self, length: usize) -> Self {
        self.generated_length = Some(length);
        self
    }

    /// The password rule in force
    pub fn rule(&self) -> &PasswordRule {
        &self.rule
    }

    /// Generate an initial plaintext password that satisfies the rule
    pub fn generate_password(&self) -> Zeroizing<String> {
        // Bounds were checked in `new`, so `lower <= max_length`
        let lower = self.rule.min_length.max(2);
        let length = self
            .generated_length
            .unwrap_or(GENERATED_PASSWORD_LENGTH)
            .clamp(lower, self.rule.max_length);
        generate_password(length)
    }

    /// Generate fresh salt material
    pub fn generate_salt(&self) -> Vec<u8> {
        generate_salt()
    }

    /// Salted digest of a password
    pub fn digest(&self, password: &str, salt: &[u8]) -> Result<Vec<u8>> {
        digest_password(password.as_bytes(), salt, &self.argon2)
    }

    /// Text encoding for storage
    pub fn encode(&self, bytes: &[u8]) -> String {
        encode(bytes)
    }

    /// Inverse of [`Self::encode`]
    pub fn decode(&self, text: &str) -> Result<Vec<u8>> {
        decode(text)
    }

    /// Check a password against the rule
    pub fn validate_password_rule(&self, password: &str) -> bool {
        self.rule.validate(password)
    }

    /// Recompute the digest of `password` with the stored salt and compare it
    /// against the stored digest in constant time.
    pub fn verify(&self, password: &str, stored_hash: &str, stored_salt: &str) -> Result<bool> {
        let salt = self.decode(stored_salt)?;
        let expected = self.decode(stored_hash)?;
        let actual = self.digest(password, &salt)?;
        Ok(constant_time_compare(&actual, &expected))
    }
}
