//! Salted credential digests using Argon2id, plus BLAKE3 fingerprints.

use crate::{constants::*, errors::*};
use argon2::{Algorithm, Argon2, Params};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use blake3::Hasher as Blake3Hasher;
use rand::RngCore;
use subtle::ConstantTimeEq;

/// Argon2id cost parameters used for credential digests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Config {
    /// Memory cost in KiB
    pub memory_cost_kib: u32,
    /// Number of iterations
    pub time_cost: u32,
    /// Degree of parallelism
    pub parallelism: u32,
    /// Digest length in bytes
    pub output_len: usize,
}

impl Default for Argon2Config {
    fn default() -> Self {
        Self {
            memory_cost_kib: argon2_params::MEMORY_COST,
            time_cost: argon2_params::TIME_COST,
            parallelism: argon2_params::PARALLELISM,
            output_len: argon2_params::OUTPUT_LENGTH,
        }
    }
}

impl Argon2Config {
    /// Build Argon2 parameters, rejecting values outside Argon2's limits.
    pub fn params(&self) -> Result<Params> {
        Params::new(
            self.memory_cost_kib,
            self.time_cost,
            self.parallelism,
            Some(self.output_len),
        )
        .map_err(|e| CryptoError::InvalidParameters(e.to_string()))
    }
}

/// Hash data using BLAKE3
pub fn blake3_hash(data: &[u8]) -> [u8; 32] {
    let mut hasher = Blake3Hasher::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Short hex fingerprint of an identifier, safe to write to logs.
pub fn fingerprint(value: &str) -> String {
    let hash = blake3_hash(value.as_bytes());
    hex::encode(&hash[..8])
}

/// Compute the salted one-way digest of a password.
///
/// Returns the raw Argon2id output; the salt is not embedded, so callers
/// store it alongside the digest.
pub fn digest_password(password: &[u8], salt: &[u8], config: &Argon2Config) -> Result<Vec<u8>> {
    let argon2 = Argon2::new(Algorithm::Argon2id, argon2_params::VERSION, config.params()?);

    let mut output = vec![0u8; config.output_len];
    argon2
        .hash_password_into(password, salt, &mut output)
        .map_err(|e| CryptoError::Argon2Failed(e.to_string()))?;

    Ok(output)
}

/// Generate a random salt for credential digests
pub fn generate_salt() -> Vec<u8> {
    let mut salt = vec![0u8; SALT_SIZE];
    rand::thread_rng().fill_bytes(&mut salt);
    salt
}

/// Encode bytes for storage (standard base64)
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode a stored base64 value back into bytes
pub fn decode(text: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(text)
        .map_err(|e| CryptoError::InvalidEncoding(e.to_string()))
}

/// Securely compare two byte slices in constant time.
///
/// Slices of different length compare unequal.
pub fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
