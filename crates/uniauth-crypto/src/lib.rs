//! # uniauth-crypto
//!
//! Credential primitives for the uniauth account service.
//!
//! This crate provides the capabilities the account lifecycle core consumes
//! as opaque operations:
//!
//! - Random initial passwords that always satisfy the password rule
//! - Cryptographically random salts
//! - Salted one-way digests (Argon2id raw output)
//! - Text-safe encoding of digests and salts (standard base64)
//!
//! ## Security Properties
//!
//! - Generated plaintext passwords are held in `Zeroizing` buffers
//! - Digest comparison is constant-time
//! - No unsafe code

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod constants;
pub mod credentials;
pub mod errors;
pub mod hashing;
pub mod password;
pub mod utils;

pub use constants::*;
pub use credentials::Argon2Credentials;
pub use errors::{CryptoError, Result};
pub use hashing::*;
pub use password::{generate_password, PasswordRule};
pub use utils::current_timestamp;
