//! Credential constants.
//!
//! Changing any of these affects every credential written afterwards; stored
//! digests keep verifying only while the Argon2 parameters they were computed
//! with are still in use.

/// Size of per-credential salt in bytes (256 bits)
pub const SALT_SIZE: usize = 32;

/// Length of generated initial passwords
pub const GENERATED_PASSWORD_LENGTH: usize = 12;

/// Default minimum password length accepted by the password rule
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Default maximum password length accepted by the password rule
pub const PASSWORD_MAX_LENGTH: usize = 64;

/// Letters used when generating initial passwords
pub const PASSWORD_LETTERS: &[u8] = b"abcdefghijkmnopqrstuvwxyzABCDEFGHJKLMNPQRSTUVWXYZ";

/// Digits used when generating initial passwords
pub const PASSWORD_DIGITS: &[u8] = b"23456789";

/// Symbols used when generating initial passwords
pub const PASSWORD_SYMBOLS: &[u8] = b"!@#$%^&*-_=+";

/// Argon2id parameters for credential digests
pub mod argon2_params {
    use argon2::Version;

    /// Memory cost: 64 MiB
    pub const MEMORY_COST: u32 = 64 * 1024;

    /// Time cost: 3 iterations
    pub const TIME_COST: u32 = 3;

    /// Parallelism: 1 thread
    pub const PARALLELISM: u32 = 1;

    /// Output length: 32 bytes
    pub const OUTPUT_LENGTH: usize = 32;

    /// Argon2 version
    pub const VERSION: Version = Version::V0x13;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_bounds_are_consistent() {
        let min = PASSWORD_MIN_LENGTH;
        let max = PASSWORD_MAX_LENGTH;
        let generated = GENERATED_PASSWORD_LENGTH;
        assert!(min <= generated && generated <= max);
    }

    #[test]
    fn test_alphabets_have_no_whitespace() {
        for set in [PASSWORD_LETTERS, PASSWORD_DIGITS, PASSWORD_SYMBOLS] {
            assert!(set.iter().all(|b| !b.is_ascii_whitespace()));
        }
    }
}
