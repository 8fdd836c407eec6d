//! Password rule and initial password generation.

use crate::{constants::*, errors::*};
use rand::{seq::SliceRandom, Rng};
use zeroize::Zeroizing;

/// Policy a plaintext password must satisfy before it is accepted.
///
/// A password passes when its length (in characters) is within
/// `min_length..=max_length`, it contains at least one ASCII letter and one
/// ASCII digit, and it contains no whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordRule {
    /// Minimum number of characters
    pub min_length: usize,
    /// Maximum number of characters
    pub max_length: usize,
}

impl Default for PasswordRule {
    fn default() -> Self {
        Self {
            min_length: PASSWORD_MIN_LENGTH,
            max_length: PASSWORD_MAX_LENGTH,
        }
    }
}

impl PasswordRule {
    /// Reject bounds that no password can satisfy.
    ///
    /// A compliant password needs at least one letter and one digit, so
    /// `max_length` must be at least 2.
    pub fn check_bounds(&self) -> Result<()> {
        if self.min_length > self.max_length {
            return Err(CryptoError::InvalidPasswordRule(format!(
                "min_length {} exceeds max_length {}",
                self.min_length, self.max_length
            )));
        }
        if self.max_length < 2 {
            return Err(CryptoError::InvalidPasswordRule(format!(
                "max_length {} is below 2",
                self.max_length
            )));
        }
        Ok(())
    }

    /// Check a password against the rule
    pub fn validate(&self, password: &str) -> bool {
        let length = password.chars().count();
        if length < self.min_length || length > self.max_length {
            return false;
        }

        password.chars().any(|c| c.is_ascii_alphabetic())
            && password.chars().any(|c| c.is_ascii_digit())
            && !password.chars().any(char::is_whitespace)
    }
}

/// Generate a random password of `length` characters.
///
/// The result always contains at least one letter and one digit, so it
/// passes any `PasswordRule` whose bounds admit `length`.
pub fn generate_password(length: usize) -> Zeroizing<String> {
    let mut rng = rand::thread_rng();
    let length = length.max(2);

    let mut chars: Zeroizing<Vec<u8>> = Zeroizing::new(Vec::with_capacity(length));
    chars.push(pick(&mut rng, PASSWORD_LETTERS));
    chars.push(pick(&mut rng, PASSWORD_DIGITS));

    while chars.len() < length {
        let set = match rng.gen_range(0..10) {
            0..=5 => PASSWORD_LETTERS,
            6..=8 => PASSWORD_DIGITS,
            _ => PASSWORD_SYMBOLS,
        };
        chars.push(pick(&mut rng, set));
    }
    chars.shuffle(&mut rng);

    Zeroizing::new(chars.iter().map(|&b| b as char).collect())
}

fn pick<R: Rng>(rng: &mut R, set: &[u8]) -> u8 {
    set[rng.gen_range(0..set.len())]
}
