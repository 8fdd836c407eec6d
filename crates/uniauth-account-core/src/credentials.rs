//! [`CredentialProvider`] backed by Argon2id.

use crate::{errors::Result, traits::CredentialProvider};
use uniauth_crypto::Argon2Credentials;
use zeroize::Zeroizing;

impl CredentialProvider for Argon2Credentials {
    fn generate_random_password(&self) -> Zeroizing<String> {
        self.generate_password()
    }

    fn generate_salt(&self) -> Vec<u8> {
        Argon2Credentials::generate_salt(self)
    }

    fn digest(&self, password: &str, salt: &[u8]) -> Result<Vec<u8>> {
        Ok(Argon2Credentials::digest(self, password, salt)?)
    }

    fn encode(&self, bytes: &[u8]) -> String {
        Argon2Credentials::encode(self, bytes)
    }

    fn validate_password_rule(&self, password: &str) -> bool {
        Argon2Credentials::validate_password_rule(self, password)
    }
}
