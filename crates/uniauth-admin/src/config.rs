use anyhow::{Context, Result};
use std::path::PathBuf;
use std::str::FromStr;
use uniauth_account_core::MAX_AUTH_FAIL_COUNT;
use uniauth_crypto::constants::{
    GENERATED_PASSWORD_LENGTH, PASSWORD_MAX_LENGTH, PASSWORD_MIN_LENGTH,
};
use uniauth_crypto::PasswordRule;

/// Admin tool configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to RocksDB database
    pub database_path: PathBuf,

    /// Value LOCK writes into an account's fail count
    pub max_fail_count: u8,

    pub password_min_length: usize,

    pub password_max_length: usize,

    /// Length of generated initial passwords
    pub generated_password_length: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let database_path = std::env::var("UNIAUTH_DATABASE_PATH")
            .unwrap_or_else(|_| "./data/uniauth.db".to_string())
            .into();

        let max_fail_count = env_or("UNIAUTH_MAX_FAIL_COUNT", MAX_AUTH_FAIL_COUNT)?;
        let password_min_length = env_or("UNIAUTH_PASSWORD_MIN_LENGTH", PASSWORD_MIN_LENGTH)?;
        let password_max_length = env_or("UNIAUTH_PASSWORD_MAX_LENGTH", PASSWORD_MAX_LENGTH)?;
        let generated_password_length =
            env_or("UNIAUTH_GENERATED_PASSWORD_LENGTH", GENERATED_PASSWORD_LENGTH)?;

        let config = Config {
            database_path,
            max_fail_count,
            password_min_length,
            password_max_length,
            generated_password_length,
        };
        config.password_rule().check_bounds().context(
            "UNIAUTH_PASSWORD_MIN_LENGTH/UNIAUTH_PASSWORD_MAX_LENGTH admit no password",
        )?;

        Ok(config)
    }

    pub fn password_rule(&self) -> PasswordRule {
        PasswordRule {
            min_length: self.password_min_length,
            max_length: self.password_max_length,
        }
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(value) => value
            .parse()
            .with_context(|| format!("{} has an invalid value: {}", key, value)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_default() {
        let value: u8 = env_or("UNIAUTH_TEST_UNSET_VARIABLE", 7).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn test_from_env_rejects_unusable_password_rule() {
        // Only this test touches the password length variables
        std::env::set_var("UNIAUTH_PASSWORD_MIN_LENGTH", "1");
        std::env::set_var("UNIAUTH_PASSWORD_MAX_LENGTH", "1");
        assert!(Config::from_env().is_err());

        std::env::set_var("UNIAUTH_PASSWORD_MIN_LENGTH", "20");
        std::env::set_var("UNIAUTH_PASSWORD_MAX_LENGTH", "10");
        assert!(Config::from_env().is_err());

        std::env::set_var("UNIAUTH_PASSWORD_MIN_LENGTH", "2");
        std::env::set_var("UNIAUTH_PASSWORD_MAX_LENGTH", "2");
        let config = Config::from_env().unwrap();
        assert_eq!(config.password_rule().max_length, 2);

        std::env::remove_var("UNIAUTH_PASSWORD_MIN_LENGTH");
        std::env::remove_var("UNIAUTH_PASSWORD_MAX_LENGTH");
    }

    #[test]
    fn test_env_or_rejects_garbage() {
        std::env::set_var("UNIAUTH_TEST_GARBAGE_VARIABLE", "ten");
        let result: Result<u8> = env_or("UNIAUTH_TEST_GARBAGE_VARIABLE", 7);
        assert!(result.is_err());
    }
}
