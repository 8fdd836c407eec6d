use anyhow::{Context, Result};
use std::sync::Arc;
use uniauth_account_core::{AccountLifecycleService, AccountPolicy, StorageRepository};
use uniauth_crypto::{Argon2Config, Argon2Credentials};
use uniauth_storage::RocksDbStorage;

use crate::config::Config;

pub type Repository = StorageRepository<RocksDbStorage>;
pub type Service = AccountLifecycleService<Repository, Repository, Repository, Argon2Credentials>;

/// Store and service shared by every command
pub struct AdminState {
    /// Direct repository access for seeding role data
    pub repository: Arc<Repository>,
    pub service: Service,
}

impl AdminState {
    pub fn new(config: &Config) -> Result<Self> {
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let storage = Arc::new(
            RocksDbStorage::open(&config.database_path)
                .with_context(|| format!("Failed to open {}", config.database_path.display()))?,
        );
        let repository = Arc::new(StorageRepository::new(storage));

        let credentials = Argon2Credentials::new(Argon2Config::default(), config.password_rule())
            .context("Invalid credential configuration")?
            .with_generated_length(config.generated_password_length);

        let service = AccountLifecycleService::with_storage_repository(
            Arc::clone(&repository),
            Arc::new(credentials),
        )
        .with_policy(AccountPolicy {
            max_fail_count: config.max_fail_count,
        });

        Ok(AdminState {
            repository,
            service,
        })
    }
}
