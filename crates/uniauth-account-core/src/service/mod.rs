//! Account lifecycle service implementation.

mod creation;
mod mutation;
mod roles;
mod uniqueness;

use crate::{errors::*, repository::StorageRepository, traits::*, types::*};
use async_trait::async_trait;
use std::sync::Arc;
use uniauth_storage::Storage;
use uuid::Uuid;

/// Account lifecycle service implementation
pub struct AccountLifecycleService<A, R, U, C>
where
    A: AccountRepository,
    R: RoleRepository,
    U: UserRoleRepository,
    C: CredentialProvider,
{
    accounts: Arc<A>,
    roles: Arc<R>,
    user_roles: Arc<U>,
    credentials: Arc<C>,
    policy: AccountPolicy,
}

impl<A, R, U, C> AccountLifecycleService<A, R, U, C>
where
    A: AccountRepository,
    R: RoleRepository,
    U: UserRoleRepository,
    C: CredentialProvider,
{
    /// Create a new account lifecycle service
    pub fn new(
        accounts: Arc<A>,
        roles: Arc<R>,
        user_roles: Arc<U>,
        credentials: Arc<C>,
    ) -> Self {
        Self {
            accounts,
            roles,
            user_roles,
            credentials,
            policy: AccountPolicy::default(),
        }
    }

    /// Replace the default policy
    pub fn with_policy(mut self, policy: AccountPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &AccountPolicy {
        &self.policy
    }

    /// Digest `password` under a fresh salt, returning the encoded
    /// `(password_hash, password_salt)` pair.
    fn seal_password(&self, password: &str) -> Result<(String, String)> {
        let salt = self.credentials.generate_salt();
        let digest = self.credentials.digest(password, &salt)?;
        Ok((
            self.credentials.encode(&digest),
            self.credentials.encode(&salt),
        ))
    }
}

impl<S, C>
    AccountLifecycleService<StorageRepository<S>, StorageRepository<S>, StorageRepository<S>, C>
where
    S: Storage + 'static,
    C: CredentialProvider,
{
    /// Service whose three repositories are all served by one
    /// [`StorageRepository`].
    pub fn with_storage_repository(
        repository: Arc<StorageRepository<S>>,
        credentials: Arc<C>,
    ) -> Self {
        Self::new(
            Arc::clone(&repository),
            Arc::clone(&repository),
            repository,
            credentials,
        )
    }
}

#[async_trait]
impl<A, R, U, C> AccountLifecycle for AccountLifecycleService<A, R, U, C>
where
    A: AccountRepository + 'static,
    R: RoleRepository + 'static,
    U: UserRoleRepository + 'static,
    C: CredentialProvider + 'static,
{
    async fn create_account(&self, request: CreateAccountRequest) -> Result<ProvisionedAccount> {
        self.create_account_internal(request).await
    }

    async fn update_account(&self, request: UpdateAccountRequest) -> Result<()> {
        self.update_account_internal(request).await
    }

    async fn get_account(&self, account_id: Uuid) -> Result<AccountSummary> {
        let account = self
            .accounts
            .find_by_key(account_id)
            .await?
            .ok_or(AccountError::NotFound(account_id))?;
        Ok(AccountSummary::from(&account))
    }

    async fn get_roles_for_user(
        &self,
        user_id: Option<Uuid>,
        domain_id: Option<DomainId>,
    ) -> Result<Vec<RoleView>> {
        self.get_roles_for_user_internal(user_id, domain_id).await
    }
}

/// Trim surrounding whitespace; blank strings become absent
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
