//! Repositories backed by the uniauth key/value [`Storage`].
//!
//! Email and phone uniqueness is enforced here as well as in the service:
//! index entries are checked and written in the same batch as the account,
//! under a write lock, so two racing inserts cannot both commit.

use crate::{errors::*, traits::*, types::*};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;
use uniauth_storage::{
    BatchExt, Storage, StorageError, CF_ACCOUNTS, CF_ACCOUNTS_BY_EMAIL, CF_ACCOUNTS_BY_PHONE,
    CF_ROLES, CF_ROLES_BY_DOMAIN, CF_ROLE_CODES, CF_USER_ROLES,
};
use uuid::Uuid;

/// Account, role and role-grant repositories over one [`Storage`]
pub struct StorageRepository<S: Storage> {
    storage: Arc<S>,
    write_lock: Mutex<()>,
}

fn email_key(email: &str) -> String {
    email.to_ascii_lowercase()
}

impl<S: Storage> StorageRepository<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
        }
    }

    async fn index_owner(&self, cf: &str, key: &str) -> Result<Option<Uuid>> {
        Ok(self.storage.get(cf, &key.to_string()).await?)
    }

    /// Reject `account` if its email or phone index entry belongs to
    /// another account.
    async fn check_indexes(&self, account: &Account) -> Result<()> {
        if let Some(owner) = self
            .index_owner(CF_ACCOUNTS_BY_EMAIL, &email_key(&account.email))
            .await?
        {
            if owner != account.account_id {
                return Err(AccountError::DuplicateEmail(account.email.clone()));
            }
        }

        if let Some(phone) = &account.phone {
            if let Some(owner) = self.index_owner(CF_ACCOUNTS_BY_PHONE, phone).await? {
                if owner != account.account_id {
                    return Err(AccountError::DuplicatePhone(phone.clone()));
                }
            }
        }

        Ok(())
    }

    async fn load_indexed(&self, cf: &str, key: &str) -> Result<Vec<Account>> {
        let Some(account_id) = self.index_owner(cf, key).await? else {
            return Ok(Vec::new());
        };
        let account: Option<Account> = self.storage.get(CF_ACCOUNTS, &account_id).await?;
        Ok(account.into_iter().collect())
    }

    /// Store or replace a role, keeping the domain index in step.
    ///
    /// Roles are owned by role management; this exists for provisioning
    /// local stores.
    pub async fn put_role(&self, role: &Role) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let previous: Option<Role> = self.storage.get(CF_ROLES, &role.role_id).await?;

        let mut batch = self.storage.batch();
        if let Some(previous) = previous {
            if previous.domain_id != role.domain_id {
                batch.delete(CF_ROLES_BY_DOMAIN, &(previous.domain_id, previous.role_id))?;
            }
        }
        batch.put(CF_ROLES, &role.role_id, role)?;
        batch.put(CF_ROLES_BY_DOMAIN, &(role.domain_id, role.role_id), &role.role_id)?;
        batch.commit().await?;
        Ok(())
    }

    /// Store or replace a role code
    pub async fn put_role_code(&self, role_code: &RoleCode) -> Result<()> {
        self.storage
            .put(CF_ROLE_CODES, &role_code.role_code_id, role_code)
            .await?;
        Ok(())
    }

    /// Grant `role_id` to `user_id`
    pub async fn assign_role(&self, user_id: Uuid, role_id: RoleId) -> Result<()> {
        let assignment = UserRoleAssignment { user_id, role_id };
        self.storage
            .put(CF_USER_ROLES, &(user_id, role_id), &assignment)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl<S: Storage + 'static> AccountRepository for StorageRepository<S> {
    async fn find_by_key(&self, account_id: Uuid) -> Result<Option<Account>> {
        Ok(self.storage.get(CF_ACCOUNTS, &account_id).await?)
    }

    async fn find_by_filter(&self, filter: &AccountFilter) -> Result<Vec<Account>> {
        let candidates = if let Some(email) = &filter.email {
            self.load_indexed(CF_ACCOUNTS_BY_EMAIL, &email_key(email)).await?
        } else if let Some(phone) = &filter.phone {
            self.load_indexed(CF_ACCOUNTS_BY_PHONE, phone).await?
        } else {
            let all: Vec<(Vec<u8>, Account)> = self.storage.scan_all(CF_ACCOUNTS).await?;
            all.into_iter().map(|(_, account)| account).collect()
        };

        Ok(candidates
            .into_iter()
            .filter(|account| filter.matches(account))
            .collect())
    }

    async fn insert(&self, account: &Account) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        if self.storage.exists(CF_ACCOUNTS, &account.account_id).await? {
            return Err(StorageError::AlreadyExists { cf: CF_ACCOUNTS }.into());
        }
        self.check_indexes(account).await?;

        let mut batch = self.storage.batch();
        batch.put(CF_ACCOUNTS, &account.account_id, account)?;
        batch.put(CF_ACCOUNTS_BY_EMAIL, &email_key(&account.email), &account.account_id)?;
        if let Some(phone) = &account.phone {
            batch.put(CF_ACCOUNTS_BY_PHONE, phone, &account.account_id)?;
        }
        batch.commit().await?;

        debug!("Account inserted: {}", account.account_id);
        Ok(())
    }

    async fn update(&self, account: &Account) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let existing = self
            .find_by_key(account.account_id)
            .await?
            .ok_or(AccountError::NotFound(account.account_id))?;
        self.check_indexes(account).await?;

        let mut batch = self.storage.batch();

        let old_email = email_key(&existing.email);
        let new_email = email_key(&account.email);
        if old_email != new_email {
            batch.delete(CF_ACCOUNTS_BY_EMAIL, &old_email)?;
        }
        batch.put(CF_ACCOUNTS_BY_EMAIL, &new_email, &account.account_id)?;

        if let Some(old_phone) = &existing.phone {
            if account.phone.as_ref() != Some(old_phone) {
                batch.delete(CF_ACCOUNTS_BY_PHONE, old_phone)?;
            }
        }
        if let Some(phone) = &account.phone {
            batch.put(CF_ACCOUNTS_BY_PHONE, phone, &account.account_id)?;
        }

        batch.put(CF_ACCOUNTS, &account.account_id, account)?;
        batch.commit().await?;

        debug!("Account updated: {}", account.account_id);
        Ok(())
    }
}

#[async_trait]
impl<S: Storage + 'static> RoleRepository for StorageRepository<S> {
    /// Roles are returned in ascending role id order.
    async fn find_by_domain(&self, domain_id: DomainId) -> Result<Vec<Role>> {
        let index: Vec<(Vec<u8>, RoleId)> = self
            .storage
            .get_by_prefix(CF_ROLES_BY_DOMAIN, &domain_id)
            .await?;

        let mut roles = Vec::with_capacity(index.len());
        for (_, role_id) in index {
            let role: Option<Role> = self.storage.get(CF_ROLES, &role_id).await?;
            roles.extend(role);
        }
        roles.sort_by_key(|role| role.role_id);

        Ok(roles)
    }

    async fn find_all_role_codes(&self) -> Result<Vec<RoleCode>> {
        let entries: Vec<(Vec<u8>, RoleCode)> = self.storage.scan_all(CF_ROLE_CODES).await?;
        let mut codes: Vec<RoleCode> = entries.into_iter().map(|(_, code)| code).collect();
        codes.sort_by_key(|code| code.role_code_id);
        Ok(codes)
    }
}

#[async_trait]
impl<S: Storage + 'static> UserRoleRepository for StorageRepository<S> {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<UserRoleAssignment>> {
        let entries: Vec<(Vec<u8>, UserRoleAssignment)> =
            self.storage.get_by_prefix(CF_USER_ROLES, &user_id).await?;
        Ok(entries.into_iter().map(|(_, assignment)| assignment).collect())
    }
}
