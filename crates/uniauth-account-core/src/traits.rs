//! Account Core trait definitions.
//!
//! Persistence and credential algorithms are collaborators injected into
//! [`crate::AccountLifecycleService`].

use crate::{errors::Result, types::*};
use async_trait::async_trait;
use uuid::Uuid;
use zeroize::Zeroizing;

/// Account record storage
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Look up an account by id
    async fn find_by_key(&self, account_id: Uuid) -> Result<Option<Account>>;

    /// All accounts matching `filter`
    async fn find_by_filter(&self, filter: &AccountFilter) -> Result<Vec<Account>>;

    /// Insert a new account.
    ///
    /// Implementations must enforce email/phone uniqueness themselves; the
    /// service-level check does not close the race between two inserts.
    async fn insert(&self, account: &Account) -> Result<()>;

    /// Overwrite an existing account with `account`
    async fn update(&self, account: &Account) -> Result<()>;
}

/// Read access to roles and role codes
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Roles defined under a domain
    async fn find_by_domain(&self, domain_id: DomainId) -> Result<Vec<Role>>;

    /// Every role code
    async fn find_all_role_codes(&self) -> Result<Vec<RoleCode>>;
}

/// Read access to role grants
#[async_trait]
pub trait UserRoleRepository: Send + Sync {
    /// Roles granted to a user, across all domains
    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<UserRoleAssignment>>;
}

/// Credential capabilities consumed as opaque operations
pub trait CredentialProvider: Send + Sync {
    /// Initial plaintext credential satisfying the password rule
    fn generate_random_password(&self) -> Zeroizing<String>;

    /// Fresh random salt material
    fn generate_salt(&self) -> Vec<u8>;

    /// One-way salted digest
    fn digest(&self, password: &str, salt: &[u8]) -> Result<Vec<u8>>;

    /// Text encoding for storage
    fn encode(&self, bytes: &[u8]) -> String;

    /// Password policy predicate
    fn validate_password_rule(&self, password: &str) -> bool;
}

/// Account lifecycle operations
#[async_trait]
pub trait AccountLifecycle: Send + Sync {
    /// Create an account with a generated password.
    ///
    /// The returned value carries the plaintext password; it is not stored.
    async fn create_account(&self, request: CreateAccountRequest) -> Result<ProvisionedAccount>;

    /// Apply one administrative action to an account
    async fn update_account(&self, request: UpdateAccountRequest) -> Result<()>;

    /// Get an account by id
    async fn get_account(&self, account_id: Uuid) -> Result<AccountSummary>;

    /// Roles of a domain, each marked with whether `user_id` holds it.
    ///
    /// Order follows the role repository and is not guaranteed stable across
    /// store implementations.
    async fn get_roles_for_user(
        &self,
        user_id: Option<Uuid>,
        domain_id: Option<DomainId>,
    ) -> Result<Vec<RoleView>>;
}
