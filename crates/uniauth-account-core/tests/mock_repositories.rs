//! Service behavior over in-memory repositories
//!
//! The service only talks to its injected collaborators, so these tests
//! check what it asks of them and what it passes through:
//! - Role views keep the repository's order
//! - Store failures propagate unchanged
//! - Rejected mutations never reach `update`

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use uniauth_account_core::{
    Account, AccountError, AccountFilter, AccountLifecycle, AccountLifecycleService,
    AccountRepository, AccountStatus, CreateAccountRequest, CredentialProvider, DomainId,
    ErrorKind, Result, Role, RoleCode, RoleRepository, UpdateAccountRequest, UserAction,
    UserRoleAssignment, UserRoleRepository,
};
use uniauth_storage::StorageError;
use uuid::Uuid;
use zeroize::Zeroizing;

#[derive(Default)]
struct MemoryAccounts {
    accounts: Mutex<Vec<Account>>,
    updates: Mutex<usize>,
    fail_writes: bool,
}

#[async_trait]
impl AccountRepository for MemoryAccounts {
    async fn find_by_key(&self, account_id: Uuid) -> Result<Option<Account>> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().find(|a| a.account_id == account_id).cloned())
    }

    async fn find_by_filter(&self, filter: &AccountFilter) -> Result<Vec<Account>> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().filter(|a| filter.matches(a)).cloned().collect())
    }

    async fn insert(&self, account: &Account) -> Result<()> {
        if self.fail_writes {
            return Err(StorageError::Database("disk full".to_string()).into());
        }
        self.accounts.lock().unwrap().push(account.clone());
        Ok(())
    }

    async fn update(&self, account: &Account) -> Result<()> {
        if self.fail_writes {
            return Err(StorageError::Database("disk full".to_string()).into());
        }
        *self.updates.lock().unwrap() += 1;
        let mut accounts = self.accounts.lock().unwrap();
        if let Some(slot) = accounts.iter_mut().find(|a| a.account_id == account.account_id) {
            *slot = account.clone();
        }
        Ok(())
    }
}

/// Roles returned exactly in the order they were given
struct FixedRoles {
    roles: Vec<Role>,
    codes: Vec<RoleCode>,
}

#[async_trait]
impl RoleRepository for FixedRoles {
    async fn find_by_domain(&self, domain_id: DomainId) -> Result<Vec<Role>> {
        Ok(self
            .roles
            .iter()
            .filter(|r| r.domain_id == domain_id)
            .cloned()
            .collect())
    }

    async fn find_all_role_codes(&self) -> Result<Vec<RoleCode>> {
        Ok(self.codes.clone())
    }
}

struct FixedGrants(Vec<UserRoleAssignment>);

#[async_trait]
impl UserRoleRepository for FixedGrants {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<UserRoleAssignment>> {
        Ok(self.0.iter().filter(|g| g.user_id == user_id).copied().collect())
    }
}

struct FailingGrants;

#[async_trait]
impl UserRoleRepository for FailingGrants {
    async fn find_by_user(&self, _user_id: Uuid) -> Result<Vec<UserRoleAssignment>> {
        Err(StorageError::Database("connection reset".to_string()).into())
    }
}

/// Deterministic credentials: the digest is the password followed by the salt
struct PlainCredentials;

impl CredentialProvider for PlainCredentials {
    fn generate_random_password(&self) -> Zeroizing<String> {
        Zeroizing::new("Initial1".to_string())
    }

    fn generate_salt(&self) -> Vec<u8> {
        Uuid::new_v4().as_bytes().to_vec()
    }

    fn digest(&self, password: &str, salt: &[u8]) -> Result<Vec<u8>> {
        let mut out = password.as_bytes().to_vec();
        out.extend_from_slice(salt);
        Ok(out)
    }

    fn encode(&self, bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }

    fn validate_password_rule(&self, password: &str) -> bool {
        password.len() >= 8
    }
}

fn role(role_id: u32, domain_id: u32, name: &str) -> Role {
    Role {
        role_id,
        domain_id,
        name: name.to_string(),
        role_code_id: role_id,
    }
}

fn service<U: UserRoleRepository>(
    accounts: MemoryAccounts,
    roles: FixedRoles,
    grants: U,
) -> AccountLifecycleService<MemoryAccounts, FixedRoles, U, PlainCredentials> {
    AccountLifecycleService::new(
        Arc::new(accounts),
        Arc::new(roles),
        Arc::new(grants),
        Arc::new(PlainCredentials),
    )
}

fn no_roles() -> FixedRoles {
    FixedRoles {
        roles: Vec::new(),
        codes: Vec::new(),
    }
}

#[tokio::test]
async fn test_role_view_keeps_repository_order() {
    let user = Uuid::new_v4();
    let roles = FixedRoles {
        roles: vec![
            role(30, 1, "Zeta"),
            role(10, 1, "Alpha"),
            role(20, 2, "Other"),
            role(5, 1, "Mid"),
        ],
        codes: vec![
            RoleCode {
                role_code_id: 10,
                code: "ALPHA".to_string(),
            },
            RoleCode {
                role_code_id: 5,
                code: "MID".to_string(),
            },
        ],
    };
    let grants = FixedGrants(vec![
        UserRoleAssignment { user_id: user, role_id: 5 },
        UserRoleAssignment { user_id: Uuid::new_v4(), role_id: 30 },
    ]);
    let service = service(MemoryAccounts::default(), roles, grants);

    let views = service.get_roles_for_user(Some(user), Some(1)).await.unwrap();
    let ids: Vec<u32> = views.iter().map(|v| v.role_id).collect();
    assert_eq!(ids, vec![30, 10, 5]);

    let checked: Vec<bool> = views.iter().map(|v| v.checked).collect();
    assert_eq!(checked, vec![false, false, true]);

    let codes: Vec<Option<&str>> = views.iter().map(|v| v.role_code.as_deref()).collect();
    assert_eq!(codes, vec![None, Some("ALPHA"), Some("MID")]);
}

#[tokio::test]
async fn test_store_failure_propagates() {
    let roles = FixedRoles {
        roles: vec![role(1, 1, "A")],
        codes: Vec::new(),
    };
    let service = service(MemoryAccounts::default(), roles, FailingGrants);

    let err = service
        .get_roles_for_user(Some(Uuid::new_v4()), Some(1))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Storage);
    assert!(matches!(
        err,
        AccountError::Storage(StorageError::Database(ref m)) if m == "connection reset"
    ));
}

#[tokio::test]
async fn test_empty_domain_skips_grant_lookup() {
    // FailingGrants would error if the service asked for grants
    let service = service(MemoryAccounts::default(), no_roles(), FailingGrants);
    let views = service
        .get_roles_for_user(Some(Uuid::new_v4()), Some(1))
        .await
        .unwrap();
    assert!(views.is_empty());
}

#[tokio::test]
async fn test_insert_failure_propagates() {
    let accounts = MemoryAccounts {
        fail_writes: true,
        ..Default::default()
    };
    let service = service(accounts, no_roles(), FixedGrants(Vec::new()));

    let err = service
        .create_account(CreateAccountRequest {
            name: "Ann".to_string(),
            phone: None,
            email: Some("ann@x.com".to_string()),
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Storage);
}

#[tokio::test]
async fn test_created_record_through_injected_credentials() {
    let accounts = Arc::new(MemoryAccounts::default());
    let service = AccountLifecycleService::new(
        Arc::clone(&accounts),
        Arc::new(no_roles()),
        Arc::new(FixedGrants(Vec::new())),
        Arc::new(PlainCredentials),
    );

    let created = service
        .create_account(CreateAccountRequest {
            name: "Ann".to_string(),
            phone: Some("555-1111".to_string()),
            email: Some("ann@x.com".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(created.initial_password.as_str(), "Initial1");

    let stored = accounts
        .find_by_key(created.account.account_id)
        .await
        .unwrap()
        .unwrap();
    // hex("Initial1") prefixes the digest, the salt follows
    assert!(stored.password_hash.starts_with("496e697469616c31"));
    assert!(stored.password_hash.ends_with(&stored.password_salt));
    assert_eq!(stored.status, AccountStatus::Active);
}

#[tokio::test]
async fn test_rejected_mutations_never_update() {
    let accounts = Arc::new(MemoryAccounts::default());
    let service = AccountLifecycleService::new(
        Arc::clone(&accounts),
        Arc::new(no_roles()),
        Arc::new(FixedGrants(Vec::new())),
        Arc::new(PlainCredentials),
    );
    let id = service
        .create_account(CreateAccountRequest {
            name: "Ann".to_string(),
            phone: None,
            email: Some("ann@x.com".to_string()),
        })
        .await
        .unwrap()
        .account
        .account_id;

    let rejected = [
        UpdateAccountRequest::new(UserAction::ResetPassword, id).with_password("short"),
        UpdateAccountRequest::new(UserAction::StatusChange, id),
        UpdateAccountRequest::new(UserAction::UpdateInfo, id),
        UpdateAccountRequest::new(UserAction::Lock, Uuid::new_v4()),
    ];
    for request in rejected {
        assert!(service.update_account(request).await.is_err());
    }
    assert_eq!(*accounts.updates.lock().unwrap(), 0);

    service
        .update_account(UpdateAccountRequest::new(UserAction::Lock, id))
        .await
        .unwrap();
    assert_eq!(*accounts.updates.lock().unwrap(), 1);
}
