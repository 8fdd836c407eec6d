//! Account Core type definitions.

use crate::errors::AccountError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;
use zeroize::Zeroizing;

/// Role domain identifier
pub type DomainId = u32;

/// Role identifier
pub type RoleId = u32;

/// Role code identifier
pub type RoleCodeId = u32;

/// Value written to `fail_count` by the LOCK action
pub const MAX_AUTH_FAIL_COUNT: u8 = 10;

/// Account status
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountStatus {
    Active = 0,
    /// Restricted; only STATUS_CHANGE may touch the account.
    Disabled = 1,
}

impl TryFrom<u8> for AccountStatus {
    type Error = AccountError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AccountStatus::Active),
            1 => Ok(AccountStatus::Disabled),
            other => Err(AccountError::InvalidStatus(other)),
        }
    }
}

/// Account record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub account_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    /// Encoded salted digest of the current password
    pub password_hash: String,
    /// Encoded salt used for `password_hash`
    pub password_salt: String,
    pub password_set_at: u64,
    pub fail_count: u8,
    pub status: AccountStatus,
    pub created_at: u64,
    pub updated_at: u64,
}

impl Account {
    /// Whether the status blocks every action except STATUS_CHANGE
    pub fn is_frozen(&self) -> bool {
        self.status == AccountStatus::Disabled
    }
}

/// External representation of an account, without credential material
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub account_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub fail_count: u8,
    pub status: AccountStatus,
    pub password_set_at: u64,
    pub created_at: u64,
    pub updated_at: u64,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        Self {
            account_id: account.account_id,
            name: account.name.clone(),
            email: account.email.clone(),
            phone: account.phone.clone(),
            fail_count: account.fail_count,
            status: account.status,
            password_set_at: account.password_set_at,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// A newly created account together with its one-time initial password
pub struct ProvisionedAccount {
    pub account: AccountSummary,
    pub initial_password: Zeroizing<String>,
}

impl fmt::Debug for ProvisionedAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvisionedAccount")
            .field("account", &self.account)
            .field("initial_password", &"<redacted>")
            .finish()
    }
}

/// Administrative action applied by `update_account`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserAction {
    Lock,
    Unlock,
    ResetPassword,
    StatusChange,
    UpdateInfo,
}

impl UserAction {
    /// Canonical wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            UserAction::Lock => "LOCK",
            UserAction::Unlock => "UNLOCK",
            UserAction::ResetPassword => "RESET_PASSWORD",
            UserAction::StatusChange => "STATUS_CHANGE",
            UserAction::UpdateInfo => "UPDATE_INFO",
        }
    }
}

impl fmt::Display for UserAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserAction {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "LOCK" => Ok(UserAction::Lock),
            "UNLOCK" => Ok(UserAction::Unlock),
            "RESET_PASSWORD" => Ok(UserAction::ResetPassword),
            "STATUS_CHANGE" => Ok(UserAction::StatusChange),
            "UPDATE_INFO" => Ok(UserAction::UpdateInfo),
            _ => Err(AccountError::UnknownAction(s.to_string())),
        }
    }
}

/// Create account request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateAccountRequest {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Update account request.
///
/// Fields not used by `action` are ignored. UPDATE_INFO overwrites name,
/// email and phone together, so an absent phone clears the stored one.
#[derive(Clone, Default)]
pub struct UpdateAccountRequest {
    pub action: Option<UserAction>,
    pub account_id: Option<Uuid>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub password: Option<Zeroizing<String>>,
    pub status: Option<AccountStatus>,
}

impl UpdateAccountRequest {
    /// Request for `action` on `account_id`
    pub fn new(action: UserAction, account_id: Uuid) -> Self {
        Self {
            action: Some(action),
            account_id: Some(account_id),
            ..Default::default()
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(Zeroizing::new(password.into()));
        self
    }

    pub fn with_status(mut self, status: AccountStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_info(
        mut self,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: Option<String>,
    ) -> Self {
        self.name = Some(name.into());
        self.email = Some(email.into());
        self.phone = phone;
        self
    }
}

impl fmt::Debug for UpdateAccountRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateAccountRequest")
            .field("action", &self.action)
            .field("account_id", &self.account_id)
            .field("name", &self.name)
            .field("phone", &self.phone)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("status", &self.status)
            .finish()
    }
}

/// Filter accepted by `AccountRepository::find_by_filter`.
///
/// Every populated field must match. Email matching ignores ASCII case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountFilter {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub exclude_id: Option<Uuid>,
}

impl AccountFilter {
    pub fn by_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Default::default()
        }
    }

    pub fn by_phone(phone: impl Into<String>) -> Self {
        Self {
            phone: Some(phone.into()),
            ..Default::default()
        }
    }

    /// Exclude an account id from the match set
    pub fn excluding(mut self, account_id: Option<Uuid>) -> Self {
        self.exclude_id = account_id;
        self
    }

    pub fn matches(&self, account: &Account) -> bool {
        if self.exclude_id == Some(account.account_id) {
            return false;
        }
        if let Some(email) = &self.email {
            if !account.email.eq_ignore_ascii_case(email) {
                return false;
            }
        }
        if let Some(phone) = &self.phone {
            if account.phone.as_deref() != Some(phone.as_str()) {
                return false;
            }
        }
        true
    }
}

/// Role record, owned by the role-management subsystem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub role_id: RoleId,
    pub domain_id: DomainId,
    pub name: String,
    pub role_code_id: RoleCodeId,
}

/// Role code lookup entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCode {
    pub role_code_id: RoleCodeId,
    pub code: String,
}

/// Grant of a role to an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRoleAssignment {
    pub user_id: Uuid,
    pub role_id: RoleId,
}

/// A domain role annotated with whether the user holds it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleView {
    pub role_id: RoleId,
    pub name: String,
    /// `None` when the role references an unknown role code
    pub role_code: Option<String>,
    pub checked: bool,
}

/// Tunables for the lifecycle service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountPolicy {
    /// Value LOCK writes to `fail_count`
    pub max_fail_count: u8,
}

impl Default for AccountPolicy {
    fn default() -> Self {
        Self {
            max_fail_count: MAX_AUTH_FAIL_COUNT,
        }
    }
}

// Re-export current_timestamp from uniauth-crypto
pub use uniauth_crypto::current_timestamp;

#[cfg(test)]
mod tests {
    use super::*;

    fn account(email: &str, phone: Option<&str>) -> Account {
        Account {
            account_id: Uuid::new_v4(),
            name: "Ann".to_string(),
            email: email.to_string(),
            phone: phone.map(str::to_string),
            password_hash: String::new(),
            password_salt: String::new(),
            password_set_at: 0,
            fail_count: 0,
            status: AccountStatus::Active,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_account_status_values() {
        assert_eq!(AccountStatus::Active as u8, 0);
        assert_eq!(AccountStatus::Disabled as u8, 1);
        assert_eq!(AccountStatus::try_from(1).unwrap(), AccountStatus::Disabled);
        assert!(matches!(
            AccountStatus::try_from(7),
            Err(AccountError::InvalidStatus(7))
        ));
    }

    #[test]
    fn test_user_action_parse() {
        assert_eq!("LOCK".parse::<UserAction>().unwrap(), UserAction::Lock);
        assert_eq!(
            "reset-password".parse::<UserAction>().unwrap(),
            UserAction::ResetPassword
        );
        assert_eq!(
            UserAction::StatusChange.to_string().parse::<UserAction>().unwrap(),
            UserAction::StatusChange
        );
        assert!(matches!(
            "DELETE".parse::<UserAction>(),
            Err(AccountError::UnknownAction(_))
        ));
    }

    #[test]
    fn test_user_action_serde_name() {
        let json = serde_json::to_string(&UserAction::UpdateInfo).unwrap();
        assert_eq!(json, "\"UPDATE_INFO\"");
    }

    #[test]
    fn test_filter_excludes_subject() {
        let acc = account("ann@x.com", None);
        assert!(AccountFilter::by_email("ANN@x.com").matches(&acc));
        assert!(!AccountFilter::by_email("ann@x.com")
            .excluding(Some(acc.account_id))
            .matches(&acc));
    }

    #[test]
    fn test_filter_phone() {
        let acc = account("ann@x.com", Some("555-1111"));
        assert!(AccountFilter::by_phone("555-1111").matches(&acc));
        assert!(!AccountFilter::by_phone("555-2222").matches(&acc));
        assert!(!AccountFilter::by_phone("555-1111").matches(&account("b@x.com", None)));
    }

    #[test]
    fn test_debug_redacts_passwords() {
        let request = UpdateAccountRequest::new(UserAction::ResetPassword, Uuid::new_v4())
            .with_password("Secret123");
        assert!(!format!("{:?}", request).contains("Secret123"));

        let provisioned = ProvisionedAccount {
            account: AccountSummary::from(&account("ann@x.com", None)),
            initial_password: Zeroizing::new("Secret123".to_string()),
        };
        assert!(!format!("{:?}", provisioned).contains("Secret123"));
    }
}
