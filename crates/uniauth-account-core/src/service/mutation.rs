//! Administrative actions on existing accounts.

use crate::{errors::*, traits::*, types::*};
use tracing::{info, warn};

use super::{non_blank, AccountLifecycleService};

impl<A, R, U, C> AccountLifecycleService<A, R, U, C>
where
    A: AccountRepository,
    R: RoleRepository,
    U: UserRoleRepository,
    C: CredentialProvider,
{
    /// Apply one administrative action and persist the whole record.
    ///
    /// A disabled account accepts STATUS_CHANGE only.
    pub(crate) async fn update_account_internal(
        &self,
        request: UpdateAccountRequest,
    ) -> Result<()> {
        let UpdateAccountRequest {
            action,
            account_id,
            name,
            phone,
            email,
            password,
            status,
        } = request;

        let (action, account_id) = match (action, account_id) {
            (Some(action), Some(account_id)) => (action, account_id),
            (None, Some(_)) => return Err(AccountError::missing(&["action"])),
            (Some(_), None) => return Err(AccountError::missing(&["account_id"])),
            (None, None) => return Err(AccountError::missing(&["action", "account_id"])),
        };

        let current = self
            .accounts
            .find_by_key(account_id)
            .await?
            .ok_or(AccountError::NotFound(account_id))?;

        if current.is_frozen() && action != UserAction::StatusChange {
            warn!("Rejected {} on frozen account {}", action, account_id);
            return Err(AccountError::AccountFrozen(account_id));
        }

        let now = current_timestamp();
        let updated = match action {
            UserAction::Lock => Account {
                fail_count: self.policy.max_fail_count,
                ..current
            },
            UserAction::Unlock => Account {
                fail_count: 0,
                ..current
            },
            UserAction::ResetPassword => {
                let password = password.ok_or_else(|| AccountError::missing(&["password"]))?;
                if !self.credentials.validate_password_rule(&password) {
                    return Err(AccountError::PasswordRuleViolation);
                }
                let (password_hash, password_salt) = self.seal_password(&password)?;
                Account {
                    password_hash,
                    password_salt,
                    password_set_at: now,
                    ..current
                }
            }
            UserAction::StatusChange => {
                let status = status.ok_or_else(|| AccountError::missing(&["status"]))?;
                Account { status, ..current }
            }
            UserAction::UpdateInfo => {
                let phone = non_blank(phone);
                let email = non_blank(email);
                self.validate_unique(phone.as_deref(), email.as_deref(), Some(account_id))
                    .await?;
                let email = email.ok_or_else(|| AccountError::missing(&["email"]))?;
                let name = name.ok_or_else(|| AccountError::missing(&["name"]))?;
                Account {
                    name,
                    email,
                    phone,
                    updated_at: now,
                    ..current
                }
            }
        };

        self.accounts.update(&updated).await?;

        info!("Account {} updated: action={}", account_id, action);
        Ok(())
    }
}
