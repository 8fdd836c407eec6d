//! Account provisioning.

use crate::{errors::*, traits::*, types::*};
use tracing::info;
use uniauth_crypto::fingerprint;
use uuid::Uuid;

use super::{non_blank, AccountLifecycleService};

impl<A, R, U, C> AccountLifecycleService<A, R, U, C>
where
    A: AccountRepository,
    R: RoleRepository,
    U: UserRoleRepository,
    C: CredentialProvider,
{
    /// Create an account with a generated initial password
    pub(crate) async fn create_account_internal(
        &self,
        request: CreateAccountRequest,
    ) -> Result<ProvisionedAccount> {
        let CreateAccountRequest { name, phone, email } = request;
        let phone = non_blank(phone);
        let email = non_blank(email);

        self.validate_unique(phone.as_deref(), email.as_deref(), None)
            .await?;
        let email = email.ok_or_else(|| AccountError::missing(&["email"]))?;
        info!("Creating account for email {}", fingerprint(&email));

        let initial_password = self.credentials.generate_random_password();
        let (password_hash, password_salt) = self.seal_password(&initial_password)?;

        let now = current_timestamp();
        let account = Account {
            account_id: Uuid::new_v4(),
            name,
            email,
            phone,
            password_hash,
            password_salt,
            password_set_at: now,
            fail_count: 0,
            status: AccountStatus::Active,
            created_at: now,
            updated_at: now,
        };
        self.accounts.insert(&account).await?;

        info!("Account created successfully: {}", account.account_id);
        Ok(ProvisionedAccount {
            account: AccountSummary::from(&account),
            initial_password,
        })
    }
}
