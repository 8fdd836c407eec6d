//! Email and phone uniqueness checks.

use crate::{errors::*, traits::*, types::AccountFilter};
use tracing::warn;
use uniauth_crypto::fingerprint;
use uuid::Uuid;

use super::AccountLifecycleService;

impl<A, R, U, C> AccountLifecycleService<A, R, U, C>
where
    A: AccountRepository,
    R: RoleRepository,
    U: UserRoleRepository,
    C: CredentialProvider,
{
    /// Reject an email or phone already used by an account other than
    /// `exclude_id`.
    ///
    /// Email is required and checked first; the phone is only checked when
    /// present and the email passed.
    pub(crate) async fn validate_unique(
        &self,
        phone: Option<&str>,
        email: Option<&str>,
        exclude_id: Option<Uuid>,
    ) -> Result<()> {
        let email = email.ok_or_else(|| AccountError::missing(&["email"]))?;

        let filter = AccountFilter::by_email(email).excluding(exclude_id);
        if !self.accounts.find_by_filter(&filter).await?.is_empty() {
            warn!("Duplicate email rejected: {}", fingerprint(email));
            return Err(AccountError::DuplicateEmail(email.to_string()));
        }

        if let Some(phone) = phone {
            let filter = AccountFilter::by_phone(phone).excluding(exclude_id);
            if !self.accounts.find_by_filter(&filter).await?.is_empty() {
                warn!("Duplicate phone rejected: {}", fingerprint(phone));
                return Err(AccountError::DuplicatePhone(phone.to_string()));
            }
        }

        Ok(())
    }
}
