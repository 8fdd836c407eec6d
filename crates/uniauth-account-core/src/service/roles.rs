//! Role view for a user within a domain.

use crate::{errors::*, traits::*, types::*};
use std::collections::{HashMap, HashSet};
use tracing::debug;
use uuid::Uuid;

use super::AccountLifecycleService;

impl<A, R, U, C> AccountLifecycleService<A, R, U, C>
where
    A: AccountRepository,
    R: RoleRepository,
    U: UserRoleRepository,
    C: CredentialProvider,
{
    /// Every role of `domain_id`, marked `checked` when granted to `user_id`.
    ///
    /// Keeps the role repository's order. A domain without roles yields an
    /// empty list.
    pub(crate) async fn get_roles_for_user_internal(
        &self,
        user_id: Option<Uuid>,
        domain_id: Option<DomainId>,
    ) -> Result<Vec<RoleView>> {
        let (user_id, domain_id) = match (user_id, domain_id) {
            (Some(user_id), Some(domain_id)) => (user_id, domain_id),
            (None, Some(_)) => return Err(AccountError::missing(&["user_id"])),
            (Some(_), None) => return Err(AccountError::missing(&["domain_id"])),
            (None, None) => return Err(AccountError::missing(&["user_id", "domain_id"])),
        };

        let roles = self.roles.find_by_domain(domain_id).await?;
        if roles.is_empty() {
            debug!("Domain {} has no roles", domain_id);
            return Ok(Vec::new());
        }

        let granted: HashSet<RoleId> = self
            .user_roles
            .find_by_user(user_id)
            .await?
            .into_iter()
            .map(|assignment| assignment.role_id)
            .collect();

        let codes: HashMap<RoleCodeId, String> = self
            .roles
            .find_all_role_codes()
            .await?
            .into_iter()
            .map(|code| (code.role_code_id, code.code))
            .collect();

        Ok(roles
            .into_iter()
            .map(|role| RoleView {
                checked: granted.contains(&role.role_id),
                role_code: codes.get(&role.role_code_id).cloned(),
                role_id: role.role_id,
                name: role.name,
            })
            .collect())
    }
}
