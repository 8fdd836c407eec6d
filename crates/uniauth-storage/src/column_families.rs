//! RocksDB column family definitions.

/// Accounts: account_id → Account
pub const CF_ACCOUNTS: &str = "accounts";

/// Unique email index: lowercased email → account_id
pub const CF_ACCOUNTS_BY_EMAIL: &str = "accounts_by_email";

/// Unique phone index: phone → account_id
pub const CF_ACCOUNTS_BY_PHONE: &str = "accounts_by_phone";

/// Roles: role_id → Role
pub const CF_ROLES: &str = "roles";

/// Roles by domain index: (domain_id, role_id) → role_id
pub const CF_ROLES_BY_DOMAIN: &str = "roles_by_domain";

/// Role codes: role_code_id → RoleCode
pub const CF_ROLE_CODES: &str = "role_codes";

/// User role assignments: (user_id, role_id) → UserRoleAssignment
pub const CF_USER_ROLES: &str = "user_roles";

/// Get all column family names
pub fn all_column_families() -> Vec<&'static str> {
    vec![
        CF_ACCOUNTS,
        CF_ACCOUNTS_BY_EMAIL,
        CF_ACCOUNTS_BY_PHONE,
        CF_ROLES,
        CF_ROLES_BY_DOMAIN,
        CF_ROLE_CODES,
        CF_USER_ROLES,
    ]
}
