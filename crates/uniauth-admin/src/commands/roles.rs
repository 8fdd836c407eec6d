/*!
 * Role view and role seeding commands
 */

use anyhow::Result;
use colored::*;
use uniauth_account_core::{AccountLifecycle, DomainId, Role, RoleCode, RoleCodeId, RoleId};
use uuid::Uuid;

use crate::state::AdminState;

pub async fn show_roles(
    state: &AdminState,
    user_id: Uuid,
    domain_id: DomainId,
    json: bool,
) -> Result<()> {
    let views = state
        .service
        .get_roles_for_user(Some(user_id), Some(domain_id))
        .await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }

    println!(
        "{}",
        format!("=== Roles in domain {} for {} ===", domain_id, user_id)
            .bold()
            .cyan()
    );
    if views.is_empty() {
        println!("{}", "No roles defined in this domain".yellow());
        return Ok(());
    }

    for view in &views {
        let mark = if view.checked { "[x]".green() } else { "[ ]".normal() };
        println!(
            "  {} {:>5}  {}  {}",
            mark,
            view.role_id,
            view.name,
            view.role_code.as_deref().unwrap_or("-").dimmed()
        );
    }

    Ok(())
}

pub async fn seed_role(
    state: &AdminState,
    domain_id: DomainId,
    role_id: RoleId,
    name: &str,
    role_code_id: RoleCodeId,
    code: Option<String>,
) -> Result<()> {
    if let Some(code) = code {
        state
            .repository
            .put_role_code(&RoleCode { role_code_id, code })
            .await?;
    }
    state
        .repository
        .put_role(&Role {
            role_id,
            domain_id,
            name: name.to_string(),
            role_code_id,
        })
        .await?;

    println!(
        "{}",
        format!("✓ Role {} stored in domain {}", role_id, domain_id).green()
    );
    Ok(())
}

pub async fn grant_role(state: &AdminState, user_id: Uuid, role_id: RoleId) -> Result<()> {
    state.repository.assign_role(user_id, role_id).await?;
    println!(
        "{}",
        format!("✓ Role {} granted to {}", role_id, user_id).green()
    );
    Ok(())
}
