/*!
 * Account commands
 */

use anyhow::Result;
use colored::*;
use uniauth_account_core::{
    AccountLifecycle, AccountStatus, AccountSummary, CreateAccountRequest, UpdateAccountRequest,
    UserAction,
};
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::state::AdminState;

/// Optional fields of `update`, forwarded as given
pub struct UpdateFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
    pub status: Option<u8>,
}

pub async fn create_account(
    state: &AdminState,
    name: &str,
    email: &str,
    phone: Option<String>,
) -> Result<()> {
    println!("{}", "=== Creating Account ===".bold().cyan());

    let provisioned = state
        .service
        .create_account(CreateAccountRequest {
            name: name.to_string(),
            phone,
            email: Some(email.to_string()),
        })
        .await?;

    print_account(&provisioned.account);
    println!("\n{}", "Initial password (shown once):".bold().yellow());
    println!("  {}", provisioned.initial_password.as_str());

    Ok(())
}

pub async fn update_account(
    state: &AdminState,
    action: &str,
    account_id: Uuid,
    fields: UpdateFields,
) -> Result<()> {
    let action: UserAction = action.parse()?;
    let status = fields.status.map(AccountStatus::try_from).transpose()?;

    println!(
        "{}",
        format!("=== {} on {} ===", action, account_id).bold().cyan()
    );

    state
        .service
        .update_account(UpdateAccountRequest {
            action: Some(action),
            account_id: Some(account_id),
            name: fields.name,
            phone: fields.phone,
            email: fields.email,
            password: fields.password.map(Zeroizing::new),
            status,
        })
        .await?;

    println!("{}", "✓ Account updated".green());
    let account = state.service.get_account(account_id).await?;
    print_account(&account);

    Ok(())
}

pub async fn show_account(state: &AdminState, account_id: Uuid, json: bool) -> Result<()> {
    let account = state.service.get_account(account_id).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&account)?);
        return Ok(());
    }

    println!("{}", "=== Account ===".bold().cyan());
    print_account(&account);
    Ok(())
}

fn print_account(account: &AccountSummary) {
    println!("\n{}", "Account:".bold());
    println!("  Account ID: {}", account.account_id);
    println!("  Name: {}", account.name);
    println!("  Email: {}", account.email);
    println!(
        "  Phone: {}",
        account.phone.as_deref().unwrap_or("-").dimmed()
    );
    let status = match account.status {
        AccountStatus::Active => "ACTIVE".green(),
        AccountStatus::Disabled => "DISABLED".red(),
    };
    println!("  Status: {}", status);
    println!("  Fail Count: {}", account.fail_count);
    println!("  Password Set At: {}", account.password_set_at);
    println!("  Created At: {}", account.created_at);
    println!("  Updated At: {}", account.updated_at);
}
