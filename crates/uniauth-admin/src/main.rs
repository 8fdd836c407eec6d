/*!
 * uniauth admin
 *
 * Operator tool for the account lifecycle:
 * 1. Provision accounts with a generated initial password
 * 2. Apply administrative actions (lock, unlock, password reset,
 *    status change, profile update)
 * 3. Inspect accounts and per-domain role views
 *
 * Usage:
 *   cargo run -p uniauth-admin -- create --name Ann --email ann@x.com
 *   cargo run -p uniauth-admin -- update lock --id <account-id>
 *   cargo run -p uniauth-admin -- roles --user <account-id> --domain 1
 */

mod commands;
mod config;
mod state;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use commands::accounts::UpdateFields;
use config::Config;
use state::AdminState;

#[derive(Parser)]
#[command(name = "uniauth-admin")]
#[command(about = "Account lifecycle administration for uniauth")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and print its initial password
    Create {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Email address (must be unique)
        #[arg(short, long)]
        email: String,

        /// Phone number (must be unique when given)
        #[arg(short, long)]
        phone: Option<String>,
    },
    /// Apply an administrative action to an account
    Update {
        /// LOCK, UNLOCK, RESET_PASSWORD, STATUS_CHANGE or UPDATE_INFO
        action: String,

        /// Account ID
        #[arg(long)]
        id: Uuid,

        /// New name (UPDATE_INFO)
        #[arg(long)]
        name: Option<String>,

        /// New email (UPDATE_INFO)
        #[arg(long)]
        email: Option<String>,

        /// New phone (UPDATE_INFO; omitted clears it)
        #[arg(long)]
        phone: Option<String>,

        /// New password (RESET_PASSWORD)
        #[arg(long)]
        password: Option<String>,

        /// New status: 0 = active, 1 = disabled (STATUS_CHANGE)
        #[arg(long)]
        status: Option<u8>,
    },
    /// Show an account
    Show {
        /// Account ID
        #[arg(long)]
        id: Uuid,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a domain's roles, marking those granted to a user
    Roles {
        /// Account ID
        #[arg(short, long)]
        user: Uuid,

        /// Domain ID
        #[arg(short, long)]
        domain: u32,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Store a role (and optionally its role code) in the local database
    SeedRole {
        /// Domain ID
        #[arg(long)]
        domain: u32,

        /// Role ID
        #[arg(long)]
        id: u32,

        /// Role name
        #[arg(long)]
        name: String,

        /// Role code ID
        #[arg(long)]
        code_id: u32,

        /// Role code text; stored under `code_id` when given
        #[arg(long)]
        code: Option<String>,
    },
    /// Grant a role to an account in the local database
    Grant {
        /// Account ID
        #[arg(short, long)]
        user: Uuid,

        /// Role ID
        #[arg(short, long)]
        role: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "uniauth_admin=info,uniauth_account_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    tracing::debug!("Opening database at {}", config.database_path.display());
    let state = AdminState::new(&config)?;

    match cli.command {
        Commands::Create { name, email, phone } => {
            commands::accounts::create_account(&state, &name, &email, phone).await?
        }

        Commands::Update {
            action,
            id,
            name,
            email,
            phone,
            password,
            status,
        } => {
            let fields = UpdateFields {
                name,
                email,
                phone,
                password,
                status,
            };
            commands::accounts::update_account(&state, &action, id, fields).await?
        }

        Commands::Show { id, json } => commands::accounts::show_account(&state, id, json).await?,

        Commands::Roles { user, domain, json } => {
            commands::roles::show_roles(&state, user, domain, json).await?
        }

        Commands::SeedRole {
            domain,
            id,
            name,
            code_id,
            code,
        } => commands::roles::seed_role(&state, domain, id, &name, code_id, code).await?,

        Commands::Grant { user, role } => commands::roles::grant_role(&state, user, role).await?,
    }

    Ok(())
}
