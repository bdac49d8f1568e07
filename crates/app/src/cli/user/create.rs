use std::sync::Arc;

use clap::Args;
use tradepost_app::{
    database::{self, Db},
    domain::accounts::{
        AccountsService, PgAccountsService,
        models::{NewUser, UserKind},
    },
    notifications::QueuedNotifier,
};

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Recipient for administrative notifications
    #[arg(long, env = "ADMIN_EMAIL")]
    admin_email: String,

    /// Contact email; doubles as the login identifier
    #[arg(long)]
    email: String,

    #[arg(long)]
    first_name: String,

    #[arg(long)]
    last_name: String,

    #[arg(long, default_value = "")]
    company: String,

    #[arg(long, default_value = "")]
    position: String,

    /// Account kind: 'buyer' or 'shop'
    #[arg(long, default_value = "buyer")]
    kind: String,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    let kind = UserKind::parse(&args.kind)
        .ok_or_else(|| format!("invalid kind '{}': expected 'buyer' or 'shop'", args.kind))?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgAccountsService::new(
        Db::new(pool),
        Arc::new(QueuedNotifier::spawn()),
        args.admin_email,
    );

    let user = service
        .register_user(NewUser {
            email: args.email,
            first_name: args.first_name,
            last_name: args.last_name,
            company: args.company,
            position: args.position,
            kind,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_id: {}", user.id);
    println!("email: {}", user.email);
    println!("kind: {}", user.kind.as_str());

    Ok(())
}
