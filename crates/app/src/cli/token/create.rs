use clap::Args;
use tradepost_app::{auth::PgAuthService, database, domain::accounts::models::UserId};

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// User that should own the token
    #[arg(long)]
    user_id: i64,
}

pub(crate) async fn run(args: CreateTokenArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgAuthService::new(pool);

    let issued = service
        .issue_api_token(UserId::from_i64(args.user_id))
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    println!("token_uuid: {}", issued.metadata.uuid);
    println!("user_id: {}", issued.metadata.user_id);
    println!("token_created_at: {}", issued.metadata.created_at);
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
