use clap::Args;
use zonegate_app::{
    crypto::Secret,
    domain::tokens::{SqliteTokensService, TokensService, data::NewToken},
};

use crate::cli::StoreArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    #[command(flatten)]
    store: StoreArgs,

    /// Token display name
    #[arg(long)]
    name: String,

    /// Grant full access, including token administration
    #[arg(long)]
    admin: bool,

    /// Optional raw secret; generated when omitted
    #[arg(long, hide_env_values = true)]
    secret: Option<String>,
}

pub(crate) async fn run(args: CreateTokenArgs) -> Result<(), String> {
    let pool = args.store.open().await?;
    let service = SqliteTokensService::new(pool);

    let secret = args.secret.map_or_else(Secret::generate, Secret::new);

    let token = service
        .create_token(NewToken {
            name: args.name,
            is_admin: args.admin,
            secret: secret.clone(),
            permissions: Vec::new(),
        })
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    println!("token_id: {}", token.id);
    println!("token_name: {}", token.name);
    println!("is_admin: {}", token.is_admin);
    println!("created_at: {}", token.created_at);
    println!("api_token: {}", secret.expose());
    println!("store this token now; it is only shown once");

    Ok(())
}
