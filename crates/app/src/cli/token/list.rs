use clap::Args;
use zonegate_app::domain::tokens::{SqliteTokensService, TokensService};

use crate::cli::StoreArgs;

#[derive(Debug, Args)]
pub(crate) struct ListTokensArgs {
    #[command(flatten)]
    store: StoreArgs,
}

pub(crate) async fn run(args: ListTokensArgs) -> Result<(), String> {
    let pool = args.store.open().await?;
    let service = SqliteTokensService::new(pool);

    let tokens = service
        .list_tokens()
        .await
        .map_err(|error| format!("failed to list tokens: {error}"))?;

    if tokens.is_empty() {
        println!("no tokens found");
        return Ok(());
    }

    for token in tokens {
        println!("token_id: {}", token.id);
        println!("token_name: {}", token.name);
        println!("is_admin: {}", token.is_admin);
        println!("created_at: {}", token.created_at);
        println!();
    }

    Ok(())
}
