use clap::Args;
use zonegate_app::domain::tokens::{SqliteTokensService, TokensService, TokensServiceError};
use zonegate_core::ids::TokenId;

use crate::cli::StoreArgs;

#[derive(Debug, Args)]
pub(crate) struct DeleteTokenArgs {
    #[command(flatten)]
    store: StoreArgs,

    /// Token id to delete
    #[arg(long)]
    id: i64,
}

pub(crate) async fn run(args: DeleteTokenArgs) -> Result<(), String> {
    let pool = args.store.open().await?;
    let service = SqliteTokensService::new(pool);

    match service.delete_token(TokenId::new(args.id)).await {
        Ok(()) => println!("deleted token {}", args.id),
        Err(TokensServiceError::NotFound) => println!("token {} does not exist", args.id),
        Err(error) => return Err(format!("failed to delete token: {error}")),
    }

    Ok(())
}
