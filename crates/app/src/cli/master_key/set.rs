use clap::Args;
use zonegate_app::domain::credentials::{CredentialsService, SqliteCredentialsService};

use crate::cli::{KeyArgs, StoreArgs};

#[derive(Debug, Args)]
pub(crate) struct SetMasterKeyArgs {
    #[command(flatten)]
    store: StoreArgs,

    #[command(flatten)]
    key: KeyArgs,

    /// bunny.net API key to store
    #[arg(long = "value", env = "BUNNY_API_KEY", hide_env_values = true)]
    value: String,
}

pub(crate) async fn run(args: SetMasterKeyArgs) -> Result<(), String> {
    let key = args.key.key()?;
    let pool = args.store.open().await?;

    SqliteCredentialsService::new(pool, key)
        .set_master_credential(&args.value)
        .await
        .map_err(|error| format!("failed to store master credential: {error}"))?;

    println!("master credential stored");

    Ok(())
}
