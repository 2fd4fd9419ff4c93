use clap::Args;
use zonegate_app::domain::tokens::{SqliteTokensService, TokensService, data::NewPermission};
use zonegate_core::{actions::Action, ids::TokenId};

use crate::cli::StoreArgs;

#[derive(Debug, Args)]
pub(crate) struct AddPermissionArgs {
    #[command(flatten)]
    store: StoreArgs,

    /// Scoped token receiving the grant
    #[arg(long)]
    token_id: i64,

    /// Zone id, or 0 for every zone
    #[arg(long)]
    zone_id: i64,

    /// Comma-separated actions, e.g. list_records,add_record
    #[arg(long, value_delimiter = ',', required = true)]
    actions: Vec<Action>,

    /// Comma-separated record types; every type when omitted
    #[arg(long, value_delimiter = ',')]
    record_types: Vec<String>,
}

pub(crate) async fn run(args: AddPermissionArgs) -> Result<(), String> {
    let pool = args.store.open().await?;
    let service = SqliteTokensService::new(pool);

    let permission = service
        .add_permission(
            TokenId::new(args.token_id),
            NewPermission {
                zone_id: args.zone_id,
                allowed_actions: args.actions,
                record_types: args.record_types,
            },
        )
        .await
        .map_err(|error| format!("failed to add permission: {error}"))?;

    let actions: Vec<&str> = permission
        .allowed_actions
        .iter()
        .map(|action| action.as_str())
        .collect();

    println!("permission_id: {}", permission.id);
    println!("token_id: {}", permission.token_id);
    println!("zone_id: {}", permission.zone_id);
    println!("actions: {}", actions.join(","));
    println!(
        "record_types: {}",
        if permission.record_types.is_empty() {
            "all".to_string()
        } else {
            permission.record_types.join(",")
        }
    );

    Ok(())
}
