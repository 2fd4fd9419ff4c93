use clap::{Args, Subcommand};

mod add;

#[derive(Debug, Args)]
pub(crate) struct PermissionCommand {
    #[command(subcommand)]
    command: PermissionSubcommand,
}

#[derive(Debug, Subcommand)]
enum PermissionSubcommand {
    Add(add::AddPermissionArgs),
}

pub(crate) async fn run(command: PermissionCommand) -> Result<(), String> {
    match command.command {
        PermissionSubcommand::Add(args) => add::run(args).await,
    }
}
