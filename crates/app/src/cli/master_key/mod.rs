use clap::{Args, Subcommand};

mod set;

#[derive(Debug, Args)]
pub(crate) struct MasterKeyCommand {
    #[command(subcommand)]
    command: MasterKeySubcommand,
}

#[derive(Debug, Subcommand)]
enum MasterKeySubcommand {
    Set(set::SetMasterKeyArgs),
}

pub(crate) async fn run(command: MasterKeyCommand) -> Result<(), String> {
    match command.command {
        MasterKeySubcommand::Set(args) => set::run(args).await,
    }
}
