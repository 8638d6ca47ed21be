//! Tag CLI commands

use clap::Subcommand;

use crate::display::format_tag_list;
use crate::error::PureNoteResult;
use crate::models::User;
use crate::services::TagService;
use crate::storage::Storage;

/// Tag subcommands
#[derive(Subcommand, Debug)]
pub enum TagCommands {
    /// List your tags with entry counts
    #[command(alias = "ls")]
    List,
}

/// Handle tag commands for an authenticated user
pub fn handle_tag_command(storage: &Storage, user: &User, cmd: TagCommands) -> PureNoteResult<()> {
    match cmd {
        TagCommands::List => {
            let tags = TagService::new(storage).list_with_counts(user.id)?;
            println!("{}", format_tag_list(&tags).trim_end());
        }
    }

    Ok(())
}
