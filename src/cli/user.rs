//! User CLI commands
//!
//! Registration, a credential check, and the profile view. Every other
//! user-scoped command goes through [`authenticate`] first.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_user_profile;
use crate::error::{PureNoteError, PureNoteResult};
use crate::models::User;
use crate::services::{RegisterUser, UserService};
use crate::storage::Storage;

use super::prompt;

/// User subcommands
#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// Create a new user
    Register {
        /// Username (3-25 characters, no spaces)
        username: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// First name
        #[arg(long)]
        first_name: Option<String>,

        /// Last name
        #[arg(long)]
        last_name: Option<String>,
    },

    /// Check the password for --user
    Login,

    /// Show the profile of --user
    Show,
}

/// Handle user commands
pub fn handle_user_command(
    storage: &Storage,
    settings: &Settings,
    user_arg: Option<&str>,
    cmd: UserCommands,
) -> PureNoteResult<()> {
    match cmd {
        UserCommands::Register {
            username,
            email,
            first_name,
            last_name,
        } => {
            let password = prompt::new_account_password()?;
            let user = UserService::new(storage).register(RegisterUser {
                username,
                email,
                first_name,
                last_name,
                password,
            })?;

            println!("Registered user: {} ({})", user.username, user.id);
            println!("Your diary entries will be encrypted with a content password");
            println!("you choose when writing them. It cannot be recovered if lost.");
        }

        UserCommands::Login => {
            let user = authenticate(storage, user_arg)?;
            println!("Logged in as {}", user.username);
        }

        UserCommands::Show => {
            let user = authenticate(storage, user_arg)?;
            let entry_count = storage.entries.get_by_user(user.id)?.len();
            print!("{}", format_user_profile(&user, entry_count, settings));
        }
    }

    Ok(())
}

/// Resolve --user and check the account password
pub fn authenticate(storage: &Storage, user_arg: Option<&str>) -> PureNoteResult<User> {
    let identifier = user_arg.map(str::trim).filter(|u| !u.is_empty()).ok_or_else(|| {
        PureNoteError::Validation(
            "No user given. Pass --user or set PURENOTE_USER.".to_string(),
        )
    })?;

    let password = prompt::account_password()?;
    UserService::new(storage).login(identifier, &password)
}
