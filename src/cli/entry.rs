//! Diary entry CLI commands

use std::io::Read;

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_entry_details, format_entry_list};
use crate::error::{PureNoteError, PureNoteResult};
use crate::models::{EntryFilter, EntryInput, EntrySummary, User};
use crate::services::EntryService;
use crate::storage::Storage;

use super::prompt;

/// Diary entry subcommands
#[derive(Subcommand, Debug)]
pub enum EntryCommands {
    /// Write a new entry
    Add {
        /// Entry title
        title: String,

        /// Entry text (read from stdin when omitted)
        #[arg(short, long)]
        content: Option<String>,

        /// Mood label
        #[arg(short, long)]
        mood: Option<String>,

        /// Tag to attach (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },

    /// List entries, newest first
    #[command(alias = "ls")]
    List {
        /// Maximum number of entries to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Search entries by date, mood, tag, or title
    Search {
        /// Created on or after this day (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Created on or before this day (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Exact mood
        #[arg(short, long)]
        mood: Option<String>,

        /// Tag to match (repeatable, any of)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Text contained in the title
        #[arg(long)]
        title: Option<String>,

        /// Maximum number of entries to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Decrypt and show an entry
    Show {
        /// Entry ID or unique prefix
        id: String,
    },

    /// Change an entry
    ///
    /// The current content password is checked first; the entry is then
    /// sealed again with it.
    Edit {
        /// Entry ID or unique prefix
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New text
        #[arg(short, long)]
        content: Option<String>,

        /// New mood
        #[arg(short, long)]
        mood: Option<String>,

        /// Replace tags with these (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Remove all tags
        #[arg(long, conflicts_with = "tags")]
        clear_tags: bool,
    },

    /// Delete an entry
    #[command(alias = "rm")]
    Delete {
        /// Entry ID or unique prefix
        id: String,

        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle entry commands for an authenticated user
pub fn handle_entry_command(
    storage: &Storage,
    settings: &Settings,
    user: &User,
    cmd: EntryCommands,
) -> PureNoteResult<()> {
    let service = EntryService::new(storage);

    match cmd {
        EntryCommands::Add {
            title,
            content,
            mood,
            tags,
        } => {
            let content = match content {
                Some(c) => c,
                None => read_stdin()?,
            };
            let mut input = EntryInput::new(title, content).with_tags(tags);
            input.mood = mood;

            let password = prompt::new_content_password()?;
            let entry = service.create(user, input, &password)?;

            println!("Created entry: {} ({})", entry.summary.title, entry.summary.id);
        }

        EntryCommands::List { limit } => {
            let summaries = service.list(user)?;
            print_limited(&summaries, limit.unwrap_or(settings.list_limit), settings);
        }

        EntryCommands::Search {
            from,
            to,
            mood,
            tags,
            title,
            limit,
        } => {
            if let (Some(from), Some(to)) = (from, to) {
                if from > to {
                    return Err(PureNoteError::Validation(format!(
                        "--from {} is after --to {}",
                        from, to
                    )));
                }
            }

            let filter = EntryFilter {
                from,
                to,
                mood,
                tags,
                title_contains: title,
            };
            let summaries = service.search(user, &filter)?;
            print_limited(&summaries, limit.unwrap_or(settings.list_limit), settings);
        }

        EntryCommands::Show { id } => {
            let entry = service.find(user, &id)?;
            let password = prompt::content_password()?;
            let decrypted = service.get_decrypted(user, entry.id, &password)?;

            print!("{}", format_entry_details(&decrypted, settings));
        }

        EntryCommands::Edit {
            id,
            title,
            content,
            mood,
            tags,
            clear_tags,
        } => {
            if title.is_none()
                && content.is_none()
                && mood.is_none()
                && tags.is_empty()
                && !clear_tags
            {
                println!("Nothing to change. Pass --title, --content, --mood, or --tag.");
                return Ok(());
            }

            let entry = service.find(user, &id)?;
            let password = prompt::content_password()?;
            let current = service.get_decrypted(user, entry.id, &password)?;

            let new_tags = if clear_tags {
                Vec::new()
            } else if tags.is_empty() {
                current.summary.tags
            } else {
                tags
            };
            let input = EntryInput {
                title: title.unwrap_or(current.summary.title),
                content: content.unwrap_or(current.content),
                mood: mood.or(current.summary.mood),
                tags: new_tags,
            };

            let updated = service.update(user, entry.id, input, &password)?;
            println!("Updated entry: {} ({})", updated.summary.title, updated.summary.id);
        }

        EntryCommands::Delete { id, force } => {
            let entry = service.find(user, &id)?;

            if !force {
                println!("About to delete '{}' ({}).", entry.title, entry.id);
                println!("This cannot be undone. To proceed, run again with --force:");
                println!("  purenote entry delete {} --force", entry.id);
                return Ok(());
            }

            let summary = service.delete(user, entry.id)?;
            println!("Deleted entry: {} ({})", summary.title, summary.id);
        }
    }

    Ok(())
}

fn print_limited(summaries: &[EntrySummary], limit: usize, settings: &Settings) {
    let shown = &summaries[..summaries.len().min(limit)];
    print!("{}", format_entry_list(shown, settings));
    if shown.is_empty() {
        println!();
    }
    if shown.len() < summaries.len() {
        println!("Showing {} of {}. Use --limit to see more.", shown.len(), summaries.len());
    }
}

fn read_stdin() -> PureNoteResult<String> {
    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .map_err(|e| PureNoteError::Io(format!("Failed to read entry text from stdin: {}", e)))?;
    Ok(content)
}
